//! Raw key collaborator and scancode decoding
//!
//! Keys arrive as PC/AT scancode set 1 bytes. A byte with bit 7 set is the
//! break (release) code of the key in the low seven bits.

/// Non-blocking key source.
pub trait Keyboard {
    /// Next pending raw scancode, if any.
    fn poll_key(&mut self) -> Option<u8>;
}

impl<T: Keyboard + ?Sized> Keyboard for &mut T {
    fn poll_key(&mut self) -> Option<u8> {
        (**self).poll_key()
    }
}

/// Scancode set 1 make codes used by the firmware.
pub mod scancode {
    pub const ESC: u8 = 0x01;
    pub const BACKSPACE: u8 = 0x0E;
    pub const ENTER: u8 = 0x1C;
    pub const T: u8 = 0x14;
    pub const Y: u8 = 0x15;
    pub const B: u8 = 0x30;
    pub const N: u8 = 0x31;
    pub const UP: u8 = 0x48;
    pub const LEFT: u8 = 0x4B;
    pub const RIGHT: u8 = 0x4D;
    pub const DOWN: u8 = 0x50;

    /// Bit distinguishing a break code from a make code.
    pub const BREAK_BIT: u8 = 0x80;
}

/// A decoded scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Make(u8),
    Break(u8),
}

impl KeyEvent {
    pub const fn decode(raw: u8) -> Self {
        if raw & scancode::BREAK_BIT != 0 {
            KeyEvent::Break(raw & !scancode::BREAK_BIT)
        } else {
            KeyEvent::Make(raw)
        }
    }

    pub const fn is_make(self) -> bool {
        matches!(self, KeyEvent::Make(_))
    }
}

// US QWERTY, unshifted. Keypad codes are left unmapped: with num-lock off they
// double as the arrow keys.
const ASCII_TABLE: [u8; 58] = [
    0, 0, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0, //
    0, b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', 0, //
    0, b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, //
    b'\\', b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', 0, //
    b' ',
];

/// Printable ASCII byte for a make code, or `None` for control and unmapped keys.
pub fn to_ascii(make_code: u8) -> Option<u8> {
    ASCII_TABLE
        .get(make_code as usize)
        .copied()
        .filter(|&c| c != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_make_and_break() {
        assert_eq!(KeyEvent::decode(0x1C), KeyEvent::Make(scancode::ENTER));
        assert_eq!(KeyEvent::decode(0x9C), KeyEvent::Break(scancode::ENTER));
    }

    #[test]
    fn test_to_ascii_letters_and_digits() {
        assert_eq!(to_ascii(0x02), Some(b'1'));
        assert_eq!(to_ascii(0x05), Some(b'4'));
        assert_eq!(to_ascii(0x10), Some(b'q'));
        assert_eq!(to_ascii(scancode::Y), Some(b'y'));
        assert_eq!(to_ascii(scancode::N), Some(b'n'));
        assert_eq!(to_ascii(0x39), Some(b' '));
    }

    #[test]
    fn test_to_ascii_control_keys_unmapped() {
        assert_eq!(to_ascii(scancode::ENTER), None);
        assert_eq!(to_ascii(scancode::BACKSPACE), None);
        assert_eq!(to_ascii(scancode::ESC), None);
        assert_eq!(to_ascii(scancode::UP), None);
        assert_eq!(to_ascii(scancode::DOWN), None);
    }
}
