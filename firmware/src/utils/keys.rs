//! Blocking key waits over the non-blocking `Keyboard` seam

use bios_api::{KeyEvent, Keyboard};

/// Poll until a make code arrives and return it. Break codes are dropped.
pub fn next_make<K: Keyboard + ?Sized>(keyboard: &mut K) -> u8 {
    loop {
        if let Some(raw) = keyboard.poll_key() {
            if let KeyEvent::Make(code) = KeyEvent::decode(raw) {
                return code;
            }
        }
    }
}

/// "Press any key"
pub fn wait_any_key<K: Keyboard + ?Sized>(keyboard: &mut K) {
    next_make(keyboard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::input::scancode;
    use bios_api::sim::ScriptedKeyboard;

    #[test]
    fn test_next_make_skips_breaks() {
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.raw(&[0x9C, 0xB0, scancode::ENTER]);
        assert_eq!(next_make(&mut keyboard), scancode::ENTER);
        assert_eq!(keyboard.remaining(), 0);
    }
}
