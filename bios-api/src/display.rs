//! Presentation collaborator
//!
//! The firmware renders through a character-cell display addressed by column
//! and row, with one VGA attribute byte per write.

use static_assertions::const_assert_eq;

/// VGA color palette (16 colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
}

/// VGA attribute byte: background in the high nibble, foreground in the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute(pub u8);

impl Attribute {
    pub const NORMAL: Self = Self(0x07);
    pub const BRIGHT: Self = Self(0x0F);
    pub const SELECTED: Self = Self(0x1F);
    pub const PANEL: Self = Self(0x70);
    pub const SUCCESS: Self = Self(0x0A);
    pub const ERROR: Self = Self(0x0C);
    pub const WARNING: Self = Self(0x0E);
    pub const INFO: Self = Self(0x0B);
    pub const PROMPT: Self = Self(0x02);
    pub const DANGER: Self = Self(0x04);
    pub const ALERT: Self = Self(0x4F);
    pub const BLANK: Self = Self(0x00);

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self(((bg as u8) << 4) | (fg as u8))
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Text-buffer cell word for `ch` drawn with this attribute.
    pub const fn cell(self, ch: u8) -> u16 {
        ((self.0 as u16) << 8) | ch as u16
    }
}

const_assert_eq!(core::mem::size_of::<Attribute>(), 1);

/// Character-cell display.
pub trait Display {
    /// Draw `text` starting at column `x`, row `y`.
    fn draw(&mut self, text: &str, x: u8, y: u8, attr: Attribute);

    /// Fill the whole screen with blanks in `attr`.
    fn clear(&mut self, attr: Attribute);

    /// Draw one raw code-page byte (box-drawing glyphs are not valid UTF-8).
    fn draw_char(&mut self, ch: u8, x: u8, y: u8, attr: Attribute);

    /// Fill a rectangle with `ch`.
    fn fill(&mut self, ch: u8, x: u8, y: u8, width: u8, height: u8, attr: Attribute) {
        for row in y..y.saturating_add(height) {
            for col in x..x.saturating_add(width) {
                self.draw_char(ch, col, row, attr);
            }
        }
    }
}

impl<T: Display + ?Sized> Display for &mut T {
    fn draw(&mut self, text: &str, x: u8, y: u8, attr: Attribute) {
        (**self).draw(text, x, y, attr)
    }

    fn clear(&mut self, attr: Attribute) {
        (**self).clear(attr)
    }

    fn draw_char(&mut self, ch: u8, x: u8, y: u8, attr: Attribute) {
        (**self).draw_char(ch, x, y, attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_colors() {
        assert_eq!(Attribute::new(Color::White, Color::Blue), Attribute::SELECTED);
        assert_eq!(Attribute::new(Color::LightGray, Color::Black), Attribute::NORMAL);
    }

    #[test]
    fn test_attribute_cell() {
        assert_eq!(Attribute::SELECTED.cell(b'A'), 0x1F41);
        assert_eq!(Attribute::NORMAL.cell(b' '), 0x0720);
    }
}
