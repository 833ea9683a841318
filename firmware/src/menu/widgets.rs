//! Small drawing helpers shared by the screens

use bios_api::input::scancode;
use bios_api::{Attribute, Display};

/// Code page 437 double-line box glyphs
pub mod glyph {
    pub const TOP_LEFT: u8 = 0xC9;
    pub const TOP_RIGHT: u8 = 0xBB;
    pub const BOTTOM_LEFT: u8 = 0xC8;
    pub const BOTTOM_RIGHT: u8 = 0xBC;
    pub const HORIZONTAL: u8 = 0xCD;
    pub const VERTICAL: u8 = 0xBA;
    pub const BULLET: u8 = 0x04;
}

/// Screen rectangle in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Frame {
    pub const fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> u8 {
        self.x + self.width - 1
    }

    fn bottom(&self) -> u8 {
        self.y + self.height - 1
    }
}

/// Double-line border with a blank interior.
pub fn draw_frame<D: Display + ?Sized>(display: &mut D, frame: Frame, attr: Attribute) {
    display.draw_char(glyph::TOP_LEFT, frame.x, frame.y, attr);
    display.draw_char(glyph::TOP_RIGHT, frame.right(), frame.y, attr);
    display.draw_char(glyph::BOTTOM_LEFT, frame.x, frame.bottom(), attr);
    display.draw_char(glyph::BOTTOM_RIGHT, frame.right(), frame.bottom(), attr);

    for x in frame.x + 1..frame.right() {
        display.draw_char(glyph::HORIZONTAL, x, frame.y, attr);
        display.draw_char(glyph::HORIZONTAL, x, frame.bottom(), attr);
    }
    for y in frame.y + 1..frame.bottom() {
        display.draw_char(glyph::VERTICAL, frame.x, y, attr);
        display.draw_char(glyph::VERTICAL, frame.right(), y, attr);
    }
    display.fill(b' ', frame.x + 1, frame.y + 1, frame.width - 2, frame.height - 2, attr);
}

/// Blank the whole frame.
pub fn erase<D: Display + ?Sized>(display: &mut D, frame: Frame, attr: Attribute) {
    display.fill(b' ', frame.x, frame.y, frame.width, frame.height, attr);
}

/// Screen heading with an `=` underline.
pub fn draw_title<D: Display + ?Sized>(display: &mut D, title: &str, x: u8, y: u8) {
    display.draw(title, x, y, Attribute::BRIGHT);
    for col in 0..title.len() as u8 {
        display.draw_char(b'=', x + col, y + 1, Attribute::BRIGHT);
    }
}

/// Vertical list with a `>` marker on the selected row.
pub fn draw_list<D: Display + ?Sized>(
    display: &mut D,
    items: &[&str],
    selected: usize,
    x: u8,
    y: u8,
) {
    for (index, item) in items.iter().enumerate() {
        let row = y + index as u8;
        let (marker, attr) = if index == selected {
            (">", Attribute::SELECTED)
        } else {
            (" ", Attribute::NORMAL)
        };
        display.draw(marker, x, row, attr);
        display.draw(item, x + 2, row, attr);
    }
}

/// Meaning of a key for a vertical list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInput {
    Moved,
    Unchanged,
    Chosen(usize),
    Back,
    /// Any other make code, for the screen to interpret
    Other(u8),
}

/// Selection within a fixed-length list. Up/Down stop at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    selected: usize,
    len: usize,
}

impl ListCursor {
    pub const fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle(&mut self, make_code: u8) -> ListInput {
        match make_code {
            scancode::UP if self.selected > 0 => {
                self.selected -= 1;
                ListInput::Moved
            }
            scancode::DOWN if self.selected + 1 < self.len => {
                self.selected += 1;
                ListInput::Moved
            }
            scancode::UP | scancode::DOWN => ListInput::Unchanged,
            scancode::ENTER => ListInput::Chosen(self.selected),
            scancode::ESC => ListInput::Back,
            code => ListInput::Other(code),
        }
    }
}

/// Single decimal digit, `?` above 9.
pub fn digit(value: u8) -> u8 {
    if value < 10 { b'0' + value } else { b'?' }
}
