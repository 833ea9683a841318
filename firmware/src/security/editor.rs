//! Masked single-line password input

use bios_api::input::{self, scancode};
use bios_api::{Attribute, Display};

use crate::settings::Password;

/// What a key did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text changed or the key was ignored
    Pending,
    /// Enter
    Submitted,
    /// Esc
    Cancelled,
}

/// Up to eight printable characters with backspace.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: Password,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one make code. Printable keys past the limit are dropped.
    pub fn handle_key(&mut self, make_code: u8) -> EditOutcome {
        match make_code {
            scancode::ENTER => EditOutcome::Submitted,
            scancode::ESC => EditOutcome::Cancelled,
            scancode::BACKSPACE => {
                self.text.pop();
                EditOutcome::Pending
            }
            code => {
                if let Some(ch) = input::to_ascii(code) {
                    self.text.push(ch);
                }
                EditOutcome::Pending
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Hand over the entered text and start a fresh line.
    pub fn take(&mut self) -> Password {
        core::mem::take(&mut self.text)
    }

    /// One `*` per character followed by a `_` cursor, over a blanked field.
    pub fn draw_masked<D: Display + ?Sized>(&self, display: &mut D, x: u8, y: u8) {
        display.fill(b' ', x, y, Password::MAX_LEN as u8 + 1, 1, Attribute::NORMAL);
        let len = self.len() as u8;
        display.fill(b'*', x, y, len, 1, Attribute::NORMAL);
        display.draw_char(b'_', x + len, y, Attribute::NORMAL);
    }
}
