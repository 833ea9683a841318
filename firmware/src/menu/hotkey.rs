//! Splash-screen chord detection

use bios_api::KeyEvent;
use bios_api::input::scancode;

/// Tracks whether `B` and `T` are held down together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotkeyDetector {
    b_held: bool,
    t_held: bool,
}

impl HotkeyDetector {
    pub const fn new() -> Self {
        Self {
            b_held: false,
            t_held: false,
        }
    }

    /// Feed one raw scancode; `true` once both keys are down.
    pub fn feed(&mut self, raw: u8) -> bool {
        let (code, held) = match KeyEvent::decode(raw) {
            KeyEvent::Make(code) => (code, true),
            KeyEvent::Break(code) => (code, false),
        };
        match code {
            scancode::B => self.b_held = held,
            scancode::T => self.t_held = held,
            _ => {}
        }
        self.b_held && self.t_held
    }
}
