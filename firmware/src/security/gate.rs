//! Security Gate - password challenge with lockout
//!
//! ```text
//!            Enter              match
//!   Locked ---------> Verifying -------> Granted
//!     ^                   |
//!     +------ denial -----+---- 3rd denial ----> Halted
//! ```
//!
//! `Granted` and `Halted` are terminal: once reached, every further key or
//! submission is ignored.

use core::fmt::Write;

use arrayvec::ArrayString;
use bios_api::{Attribute, Display, KeyEvent, Keyboard};

use super::editor::{EditOutcome, LineEditor};
use crate::error::{FirmwareError, Result};
use crate::settings::{Configuration, Password};

/// Denials before the gate halts
pub const MAX_ATTEMPTS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Verifying,
    Granted,
    Halted,
}

impl GateState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GateState::Granted | GateState::Halted)
    }
}

/// Result of feeding one key to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// Nothing to show
    Ignored,
    /// The masked input changed
    Edited,
    Denied { attempts: u8 },
    Granted,
    Halted,
    /// Cancel key: warm restart, not a way back
    RestartRequested,
}

pub struct SecurityGate {
    password: Password,
    input: LineEditor,
    state: GateState,
    attempts: u8,
}

impl SecurityGate {
    pub fn new(password: Password) -> Self {
        Self {
            password,
            input: LineEditor::new(),
            state: GateState::Locked,
            attempts: 0,
        }
    }

    /// Gate for this configuration, `None` when it is bypassed.
    pub fn for_config(config: &Configuration) -> Option<Self> {
        config
            .gate_required()
            .then(|| Self::new(config.password.clone()))
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Consecutive denials so far
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    pub fn input(&self) -> &LineEditor {
        &self.input
    }

    /// Feed one raw scancode. Break codes are ignored.
    pub fn handle_key(&mut self, raw: u8) -> GateEvent {
        if self.state.is_terminal() {
            return GateEvent::Ignored;
        }
        let KeyEvent::Make(code) = KeyEvent::decode(raw) else {
            return GateEvent::Ignored;
        };
        match self.input.handle_key(code) {
            EditOutcome::Pending => GateEvent::Edited,
            EditOutcome::Submitted => self.submit(),
            EditOutcome::Cancelled => {
                log::info!("security: cancel pressed, restart requested");
                GateEvent::RestartRequested
            }
        }
    }

    /// Compare the entered text against the password and clear the input.
    pub fn submit(&mut self) -> GateEvent {
        if self.state.is_terminal() {
            return GateEvent::Ignored;
        }
        self.state = GateState::Verifying;
        let candidate = self.input.take();

        if self.password.matches(candidate.as_bytes()) {
            self.state = GateState::Granted;
            self.attempts = 0;
            log::info!("security: access granted");
            return GateEvent::Granted;
        }

        self.attempts += 1;
        if self.attempts >= MAX_ATTEMPTS {
            self.state = GateState::Halted;
            log::error!("security: {} denials, system halted", self.attempts);
            GateEvent::Halted
        } else {
            self.state = GateState::Locked;
            log::warn!("security: invalid password ({}/{})", self.attempts, MAX_ATTEMPTS);
            GateEvent::Denied {
                attempts: self.attempts,
            }
        }
    }
}

const PROMPT_X: u8 = 25;
const INPUT_X: u8 = 41;
const INPUT_Y: u8 = 7;
const MESSAGE_Y: u8 = 9;
const HALT_Y: u8 = 11;

/// Run the password prompt until the gate reaches a terminal state or the
/// cancel key is pressed.
///
/// `Ok` means access was granted. `Err(SecurityLockout)` means the caller
/// must halt; `Err(RestartRequested)` means it must warm-restart.
pub fn challenge<D, K>(gate: &mut SecurityGate, display: &mut D, keyboard: &mut K) -> Result<()>
where
    D: Display + ?Sized,
    K: Keyboard + ?Sized,
{
    display.clear(Attribute::NORMAL);
    display.draw("BIOS Password Protection", PROMPT_X, 5, Attribute::PROMPT);
    display.draw("Enter password: ", PROMPT_X, INPUT_Y, Attribute::PROMPT);
    gate.input().draw_masked(display, INPUT_X, INPUT_Y);

    loop {
        let Some(raw) = keyboard.poll_key() else {
            continue;
        };
        match gate.handle_key(raw) {
            GateEvent::Ignored => {}
            GateEvent::Edited => gate.input().draw_masked(display, INPUT_X, INPUT_Y),
            GateEvent::Denied { attempts } => {
                draw_denial(display, attempts);
                gate.input().draw_masked(display, INPUT_X, INPUT_Y);
            }
            GateEvent::Granted => {
                display.draw("Access granted!                 ", PROMPT_X, MESSAGE_Y, Attribute::NORMAL);
                return Ok(());
            }
            GateEvent::Halted => {
                draw_denial(display, gate.attempts());
                display.draw("System halted!", PROMPT_X, HALT_Y, Attribute::NORMAL);
                return Err(FirmwareError::SecurityLockout);
            }
            GateEvent::RestartRequested => return Err(FirmwareError::RestartRequested),
        }
    }
}

fn draw_denial<D: Display + ?Sized>(display: &mut D, attempts: u8) {
    let mut text = ArrayString::<32>::new();
    let _ = write!(text, "Invalid password! Attempts: {}/{}", attempts, MAX_ATTEMPTS);
    display.draw(&text, PROMPT_X, MESSAGE_Y, Attribute::NORMAL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::input::{self, scancode};
    use bios_api::sim::{RecordingDisplay, ScriptedKeyboard};

    fn gate(password: &[u8]) -> SecurityGate {
        SecurityGate::new(Password::from_bytes(password).unwrap())
    }

    fn enter(gate: &mut SecurityGate, text: &[u8]) -> GateEvent {
        for &ch in text {
            let code = (0u8..0x80).find(|&sc| input::to_ascii(sc) == Some(ch)).unwrap();
            gate.handle_key(code);
            gate.handle_key(code | scancode::BREAK_BIT);
        }
        gate.handle_key(scancode::ENTER)
    }

    #[test]
    fn test_correct_password_grants() {
        let mut gate = gate(b"1234");
        assert_eq!(enter(&mut gate, b"1234"), GateEvent::Granted);
        assert_eq!(gate.state(), GateState::Granted);
        assert_eq!(gate.attempts(), 0);
    }

    #[test]
    fn test_grant_after_denial_resets_attempts() {
        let mut gate = gate(b"1234");
        assert_eq!(enter(&mut gate, b"0000"), GateEvent::Denied { attempts: 1 });
        assert_eq!(gate.state(), GateState::Locked);
        assert_eq!(gate.input_len(), 0);
        assert_eq!(enter(&mut gate, b"0000"), GateEvent::Denied { attempts: 2 });
        assert_eq!(enter(&mut gate, b"1234"), GateEvent::Granted);
        assert_eq!(gate.attempts(), 0);
    }

    #[test]
    fn test_three_denials_halt() {
        let mut gate = gate(b"1234");
        enter(&mut gate, b"a");
        enter(&mut gate, b"b");
        assert_eq!(enter(&mut gate, b"c"), GateEvent::Halted);
        assert_eq!(gate.state(), GateState::Halted);

        assert_eq!(enter(&mut gate, b"1234"), GateEvent::Ignored);
        assert_eq!(gate.submit(), GateEvent::Ignored);
        assert_eq!(gate.state(), GateState::Halted);
        assert_eq!(gate.attempts(), 3);
    }

    #[test]
    fn test_case_sensitive() {
        let mut gate = SecurityGate::new(Password::from_bytes(b"ab").unwrap());
        // Unshifted input can never produce upper case
        let mut upper = SecurityGate::new(Password::from_bytes(b"AB").unwrap());
        assert_eq!(enter(&mut gate, b"ab"), GateEvent::Granted);
        assert_eq!(enter(&mut upper, b"ab"), GateEvent::Denied { attempts: 1 });
    }

    #[test]
    fn test_escape_requests_restart() {
        let mut gate = gate(b"1234");
        assert_eq!(gate.handle_key(scancode::ESC), GateEvent::RestartRequested);
        assert_eq!(gate.state(), GateState::Locked);
    }

    #[test]
    fn test_bypassed_without_password() {
        let mut config = Configuration::default();
        config.security_enabled = true;
        assert!(SecurityGate::for_config(&config).is_none());
        config.password = Password::from_bytes(b"x").unwrap();
        assert!(SecurityGate::for_config(&config).is_some());
    }

    #[test]
    fn test_challenge_prompt_flow() {
        let mut gate = gate(b"pw");
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.type_text("xx").tap(scancode::ENTER).type_text("pw").tap(scancode::ENTER);

        assert_eq!(challenge(&mut gate, &mut display, &mut keyboard), Ok(()));
        assert!(display.contains("Invalid password! Attempts: 1/3"));
        assert_eq!(display.row(9), format!("{:25}Access granted!", ""));
        assert_eq!(display.attr_at(25, 5), Attribute::PROMPT);
    }

    #[test]
    fn test_challenge_lockout() {
        let mut gate = gate(b"pw");
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        for _ in 0..3 {
            keyboard.type_text("no").tap(scancode::ENTER);
        }
        assert_eq!(
            challenge(&mut gate, &mut display, &mut keyboard),
            Err(FirmwareError::SecurityLockout)
        );
        assert!(display.contains("Attempts: 3/3"));
        assert_eq!(display.row(11), format!("{:25}System halted!", ""));
    }

    #[test]
    fn test_challenge_escape() {
        let mut gate = gate(b"pw");
        let mut display = RecordingDisplay::new();
        let mut keyboard = ScriptedKeyboard::new();
        keyboard.type_text("p").tap(scancode::ESC);
        assert_eq!(
            challenge(&mut gate, &mut display, &mut keyboard),
            Err(FirmwareError::RestartRequested)
        );
    }
}
