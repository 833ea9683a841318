//! Password gate during start-up

mod common;

use bios_api::input::scancode;
use bios_firmware::drivers::ata::regs;
use bios_firmware::{Configuration, Exit, FirmwareError, Password, SecurityGate, GateState};
use common::Machine;

fn protected(password: &[u8]) -> Configuration {
    Configuration {
        security_enabled: true,
        password: Password::from_bytes(password).unwrap(),
        ..Configuration::default()
    }
}

#[test]
fn test_three_wrong_passwords_halt() {
    let mut machine = Machine::bootable();
    machine.store(&protected(b"secret"));
    for guess in ["a", "b", "c"] {
        machine.keyboard.type_text(guess).tap(scancode::ENTER);
    }

    assert_eq!(machine.run(), Exit::Halt(FirmwareError::SecurityLockout));
    assert!(machine.display.contains("Invalid password! Attempts: 3/3"));
    assert!(machine.display.contains("System halted!"));
    // Nothing past the gate ran
    assert_eq!(machine.port.read_count(regs::DATA), 0);
}

#[test]
fn test_correct_password_reaches_menu() {
    let mut machine = Machine::new();
    machine.store(&protected(b"secret"));
    machine.keyboard.type_text("nope").tap(scancode::ENTER);
    machine.keyboard.type_text("secret").tap(scancode::ENTER);
    machine.keyboard.tap(scancode::ESC);

    assert_eq!(machine.run(), Exit::Restart);
    assert!(machine.display.contains("Invalid password! Attempts: 1/3"));
    assert!(machine.display.contains("Access granted!"));
    assert!(machine.display.contains("  BIOS Menu"));
}

#[test]
fn test_escape_at_prompt_restarts() {
    let mut machine = Machine::new();
    machine.store(&protected(b"secret"));
    machine.keyboard.type_text("sec").tap(scancode::ESC);

    assert_eq!(machine.run(), Exit::Restart);
    assert!(!machine.display.contains("  BIOS Menu"));
}

#[test]
fn test_enabled_without_password_skips_gate() {
    let mut machine = Machine::new();
    machine.store(&Configuration {
        security_enabled: true,
        ..Configuration::default()
    });
    machine.keyboard.tap(scancode::ESC);

    assert_eq!(machine.run(), Exit::Restart);
    assert!(!machine.display.contains("BIOS Password Protection"));
}

#[test]
fn test_gate_state_machine() {
    let mut gate = SecurityGate::new(Password::from_bytes(b"pw").unwrap());
    assert_eq!(gate.state(), GateState::Locked);
    for _ in 0..2 {
        gate.submit();
    }
    assert_eq!(gate.attempts(), 2);
    assert_eq!(gate.state(), GateState::Locked);
    gate.submit();
    assert_eq!(gate.state(), GateState::Halted);
    assert!(gate.state().is_terminal());
}
