//! 8042 keyboard controller

use bios_api::status::KbcStatus;
use bios_api::{Keyboard, RegisterPort};

pub const DATA_PORT: u16 = 0x60;
pub const STATUS_PORT: u16 = 0x64;

/// Controller command pulsing the CPU reset line
pub const CMD_PULSE_RESET: u8 = 0xFE;

/// Polled PS/2 keyboard returning raw set-1 scancodes.
pub struct Ps2Keyboard<P> {
    port: P,
}

impl<P: RegisterPort> Ps2Keyboard<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    pub fn status(&mut self) -> KbcStatus {
        KbcStatus::from_bits_retain(self.port.read8(STATUS_PORT))
    }
}

impl<P: RegisterPort> Keyboard for Ps2Keyboard<P> {
    fn poll_key(&mut self) -> Option<u8> {
        if self.status().contains(KbcStatus::OUTPUT_FULL) {
            Some(self.port.read8(DATA_PORT))
        } else {
            None
        }
    }
}

/// Ask the keyboard controller to reset the machine.
pub fn request_reset<P: RegisterPort + ?Sized>(port: &mut P) {
    port.write8(STATUS_PORT, CMD_PULSE_RESET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::sim::SimPort;

    #[test]
    fn test_poll_only_when_output_full() {
        let mut port = SimPort::new();
        port.script(STATUS_PORT, &[0x1C, 0x1D]).script(DATA_PORT, &[0x1E]);
        let mut keyboard = Ps2Keyboard::new(&mut port);
        assert_eq!(keyboard.poll_key(), None);
        assert_eq!(keyboard.poll_key(), Some(0x1E));
        assert_eq!(port.read_count(DATA_PORT), 1);
    }

    #[test]
    fn test_request_reset() {
        let mut port = SimPort::new();
        request_reset(&mut port);
        assert_eq!(port.writes(), &[(STATUS_PORT, CMD_PULSE_RESET)]);
    }
}
