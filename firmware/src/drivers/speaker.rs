//! PC speaker on PIT channel 2

use bios_api::{RegisterPort, Speaker};

const PIT_FREQUENCY: u32 = 1_193_180;
const PIT_CHANNEL2: u16 = 0x42;
const PIT_COMMAND: u16 = 0x43;
const SPEAKER_PORT: u16 = 0x61;
/// POST diagnostic port; a write takes roughly one microsecond
const IO_WAIT_PORT: u16 = 0x80;

/// Channel 2, lobyte/hibyte, square wave
const CHANNEL2_SQUARE_WAVE: u8 = 0xB6;
/// Timer 2 gate and speaker data enable
const SPEAKER_GATE: u8 = 0x03;

/// PIT-driven speaker timed with port-0x80 I/O waits.
pub struct PitSpeaker<P> {
    port: P,
    waits_per_ms: u32,
}

impl<P: RegisterPort> PitSpeaker<P> {
    pub const fn new(port: P) -> Self {
        Self {
            port,
            waits_per_ms: 1_000,
        }
    }

    /// Override the delay calibration (0 disables the delay).
    pub const fn with_waits_per_ms(mut self, waits: u32) -> Self {
        self.waits_per_ms = waits;
        self
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms.saturating_mul(self.waits_per_ms) {
            self.port.write8(IO_WAIT_PORT, 0);
        }
    }
}

/// PIT reload value for `frequency_hz`, clamped to the 16-bit counter.
pub fn pit_divisor(frequency_hz: u32) -> u16 {
    let divisor = PIT_FREQUENCY / frequency_hz.max(1);
    divisor.clamp(1, u16::MAX as u32) as u16
}

impl<P: RegisterPort> Speaker for PitSpeaker<P> {
    fn emit_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        let [low, high] = pit_divisor(frequency_hz).to_le_bytes();
        self.port.write8(PIT_COMMAND, CHANNEL2_SQUARE_WAVE);
        self.port.write8(PIT_CHANNEL2, low);
        self.port.write8(PIT_CHANNEL2, high);

        let gate = self.port.read8(SPEAKER_PORT);
        self.port.write8(SPEAKER_PORT, gate | SPEAKER_GATE);

        self.delay_ms(duration_ms);

        let gate = self.port.read8(SPEAKER_PORT);
        self.port.write8(SPEAKER_PORT, gate & !SPEAKER_GATE);
    }
}
