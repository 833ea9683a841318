//! Tone collaborator

/// Audible feedback device.
pub trait Speaker {
    /// Sound `frequency_hz` for roughly `duration_ms`, then silence.
    fn emit_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

impl<T: Speaker + ?Sized> Speaker for &mut T {
    fn emit_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        (**self).emit_tone(frequency_hz, duration_ms)
    }
}
