//! Real-time clock reading

/// A normalized (binary, 24-hour) real-time clock sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReading {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    /// Four-digit year
    pub year: u16,
    /// 1 = Sunday on most RTCs; some report 0 = Sunday
    pub weekday: u8,
}
