//! Power management modes

/// Power policy persisted in the CMOS scratch byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PowerMode {
    MaxPerformance = 0,
    #[default]
    Balanced = 1,
    PowerSaving = 2,
    MinPower = 3,
}

impl PowerMode {
    pub const ALL: [PowerMode; 4] = [
        PowerMode::MaxPerformance,
        PowerMode::Balanced,
        PowerMode::PowerSaving,
        PowerMode::MinPower,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Cycle to the next mode, wrapping after `MinPower`.
    pub fn next(self) -> Self {
        Self::ALL[(self.code() as usize + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MaxPerformance => "Max Performance",
            Self::Balanced => "Balanced",
            Self::PowerSaving => "Power Saving",
            Self::MinPower => "Min Power",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MaxPerformance => "Maximum performance, highest power consumption",
            Self::Balanced => "Balanced performance and power usage",
            Self::PowerSaving => "Reduced performance for power saving",
            Self::MinPower => "Minimum power, basic functionality only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(PowerMode::MaxPerformance.next(), PowerMode::Balanced);
        assert_eq!(PowerMode::MinPower.next(), PowerMode::MaxPerformance);
    }

    #[test]
    fn test_from_code_rejects_out_of_range() {
        assert_eq!(PowerMode::from_code(3), Some(PowerMode::MinPower));
        assert_eq!(PowerMode::from_code(4), None);
        assert_eq!(PowerMode::default(), PowerMode::Balanced);
    }
}
