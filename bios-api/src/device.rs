//! Boot device kinds

use static_assertions::const_assert_eq;

/// A boot device class as stored in the boot-order slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceKind {
    HardDisk = 0,
    OpticalDisk = 1,
    Usb = 2,
    Network = 3,
    Disabled = 4,
}

// One CMOS byte per slot
const_assert_eq!(core::mem::size_of::<DeviceKind>(), 1);

impl DeviceKind {
    pub const ALL: [DeviceKind; 5] = [
        DeviceKind::HardDisk,
        DeviceKind::OpticalDisk,
        DeviceKind::Usb,
        DeviceKind::Network,
        DeviceKind::Disabled,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HardDisk => "Hard Disk",
            Self::OpticalDisk => "CD/DVD",
            Self::Usb => "USB",
            Self::Network => "Network",
            Self::Disabled => "Disabled",
        }
    }

    /// Next kind in code order, saturating at `Disabled`.
    pub fn next(self) -> Self {
        Self::from_code(self.code() + 1).unwrap_or(Self::Disabled)
    }

    /// Previous kind in code order, saturating at `HardDisk`.
    pub fn previous(self) -> Self {
        self.code()
            .checked_sub(1)
            .and_then(Self::from_code)
            .unwrap_or(Self::HardDisk)
    }
}
