//! Fixed CMOS register layout of the configuration record

pub const BOOT_ORDER: u8 = 0x10;
pub const SECURITY: u8 = 0x11;
/// First of eight password bytes, zero-terminated when shorter
pub const PASSWORD: u8 = 0x12;
pub const PASSWORD_LEN: usize = 8;
pub const CHECKSUM: u8 = 0x1A;
/// First of three boot device slots
pub const BOOT_DEVICE: u8 = 0x20;
pub const HW_ERROR_COUNT: u8 = 0x23;
/// Power mode scratch byte, outside the checksum
pub const POWER_MODE: u8 = 0x30;

/// Scratch register used by the POST CMOS probe
pub const DIAGNOSTIC_SCRATCH: u8 = 0x0E;
