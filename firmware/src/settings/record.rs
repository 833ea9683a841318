//! The configuration record and its checksum

use arrayvec::ArrayVec;
use bios_api::DeviceKind;

use super::layout::PASSWORD_LEN;

/// Password of up to eight non-zero bytes. Empty means no password.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Password {
    bytes: ArrayVec<u8, PASSWORD_LEN>,
}

impl Password {
    pub const MAX_LEN: usize = PASSWORD_LEN;

    pub fn new() -> Self {
        Self::default()
    }

    /// `None` if `bytes` is too long or contains a zero byte.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.contains(&0) {
            return None;
        }
        let bytes = ArrayVec::try_from(bytes).ok()?;
        Some(Self { bytes })
    }

    /// Append one byte; refused when full or zero.
    pub fn push(&mut self, byte: u8) -> bool {
        byte != 0 && self.bytes.try_push(byte).is_ok()
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Exact, case-sensitive comparison.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.as_bytes() == candidate
    }

    /// The eight stored bytes, zero-padded.
    pub fn to_cmos_bytes(&self) -> [u8; PASSWORD_LEN] {
        let mut raw = [0u8; PASSWORD_LEN];
        raw[..self.len()].copy_from_slice(self.as_bytes());
        raw
    }
}

/// The persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub security_enabled: bool,
    /// Legacy boot-order byte; carried and checksummed, not interpreted
    pub boot_order_code: u8,
    /// Priority slots 1..3, repeats allowed
    pub boot_order: [DeviceKind; 3],
    pub password: Password,
    pub hw_error_count: u8,
}

impl Configuration {
    pub const DEFAULT_BOOT_ORDER: [DeviceKind; 3] = [
        DeviceKind::HardDisk,
        DeviceKind::OpticalDisk,
        DeviceKind::Disabled,
    ];

    /// Checksum byte that makes this record verify.
    pub fn checksum(&self) -> u8 {
        RawRecord::from(self).checksum()
    }

    /// The gate runs only with protection on and a password set.
    pub fn gate_required(&self) -> bool {
        self.security_enabled && !self.password.is_empty()
    }

    pub fn first_boot_device(&self) -> DeviceKind {
        self.boot_order[0]
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            security_enabled: false,
            boot_order_code: 0,
            boot_order: Self::DEFAULT_BOOT_ORDER,
            password: Password::new(),
            hw_error_count: 0,
        }
    }
}

/// Record bytes exactly as held in CMOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct RawRecord {
    pub security: u8,
    pub boot_order: u8,
    pub password: [u8; PASSWORD_LEN],
    pub devices: [u8; 3],
    pub hw_error_count: u8,
}

impl RawRecord {
    /// Two's complement of the byte sum. Password bytes count up to the
    /// first zero.
    pub fn checksum(&self) -> u8 {
        let password = self.password.iter().take_while(|&&b| b != 0);
        let sum = [self.security, self.boot_order]
            .iter()
            .chain(password)
            .chain(self.devices.iter())
            .chain(core::iter::once(&self.hw_error_count))
            .fold(0u8, |acc, &b| acc.wrapping_add(b));
        sum.wrapping_neg()
    }

    /// Decode into a configuration. Unknown device codes become `Disabled`.
    pub fn decode(&self) -> Configuration {
        let mut password = Password::new();
        for &byte in self.password.iter().take_while(|&&b| b != 0) {
            password.push(byte);
        }

        let boot_order = self.devices.map(|code| {
            DeviceKind::from_code(code).unwrap_or_else(|| {
                log::warn!("settings: unknown boot device code {:#x}, using Disabled", code);
                DeviceKind::Disabled
            })
        });

        Configuration {
            security_enabled: self.security != 0,
            boot_order_code: self.boot_order,
            boot_order,
            password,
            hw_error_count: self.hw_error_count,
        }
    }
}

impl From<&Configuration> for RawRecord {
    fn from(config: &Configuration) -> Self {
        Self {
            security: config.security_enabled as u8,
            boot_order: config.boot_order_code,
            password: config.password.to_cmos_bytes(),
            devices: config.boot_order.map(DeviceKind::code),
            hw_error_count: config.hw_error_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_limits() {
        assert!(Password::from_bytes(b"12345678").is_some());
        assert!(Password::from_bytes(b"123456789").is_none());
        assert!(Password::from_bytes(b"12\x0034").is_none());

        let mut password = Password::new();
        for &b in b"abcdefgh" {
            assert!(password.push(b));
        }
        assert!(!password.push(b'i'));
        assert!(password.is_full());
        assert_eq!(password.pop(), Some(b'h'));
    }

    #[test]
    fn test_password_is_case_sensitive() {
        let password = Password::from_bytes(b"Secret").unwrap();
        assert!(password.matches(b"Secret"));
        assert!(!password.matches(b"secret"));
        assert!(!password.matches(b"Secre"));
    }

    #[test]
    fn test_default_checksum() {
        // 0 + 0 + (0 + 1 + 4) + 0 = 5
        assert_eq!(Configuration::default().checksum(), 5u8.wrapping_neg());
    }

    #[test]
    fn test_checksum_counts_password_to_terminator() {
        let mut raw = RawRecord::default();
        raw.password = *b"ab\0zzzzz";
        let mut expected = RawRecord::default();
        expected.password = *b"ab\0\0\0\0\0\0";
        assert_eq!(raw.checksum(), expected.checksum());
        assert_eq!(raw.checksum(), (b'a' + b'b').wrapping_neg());
    }

    #[test]
    fn test_record_sums_to_zero() {
        let config = Configuration {
            security_enabled: true,
            boot_order_code: 3,
            boot_order: [DeviceKind::Usb, DeviceKind::HardDisk, DeviceKind::Network],
            password: Password::from_bytes(b"1234").unwrap(),
            hw_error_count: 2,
        };
        let raw = RawRecord::from(&config);
        let sum = [1u8, 3, b'1', b'2', b'3', b'4', 2, 0, 3, 2]
            .iter()
            .fold(config.checksum(), |acc, &b| acc.wrapping_add(b));
        assert_eq!(sum, 0);
        assert_eq!(raw.decode(), config);
    }

    #[test]
    fn test_unknown_device_decodes_as_disabled() {
        let raw = RawRecord {
            devices: [0, 9, 2],
            ..RawRecord::default()
        };
        assert_eq!(
            raw.decode().boot_order,
            [DeviceKind::HardDisk, DeviceKind::Disabled, DeviceKind::Usb]
        );
    }

    #[test]
    fn test_gate_required() {
        let mut config = Configuration::default();
        config.security_enabled = true;
        assert!(!config.gate_required());
        config.password = Password::from_bytes(b"x").unwrap();
        assert!(config.gate_required());
    }
}
