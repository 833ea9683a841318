//! Firmware error handling
//!
//! This module defines the error type used throughout the firmware for
//! consistent error reporting and classification.

use core::fmt;

use bios_api::DeviceKind;

use crate::diagnostics::post::PostResult;

/// Firmware error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareError {
    /// Stored CMOS checksum does not match the record.
    /// Classification only: `SettingsStore::load` recovers with defaults.
    ChecksumMismatch,

    /// A POST stage failed
    PostFailure(PostResult),

    /// Third wrong password; terminal
    SecurityLockout,

    /// Boot sector does not end in 0xAA55
    SignatureInvalid,

    /// Controller reported an error while reading a sector
    ReadFailure,

    /// A bounded poll ran out of budget
    Timeout,

    /// No usable device of this kind
    DeviceUnavailable(DeviceKind),

    /// Wrong password entered (not yet a lockout)
    InvalidPassword,

    /// Cancel key pressed where it means warm restart
    RestartRequested,
}

impl FirmwareError {
    /// Convert to a numeric code suitable for the POST port or a log line
    pub fn as_error_code(&self) -> u32 {
        match self {
            FirmwareError::ChecksumMismatch => 0x1000,
            FirmwareError::PostFailure(result) => 0x2000 + result.code() as u32,
            FirmwareError::SecurityLockout => 0x3000,
            FirmwareError::InvalidPassword => 0x3001,
            FirmwareError::SignatureInvalid => 0x4000,
            FirmwareError::ReadFailure => 0x4001,
            FirmwareError::Timeout => 0x4002,
            FirmwareError::DeviceUnavailable(kind) => 0x4100 + kind.code() as u32,
            FirmwareError::RestartRequested => 0x5000,
        }
    }

    /// Get a human-readable description of the error
    pub fn description(&self) -> &'static str {
        match self {
            FirmwareError::ChecksumMismatch => "CMOS checksum mismatch",
            FirmwareError::PostFailure(result) => result.message(),
            FirmwareError::SecurityLockout => "System halted!",
            FirmwareError::InvalidPassword => "Invalid password",
            FirmwareError::SignatureInvalid => "No boot signature (0xAA55)",
            FirmwareError::ReadFailure => "Cannot read boot sector",
            FirmwareError::Timeout => "Device timed out",
            FirmwareError::DeviceUnavailable(_) => "Boot device not available",
            FirmwareError::RestartRequested => "Restart requested",
        }
    }

    /// Check if the caller may continue (pick another device, return to the menu)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FirmwareError::SignatureInvalid
                | FirmwareError::ReadFailure
                | FirmwareError::Timeout
                | FirmwareError::DeviceUnavailable(_)
                | FirmwareError::InvalidPassword
        )
    }

    /// Check if this error must halt the machine
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FirmwareError::PostFailure(_) | FirmwareError::SecurityLockout
        )
    }
}

impl fmt::Display for FirmwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FirmwareError: {} (code: {:#x})",
            self.description(),
            self.as_error_code()
        )
    }
}

/// Result type for firmware operations
pub type Result<T = ()> = core::result::Result<T, FirmwareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(FirmwareError::PostFailure(PostResult::CpuFail).is_fatal());
        assert!(FirmwareError::SecurityLockout.is_fatal());
        assert!(!FirmwareError::SignatureInvalid.is_fatal());
        assert!(FirmwareError::SignatureInvalid.is_recoverable());
        assert!(FirmwareError::ReadFailure.is_recoverable());
        assert!(!FirmwareError::SecurityLockout.is_recoverable());
        assert!(!FirmwareError::ChecksumMismatch.is_fatal());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FirmwareError::PostFailure(PostResult::DiskFail).as_error_code(),
            0x2005
        );
        assert_eq!(
            FirmwareError::DeviceUnavailable(DeviceKind::Usb).as_error_code(),
            0x4102
        );
    }

    #[test]
    fn test_display() {
        let text = format!("{}", FirmwareError::SignatureInvalid);
        assert_eq!(
            text,
            "FirmwareError: No boot signature (0xAA55) (code: 0x4000)"
        );
    }
}
