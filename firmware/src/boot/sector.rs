//! 512-byte boot sector buffer

use core::fmt;

use static_assertions::const_assert_eq;

use crate::error::{FirmwareError, Result};

/// Sector size in bytes
pub const SECTOR_SIZE: usize = 512;

/// Boot signature (0xAA55 at offset 510-511, little-endian)
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Boot signature offset
pub const BOOT_SIGNATURE_OFFSET: usize = 510;

/// One disk sector as read from a boot device.
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(2))]
pub struct SectorBuffer {
    bytes: [u8; SECTOR_SIZE],
}

const_assert_eq!(core::mem::size_of::<SectorBuffer>(), SECTOR_SIZE);

impl SectorBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; SECTOR_SIZE],
        }
    }

    pub const fn from_bytes(bytes: [u8; SECTOR_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; SECTOR_SIZE] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; SECTOR_SIZE] {
        &mut self.bytes
    }

    /// Trailing little-endian word
    pub fn signature(&self) -> u16 {
        u16::from_le_bytes([
            self.bytes[BOOT_SIGNATURE_OFFSET],
            self.bytes[BOOT_SIGNATURE_OFFSET + 1],
        ])
    }

    pub fn has_boot_signature(&self) -> bool {
        self.signature() == BOOT_SIGNATURE
    }

    pub fn validate(&self) -> Result<()> {
        if self.has_boot_signature() {
            Ok(())
        } else {
            Err(FirmwareError::SignatureInvalid)
        }
    }
}

impl Default for SectorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SectorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectorBuffer")
            .field("signature", &format_args!("{:#06x}", self.signature()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signature() {
        let mut sector = SectorBuffer::new();
        sector.as_bytes_mut()[510] = 0x55;
        sector.as_bytes_mut()[511] = 0xAA;
        assert_eq!(sector.signature(), 0xAA55);
        assert!(sector.validate().is_ok());
    }

    #[test]
    fn test_byte_swapped_signature_rejected() {
        let mut sector = SectorBuffer::new();
        sector.as_bytes_mut()[510] = 0xAA;
        sector.as_bytes_mut()[511] = 0x55;
        assert_eq!(sector.validate(), Err(FirmwareError::SignatureInvalid));
    }

    #[test]
    fn test_empty_sector_rejected() {
        assert!(!SectorBuffer::new().has_boot_signature());
    }
}
