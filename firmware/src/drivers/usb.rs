//! USB mass-storage boot path

use bios_api::DeviceKind;

use crate::boot::SectorBuffer;
use crate::error::{FirmwareError, Result};

/// A USB mass-storage device able to supply its first sector.
pub trait UsbStorage {
    /// Whether a controller with an attached storage device was found
    fn is_present(&mut self) -> bool;

    /// Read LBA 0 into `buffer`
    fn read_boot_sector(&mut self, buffer: &mut SectorBuffer) -> Result<()>;
}

impl<T: UsbStorage + ?Sized> UsbStorage for &mut T {
    fn is_present(&mut self) -> bool {
        (**self).is_present()
    }

    fn read_boot_sector(&mut self, buffer: &mut SectorBuffer) -> Result<()> {
        (**self).read_boot_sector(buffer)
    }
}

/// Machine without a supported USB storage stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUsbStorage;

impl UsbStorage for NoUsbStorage {
    fn is_present(&mut self) -> bool {
        false
    }

    fn read_boot_sector(&mut self, _buffer: &mut SectorBuffer) -> Result<()> {
        Err(FirmwareError::DeviceUnavailable(DeviceKind::Usb))
    }
}
