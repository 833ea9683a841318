//! Boot orchestrator
//!
//! Reads candidate boot sectors, validates their signature and performs the
//! relocation that precedes the handoff.
//!
//! Device selection follows the stored priority list with one asymmetry kept
//! on purpose: USB is attempted when it holds slot 1 or slot 2, otherwise the
//! primary disk is attempted, and a failed disk boot never falls back to the
//! remaining slots.

use bios_api::input::{self, scancode};
use bios_api::{Attribute, DeviceKind, Display, KeyEvent, Keyboard, MemoryBus, RegisterPort};

use super::handoff::Handoff;
use super::sector::SectorBuffer;
use crate::config::FirmwareConfig;
use crate::drivers::ata::AtaPio;
use crate::drivers::usb::UsbStorage;
use crate::error::{FirmwareError, Result};
use crate::menu::widgets::{self, Frame};

/// LBA of the boot sector
const BOOT_LBA: u32 = 0;

/// Auto-boot confirmation window
const OVERLAY: Frame = Frame::new(30, 10, 20, 6);

/// What the orchestrator is doing, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStatus {
    Idle,
    Attempting(DeviceKind),
    Failed(DeviceKind, FirmwareError),
    HandedOff(DeviceKind),
}

/// Outcome of the auto-boot check
#[derive(Debug, PartialEq, Eq)]
pub enum AutoBoot {
    /// User confirmed; the primary disk sector is in place
    Handoff(Handoff),
    /// Bootable disk found, user declined
    Declined,
    /// Primary disk unreadable or not bootable
    NotBootable(FirmwareError),
}

pub struct BootOrchestrator<P, M, U> {
    disk: AtaPio<P>,
    memory: M,
    usb: U,
    boot_address: usize,
    status: BootStatus,
}

impl<P, M, U> BootOrchestrator<P, M, U>
where
    P: RegisterPort,
    M: MemoryBus,
    U: UsbStorage,
{
    pub fn new(port: P, memory: M, usb: U, config: &FirmwareConfig) -> Self {
        Self {
            disk: AtaPio::new(port, config),
            memory,
            usb,
            boot_address: config.boot_address,
            status: BootStatus::Idle,
        }
    }

    pub fn status(&self) -> BootStatus {
        self.status
    }

    /// Device of the current or last attempt
    pub fn selected_device(&self) -> Option<DeviceKind> {
        match self.status {
            BootStatus::Idle => None,
            BootStatus::Attempting(device)
            | BootStatus::Failed(device, _)
            | BootStatus::HandedOff(device) => Some(device),
        }
    }

    /// Device a manual boot goes to for this priority list.
    pub fn select_device(order: &[DeviceKind; 3]) -> DeviceKind {
        if order[0] == DeviceKind::Usb || order[1] == DeviceKind::Usb {
            DeviceKind::Usb
        } else {
            DeviceKind::HardDisk
        }
    }

    /// Read sector 0 of the primary disk and check its signature.
    pub fn read_primary_disk(&mut self) -> Result<SectorBuffer> {
        let mut sector = SectorBuffer::new();
        self.disk.read_sector(BOOT_LBA, &mut sector)?;
        sector.validate()?;
        Ok(sector)
    }

    /// Silently probe the primary disk and, if it is bootable, ask whether to
    /// boot it now. Ignores the priority list.
    pub fn auto_boot_check<D, K>(&mut self, display: &mut D, keyboard: &mut K) -> AutoBoot
    where
        D: Display + ?Sized,
        K: Keyboard + ?Sized,
    {
        let sector = match self.read_primary_disk() {
            Ok(sector) => sector,
            Err(err) => {
                log::info!("auto-boot: primary disk not bootable: {}", err);
                return AutoBoot::NotBootable(err);
            }
        };

        widgets::draw_frame(display, OVERLAY, Attribute::SELECTED);
        display.draw(" Boot OS? ", OVERLAY.x + 5, OVERLAY.y + 1, Attribute::SELECTED);
        display.draw(" [Y] Yes  [N] No ", OVERLAY.x + 2, OVERLAY.y + 3, Attribute::SELECTED);

        loop {
            let Some(raw) = keyboard.poll_key() else {
                continue;
            };
            let KeyEvent::Make(code) = KeyEvent::decode(raw) else {
                continue;
            };
            match input::to_ascii(code) {
                Some(b'y') => {
                    widgets::erase(display, OVERLAY, Attribute::NORMAL);
                    log::info!("auto-boot: confirmed");
                    return AutoBoot::Handoff(self.handoff(DeviceKind::HardDisk, &sector));
                }
                Some(b'n') => break,
                _ if code == scancode::ESC => break,
                _ => {}
            }
        }

        widgets::erase(display, OVERLAY, Attribute::NORMAL);
        log::info!("auto-boot: declined");
        AutoBoot::Declined
    }

    /// Manual boot following the priority list.
    pub fn boot(&mut self, order: &[DeviceKind; 3]) -> Result<Handoff> {
        match Self::select_device(order) {
            DeviceKind::Usb => {
                let slot = if order[0] == DeviceKind::Usb { 1 } else { 2 };
                log::info!("boot: USB holds priority slot {}", slot);
                self.boot_from_usb()
            }
            _ => self.boot_from_disk(),
        }
    }

    pub fn boot_from_disk(&mut self) -> Result<Handoff> {
        self.attempt(DeviceKind::HardDisk, |this| this.read_primary_disk())
    }

    pub fn boot_from_usb(&mut self) -> Result<Handoff> {
        self.attempt(DeviceKind::Usb, |this| {
            if !this.usb.is_present() {
                return Err(FirmwareError::DeviceUnavailable(DeviceKind::Usb));
            }
            let mut sector = SectorBuffer::new();
            this.usb.read_boot_sector(&mut sector)?;
            sector.validate()?;
            Ok(sector)
        })
    }

    fn attempt(
        &mut self,
        device: DeviceKind,
        read: impl FnOnce(&mut Self) -> Result<SectorBuffer>,
    ) -> Result<Handoff> {
        self.status = BootStatus::Attempting(device);
        log::info!("boot: trying {}", device.name());
        match read(self) {
            Ok(sector) => Ok(self.handoff(device, &sector)),
            Err(err) => {
                log::warn!("boot: {} failed: {}", device.name(), err);
                self.status = BootStatus::Failed(device, err);
                Err(err)
            }
        }
    }

    /// Relocate a validated sector to the transfer address.
    fn handoff(&mut self, device: DeviceKind, sector: &SectorBuffer) -> Handoff {
        self.memory.write_bytes(self.boot_address, sector.as_bytes());
        self.status = BootStatus::HandedOff(device);
        log::info!(
            "boot: handing off to {} at {:#x}",
            device.name(),
            self.boot_address
        );
        Handoff::new(device, self.boot_address)
    }
}
