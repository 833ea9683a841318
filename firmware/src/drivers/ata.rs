//! ATA PIO sector reads on the primary channel

use bios_api::RegisterPort;
use bios_api::status::AtaStatus;

use crate::boot::SectorBuffer;
use crate::config::FirmwareConfig;
use crate::error::{FirmwareError, Result};
use crate::utils::{PollOutcome, poll_until};

/// Primary channel command block registers
pub mod regs {
    pub const DATA: u16 = 0x1F0;
    pub const SECTOR_COUNT: u16 = 0x1F2;
    pub const LBA_LOW: u16 = 0x1F3;
    pub const LBA_MID: u16 = 0x1F4;
    pub const LBA_HIGH: u16 = 0x1F5;
    pub const DRIVE_HEAD: u16 = 0x1F6;
    pub const STATUS: u16 = 0x1F7;
    pub const COMMAND: u16 = 0x1F7;
}

pub const CMD_READ_SECTORS: u8 = 0x20;

/// Master drive, LBA addressing
const DRIVE_MASTER_LBA: u8 = 0xE0;

/// Primary-channel ATA disk in PIO mode.
pub struct AtaPio<P> {
    port: P,
    busy_budget: u32,
    ready_budget: u32,
}

impl<P: RegisterPort> AtaPio<P> {
    pub fn new(port: P, config: &FirmwareConfig) -> Self {
        Self {
            port,
            busy_budget: config.disk_busy_budget,
            ready_budget: config.disk_ready_budget,
        }
    }

    pub fn status(&mut self) -> AtaStatus {
        AtaStatus::from_bits_retain(self.port.read8(regs::STATUS))
    }

    /// Wait for BUSY to clear, then for READY to rise, each with its own budget.
    ///
    /// Exhausting a budget is not an error: the caller goes on and only the
    /// ERROR bit decides the outcome of the transfer.
    pub fn wait_ready(&mut self) -> PollOutcome {
        let busy = poll_until(self.busy_budget, || {
            !self.status().contains(AtaStatus::BUSY)
        });
        if !busy.is_ready() {
            log::warn!("ata: busy budget of {} polls exhausted", self.busy_budget);
        }

        let ready = poll_until(self.ready_budget, || {
            self.status().contains(AtaStatus::READY)
        });
        if !ready.is_ready() {
            log::warn!("ata: ready budget of {} polls exhausted", self.ready_budget);
        }

        if busy.is_ready() { ready } else { PollOutcome::TimedOut }
    }

    /// Read one 512-byte sector at `lba` (28-bit) from the master drive.
    pub fn read_sector(&mut self, lba: u32, buffer: &mut SectorBuffer) -> Result<()> {
        self.wait_ready();

        self.port
            .write8(regs::DRIVE_HEAD, DRIVE_MASTER_LBA | ((lba >> 24) & 0x0F) as u8);
        self.port.write8(regs::SECTOR_COUNT, 1);
        self.port.write8(regs::LBA_LOW, lba as u8);
        self.port.write8(regs::LBA_MID, (lba >> 8) as u8);
        self.port.write8(regs::LBA_HIGH, (lba >> 16) as u8);
        self.port.write8(regs::COMMAND, CMD_READ_SECTORS);

        self.wait_ready();

        if self.status().contains(AtaStatus::ERROR) {
            log::warn!("ata: read of lba {} failed", lba);
            return Err(FirmwareError::ReadFailure);
        }

        for word in buffer.as_bytes_mut().chunks_exact_mut(2) {
            word.copy_from_slice(&self.port.read16(regs::DATA).to_le_bytes());
        }
        log::debug!("ata: read lba {}", lba);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::sim::SimPort;

    fn sector_with_signature() -> [u8; 512] {
        let mut raw = [0u8; 512];
        raw[0] = 0xEB;
        raw[510] = 0x55;
        raw[511] = 0xAA;
        raw
    }

    #[test]
    fn test_read_sector_programs_registers() {
        let mut port = SimPort::new();
        port.set(regs::STATUS, 0x58).load_sector(&sector_with_signature());
        let config = FirmwareConfig::new();
        let mut buffer = SectorBuffer::new();

        AtaPio::new(&mut port, &config)
            .read_sector(0, &mut buffer)
            .unwrap();

        assert_eq!(buffer.as_bytes()[0], 0xEB);
        assert!(buffer.has_boot_signature());
        assert_eq!(port.writes_to(regs::DRIVE_HEAD), vec![0xE0]);
        assert_eq!(port.writes_to(regs::SECTOR_COUNT), vec![1]);
        assert_eq!(port.writes_to(regs::COMMAND), vec![CMD_READ_SECTORS]);
        assert_eq!(port.read_count(regs::DATA), 256);
    }

    #[test]
    fn test_lba_bytes() {
        let mut port = SimPort::new();
        port.set(regs::STATUS, 0x40);
        let config = FirmwareConfig::new();
        let mut buffer = SectorBuffer::new();

        AtaPio::new(&mut port, &config)
            .read_sector(0x0A12_3456, &mut buffer)
            .unwrap();

        assert_eq!(port.writes_to(regs::DRIVE_HEAD), vec![0xEA]);
        assert_eq!(port.writes_to(regs::LBA_LOW), vec![0x56]);
        assert_eq!(port.writes_to(regs::LBA_MID), vec![0x34]);
        assert_eq!(port.writes_to(regs::LBA_HIGH), vec![0x12]);
    }

    #[test]
    fn test_error_bit_fails_read() {
        let mut port = SimPort::new();
        port.set(regs::STATUS, 0x41);
        let config = FirmwareConfig::new();
        let mut buffer = SectorBuffer::new();

        let result = AtaPio::new(&mut port, &config).read_sector(0, &mut buffer);
        assert_eq!(result, Err(FirmwareError::ReadFailure));
        assert_eq!(port.read_count(regs::DATA), 0);
    }

    #[test]
    fn test_timeout_without_error_bit_still_reads() {
        let mut port = SimPort::new();
        // Stuck busy, never ready, error bit clear
        port.set(regs::STATUS, 0x80);
        let config = FirmwareConfig::new().with_disk_budgets(3, 2);
        let mut buffer = SectorBuffer::new();

        let mut disk = AtaPio::new(&mut port, &config);
        assert_eq!(disk.wait_ready(), PollOutcome::TimedOut);
        assert!(disk.read_sector(0, &mut buffer).is_ok());
        // 5 polls per wait, two waits, one error check, plus the wait above
        assert_eq!(port.read_count(regs::STATUS), 5 + 5 + 5 + 1);
    }
}
