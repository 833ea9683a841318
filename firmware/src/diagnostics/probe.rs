//! Hardware self-checks behind the POST stages
//!
//! Every probe restores what it touched: memory words, text cells and the
//! CMOS scratch register read back as they were before the probe ran.

use core::hint::black_box;

use bios_api::status::{AtaStatus, KbcStatus};
use bios_api::{MemoryBus, RegisterPort};

use super::post::{PostStage, SelfTest};
use crate::config::FirmwareConfig;
use crate::drivers::{ata, cmos::Cmos, ps2};
use crate::settings::layout::DIAGNOSTIC_SCRATCH;
use crate::utils::poll_until;

const CMOS_SENTINEL: u8 = 0x55;

/// Integer unit under test.
pub trait Alu {
    fn add(&self, a: u32, b: u32) -> u32;
    fn and(&self, a: u32, b: u32) -> u32;
    fn shl(&self, value: u32, bits: u32) -> u32;
}

/// The CPU itself; operands are opaque to the optimizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAlu;

impl Alu for NativeAlu {
    fn add(&self, a: u32, b: u32) -> u32 {
        black_box(a).wrapping_add(black_box(b))
    }

    fn and(&self, a: u32, b: u32) -> u32 {
        black_box(a) & black_box(b)
    }

    fn shl(&self, value: u32, bits: u32) -> u32 {
        black_box(value).wrapping_shl(black_box(bits))
    }
}

/// Real-register implementation of every POST stage.
pub struct HardwareProbe<P, M, A = NativeAlu> {
    port: P,
    memory: M,
    alu: A,
    config: FirmwareConfig,
}

impl<P: RegisterPort, M: MemoryBus> HardwareProbe<P, M, NativeAlu> {
    pub fn new(port: P, memory: M, config: &FirmwareConfig) -> Self {
        Self {
            port,
            memory,
            alu: NativeAlu,
            config: *config,
        }
    }
}

impl<P: RegisterPort, M: MemoryBus, A: Alu> HardwareProbe<P, M, A> {
    pub fn with_alu<B: Alu>(self, alu: B) -> HardwareProbe<P, M, B> {
        HardwareProbe {
            port: self.port,
            memory: self.memory,
            alu,
            config: self.config,
        }
    }

    /// Textbook results for addition, AND and left shift.
    pub fn check_cpu(&mut self) -> bool {
        self.alu.add(1234, 5678) == 6912
            && self.alu.and(0x55AA, 0x0FF0) == 0x05A0
            && self.alu.shl(0x1234, 4) == 0x12340
    }

    /// Pattern and inverse pattern at the low and the extended probe address.
    pub fn check_memory(&mut self) -> bool {
        let pattern = self.config.memory_pattern;
        [self.config.low_memory_probe, self.config.extended_memory_probe]
            .into_iter()
            .all(|addr| {
                let saved = self.memory.read_u32(addr);
                let ok = [pattern, !pattern].into_iter().all(|value| {
                    self.memory.write_u32(addr, value);
                    self.memory.read_u32(addr) == value
                });
                self.memory.write_u32(addr, saved);
                ok
            })
    }

    /// Known word into several text cells, verified, then restored.
    pub fn check_video(&mut self) -> bool {
        let word = self.config.video_probe_word;
        let cells = self.config.video_probe_cells.map(|cell| self.config.text_buffer + cell * 2);
        let saved = cells.map(|addr| self.memory.read_u16(addr));

        for addr in cells {
            self.memory.write_u16(addr, word);
        }
        let ok = cells.iter().all(|&addr| self.memory.read_u16(addr) == word);

        for (addr, value) in cells.into_iter().zip(saved) {
            self.memory.write_u16(addr, value);
        }
        ok
    }

    /// Controller answers, pending bytes drain, no transfer error afterwards.
    pub fn check_keyboard(&mut self) -> bool {
        let status = self.port.read8(ps2::STATUS_PORT);
        if status == 0x00 || status == 0xFF {
            return false;
        }

        let port = &mut self.port;
        let drained = poll_until(self.config.keyboard_drain_budget, || {
            let status = KbcStatus::from_bits_retain(port.read8(ps2::STATUS_PORT));
            if status.contains(KbcStatus::OUTPUT_FULL) {
                port.read8(ps2::DATA_PORT);
                false
            } else {
                true
            }
        });
        if !drained.is_ready() {
            log::warn!("POST: keyboard output buffer never drained");
        }

        let status = KbcStatus::from_bits_retain(self.port.read8(ps2::STATUS_PORT));
        !status.contains(KbcStatus::TRANSFER_ERROR)
    }

    /// Controller answers and is not busy.
    pub fn check_disk(&mut self) -> bool {
        let raw = self.port.read8(ata::regs::STATUS);
        raw != 0x00 && raw != 0xFF && !AtaStatus::from_bits_retain(raw).contains(AtaStatus::BUSY)
    }

    /// Sentinel round trip through the scratch register.
    pub fn check_cmos(&mut self) -> bool {
        let mut cmos = Cmos::new(&mut self.port);
        let original = cmos.read(DIAGNOSTIC_SCRATCH);
        cmos.write(DIAGNOSTIC_SCRATCH, CMOS_SENTINEL);
        let readback = cmos.read(DIAGNOSTIC_SCRATCH);
        cmos.write(DIAGNOSTIC_SCRATCH, original);
        readback == CMOS_SENTINEL
    }

    pub fn into_inner(self) -> (P, M) {
        (self.port, self.memory)
    }
}

impl<P: RegisterPort, M: MemoryBus, A: Alu> SelfTest for HardwareProbe<P, M, A> {
    fn check(&mut self, stage: PostStage) -> bool {
        match stage {
            PostStage::Cpu => self.check_cpu(),
            PostStage::Memory => self.check_memory(),
            PostStage::Video => self.check_video(),
            PostStage::Keyboard => self.check_keyboard(),
            PostStage::Disk => self.check_disk(),
            PostStage::Cmos => self.check_cmos(),
        }
    }
}
