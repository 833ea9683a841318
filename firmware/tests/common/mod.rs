//! Shared simulated machine for the integration tests

#![allow(dead_code)]

use bios_api::input::scancode;
use bios_api::sim::{RecordingDisplay, RecordingSpeaker, ScriptedKeyboard, SimMemory, SimPort};
use bios_firmware::drivers::NoUsbStorage;
use bios_firmware::drivers::ata::regs;
use bios_firmware::drivers::ps2;
use bios_firmware::{Configuration, Exit, Firmware, FirmwareConfig, SettingsStore};

/// A machine whose every POST stage passes
pub struct Machine {
    pub port: SimPort,
    pub memory: SimMemory,
    pub display: RecordingDisplay,
    pub keyboard: ScriptedKeyboard,
    pub speaker: RecordingSpeaker,
}

impl Machine {
    pub fn new() -> Self {
        let mut port = SimPort::new();
        port.set(ps2::STATUS_PORT, 0x1C).set(regs::STATUS, 0x50);
        Self {
            port,
            memory: SimMemory::new(),
            display: RecordingDisplay::new(),
            keyboard: ScriptedKeyboard::new(),
            speaker: RecordingSpeaker::new(),
        }
    }

    pub fn bootable() -> Self {
        let mut machine = Self::new();
        machine.port.load_sector(&boot_sector());
        machine
    }

    /// Persist `config` as a verifying record
    pub fn store(&mut self, config: &Configuration) -> &mut Self {
        SettingsStore::new(&mut self.port).save(config);
        self
    }

    pub fn settings(&mut self) -> Configuration {
        SettingsStore::new(&mut self.port).load()
    }

    /// Hold B and T together, then release both
    pub fn press_boot_hotkey(&mut self) -> &mut Self {
        self.keyboard.raw(&[
            scancode::B,
            scancode::T,
            scancode::B | scancode::BREAK_BIT,
            scancode::T | scancode::BREAK_BIT,
        ]);
        self
    }

    pub fn run(&mut self) -> Exit {
        self.run_with(config())
    }

    pub fn run_with(&mut self, config: FirmwareConfig) -> Exit {
        Firmware::new(
            &mut self.port,
            &mut self.memory,
            &mut self.display,
            &mut self.keyboard,
            &mut self.speaker,
            NoUsbStorage,
            config,
        )
        .run()
    }
}

/// No splash delay
pub fn config() -> FirmwareConfig {
    FirmwareConfig::new().with_splash_ticks(0)
}

/// A splash short enough for tests that still watches for the hotkey
pub fn hotkey_config() -> FirmwareConfig {
    FirmwareConfig::new()
        .with_splash_ticks(1)
        .with_splash_polls_per_tick(4)
}

pub fn boot_sector() -> [u8; 512] {
    let mut raw = [0u8; 512];
    raw[0] = 0xEB;
    raw[1] = 0xFE;
    raw[510] = 0x55;
    raw[511] = 0xAA;
    raw
}
