//! Settings Store - load and save of the configuration record

use bios_api::RegisterPort;

use super::layout;
use super::record::{Configuration, RawRecord};
use crate::drivers::cmos::Cmos;

/// CMOS-backed store for the [`Configuration`] record.
pub struct SettingsStore<P> {
    pub(super) cmos: Cmos<P>,
}

impl<P: RegisterPort> SettingsStore<P> {
    pub fn new(port: P) -> Self {
        Self {
            cmos: Cmos::new(port),
        }
    }

    /// Load the record, or the defaults if its checksum does not verify.
    ///
    /// Never fails and never writes: a corrupt record is left in CMOS until
    /// the next [`save`](Self::save).
    pub fn load(&mut self) -> Configuration {
        let (raw, stored) = self.read_raw();
        let expected = raw.checksum();
        if stored != expected {
            log::warn!(
                "settings: checksum mismatch (stored {:#04x}, computed {:#04x}), using defaults",
                stored,
                expected
            );
            return Configuration::default();
        }
        let config = raw.decode();
        log::debug!("settings: loaded {:?}", config);
        config
    }

    /// Write every field in record order, checksum last.
    pub fn save(&mut self, config: &Configuration) {
        let raw = RawRecord::from(config);
        self.cmos.write(layout::SECURITY, raw.security);
        self.cmos.write(layout::BOOT_ORDER, raw.boot_order);
        for (reg, &byte) in (layout::PASSWORD..).zip(raw.password.iter()) {
            self.cmos.write(reg, byte);
        }
        for (reg, &code) in (layout::BOOT_DEVICE..).zip(raw.devices.iter()) {
            self.cmos.write(reg, code);
        }
        self.cmos.write(layout::HW_ERROR_COUNT, raw.hw_error_count);
        self.cmos.write(layout::CHECKSUM, raw.checksum());
        log::debug!("settings: saved");
    }

    /// Whether the record currently in CMOS verifies.
    pub fn verify(&mut self) -> bool {
        let (raw, stored) = self.read_raw();
        raw.checksum() == stored
    }

    /// Read the record in field order; the password stops at its first zero.
    fn read_raw(&mut self) -> (RawRecord, u8) {
        let mut raw = RawRecord {
            security: self.cmos.read(layout::SECURITY),
            boot_order: self.cmos.read(layout::BOOT_ORDER),
            ..RawRecord::default()
        };
        for (reg, slot) in (layout::PASSWORD..).zip(raw.password.iter_mut()) {
            *slot = self.cmos.read(reg);
            if *slot == 0 {
                break;
            }
        }
        for (reg, slot) in (layout::BOOT_DEVICE..).zip(raw.devices.iter_mut()) {
            *slot = self.cmos.read(reg);
        }
        raw.hw_error_count = self.cmos.read(layout::HW_ERROR_COUNT);
        let stored = self.cmos.read(layout::CHECKSUM);
        (raw, stored)
    }

    pub fn into_inner(self) -> P {
        self.cmos.into_inner()
    }
}
