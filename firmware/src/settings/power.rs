//! Power mode persistence in the CMOS scratch byte

use bios_api::{PowerMode, RegisterPort};

use super::layout;
use super::store::SettingsStore;

impl<P: RegisterPort> SettingsStore<P> {
    /// Stored power mode; out-of-range values read as `Balanced`.
    pub fn load_power_mode(&mut self) -> PowerMode {
        let code = self.cmos.read(layout::POWER_MODE);
        PowerMode::from_code(code).unwrap_or_else(|| {
            log::warn!("settings: invalid power mode {:#x}, using Balanced", code);
            PowerMode::Balanced
        })
    }

    pub fn save_power_mode(&mut self, mode: PowerMode) {
        self.cmos.write(layout::POWER_MODE, mode.code());
        log::info!("settings: power mode {}", mode.name());
    }
}
