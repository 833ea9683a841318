//! Password management actions
//!
//! Each action mutates the active configuration and persists the whole record
//! through [`SettingsStore::save`], so the checksum always covers the change.

use bios_api::RegisterPort;

use crate::error::{FirmwareError, Result};
use crate::settings::{Configuration, Password, SettingsStore};

/// Flip password protection. Returns the new state.
pub fn toggle_protection<P: RegisterPort>(
    config: &mut Configuration,
    store: &mut SettingsStore<P>,
) -> bool {
    config.security_enabled = !config.security_enabled;
    store.save(config);
    log::info!(
        "security: protection {}",
        if config.security_enabled { "enabled" } else { "disabled" }
    );
    config.security_enabled
}

/// Install a new password and turn protection on. An empty password is refused.
pub fn set_password<P: RegisterPort>(
    config: &mut Configuration,
    store: &mut SettingsStore<P>,
    password: Password,
) -> Result<()> {
    if password.is_empty() {
        return Err(FirmwareError::InvalidPassword);
    }
    config.password = password;
    config.security_enabled = true;
    store.save(config);
    log::info!("security: password set ({} chars)", config.password.len());
    Ok(())
}

/// Remove the password and turn protection off.
pub fn clear_password<P: RegisterPort>(config: &mut Configuration, store: &mut SettingsStore<P>) {
    config.password.clear();
    config.security_enabled = false;
    store.save(config);
    log::info!("security: password cleared");
}
