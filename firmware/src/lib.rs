//! WexIB Firmware - Legacy BIOS core
//!
//! Initializes the machine, validates hardware, enforces the optional password
//! gate and hands control to a boot sector loaded from the configured device.
//!
//! # Architecture
//!
//! - **diagnostics**: power-on self-test sequencer and the hardware test survey
//! - **settings**: checksum-protected CMOS configuration record and power mode
//! - **security**: password gate with lockout, password editing
//! - **boot**: boot-sector validation, device priority and the handoff token
//! - **clock**: tear-free real-time clock reader
//! - **menu**: main menu dispatch, splash hotkey and setup screens
//! - **drivers**: CMOS, ATA PIO, PS/2, PIT speaker, VGA text, UART, USB storage
//! - **firmware**: the top-level driver that owns the explicit context
//!
//! Every hardware access goes through the `bios-api` seams, so the whole
//! library runs against simulated hardware on the host.

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod drivers;
pub mod error;
pub mod firmware;
pub mod logger;
pub mod menu;
pub mod security;
pub mod settings;
pub mod utils;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod arch;

pub use boot::{BootOrchestrator, Handoff, SectorBuffer};
pub use clock::ClockReader;
pub use config::FirmwareConfig;
pub use diagnostics::post::{PostResult, PostSequencer};
pub use error::{FirmwareError, Result};
pub use firmware::{Exit, Firmware};
pub use security::{GateState, SecurityGate};
pub use settings::{Configuration, Password, SettingsStore};

/// Firmware version string shown on the splash and information screens
pub const VERSION: &str = "1.53.2";
