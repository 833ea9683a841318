//! Persistent settings - the checksum-protected CMOS configuration record
//!
//! Corruption is never reported as an error: a record whose checksum does not
//! verify is replaced, in memory only, by the defaults. Writing the checksum
//! last makes a torn save look exactly like corruption to the next load.

pub mod layout;
pub mod power;
pub mod record;
pub mod store;

pub use record::{Configuration, Password};
pub use store::SettingsStore;
