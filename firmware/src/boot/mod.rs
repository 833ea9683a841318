//! Boot orchestration - boot-sector validation, device priority and handoff

pub mod handoff;
pub mod orchestrator;
pub mod sector;

pub use handoff::Handoff;
pub use orchestrator::{AutoBoot, BootOrchestrator, BootStatus};
pub use sector::{BOOT_SIGNATURE, SECTOR_SIZE, SectorBuffer};
