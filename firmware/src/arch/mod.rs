//! Architecture glue: real implementations of the register and memory seams
//! and the few instructions that leave the firmware.

pub mod x86;

pub use self::x86::{PhysMemory, PortIo, halt, jump_to_boot_sector, warm_restart};
