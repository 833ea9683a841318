//! Device drivers - CMOS, ATA PIO, PS/2, PIT speaker, VGA text, UART, USB storage
//!
//! Each driver is written against the `bios-api` seams and owns the seam it
//! was given, so on real hardware every driver holds its own zero-sized port
//! handle and on the host every driver can be fed simulated hardware.

pub mod ata;
pub mod cmos;
pub mod ps2;
pub mod speaker;
pub mod uart;
pub mod usb;
pub mod vga;

pub use ata::AtaPio;
pub use cmos::Cmos;
pub use ps2::Ps2Keyboard;
pub use speaker::PitSpeaker;
pub use uart::Uart;
pub use usb::{NoUsbStorage, UsbStorage};
pub use vga::VgaText;
