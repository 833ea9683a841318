//! BIOS API - Hardware seams and shared types for the WexIB firmware
//!
//! This crate holds the interfaces every firmware component is written against,
//! together with the small data types that cross component boundaries.
//!
//! # Architecture
//!
//! - **port**: `RegisterPort` (8/16-bit I/O registers) and `MemoryBus` (physical memory)
//! - **display**: the presentation collaborator (`draw`, `clear`) and VGA attributes
//! - **input**: the raw key collaborator (`poll_key`) and scancode decoding
//! - **speaker**: the tone collaborator (`emit_tone`)
//! - **device**, **clock**, **power**: shared data types
//! - **status**: status register bit sets
//! - **sim**: simulated hardware for host-side tests (`sim` feature)
//!
//! # Design Principles
//!
//! - **Dependency Inversion**: components depend on these traits, never on raw instructions
//! - **Interface Segregation**: one small trait per collaborator

#![no_std]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod clock;
pub mod device;
pub mod display;
pub mod input;
pub mod port;
pub mod power;
pub mod speaker;
pub mod status;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use clock::ClockReading;
pub use device::DeviceKind;
pub use display::{Attribute, Color, Display};
pub use input::{Keyboard, KeyEvent};
pub use port::{MemoryBus, RegisterPort};
pub use power::PowerMode;
pub use speaker::Speaker;
