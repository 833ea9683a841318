//! Utility library - bounded polling, BCD conversion, key waits

pub mod bcd;
pub mod keys;
pub mod poll;

pub use poll::{PollOutcome, poll_until};
