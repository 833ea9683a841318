//! Security - the password gate and password management
//!
//! The gate is a pure state machine fed one scancode at a time; [`challenge`]
//! is the prompt that drives it against a display and keyboard.

pub mod actions;
pub mod editor;
pub mod gate;

pub use editor::{EditOutcome, LineEditor};
pub use gate::{GateEvent, GateState, MAX_ATTEMPTS, SecurityGate, challenge};
