//! Bounded retry with an iteration budget
//!
//! Every hardware wait in the firmware is a fixed number of polls rather than a
//! wall-clock timeout. Budgets come from [`crate::config::FirmwareConfig`] so
//! tests can force the timeout paths deterministically.

use crate::error::{FirmwareError, Result};

/// Outcome of a bounded poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Condition held after this many polls
    Ready { polls: u32 },
    /// Budget exhausted without the condition holding
    TimedOut,
}

impl PollOutcome {
    pub fn is_ready(self) -> bool {
        matches!(self, PollOutcome::Ready { .. })
    }

    pub fn into_result(self) -> Result<u32> {
        match self {
            PollOutcome::Ready { polls } => Ok(polls),
            PollOutcome::TimedOut => Err(FirmwareError::Timeout),
        }
    }
}

/// Evaluate `done` at most `budget` times, stopping at the first `true`.
pub fn poll_until(budget: u32, mut done: impl FnMut() -> bool) -> PollOutcome {
    for poll in 1..=budget {
        if done() {
            return PollOutcome::Ready { polls: poll };
        }
    }
    PollOutcome::TimedOut
}
