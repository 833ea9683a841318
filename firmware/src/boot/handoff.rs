//! Terminal boot handoff token

use bios_api::DeviceKind;

/// Proof that a validated boot sector now sits at its transfer address.
///
/// Only the orchestrator creates one, after the copy. Receiving it means
/// control has logically left the firmware: the caller's only remaining job
/// is the non-returning jump to [`Handoff::entry`].
#[must_use = "a handoff must be carried out by jumping to its entry"]
#[derive(Debug, PartialEq, Eq)]
pub struct Handoff {
    device: DeviceKind,
    entry: usize,
}

impl Handoff {
    pub(crate) fn new(device: DeviceKind, entry: usize) -> Self {
        Self { device, entry }
    }

    /// Device the sector came from
    pub fn device(&self) -> DeviceKind {
        self.device
    }

    /// Physical address execution continues at
    pub fn entry(&self) -> usize {
        self.entry
    }
}
