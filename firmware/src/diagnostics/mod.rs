//! Diagnostics - power-on self-test and the on-demand hardware survey

pub mod post;
pub mod probe;

pub use post::{PostResult, PostSequencer, PostStage, SelfTest, Severity, SurveyReport};
pub use probe::{Alu, HardwareProbe, NativeAlu};
