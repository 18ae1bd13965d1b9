//! `meas-replay` — records a mobility simulation and exposes continuous-time,
//! interpolated playback over it (spec.md §4.8).

pub mod error;
pub mod recorded;

#[cfg(test)]
mod tests;

pub use error::{ReplayError, ReplayResult};
pub use recorded::RecordedSimulation;
