//! `meas-crumb` — the three pathfinder cost functors (spec.md §4.2), as a
//! tagged sum type rather than an inheritance hierarchy with downcasts
//! (spec.md §9 Design Notes).
//!
//! This crate is deliberately unaware of [`meas_map::Map`]: the
//! metric-specific admissible lower-bound-to-go is always supplied by the
//! caller (the pathfinder, which alone knows the map's `minTurns` matrix and
//! goal geometry) rather than computed here.

pub mod crumb;
pub mod ids;
pub mod obsolete;

#[cfg(test)]
mod tests;

pub use crumb::{Crumb, Metric, MinAngleCrumb, MinDistanceCrumb, MinTurnsCrumb};
pub use ids::CrumbId;
pub use obsolete::Obsoletion;
