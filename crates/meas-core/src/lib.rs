//! `meas-core` — geometry primitives, bounds, RNG, and shared ids/errors for
//! the `meas-*` street-mobility simulation workspace.
//!
//! This crate is a dependency of every other `meas-*` crate. It intentionally
//! has no `meas-*` dependencies and minimal external ones (`rand`,
//! `rand_distr`, `thiserror`, plus optional `serde`).
//!
//! | Module   | Contents                                                  |
//! |----------|------------------------------------------------------------|
//! | [`geo`]  | `Point`, `Vector`, `Line`, `LineSegment`, `Parallelogram`  |
//! | [`ids`]  | `StreetId`, `SegmentId`, `AgentId`                         |
//! | [`rng`]  | `Prng`, `StdPrng`, `SeedGenerator`, `markov::stationary_distribution` |
//! | [`error`]| `CoreError`, `CoreResult`                                  |
//! | [`progress`] | `ProgressMonitor`, `NeverCancel`, `AtomicCancelFlag`   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod progress;
pub mod rng;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use geo::{Line, LineSegment, Parallelogram, Point, Vector, MAX_COORD, MIN_COORD};
pub use ids::{AgentId, SegmentId, StreetId};
pub use progress::{AtomicCancelFlag, NeverCancel, ProgressMonitor};
pub use rng::{Prng, SeedGenerator, StdPrng};
