//! Mobility-layer errors (spec.md §7): chooser construction invariants,
//! ergodicity failure, pathfinder failures surfacing through agent
//! construction/advance, and cooperative cancellation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("destination chooser centrality weight α must be >= 0, got {0}")]
    NegativeAlpha(f64),

    #[error("destination chooser distance-decay δ must be >= 0, got {0}")]
    NegativeDelta(f64),

    #[error(transparent)]
    NotErgodic(#[from] meas_core::rng::markov::NotErgodic),

    #[error(transparent)]
    Pathfind(#[from] meas_pathfind::PathfindError),

    #[error("agent initialisation was cancelled")]
    Cancelled,
}

pub type MobilityResult<T> = Result<T, MobilityError>;
