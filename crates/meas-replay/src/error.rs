//! Replay-layer errors: just the mobility errors that can surface while
//! replaying an agent forward past a point it hasn't reached yet.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Mobility(#[from] meas_mobility::MobilityError),
}

pub type ReplayResult<T> = Result<T, ReplayError>;
