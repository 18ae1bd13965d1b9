//! Map-construction error type (spec.md §7 "Invariant violations").

use meas_core::StreetId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid street input: {0}")]
    InvalidInput(String),

    #[error("street {containing} strictly contains street {contained}")]
    StreetContainsStreet { containing: StreetId, contained: StreetId },

    #[error("streets {a} and {b} are parallel and their footprints overlap")]
    ParallelOverlap { a: StreetId, b: StreetId },

    #[error("geometry belonging to street {street} lies outside [{min}, {max}]^2")]
    OutOfBounds { street: StreetId, min: f64, max: f64 },

    #[error("map is not connected: street {unreachable} is unreachable from street {from}")]
    Disconnected { from: StreetId, unreachable: StreetId },
}

pub type MapResult<T> = Result<T, MapError>;
