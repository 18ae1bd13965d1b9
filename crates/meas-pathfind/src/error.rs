//! Pathfinder error type (spec.md §7 "Input-format errors" is map-file scope;
//! the one fatal-at-call-site mistake a pathfinder itself can make is being
//! handed a waypoint referencing a street the map doesn't have).

use meas_core::StreetId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathfindError {
    #[error("waypoint references street {0}, which is not in this map")]
    UnknownStreet(StreetId),
}

pub type PathfindResult<T> = Result<T, PathfindError>;
