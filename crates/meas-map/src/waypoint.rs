//! [`Waypoint`]: a (point, street) pair (spec.md §3).
//!
//! A bare `Point` cannot tell the pathfinder which street an agent considers
//! itself to be on at an intersection, where two streets' footprints
//! overlap; `Waypoint` disambiguates that.

use meas_core::{Point, StreetId};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub point: Point,
    pub street: StreetId,
}

impl Waypoint {
    #[inline]
    pub fn new(point: Point, street: StreetId) -> Self {
        Self { point, street }
    }
}
