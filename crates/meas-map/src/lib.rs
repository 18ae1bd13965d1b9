//! `meas-map` — the street/intersection/segment map model (spec.md §3,
//! §4.1).
//!
//! Built once, via [`MapBuilder`], from a flat list of streets; the
//! resulting [`Map`] is immutable and safe to share by reference across
//! threads (spec.md §5).

pub mod builder;
pub mod error;
pub mod ids;
pub mod intersection;
pub mod map;
pub mod segment;
pub mod street;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use builder::{MapBuilder, StreetInput};
pub use error::{MapError, MapResult};
pub use ids::IntersectionPairId;
pub use intersection::{Intersection, IntersectionPair, Side};
pub use map::Map;
pub use segment::{Segment, SegmentationPoint};
pub use street::Street;
pub use waypoint::Waypoint;
