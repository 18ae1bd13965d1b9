//! `meas-pathfind` — the optimal pathfinder: MEAS (multi-expansion A*) with
//! the StreetCut per-street cache (spec.md §4.3).
//!
//! Grounded on `dt-spatial::router`'s `BinaryHeap<Reverse<...>>` Dijkstra
//! loop, generalised from a fixed edge-weight graph search to a geometry-
//! sampling search over [`meas_map::Map`]'s streets and intersections, using
//! [`meas_crumb`]'s cost functors for the frontier nodes.

pub mod cache;
pub mod error;
pub mod search;

#[cfg(test)]
mod tests;

pub use cache::{PathfindMetrics, StreetCutCache};
pub use error::{PathfindError, PathfindResult};
pub use search::{candidate_streets, find_path, seed_crumb, successor_crumb};
