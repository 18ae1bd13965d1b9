//! The three cost functors of spec.md §4.2, represented as a tagged sum type
//! (spec.md §9 Design Notes: "rather than an inheritance tree with
//! downcasts").
//!
//! Each variant only stores what its own metric needs; the admissible
//! lower-bound-to-go for a successor is computed by the caller (the
//! pathfinder, which owns the [`meas_map::Map`] and its `minTurns` matrix)
//! and handed in — this crate knows nothing about maps, only about crumbs.

use meas_core::{StreetId, Vector};
use meas_map::Waypoint;

use crate::ids::CrumbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MinTurns,
    MinDistance,
    MinAngle,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinTurnsCrumb {
    pub waypoint: Waypoint,
    pub predecessor: CrumbId,
    pub obsolete: bool,
    pub turns: u32,
    pub lower_bound_turns: u32,
    pub dist: f64,
    pub lower_bound_dist: f64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinDistanceCrumb {
    pub waypoint: Waypoint,
    pub predecessor: CrumbId,
    pub obsolete: bool,
    pub dist: f64,
    pub lower_bound: f64,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinAngleCrumb {
    pub waypoint: Waypoint,
    pub predecessor: CrumbId,
    pub obsolete: bool,
    pub angle: f64,
    /// The vector of the most recent physical motion. `None` at the root
    /// crumb, which hasn't moved yet (spec.md §4.2 MinAngle: "a crumb whose
    /// `inbound` vector is undefined... dominates any crumb with an inbound
    /// vector").
    pub inbound: Option<Vector>,
    pub dist: f64,
}

/// A node in the pathfinder's A* frontier (spec.md §3 "Crumb").
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crumb {
    MinTurns(MinTurnsCrumb),
    MinDistance(MinDistanceCrumb),
    MinAngle(MinAngleCrumb),
}

impl Crumb {
    pub fn start_min_turns(waypoint: Waypoint, lower_bound_turns: u32, lower_bound_dist: f64) -> Self {
        Crumb::MinTurns(MinTurnsCrumb {
            waypoint,
            predecessor: CrumbId::INVALID,
            obsolete: false,
            turns: 0,
            lower_bound_turns,
            dist: 0.0,
            lower_bound_dist,
        })
    }

    pub fn successor_min_turns(
        predecessor_id: CrumbId,
        predecessor: &MinTurnsCrumb,
        waypoint: Waypoint,
        changed_street: bool,
        remaining_turns_estimate: u32,
        remaining_dist_estimate: f64,
    ) -> Self {
        let step = predecessor.waypoint.point.distance(waypoint.point);
        let turns = predecessor.turns + u32::from(changed_street);
        let dist = predecessor.dist + step;
        Crumb::MinTurns(MinTurnsCrumb {
            waypoint,
            predecessor: predecessor_id,
            obsolete: false,
            turns,
            lower_bound_turns: turns + remaining_turns_estimate,
            dist,
            lower_bound_dist: dist + remaining_dist_estimate,
        })
    }

    pub fn start_min_distance(waypoint: Waypoint, remaining_estimate: f64) -> Self {
        Crumb::MinDistance(MinDistanceCrumb {
            waypoint,
            predecessor: CrumbId::INVALID,
            obsolete: false,
            dist: 0.0,
            lower_bound: remaining_estimate,
        })
    }

    pub fn successor_min_distance(
        predecessor_id: CrumbId,
        predecessor: &MinDistanceCrumb,
        waypoint: Waypoint,
        remaining_estimate: f64,
    ) -> Self {
        let dist = predecessor.dist + predecessor.waypoint.point.distance(waypoint.point);
        Crumb::MinDistance(MinDistanceCrumb {
            waypoint,
            predecessor: predecessor_id,
            obsolete: false,
            dist,
            lower_bound: dist + remaining_estimate,
        })
    }

    pub fn start_min_angle(waypoint: Waypoint) -> Self {
        Crumb::MinAngle(MinAngleCrumb {
            waypoint,
            predecessor: CrumbId::INVALID,
            obsolete: false,
            angle: 0.0,
            inbound: None,
            dist: 0.0,
        })
    }

    pub fn successor_min_angle(
        predecessor_id: CrumbId,
        predecessor: &MinAngleCrumb,
        waypoint: Waypoint,
    ) -> Self {
        let inbound = predecessor.waypoint.point.vector_to(waypoint.point);
        let added_angle = match predecessor.inbound {
            Some(prev) => prev.angle_between(inbound),
            None => 0.0,
        };
        let dist = predecessor.dist + predecessor.waypoint.point.distance(waypoint.point);
        Crumb::MinAngle(MinAngleCrumb {
            waypoint,
            predecessor: predecessor_id,
            obsolete: false,
            angle: predecessor.angle + added_angle,
            inbound: Some(inbound),
            dist,
        })
    }

    #[inline]
    pub fn waypoint(&self) -> Waypoint {
        match self {
            Crumb::MinTurns(c) => c.waypoint,
            Crumb::MinDistance(c) => c.waypoint,
            Crumb::MinAngle(c) => c.waypoint,
        }
    }

    #[inline]
    pub fn street(&self) -> StreetId {
        self.waypoint().street
    }

    #[inline]
    pub fn predecessor(&self) -> CrumbId {
        match self {
            Crumb::MinTurns(c) => c.predecessor,
            Crumb::MinDistance(c) => c.predecessor,
            Crumb::MinAngle(c) => c.predecessor,
        }
    }

    #[inline]
    pub fn is_obsolete(&self) -> bool {
        match self {
            Crumb::MinTurns(c) => c.obsolete,
            Crumb::MinDistance(c) => c.obsolete,
            Crumb::MinAngle(c) => c.obsolete,
        }
    }

    #[inline]
    pub fn set_obsolete(&mut self, obsolete: bool) {
        match self {
            Crumb::MinTurns(c) => c.obsolete = obsolete,
            Crumb::MinDistance(c) => c.obsolete = obsolete,
            Crumb::MinAngle(c) => c.obsolete = obsolete,
        }
    }

    #[inline]
    pub fn metric(&self) -> Metric {
        match self {
            Crumb::MinTurns(_) => Metric::MinTurns,
            Crumb::MinDistance(_) => Metric::MinDistance,
            Crumb::MinAngle(_) => Metric::MinAngle,
        }
    }

    /// `(accumulated, lowerBound)` — spec.md §8 invariant 4:
    /// `accumulated <= lowerBound`.
    pub fn accumulated_and_lower_bound(&self) -> (f64, f64) {
        match self {
            Crumb::MinTurns(c) => (c.turns as f64, c.lower_bound_turns as f64),
            Crumb::MinDistance(c) => (c.dist, c.lower_bound),
            // No metric-specific admissible heuristic is specified for
            // MinAngle beyond the accumulated angle itself; a zero
            // look-ahead (lower bound == accumulated) is the minimal
            // admissible choice.
            Crumb::MinAngle(c) => (c.angle, c.angle),
        }
    }

    /// Primary ordering key for the pathfinder's priority queue (smaller is
    /// better): turns for MinTurns, distance for MinDistance, angle for
    /// MinAngle.
    #[inline]
    pub fn primary_lower_bound(&self) -> f64 {
        self.accumulated_and_lower_bound().1
    }

    /// Secondary tie-break key (spec.md §4.2): accumulated distance for
    /// MinTurns and MinAngle; unused (always 0) for MinDistance, which has
    /// no secondary metric.
    #[inline]
    pub fn secondary_key(&self) -> f64 {
        match self {
            Crumb::MinTurns(c) => c.lower_bound_dist,
            Crumb::MinDistance(_) => 0.0,
            Crumb::MinAngle(c) => c.dist,
        }
    }

    /// Total order over `(primary, secondary)`, used to rank the frontier.
    pub fn cmp_priority(&self, other: &Crumb) -> std::cmp::Ordering {
        self.primary_lower_bound()
            .total_cmp(&other.primary_lower_bound())
            .then_with(|| self.secondary_key().total_cmp(&other.secondary_key()))
    }
}
