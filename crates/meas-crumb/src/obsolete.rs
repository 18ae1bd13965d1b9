//! `checkObsolete` (spec.md §4.2, §4.3's StreetCut offer protocol).

use crate::crumb::{Crumb, MinAngleCrumb, MinDistanceCrumb, MinTurnsCrumb};

/// The result of comparing two crumbs on the same street: which one (if
/// either) the other dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obsoletion {
    /// `self` dominates `other`; `other` should be discarded.
    SelfWins,
    /// `other` dominates `self`.
    OtherWins,
    /// Neither dominates; both survive.
    Neither,
}

impl Crumb {
    /// Compare `self` (typically the crumb already live in a street's cache)
    /// against `other` (typically a newly offered crumb).
    ///
    /// `allow_primary_ties` disables the secondary tie-break: with it set,
    /// crumbs tied on the primary metric never dominate one another (used
    /// by the geodesic finder, spec.md §4.4, to retain every minimum-cost
    /// route rather than collapsing to one).
    pub fn check_obsolete(&self, other: &Crumb, allow_primary_ties: bool) -> Obsoletion {
        match (self, other) {
            (Crumb::MinTurns(a), Crumb::MinTurns(b)) => check_min_turns(a, b, allow_primary_ties),
            (Crumb::MinDistance(a), Crumb::MinDistance(b)) => {
                check_min_distance(a, b, allow_primary_ties)
            }
            (Crumb::MinAngle(a), Crumb::MinAngle(b)) => check_min_angle(a, b, allow_primary_ties),
            _ => unreachable!("checkObsolete invoked across mismatched crumb metrics"),
        }
    }
}

fn check_min_turns(existing: &MinTurnsCrumb, new: &MinTurnsCrumb, allow_primary_ties: bool) -> Obsoletion {
    let d = existing.waypoint.point.distance(new.waypoint.point);

    let existing_kills_new = existing.turns < new.turns
        || (existing.turns == new.turns
            && !allow_primary_ties
            && existing.dist + d <= new.dist);
    let new_kills_existing = new.turns < existing.turns
        || (new.turns == existing.turns
            && !allow_primary_ties
            && new.dist + d <= existing.dist);

    // On an exact tie both conditions can hold at once; spec.md §4.2 says
    // the *new* crumb is the one killed, so `existing` wins ties.
    match (existing_kills_new, new_kills_existing) {
        (true, _) => Obsoletion::SelfWins,
        (false, true) => Obsoletion::OtherWins,
        (false, false) => Obsoletion::Neither,
    }
}

fn check_min_distance(
    existing: &MinDistanceCrumb,
    new: &MinDistanceCrumb,
    allow_primary_ties: bool,
) -> Obsoletion {
    let d = existing.waypoint.point.distance(new.waypoint.point);
    let kills = |a_dist: f64, b_dist: f64| {
        if allow_primary_ties {
            a_dist + d < b_dist
        } else {
            a_dist + d <= b_dist
        }
    };

    let existing_kills_new = kills(existing.dist, new.dist);
    let new_kills_existing = kills(new.dist, existing.dist);

    match (existing_kills_new, new_kills_existing) {
        (true, _) => Obsoletion::SelfWins,
        (false, true) => Obsoletion::OtherWins,
        (false, false) => Obsoletion::Neither,
    }
}

fn check_min_angle(existing: &MinAngleCrumb, new: &MinAngleCrumb, allow_primary_ties: bool) -> Obsoletion {
    match (existing.inbound, new.inbound) {
        (None, Some(_)) => return Obsoletion::SelfWins,
        (Some(_), None) => return Obsoletion::OtherWins,
        _ => {}
    }

    let d = existing.waypoint.point.distance(new.waypoint.point);

    // The reorientation cost of using `existing`'s trajectory to stand in
    // for `new` (and vice versa), per spec.md §4.2: "delta = angle(u, v)".
    let (existing_cost, new_cost) = match (existing.inbound, new.inbound) {
        (Some(u), Some(v)) => (existing.angle + u.angle_between(v), new.angle + v.angle_between(u)),
        _ => (existing.angle, new.angle),
    };

    let existing_kills_new = existing_cost < new.angle
        || (!allow_primary_ties && existing_cost == new.angle && existing.dist + d <= new.dist);
    let new_kills_existing = new_cost < existing.angle
        || (!allow_primary_ties && new_cost == existing.angle && new.dist + d <= existing.dist);

    match (existing_kills_new, new_kills_existing) {
        (true, _) => Obsoletion::SelfWins,
        (false, true) => Obsoletion::OtherWins,
        (false, false) => Obsoletion::Neither,
    }
}
