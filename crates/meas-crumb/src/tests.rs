use meas_core::{Point, StreetId, Vector};
use meas_map::Waypoint;

use crate::crumb::Crumb;
use crate::obsolete::Obsoletion;

fn wp(x: f64, y: f64, street: u32) -> Waypoint {
    Waypoint::new(Point::new(x, y), StreetId(street))
}

#[test]
fn min_turns_fewer_turns_dominates() {
    let base = Crumb::start_min_turns(wp(0.0, 0.0, 0), 0, 0.0);
    let existing = {
        let mut c = match &base { Crumb::MinTurns(c) => c.clone(), _ => unreachable!() };
        c.turns = 2;
        Crumb::MinTurns(c)
    };
    let new = {
        let mut c = match &base { Crumb::MinTurns(c) => c.clone(), _ => unreachable!() };
        c.turns = 1;
        Crumb::MinTurns(c)
    };
    assert_eq!(existing.check_obsolete(&new, false), Obsoletion::OtherWins);
}

#[test]
fn min_turns_exact_tie_kills_the_new_crumb() {
    let existing = Crumb::start_min_turns(wp(0.0, 0.0, 0), 0, 0.0);
    let new = Crumb::start_min_turns(wp(0.0, 0.0, 0), 0, 0.0);
    // Same turns (0), same location (dist(A,B) == 0), same accumulated
    // distance (0.0): an exact tie. spec.md §4.2: the new crumb loses.
    assert_eq!(existing.check_obsolete(&new, false), Obsoletion::SelfWins);
}

#[test]
fn min_turns_allow_primary_ties_lets_both_survive() {
    let existing = Crumb::start_min_turns(wp(0.0, 0.0, 0), 0, 0.0);
    let new = Crumb::start_min_turns(wp(0.0, 0.0, 0), 0, 0.0);
    assert_eq!(existing.check_obsolete(&new, true), Obsoletion::Neither);
}

#[test]
fn min_distance_closer_crumb_dominates() {
    let far = Crumb::start_min_distance(wp(0.0, 0.0, 0), 100.0);
    let near = {
        let mut c = match &far { Crumb::MinDistance(c) => c.clone(), _ => unreachable!() };
        c.dist = 0.0;
        Crumb::MinDistance(c)
    };
    let far_but_worse = {
        let mut c = match &far { Crumb::MinDistance(c) => c.clone(), _ => unreachable!() };
        c.dist = 50.0;
        Crumb::MinDistance(c)
    };
    assert_eq!(near.check_obsolete(&far_but_worse, false), Obsoletion::SelfWins);
}

/// S4: two crumbs at the same point facing different directions dominate
/// neither; a third facing the same way with worse accumulated angle is
/// obsoleted by the first.
#[test]
fn min_angle_s4_scenario() {
    let origin = Crumb::start_min_angle(wp(0.0, 0.0, 0));
    let a = Crumb::successor_min_angle(
        crate::ids::CrumbId(0),
        match &origin { Crumb::MinAngle(c) => c, _ => unreachable!() },
        wp(1.0, 0.0, 0),
    );
    let b = Crumb::successor_min_angle(
        crate::ids::CrumbId(0),
        match &origin { Crumb::MinAngle(c) => c, _ => unreachable!() },
        wp(0.0, 1.0, 0),
    );
    assert_eq!(a.check_obsolete(&b, false), Obsoletion::Neither);

    // Third crumb: inbound (1,0) like `a`, but worse accumulated angle.
    let mut c_inner = match &a { Crumb::MinAngle(c) => c.clone(), _ => unreachable!() };
    c_inner.angle = 0.3;
    let c = Crumb::MinAngle(c_inner);

    assert_eq!(a.check_obsolete(&c, false), Obsoletion::SelfWins);
}

#[test]
fn min_angle_undefined_inbound_dominates_any_defined_one() {
    let root = Crumb::start_min_angle(wp(0.0, 0.0, 0));
    let moved = Crumb::successor_min_angle(
        crate::ids::CrumbId(0),
        match &root { Crumb::MinAngle(c) => c, _ => unreachable!() },
        wp(1.0, 0.0, 0),
    );
    assert_eq!(root.check_obsolete(&moved, false), Obsoletion::SelfWins);
}

#[test]
fn accumulated_never_exceeds_lower_bound() {
    let crumbs = vec![
        Crumb::start_min_turns(wp(0.0, 0.0, 0), 3, 12.0),
        Crumb::start_min_distance(wp(0.0, 0.0, 0), 5.0),
        Crumb::start_min_angle(wp(0.0, 0.0, 0)),
    ];
    for c in crumbs {
        let (accumulated, lower_bound) = c.accumulated_and_lower_bound();
        assert!(accumulated <= lower_bound);
    }
}

#[test]
fn priority_orders_by_primary_then_secondary() {
    let cheap = Crumb::start_min_distance(wp(0.0, 0.0, 0), 1.0);
    let expensive = Crumb::start_min_distance(wp(0.0, 0.0, 0), 5.0);
    assert_eq!(cheap.cmp_priority(&expensive), std::cmp::Ordering::Less);
}

#[test]
fn min_angle_vector_helper_is_sane() {
    // Sanity-check the geometry underlying the reorientation cost: moving
    // straight ahead costs 0 extra angle.
    let u = Vector::new(1.0, 0.0);
    assert_eq!(u.angle_between(u), 0.0);
}
