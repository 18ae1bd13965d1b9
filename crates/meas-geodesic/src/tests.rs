use meas_core::{LineSegment, NeverCancel, Point, StreetId};
use meas_crumb::Metric;
use meas_map::{Map, MapBuilder, StreetInput, Waypoint};

use crate::geodesic::find_geodesics;
use crate::syntax::{compute_syntax, UNBOUNDED_RADIUS};

fn street(name: &str, a: (f64, f64), b: (f64, f64), width: f64) -> StreetInput {
    StreetInput::new(name, LineSegment::new(Point::new(a.0, a.1), Point::new(b.0, b.1)), width)
}

/// Same two-street map as `meas-pathfind`'s spec.md §8 S2 scenario.
fn s2_map() -> Map {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (5.0, -5.0), (5.0, 5.0), 1.0),
    ];
    MapBuilder::build(inputs).unwrap()
}

#[test]
fn same_point_geodesic_has_zero_cost() {
    let map = s2_map();
    let wp = Waypoint::new(Point::new(1.0, 0.0), StreetId(0));

    let (geodesics, _metrics) = find_geodesics(&map, wp, wp, Metric::MinDistance).unwrap();

    assert_eq!(geodesics.len(), 1);
    assert_eq!(geodesics[0].cost, 0.0);
}

#[test]
fn geodesic_cost_is_symmetric() {
    let map = s2_map();
    let a = Waypoint::new(Point::new(1.0, 0.0), StreetId(0));
    let b = Waypoint::new(Point::new(5.0, 3.0), StreetId(1));

    let (forward, _) = find_geodesics(&map, a, b, Metric::MinDistance).unwrap();
    let (backward, _) = find_geodesics(&map, b, a, Metric::MinDistance).unwrap();

    assert!(!forward.is_empty());
    assert!(!backward.is_empty());
    assert_eq!(forward[0].cost, backward[0].cost);
}

#[test]
fn direct_same_street_geodesic_touches_no_intermediate_segment() {
    let inputs = vec![street("A", (0.0, 0.0), (100.0, 0.0), 1.0)];
    let map = MapBuilder::build(inputs).unwrap();
    let start = Waypoint::new(Point::new(1.0, 0.0), StreetId(0));
    let end = Waypoint::new(Point::new(90.0, 0.0), StreetId(0));

    let (geodesics, _) = find_geodesics(&map, start, end, Metric::MinDistance).unwrap();

    assert_eq!(geodesics.len(), 1);
    assert!((geodesics[0].cost - 89.0).abs() < 1e-9);
    // Same segment at both ends (no intersections on a single street), so
    // the route touches exactly that one segment.
    assert_eq!(geodesics[0].segments.len(), 1);
}

#[test]
fn min_turns_geodesic_crosses_exactly_once() {
    let map = s2_map();
    let a = Waypoint::new(Point::new(1.0, 0.0), StreetId(0));
    let b = Waypoint::new(Point::new(5.0, 3.0), StreetId(1));

    let (geodesics, _) = find_geodesics(&map, a, b, Metric::MinTurns).unwrap();

    assert!(!geodesics.is_empty());
    for g in &geodesics {
        let turns = g.positions.windows(2).filter(|w| w[0].0.street != w[1].0.street).count();
        assert_eq!(turns, 1);
    }
}

#[test]
fn syntax_computer_runs_over_a_small_map() {
    let map = s2_map();

    let result = compute_syntax(&map, Metric::MinDistance, UNBOUNDED_RADIUS, &NeverCancel);

    assert_eq!(result.closeness.len(), map.segment_count());
    assert_eq!(result.betweenness.len(), map.segment_count());
    assert!(!result.cancelled);
    // Every segment has at least one other segment on the map within an
    // unbounded radius, so every closeness entry is finite and positive.
    for &c in &result.closeness {
        assert!(c.is_finite() && c > 0.0);
    }
}

#[test]
fn narrower_radius_never_increases_summed_closeness_cost() {
    let map = s2_map();

    let wide = compute_syntax(&map, Metric::MinDistance, UNBOUNDED_RADIUS, &NeverCancel);
    // Radius 0 keeps only same-street pairs (A and B are one turn apart),
    // so every segment's summed geodesic cost can only shrink, and its
    // closeness (the reciprocal) can only grow.
    let narrow = compute_syntax(&map, Metric::MinDistance, 0, &NeverCancel);

    for i in 0..map.segment_count() {
        assert!(narrow.closeness[i] >= wide.closeness[i]);
    }
}
