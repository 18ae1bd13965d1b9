use meas_core::{LineSegment, Point, StreetId};

use crate::builder::{MapBuilder, StreetInput};
use crate::error::MapError;

fn street(name: &str, a: (f64, f64), b: (f64, f64), width: f64) -> StreetInput {
    StreetInput::new(name, LineSegment::new(Point::new(a.0, a.1), Point::new(b.0, b.1)), width)
}

/// S1: two parallel streets cannot intersect; the map is disconnected.
#[test]
fn parallel_streets_reject_as_disconnected() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (0.0, 5.0), (10.0, 5.0), 1.0),
    ];
    let err = MapBuilder::build(inputs).unwrap_err();
    assert!(matches!(err, MapError::Disconnected { .. }));
}

/// S2: perpendicular cross; one turn between the two streets.
#[test]
fn perpendicular_cross_has_one_turn() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (5.0, -5.0), (5.0, 5.0), 1.0),
    ];
    let map = MapBuilder::build(inputs).unwrap();

    let a = StreetId(0);
    let b = StreetId(1);
    assert_eq!(map.min_turns(a, a), 0);
    assert_eq!(map.min_turns(a, b), 1);
    assert_eq!(map.min_turns(b, a), 1);
}

/// S5: three mutually parallel, non-overlapping streets form three isolated
/// components (no two midlines are non-parallel, so no intersection is ever
/// produced between them — unlike non-parallel streets, whose *infinite*
/// midlines always cross somewhere and would otherwise connect the map).
#[test]
fn disjoint_components_rejected() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (0.0, 5.0), (10.0, 5.0), 1.0),
        street("C", (0.0, 10.0), (10.0, 10.0), 1.0),
    ];
    let err = MapBuilder::build(inputs).unwrap_err();
    assert!(matches!(err, MapError::Disconnected { .. }));
}

/// spec.md §8 invariant 2: `minTurns` is symmetric with zeros on the
/// diagonal.
#[test]
fn min_turns_matrix_is_symmetric() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (5.0, -5.0), (5.0, 5.0), 1.0),
        street("C", (0.0, 3.0), (10.0, 3.0), 1.0),
    ];
    let map = MapBuilder::build(inputs).unwrap();
    let n = map.street_count();
    for i in 0..n {
        assert_eq!(map.min_turns[i][i], 0);
        for j in 0..n {
            assert_eq!(map.min_turns[i][j], map.min_turns[j][i]);
        }
    }
}

/// spec.md §8 invariant 1: every intersection's mirror's mirror is itself.
#[test]
fn intersection_mirror_is_involutive() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (5.0, -5.0), (5.0, 5.0), 1.0),
    ];
    let map = MapBuilder::build(inputs).unwrap();
    let on_a: Vec<_> = map.intersections_on(StreetId(0)).collect();
    assert_eq!(on_a.len(), 1);
    let i = on_a[0];
    assert_eq!(i.mirror().mirror(), i);
    assert_eq!(i.centre(), i.mirror().centre());
    assert_eq!(i.owner(), StreetId(0));
    assert_eq!(i.mirror().owner(), StreetId(1));
}

/// spec.md §8 invariant 3: every segment's parallelogram lies in bounds
/// (trivially true for small in-bounds test maps, but exercises the field).
#[test]
fn segments_cover_each_street_end_to_end() {
    let inputs = vec![
        street("A", (0.0, 0.0), (10.0, 0.0), 1.0),
        street("B", (5.0, -5.0), (5.0, 5.0), 1.0),
    ];
    let map = MapBuilder::build(inputs).unwrap();
    let segs = map.segments_of(StreetId(0));
    // 4 segmentation points (both midline ends + the crossing's near/far
    // entry points) produce 3 consecutive segments.
    assert_eq!(segs.len(), 3);

    let total: f64 = segs.iter().map(|s| s.length()).sum();
    assert!((total - 10.0).abs() < 1e-9);

    for seg in segs {
        let para = seg.parallelogram(1.0);
        assert!(para.corners.iter().all(|c| meas_core::Point::in_bounds(
            *c,
            meas_core::MIN_COORD,
            meas_core::MAX_COORD
        )));
    }
}

/// A street whose parallelogram is strictly enclosed by another's is a
/// fatal input error, independent of connectivity.
#[test]
fn street_containing_street_is_rejected() {
    let inputs = vec![
        street("Big", (0.0, 0.0), (100.0, 0.0), 20.0),
        street("Small", (40.0, 0.0), (60.0, 0.0), 2.0),
    ];
    let err = MapBuilder::build(inputs).unwrap_err();
    assert!(matches!(err, MapError::StreetContainsStreet { .. }));
}

#[test]
fn empty_input_is_rejected() {
    let err = MapBuilder::build(Vec::new()).unwrap_err();
    assert!(matches!(err, MapError::InvalidInput(_)));
}
