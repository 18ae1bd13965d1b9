//! The MEAS + StreetCut search loop itself (spec.md §4.3).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use meas_core::{Parallelogram, Point, Prng, StreetId};
use meas_crumb::{Crumb, CrumbId, Metric};
use meas_map::{IntersectionPairId, Map, Waypoint};

use crate::cache::{PathfindMetrics, StreetCutCache};
use crate::error::{PathfindError, PathfindResult};

/// Every street on which `wp` could be considered to sit: its own street,
/// plus any street whose intersection footprint with `wp.street` contains
/// `wp.point` (spec.md §4.3 step 1).
///
/// Shared with `meas-geodesic`, which seeds and terminates its search with
/// the same rule.
pub fn candidate_streets(map: &Map, wp: Waypoint) -> Vec<StreetId> {
    let mut streets = vec![wp.street];
    for intersection in map.intersections_on(wp.street) {
        if intersection.geometry().contains(wp.point) {
            let crossing = intersection.crossing();
            if !streets.contains(&crossing) {
                streets.push(crossing);
            }
        }
    }
    streets
}

/// Shared with `meas-geodesic`.
pub fn seed_crumb(metric: Metric, map: &Map, start: Waypoint, end: Waypoint, street: StreetId, end_streets: &[StreetId]) -> Crumb {
    let wp = Waypoint::new(start.point, street);
    match metric {
        Metric::MinTurns => {
            let turns_estimate = end_streets.iter().map(|&e| map.min_turns(street, e)).min().unwrap_or(0);
            Crumb::start_min_turns(wp, turns_estimate, start.point.distance(end.point))
        }
        Metric::MinDistance => Crumb::start_min_distance(wp, start.point.distance(end.point)),
        Metric::MinAngle => Crumb::start_min_angle(wp),
    }
}

/// Shared with `meas-geodesic`.
pub fn successor_crumb(
    metric: Metric,
    map: &Map,
    arena: &[Crumb],
    predecessor_id: CrumbId,
    new_wp: Waypoint,
    end_streets: &[StreetId],
    end: Waypoint,
) -> Crumb {
    match (&arena[predecessor_id.index()], metric) {
        (Crumb::MinTurns(pred), Metric::MinTurns) => {
            let changed_street = pred.waypoint.street != new_wp.street;
            let turns_estimate = end_streets.iter().map(|&e| map.min_turns(new_wp.street, e)).min().unwrap_or(0);
            let dist_estimate = new_wp.point.distance(end.point);
            Crumb::successor_min_turns(predecessor_id, pred, new_wp, changed_street, turns_estimate, dist_estimate)
        }
        (Crumb::MinDistance(pred), Metric::MinDistance) => {
            let dist_estimate = new_wp.point.distance(end.point);
            Crumb::successor_min_distance(predecessor_id, pred, new_wp, dist_estimate)
        }
        (Crumb::MinAngle(pred), Metric::MinAngle) => Crumb::successor_min_angle(predecessor_id, pred, new_wp),
        _ => unreachable!("predecessor crumb's metric doesn't match the search's metric"),
    }
}

/// A uniformly-sampled point inside `para`, via affine coordinates from its
/// first corner (spec.md §4.3 step 3: "four randomly chosen points").
fn sample_in_parallelogram(prng: &mut dyn Prng, para: &Parallelogram) -> Point {
    let origin = para.corners[0];
    let u = origin.vector_to(para.corners[1]);
    let v = origin.vector_to(para.corners[3]);
    let s = prng.uniform(0.0, 1.0);
    let t = prng.uniform(0.0, 1.0);
    origin + u * s + v * t
}

/// Ordering wrapper for the priority queue: smaller `(primary, secondary)`
/// pops first (spec.md §4.3 step 2 "ordered by primary lower bound with
/// secondary tie-break").
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    id: CrumbId,
    primary: f64,
    secondary: f64,
}

impl HeapEntry {
    fn new(crumb: &Crumb, id: CrumbId) -> Self {
        Self { id, primary: crumb.primary_lower_bound(), secondary: crumb.secondary_key() }
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.primary.to_bits() == other.primary.to_bits() && self.secondary.to_bits() == other.secondary.to_bits()
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap; reverse the comparison so the smallest
        // lower bound pops first.
        other.primary.total_cmp(&self.primary).then_with(|| other.secondary.total_cmp(&self.secondary))
    }
}

fn reconstruct(arena: &[Crumb], mut id: CrumbId) -> Vec<Waypoint> {
    let mut path = Vec::new();
    loop {
        path.push(arena[id.index()].waypoint());
        let predecessor = arena[id.index()].predecessor();
        if !predecessor.is_valid() {
            break;
        }
        id = predecessor;
    }
    path.reverse();
    path
}

fn validate(map: &Map, wp: Waypoint) -> PathfindResult<()> {
    if wp.street.index() >= map.street_count() {
        return Err(PathfindError::UnknownStreet(wp.street));
    }
    Ok(())
}

/// Find the optimal path from `start` to `end` under `metric` (spec.md
/// §4.3). `disable_street_cut` reproduces the `-disableStreetCut`
/// diagnostic switch (spec.md §6).
pub fn find_path(
    map: &Map,
    start: Waypoint,
    end: Waypoint,
    metric: Metric,
    disable_street_cut: bool,
    prng: &mut dyn Prng,
) -> PathfindResult<(Vec<Waypoint>, PathfindMetrics)> {
    validate(map, start)?;
    validate(map, end)?;

    let start_streets = candidate_streets(map, start);
    let end_streets = candidate_streets(map, end);

    let mut arena: Vec<Crumb> = Vec::new();
    let mut expanded: Vec<bool> = Vec::new();
    let mut cache = StreetCutCache::new(disable_street_cut);
    let mut metrics = PathfindMetrics::default();
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();
    let mut sampled_points: HashMap<IntersectionPairId, [Point; 4]> = HashMap::new();

    // For path searches ties never coexist on a street: the newer crumb
    // loses (spec.md §4.3 "Primary-tie policy").
    let allow_primary_ties = false;

    for &street in &start_streets {
        let crumb = seed_crumb(metric, map, start, end, street, &end_streets);
        let id = CrumbId(arena.len() as u32);
        arena.push(crumb);
        expanded.push(false);
        cache.insert_seed(street, id);
        heap.push(HeapEntry::new(&arena[id.index()], id));
    }

    loop {
        let Some(HeapEntry { id, .. }) = heap.pop() else {
            unreachable!(
                "MEAS frontier emptied before reaching the end waypoint; the map is pre-validated \
                 connected, so this is an invariant violation, not a recoverable failure"
            );
        };
        if arena[id.index()].is_obsolete() {
            continue;
        }
        expanded[id.index()] = true;

        let current_wp = arena[id.index()].waypoint();
        if current_wp.point == end.point {
            return Ok((reconstruct(&arena, id), metrics));
        }

        if end_streets.contains(&current_wp.street) {
            // "Enqueue ... directly": unlike the intersection candidates
            // below, this successor is not offered to the street cache. It
            // shares its predecessor's street, so it would always tie (and
            // by the tie-breaking rule, lose) against the very crumb that
            // produced it — offering it would make the end point
            // unreachable via this branch every time.
            let new_wp = Waypoint::new(end.point, current_wp.street);
            let succ = successor_crumb(metric, map, &arena, id, new_wp, &end_streets, end);
            let succ_id = CrumbId(arena.len() as u32);
            arena.push(succ);
            expanded.push(false);
            heap.push(HeapEntry::new(&arena[succ_id.index()], succ_id));
            continue;
        }

        let predecessor_street = {
            let pred = arena[id.index()].predecessor();
            if pred.is_valid() { Some(arena[pred.index()].street()) } else { None }
        };

        let intersections: Vec<_> = map.intersections_on(current_wp.street).collect();
        for intersection in intersections {
            if Some(intersection.crossing()) == predecessor_street {
                // Excluded by default: the intersection leading straight
                // back to the immediate predecessor's street.
                continue;
            }
            let mirror = intersection.mirror();
            let points = *sampled_points
                .entry(intersection.pair_id())
                .or_insert_with(|| {
                    [
                        sample_in_parallelogram(prng, &intersection.geometry()),
                        sample_in_parallelogram(prng, &intersection.geometry()),
                        sample_in_parallelogram(prng, &intersection.geometry()),
                        sample_in_parallelogram(prng, &intersection.geometry()),
                    ]
                });

            for p in points {
                let new_wp = Waypoint::new(p, mirror.owner());
                let succ = successor_crumb(metric, map, &arena, id, new_wp, &end_streets, end);
                push_candidate(&mut arena, &mut expanded, &mut cache, &mut heap, &mut metrics, succ, allow_primary_ties);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push_candidate(
    arena: &mut Vec<Crumb>,
    expanded: &mut Vec<bool>,
    cache: &mut StreetCutCache,
    heap: &mut BinaryHeap<HeapEntry>,
    metrics: &mut PathfindMetrics,
    crumb: Crumb,
    allow_primary_ties: bool,
) {
    let id = CrumbId(arena.len() as u32);
    arena.push(crumb);
    expanded.push(false);
    if cache.offer(arena, expanded, id, allow_primary_ties, metrics) {
        heap.push(HeapEntry::new(&arena[id.index()], id));
    }
}
