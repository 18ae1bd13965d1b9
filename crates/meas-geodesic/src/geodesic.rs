//! The geodesic finder (spec.md §4.4): the same MEAS skeleton as
//! `meas-pathfind`'s optimal pathfinder, with two differences — primary-
//! metric ties are allowed, so every distinct minimum-cost route survives
//! instead of just one, and frontier positions are annotated with whether
//! they land on an intersection crossing or a segment centre.
//!
//! Grounded directly on `meas-pathfind::search::find_path`; `seed_crumb`,
//! `successor_crumb`, and `candidate_streets` are reused verbatim from there
//! rather than duplicated.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use meas_core::{SegmentId, StreetId};
use meas_crumb::{Crumb, CrumbId, Metric};
use meas_map::{Intersection, IntersectionPairId, Map, Waypoint};
use meas_pathfind::{candidate_streets, seed_crumb, successor_crumb, PathfindMetrics, StreetCutCache};

use crate::error::{GeodesicError, GeodesicResult};

/// Whether an annotated frontier position is an intersection crossing or a
/// segment centre — reconstruction needs this to know which consecutive
/// pairs of positions are eligible to share a street (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    Intersection,
    SegmentCentre,
}

/// One minimum-cost route between two segment centres.
#[derive(Debug, Clone)]
pub struct Geodesic {
    pub positions: Vec<(Waypoint, PositionKind)>,
    pub cost: f64,
    /// The start segment, the end segment, and — for each consecutive pair
    /// of positions sharing a street — every segment strictly between them.
    /// Feeds the syntax computer's betweenness pass (spec.md §4.5 step 3).
    pub segments: Vec<SegmentId>,
}

/// The two canonical points a crossing intersection offers a geodesic
/// search, in place of `meas-pathfind`'s four randomly sampled points.
/// Geodesics feed aggregate closeness/betweenness statistics and must be
/// reproducible without threading a PRNG through the syntax computer's
/// all-pairs loop; `near()`/`far()` are the two points already used to
/// delimit the crossing street's own segmentation (spec.md §9 Open
/// Questions — documented as a design decision in DESIGN.md).
fn canonical_points(intersection: Intersection<'_>) -> [meas_core::Point; 2] {
    [intersection.near(), intersection.far()]
}

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
        other.primary.total_cmp(&self.primary).then_with(|| other.secondary.total_cmp(&self.secondary))
    }
}

fn validate(map: &Map, wp: Waypoint) -> GeodesicResult<()> {
    if wp.street.index() >= map.street_count() {
        return Err(GeodesicError::UnknownStreet(wp.street));
    }
    Ok(())
}

fn reconstruct(arena: &[Crumb], kinds: &[PositionKind], mut id: CrumbId) -> Vec<(Waypoint, PositionKind)> {
    let mut path = Vec::new();
    loop {
        path.push((arena[id.index()].waypoint(), kinds[id.index()]));
        let predecessor = arena[id.index()].predecessor();
        if !predecessor.is_valid() {
            break;
        }
        id = predecessor;
    }
    path.reverse();
    path
}

/// Every segment strictly between `a` and `b` along their common `street`,
/// by progression order (spec.md §4.4).
fn segments_strictly_between(map: &Map, street: StreetId, a: meas_core::Point, b: meas_core::Point) -> Vec<SegmentId> {
    let ia = map.segment_containing(street, a).index();
    let ib = map.segment_containing(street, b).index();
    let (lo, hi) = if ia <= ib { (ia, ib) } else { (ib, ia) };
    ((lo + 1)..hi).map(|i| SegmentId(i as u32)).collect()
}

/// The segment set a reconstructed route is considered to pass through
/// (spec.md §4.4: used by the syntax computer's betweenness pass).
fn route_segments(map: &Map, positions: &[(Waypoint, PositionKind)]) -> Vec<SegmentId> {
    let mut segments = Vec::new();
    if let Some((wp, _)) = positions.first() {
        segments.push(map.segment_containing(wp.street, wp.point));
    }
    if let Some((wp, _)) = positions.last() {
        segments.push(map.segment_containing(wp.street, wp.point));
    }
    for pair in positions.windows(2) {
        let (wp_a, _) = pair[0];
        let (wp_b, _) = pair[1];
        if wp_a.street == wp_b.street {
            segments.extend(segments_strictly_between(map, wp_a.street, wp_a.point, wp_b.point));
        }
    }
    segments.sort();
    segments.dedup();
    segments
}

/// Find every tied minimum-cost route from `start` to `end` under `metric`
/// (spec.md §4.4). `a == b` (same point) costs 0 and returns a single
/// trivial route (spec.md §8 invariant 6).
pub fn find_geodesics(map: &Map, start: Waypoint, end: Waypoint, metric: Metric) -> GeodesicResult<(Vec<Geodesic>, PathfindMetrics)> {
    validate(map, start)?;
    validate(map, end)?;

    let start_streets = candidate_streets(map, start);
    let end_streets = candidate_streets(map, end);

    let mut arena: Vec<Crumb> = Vec::new();
    let mut expanded: Vec<bool> = Vec::new();
    let mut kinds: Vec<PositionKind> = Vec::new();
    let mut cache = StreetCutCache::new(false);
    let mut metrics = PathfindMetrics::default();
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();
    let mut canonical: HashMap<IntersectionPairId, [meas_core::Point; 2]> = HashMap::new();

    // Geodesic searches allow primary-metric ties so multiple distinct
    // minimum-cost routes all survive in the cache (spec.md §4.3
    // "Primary-tie policy", §4.4).
    let allow_primary_ties = true;

    for &street in &start_streets {
        let crumb = seed_crumb(metric, map, start, end, street, &end_streets);
        let id = CrumbId(arena.len() as u32);
        arena.push(crumb);
        expanded.push(false);
        kinds.push(PositionKind::SegmentCentre);
        cache.insert_seed(street, id);
        heap.push(HeapEntry::new(&arena[id.index()], id));
    }

    let mut completed: Vec<CrumbId> = Vec::new();
    let mut best_cost: Option<f64> = None;

    loop {
        if let Some(best) = best_cost {
            match heap.peek() {
                Some(top) if top.primary > best => break,
                None => break,
                _ => {}
            }
        }
        let Some(HeapEntry { id, .. }) = heap.pop() else {
            if completed.is_empty() {
                unreachable!(
                    "geodesic frontier emptied before completing any route; the map is pre-validated \
                     connected, so this is an invariant violation, not a recoverable failure"
                );
            }
            break;
        };
        if arena[id.index()].is_obsolete() {
            continue;
        }
        expanded[id.index()] = true;

        let current_wp = arena[id.index()].waypoint();
        if current_wp.point == end.point {
            let (accumulated, _) = arena[id.index()].accumulated_and_lower_bound();
            best_cost.get_or_insert(accumulated);
            completed.push(id);
            continue;
        }

        if end_streets.contains(&current_wp.street) {
            // Bypasses the offer protocol for the same reason
            // `meas-pathfind::find_path` does: this successor shares its
            // predecessor's street, so it would always tie (and, even with
            // ties allowed, a same-street tie still only obsoletes on
            // strict domination of the *other* metric component) against
            // the crumb that produced it.
            let new_wp = Waypoint::new(end.point, current_wp.street);
            let succ = successor_crumb(metric, map, &arena, id, new_wp, &end_streets, end);
            let succ_id = CrumbId(arena.len() as u32);
            arena.push(succ);
            expanded.push(false);
            kinds.push(PositionKind::SegmentCentre);
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
                continue;
            }
            let mirror = intersection.mirror();
            let points = *canonical.entry(intersection.pair_id()).or_insert_with(|| canonical_points(intersection));

            for p in points {
                let new_wp = Waypoint::new(p, mirror.owner());
                let succ = successor_crumb(metric, map, &arena, id, new_wp, &end_streets, end);
                let succ_id = CrumbId(arena.len() as u32);
                arena.push(succ);
                expanded.push(false);
                kinds.push(PositionKind::Intersection);
                if cache.offer(&mut arena, &expanded, succ_id, allow_primary_ties, &mut metrics) {
                    heap.push(HeapEntry::new(&arena[succ_id.index()], succ_id));
                }
            }
        }
    }

    // Every crumb in `completed` was popped in non-decreasing primary order
    // and is at the end point, where a crumb's lower bound always equals
    // its accumulated cost (no remaining distance/turns/angle to go) — so
    // the first completion fixed `best_cost` to the true minimum, and every
    // later one admitted by the peek-based termination check ties it
    // exactly.
    let best = best_cost.unwrap_or(0.0);
    let geodesics = completed
        .into_iter()
        .map(|id| {
            let positions = reconstruct(&arena, &kinds, id);
            let segments = route_segments(map, &positions);
            Geodesic { positions, cost: best, segments }
        })
        .collect();

    Ok((geodesics, metrics))
}
