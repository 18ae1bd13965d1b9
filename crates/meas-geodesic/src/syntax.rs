//! The space-syntax computer (spec.md §4.5): an all-pairs driver over the
//! geodesic finder producing per-segment closeness and betweenness vectors.
//!
//! Grounded on `dt-sim::sim`'s `#[cfg(feature = "parallel")]` /
//! `#[cfg(not(feature = "parallel"))]` split for its one CPU-heavy loop —
//! the same pattern, applied to the pairwise segment loop instead of a
//! per-tick agent loop.

use std::collections::HashMap;

use meas_core::{ProgressMonitor, SegmentId};
use meas_crumb::Metric;
use meas_map::{Map, Waypoint};

use crate::geodesic::find_geodesics;

/// `radius` effectively infinite (spec.md §4.5: "defaults to effectively
/// infinite; the caller may narrow it").
pub const UNBOUNDED_RADIUS: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub struct SyntaxResult {
    /// Reciprocal of each segment's summed geodesic cost to every other
    /// segment within `radius` turns. A segment with no such neighbour gets
    /// `f64::INFINITY` (IEEE division by the zero sum), the natural
    /// sentinel for "nothing within radius" rather than a meaningful
    /// closeness value.
    pub closeness: Vec<f64>,
    /// Average fraction of each pair's tied geodesics that pass through the
    /// segment, summed over every pair.
    pub betweenness: Vec<f64>,
    /// `true` if `monitor` requested cancellation before all pairs were
    /// processed; `closeness`/`betweenness` then reflect a partial sum.
    pub cancelled: bool,
}

fn segment_waypoint(map: &Map, id: SegmentId) -> Waypoint {
    let segment = map.segment(id);
    Waypoint::new(segment.centre(), segment.street)
}

struct PairContribution {
    i: usize,
    j: usize,
    shared_cost: Option<f64>,
    fraction_per_segment: Vec<(SegmentId, f64)>,
}

fn compute_pair(map: &Map, metric: Metric, radius: u32, i: usize, j: usize) -> PairContribution {
    let wp_i = segment_waypoint(map, SegmentId(i as u32));
    let wp_j = segment_waypoint(map, SegmentId(j as u32));

    let (geodesics, _metrics) =
        find_geodesics(map, wp_i, wp_j, metric).expect("segment centre waypoints are always valid streets");

    let street_i = map.segment(SegmentId(i as u32)).street;
    let street_j = map.segment(SegmentId(j as u32)).street;

    let shared_cost =
        (map.min_turns(street_i, street_j) <= radius).then(|| geodesics.first().map(|g| g.cost)).flatten();

    let count = geodesics.len().max(1) as f64;
    let mut touched: HashMap<SegmentId, u32> = HashMap::new();
    for g in &geodesics {
        for &seg in &g.segments {
            *touched.entry(seg).or_insert(0) += 1;
        }
    }
    let fraction_per_segment = touched.into_iter().map(|(seg, n)| (seg, n as f64 / count)).collect();

    PairContribution { i, j, shared_cost, fraction_per_segment }
}

fn accumulate(contributions: &[PairContribution], closeness: &mut [f64], betweenness: &mut [f64]) {
    for c in contributions {
        if let Some(cost) = c.shared_cost {
            closeness[c.i] += cost;
            closeness[c.j] += cost;
        }
        for &(seg, fraction) in &c.fraction_per_segment {
            betweenness[seg.index()] += fraction;
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_contributions(
    map: &Map,
    metric: Metric,
    radius: u32,
    pairs: &[(usize, usize)],
    monitor: &dyn ProgressMonitor,
) -> (Vec<PairContribution>, bool) {
    let mut out = Vec::with_capacity(pairs.len());
    let mut cancelled = false;
    for &(i, j) in pairs {
        if monitor.should_cancel() {
            cancelled = true;
            break;
        }
        out.push(compute_pair(map, metric, radius, i, j));
    }
    (out, cancelled)
}

#[cfg(feature = "parallel")]
fn collect_contributions(
    map: &Map,
    metric: Metric,
    radius: u32,
    pairs: &[(usize, usize)],
    monitor: &dyn ProgressMonitor,
) -> (Vec<PairContribution>, bool) {
    use rayon::prelude::*;

    let cancelled = std::sync::atomic::AtomicBool::new(false);
    let out: Vec<PairContribution> = pairs
        .par_iter()
        .filter_map(|&(i, j)| {
            if monitor.should_cancel() {
                cancelled.store(true, std::sync::atomic::Ordering::Relaxed);
                return None;
            }
            Some(compute_pair(map, metric, radius, i, j))
        })
        .collect();
    (out, cancelled.load(std::sync::atomic::Ordering::Relaxed))
}

/// Run the syntax computer over every unordered pair of distinct segments
/// (spec.md §4.5). `monitor` is polled once per pair; cancellation stops the
/// loop early (or, with the `parallel` feature, stops dispatching new pairs)
/// and `cancelled` is set in the result.
pub fn compute_syntax(map: &Map, metric: Metric, radius: u32, monitor: &dyn ProgressMonitor) -> SyntaxResult {
    let n = map.segment_count();
    let mut closeness = vec![0.0f64; n];
    let mut betweenness = vec![0.0f64; n];

    let pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect();
    let (contributions, cancelled) = collect_contributions(map, metric, radius, &pairs, monitor);
    accumulate(&contributions, &mut closeness, &mut betweenness);

    for value in &mut closeness {
        *value = value.recip();
    }

    SyntaxResult { closeness, betweenness, cancelled }
}
