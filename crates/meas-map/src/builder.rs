//! [`MapBuilder`]: the five-step map construction of spec.md §4.1.

use std::collections::VecDeque;

use log::debug;
use meas_core::{LineSegment, Point, StreetId, Vector, MAX_COORD, MIN_COORD};

use crate::error::{MapError, MapResult};
use crate::ids::IntersectionPairId;
use crate::intersection::build_pair;
use crate::map::Map;
use crate::segment::{Segment, SegmentationPoint};
use crate::street::Street;

/// One street as given to [`MapBuilder::build`] — id is assigned by
/// position, matching spec.md §4.1's "name, id equal to position".
#[derive(Debug, Clone)]
pub struct StreetInput {
    pub name: String,
    pub midline: LineSegment,
    pub width: f64,
}

impl StreetInput {
    pub fn new(name: impl Into<String>, midline: LineSegment, width: f64) -> Self {
        Self { name: name.into(), midline, width }
    }
}

pub struct MapBuilder;

impl MapBuilder {
    /// Construct a [`Map`] from `inputs`, or the first invariant violation
    /// encountered (spec.md §7: fatal at construction, the offending object
    /// is never returned in an ill-formed state).
    pub fn build(inputs: Vec<StreetInput>) -> MapResult<Map> {
        if inputs.is_empty() {
            return Err(MapError::InvalidInput("at least one street is required".into()));
        }
        for input in &inputs {
            if !(input.width > 0.0) {
                return Err(MapError::InvalidInput(format!(
                    "street \"{}\" has non-positive width {}",
                    input.name, input.width
                )));
            }
        }

        let streets: Vec<Street> = inputs
            .into_iter()
            .enumerate()
            .map(|(i, input)| Street::new(StreetId(i as u32), input.name, input.midline, input.width))
            .collect();
        debug!("meas-map: constructing map from {} streets", streets.len());

        let (pairs, intersections_by_street) = Self::build_intersections(&streets)?;
        let (segments, street_segment_offset) =
            Self::build_segments(&streets, &pairs, &intersections_by_street);
        Self::check_bounds(&streets, &pairs, &segments)?;
        let min_turns = Self::build_min_turns(&streets, &pairs)?;

        debug!(
            "meas-map: {} streets, {} intersections, {} segments",
            streets.len(),
            pairs.len(),
            segments.len()
        );

        Ok(Map {
            streets,
            intersection_pairs: pairs,
            intersections_by_street,
            segments,
            street_segment_offset,
            min_turns,
        })
    }

    /// Step 1: for every unordered pair of streets, intersect their infinite
    /// midlines.
    fn build_intersections(
        streets: &[Street],
    ) -> MapResult<(Vec<crate::intersection::IntersectionPair>, Vec<Vec<IntersectionPairId>>)> {
        let n = streets.len();
        let mut pairs = Vec::new();
        let mut by_street: Vec<Vec<IntersectionPairId>> = vec![Vec::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let a = &streets[i];
                let b = &streets[j];

                if a.parallelogram.strictly_contains(&b.parallelogram) {
                    return Err(MapError::StreetContainsStreet { containing: a.id, contained: b.id });
                }
                if b.parallelogram.strictly_contains(&a.parallelogram) {
                    return Err(MapError::StreetContainsStreet { containing: b.id, contained: a.id });
                }

                match build_pair(IntersectionPairId(pairs.len() as u32), a, b) {
                    Some(pair) => {
                        let id = pair.id;
                        by_street[i].push(id);
                        by_street[j].push(id);
                        pairs.push(pair);
                    }
                    None => {
                        // Parallel midlines: a fatal error only if the two
                        // footprints actually overlap (spec.md S1).
                        if a.parallelogram.overlaps(&b.parallelogram) {
                            return Err(MapError::ParallelOverlap { a: a.id, b: b.id });
                        }
                    }
                }
            }
        }

        Ok((pairs, by_street))
    }

    /// Step 2: segmentation points per street (endpoints + intersection
    /// entry/exit points), sorted, collapsed into consecutive-pair segments.
    fn build_segments(
        streets: &[Street],
        pairs: &[crate::intersection::IntersectionPair],
        by_street: &[Vec<IntersectionPairId>],
    ) -> (Vec<Segment>, Vec<u32>) {
        let mut all_segments = Vec::new();
        let mut offsets = vec![0u32; streets.len() + 1];

        for (idx, street) in streets.iter().enumerate() {
            let mut points = Vec::new();

            points.push(SegmentationPoint {
                street: street.id,
                point: street.midline.a,
                distance_to_start: 0.0,
                description: format!("The {} End", compass_label(-street.direction())),
            });
            points.push(SegmentationPoint {
                street: street.id,
                point: street.midline.b,
                distance_to_start: street.length(),
                description: format!("The {} End", compass_label(street.direction())),
            });

            for &pair_id in &by_street[idx] {
                let pair = &pairs[pair_id.index()];
                let (near, far, crossing) = if pair.street_a == street.id {
                    (pair.a_near, pair.a_far, pair.street_b)
                } else {
                    (pair.b_near, pair.b_far, pair.street_a)
                };
                let crossing_name = &streets[crossing.index()].name;
                for p in [near, far] {
                    points.push(SegmentationPoint {
                        street: street.id,
                        distance_to_start: street.distance_to_start(p),
                        description: format!("Crossing {crossing_name}"),
                        point: p,
                    });
                }
            }

            points.sort();
            points.dedup();

            offsets[idx] = all_segments.len() as u32;
            for pair_points in points.windows(2) {
                all_segments.push(Segment {
                    street: street.id,
                    start: pair_points[0].clone(),
                    end: pair_points[1].clone(),
                });
            }
        }
        offsets[streets.len()] = all_segments.len() as u32;

        // Streets were processed in id order and each street's own points
        // are pre-sorted by progression, so `all_segments` is already the
        // globally sorted, street-by-street order spec.md §4.1 step 3 asks
        // for — no separate sort pass is needed.
        (all_segments, offsets)
    }

    /// Step 4: every street parallelogram, intersection footprint, and
    /// segment footprint must lie inside `[MIN_COORD, MAX_COORD]^2`.
    fn check_bounds(
        streets: &[Street],
        pairs: &[crate::intersection::IntersectionPair],
        segments: &[Segment],
    ) -> MapResult<()> {
        let in_bounds = |p: Point| p.in_bounds(MIN_COORD, MAX_COORD);

        for street in streets {
            if !street.parallelogram.corners.iter().copied().all(in_bounds) {
                return Err(MapError::OutOfBounds { street: street.id, min: MIN_COORD, max: MAX_COORD });
            }
        }
        for pair in pairs {
            if !pair.geometry.corners.iter().copied().all(in_bounds) {
                return Err(MapError::OutOfBounds { street: pair.street_a, min: MIN_COORD, max: MAX_COORD });
            }
        }
        for segment in segments {
            let width = streets[segment.street.index()].width;
            if !segment.parallelogram(width).corners.iter().copied().all(in_bounds) {
                return Err(MapError::OutOfBounds { street: segment.street, min: MIN_COORD, max: MAX_COORD });
            }
        }
        Ok(())
    }

    /// Step 5: BFS over the street-adjacency graph induced by intersections,
    /// one row of `minTurns` per street. Rejects a disconnected map.
    fn build_min_turns(
        streets: &[Street],
        pairs: &[crate::intersection::IntersectionPair],
    ) -> MapResult<Vec<Vec<u32>>> {
        let n = streets.len();
        let mut adjacency: Vec<Vec<StreetId>> = vec![Vec::new(); n];
        for pair in pairs {
            adjacency[pair.street_a.index()].push(pair.street_b);
            adjacency[pair.street_b.index()].push(pair.street_a);
        }

        let mut min_turns = vec![vec![u32::MAX; n]; n];
        for start in 0..n {
            min_turns[start][start] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(start);
            while let Some(cur) = queue.pop_front() {
                let cur_dist = min_turns[start][cur];
                for &next in &adjacency[cur] {
                    if min_turns[start][next.index()] == u32::MAX {
                        min_turns[start][next.index()] = cur_dist + 1;
                        queue.push_back(next.index());
                    }
                }
            }
            if let Some(unreachable) = min_turns[start].iter().position(|&d| d == u32::MAX) {
                return Err(MapError::Disconnected {
                    from: StreetId(start as u32),
                    unreachable: StreetId(unreachable as u32),
                });
            }
        }
        Ok(min_turns)
    }
}

/// Coarse compass label for a direction vector, used to describe a street's
/// endpoint segmentation points (spec.md §4.1 step 2, e.g. `"The North
/// End"`).
fn compass_label(v: Vector) -> &'static str {
    let deg = v.dy.atan2(v.dx).to_degrees();
    let deg = if deg < 0.0 { deg + 360.0 } else { deg };
    match deg {
        d if (22.5..67.5).contains(&d) => "Northeast",
        d if (67.5..112.5).contains(&d) => "North",
        d if (112.5..157.5).contains(&d) => "Northwest",
        d if (157.5..202.5).contains(&d) => "West",
        d if (202.5..247.5).contains(&d) => "Southwest",
        d if (247.5..292.5).contains(&d) => "South",
        d if (292.5..337.5).contains(&d) => "Southeast",
        _ => "East",
    }
}
