//! The closed [`Map`] collection (spec.md §3 "Map").
//!
//! Built once by [`crate::builder::MapBuilder`] and never mutated afterwards
//! — safe to share by reference across threads (spec.md §5 "Shared
//! resources").

use meas_core::{Point, SegmentId, StreetId};

use crate::ids::IntersectionPairId;
use crate::intersection::{Intersection, IntersectionPair};
use crate::segment::Segment;
use crate::street::Street;

#[derive(Debug, Clone)]
pub struct Map {
    /// Index == `StreetId`.
    pub streets: Vec<Street>,
    pub intersection_pairs: Vec<IntersectionPair>,
    /// Per-street list of intersection pairs it participates in, in the
    /// fixed order produced by construction.
    pub intersections_by_street: Vec<Vec<IntersectionPairId>>,
    /// Global ordered segment array.
    pub segments: Vec<Segment>,
    /// `street_segment_offset[s] .. street_segment_offset[s + 1]` is the
    /// slice of `segments` belonging to street `s`. Length == `streets.len()
    /// + 1`.
    pub street_segment_offset: Vec<u32>,
    /// Dense `minTurns[i][j]`: minimum street-to-street transitions.
    pub min_turns: Vec<Vec<u32>>,
}

impl Map {
    #[inline]
    pub fn street(&self, id: StreetId) -> &Street {
        &self.streets[id.index()]
    }

    #[inline]
    pub fn street_count(&self) -> usize {
        self.streets.len()
    }

    /// The segments belonging to `street`, in progression order.
    pub fn segments_of(&self, street: StreetId) -> &[Segment] {
        let start = self.street_segment_offset[street.index()] as usize;
        let end = self.street_segment_offset[street.index() + 1] as usize;
        &self.segments[start..end]
    }

    /// Owner-side views of every intersection `street` participates in.
    pub fn intersections_on(&self, street: StreetId) -> impl Iterator<Item = Intersection<'_>> {
        self.intersections_by_street[street.index()].iter().map(move |&pid| {
            let pair = &self.intersection_pairs[pid.index()];
            let side = pair.side_of(street).expect("intersections_by_street is self-consistent");
            pair.view(side)
        })
    }

    /// Minimum number of street-to-street transitions between `a` and `b`
    /// (spec.md §3, §8 invariant 2: symmetric, zero on the diagonal).
    #[inline]
    pub fn min_turns(&self, a: StreetId, b: StreetId) -> u32 {
        self.min_turns[a.index()][b.index()]
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    /// The global id of the `local_index`'th segment of `street`, in
    /// progression order.
    #[inline]
    pub fn segment_id_of(&self, street: StreetId, local_index: usize) -> SegmentId {
        SegmentId(self.street_segment_offset[street.index()] + local_index as u32)
    }

    /// The segment of `street` whose span contains `point`'s progression
    /// distance along the midline (the last segment if `point` falls past
    /// the far end, which only happens by floating-point slop at an
    /// endpoint).
    pub fn segment_containing(&self, street: StreetId, point: Point) -> SegmentId {
        let d = self.street(street).distance_to_start(point);
        let segs = self.segments_of(street);
        let local = segs
            .iter()
            .position(|seg| d <= seg.end.distance_to_start)
            .unwrap_or(segs.len() - 1);
        self.segment_id_of(street, local)
    }
}
