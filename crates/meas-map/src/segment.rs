//! Segmentation points and segments (spec.md §3, §4.1 step 2).

use std::cmp::Ordering;

use meas_core::{LineSegment, Parallelogram, Point, StreetId};

/// A point on a named street, with a human description and a signed
/// distance-to-start along the street.
///
/// Ordered first by street, then by signed distance, with point-coordinate
/// fallback for numerical-stability ties (spec.md §3); equality compares
/// street and point only — two segmentation points at the same physical
/// place collapse together regardless of which intersection produced them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentationPoint {
    pub street: StreetId,
    pub point: Point,
    pub distance_to_start: f64,
    pub description: String,
}

impl PartialEq for SegmentationPoint {
    fn eq(&self, other: &Self) -> bool {
        self.street == other.street && self.point == other.point
    }
}
impl Eq for SegmentationPoint {}

impl PartialOrd for SegmentationPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SegmentationPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.street
            .cmp(&other.street)
            .then_with(|| self.distance_to_start.total_cmp(&other.distance_to_start))
            .then_with(|| self.point.cmp(&other.point))
    }
}

/// A contiguous portion of a single street delimited by two consecutive
/// segmentation points. Two segments are equal iff both endpoints match;
/// ordering proceeds street-by-street, then by progression along the street
/// (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub street: StreetId,
    pub start: SegmentationPoint,
    pub end: SegmentationPoint,
}

impl Segment {
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.point.distance(self.end.point)
    }

    #[inline]
    pub fn centre(&self) -> Point {
        LineSegment::new(self.start.point, self.end.point).centre()
    }

    /// The segment's footprint, given the width of its owning street.
    pub fn parallelogram(&self, width: f64) -> Parallelogram {
        Parallelogram::from_midline(LineSegment::new(self.start.point, self.end.point), width)
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.street.cmp(&other.street).then_with(|| self.start.cmp(&other.start))
    }
}
