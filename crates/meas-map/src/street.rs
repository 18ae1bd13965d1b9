//! [`Street`]: a named [`meas_core::LineSegment`] midline plus a positive
//! width, occupying the parallelogram obtained by extruding the midline by
//! `±width/2` along its perpendicular (spec.md §3 "Road"/"Street").

use std::cmp::Ordering;

use meas_core::{Line, LineSegment, Parallelogram, Point, StreetId, Vector};

/// A named road with a stable id. Two streets are equal iff their ids match;
/// streets are ordered by id (spec.md §3).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Street {
    pub id: StreetId,
    pub name: String,
    pub midline: LineSegment,
    pub width: f64,
    pub parallelogram: Parallelogram,
}

impl Street {
    pub fn new(id: StreetId, name: impl Into<String>, midline: LineSegment, width: f64) -> Self {
        let parallelogram = Parallelogram::from_midline(midline, width);
        Self { id, name: name.into(), midline, width, parallelogram }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.midline.length()
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.midline.direction()
    }

    /// The two infinite lines bounding the street's footprint lengthwise
    /// (parallel to the midline, offset by `±width/2`).
    pub fn long_edges(&self) -> [Line; 2] {
        let half = self.direction().orthogonal().scaled_to(self.width / 2.0);
        [
            Line::new(self.midline.a + half, self.direction()),
            Line::new(self.midline.a + -half, self.direction()),
        ]
    }

    /// Signed distance of `p` along the midline from `midline.a`, negative
    /// when `p` lies past the near end and greater than [`Street::length`]
    /// when it lies past the far end (spec.md §3 SegmentationPoint).
    #[inline]
    pub fn distance_to_start(&self, p: Point) -> f64 {
        self.midline.signed_distance_to(p)
    }
}

impl PartialEq for Street {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Street {}

impl PartialOrd for Street {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Street {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
