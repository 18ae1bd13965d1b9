//! Mirrored intersections (spec.md §3 "Intersection", §9 Design Notes
//! "Mirrored intersections").
//!
//! The mirror pair is a cycle between two owned objects; rather than model
//! that with `Rc`/back-references, the pair is a single record
//! [`IntersectionPair`] and callers borrow one of two light [`Intersection`]
//! views that differ only in which street is "owner" — equality and hashing
//! key on `(pair id, which side)`.

use meas_core::{Parallelogram, Point, StreetId};

use crate::ids::IntersectionPairId;
use crate::street::Street;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// The shared record backing a mirrored pair of intersections.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionPair {
    pub id: IntersectionPairId,
    pub street_a: StreetId,
    pub street_b: StreetId,
    pub centre: Point,
    /// The two points along `street_a`'s midline (measured from centre)
    /// where `street_b`'s footprint enters/exits it.
    pub a_near: Point,
    pub a_far: Point,
    /// Same, along `street_b`'s midline, for `street_a`'s footprint.
    pub b_near: Point,
    pub b_far: Point,
    /// The overlap parallelogram of the two streets' footprints.
    pub geometry: Parallelogram,
}

impl IntersectionPair {
    #[inline]
    pub fn view(&self, side: Side) -> Intersection<'_> {
        Intersection { pair: self, side }
    }

    #[inline]
    pub fn side_of(&self, street: StreetId) -> Option<Side> {
        if street == self.street_a {
            Some(Side::A)
        } else if street == self.street_b {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// One of the two owner-specific views of an [`IntersectionPair`].
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'m> {
    pair: &'m IntersectionPair,
    side: Side,
}

impl<'m> Intersection<'m> {
    #[inline]
    pub fn pair_id(&self) -> IntersectionPairId {
        self.pair.id
    }

    #[inline]
    pub fn centre(&self) -> Point {
        self.pair.centre
    }

    #[inline]
    pub fn geometry(&self) -> Parallelogram {
        self.pair.geometry
    }

    #[inline]
    pub fn owner(&self) -> StreetId {
        match self.side {
            Side::A => self.pair.street_a,
            Side::B => self.pair.street_b,
        }
    }

    #[inline]
    pub fn crossing(&self) -> StreetId {
        match self.side {
            Side::A => self.pair.street_b,
            Side::B => self.pair.street_a,
        }
    }

    #[inline]
    pub fn near(&self) -> Point {
        match self.side {
            Side::A => self.pair.a_near,
            Side::B => self.pair.b_near,
        }
    }

    #[inline]
    pub fn far(&self) -> Point {
        match self.side {
            Side::A => self.pair.a_far,
            Side::B => self.pair.b_far,
        }
    }

    /// `self.mirror().mirror() == self` (spec.md §8 invariant 1).
    #[inline]
    pub fn mirror(&self) -> Intersection<'m> {
        let other = match self.side {
            Side::A => Side::B,
            Side::B => Side::A,
        };
        Intersection { pair: self.pair, side: other }
    }
}

impl<'m> PartialEq for Intersection<'m> {
    fn eq(&self, other: &Self) -> bool {
        self.pair.id == other.pair.id && self.side == other.side
    }
}
impl<'m> Eq for Intersection<'m> {}

impl<'m> std::hash::Hash for Intersection<'m> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pair.id.hash(state);
        self.side.hash(state);
    }
}

/// Build the mirrored pair for streets `a` and `b`, or `None` if their
/// midlines are parallel (spec.md §4.1 step 1).
///
/// Entry/exit points use the right-triangle formula of spec.md §3:
/// `d = (crossWidth / 2) / sin(theta)` along each street's midline from the
/// centre, where `theta` is the angle between the two midline directions.
pub fn build_pair(id: IntersectionPairId, a: &Street, b: &Street) -> Option<IntersectionPair> {
    let centre = a.midline.to_line().intersect(b.midline.to_line())?;

    let theta = a.direction().angle_between(b.direction());
    let sin_theta = theta.sin();
    // `Line::intersect` above already returned `None` for parallel midlines
    // (theta == 0 or PI), so sin_theta is strictly positive here.
    debug_assert!(sin_theta > 0.0);

    let dir_a = a.direction().scaled_to(1.0);
    let dir_b = b.direction().scaled_to(1.0);
    let d_a = (b.width / 2.0) / sin_theta;
    let d_b = (a.width / 2.0) / sin_theta;

    let a_near = centre + -(dir_a * d_a);
    let a_far = centre + dir_a * d_a;
    let b_near = centre + -(dir_b * d_b);
    let b_far = centre + dir_b * d_b;

    let geometry = intersection_geometry(a, b)?;

    Some(IntersectionPair {
        id,
        street_a: a.id,
        street_b: b.id,
        centre,
        a_near,
        a_far,
        b_near,
        b_far,
        geometry,
    })
}

/// The overlap of two crossing streets' footprints is itself a
/// parallelogram, bounded by one long edge from each street.
fn intersection_geometry(a: &Street, b: &Street) -> Option<Parallelogram> {
    let [a0, a1] = a.long_edges();
    let [b0, b1] = b.long_edges();
    let corners = [
        a0.intersect(b0)?,
        a0.intersect(b1)?,
        a1.intersect(b1)?,
        a1.intersect(b0)?,
    ];
    Some(Parallelogram { corners })
}
