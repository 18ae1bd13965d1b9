//! Map-local identifier types.
//!
//! Follows the same `typed_id!` pattern as `meas_core::ids`; kept as a
//! separate copy rather than shared across crates because the set of id
//! types a crate needs is crate-local (`meas-core` has no notion of
//! intersections).

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

typed_id! {
    /// Index into [`Map::intersection_pairs`](crate::Map::intersection_pairs).
    pub struct IntersectionPairId(u32);
}
