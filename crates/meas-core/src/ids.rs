//! Strongly typed, zero-cost identifier wrappers.
//!
//! `Copy + Ord + Hash` so they can be used as map keys and `Vec` indices
//! without ceremony. The inner integer is `pub` for direct indexing via
//! `id.index()`.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id".
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

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a street in `Map::streets` (== the street's id, spec.md §3).
    pub struct StreetId(u32);
}

typed_id! {
    /// Index of a segment in `Map`'s global segment array.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Index of an agent in a [`Simulation`](../meas_mobility/struct.Simulation.html).
    pub struct AgentId(u32);
}
