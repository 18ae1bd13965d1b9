//! Arena index for predecessor links (spec.md §9 Design Notes: "an
//! arena-with-indices representation is natural: one `Vec<Crumb>` per
//! search, with `u32` indices for predecessor links").

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrumbId(pub u32);

impl CrumbId {
    /// Sentinel for "no predecessor" (the search's root crumbs).
    pub const INVALID: CrumbId = CrumbId(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for CrumbId {
    fn default() -> Self {
        Self::INVALID
    }
}
