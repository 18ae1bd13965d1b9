//! The per-street crumb cache and its StreetCut offer protocol (spec.md
//! §4.3 steps 2 and 4).

use std::collections::HashMap;

use meas_core::StreetId;
use meas_crumb::{Crumb, CrumbId, Obsoletion};

/// Counters for the three ways an offer can obsolete a crumb (spec.md §4.3
/// "Metrics"): observable, optional, never affect the search's outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathfindMetrics {
    /// The newly offered crumb was itself dominated and never entered the cache.
    pub pre_queue: u32,
    /// An existing crumb was obsoleted while still unexpanded in the heap.
    pub queued: u32,
    /// An existing crumb was obsoleted after already being popped and expanded.
    pub late: u32,
}

/// Live, per-street crumbs competing to survive the StreetCut domination
/// check (spec.md §4.3 step 4).
///
/// With StreetCut enabled (the default) a newly offered crumb is compared
/// against every live crumb on its street, regardless of exact sub-location.
/// Disabled, it is only compared against crumbs sitting at the exact same
/// point (spec.md §4.3 "StreetCut").
pub struct StreetCutCache {
    by_street: HashMap<StreetId, Vec<CrumbId>>,
    disable_street_cut: bool,
}

impl StreetCutCache {
    pub fn new(disable_street_cut: bool) -> Self {
        Self { by_street: HashMap::new(), disable_street_cut }
    }

    /// Offer `new_id` (already pushed into `arena`) to its street's cache.
    /// Returns `true` if it survives and should be pushed onto the priority
    /// queue.
    pub fn offer(
        &mut self,
        arena: &mut [Crumb],
        expanded: &[bool],
        new_id: CrumbId,
        allow_primary_ties: bool,
        metrics: &mut PathfindMetrics,
    ) -> bool {
        let street = arena[new_id.index()].street();
        let new_point = arena[new_id.index()].waypoint().point;
        let bucket = self.by_street.entry(street).or_default();

        let candidates: Vec<CrumbId> = bucket
            .iter()
            .copied()
            .filter(|&id| !arena[id.index()].is_obsolete())
            .filter(|&id| {
                !self.disable_street_cut || arena[id.index()].waypoint().point == new_point
            })
            .collect();

        let mut new_survives = true;
        let mut to_obsolete = Vec::new();

        for existing_id in candidates {
            match arena[existing_id.index()].check_obsolete(&arena[new_id.index()], allow_primary_ties) {
                Obsoletion::SelfWins => {
                    new_survives = false;
                    metrics.pre_queue += 1;
                    break;
                }
                Obsoletion::OtherWins => to_obsolete.push(existing_id),
                Obsoletion::Neither => {}
            }
        }

        for id in to_obsolete {
            arena[id.index()].set_obsolete(true);
            if expanded[id.index()] {
                metrics.late += 1;
            } else {
                metrics.queued += 1;
            }
        }

        let bucket = self.by_street.get_mut(&street).expect("just inserted above");
        bucket.retain(|&id| !arena[id.index()].is_obsolete());
        if new_survives {
            bucket.push(new_id);
        } else {
            arena[new_id.index()].set_obsolete(true);
        }
        new_survives
    }

    /// Seed crumbs are inserted unconditionally: the caller constructs one
    /// per candidate start street (spec.md §4.3 step 1), and two seeds never
    /// share a street (one per distinct candidate), so there's nothing to
    /// offer against yet.
    pub fn insert_seed(&mut self, street: StreetId, id: CrumbId) {
        self.by_street.entry(street).or_default().push(id);
    }
}
