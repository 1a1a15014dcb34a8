//! The single shared search state and its dispatch surface.
//!
//! Exactly one [`SearchStore`] is live per search session. Every surface —
//! filter bar, map, result list — reads and writes through it rather than
//! keeping a local copy that could diverge. All setters are synchronous
//! run-to-completion mutations and report whether the write actually
//! changed anything; that write-if-different signal is what the address
//! synchronizer relies on to avoid update loops.

use crate::types::{Bounds, FilterPatch, Filters, Listing, ListingId, SortKey};

/// Snapshot of everything a search session shares between its surfaces.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub filters: Filters,
    pub sort_key: SortKey,
    /// Free-text address/location query, independent of `filters`.
    pub query_text: String,
    /// Current map viewport, `None` until the map reports one.
    pub bounds: Option<Bounds>,
    /// When set, `bounds` also gates the filter pipeline, not just the
    /// visible-set reporter.
    pub search_in_area: bool,
    /// Currently hover/click-highlighted listing. Freely overwritten;
    /// never blocks other state changes.
    pub active_id: Option<ListingId>,
    /// Full unfiltered listing set, fetched once per session.
    pub listings: Vec<Listing>,
    /// Indices into `listings` for the filtered subset currently inside
    /// the viewport, maintained by the session for the list surface.
    pub visible_listings: Vec<usize>,
}

/// Owner of the session's [`SearchState`].
#[derive(Debug, Default)]
pub struct SearchStore {
    state: SearchState,
}

impl SearchStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state snapshot. Callers re-read on every reaction instead
    /// of caching fields.
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Replace the filter set wholesale.
    pub fn set_filters(&mut self, next: Filters) -> bool {
        if self.state.filters == next {
            return false;
        }
        self.state.filters = next;
        true
    }

    /// Merge a partial patch into the current filters.
    pub fn patch_filters(&mut self, patch: &FilterPatch) -> bool {
        let next = self.state.filters.merged(patch);
        self.set_filters(next)
    }

    /// Replace the filters through an updater receiving the current value,
    /// for callers that compute the next filter set from the previous one.
    pub fn set_filters_with(&mut self, update: impl FnOnce(&Filters) -> Filters) -> bool {
        let next = update(&self.state.filters);
        self.set_filters(next)
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> bool {
        if self.state.sort_key == sort_key {
            return false;
        }
        self.state.sort_key = sort_key;
        true
    }

    pub fn set_query_text(&mut self, query_text: impl Into<String>) -> bool {
        let query_text = query_text.into();
        if self.state.query_text == query_text {
            return false;
        }
        self.state.query_text = query_text;
        true
    }

    pub fn set_bounds(&mut self, bounds: Option<Bounds>) -> bool {
        if self.state.bounds == bounds {
            return false;
        }
        self.state.bounds = bounds;
        true
    }

    pub fn set_search_in_area(&mut self, enabled: bool) -> bool {
        if self.state.search_in_area == enabled {
            return false;
        }
        self.state.search_in_area = enabled;
        true
    }

    pub fn set_active_id(&mut self, active_id: Option<ListingId>) -> bool {
        if self.state.active_id == active_id {
            return false;
        }
        self.state.active_id = active_id;
        true
    }

    /// Install the fetched listing set. Happens once per session; the set
    /// is not diffed against the previous value.
    pub fn set_listings(&mut self, listings: Vec<Listing>) -> bool {
        self.state.listings = listings;
        true
    }

    pub fn set_visible_listings(&mut self, visible: Vec<usize>) -> bool {
        if self.state.visible_listings == visible {
            return false;
        }
        self.state.visible_listings = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_report_whether_anything_changed() {
        let mut store = SearchStore::new();
        assert!(store.set_sort(SortKey::PriceAsc));
        assert!(!store.set_sort(SortKey::PriceAsc));
        assert!(store.set_query_text("kreuzberg"));
        assert!(!store.set_query_text("kreuzberg"));
        assert!(store.set_search_in_area(true));
        assert!(!store.set_search_in_area(true));
    }

    #[test]
    fn patch_and_updater_styles_agree() {
        let mut patched = SearchStore::new();
        patched.patch_filters(&FilterPatch::default().city("Berlin"));

        let mut replaced = SearchStore::new();
        replaced.set_filters_with(|current| Filters {
            city: Some("Berlin".into()),
            ..current.clone()
        });

        assert_eq!(patched.state().filters, replaced.state().filters);
    }

    #[test]
    fn redundant_patch_is_not_a_change() {
        let mut store = SearchStore::new();
        let patch = FilterPatch::default().property_type("house");
        assert!(store.patch_filters(&patch));
        assert!(!store.patch_filters(&patch));
    }

    #[test]
    fn inconsistent_ranges_are_accepted() {
        let mut store = SearchStore::new();
        let patch = FilterPatch::default().price_min(900.0).price_max(100.0);
        assert!(store.patch_filters(&patch));
        assert_eq!(store.state().filters.price_min, Some(900.0));
        assert_eq!(store.state().filters.price_max, Some(100.0));
    }

    #[test]
    fn active_id_is_freely_overwritten() {
        let mut store = SearchStore::new();
        assert!(store.set_active_id(Some(ListingId::new("a"))));
        assert!(store.set_active_id(Some(ListingId::new("b"))));
        assert!(store.set_active_id(None));
        assert!(!store.set_active_id(None));
    }
}
