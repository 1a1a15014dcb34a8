//! The search session: a single-threaded, event-driven coordinator that
//! keeps the store, the pipeline, the address bar, the markers, and the
//! visible set consistent with each other.
//!
//! Every surface interaction arrives as a [`SearchEvent`]; each event is
//! handled synchronously and runs to completion before the next one, so no
//! surface ever observes a partial update. The only suspension points are
//! the one-time listing fetch and the viewport debounce timer, which the
//! owning event loop drives through [`SearchSession::tick`].

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::address;
use crate::debounce::ViewportDebouncer;
use crate::markers::{Marker, MarkerSet};
use crate::pipeline;
use crate::source::ListingSource;
use crate::store::{SearchState, SearchStore};
use crate::types::{Bounds, FilterPatch, Filters, Listing, ListingId, SortKey};
use crate::visible::visible_subset;

/// Navigation/address collaborator: the session reads the current query
/// string through it and requests in-place replacements. Implementations
/// must replace, never push — a keystroke must not grow the history.
pub trait Navigator {
    fn query(&self) -> String;
    fn replace_query(&mut self, query: &str);
}

/// In-process navigator for tests and headless embedders. Records every
/// replacement so the no-loop property is observable.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    query: String,
    replacements: usize,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            replacements: 0,
        }
    }

    /// How many times the session asked for a replacement.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Navigator for MemoryNavigator {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_owned();
        self.replacements += 1;
    }
}

/// Everything a surface can dispatch into the session.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// The one-time listing snapshot arrived.
    ListingsLoaded(Vec<Listing>),
    QueryTextChanged(String),
    FiltersPatched(FilterPatch),
    FiltersReplaced(Filters),
    SortChanged(SortKey),
    SearchInAreaToggled(bool),
    /// Raw viewport report from the map; goes through the debouncer.
    ViewportChanged(Bounds),
    /// The address bar changed underneath us (back/forward, initial load).
    NavigationChanged(String),
    HoverEntered(ListingId),
    HoverLeft(ListingId),
    MarkerClicked(ListingId),
}

type SelectCallback = Box<dyn FnMut(&Listing)>;

/// One live search session. Created when the search page mounts, dropped
/// when it unmounts; owns the only [`SearchStore`] of the session.
pub struct SearchSession<N: Navigator> {
    store: SearchStore,
    debouncer: ViewportDebouncer,
    markers: MarkerSet,
    filtered: Vec<usize>,
    navigator: N,
    on_select: Option<SelectCallback>,
}

impl<N: Navigator> SearchSession<N> {
    /// Create a session and hydrate the store from whatever query string
    /// the navigator currently reports. Hydration applies the address to
    /// the state but never writes the address back.
    #[must_use]
    pub fn new(navigator: N) -> Self {
        let mut session = Self {
            store: SearchStore::new(),
            debouncer: ViewportDebouncer::default(),
            markers: MarkerSet::new(),
            filtered: Vec::new(),
            navigator,
            on_select: None,
        };
        let fields = address::parse_query(&session.navigator.query());
        address::apply_fields(&mut session.store, &fields);
        session.recompute_pipeline();
        session
    }

    /// Override the debounce quiet period (the library default is 120 ms).
    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.debouncer = ViewportDebouncer::new(quiet_period);
        self
    }

    /// Install the detail-view callback fired when a marker or list item
    /// is clicked. The session has no further responsibility once it runs.
    pub fn on_select(&mut self, callback: impl FnMut(&Listing) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Fetch the listing snapshot once. Failure is logged and leaves the
    /// listing set empty for the rest of the session; the pipeline then
    /// yields no results rather than an error.
    pub fn load_from(&mut self, source: &dyn ListingSource) {
        match source.fetch() {
            Ok(listings) => {
                debug!(count = listings.len(), "listing snapshot loaded");
                self.dispatch(SearchEvent::ListingsLoaded(listings));
            }
            Err(err) => {
                warn!(error = %err, "listing fetch failed; continuing with an empty set");
            }
        }
    }

    pub fn dispatch(&mut self, event: SearchEvent) {
        self.dispatch_at(event, Instant::now());
    }

    /// Handle one event at an explicit instant. Only viewport reports
    /// consult the clock; everything else applies immediately.
    pub fn dispatch_at(&mut self, event: SearchEvent, now: Instant) {
        match event {
            SearchEvent::ListingsLoaded(listings) => {
                self.store.set_listings(listings);
                self.recompute_pipeline();
            }
            SearchEvent::QueryTextChanged(query_text) => {
                if self.store.set_query_text(query_text) {
                    self.sync_address();
                }
            }
            SearchEvent::FiltersPatched(patch) => {
                if self.store.patch_filters(&patch) {
                    self.recompute_pipeline();
                    self.sync_address();
                }
            }
            SearchEvent::FiltersReplaced(filters) => {
                if self.store.set_filters(filters) {
                    self.recompute_pipeline();
                    self.sync_address();
                }
            }
            SearchEvent::SortChanged(sort_key) => {
                if self.store.set_sort(sort_key) {
                    self.recompute_pipeline();
                    self.sync_address();
                }
            }
            SearchEvent::SearchInAreaToggled(enabled) => {
                if self.store.set_search_in_area(enabled) {
                    self.recompute_pipeline();
                }
            }
            SearchEvent::ViewportChanged(bounds) => {
                self.debouncer.record(bounds, now);
            }
            SearchEvent::NavigationChanged(query) => {
                let fields = address::parse_query(&query);
                if address::apply_fields(&mut self.store, &fields) {
                    self.recompute_pipeline();
                }
            }
            SearchEvent::HoverEntered(id) => {
                if self.store.set_active_id(Some(id)) {
                    self.markers.apply_highlight(self.store.state().active_id.as_ref());
                }
            }
            SearchEvent::HoverLeft(id) => {
                // A stale leave event must not clobber a newer hover.
                if self.store.state().active_id.as_ref() == Some(&id)
                    && self.store.set_active_id(None)
                {
                    self.markers.apply_highlight(None);
                }
            }
            SearchEvent::MarkerClicked(id) => {
                self.select(&id);
            }
        }
    }

    /// Replace the filters through an updater, the third call style the
    /// filter bar uses alongside patch and replace.
    pub fn update_filters(&mut self, update: impl FnOnce(&Filters) -> Filters) {
        if self.store.set_filters_with(update) {
            self.recompute_pipeline();
            self.sync_address();
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Drive the debounce timer. When a viewport burst settles, its last
    /// rectangle becomes the store's bounds and both the pipeline and the
    /// visible set are recomputed.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(bounds) = self.debouncer.poll(now) {
            if self.store.set_bounds(Some(bounds)) {
                debug!(?bounds, "viewport settled");
                self.recompute_pipeline();
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        self.store.state()
    }

    /// Ordered filtered indices into the full listing slice.
    #[must_use]
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// The filtered listings in pipeline order, for the map surface.
    #[must_use]
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        let listings = &self.store.state().listings;
        self.filtered.iter().map(|&index| &listings[index]).collect()
    }

    /// The filtered listings currently inside the viewport, for the
    /// list/sidebar surface.
    #[must_use]
    pub fn visible_listings(&self) -> Vec<&Listing> {
        let state = self.store.state();
        state
            .visible_listings
            .iter()
            .map(|&index| &state.listings[index])
            .collect()
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.markers.markers()
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Re-derive everything downstream of the store: filtered indices,
    /// visible subset, markers. Runs to completion before the next event.
    fn recompute_pipeline(&mut self) {
        let state = self.store.state();
        self.filtered = pipeline::run(&state.listings, state);
        self.markers
            .rebuild(&state.listings, &self.filtered, state.active_id.as_ref());
        self.recompute_visible();
    }

    fn recompute_visible(&mut self) {
        let state = self.store.state();
        let visible = visible_subset(&state.listings, &self.filtered, state.bounds.as_ref());
        self.store.set_visible_listings(visible);
    }

    /// State → Address reaction, guarded: replace only when the serialized
    /// form differs from what the address bar already shows.
    fn sync_address(&mut self) {
        let current = self.navigator.query();
        let next = address::merge_query(&current, self.store.state());
        if next != current {
            self.navigator.replace_query(&next);
        }
    }

    fn select(&mut self, id: &ListingId) {
        let Some(callback) = self.on_select.as_mut() else {
            return;
        };
        let listing = self
            .store
            .state()
            .listings
            .iter()
            .find(|listing| listing.id.as_str() == id.as_str());
        if let Some(listing) = listing {
            callback(listing);
        }
    }
}
