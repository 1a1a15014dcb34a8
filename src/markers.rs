//! Marker projection of the filtered set and highlight reconciliation.
//!
//! One marker per coordinate-bearing listing in the filtered output, keyed
//! by listing id. Whenever the active id changes, every marker re-checks a
//! string-coerced equality against it and toggles its highlighted flag.
//! That is a full re-scan rather than an indexed lookup; marker counts are
//! bounded by a practical result-set size, so the scan stays cheap.
//!
//! Hover and click semantics (the stale-leave guard, the detail-view
//! callback) live in the session, which owns the store the handlers
//! dispatch into.

use crate::types::{Listing, ListingId};

/// One map marker, consumed by the external map rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: ListingId,
    /// `(longitude, latitude)`.
    pub position: (f64, f64),
    pub highlighted: bool,
}

/// The marker set for the current filtered output.
#[derive(Debug, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the markers from the filtered indices. Listings without
    /// coordinates cannot be placed and get no marker; they still appear
    /// in the list surface.
    pub fn rebuild(
        &mut self,
        listings: &[Listing],
        filtered: &[usize],
        active: Option<&ListingId>,
    ) {
        self.markers.clear();
        for &index in filtered {
            let listing = &listings[index];
            let Some(position) = listing.coords() else {
                continue;
            };
            self.markers.push(Marker {
                id: listing.id.clone(),
                position,
                highlighted: false,
            });
        }
        self.apply_highlight(active);
    }

    /// Reconcile every marker's highlight flag against the active id.
    pub fn apply_highlight(&mut self, active: Option<&ListingId>) {
        for marker in &mut self.markers {
            marker.highlighted = active.is_some_and(|id| id.as_str() == marker.id.as_str());
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.highlighted)
    }
}
