//! Visible-set reporter for the list/sidebar surface.
//!
//! Always narrows the filtered set to the current viewport, independent of
//! the search-in-area toggle: the list tracks what is visually on screen
//! even when the toggle has not restricted the underlying filtering. This
//! deliberately shares [`Bounds::contains`] with the pipeline's gating
//! step so the two "visible" computations cannot drift apart.

use crate::types::{Bounds, Listing};

/// Indices (into the full listing slice) of filtered listings whose
/// coordinates lie inside `bounds`. With no viewport reported yet the
/// whole filtered set is visible; listings without coordinates never are
/// once a viewport exists.
#[must_use]
pub fn visible_subset(
    listings: &[Listing],
    filtered: &[usize],
    bounds: Option<&Bounds>,
) -> Vec<usize> {
    let Some(bounds) = bounds else {
        return filtered.to_vec();
    };

    filtered
        .iter()
        .copied()
        .filter(|&index| {
            listings[index]
                .coords()
                .is_some_and(|(lng, lat)| bounds.contains(lng, lat))
        })
        .collect()
}
