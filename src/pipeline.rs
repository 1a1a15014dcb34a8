//! Pure filter/sort pipeline: full listing set + current state in, ordered
//! filtered indices out.
//!
//! The output is a vector of indices into the input slice, which is what
//! the map and list surfaces render from. The pipeline is deterministic
//! and the sort is stable, so repeated runs over identical inputs yield
//! identical output and ties keep their input order.

use crate::store::SearchState;
use crate::types::{Bounds, Filters, Listing, SortKey};

/// Run the pipeline for the given state.
#[must_use]
pub fn run(listings: &[Listing], state: &SearchState) -> Vec<usize> {
    let geo_gate = if state.search_in_area {
        state.bounds.as_ref()
    } else {
        None
    };

    let mut indices: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| matches(listing, &state.filters, geo_gate))
        .map(|(index, _)| index)
        .collect();

    sort_indices(listings, &mut indices, state.sort_key);
    indices
}

/// Per-listing predicate. Short-circuits on the first failing criterion;
/// the order below is the contract, not a performance promise.
fn matches(listing: &Listing, filters: &Filters, geo_gate: Option<&Bounds>) -> bool {
    if geo_gate.is_some() && listing.coords().is_none() {
        return false;
    }

    if let Some(city) = &filters.city {
        if !contains_ignore_case(&listing.city, city) {
            return false;
        }
    }

    if let Some(property_type) = &filters.property_type {
        if listing.property_type != *property_type {
            return false;
        }
    }

    if let Some(min) = filters.price_min {
        if listing.price < min {
            return false;
        }
    }
    if let Some(max) = filters.price_max {
        if listing.price > max {
            return false;
        }
    }

    if let Some(beds) = filters.beds_min {
        if listing.bedrooms.unwrap_or(0) < beds {
            return false;
        }
    }
    if let Some(baths) = filters.baths_min {
        if listing.bathrooms.unwrap_or(0) < baths {
            return false;
        }
    }

    if !amenities_match(listing, filters) {
        return false;
    }

    if let Some(bounds) = geo_gate {
        // Coordinate presence was checked up front, but stay total.
        match listing.coords() {
            Some((lng, lat)) if bounds.contains(lng, lat) => {}
            _ => return false,
        }
    }

    true
}

fn amenities_match(listing: &Listing, filters: &Filters) -> bool {
    let amenities = &listing.amenities;
    let required = [
        (filters.pets_allowed, amenities.pets_allowed),
        (filters.furnished, amenities.furnished),
        (filters.parking, amenities.parking),
        (filters.balcony, amenities.balcony),
    ];
    required
        .iter()
        .all(|(wanted, actual)| !matches!(wanted, Some(true)) || *actual)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn sort_indices(listings: &[Listing], indices: &mut [usize], sort_key: SortKey) {
    match sort_key {
        SortKey::None => {}
        SortKey::PriceAsc => {
            indices.sort_by(|&a, &b| price_of(listings, a).total_cmp(&price_of(listings, b)));
        }
        SortKey::PriceDesc => {
            indices.sort_by(|&a, &b| price_of(listings, b).total_cmp(&price_of(listings, a)));
        }
        SortKey::Newest => {
            indices.sort_by(|&a, &b| created_of(listings, b).cmp(&created_of(listings, a)));
        }
    }
}

fn price_of(listings: &[Listing], index: usize) -> f64 {
    listings[index].price
}

fn created_of(listings: &[Listing], index: usize) -> i64 {
    listings[index].created_at
}
