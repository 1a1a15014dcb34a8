use serde::{Deserialize, Serialize};

use super::ListingId;

/// One listing document as read from the external store.
///
/// The coordinator never writes these back; the set is fetched once per
/// search session and treated as immutable afterwards. Missing numeric
/// fields default to zero so that sorting stays total (a priceless listing
/// sorts as 0, a timestampless one as the epoch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub size_sqm: Option<f64>,
    /// Creation time in epoch milliseconds.
    #[serde(default, alias = "createdAt")]
    pub created_at: i64,
    #[serde(default)]
    pub amenities: Amenities,
}

impl Listing {
    /// Geographic position as `(longitude, latitude)`, present only when
    /// both coordinates are. A one-sided coordinate is treated as missing,
    /// which excludes the listing from bounds gating and the visible set
    /// while leaving every other criterion applicable.
    #[must_use]
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lng), Some(lat)) => Some((lng, lat)),
            _ => None,
        }
    }
}

/// Boolean amenity flags on a listing. Absent flags deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenities {
    pub pets_allowed: bool,
    pub furnished: bool,
    pub parking: bool,
    pub balcony: bool,
}
