use serde::{Deserialize, Serialize};

/// Structured search criteria. Every field is optional; absence means
/// "no constraint". No cross-field validation happens here — a range with
/// `price_min > price_max` is legal and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Case-insensitive substring match against the listing city.
    pub city: Option<String>,
    /// Exact match against the listing type.
    pub property_type: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub beds_min: Option<u32>,
    pub baths_min: Option<u32>,
    /// Amenity flags: `Some(true)` requires the listing flag to be set,
    /// anything else imposes no constraint.
    pub pets_allowed: Option<bool>,
    pub furnished: Option<bool>,
    pub parking: Option<bool>,
    pub balcony: Option<bool>,
}

impl Filters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply a partial patch, overwriting only the fields the patch
    /// carries. Clearing a criterion goes through replacement instead
    /// (see [`crate::store::SearchStore::set_filters`]).
    #[must_use]
    pub fn merged(&self, patch: &FilterPatch) -> Self {
        let mut next = self.clone();
        if let Some(city) = &patch.city {
            next.city = Some(city.clone());
        }
        if let Some(property_type) = &patch.property_type {
            next.property_type = Some(property_type.clone());
        }
        if let Some(min) = patch.price_min {
            next.price_min = Some(min);
        }
        if let Some(max) = patch.price_max {
            next.price_max = Some(max);
        }
        if let Some(beds) = patch.beds_min {
            next.beds_min = Some(beds);
        }
        if let Some(baths) = patch.baths_min {
            next.baths_min = Some(baths);
        }
        if let Some(pets) = patch.pets_allowed {
            next.pets_allowed = Some(pets);
        }
        if let Some(furnished) = patch.furnished {
            next.furnished = Some(furnished);
        }
        if let Some(parking) = patch.parking {
            next.parking = Some(parking);
        }
        if let Some(balcony) = patch.balcony {
            next.balcony = Some(balcony);
        }
        next
    }
}

/// Partial update for [`Filters`], mirroring the patch call style of the
/// filter-bar surface: only fields present in the patch are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub beds_min: Option<u32>,
    pub baths_min: Option<u32>,
    pub pets_allowed: Option<bool>,
    pub furnished: Option<bool>,
    pub parking: Option<bool>,
    pub balcony: Option<bool>,
}

impl FilterPatch {
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    #[must_use]
    pub fn price_min(mut self, min: f64) -> Self {
        self.price_min = Some(min);
        self
    }

    #[must_use]
    pub fn price_max(mut self, max: f64) -> Self {
        self.price_max = Some(max);
        self
    }

    #[must_use]
    pub fn beds_min(mut self, beds: u32) -> Self {
        self.beds_min = Some(beds);
        self
    }

    #[must_use]
    pub fn baths_min(mut self, baths: u32) -> Self {
        self.baths_min = Some(baths);
        self
    }

    #[must_use]
    pub fn pets_allowed(mut self, required: bool) -> Self {
        self.pets_allowed = Some(required);
        self
    }

    #[must_use]
    pub fn furnished(mut self, required: bool) -> Self {
        self.furnished = Some(required);
        self
    }

    #[must_use]
    pub fn parking(mut self, required: bool) -> Self {
        self.parking = Some(required);
        self
    }

    #[must_use]
    pub fn balcony(mut self, required: bool) -> Self {
        self.balcony = Some(required);
        self
    }
}
