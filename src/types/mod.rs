//! Data model for the search coordinator: listings, filters, sort keys,
//! and geographic bounds.

mod bounds;
mod filters;
mod id;
mod listing;
mod sort;

pub use bounds::Bounds;
pub use filters::{FilterPatch, Filters};
pub use id::ListingId;
pub use listing::{Amenities, Listing};
pub use sort::SortKey;
