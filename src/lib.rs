//! Map-driven search coordinator for a real-estate listings front end.
//!
//! The crate keeps one shared search state — free-text query, structured
//! filters, sort key, map viewport, the "only in visible area" toggle, and
//! the highlighted listing — consistent across a filter bar, a map with
//! markers, and a result list, while mirroring the shareable part of that
//! state into the page address. The root module re-exports the pieces an
//! embedder needs so surfaces can be wired up without digging through the
//! module hierarchy.

pub mod address;
pub mod debounce;
pub mod markers;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod store;
pub mod types;
pub mod visible;

pub use crate::debounce::{DEFAULT_QUIET_PERIOD, ViewportDebouncer};
pub use crate::markers::{Marker, MarkerSet};
pub use crate::session::{MemoryNavigator, Navigator, SearchEvent, SearchSession};
pub use crate::source::{JsonFileSource, ListingSource, SourceError, StaticSource};
pub use crate::store::{SearchState, SearchStore};
pub use crate::types::{Amenities, Bounds, FilterPatch, Filters, Listing, ListingId, SortKey};
