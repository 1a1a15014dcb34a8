use serde::{Deserialize, Serialize};

/// Result ordering applied after filtering.
///
/// `None` preserves the pipeline's input order; the others compare a single
/// key with a stable sort, so ties keep their pre-sort relative order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortKey {
    /// Parse the value of the `sort` query parameter. Unknown values map to
    /// `None` rather than erroring.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "priceAsc" => Self::PriceAsc,
            "priceDesc" => Self::PriceDesc,
            "newest" => Self::Newest,
            _ => Self::None,
        }
    }

    /// Serialized form for the `sort` query parameter, or `None` when the
    /// key should be omitted from the address entirely.
    #[must_use]
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::PriceAsc => Some("priceAsc"),
            Self::PriceDesc => Some("priceDesc"),
            Self::Newest => Some("newest"),
        }
    }
}
