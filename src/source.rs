//! Read-only seam to the external listing store.
//!
//! The coordinator consumes one snapshot of the listings collection per
//! session and never writes back. There is no retry policy: a failed fetch
//! is logged by the session and the pipeline degrades to "no results".

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Listing;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read listing data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse listing data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can produce the full listing snapshot.
pub trait ListingSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError>;
}

/// Listing snapshot stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ListingSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// In-memory snapshot, used by tests and embedders that already hold the
/// collection.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    listings: Vec<Listing>,
}

impl StaticSource {
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl ListingSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        Ok(self.listings.clone())
    }
}
