//! Upstream data-fetch collaborator. The engine itself never performs I/O;
//! it receives an already-fetched listing collection through this trait.

use thiserror::Error;

use super::domain::Listing;

/// Storage abstraction so the search surface can be exercised in isolation.
pub trait ListingSource: Send + Sync {
    /// The full, unfiltered listing collection. An empty collection is a
    /// valid result, not an error.
    fn all(&self) -> Result<Vec<Listing>, SourceError>;

    fn by_id(&self, id: &str) -> Result<Option<Listing>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("listing source unavailable: {0}")]
    Unavailable(String),
}
