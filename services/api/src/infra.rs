use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tutorhub::directory::{Listing, ListingSource, SourceError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog backing the directory endpoints: the listing collection is fetched
/// once at startup (CSV seed or sample data) and served as an immutable
/// snapshot.
#[derive(Clone)]
pub(crate) struct InMemoryListingCatalog {
    listings: Arc<Vec<Listing>>,
}

impl InMemoryListingCatalog {
    pub(crate) fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings: Arc::new(listings),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listings.len()
    }
}

impl ListingSource for InMemoryListingCatalog {
    fn all(&self) -> Result<Vec<Listing>, SourceError> {
        Ok(self.listings.as_ref().clone())
    }

    fn by_id(&self, id: &str) -> Result<Option<Listing>, SourceError> {
        Ok(self
            .listings
            .iter()
            .find(|listing| listing.id == id)
            .cloned())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
