//! Listing discovery engine: a pure filter → sort → paginate pipeline over
//! tutor profiles and tuition-job postings.
//!
//! The pipeline is synchronous and idempotent. It receives an immutable
//! `(listings, criteria, sort, page)` snapshot and returns a fresh [`Page`];
//! callers recompute with the latest snapshot instead of cancelling work in
//! flight.

pub mod criteria;
pub mod dates;
pub mod domain;
pub mod import;
pub mod normalize;
pub mod paginate;
pub mod predicate;
pub mod router;
pub mod sort;
pub mod source;

use chrono::{DateTime, Utc};

pub use criteria::{DirectoryAction, DirectoryState, FilterCriteria, SalaryWindow};
pub use dates::{DateFilter, DateWindow, RelativeRange};
pub use domain::{EducationLevel, Gender, Listing, ListingDetails, SalaryRange, TutoringMode};
pub use import::{listings_from_path, listings_from_reader, ListingImportError};
pub use normalize::{contains_ignore_case, normalize_multi_value};
pub use paginate::{paginate, Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use predicate::{ListingPredicate, ALWAYS_VISIBLE_SALARY};
pub use router::{directory_router, SearchRequest};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use source::{ListingSource, SourceError};

/// Run the full pipeline over an in-memory listing collection. `now` anchors
/// relative date filters and is passed explicitly so two runs with the same
/// inputs always produce the same page.
pub fn search(
    listings: &[Listing],
    criteria: &FilterCriteria,
    sort_spec: &SortSpec,
    page: PageRequest,
    now: DateTime<Utc>,
) -> Page<Listing> {
    let predicate = ListingPredicate::new(criteria, now);

    let mut matched: Vec<Listing> = listings
        .iter()
        .filter(|listing| predicate.matches(listing))
        .cloned()
        .collect();

    tracing::debug!(
        candidates = listings.len(),
        matched = matched.len(),
        "directory search filtered listings"
    );

    sort::sort_listings(&mut matched, *sort_spec);
    paginate(&matched, page)
}

/// Convenience entry for callers holding a [`DirectoryState`] snapshot.
pub fn search_state(
    listings: &[Listing],
    state: &DirectoryState,
    page_size: usize,
    now: DateTime<Utc>,
) -> Page<Listing> {
    search(
        listings,
        &state.criteria,
        &state.sort,
        PageRequest::new(state.page, page_size),
        now,
    )
}
