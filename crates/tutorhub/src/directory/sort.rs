//! Ordering of filtered listings. The sort must be stable so listings tied on
//! the selected key keep their relative input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::Listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rating,
    Price,
    Experience,
    ReviewCount,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "Rating",
            Self::Price => "Price",
            Self::Experience => "Experience",
            Self::ReviewCount => "Reviews",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Selected ordering for a directory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Rating,
            direction: SortDirection::Desc,
        }
    }
}

/// Numeric value a listing contributes under a sort key; absent fields read
/// as 0 so unrated or unpriced listings sink in descending order.
fn sort_value(listing: &Listing, key: SortKey) -> f64 {
    match key {
        SortKey::Rating => listing.rating.unwrap_or(0.0) as f64,
        SortKey::Price => listing.price().unwrap_or(0) as f64,
        SortKey::Experience => listing.experience_years.unwrap_or(0) as f64,
        SortKey::ReviewCount => listing.review_count.unwrap_or(0) as f64,
    }
}

pub fn compare(a: &Listing, b: &Listing, spec: SortSpec) -> Ordering {
    let lhs = sort_value(a, spec.key);
    let rhs = sort_value(b, spec.key);
    let ordering = lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal);

    match spec.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort in place under the selected key and direction. `sort_by` is stable,
/// so equal keys preserve input order.
pub fn sort_listings(listings: &mut [Listing], spec: SortSpec) {
    listings.sort_by(|a, b| compare(a, b, spec));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::domain::ListingDetails;
    use chrono::{TimeZone, Utc};

    fn tutor(id: &str, rating: Option<f32>, rate: Option<u32>) -> Listing {
        Listing {
            id: id.to_string(),
            name: Some(format!("Tutor {id}")),
            institute: None,
            district: None,
            detailed_location: None,
            phone: None,
            rating,
            experience_years: None,
            review_count: None,
            verified: false,
            premium: false,
            gender: None,
            education: None,
            tutoring_mode: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            details: ListingDetails::Tutor {
                subjects: Vec::new(),
                preferred_areas: Vec::new(),
                hourly_rate: rate,
            },
        }
    }

    #[test]
    fn descending_rating_puts_best_first() {
        let mut listings = vec![
            tutor("a", Some(3.5), None),
            tutor("b", Some(4.8), None),
            tutor("c", None, None),
        ];
        sort_listings(
            &mut listings,
            SortSpec {
                key: SortKey::Rating,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn missing_values_read_as_zero() {
        let mut listings = vec![tutor("a", None, Some(500)), tutor("b", None, None)];
        sort_listings(
            &mut listings,
            SortSpec {
                key: SortKey::Price,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(listings[0].id, "b");
    }

    #[test]
    fn ties_keep_input_order() {
        let mut listings = vec![
            tutor("first", Some(4.0), None),
            tutor("second", Some(4.0), None),
            tutor("third", Some(4.0), None),
        ];
        sort_listings(
            &mut listings,
            SortSpec {
                key: SortKey::Rating,
                direction: SortDirection::Desc,
            },
        );
        let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
