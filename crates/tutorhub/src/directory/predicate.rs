//! Per-listing match predicate composed from the active criteria. Every
//! sub-predicate is ANDed, and every one of them degrades to "no match" on
//! missing data instead of failing.

use chrono::{DateTime, Utc};

use super::criteria::FilterCriteria;
use super::dates::DateWindow;
use super::domain::{Listing, ListingDetails};
use super::normalize::{contains_ignore_case, normalize_multi_value};

/// Postings advertising either salary bound above this figure stay visible
/// for every selected salary window. Upstream product behavior, kept verbatim.
pub const ALWAYS_VISIBLE_SALARY: u32 = 1_000_000;

/// Compiled form of one criteria snapshot: the date window is resolved once
/// against `now`, then the predicate is applied to every listing.
#[derive(Debug, Clone)]
pub struct ListingPredicate {
    criteria: FilterCriteria,
    window: DateWindow,
}

impl ListingPredicate {
    pub fn new(criteria: &FilterCriteria, now: DateTime<Utc>) -> Self {
        Self {
            criteria: criteria.clone(),
            window: criteria.date.resolve(now),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_query(listing)
            && self.matches_subject(listing)
            && self.matches_district(listing)
            && self.matches_area(listing)
            && self.matches_category(listing)
            && self.matches_job_type(listing)
            && self.matches_profile_selectors(listing)
            && self.meets_minimums(listing)
            && self.within_price_cap(listing)
            && self.matches_flags(listing)
            && self.matches_salary(listing)
            && self.window.contains(listing.created_at)
    }

    /// Free-text search over every display field; an empty query passes.
    fn matches_query(&self, listing: &Listing) -> bool {
        let query = self.criteria.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let mut haystacks: Vec<&str> = Vec::new();
        haystacks.extend(listing.name.as_deref());
        haystacks.extend(listing.institute.as_deref());
        haystacks.extend(listing.district.as_deref());
        haystacks.extend(listing.detailed_location.as_deref());
        haystacks.extend(listing.phone.as_deref());
        haystacks.extend(listing.subjects());
        haystacks.extend(listing.job_id());
        match &listing.details {
            ListingDetails::Tutor {
                preferred_areas, ..
            } => haystacks.extend(preferred_areas.iter().map(String::as_str)),
            ListingDetails::TuitionJob { area, .. } => haystacks.extend(area.as_deref()),
        }

        haystacks
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }

    fn matches_subject(&self, listing: &Listing) -> bool {
        match &self.criteria.subject {
            None => true,
            Some(subject) => contains_ignore_case(&listing.subjects(), subject),
        }
    }

    fn matches_district(&self, listing: &Listing) -> bool {
        match &self.criteria.district {
            None => true,
            Some(district) => listing
                .district
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(district.trim())),
        }
    }

    /// Area containment over the normalized token set. An empty token set
    /// never matches a concrete selection.
    fn matches_area(&self, listing: &Listing) -> bool {
        let Some(area) = &self.criteria.area else {
            return true;
        };

        match &listing.details {
            ListingDetails::Tutor {
                preferred_areas, ..
            } => contains_ignore_case(preferred_areas, area),
            ListingDetails::TuitionJob { area: raw, .. } => {
                let tokens = normalize_multi_value(raw.as_deref());
                contains_ignore_case(&tokens, area)
            }
        }
    }

    fn matches_category(&self, listing: &Listing) -> bool {
        match &self.criteria.category {
            None => true,
            Some(category) => listing
                .category()
                .is_some_and(|value| value.eq_ignore_ascii_case(category.trim())),
        }
    }

    fn matches_job_type(&self, listing: &Listing) -> bool {
        match &self.criteria.job_type {
            None => true,
            Some(job_type) => listing
                .job_type()
                .is_some_and(|value| value.eq_ignore_ascii_case(job_type.trim())),
        }
    }

    fn matches_profile_selectors(&self, listing: &Listing) -> bool {
        if let Some(gender) = self.criteria.gender {
            if listing.gender != Some(gender) {
                return false;
            }
        }
        if let Some(education) = self.criteria.education {
            if listing.education != Some(education) {
                return false;
            }
        }
        if let Some(mode) = self.criteria.tutoring_mode {
            if listing.tutoring_mode != Some(mode) {
                return false;
            }
        }
        true
    }

    /// A listing missing the field under comparison fails any nonzero
    /// threshold; a zero threshold is unconstrained.
    fn meets_minimums(&self, listing: &Listing) -> bool {
        if self.criteria.min_rating > 0.0
            && !listing
                .rating
                .is_some_and(|rating| rating >= self.criteria.min_rating)
        {
            return false;
        }

        if self.criteria.min_experience > 0
            && !listing
                .experience_years
                .is_some_and(|years| years >= self.criteria.min_experience)
        {
            return false;
        }

        true
    }

    fn within_price_cap(&self, listing: &Listing) -> bool {
        match self.criteria.max_price {
            None => true,
            Some(max) => listing.price().is_some_and(|price| price <= max),
        }
    }

    fn matches_flags(&self, listing: &Listing) -> bool {
        (!self.criteria.verified_only || listing.verified)
            && (!self.criteria.premium_only || listing.premium)
    }

    /// Salary window intersection for job postings; tutors carry no salary so
    /// the filter does not apply to them. Either bound above
    /// `ALWAYS_VISIBLE_SALARY` bypasses the intersection entirely.
    fn matches_salary(&self, listing: &Listing) -> bool {
        let Some(window) = self.criteria.salary else {
            return true;
        };
        let Some(salary) = listing.salary() else {
            return true;
        };

        if salary.min > ALWAYS_VISIBLE_SALARY || salary.max > ALWAYS_VISIBLE_SALARY {
            return true;
        }

        salary.min <= window.max && salary.max >= window.min
    }
}
