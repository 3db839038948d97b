//! Filter criteria snapshots and the pure reducer that advances them.
//!
//! Every user interaction produces a brand-new snapshot; nothing here mutates
//! shared state, so two renders of the same snapshot always see the same
//! results.

use serde::{Deserialize, Serialize};

use super::dates::DateFilter;
use super::domain::{EducationLevel, Gender, TutoringMode};
use super::sort::SortSpec;

/// Salary window selected on the tuition-job directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryWindow {
    pub min: u32,
    pub max: u32,
}

impl SalaryWindow {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// One immutable bundle of every active filter selection. `None`, `0`, and
/// `false` all mean "unconstrained" for their respective fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub query: String,
    pub subject: Option<String>,
    pub district: Option<String>,
    pub area: Option<String>,
    pub category: Option<String>,
    pub job_type: Option<String>,
    pub gender: Option<Gender>,
    pub education: Option<EducationLevel>,
    pub tutoring_mode: Option<TutoringMode>,
    #[serde(default)]
    pub min_rating: f32,
    #[serde(default)]
    pub min_experience: u32,
    pub max_price: Option<u32>,
    #[serde(default)]
    pub verified_only: bool,
    #[serde(default)]
    pub premium_only: bool,
    pub salary: Option<SalaryWindow>,
    #[serde(default)]
    pub date: DateFilter,
}

impl FilterCriteria {
    /// Criteria preset with a district, covering directory screens opened
    /// from a district link (the query-string seeding collaborator).
    pub fn with_district(district: Option<String>) -> Self {
        Self {
            district,
            ..Self::default()
        }
    }
}

/// Full directory view configuration: filters, ordering, current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryState {
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    pub page: usize,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryState {
    pub fn new() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            page: 1,
        }
    }

    pub fn with_district(district: Option<String>) -> Self {
        Self {
            criteria: FilterCriteria::with_district(district),
            sort: SortSpec::default(),
            page: 1,
        }
    }

    /// Advance the state by one user interaction. Any change to a filter or
    /// the sort order snaps the view back to page 1; only explicit page
    /// navigation keeps the rest of the state untouched.
    pub fn reduce(self, action: DirectoryAction) -> Self {
        let mut next = self;

        match action {
            DirectoryAction::SetQuery(query) => next.criteria.query = query,
            DirectoryAction::SetSubject(subject) => next.criteria.subject = subject,
            DirectoryAction::SetDistrict(district) => next.criteria.district = district,
            DirectoryAction::SetArea(area) => next.criteria.area = area,
            DirectoryAction::SetCategory(category) => next.criteria.category = category,
            DirectoryAction::SetJobType(job_type) => next.criteria.job_type = job_type,
            DirectoryAction::SetGender(gender) => next.criteria.gender = gender,
            DirectoryAction::SetEducation(education) => next.criteria.education = education,
            DirectoryAction::SetTutoringMode(mode) => next.criteria.tutoring_mode = mode,
            DirectoryAction::SetMinRating(min_rating) => next.criteria.min_rating = min_rating,
            DirectoryAction::SetMinExperience(years) => next.criteria.min_experience = years,
            DirectoryAction::SetMaxPrice(max_price) => next.criteria.max_price = max_price,
            DirectoryAction::SetVerifiedOnly(flag) => next.criteria.verified_only = flag,
            DirectoryAction::SetPremiumOnly(flag) => next.criteria.premium_only = flag,
            DirectoryAction::SetSalary(salary) => next.criteria.salary = salary,
            DirectoryAction::SetDateFilter(date) => next.criteria.date = date,
            DirectoryAction::SetSort(sort) => next.sort = sort,
            DirectoryAction::SetPage(page) => {
                next.page = page.max(1);
                return next;
            }
            DirectoryAction::ClearFilters => {
                next.criteria = FilterCriteria::default();
                next.sort = SortSpec::default();
            }
        }

        next.page = 1;
        next
    }
}

/// User interactions the directory screens emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum DirectoryAction {
    SetQuery(String),
    SetSubject(Option<String>),
    SetDistrict(Option<String>),
    SetArea(Option<String>),
    SetCategory(Option<String>),
    SetJobType(Option<String>),
    SetGender(Option<Gender>),
    SetEducation(Option<EducationLevel>),
    SetTutoringMode(Option<TutoringMode>),
    SetMinRating(f32),
    SetMinExperience(u32),
    SetMaxPrice(Option<u32>),
    SetVerifiedOnly(bool),
    SetPremiumOnly(bool),
    SetSalary(Option<SalaryWindow>),
    SetDateFilter(DateFilter),
    SetSort(SortSpec),
    SetPage(usize),
    ClearFilters,
}
