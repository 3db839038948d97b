use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender of a tutor or the tutor requested by a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Highest education level advertised on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HigherSecondary,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationLevel {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HigherSecondary,
            Self::Bachelors,
            Self::Masters,
            Self::Doctorate,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherSecondary => "Higher Secondary",
            Self::Bachelors => "Bachelor's",
            Self::Masters => "Master's",
            Self::Doctorate => "Doctorate",
        }
    }
}

/// How the tutoring is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutoringMode {
    HomeTutoring,
    Online,
    Group,
}

impl TutoringMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeTutoring => "Home Tutoring",
            Self::Online => "Online",
            Self::Group => "Group",
        }
    }
}

/// Monthly salary bounds advertised on a tuition-job posting. Absent bounds
/// are stored as 0, matching the upstream export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: u32,
}

impl SalaryRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range with both bounds at 0 means the posting never advertised one.
    pub const fn is_unspecified(self) -> bool {
        self.min == 0 && self.max == 0
    }
}

/// Variant-specific fields of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingDetails {
    Tutor {
        /// Subjects the tutor teaches.
        subjects: Vec<String>,
        /// Areas the tutor will travel to.
        preferred_areas: Vec<String>,
        hourly_rate: Option<u32>,
    },
    TuitionJob {
        subject: Option<String>,
        /// Comma-joined area string as exported by the posting form,
        /// tokenized at match time.
        area: Option<String>,
        #[serde(default)]
        salary: SalaryRange,
        category: Option<String>,
        job_type: Option<String>,
        job_id: Option<String>,
    },
}

/// A tutor profile or tuition-job posting: the unit the discovery pipeline
/// filters, sorts, and paginates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: Option<String>,
    pub institute: Option<String>,
    pub district: Option<String>,
    pub detailed_location: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f32>,
    pub experience_years: Option<u32>,
    pub review_count: Option<u32>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub premium: bool,
    pub gender: Option<Gender>,
    pub education: Option<EducationLevel>,
    pub tutoring_mode: Option<TutoringMode>,
    pub created_at: DateTime<Utc>,
    pub details: ListingDetails,
}

impl Listing {
    /// Price used by the price cap filter and the price sort key: the hourly
    /// rate for tutors, the advertised salary floor for jobs. `None` when the
    /// listing never advertised a figure.
    pub fn price(&self) -> Option<u32> {
        match &self.details {
            ListingDetails::Tutor { hourly_rate, .. } => *hourly_rate,
            ListingDetails::TuitionJob { salary, .. } => {
                if salary.is_unspecified() {
                    None
                } else {
                    Some(salary.min)
                }
            }
        }
    }

    /// Salary bounds for jobs; tutors have none.
    pub fn salary(&self) -> Option<SalaryRange> {
        match &self.details {
            ListingDetails::TuitionJob { salary, .. } => Some(*salary),
            ListingDetails::Tutor { .. } => None,
        }
    }

    /// Subjects attached to the listing, single-element for jobs.
    pub fn subjects(&self) -> Vec<&str> {
        match &self.details {
            ListingDetails::Tutor { subjects, .. } => {
                subjects.iter().map(String::as_str).collect()
            }
            ListingDetails::TuitionJob { subject, .. } => {
                subject.iter().map(String::as_str).collect()
            }
        }
    }

    pub fn category(&self) -> Option<&str> {
        match &self.details {
            ListingDetails::TuitionJob { category, .. } => category.as_deref(),
            ListingDetails::Tutor { .. } => None,
        }
    }

    pub fn job_type(&self) -> Option<&str> {
        match &self.details {
            ListingDetails::TuitionJob { job_type, .. } => job_type.as_deref(),
            ListingDetails::Tutor { .. } => None,
        }
    }

    pub fn job_id(&self) -> Option<&str> {
        match &self.details {
            ListingDetails::TuitionJob { job_id, .. } => job_id.as_deref(),
            ListingDetails::Tutor { .. } => None,
        }
    }

    pub fn is_job(&self) -> bool {
        matches!(self.details, ListingDetails::TuitionJob { .. })
    }
}
