//! Loads listings from the marketplace CSV export that seeds the in-memory
//! catalog. One row per listing; tutor and job rows share the file and are
//! distinguished by the `Kind` column.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{
    EducationLevel, Gender, Listing, ListingDetails, SalaryRange, TutoringMode,
};
use super::normalize::normalize_multi_value;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { id: String, reason: String },
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            ListingImportError::Row { id, reason } => {
                write!(f, "listing row '{}' rejected: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
            ListingImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub fn listings_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, ListingImportError> {
    let file = std::fs::File::open(path)?;
    listings_from_reader(file)
}

pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut listings = Vec::new();
    for record in csv_reader.deserialize::<ListingRow>() {
        let row = record?;
        listings.push(row.into_listing()?);
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Subjects", default, deserialize_with = "empty_string_as_none")]
    subjects: Option<String>,
    #[serde(rename = "Institute", default, deserialize_with = "empty_string_as_none")]
    institute: Option<String>,
    #[serde(rename = "District", default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(rename = "Area", default, deserialize_with = "empty_string_as_none")]
    area: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    detailed_location: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(rename = "Education", default, deserialize_with = "empty_string_as_none")]
    education: Option<String>,
    #[serde(rename = "Mode", default, deserialize_with = "empty_string_as_none")]
    tutoring_mode: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(rename = "Job Type", default, deserialize_with = "empty_string_as_none")]
    job_type: Option<String>,
    #[serde(rename = "Job ID", default, deserialize_with = "empty_string_as_none")]
    job_id: Option<String>,
    #[serde(rename = "Rating", default)]
    rating: Option<f32>,
    #[serde(rename = "Experience", default)]
    experience_years: Option<u32>,
    #[serde(rename = "Reviews", default)]
    review_count: Option<u32>,
    #[serde(rename = "Hourly Rate", default)]
    hourly_rate: Option<u32>,
    #[serde(rename = "Salary Min", default)]
    salary_min: Option<u32>,
    #[serde(rename = "Salary Max", default)]
    salary_max: Option<u32>,
    #[serde(rename = "Verified", default, deserialize_with = "empty_string_as_none")]
    verified: Option<String>,
    #[serde(rename = "Premium", default, deserialize_with = "empty_string_as_none")]
    premium: Option<String>,
    #[serde(rename = "Created At")]
    created_at: String,
}

impl ListingRow {
    fn into_listing(self) -> Result<Listing, ListingImportError> {
        let created_at =
            parse_timestamp(&self.created_at).ok_or_else(|| ListingImportError::Row {
                id: self.id.clone(),
                reason: format!("unparseable Created At value '{}'", self.created_at),
            })?;

        let details = match self.kind.to_lowercase().as_str() {
            "tutor" => ListingDetails::Tutor {
                subjects: normalize_multi_value(self.subjects.as_deref()),
                preferred_areas: normalize_multi_value(self.area.as_deref()),
                hourly_rate: self.hourly_rate,
            },
            "job" | "tuition_job" => ListingDetails::TuitionJob {
                subject: self.subjects.clone(),
                area: self.area.clone(),
                salary: SalaryRange::new(
                    self.salary_min.unwrap_or(0),
                    self.salary_max.unwrap_or(0),
                ),
                category: self.category.clone(),
                job_type: self.job_type.clone(),
                job_id: self.job_id.clone(),
            },
            other => {
                return Err(ListingImportError::Row {
                    id: self.id,
                    reason: format!("unknown listing kind '{}'", other),
                })
            }
        };

        Ok(Listing {
            id: self.id,
            name: self.name,
            institute: self.institute,
            district: self.district,
            detailed_location: self.detailed_location,
            phone: self.phone,
            rating: self.rating,
            experience_years: self.experience_years,
            review_count: self.review_count,
            verified: parse_flag(self.verified.as_deref()),
            premium: parse_flag(self.premium.as_deref()),
            gender: self.gender.as_deref().and_then(parse_gender),
            education: self.education.as_deref().and_then(parse_education),
            tutoring_mode: self.tutoring_mode.as_deref().and_then(parse_mode),
            created_at,
            details,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::to_lowercase).as_deref(),
        Some("true") | Some("yes") | Some("1")
    )
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value.trim().to_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        _ => None,
    }
}

fn parse_education(value: &str) -> Option<EducationLevel> {
    match value.trim().to_lowercase().as_str() {
        "higher_secondary" | "hsc" => Some(EducationLevel::HigherSecondary),
        "bachelors" | "bachelor's" | "bsc" => Some(EducationLevel::Bachelors),
        "masters" | "master's" | "msc" => Some(EducationLevel::Masters),
        "doctorate" | "phd" => Some(EducationLevel::Doctorate),
        _ => None,
    }
}

fn parse_mode(value: &str) -> Option<TutoringMode> {
    match value.trim().to_lowercase().as_str() {
        "home" | "home_tutoring" => Some(TutoringMode::HomeTutoring),
        "online" => Some(TutoringMode::Online),
        "group" => Some(TutoringMode::Group),
        _ => None,
    }
}
