use crate::infra::parse_date;
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use tutorhub::directory::{
    listings_from_path, search, search_state, DateFilter, DirectoryAction, DirectoryState,
    EducationLevel, FilterCriteria, Gender, Listing, ListingDetails, Page, PageRequest,
    RelativeRange, SalaryRange, SalaryWindow, SortDirection, SortKey, SortSpec, TutoringMode,
    DEFAULT_PAGE_SIZE,
};
use tutorhub::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Listing CSV export to search; defaults to the built-in sample catalog
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Free-text query across names, subjects, locations, phones, and job ids
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[arg(long)]
    pub(crate) subject: Option<String>,
    #[arg(long)]
    pub(crate) district: Option<String>,
    #[arg(long)]
    pub(crate) area: Option<String>,
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long)]
    pub(crate) job_type: Option<String>,
    #[arg(long, value_parser = parse_gender_arg)]
    pub(crate) gender: Option<Gender>,
    #[arg(long, value_parser = parse_education_arg)]
    pub(crate) education: Option<EducationLevel>,
    #[arg(long, value_parser = parse_mode_arg)]
    pub(crate) mode: Option<TutoringMode>,
    /// Minimum rating; 0 leaves the filter off
    #[arg(long, default_value_t = 0.0)]
    pub(crate) min_rating: f32,
    /// Minimum years of experience; 0 leaves the filter off
    #[arg(long, default_value_t = 0)]
    pub(crate) min_experience: u32,
    #[arg(long)]
    pub(crate) max_price: Option<u32>,
    #[arg(long)]
    pub(crate) verified_only: bool,
    #[arg(long)]
    pub(crate) premium_only: bool,
    /// Salary window lower bound (jobs only); requires --salary-max
    #[arg(long, requires = "salary_max")]
    pub(crate) salary_min: Option<u32>,
    /// Salary window upper bound (jobs only); requires --salary-min
    #[arg(long, requires = "salary_min")]
    pub(crate) salary_max: Option<u32>,
    /// Listings created on this calendar day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["created_from", "created_within"])]
    pub(crate) created_on: Option<NaiveDate>,
    /// Range start (YYYY-MM-DD); requires --created-to
    #[arg(long, value_parser = parse_date, requires = "created_to")]
    pub(crate) created_from: Option<NaiveDate>,
    /// Range end (YYYY-MM-DD); requires --created-from
    #[arg(long, value_parser = parse_date, requires = "created_from")]
    pub(crate) created_to: Option<NaiveDate>,
    /// Relative bucket: today, yesterday, last7days, last30days, last90days,
    /// this_month, last_month
    #[arg(long, value_parser = parse_relative_arg, conflicts_with = "created_from")]
    pub(crate) created_within: Option<RelativeRange>,
    #[arg(long, value_parser = parse_sort_key_arg, default_value = "rating")]
    pub(crate) sort: SortKey,
    #[arg(long, value_parser = parse_direction_arg, default_value = "desc")]
    pub(crate) direction: SortDirection,
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) page_size: usize,
    /// Emit the result page as JSON instead of the human-readable table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Page size used by the scripted searches
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let listings = match &args.csv {
        Some(path) => listings_from_path(path)?,
        None => sample_listings(),
    };

    let criteria = FilterCriteria {
        query: args.query.clone().unwrap_or_default(),
        subject: args.subject.clone(),
        district: args.district.clone(),
        area: args.area.clone(),
        category: args.category.clone(),
        job_type: args.job_type.clone(),
        gender: args.gender,
        education: args.education,
        tutoring_mode: args.mode,
        min_rating: args.min_rating,
        min_experience: args.min_experience,
        max_price: args.max_price,
        verified_only: args.verified_only,
        premium_only: args.premium_only,
        salary: match (args.salary_min, args.salary_max) {
            (Some(min), Some(max)) => Some(SalaryWindow::new(min, max)),
            _ => None,
        },
        date: date_filter_from_args(&args),
    };
    let sort = SortSpec {
        key: args.sort,
        direction: args.direction,
    };

    let page = search(
        &listings,
        &criteria,
        &sort,
        PageRequest::new(args.page, args.page_size),
        Utc::now(),
    );

    if args.json {
        match serde_json::to_string_pretty(&page) {
            Ok(body) => println!("{body}"),
            Err(err) => eprintln!("failed to serialize result page: {err}"),
        }
    } else {
        render_page(&page);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let page_size = args.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let listings = sample_listings();
    let now = Utc::now();

    println!("TutorHub directory demo ({} listings)", listings.len());

    let mut state = DirectoryState::new();
    println!("\n1. Unfiltered directory, default ordering:");
    render_page(&search_state(&listings, &state, page_size, now));

    println!("\n2. Dhaka postings overlapping a 30k-50k salary window:");
    state = state
        .reduce(DirectoryAction::SetDistrict(Some("Dhaka".to_string())))
        .reduce(DirectoryAction::SetSalary(Some(SalaryWindow::new(
            30_000, 50_000,
        ))));
    render_page(&search_state(&listings, &state, page_size, now));

    println!("\n3. Verified tutors rated 4.0+, cheapest first:");
    state = DirectoryState::new()
        .reduce(DirectoryAction::SetVerifiedOnly(true))
        .reduce(DirectoryAction::SetMinRating(4.0))
        .reduce(DirectoryAction::SetSort(SortSpec {
            key: SortKey::Price,
            direction: SortDirection::Asc,
        }));
    render_page(&search_state(&listings, &state, page_size, now));

    println!("\n4. Everything posted in the last 7 days:");
    state = DirectoryState::new().reduce(DirectoryAction::SetDateFilter(DateFilter::relative(
        RelativeRange::Last7Days,
    )));
    render_page(&search_state(&listings, &state, page_size, now));

    Ok(())
}

fn date_filter_from_args(args: &SearchArgs) -> DateFilter {
    if let Some(date) = args.created_on {
        return DateFilter::specific(date);
    }
    if let (Some(start), Some(end)) = (args.created_from, args.created_to) {
        return DateFilter::range(start, end);
    }
    if let Some(range) = args.created_within {
        return DateFilter::relative(range);
    }
    DateFilter::None
}

fn render_page(page: &Page<Listing>) {
    println!(
        "  {} result(s), page {}/{} (page size {})",
        page.total_count, page.page_number, page.total_pages, page.page_size
    );
    for listing in &page.items {
        let kind = if listing.is_job() { "job" } else { "tutor" };
        let name = listing.name.as_deref().unwrap_or("(unnamed)");
        let district = listing.district.as_deref().unwrap_or("-");
        let rating = listing
            .rating
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let price = listing
            .price()
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    [{kind}] {id} | {name} | {district} | rating {rating} | price {price}",
            id = listing.id
        );
    }
}

/// Built-in catalog used by the demo and as a fallback when no CSV seed is
/// configured. Creation instants are spread over the past quarter so the
/// relative date filters have something to bite on.
pub(crate) fn sample_listings() -> Vec<Listing> {
    let now = Utc::now();
    let tutor = |id: &str,
                 name: &str,
                 district: &str,
                 subjects: &[&str],
                 areas: &[&str],
                 rating: Option<f32>,
                 rate: Option<u32>,
                 verified: bool,
                 days_ago: i64| Listing {
        id: id.to_string(),
        name: Some(name.to_string()),
        institute: Some("Dhaka University".to_string()),
        district: Some(district.to_string()),
        detailed_location: None,
        phone: Some("01700000000".to_string()),
        rating,
        experience_years: Some(2),
        review_count: Some(8),
        verified,
        premium: false,
        gender: Some(Gender::Male),
        education: Some(EducationLevel::Bachelors),
        tutoring_mode: Some(TutoringMode::HomeTutoring),
        created_at: now - Duration::days(days_ago),
        details: ListingDetails::Tutor {
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            preferred_areas: areas.iter().map(|s| s.to_string()).collect(),
            hourly_rate: rate,
        },
    };
    let job = |id: &str,
               name: &str,
               district: &str,
               area: &str,
               salary: SalaryRange,
               days_ago: i64| Listing {
        id: id.to_string(),
        name: Some(name.to_string()),
        institute: None,
        district: Some(district.to_string()),
        detailed_location: None,
        phone: None,
        rating: None,
        experience_years: None,
        review_count: None,
        verified: false,
        premium: false,
        gender: None,
        education: None,
        tutoring_mode: None,
        created_at: now - Duration::days(days_ago),
        details: ListingDetails::TuitionJob {
            subject: Some("Physics".to_string()),
            area: Some(area.to_string()),
            salary,
            category: Some("HSC".to_string()),
            job_type: Some("Part-time".to_string()),
            job_id: Some(format!("TJ-{id}")),
        },
    };

    vec![
        tutor(
            "t-001",
            "Rahim Uddin",
            "Dhaka",
            &["Physics", "Math"],
            &["Dhanmondi", "Gulshan"],
            Some(4.8),
            Some(600),
            true,
            2,
        ),
        tutor(
            "t-002",
            "Salma Khatun",
            "Dhaka",
            &["English"],
            &["Banani"],
            Some(4.2),
            Some(450),
            true,
            12,
        ),
        tutor(
            "t-003",
            "Arif Hossain",
            "Chattogram",
            &["Chemistry"],
            &["Agrabad"],
            Some(3.6),
            Some(350),
            false,
            40,
        ),
        tutor(
            "t-004",
            "Nusrat Jahan",
            "Sylhet",
            &["Biology", "Chemistry"],
            &["Zindabazar"],
            None,
            None,
            false,
            75,
        ),
        job(
            "j-001",
            "HSC Physics tutor needed",
            "Dhaka",
            "Dhanmondi, Gulshan",
            SalaryRange::new(20_000, 40_000),
            1,
        ),
        job(
            "j-002",
            "O-level Math home tutor",
            "Dhaka",
            "Uttara",
            SalaryRange::new(35_000, 45_000),
            5,
        ),
        job(
            "j-003",
            "Weekend English coaching",
            "Rajshahi",
            "Shaheb Bazar",
            SalaryRange::new(8_000, 12_000),
            20,
        ),
        job(
            "j-004",
            "Full-time science mentor",
            "Dhaka",
            "Mirpur, Pallabi",
            SalaryRange::new(500_000, 2_000_000),
            60,
        ),
    ]
}

fn parse_gender_arg(raw: &str) -> Result<Gender, String> {
    match raw.trim().to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        other => Err(format!("unknown gender '{other}'")),
    }
}

fn parse_education_arg(raw: &str) -> Result<EducationLevel, String> {
    match raw.trim().to_lowercase().as_str() {
        "higher_secondary" | "hsc" => Ok(EducationLevel::HigherSecondary),
        "bachelors" => Ok(EducationLevel::Bachelors),
        "masters" => Ok(EducationLevel::Masters),
        "doctorate" | "phd" => Ok(EducationLevel::Doctorate),
        other => Err(format!("unknown education level '{other}'")),
    }
}

fn parse_mode_arg(raw: &str) -> Result<TutoringMode, String> {
    match raw.trim().to_lowercase().as_str() {
        "home" | "home_tutoring" => Ok(TutoringMode::HomeTutoring),
        "online" => Ok(TutoringMode::Online),
        "group" => Ok(TutoringMode::Group),
        other => Err(format!("unknown tutoring mode '{other}'")),
    }
}

fn parse_relative_arg(raw: &str) -> Result<RelativeRange, String> {
    match raw.trim().to_lowercase().as_str() {
        "today" => Ok(RelativeRange::Today),
        "yesterday" => Ok(RelativeRange::Yesterday),
        "last7days" => Ok(RelativeRange::Last7Days),
        "last30days" => Ok(RelativeRange::Last30Days),
        "last90days" => Ok(RelativeRange::Last90Days),
        "this_month" | "thismonth" => Ok(RelativeRange::ThisMonth),
        "last_month" | "lastmonth" => Ok(RelativeRange::LastMonth),
        other => Err(format!("unknown relative range '{other}'")),
    }
}

fn parse_sort_key_arg(raw: &str) -> Result<SortKey, String> {
    match raw.trim().to_lowercase().as_str() {
        "rating" => Ok(SortKey::Rating),
        "price" => Ok(SortKey::Price),
        "experience" => Ok(SortKey::Experience),
        "reviews" | "review_count" => Ok(SortKey::ReviewCount),
        other => Err(format!("unknown sort key '{other}'")),
    }
}

fn parse_direction_arg(raw: &str) -> Result<SortDirection, String> {
    match raw.trim().to_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        other => Err(format!("unknown sort direction '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_mixes_tutors_and_jobs() {
        let listings = sample_listings();
        assert!(listings.iter().any(|listing| listing.is_job()));
        assert!(listings.iter().any(|listing| !listing.is_job()));
    }

    #[test]
    fn demo_runs_over_the_sample_catalog() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }

    #[test]
    fn sort_key_parser_covers_every_key() {
        assert_eq!(parse_sort_key_arg("rating"), Ok(SortKey::Rating));
        assert_eq!(parse_sort_key_arg("PRICE"), Ok(SortKey::Price));
        assert_eq!(parse_sort_key_arg("experience"), Ok(SortKey::Experience));
        assert_eq!(parse_sort_key_arg("reviews"), Ok(SortKey::ReviewCount));
        assert!(parse_sort_key_arg("distance").is_err());
    }
}
