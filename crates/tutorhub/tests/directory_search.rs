use chrono::{DateTime, TimeZone, Utc};
use tutorhub::directory::{
    normalize_multi_value, search, DateFilter, FilterCriteria, Listing, ListingDetails,
    PageRequest, RelativeRange, SalaryRange, SalaryWindow, SortSpec,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
}

fn tutor(id: &str, district: &str, rating: Option<f32>, created_at: DateTime<Utc>) -> Listing {
    Listing {
        id: id.to_string(),
        name: Some(format!("Tutor {id}")),
        institute: Some("Dhaka College".to_string()),
        district: Some(district.to_string()),
        detailed_location: None,
        phone: None,
        rating,
        experience_years: Some(2),
        review_count: Some(5),
        verified: true,
        premium: false,
        gender: None,
        education: None,
        tutoring_mode: None,
        created_at,
        details: ListingDetails::Tutor {
            subjects: vec!["Math".to_string(), "Physics".to_string()],
            preferred_areas: vec!["Dhanmondi".to_string()],
            hourly_rate: Some(450),
        },
    }
}

fn job(id: &str, district: &str, salary: SalaryRange, created_at: DateTime<Utc>) -> Listing {
    Listing {
        id: id.to_string(),
        name: Some(format!("Posting {id}")),
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
        created_at,
        details: ListingDetails::TuitionJob {
            subject: Some("English".to_string()),
            area: Some("Dhanmondi, Gulshan".to_string()),
            salary,
            category: None,
            job_type: None,
            job_id: Some(format!("TJ-{id}")),
        },
    }
}

fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
}

fn sample_listings() -> Vec<Listing> {
    vec![
        tutor("t1", "Dhaka", Some(4.8), created(1)),
        tutor("t2", "Dhaka", Some(3.2), created(2)),
        tutor("t3", "Chattogram", None, created(3)),
        job("j1", "Dhaka", SalaryRange::new(20_000, 40_000), created(4)),
        job("j2", "Sylhet", SalaryRange::new(8_000, 12_000), created(5)),
        job("j3", "Dhaka", SalaryRange::new(500, 2_000_000), created(6)),
    ]
}

#[test]
fn same_inputs_yield_identical_pages() {
    let listings = sample_listings();
    let criteria = FilterCriteria {
        query: "dhanmondi".to_string(),
        min_rating: 3.0,
        ..FilterCriteria::default()
    };
    let sort = SortSpec::default();
    let page = PageRequest::new(1, 6);

    let first = search(&listings, &criteria, &sort, page, now());
    let second = search(&listings, &criteria, &sort, page, now());
    assert_eq!(first, second);
}

#[test]
fn unconstrained_criteria_return_the_whole_collection() {
    let listings = sample_listings();
    let page = search(
        &listings,
        &FilterCriteria::default(),
        &SortSpec::default(),
        PageRequest::new(1, 100),
        now(),
    );
    assert_eq!(page.total_count, listings.len());
}

#[test]
fn adding_a_constraint_never_widens_the_result_set() {
    let listings = sample_listings();
    let sort = SortSpec::default();
    let page = PageRequest::new(1, 100);

    let mut criteria = FilterCriteria::default();
    let baseline = search(&listings, &criteria, &sort, page, now()).total_count;

    criteria.min_rating = 4.0;
    let narrowed = search(&listings, &criteria, &sort, page, now()).total_count;
    assert!(narrowed <= baseline);

    criteria.verified_only = true;
    let narrower = search(&listings, &criteria, &sort, page, now()).total_count;
    assert!(narrower <= narrowed);

    criteria.date = DateFilter::relative(RelativeRange::Today);
    let narrowest = search(&listings, &criteria, &sort, page, now()).total_count;
    assert!(narrowest <= narrower);
}

#[test]
fn outlier_salaries_survive_every_window() {
    let listings = vec![job(
        "outlier",
        "Dhaka",
        SalaryRange::new(5_000, 2_000_000),
        created(4),
    )];

    for (min, max) in [(0, 100), (30_000, 50_000), (999_999, 1_000_000)] {
        let criteria = FilterCriteria {
            salary: Some(SalaryWindow::new(min, max)),
            ..FilterCriteria::default()
        };
        let page = search(
            &listings,
            &criteria,
            &SortSpec::default(),
            PageRequest::new(1, 10),
            now(),
        );
        assert_eq!(page.total_count, 1, "window [{min}, {max}] hid the outlier");
    }
}

#[test]
fn pages_partition_the_filtered_results() {
    let listings: Vec<Listing> = (0..20)
        .map(|i| tutor(&format!("t{i}"), "Dhaka", Some(4.0), created(1 + i % 28)))
        .collect();

    let criteria = FilterCriteria::default();
    let sort = SortSpec::default();
    let first = search(&listings, &criteria, &sort, PageRequest::new(1, 6), now());
    assert_eq!(first.total_pages, 4);

    let mut seen_ids = Vec::new();
    for number in 1..=first.total_pages {
        let page = search(
            &listings,
            &criteria,
            &sort,
            PageRequest::new(number, 6),
            now(),
        );
        for item in page.items {
            assert!(
                !seen_ids.contains(&item.id),
                "listing {} appeared on two pages",
                item.id
            );
            seen_ids.push(item.id);
        }
    }
    assert_eq!(seen_ids.len(), first.total_count);

    let empty = search(
        &[],
        &criteria,
        &sort,
        PageRequest::new(1, 6),
        now(),
    );
    assert_eq!(empty.total_pages, 1);
    assert!(empty.items.is_empty());
}

#[test]
fn area_tokens_drop_trailing_empties() {
    let tokens = normalize_multi_value(Some("Dhanmondi, Gulshan, "));
    assert_eq!(tokens, vec!["Dhanmondi", "Gulshan"]);
}

#[test]
fn last_month_bucket_matches_only_february_listings() {
    let in_window = job(
        "feb",
        "Dhaka",
        SalaryRange::new(10_000, 20_000),
        Utc.with_ymd_and_hms(2024, 2, 14, 8, 0, 0).unwrap(),
    );
    let out_of_window = job(
        "mar",
        "Dhaka",
        SalaryRange::new(10_000, 20_000),
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    );

    let criteria = FilterCriteria {
        date: DateFilter::relative(RelativeRange::LastMonth),
        ..FilterCriteria::default()
    };
    let page = search(
        &[in_window, out_of_window],
        &criteria,
        &SortSpec::default(),
        PageRequest::new(1, 10),
        now(),
    );

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, "feb");
}

#[test]
fn dhaka_salary_scenario_returns_the_three_matches_in_input_order() {
    let mut listings = Vec::new();
    for i in 0..3 {
        listings.push(job(
            &format!("dhaka-{i}"),
            "Dhaka",
            SalaryRange::new(20_000, 40_000),
            created(1 + i),
        ));
    }
    for i in 0..7 {
        listings.push(job(
            &format!("other-{i}"),
            "Rajshahi",
            SalaryRange::new(20_000, 40_000),
            created(10 + i),
        ));
    }

    let criteria = FilterCriteria {
        district: Some("Dhaka".to_string()),
        salary: Some(SalaryWindow::new(30_000, 50_000)),
        ..FilterCriteria::default()
    };
    let page = search(
        &listings,
        &criteria,
        &SortSpec::default(),
        PageRequest::new(1, 10),
        now(),
    );

    assert_eq!(page.total_count, 3);
    // All ratings are absent, so the stable sort keeps input order.
    let ids: Vec<&str> = page.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["dhaka-0", "dhaka-1", "dhaka-2"]);
}

#[test]
fn out_of_range_pages_are_empty_not_errors() {
    let listings = sample_listings();
    let page = search(
        &listings,
        &FilterCriteria::default(),
        &SortSpec::default(),
        PageRequest::new(40, 6),
        now(),
    );
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, listings.len());
}
