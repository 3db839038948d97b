//! Date filtering: resolves a date-filter selection into a concrete time
//! window the predicate can test creation instants against.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Relative date ranges offered by the directory filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeRange {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last90Days,
    ThisMonth,
    LastMonth,
}

impl RelativeRange {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::Last90Days => "Last 90 Days",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
        }
    }
}

/// Date-filter selection. A single sum type so a half-configured range (mode
/// set, dates missing) cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    None,
    /// Listings created on this calendar day, time of day ignored.
    Specific { date: NaiveDate },
    /// Listings created between the start of `start` and the end of `end`,
    /// inclusive. `end < start` matches nothing; the selection is surfaced
    /// back to the user rather than silently swapped.
    Range { start: NaiveDate, end: NaiveDate },
    Relative { range: RelativeRange },
}

impl DateFilter {
    pub const fn specific(date: NaiveDate) -> Self {
        Self::Specific { date }
    }

    pub const fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Range { start, end }
    }

    pub const fn relative(range: RelativeRange) -> Self {
        Self::Relative { range }
    }

    /// Resolve the selection against `now` into a testable window.
    pub fn resolve(self, now: DateTime<Utc>) -> DateWindow {
        match self {
            Self::None => DateWindow::Unconstrained,
            Self::Specific { date } => DateWindow::CalendarDay(date),
            Self::Range { start, end } => {
                if end < start {
                    DateWindow::Empty
                } else {
                    DateWindow::Between(start_of_day(start), end_of_day(end))
                }
            }
            Self::Relative { range } => resolve_relative(range, now),
        }
    }
}

/// Concrete window a creation instant is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No date filter active; everything passes.
    Unconstrained,
    /// Calendar-field match on year/month/day, so a day selection never
    /// shifts across a timezone boundary the way instant arithmetic can.
    CalendarDay(NaiveDate),
    /// Inclusive instant range.
    Between(DateTime<Utc>, DateTime<Utc>),
    /// Matches nothing (inverted ranges, unrepresentable anchors).
    Empty,
}

impl DateWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::CalendarDay(day) => instant.date_naive() == *day,
            Self::Between(start, end) => *start <= instant && instant <= *end,
            Self::Empty => false,
        }
    }
}

fn resolve_relative(range: RelativeRange, now: DateTime<Utc>) -> DateWindow {
    let today = now.date_naive();
    match range {
        RelativeRange::Today => DateWindow::Between(start_of_day(today), end_of_day(today)),
        RelativeRange::Yesterday => match today.pred_opt() {
            Some(yesterday) => {
                DateWindow::Between(start_of_day(yesterday), end_of_day(yesterday))
            }
            None => DateWindow::Empty,
        },
        RelativeRange::Last7Days => DateWindow::Between(now - Duration::days(7), now),
        RelativeRange::Last30Days => DateWindow::Between(now - Duration::days(30), now),
        RelativeRange::Last90Days => DateWindow::Between(now - Duration::days(90), now),
        RelativeRange::ThisMonth => DateWindow::Between(
            start_of_day(first_of_month(today)),
            end_of_day(last_of_month(today)),
        ),
        RelativeRange::LastMonth => match first_of_month(today).pred_opt() {
            Some(prev_month_end) => DateWindow::Between(
                start_of_day(first_of_month(prev_month_end)),
                end_of_day(prev_month_end),
            ),
            None => DateWindow::Empty,
        },
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => next.and_time(NaiveTime::MIN).and_utc() - Duration::milliseconds(1),
        None => NaiveDateTime::MAX.and_utc(),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn none_is_unconstrained() {
        let window = DateFilter::None.resolve(instant(2024, 3, 15, 10, 0, 0));
        assert!(window.contains(instant(1999, 1, 1, 0, 0, 0)));
        assert!(window.contains(instant(2030, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn specific_matches_calendar_day_regardless_of_time() {
        let window =
            DateFilter::specific(date(2024, 3, 10)).resolve(instant(2024, 3, 15, 10, 0, 0));
        assert!(window.contains(instant(2024, 3, 10, 0, 0, 0)));
        assert!(window.contains(instant(2024, 3, 10, 23, 59, 59)));
        assert!(!window.contains(instant(2024, 3, 11, 0, 0, 0)));
    }

    #[test]
    fn range_spans_full_days_inclusive() {
        let window = DateFilter::range(date(2024, 3, 1), date(2024, 3, 5))
            .resolve(instant(2024, 3, 15, 10, 0, 0));
        assert!(window.contains(instant(2024, 3, 1, 0, 0, 0)));
        assert!(window.contains(instant(2024, 3, 5, 23, 59, 59)));
        assert!(!window.contains(instant(2024, 3, 6, 0, 0, 0)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let window = DateFilter::range(date(2024, 3, 5), date(2024, 3, 1))
            .resolve(instant(2024, 3, 15, 10, 0, 0));
        assert_eq!(window, DateWindow::Empty);
        assert!(!window.contains(instant(2024, 3, 3, 12, 0, 0)));
    }

    #[test]
    fn last_seven_days_subtracts_instants() {
        let now = instant(2024, 3, 15, 10, 0, 0);
        let window = DateFilter::relative(RelativeRange::Last7Days).resolve(now);
        assert!(window.contains(instant(2024, 3, 8, 10, 0, 0)));
        assert!(!window.contains(instant(2024, 3, 8, 9, 59, 59)));
        assert!(!window.contains(instant(2024, 3, 15, 10, 0, 1)));
    }

    #[test]
    fn yesterday_covers_the_previous_calendar_day() {
        let now = instant(2024, 3, 15, 10, 0, 0);
        let window = DateFilter::relative(RelativeRange::Yesterday).resolve(now);
        assert!(window.contains(instant(2024, 3, 14, 0, 0, 0)));
        assert!(window.contains(instant(2024, 3, 14, 23, 59, 59)));
        assert!(!window.contains(instant(2024, 3, 15, 0, 0, 0)));
        assert!(!window.contains(instant(2024, 3, 13, 23, 59, 59)));
    }

    #[test]
    fn last_month_is_calendar_aligned_including_leap_february() {
        let now = instant(2024, 3, 15, 10, 0, 0);
        let window = DateFilter::relative(RelativeRange::LastMonth).resolve(now);

        match window {
            DateWindow::Between(start, end) => {
                assert_eq!(start, instant(2024, 2, 1, 0, 0, 0));
                let expected_end = instant(2024, 3, 1, 0, 0, 0) - Duration::milliseconds(1);
                assert_eq!(end, expected_end);
            }
            other => panic!("expected a bounded window, got {other:?}"),
        }

        assert!(window.contains(instant(2024, 2, 14, 8, 0, 0)));
        assert!(window.contains(instant(2024, 2, 29, 23, 59, 59)));
        assert!(!window.contains(instant(2024, 3, 1, 0, 0, 0)));
        assert!(!window.contains(instant(2024, 1, 31, 23, 59, 59)));
    }

    #[test]
    fn this_month_spans_first_to_last_day() {
        let now = instant(2024, 12, 10, 9, 30, 0);
        let window = DateFilter::relative(RelativeRange::ThisMonth).resolve(now);
        assert!(window.contains(instant(2024, 12, 1, 0, 0, 0)));
        assert!(window.contains(instant(2024, 12, 31, 23, 59, 59)));
        assert!(!window.contains(instant(2024, 11, 30, 23, 59, 59)));
        assert!(!window.contains(instant(2025, 1, 1, 0, 0, 0)));
    }
}
