use crate::models::{CalendarView, TrackerData, WeekView};
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Week numbering and the previous-month navigation bound are anchored
/// to this date (a Monday).
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 8).expect("2025-09-08 is a valid date")
}

pub const WINDOW_WEEKS: usize = 5;

/// Most recent Monday at or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 1-based week number relative to `epoch`; the epoch week is 1 and
/// weeks before it get zero or negative numbers.
pub fn week_index_of(week_start: NaiveDate, epoch: NaiveDate) -> i64 {
    (week_start - epoch).num_days().div_euclid(7) + 1
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn build_week_window(reference: NaiveDate, data: &TrackerData) -> Vec<WeekView> {
    let anchor = week_start_of(reference);
    let mut weeks = Vec::with_capacity(WINDOW_WEEKS);
    for offset in 0..WINDOW_WEEKS {
        let start = anchor + Duration::weeks(offset as i64);
        let end = start + Duration::days(6);
        let status = data
            .weeks
            .get(&date_key(start))
            .map(|record| record.status.as_str())
            .unwrap_or("unmarked");
        weeks.push(WeekView {
            week_number: week_index_of(start, epoch()),
            start_date: start.to_string(),
            end_date: end.to_string(),
            status: status.to_string(),
        });
    }
    weeks
}

pub fn build_calendar(reference: NaiveDate, data: &TrackerData) -> CalendarView {
    CalendarView {
        month_label: month_label(reference),
        prev_enabled: prev_enabled(reference),
        weeks: build_week_window(reference, data),
    }
}

pub fn month_label(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}

fn prev_enabled(reference: NaiveDate) -> bool {
    let epoch = epoch();
    !(reference.year() == epoch.year() && reference.month() == epoch.month())
}

/// One calendar month back, clamped at the epoch month (a no-op there).
pub fn previous_month(reference: NaiveDate) -> NaiveDate {
    if !prev_enabled(reference) {
        return reference;
    }
    reference
        .checked_sub_months(Months::new(1))
        .unwrap_or(reference)
}

pub fn next_month(reference: NaiveDate) -> NaiveDate {
    reference
        .checked_add_months(Months::new(1))
        .unwrap_or(reference)
}
