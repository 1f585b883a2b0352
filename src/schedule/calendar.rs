//! Day-number to calendar-date mapping.
//!
//! The generator and the viewer only exchange a 1-based business-day index;
//! every presentation surface (table rows, calendar groups, dropdown labels,
//! exports) derives the real date from that index through this module. The
//! mapping must be identical everywhere for the views to agree.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Map a 1-based business-day index to a calendar date, skipping weekends.
///
/// Day 1 is `start` itself, even when `start` falls on a weekend: counting
/// only begins with the increments after the first day. `day < 1` is not a
/// valid index and returns `None`.
pub fn map_day_to_date(day: i64, start: NaiveDate) -> Option<NaiveDate> {
    if day < 1 {
        return None;
    }
    let mut date = start;
    let mut current = 1;
    while current < day {
        date = date + Duration::days(1);
        if !is_weekend(date) {
            current += 1;
        }
    }
    Some(date)
}

/// The single display format used for mapped dates across all surfaces.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
