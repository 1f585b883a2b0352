//! Calendar-style grouping of matches by mapped date.

use crate::models::NormalizedMatch;
use chrono::NaiveDate;

/// Group matches by their mapped calendar date, chronologically.
///
/// The underlying date value is the grouping key (not its formatted label,
/// so formatting can never split a date into two groups). Within a group,
/// matches keep their first-seen order. Rows without a mapped date are left
/// out of the calendar view.
pub fn group_by_date<'a>(
    matches: &[&'a NormalizedMatch],
) -> Vec<(NaiveDate, Vec<&'a NormalizedMatch>)> {
    let mut groups: Vec<(NaiveDate, Vec<&'a NormalizedMatch>)> = Vec::new();
    for &m in matches {
        let date = match m.date {
            Some(d) => d,
            None => continue,
        };
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, members)) => members.push(m),
            None => groups.push((date, vec![m])),
        }
    }
    groups.sort_by_key(|(d, _)| *d);
    groups
}
