//! Raw generator rows → normalized match records.

use crate::models::{NormalizedMatch, RawMatchRow};
use crate::schedule::calendar::{format_date, map_day_to_date};
use chrono::NaiveDate;
use serde_json::Value;

/// Split a `"<team1> vs <team2>"` matchup into trimmed team names. A missing
/// separator yields two empty names rather than an error.
pub fn split_matchup(matchup: &str) -> (String, String) {
    match matchup.split_once(" vs ") {
        Some((a, b)) => (a.trim().to_string(), b.trim().to_string()),
        None => (String::new(), String::new()),
    }
}

/// Convert a raw venue index to its display label.
///
/// Absent → `"-"`. Integer or numeric string `n` → `"Venue {n+4}"` (zero is
/// a valid present index). Anything unparsable passes through unchanged.
pub fn convert_field(field: Option<&Value>) -> String {
    let value = match field {
        None | Some(Value::Null) => return "-".to_string(),
        Some(v) => v,
    };
    if let Some(n) = value.as_i64() {
        return format!("Venue {}", n + 4);
    }
    if let Some(f) = value.as_f64() {
        return format!("Venue {}", f as i64 + 4);
    }
    match value.as_str() {
        Some(s) => match s.trim().parse::<i64>() {
            Ok(n) => format!("Venue {}", n + 4),
            Err(_) => s.to_string(),
        },
        None => value.to_string(),
    }
}

/// Normalize a batch of raw rows. Total: malformed rows degrade to
/// blank-field records, the batch is never rejected.
pub fn normalize_rows(rows: &[RawMatchRow], start: NaiveDate) -> Vec<NormalizedMatch> {
    rows.iter()
        .map(|row| {
            let (team1, team2) = split_matchup(&row.matchup);
            let date = map_day_to_date(row.day, start);
            NormalizedMatch {
                day: row.day,
                team1,
                team2,
                referee: row.referee.clone(),
                venue: convert_field(row.field.as_ref()),
                date,
                date_label: date.map_or_else(|| "-".to_string(), format_date),
            }
        })
        .collect()
}
