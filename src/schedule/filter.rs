//! Faceted filtering over the normalized match list.

use crate::models::{FilterSpec, NormalizedMatch};

/// Apply a filter spec: facets AND together in fixed order (day, team,
/// referee, free text); the free-text term matches case-insensitively
/// against either team, the referee, or the venue label.
pub fn apply_filter<'a>(
    matches: &'a [NormalizedMatch],
    spec: &FilterSpec,
) -> Vec<&'a NormalizedMatch> {
    let search = spec.search.trim().to_lowercase();
    matches
        .iter()
        .filter(|m| spec.day.map_or(true, |d| m.day == d))
        .filter(|m| {
            spec.team
                .as_ref()
                .map_or(true, |t| m.team1 == *t || m.team2 == *t)
        })
        .filter(|m| spec.referee.as_ref().map_or(true, |r| m.referee == *r))
        .filter(|m| {
            if search.is_empty() {
                return true;
            }
            [&m.team1, &m.team2, &m.referee, &m.venue]
                .iter()
                .any(|s| s.to_lowercase().contains(&search))
        })
        .collect()
}

/// Distinct day indices in the full (unfiltered) list, sorted ascending.
pub fn distinct_days(matches: &[NormalizedMatch]) -> Vec<i64> {
    let mut days: Vec<i64> = matches.iter().map(|m| m.day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Distinct team names in the full list, sorted; blank names excluded.
pub fn distinct_teams(matches: &[NormalizedMatch]) -> Vec<String> {
    let mut teams: Vec<String> = matches
        .iter()
        .flat_map(|m| [m.team1.as_str(), m.team2.as_str()])
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    teams.sort();
    teams.dedup();
    teams
}

/// Distinct referee names in the full list, sorted; blank names excluded.
pub fn distinct_referees(matches: &[NormalizedMatch]) -> Vec<String> {
    let mut refs: Vec<String> = matches
        .iter()
        .filter(|m| !m.referee.is_empty())
        .map(|m| m.referee.clone())
        .collect();
    refs.sort();
    refs.dedup();
    refs
}
