//! NormalizedMatch and FilterSpec.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A schedule row after normalization: teams split out, day mapped to a
/// calendar date, venue index converted to its display label.
///
/// Built once per result fetch and never patched incrementally; a new result
/// replaces the whole list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMatch {
    pub day: i64,
    pub team1: String,
    pub team2: String,
    pub referee: String,
    /// Display label for the venue: `"Venue {n+4}"`, `"-"` when the field is
    /// absent, or the raw value passed through when unparsable.
    pub venue: String,
    /// Mapped calendar date; `None` when the day index is invalid (< 1).
    pub date: Option<NaiveDate>,
    /// Formatted `date`, `"-"` when there is none.
    pub date_label: String,
}

/// One viewer filter state. `None` on a facet means "all" (no restriction);
/// an empty search string means no text filter.
///
/// Facet option domains are always derived from the unfiltered match list,
/// so narrowing one facet never shrinks another facet's choices.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSpec {
    pub day: Option<i64>,
    pub team: Option<String>,
    pub referee: Option<String>,
    pub search: String,
}
