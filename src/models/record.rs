//! Record tables and the two generator result shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One loosely-typed key→value row destined for a workbook sheet. Keys need
/// not be identical across rows; absent keys become blank cells. Key order is
/// the generator's emission order (serde_json `preserve_order`).
pub type RecordRow = serde_json::Map<String, Value>;

/// Blank spreadsheet cells reach us as JSON `null`; a degraded row must not
/// reject the whole batch, so nulls deserialize as empty strings.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered sequence of rows for one sheet. Row order is preserved end to end.
pub type RecordTable = Vec<RecordRow>;

/// One schedule row as emitted by the generator.
///
/// `Day` is a 1-based sequential business-day index; the real calendar date
/// is never exchanged with the generator, only derived from `Day` later.
/// `Field` is kept as a raw JSON value: the generator emits it as an integer
/// or a numeric string, and zero is a valid present value, so "missing" must
/// stay distinguishable from "0".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawMatchRow {
    #[serde(rename = "Day", default)]
    pub day: i64,
    #[serde(rename = "Field", default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Value>,
    /// `"<team1> vs <team2>"`; a missing separator degrades to empty names.
    #[serde(rename = "Match", default, deserialize_with = "null_as_empty")]
    pub matchup: String,
    #[serde(rename = "Referee", default, deserialize_with = "null_as_empty")]
    pub referee: String,
}

/// Output of a group-generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupingResult {
    pub grouping_data: RecordTable,
    pub ref_conflict_data: RecordTable,
}

/// Output of a schedule-generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub schedule_data: Vec<RawMatchRow>,
    pub ref_count_data: RecordTable,
    pub grouping_data: RecordTable,
}
