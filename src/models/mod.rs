//! Data structures for the schedule pipeline: record tables, raw generator
//! rows, result shapes, and the viewer's filter model.

mod matches;
mod record;

pub use matches::{FilterSpec, NormalizedMatch};
pub use record::{GroupingResult, RawMatchRow, RecordRow, RecordTable, ScheduleResult};
