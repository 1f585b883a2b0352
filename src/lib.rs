//! Volleyball schedule web app: library with models, schedule logic, the
//! generator job pipeline, and workbook export.

pub mod export;
pub mod job;
pub mod models;
pub mod schedule;

pub use export::assemble_workbook;
pub use job::{
    extract_grouping, extract_json_line, extract_schedule, run_generator, ExtractPolicy,
    ExtractionError, JobError,
};
pub use models::{
    FilterSpec, GroupingResult, NormalizedMatch, RawMatchRow, RecordRow, RecordTable,
    ScheduleResult,
};
pub use schedule::{
    apply_filter, convert_field, distinct_days, distinct_referees, distinct_teams, format_date,
    group_by_date, map_day_to_date, normalize_rows, split_matchup,
};
