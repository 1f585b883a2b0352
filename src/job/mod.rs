//! Generator invocation and result extraction.

mod extract;
mod runner;

pub use extract::{
    extract_grouping, extract_json_line, extract_schedule, ExtractPolicy, ExtractionError,
};
pub use runner::{run_generator, JobError};
