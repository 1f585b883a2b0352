//! Extracting the JSON payload line from generator output.
//!
//! The generator interleaves progress/diagnostic lines with exactly one JSON
//! payload line on stdout, without a distinguishing sentinel. Two extraction
//! policies exist because the two endpoints historically diverged in
//! trailing-brace strictness; they are kept as distinct named strategies
//! rather than unified, since they differ in tolerance to truncated output.

use crate::models::{GroupingResult, ScheduleResult};
use serde_json::Value;

/// How to pick the payload line out of the raw output text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractPolicy {
    /// Candidate lines start with `{` and end with `}`; the last candidate
    /// wins (later output overrides earlier retries).
    BraceBounded,
    /// The last line starting with `{` wins, trailing brace not required.
    Prefix,
}

#[derive(Debug)]
pub enum ExtractionError {
    /// No line matched the policy's candidate shape.
    NoCandidate,
    /// The chosen candidate did not parse as a JSON object.
    MalformedJson(serde_json::Error),
    /// Parsed fine but did not match the expected result shape.
    UnexpectedShape(serde_json::Error),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::NoCandidate => write!(f, "no JSON payload line in generator output"),
            ExtractionError::MalformedJson(e) => write!(f, "malformed JSON payload: {}", e),
            ExtractionError::UnexpectedShape(e) => write!(f, "unexpected payload shape: {}", e),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Pick and parse the payload line per the given policy.
pub fn extract_json_line(output: &str, policy: ExtractPolicy) -> Result<Value, ExtractionError> {
    let candidate = match policy {
        ExtractPolicy::BraceBounded => output
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with('{') && line.ends_with('}'))
            .last(),
        ExtractPolicy::Prefix => output
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| line.starts_with('{')),
    };
    let line = candidate.ok_or(ExtractionError::NoCandidate)?;
    serde_json::from_str(line).map_err(ExtractionError::MalformedJson)
}

/// Extract a grouping result (groups endpoint: brace-bounded policy).
pub fn extract_grouping(output: &str) -> Result<GroupingResult, ExtractionError> {
    let value = extract_json_line(output, ExtractPolicy::BraceBounded)?;
    serde_json::from_value(value).map_err(ExtractionError::UnexpectedShape)
}

/// Extract a schedule result (schedule endpoint: prefix policy).
pub fn extract_schedule(output: &str) -> Result<ScheduleResult, ExtractionError> {
    let value = extract_json_line(output, ExtractPolicy::Prefix)?;
    serde_json::from_value(value).map_err(ExtractionError::UnexpectedShape)
}
