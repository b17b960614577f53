//! Pipeline error types

use thiserror::Error;

/// Conditions that end a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("price fetch failed: {0}")]
    Price(String),

    #[error("no texts collected from any source")]
    NoTexts,

    #[error("report generation failed: {0}")]
    Report(String),

    #[error("{} validation checks failed: {}", .0.len(), .0.join("; "))]
    Validation(Vec<String>),
}
