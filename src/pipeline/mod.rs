//! ETL pipeline
//!
//! One run fetches the BTC price, collects texts, scores them, writes a CSV
//! report and optionally uploads it. The run summary carries the sanity
//! checks and a plain-text digest.

mod error;
mod etl;
mod summary;

pub use error::PipelineError;
pub use etl::EtlPipeline;
pub use summary::{Check, RunStatus, RunSummary, UploadStatus, Validation};
