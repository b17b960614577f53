//! Run summary, validation and digest

use super::error::PipelineError;
use crate::sentiment::BatchSummary;
use crate::storage::UploadReceipt;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Prices at or below this are treated as bad data
const MIN_PLAUSIBLE_PRICE: Decimal = dec!(1000);

/// Fewer texts than this makes the mean sentiment unreliable
const MIN_TEXTS: usize = 5;

/// A run with more failing checks than this is a failure
const MAX_WARNINGS: usize = 2;

/// Outcome of the report upload step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    /// No store configured or upload disabled
    Skipped,
    Uploaded(UploadReceipt),
    Failed { error: String },
}

impl UploadStatus {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadStatus::Uploaded(_))
    }
}

/// Result of one ETL run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub btc_price: Decimal,
    pub total_texts: usize,
    pub avg_sentiment: f64,
    pub sentiment: BatchSummary,
    pub report_path: PathBuf,
    pub upload: UploadStatus,
}

/// Overall verdict of the run checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    SuccessWithWarnings,
    Failure,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::SuccessWithWarnings => "success with warnings",
            RunStatus::Failure => "failure",
        }
    }
}

/// One sanity check on a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub passed: bool,
    pub message: String,
}

impl Check {
    fn new(passed: bool, ok: &str, warning: String) -> Self {
        let message = if passed { ok.to_string() } else { warning };
        Self { passed, message }
    }
}

/// All checks for a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub checks: Vec<Check>,
}

impl Validation {
    pub fn warnings(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.message.as_str())
            .collect()
    }

    pub fn status(&self) -> RunStatus {
        match self.warnings().len() {
            0 => RunStatus::Success,
            n if n <= MAX_WARNINGS => RunStatus::SuccessWithWarnings,
            _ => RunStatus::Failure,
        }
    }
}

impl RunSummary {
    /// Evaluate all sanity checks
    pub fn checks(&self) -> Validation {
        let checks = vec![
            Check::new(
                self.btc_price > MIN_PLAUSIBLE_PRICE,
                "BTC price plausible",
                format!("Suspicious BTC price: ${}", self.btc_price),
            ),
            Check::new(
                self.total_texts >= MIN_TEXTS,
                "Enough texts analyzed",
                format!("Few texts analyzed: {}", self.total_texts),
            ),
            Check::new(
                (-1.0..=1.0).contains(&self.avg_sentiment),
                "Mean sentiment within range",
                format!("Mean sentiment out of range: {:.4}", self.avg_sentiment),
            ),
            Check::new(
                self.upload.is_uploaded(),
                "Report uploaded",
                "Report upload not confirmed".to_string(),
            ),
        ];
        Validation { checks }
    }

    /// Evaluate checks and fail when more than two raise a warning
    pub fn validate(&self) -> Result<Validation, PipelineError> {
        let validation = self.checks();
        for check in &validation.checks {
            if check.passed {
                tracing::info!(run_id = %self.run_id, check = %check.message, "Check passed");
            } else {
                tracing::warn!(
                    run_id = %self.run_id,
                    check = %check.message,
                    "Check raised a warning"
                );
            }
        }

        if validation.status() == RunStatus::Failure {
            let warnings = validation.warnings().into_iter().map(String::from).collect();
            return Err(PipelineError::Validation(warnings));
        }
        Ok(validation)
    }

    /// Plain-text run digest
    pub fn render_text(&self) -> String {
        let validation = self.checks();
        let mut out = String::new();

        // write! into a String cannot fail
        let _ = writeln!(out, "crypto-sentinel run {}", self.run_id);
        let _ = writeln!(out, "Time: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "Status: {}", validation.status().as_str());
        let _ = writeln!(out);
        let _ = writeln!(out, "BTC price: ${:.2} USD", self.btc_price);
        let _ = writeln!(out, "Mean sentiment: {:.3}", self.avg_sentiment);
        let _ = writeln!(
            out,
            "Texts analyzed: {} ({} positive, {} negative, {} neutral)",
            self.total_texts,
            self.sentiment.positive,
            self.sentiment.negative,
            self.sentiment.neutral
        );
        let _ = writeln!(out, "Report: {}", self.report_path.display());
        let upload = match &self.upload {
            UploadStatus::Skipped => "skipped".to_string(),
            UploadStatus::Uploaded(receipt) => format!("uploaded to {}", receipt.location),
            UploadStatus::Failed { error } => format!("failed ({})", error),
        };
        let _ = writeln!(out, "Upload: {}", upload);
        let _ = writeln!(out);
        let _ = writeln!(out, "Checks:");
        for check in &validation.checks {
            let mark = if check.passed { "ok" } else { "warn" };
            let _ = writeln!(out, "  [{}] {}", mark, check.message);
        }

        out
    }
}
