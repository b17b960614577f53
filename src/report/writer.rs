//! CSV report writer

use crate::feed::PriceSnapshot;
use crate::news::TextItem;
use crate::sentiment::{BatchSummary, ScoredText};
use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Header row, in column order
pub const REPORT_COLUMNS: [&str; 17] = [
    "timestamp",
    "btc_price_usd",
    "btc_market_cap",
    "btc_volume_24h",
    "btc_change_24h_pct",
    "text_index",
    "text",
    "text_source",
    "sentiment_polarity",
    "sentiment_subjectivity",
    "sentiment_label",
    "sentiment_confidence",
    "analysis_method",
    "crypto_matches",
    "crypto_terms_found",
    "crypto_score",
    "emoji_score",
];

/// Texts longer than this are cut in the report
const TEXT_CHARS: usize = 500;

const FILE_PREFIX: &str = "crypto_sentinel_report";

/// One CSV line. Optional fields stay empty on the summary row.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    timestamp: String,
    btc_price_usd: Decimal,
    btc_market_cap: Option<Decimal>,
    btc_volume_24h: Option<Decimal>,
    btc_change_24h_pct: Option<Decimal>,
    text_index: Option<usize>,
    text: String,
    text_source: Option<&'a str>,
    sentiment_polarity: f64,
    sentiment_subjectivity: Option<f64>,
    sentiment_label: &'a str,
    sentiment_confidence: Option<&'a str>,
    analysis_method: Option<&'a str>,
    crypto_matches: Option<usize>,
    crypto_terms_found: Option<String>,
    crypto_score: Option<f64>,
    emoji_score: Option<f64>,
}

/// Writes run reports into a directory
pub struct CsvReportWriter {
    output_dir: PathBuf,
}

impl CsvReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Report path for a run started at `timestamp`
    pub fn file_path(&self, timestamp: DateTime<Utc>) -> PathBuf {
        let filename = format!("{}_{}.csv", FILE_PREFIX, stamp(timestamp));
        self.output_dir.join(filename)
    }

    /// Write a report stamped with the current time
    pub fn write(
        &self,
        price: &PriceSnapshot,
        items: &[TextItem],
        scored: &[ScoredText],
        summary: &BatchSummary,
    ) -> anyhow::Result<PathBuf> {
        self.write_at(price, items, scored, summary, Utc::now())
    }

    /// Write a report for a run started at `now`.
    ///
    /// `scored[i].text_index` indexes into `items`; the full item text is
    /// reported rather than the scored preview.
    pub fn write_at(
        &self,
        price: &PriceSnapshot,
        items: &[TextItem],
        scored: &[ScoredText],
        summary: &BatchSummary,
        now: DateTime<Utc>,
    ) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create report directory {}", self.output_dir.display())
        })?;

        let path = self.file_path(now);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(REPORT_COLUMNS)?;

        let row_timestamp = now.to_rfc3339();
        for s in scored {
            let item = items.get(s.text_index);
            let record = &s.record;
            writer.serialize(ReportRow {
                timestamp: row_timestamp.clone(),
                btc_price_usd: price.price,
                btc_market_cap: Some(price.market_cap),
                btc_volume_24h: Some(price.volume_24h),
                btc_change_24h_pct: Some(price.change_24h_pct),
                text_index: Some(s.text_index),
                text: truncate_chars(
                    item.map_or(s.original_text.as_str(), |i| i.text.as_str()),
                    TEXT_CHARS,
                ),
                text_source: Some(item.map_or("unknown", |i| i.origin.as_str())),
                sentiment_polarity: record.polarity,
                sentiment_subjectivity: Some(record.subjectivity),
                sentiment_label: record.label.as_str(),
                sentiment_confidence: Some(record.confidence.as_str()),
                analysis_method: Some(record.method.as_str()),
                crypto_matches: Some(record.match_count),
                crypto_terms_found: Some(record.terms_joined()),
                crypto_score: Some(record.crypto_score),
                emoji_score: Some(record.emoji_score),
            })?;
        }

        if !scored.is_empty() {
            writer.serialize(summary_row(price, summary, now))?;
        }

        writer.flush()?;

        tracing::info!(path = %path.display(), rows = scored.len(), "Report written");
        Ok(path)
    }
}

fn summary_row<'a>(
    price: &PriceSnapshot,
    summary: &BatchSummary,
    now: DateTime<Utc>,
) -> ReportRow<'a> {
    ReportRow {
        timestamp: format!("SUMMARY_{}", stamp(now)),
        btc_price_usd: price.price,
        btc_market_cap: None,
        btc_volume_24h: None,
        btc_change_24h_pct: None,
        text_index: None,
        text: format!(
            "Analysis of {} posts | Pos: {:.1}% | Neg: {:.1}%",
            summary.total,
            summary.positive_ratio() * 100.0,
            summary.negative_ratio() * 100.0
        ),
        text_source: None,
        sentiment_polarity: summary.mean_polarity,
        sentiment_subjectivity: None,
        sentiment_label: "SUMMARY",
        sentiment_confidence: None,
        analysis_method: None,
        crypto_matches: None,
        crypto_terms_found: None,
        crypto_score: None,
        emoji_score: None,
    }
}

fn stamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d_%H%M%S").to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s.to_string(),
    }
}
