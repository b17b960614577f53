//! Integration tests for CSV reports and retention

use chrono::{TimeZone, Utc};
use crypto_sentinel::feed::PriceSnapshot;
use crypto_sentinel::news::{TextItem, TextOrigin};
use crypto_sentinel::report::{cleanup_old_reports, CsvReportWriter, REPORT_COLUMNS};
use crypto_sentinel::sentiment::{
    BatchSummary, PolarityEngine, PolarityScore, SentimentAnalyzer, SentimentError,
};
use rust_decimal_macros::dec;
use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

struct NeutralEngine;

impl PolarityEngine for NeutralEngine {
    fn score(&self, _text: &str) -> Result<PolarityScore, SentimentError> {
        Ok(PolarityScore::default())
    }

    fn name(&self) -> &'static str {
        "neutral"
    }
}

fn snapshot() -> PriceSnapshot {
    PriceSnapshot {
        coin_id: "bitcoin".to_string(),
        currency: "usd".to_string(),
        price: dec!(68234.5),
        market_cap: dec!(1340000000000),
        volume_24h: dec!(25000000000),
        change_24h_pct: dec!(-1.25),
        timestamp: Utc::now(),
    }
}

fn item(text: &str, origin: TextOrigin) -> TextItem {
    TextItem {
        text: text.to_string(),
        description: String::new(),
        origin,
        published: String::new(),
        collected_at: Utc::now(),
    }
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[test]
fn test_report_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("reports");
    let writer = CsvReportWriter::new(&out);

    let long = format!("moon {}", "x".repeat(700));
    let items = vec![
        item("Bitcoin to the moon! Diamond hands HODL", TextOrigin::RssFeed),
        item("rug pull, rekt", TextOrigin::CryptoNews),
        item(&long, TextOrigin::RssFeed),
        item("a calm afternoon", TextOrigin::CryptoNews),
    ];
    let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
    let scored =
        SentimentAnalyzer::with_engine(Arc::new(NeutralEngine)).score_batch(&texts);
    let summary = BatchSummary::from_records(&scored);

    let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let path = writer
        .write_at(&snapshot(), &items, &scored, &summary, now)
        .unwrap();

    assert_eq!(
        path,
        out.join("crypto_sentinel_report_20240506_070809.csv")
    );

    let (headers, rows) = read_rows(&path);
    assert_eq!(headers, REPORT_COLUMNS);
    assert_eq!(rows.len(), 5);

    let first = &rows[0];
    assert_eq!(&first[0], "2024-05-06T07:08:09+00:00");
    assert_eq!(&first[1], "68234.5");
    assert_eq!(&first[4], "-1.25");
    assert_eq!(&first[5], "0");
    assert_eq!(&first[6], "Bitcoin to the moon! Diamond hands HODL");
    assert_eq!(&first[7], "rss_feed");
    assert_eq!(&first[8], "1.32");
    assert_eq!(&first[10], "positive");
    assert_eq!(&first[12], "enhanced_crypto");
    assert_eq!(&first[13], "3");
    assert_eq!(&first[14], "diamond hands, moon, hodl");
    assert_eq!(&first[15], "2.2");

    assert_eq!(&rows[1][7], "crypto_news");
    assert_eq!(&rows[1][10], "negative");

    // full item text, cut at 500 chars
    assert_eq!(rows[2][6].chars().count(), 500);

    assert_eq!(&rows[3][12], "generic_standard");
    assert_eq!(&rows[3][14], "");

    let summary_row = &rows[4];
    assert_eq!(&summary_row[0], "SUMMARY_20240506_070809");
    assert_eq!(&summary_row[1], "68234.5");
    assert_eq!(&summary_row[2], "");
    assert_eq!(
        &summary_row[6],
        "Analysis of 4 posts | Pos: 50.0% | Neg: 25.0%"
    );
    assert_eq!(&summary_row[10], "SUMMARY");
}

#[test]
fn test_empty_batch_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let writer = CsvReportWriter::new(dir.path());

    let path = writer
        .write(&snapshot(), &[], &[], &BatchSummary::default())
        .unwrap();

    let (headers, rows) = read_rows(&path);
    assert_eq!(headers.len(), REPORT_COLUMNS.len());
    assert!(rows.is_empty());
}

#[test]
fn test_cleanup_respects_retention() {
    let dir = tempfile::tempdir().unwrap();
    let writer = CsvReportWriter::new(dir.path());

    let old = writer
        .write_at(
            &snapshot(),
            &[],
            &[],
            &BatchSummary::default(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();
    let fresh = writer
        .write(&snapshot(), &[], &[], &BatchSummary::default())
        .unwrap();

    let ten_days_ago = SystemTime::now() - Duration::from_secs(10 * 86_400);
    File::options()
        .write(true)
        .open(&old)
        .unwrap()
        .set_modified(ten_days_ago)
        .unwrap();

    let removed = cleanup_old_reports(dir.path(), Duration::from_secs(7 * 86_400)).unwrap();

    assert_eq!(removed, 1);
    assert!(!old.exists());
    assert!(fresh.exists());
}
