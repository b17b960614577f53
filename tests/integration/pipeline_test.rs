//! End-to-end tests for the ETL pipeline with in-process collaborators

use async_trait::async_trait;
use chrono::Utc;
use crypto_sentinel::feed::{PriceFeed, PriceSnapshot};
use crypto_sentinel::news::{NewsCollector, TextItem, TextOrigin, TextSource};
use crypto_sentinel::pipeline::{EtlPipeline, PipelineError, RunStatus, UploadStatus};
use crypto_sentinel::report::{CsvReportWriter, REPORT_COLUMNS};
use crypto_sentinel::sentiment::{
    PolarityEngine, PolarityScore, SentimentAnalyzer, SentimentError,
};
use crypto_sentinel::storage::{LocalStore, ObjectStore, StoredObject, UploadReceipt};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;
use std::sync::Arc;

struct FixedPrice(Decimal);

#[async_trait]
impl PriceFeed for FixedPrice {
    async fn fetch_price(&self) -> anyhow::Result<PriceSnapshot> {
        Ok(PriceSnapshot {
            coin_id: "bitcoin".to_string(),
            currency: "usd".to_string(),
            price: self.0,
            market_cap: dec!(1340000000000),
            volume_24h: dec!(25000000000),
            change_24h_pct: dec!(2.5),
            timestamp: Utc::now(),
        })
    }
}

struct DownPrice;

#[async_trait]
impl PriceFeed for DownPrice {
    async fn fetch_price(&self) -> anyhow::Result<PriceSnapshot> {
        anyhow::bail!("503 Service Unavailable")
    }
}

struct Headlines {
    origin: TextOrigin,
    texts: Vec<&'static str>,
}

#[async_trait]
impl TextSource for Headlines {
    async fn fetch(&self) -> anyhow::Result<Vec<TextItem>> {
        Ok(self
            .texts
            .iter()
            .map(|t| TextItem {
                text: t.to_string(),
                description: String::new(),
                origin: self.origin,
                published: String::new(),
                collected_at: Utc::now(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "headlines"
    }
}

struct RejectingStore;

#[async_trait]
impl ObjectStore for RejectingStore {
    async fn upload(&self, _path: &Path) -> anyhow::Result<UploadReceipt> {
        anyhow::bail!("access denied")
    }

    async fn list(&self, _max_items: usize) -> anyhow::Result<Vec<StoredObject>> {
        anyhow::bail!("access denied")
    }

    async fn download(&self, _key: &str, _dest: &Path) -> anyhow::Result<u64> {
        anyhow::bail!("access denied")
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

struct NeutralEngine;

impl PolarityEngine for NeutralEngine {
    fn score(&self, _text: &str) -> Result<PolarityScore, SentimentError> {
        Ok(PolarityScore::default())
    }

    fn name(&self) -> &'static str {
        "neutral"
    }
}

const HEADLINES: [&str; 6] = [
    "Bitcoin to the moon",
    "rekt again",
    "quiet day",
    "bullish breakout",
    "market crash fears",
    "new wallet released",
];

fn rss(texts: Vec<&'static str>) -> Box<dyn TextSource> {
    Box::new(Headlines {
        origin: TextOrigin::RssFeed,
        texts,
    })
}

fn news(texts: Vec<&'static str>) -> Box<dyn TextSource> {
    Box::new(Headlines {
        origin: TextOrigin::CryptoNews,
        texts,
    })
}

fn analyzer() -> SentimentAnalyzer {
    SentimentAnalyzer::with_engine(Arc::new(NeutralEngine))
}

fn pipeline(
    price: Box<dyn PriceFeed>,
    collector: NewsCollector,
    reports_dir: &Path,
) -> EtlPipeline {
    EtlPipeline::new(price, collector, analyzer(), CsvReportWriter::new(reports_dir))
}

#[tokio::test]
async fn test_full_run_with_local_store() {
    let reports = tempfile::tempdir().unwrap();
    let bucket = tempfile::tempdir().unwrap();

    let collector = NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5);
    let pipeline = pipeline(Box::new(FixedPrice(dec!(68234.5))), collector, reports.path())
        .with_store(Box::new(LocalStore::new(bucket.path(), "reports/daily")));

    let summary = pipeline.run().await.unwrap();

    assert_eq!(summary.btc_price, dec!(68234.5));
    assert_eq!(summary.total_texts, 6);
    assert_eq!(summary.sentiment.positive, 2);
    assert_eq!(summary.sentiment.negative, 2);
    assert_eq!(summary.sentiment.neutral, 2);
    assert_eq!(summary.sentiment.enhanced, 5);
    assert!((summary.avg_sentiment - 0.01).abs() < 1e-9);
    assert!(summary.report_path.exists());

    let receipt = match &summary.upload {
        UploadStatus::Uploaded(receipt) => receipt,
        other => panic!("expected upload, got {:?}", other),
    };
    assert!(bucket.path().join(&receipt.key).exists());

    let validation = summary.validate().unwrap();
    assert_eq!(validation.status(), RunStatus::Success);

    let mut reader = csv::Reader::from_path(&summary.report_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, REPORT_COLUMNS);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 7);
    assert_eq!(&rows[6][10], "SUMMARY");
}

#[tokio::test]
async fn test_uploaded_report_can_be_listed_and_fetched() {
    let reports = tempfile::tempdir().unwrap();
    let bucket = tempfile::tempdir().unwrap();
    let fetched = tempfile::tempdir().unwrap();

    let collector = NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5);
    let summary = pipeline(Box::new(FixedPrice(dec!(68234.5))), collector, reports.path())
        .with_store(Box::new(LocalStore::new(bucket.path(), "reports/daily")))
        .run()
        .await
        .unwrap();

    let store = LocalStore::new(bucket.path(), "reports/daily");
    let listed = store.list(10).await.unwrap();
    assert_eq!(listed.len(), 1);
    let object = &listed[0];
    match &summary.upload {
        UploadStatus::Uploaded(receipt) => assert_eq!(receipt.key, object.key),
        other => panic!("expected upload, got {:?}", other),
    }

    let dest = fetched.path().join("copy.csv");
    let written = store.download(&object.key, &dest).await.unwrap();
    assert_eq!(written, object.size_bytes);
    assert_eq!(
        std::fs::read(&dest).unwrap(),
        std::fs::read(&summary.report_path).unwrap()
    );
}

#[tokio::test]
async fn test_fallback_source_fills_batch() {
    let reports = tempfile::tempdir().unwrap();
    let collector = NewsCollector::new(
        vec![rss(vec!["moon", "rekt"])],
        Some(news(vec!["hodl", "fud", "dip", "rally"])),
        5,
    );

    let summary = pipeline(Box::new(FixedPrice(dec!(50000))), collector, reports.path())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total_texts, 6);
    assert_eq!(summary.upload, UploadStatus::Skipped);

    let mut reader = csv::Reader::from_path(&summary.report_path).unwrap();
    let sources: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[7].to_string())
        .collect();
    assert_eq!(
        sources,
        vec![
            "rss_feed",
            "rss_feed",
            "crypto_news",
            "crypto_news",
            "crypto_news",
            "crypto_news",
            ""
        ]
    );
}

#[tokio::test]
async fn test_no_texts_is_fatal() {
    let reports = tempfile::tempdir().unwrap();
    let collector = NewsCollector::new(vec![rss(vec![])], Some(news(vec![])), 5);

    let result = pipeline(Box::new(FixedPrice(dec!(50000))), collector, reports.path())
        .run()
        .await;

    assert!(matches!(result, Err(PipelineError::NoTexts)));
    assert_eq!(std::fs::read_dir(reports.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_price_failure_is_fatal() {
    let reports = tempfile::tempdir().unwrap();
    let collector = NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5);

    let result = pipeline(Box::new(DownPrice), collector, reports.path())
        .run()
        .await;

    match result {
        Err(PipelineError::Price(msg)) => assert!(msg.contains("503")),
        other => panic!("expected price error, got {:?}", other.map(|s| s.run_id)),
    }
}

#[tokio::test]
async fn test_upload_failure_is_recorded() {
    let reports = tempfile::tempdir().unwrap();
    let collector = NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5);

    let summary = pipeline(Box::new(FixedPrice(dec!(68234.5))), collector, reports.path())
        .with_store(Box::new(RejectingStore))
        .run()
        .await
        .unwrap();

    assert_eq!(
        summary.upload,
        UploadStatus::Failed {
            error: "access denied".to_string()
        }
    );
    assert!(summary.report_path.exists());

    let validation = summary.validate().unwrap();
    assert_eq!(validation.status(), RunStatus::SuccessWithWarnings);
    assert!(summary.render_text().contains("Upload: failed (access denied)"));
}

#[tokio::test]
async fn test_parallel_run_matches_sequential() {
    let reports = tempfile::tempdir().unwrap();

    let sequential = pipeline(
        Box::new(FixedPrice(dec!(68234.5))),
        NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5),
        reports.path(),
    )
    .run()
    .await
    .unwrap();

    let parallel = pipeline(
        Box::new(FixedPrice(dec!(68234.5))),
        NewsCollector::new(vec![rss(HEADLINES.to_vec())], None, 5),
        reports.path(),
    )
    .with_parallel(true)
    .run()
    .await
    .unwrap();

    assert_eq!(sequential.sentiment, parallel.sentiment);
    assert_ne!(sequential.run_id, parallel.run_id);
}
