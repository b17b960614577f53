//! ETL run orchestration

use super::error::PipelineError;
use super::summary::{RunSummary, UploadStatus};
use crate::config::Config;
use crate::feed::{CoinGeckoFeed, PriceFeed};
use crate::news::NewsCollector;
use crate::report::CsvReportWriter;
use crate::sentiment::{BatchSummary, SentimentAnalyzer};
use crate::storage::{ObjectStore, S3Store};
use crate::telemetry::{record_batch, record_latency, set_gauge, GaugeMetric, LatencyMetric};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use std::time::Instant;
use uuid::Uuid;

/// Price → texts → sentiment → report → upload
pub struct EtlPipeline {
    price_feed: Box<dyn PriceFeed>,
    collector: NewsCollector,
    analyzer: SentimentAnalyzer,
    reports: CsvReportWriter,
    store: Option<Box<dyn ObjectStore>>,
    parallel: bool,
}

impl EtlPipeline {
    pub fn new(
        price_feed: Box<dyn PriceFeed>,
        collector: NewsCollector,
        analyzer: SentimentAnalyzer,
        reports: CsvReportWriter,
    ) -> Self {
        Self {
            price_feed,
            collector,
            analyzer,
            reports,
            store: None,
            parallel: false,
        }
    }

    /// Upload finished reports to `store`
    pub fn with_store(mut self, store: Box<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Score batches on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the production pipeline. S3 is used only when enabled in
    /// config and `upload` is set.
    pub async fn from_config(config: &Config, upload: bool) -> anyhow::Result<Self> {
        let feed = CoinGeckoFeed::new(config.price.clone())?;
        let collector = NewsCollector::from_config(&config.news)?;
        let reports = CsvReportWriter::new(config.report.output_dir.clone());

        let mut pipeline = Self::new(Box::new(feed), collector, SentimentAnalyzer::new(), reports)
            .with_parallel(config.sentiment.parallel);

        if upload && config.storage.enabled {
            pipeline = pipeline.with_store(Box::new(S3Store::from_config(&config.storage).await));
        } else if upload {
            tracing::info!("Storage disabled in config, reports stay local");
        }

        Ok(pipeline)
    }

    /// Execute one run
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let run_id = Uuid::new_v4();
        let timestamp = Utc::now();
        tracing::info!(%run_id, "Starting ETL run");

        // Price
        let start = Instant::now();
        let price = self
            .price_feed
            .fetch_price()
            .await
            .map_err(|e| PipelineError::Price(format!("{:#}", e)))?;
        record_latency(LatencyMetric::PriceFetch, start.elapsed());
        set_gauge(GaugeMetric::BtcPrice, price.price.to_f64().unwrap_or_default());

        // Texts
        let start = Instant::now();
        let items = self.collector.collect().await;
        record_latency(LatencyMetric::NewsFetch, start.elapsed());
        if items.is_empty() {
            return Err(PipelineError::NoTexts);
        }

        // Sentiment
        let start = Instant::now();
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        let scored = if self.parallel {
            self.analyzer.score_batch_parallel(&texts)
        } else {
            self.analyzer.score_batch(&texts)
        };
        record_latency(LatencyMetric::Scoring, start.elapsed());
        let sentiment = BatchSummary::from_records(&scored);
        record_batch(&sentiment);

        // Report
        let start = Instant::now();
        let report_path = self
            .reports
            .write(&price, &items, &scored, &sentiment)
            .map_err(|e| PipelineError::Report(format!("{:#}", e)))?;

        let upload = match &self.store {
            None => UploadStatus::Skipped,
            Some(store) => match store.upload(&report_path).await {
                Ok(receipt) => {
                    tracing::info!(
                        %run_id,
                        store = store.name(),
                        location = %receipt.location,
                        "Report uploaded"
                    );
                    UploadStatus::Uploaded(receipt)
                }
                Err(e) => {
                    tracing::warn!(
                        %run_id,
                        store = store.name(),
                        error = %format!("{:#}", e),
                        "Report upload failed"
                    );
                    UploadStatus::Failed {
                        error: format!("{:#}", e),
                    }
                }
            },
        };
        record_latency(LatencyMetric::Report, start.elapsed());

        let summary = RunSummary {
            run_id,
            timestamp,
            btc_price: price.price,
            total_texts: items.len(),
            avg_sentiment: sentiment.mean_polarity,
            sentiment,
            report_path,
            upload,
        };

        tracing::info!(
            %run_id,
            btc_price = %summary.btc_price,
            avg_sentiment = %format!("{:.3}", summary.avg_sentiment),
            total_texts = summary.total_texts,
            "ETL run complete"
        );

        Ok(summary)
    }
}
