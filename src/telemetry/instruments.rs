//! Prometheus metrics

use crate::sentiment::{BatchSummary, Method};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Price API round trip
    PriceFetch,
    /// All text sources combined
    NewsFetch,
    /// Scoring one batch
    Scoring,
    /// Report write plus upload
    Report,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Last observed BTC price
    BtcPrice,
    /// Mean polarity of the last batch
    MeanPolarity,
    /// Texts in the last batch
    BatchSize,
}

/// Start the Prometheus HTTP exporter. Must run inside a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::PriceFetch => "sentinel_price_fetch_latency_ms",
        LatencyMetric::NewsFetch => "sentinel_news_fetch_latency_ms",
        LatencyMetric::Scoring => "sentinel_scoring_latency_ms",
        LatencyMetric::Report => "sentinel_report_latency_ms",
    };

    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::BtcPrice => "sentinel_btc_price_usd",
        GaugeMetric::MeanPolarity => "sentinel_mean_polarity",
        GaugeMetric::BatchSize => "sentinel_batch_size",
    };

    metrics::gauge!(metric_name).set(value);
}

/// Count scored texts by method and label
pub fn record_batch(summary: &BatchSummary) {
    let by_method = [
        (Method::EnhancedCrypto, summary.enhanced),
        (Method::ErrorFallback, summary.fallbacks),
        (
            Method::GenericStandard,
            summary.total - summary.enhanced - summary.fallbacks,
        ),
    ];
    for (method, count) in by_method {
        metrics::counter!("sentinel_texts_scored_total", "method" => method.as_str())
            .increment(count as u64);
    }

    metrics::counter!("sentinel_labels_total", "label" => "positive")
        .increment(summary.positive as u64);
    metrics::counter!("sentinel_labels_total", "label" => "negative")
        .increment(summary.negative as u64);
    metrics::counter!("sentinel_labels_total", "label" => "neutral")
        .increment(summary.neutral as u64);

    set_gauge(GaugeMetric::MeanPolarity, summary.mean_polarity);
    set_gauge(GaugeMetric::BatchSize, summary.total as f64);
}
