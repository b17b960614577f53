//! Configuration types for crypto-sentinel

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub price: PriceConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PriceConfig {
    #[serde(default = "default_price_url")]
    pub base_url: String,
    #[serde(default = "default_coin_id")]
    pub coin_id: String,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    #[serde(default = "default_price_timeout")]
    pub timeout_secs: u64,
}

fn default_price_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}
fn default_coin_id() -> String {
    "bitcoin".to_string()
}
fn default_vs_currency() -> String {
    "usd".to_string()
}
fn default_price_timeout() -> u64 {
    10
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_url: default_price_url(),
            coin_id: default_coin_id(),
            vs_currency: default_vs_currency(),
            timeout_secs: default_price_timeout(),
        }
    }
}

/// Text source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    /// RSS feeds polled first
    #[serde(default = "default_rss_sources")]
    pub rss_sources: Vec<String>,

    /// JSON news API used when RSS yields too little
    #[serde(default = "default_news_api_url")]
    pub news_api_url: String,

    /// Total RSS items, split evenly across feeds
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    #[serde(default = "default_max_news_articles")]
    pub max_news_articles: usize,

    /// Fall back to the news API below this many RSS items
    #[serde(default = "default_min_items_before_fallback")]
    pub min_items_before_fallback: usize,

    /// An RSS item is kept only if its title or description mentions one of these
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,

    /// Pause between RSS requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_rss_sources() -> Vec<String> {
    vec!["https://feeds.finance.yahoo.com/rss/2.0/headline?s=BTC-USD&region=US&lang=en-US".to_string()]
}
fn default_news_api_url() -> String {
    "https://min-api.cryptocompare.com/data/v2/news/?lang=EN&sortOrder=latest".to_string()
}
fn default_max_items() -> usize {
    20
}
fn default_max_news_articles() -> usize {
    15
}
fn default_min_items_before_fallback() -> usize {
    5
}
fn default_keywords() -> Vec<String> {
    vec!["bitcoin".to_string(), "btc".to_string(), "crypto".to_string()]
}
fn default_news_timeout() -> u64 {
    15
}
fn default_request_delay_ms() -> u64 {
    1000
}
fn default_user_agent() -> String {
    format!("crypto-sentinel/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            rss_sources: default_rss_sources(),
            news_api_url: default_news_api_url(),
            max_items: default_max_items(),
            max_news_articles: default_max_news_articles(),
            min_items_before_fallback: default_min_items_before_fallback(),
            keywords: default_keywords(),
            timeout_secs: default_news_timeout(),
            request_delay_ms: default_request_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Sentiment scoring configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentimentConfig {
    /// Score batches on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

/// CSV report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Local reports older than this are removed by `cleanup`
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data/reports")
}
fn default_retention_days() -> u64 {
    7
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            retention_days: default_retention_days(),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Key prefix; the date path and file name are appended
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_bucket() -> String {
    "crypto-sentinel-reports".to_string()
}
fn default_region() -> String {
    "us-east-1".to_string()
}
fn default_prefix() -> String {
    "reports/daily".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket: default_bucket(),
            region: default_region(),
            prefix: default_prefix(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port when set
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
