//! Text sources
//!
//! Collects short crypto texts (headlines) from RSS feeds, falling back to a
//! JSON news API when the feeds yield too little.

mod cryptocompare;
mod rss;
mod types;

pub use cryptocompare::{parse_articles, CryptoCompareSource};
pub use rss::{parse_feed, RssSource};
pub use types::{TextItem, TextOrigin};

use crate::config::NewsConfig;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Trait for text source implementations
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<TextItem>>;

    /// Identifier used in logs
    fn name(&self) -> &str;
}

/// Gathers texts from primary sources with an optional fallback
pub struct NewsCollector {
    primary: Vec<Box<dyn TextSource>>,
    fallback: Option<Box<dyn TextSource>>,
    min_items: usize,
    delay: Duration,
}

impl NewsCollector {
    pub fn new(
        primary: Vec<Box<dyn TextSource>>,
        fallback: Option<Box<dyn TextSource>>,
        min_items: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            min_items,
            delay: Duration::ZERO,
        }
    }

    /// Pause between primary source requests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// RSS feeds from config, with the news API as fallback
    pub fn from_config(config: &NewsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        let per_feed = config.max_items / config.rss_sources.len().max(1);
        let primary = config
            .rss_sources
            .iter()
            .map(|url| {
                Box::new(RssSource::new(
                    url.as_str(),
                    client.clone(),
                    per_feed,
                    config.keywords.clone(),
                )) as Box<dyn TextSource>
            })
            .collect();

        let fallback: Box<dyn TextSource> = Box::new(CryptoCompareSource::new(
            config.news_api_url.as_str(),
            client,
            config.max_news_articles,
        ));

        Ok(Self::new(primary, Some(fallback), config.min_items_before_fallback)
            .with_delay(Duration::from_millis(config.request_delay_ms)))
    }

    /// Collect texts. A failing source is logged and skipped.
    pub async fn collect(&self) -> Vec<TextItem> {
        let mut items = Vec::new();

        for (i, source) in self.primary.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match source.fetch().await {
                Ok(batch) => {
                    tracing::info!(source = source.name(), count = batch.len(), "Collected texts");
                    items.extend(batch);
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Text source failed");
                }
            }
        }

        if items.len() < self.min_items {
            if let Some(fallback) = &self.fallback {
                tracing::info!(
                    found = items.len(),
                    min = self.min_items,
                    source = fallback.name(),
                    "Too few texts, using fallback source"
                );
                match fallback.fetch().await {
                    Ok(batch) => items.extend(batch),
                    Err(e) => {
                        tracing::warn!(source = fallback.name(), error = %e, "Fallback source failed");
                    }
                }
            }
        }

        tracing::info!(total = items.len(), "Text collection complete");
        items
    }
}
