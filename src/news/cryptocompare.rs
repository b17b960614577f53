//! CryptoCompare news API text source

use super::{TextItem, TextOrigin, TextSource};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

/// Article bodies are cut to this many characters
const BODY_CHARS: usize = 400;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data", default)]
    data: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    published_on: i64,
}

/// Latest crypto headlines from the CryptoCompare news endpoint
pub struct CryptoCompareSource {
    url: String,
    client: Client,
    max_articles: usize,
}

impl CryptoCompareSource {
    pub fn new(url: impl Into<String>, client: Client, max_articles: usize) -> Self {
        Self {
            url: url.into(),
            client,
            max_articles,
        }
    }
}

#[async_trait]
impl TextSource for CryptoCompareSource {
    async fn fetch(&self) -> anyhow::Result<Vec<TextItem>> {
        tracing::info!(url = %self.url, "Fetching crypto news");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("News API request failed")?
            .error_for_status()?;

        let body = response.text().await?;
        parse_articles(&body, self.max_articles)
    }

    fn name(&self) -> &str {
        "cryptocompare"
    }
}

/// Parse a news API body, keeping the first `max` articles with a title
pub fn parse_articles(body: &str, max: usize) -> anyhow::Result<Vec<TextItem>> {
    let response: NewsResponse =
        serde_json::from_str(body).context("Invalid news API response")?;
    let collected_at = Utc::now();

    let items = response
        .data
        .into_iter()
        .take(max)
        .filter(|a| !a.title.trim().is_empty())
        .map(|a| TextItem {
            text: a.title,
            description: truncate_chars(&a.body, BODY_CHARS),
            origin: TextOrigin::CryptoNews,
            published: DateTime::from_timestamp(a.published_on, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            collected_at,
        })
        .collect();

    Ok(items)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s.to_string(),
    }
}
