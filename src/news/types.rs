//! Text source types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    RssFeed,
    CryptoNews,
}

impl TextOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextOrigin::RssFeed => "rss_feed",
            TextOrigin::CryptoNews => "crypto_news",
        }
    }
}

impl fmt::Display for TextOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A short text to be scored, usually a headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// Headline; this is what gets scored
    pub text: String,
    pub description: String,
    pub origin: TextOrigin,
    /// Publication date as reported by the source
    pub published: String,
    pub collected_at: DateTime<Utc>,
}
