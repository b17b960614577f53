//! CoinGecko REST price feed implementation

use super::{PriceFeed, PriceSnapshot};
use crate::config::PriceConfig;
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;

/// `/simple/price` response: coin id -> field -> value
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Price feed backed by CoinGecko's `/simple/price` endpoint
pub struct CoinGeckoFeed {
    config: PriceConfig,
    client: Client,
}

impl CoinGeckoFeed {
    /// Create a new feed from configuration
    pub fn new(config: PriceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("crypto-sentinel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/simple/price", self.config.base_url.trim_end_matches('/'))
    }

    /// Parse a `/simple/price` body. Missing fields become zero.
    fn parse_response(&self, body: &str) -> anyhow::Result<PriceSnapshot> {
        let response: SimplePriceResponse =
            serde_json::from_str(body).context("Invalid CoinGecko response")?;

        let empty = HashMap::new();
        let coin = response.get(&self.config.coin_id).unwrap_or(&empty);
        let vs = &self.config.vs_currency;
        let field = |suffix: &str| {
            coin.get(&format!("{}{}", vs, suffix))
                .copied()
                .and_then(Decimal::from_f64)
                .unwrap_or_default()
        };

        Ok(PriceSnapshot {
            coin_id: self.config.coin_id.clone(),
            currency: vs.clone(),
            price: field(""),
            market_cap: field("_market_cap"),
            volume_24h: field("_24h_vol"),
            change_24h_pct: field("_24h_change"),
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn fetch_price(&self) -> anyhow::Result<PriceSnapshot> {
        let url = self.endpoint();
        tracing::info!(coin = %self.config.coin_id, "Fetching current price");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.config.coin_id.as_str()),
                ("vs_currencies", self.config.vs_currency.as_str()),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
            ])
            .send()
            .await
            .context("Price request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("CoinGecko API error: {} - {}", status, body);
        }

        let body = response.text().await?;
        let snapshot = self.parse_response(&body)?;

        tracing::info!(
            price = %snapshot.price,
            change_24h_pct = %snapshot.change_24h_pct.round_dp(2),
            "Price fetched"
        );

        Ok(snapshot)
    }
}
