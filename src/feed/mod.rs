//! Price feed module
//!
//! Fetches the current BTC price from the CoinGecko REST API

mod coingecko;
mod types;

pub use coingecko::CoinGeckoFeed;
pub use types::PriceSnapshot;

use async_trait::async_trait;

/// Trait for price feed implementations
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest price snapshot
    async fn fetch_price(&self) -> anyhow::Result<PriceSnapshot>;
}
