//! Price feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time market data for one coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Coin identifier (e.g., "bitcoin")
    pub coin_id: String,
    /// Quote currency (e.g., "usd")
    pub currency: String,
    pub price: Decimal,
    pub market_cap: Decimal,
    pub volume_24h: Decimal,
    /// 24h price change in percent
    pub change_24h_pct: Decimal,
    /// Local timestamp when the snapshot was taken
    pub timestamp: DateTime<Utc>,
}
