//! crypto-sentinel: Bitcoin news sentiment ETL
//!
//! This library provides the core components for:
//! - Crypto-aware sentiment scoring (lexicon, emoji and generic polarity blend)
//! - BTC price snapshots from CoinGecko
//! - Headline collection from RSS feeds with a news API fallback
//! - CSV reports with local retention
//! - Report upload to S3
//! - The ETL run orchestration and its sanity checks
//! - Full observability stack

pub mod cli;
pub mod config;
pub mod feed;
pub mod news;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod storage;
pub mod telemetry;
