//! Price feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::asset::Asset;

/// One snapshot of last prices for the universe
#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    /// Last price per asset (USDT quote)
    pub prices: HashMap<Asset, Decimal>,
    /// Local timestamp when the snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Errors from the price feed
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Transport or HTTP status failure
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("malformed feed response: {0}")]
    Malformed(String),
}
