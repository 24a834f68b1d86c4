//! Price feed
//!
//! Pulls last-trade prices for the whole universe from the Binance public
//! REST API. The feed is the only I/O on the tick path; failures surface
//! as errors for the orchestrator to absorb, never as crashes.

mod binance;
mod types;

pub use binance::BinanceRestFeed;
pub use types::{FeedError, PriceSnapshot};

use crate::asset::Asset;
use async_trait::async_trait;

/// Trait for price feed implementations
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest price for every asset in the universe
    async fn fetch_last_prices(&self, universe: &[Asset]) -> Result<PriceSnapshot, FeedError>;
}
