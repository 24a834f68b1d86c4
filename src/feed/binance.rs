//! Binance REST price feed

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use super::types::{FeedError, PriceSnapshot};
use super::PriceFeed;
use crate::asset::Asset;

/// Binance public API base URL
const BINANCE_API_URL: &str = "https://api.binance.com";

/// One entry of the `/api/v3/ticker/price` response
#[derive(Debug, Deserialize)]
struct TickerPrice {
    symbol: String,
    price: String,
}

/// Polling feed over the Binance spot ticker endpoint
pub struct BinanceRestFeed {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceRestFeed {
    /// Create a feed with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        Self::with_base_url(BINANCE_API_URL, timeout)
    }

    /// Create a feed against a custom endpoint (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Compact JSON array of exchange symbols, as the endpoint expects
    fn symbols_param(universe: &[Asset]) -> String {
        let symbols: Vec<String> = universe.iter().map(Asset::symbol).collect();
        serde_json::to_string(&symbols).unwrap_or_default()
    }

    /// Map ticker entries back onto universe assets
    ///
    /// Unparseable or non-positive prices are skipped with a warning so one
    /// bad symbol cannot poison the whole snapshot.
    fn parse_tickers(tickers: Vec<TickerPrice>) -> HashMap<Asset, Decimal> {
        let mut prices = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            let Some(asset) = Asset::from_symbol(&ticker.symbol) else {
                tracing::warn!(symbol = %ticker.symbol, "Unexpected symbol in ticker response");
                continue;
            };
            match Decimal::from_str(&ticker.price) {
                Ok(price) if price > Decimal::ZERO => {
                    prices.insert(asset, price);
                }
                _ => {
                    tracing::warn!(
                        symbol = %ticker.symbol,
                        price = %ticker.price,
                        "Skipping unparseable ticker price"
                    );
                }
            }
        }
        prices
    }
}

#[async_trait]
impl PriceFeed for BinanceRestFeed {
    async fn fetch_last_prices(&self, universe: &[Asset]) -> Result<PriceSnapshot, FeedError> {
        let url = format!("{}/api/v3/ticker/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", Self::symbols_param(universe))])
            .send()
            .await?
            .error_for_status()?;

        let tickers: Vec<TickerPrice> = response.json().await?;
        if tickers.is_empty() {
            return Err(FeedError::Malformed("empty ticker array".to_string()));
        }

        Ok(PriceSnapshot {
            prices: Self::parse_tickers(tickers),
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_symbols_param_is_compact_json() {
        let universe = vec![Asset::new("BTC"), Asset::new("ETH")];
        assert_eq!(
            BinanceRestFeed::symbols_param(&universe),
            r#"["BTCUSDT","ETHUSDT"]"#
        );
    }

    #[test]
    fn test_parse_valid_tickers() {
        let tickers = vec![
            TickerPrice {
                symbol: "BTCUSDT".to_string(),
                price: "65000.10".to_string(),
            },
            TickerPrice {
                symbol: "ETHUSDT".to_string(),
                price: "3200.5".to_string(),
            },
        ];

        let prices = BinanceRestFeed::parse_tickers(tickers);
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[&Asset::new("BTC")], dec!(65000.10));
    }

    #[test]
    fn test_parse_skips_bad_price() {
        let tickers = vec![
            TickerPrice {
                symbol: "BTCUSDT".to_string(),
                price: "not_a_number".to_string(),
            },
            TickerPrice {
                symbol: "ETHUSDT".to_string(),
                price: "3200.5".to_string(),
            },
        ];

        let prices = BinanceRestFeed::parse_tickers(tickers);
        assert_eq!(prices.len(), 1);
        assert!(prices.contains_key(&Asset::new("ETH")));
    }

    #[test]
    fn test_parse_skips_zero_price() {
        let tickers = vec![TickerPrice {
            symbol: "BTCUSDT".to_string(),
            price: "0".to_string(),
        }];
        assert!(BinanceRestFeed::parse_tickers(tickers).is_empty());
    }

    #[test]
    fn test_parse_skips_foreign_symbol() {
        let tickers = vec![TickerPrice {
            symbol: "BTCEUR".to_string(),
            price: "60000".to_string(),
        }];
        assert!(BinanceRestFeed::parse_tickers(tickers).is_empty());
    }

    #[test]
    fn test_ticker_deserialization() {
        let json = r#"[{"symbol":"BTCUSDT","price":"65000.10"}]"#;
        let tickers: Vec<TickerPrice> = serde_json::from_str(json).unwrap();
        assert_eq!(tickers[0].symbol, "BTCUSDT");
        assert_eq!(tickers[0].price, "65000.10");
    }
}
