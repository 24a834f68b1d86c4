//! Rolling per-asset price series with windowed-return queries

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, VecDeque};

use crate::asset::Asset;

/// Errors on history writes
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Out-of-order or duplicate timestamp for an asset
    #[error("stale sample for {asset}: {timestamp} is not after {last}")]
    StaleSample {
        asset: Asset,
        timestamp: DateTime<Utc>,
        last: DateTime<Utc>,
    },

    /// Prices must be strictly positive
    #[error("invalid price {price} for {asset}")]
    InvalidPrice { asset: Asset, price: Decimal },
}

/// Rolling price history for the whole universe
///
/// Samples older than the max-age window are evicted on append. Timestamps
/// must be strictly increasing per asset; violations are rejected, not
/// silently dropped, so the caller can log them.
pub struct PriceHistory {
    max_age: Duration,
    series: BTreeMap<Asset, VecDeque<(DateTime<Utc>, Decimal)>>,
}

impl PriceHistory {
    /// Create a history bounded to `max_age` of samples per asset
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            series: BTreeMap::new(),
        }
    }

    /// Append a sample for an asset, evicting anything older than the window
    pub fn append(
        &mut self,
        asset: &Asset,
        timestamp: DateTime<Utc>,
        price: Decimal,
    ) -> Result<(), HistoryError> {
        if price <= Decimal::ZERO {
            return Err(HistoryError::InvalidPrice {
                asset: asset.clone(),
                price,
            });
        }

        let series = self.series.entry(asset.clone()).or_default();
        if let Some((last, _)) = series.back() {
            if timestamp <= *last {
                return Err(HistoryError::StaleSample {
                    asset: asset.clone(),
                    timestamp,
                    last: *last,
                });
            }
        }

        series.push_back((timestamp, price));

        let cutoff = timestamp - self.max_age;
        while let Some((ts, _)) = series.front() {
            if *ts < cutoff {
                series.pop_front();
            } else {
                break;
            }
        }

        Ok(())
    }

    /// Return over `window` ending at `now`: `price_now / price_then - 1`
    ///
    /// `None` when the asset has no current sample or no sample at-or-before
    /// `now - window` (insufficient history).
    pub fn return_over(&self, asset: &Asset, window: Duration, now: DateTime<Utc>) -> Option<Decimal> {
        let series = self.series.get(asset)?;
        let (_, current) = series.back()?;
        let anchor = now - window;
        let past = series
            .iter()
            .rev()
            .find(|(ts, _)| *ts <= anchor)
            .map(|(_, price)| *price)?;
        if past <= Decimal::ZERO {
            return None;
        }
        Some(current / past - dec!(1))
    }

    /// Most recent price for an asset
    pub fn last_price(&self, asset: &Asset) -> Option<Decimal> {
        self.series.get(asset)?.back().map(|(_, price)| *price)
    }

    /// Number of samples held for an asset
    pub fn sample_count(&self, asset: &Asset) -> usize {
        self.series.get(asset).map_or(0, VecDeque::len)
    }
}
