//! Momentum score calculation

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::types::Score;
use crate::asset::Asset;
use crate::config::ScoringConfig;
use crate::history::PriceHistory;

/// Weighted three-window momentum scorer
///
/// Pure function of history and clock: identical inputs always produce
/// identical scores.
pub struct Scorer {
    win_15m: Duration,
    win_1h: Duration,
    win_4h: Duration,
    weight_15m: Decimal,
    weight_1h: Decimal,
    weight_4h: Decimal,
}

impl Scorer {
    /// Build a scorer from the scoring configuration
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            win_15m: Duration::seconds(config.ret_15m_secs as i64),
            win_1h: Duration::seconds(config.ret_1h_secs as i64),
            win_4h: Duration::seconds(config.ret_4h_secs as i64),
            weight_15m: config.weight_15m,
            weight_1h: config.weight_1h,
            weight_4h: config.weight_4h,
        }
    }

    /// Score every asset in the universe against the current history
    ///
    /// BTreeMap keeps iteration order lexical, which downstream leader
    /// selection relies on for deterministic tie-breaking.
    pub fn score_all(
        &self,
        universe: &[Asset],
        history: &PriceHistory,
        now: DateTime<Utc>,
    ) -> BTreeMap<Asset, Score> {
        universe
            .iter()
            .map(|asset| (asset.clone(), self.score(asset, history, now)))
            .collect()
    }

    fn score(&self, asset: &Asset, history: &PriceHistory, now: DateTime<Utc>) -> Score {
        let ret_15m = history.return_over(asset, self.win_15m, now);
        let ret_1h = history.return_over(asset, self.win_1h, now);
        let ret_4h = history.return_over(asset, self.win_4h, now);

        let eligible = ret_15m.is_some() && ret_1h.is_some() && ret_4h.is_some();

        let value = self.weight_15m * ret_15m.unwrap_or_default()
            + self.weight_1h * ret_1h.unwrap_or_default()
            + self.weight_4h * ret_4h.unwrap_or_default();

        Score {
            asset: asset.clone(),
            value,
            ret_15m,
            ret_1h,
            ret_4h,
            eligible,
        }
    }
}
