//! Ranked per-tick leaderboard view
//!
//! Built for log/UI consumers alongside each decision record.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

use super::types::Score;
use crate::asset::Asset;
use crate::cost::CostModel;

/// One ranked row of the per-tick leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub asset: Asset,
    pub score: Decimal,
    pub ret_15m: Option<Decimal>,
    pub ret_1h: Option<Decimal>,
    pub ret_4h: Option<Decimal>,
    /// Edge over the held asset in basis points
    pub edge_bps: Decimal,
    /// Edge minus round-trip cost in basis points
    pub net_edge_bps: Decimal,
    pub eligible: bool,
}

/// Rank scores descending, ineligible assets last, ties broken lexically
pub fn build_leaderboard(
    scores: &BTreeMap<Asset, Score>,
    held: Option<&Asset>,
    cost: &CostModel,
) -> Vec<LeaderboardRow> {
    let held_score = held
        .and_then(|asset| scores.get(asset))
        .map(|score| score.value)
        .unwrap_or_default();

    let mut ranked: Vec<&Score> = scores.values().collect();
    // BTreeMap iteration is lexical, and the sort is stable, so equal
    // scores keep lexical order.
    ranked.sort_by(|a, b| {
        b.eligible
            .cmp(&a.eligible)
            .then(b.value.cmp(&a.value))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(idx, score)| {
            let edge_bps = (score.value - held_score) * dec!(10000);
            LeaderboardRow {
                rank: idx + 1,
                asset: score.asset.clone(),
                score: score.value,
                ret_15m: score.ret_15m,
                ret_1h: score.ret_1h,
                ret_4h: score.ret_4h,
                edge_bps,
                net_edge_bps: cost.net_edge_bps(edge_bps),
                eligible: score.eligible,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(base: &str, value: Decimal, eligible: bool) -> (Asset, Score) {
        let asset = Asset::new(base);
        (
            asset.clone(),
            Score {
                asset,
                value,
                ret_15m: Some(value),
                ret_1h: Some(value),
                ret_4h: Some(value),
                eligible,
            },
        )
    }

    #[test]
    fn test_ranked_by_score_descending() {
        let scores: BTreeMap<_, _> = [
            score("BTC", dec!(0.001), true),
            score("ETH", dec!(0.005), true),
            score("SOL", dec!(0.003), true),
        ]
        .into_iter()
        .collect();

        let board = build_leaderboard(&scores, None, &CostModel::default());
        assert_eq!(board[0].asset.as_str(), "ETH");
        assert_eq!(board[1].asset.as_str(), "SOL");
        assert_eq!(board[2].asset.as_str(), "BTC");
        assert_eq!(board[0].rank, 1);
    }

    #[test]
    fn test_ineligible_sorted_last() {
        let scores: BTreeMap<_, _> = [
            score("BTC", dec!(0.009), false),
            score("ETH", dec!(0.001), true),
        ]
        .into_iter()
        .collect();

        let board = build_leaderboard(&scores, None, &CostModel::default());
        assert_eq!(board[0].asset.as_str(), "ETH");
        assert!(!board[1].eligible);
    }

    #[test]
    fn test_edge_relative_to_held() {
        let scores: BTreeMap<_, _> = [
            score("BTC", dec!(0.002), true),
            score("ETH", dec!(0.010), true),
        ]
        .into_iter()
        .collect();

        let held = Asset::new("BTC");
        let board = build_leaderboard(&scores, Some(&held), &CostModel::default());
        // ETH leads: (0.010 - 0.002) * 10000 = 80 bps
        assert_eq!(board[0].edge_bps, dec!(80));
        // Default round trip is 29 bps
        assert_eq!(board[0].net_edge_bps, dec!(51));
    }
}
