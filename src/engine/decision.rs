//! Gate-ordered switch evaluation

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::types::{Decision, Evaluation, HoldReason, RotationState};
use crate::asset::Asset;
use crate::config::EngineConfig;
use crate::cost::CostModel;
use crate::score::Score;

/// Engine thresholds and timers, fixed for the life of the engine
#[derive(Debug, Clone)]
pub struct EngineParams {
    pub edge_threshold_bps: Decimal,
    pub net_edge_gate_enabled: bool,
    pub net_edge_threshold_bps: Decimal,
    pub confirm_n: u32,
    pub min_hold: Duration,
    pub cooldown: Duration,
    pub max_switches_per_day: u32,
}

impl From<&EngineConfig> for EngineParams {
    fn from(config: &EngineConfig) -> Self {
        Self {
            edge_threshold_bps: config.edge_threshold_bps,
            net_edge_gate_enabled: config.net_edge_gate_enabled,
            net_edge_threshold_bps: config.net_edge_threshold_bps,
            confirm_n: config.confirm_n,
            min_hold: Duration::seconds(config.min_hold_secs as i64),
            cooldown: Duration::seconds(config.cooldown_secs as i64),
            max_switches_per_day: config.max_switches_per_day,
        }
    }
}

/// The switch-decision state machine
///
/// `evaluate` runs once per tick. Given identical `(scores, state, now,
/// stale)` it returns an identical decision; state mutates only on the
/// switch branch, on confirm tracking, and on the daily-counter roll.
pub struct DecisionEngine {
    params: EngineParams,
    cost: CostModel,
}

impl DecisionEngine {
    pub fn new(params: EngineParams, cost: CostModel) -> Self {
        Self { params, cost }
    }

    /// Evaluate one tick
    ///
    /// Gate order: stale data, feed error, leader-is-held, edge, net edge,
    /// min-hold, cooldown, daily cap, confirmation. The first failing gate
    /// decides the hold reason. Edge and net-edge failures drop any
    /// in-progress confirmation; timer and cap gates freeze it.
    pub fn evaluate(
        &self,
        scores: &BTreeMap<Asset, Score>,
        state: &mut RotationState,
        now: DateTime<Utc>,
        stale: bool,
    ) -> Evaluation {
        state.roll_day(now);

        let lead = match (stale, self.leader(scores, state)) {
            (false, Some(lead)) => lead,
            (_, leader) => {
                // A visibly different leader breaks the confirmation chain
                // even on a degraded tick; timers are never touched here.
                if let (Some(target), Some(lead)) = (&state.confirm_target, leader) {
                    if &lead.asset != target {
                        state.reset_confirmation();
                    }
                }
                let reason = if !stale && scores.is_empty() {
                    HoldReason::FeedError
                } else {
                    HoldReason::DataStale
                };
                return Evaluation {
                    decision: Decision::Hold(reason),
                    leader: leader.map(|score| score.asset.clone()),
                    edge_bps: None,
                    net_edge_bps: None,
                    confirm_count: state.confirm_count,
                };
            }
        };

        let held_score = state
            .held
            .as_ref()
            .and_then(|asset| scores.get(asset))
            .map(|score| score.value)
            .unwrap_or_default();
        let edge_bps = (lead.value - held_score) * dec!(10000);
        let net_edge_bps = self.cost.net_edge_bps(edge_bps);

        let reason = if state.held.as_ref() == Some(&lead.asset) {
            state.reset_confirmation();
            Some(HoldReason::LeaderHeld)
        } else if edge_bps < self.params.edge_threshold_bps {
            state.reset_confirmation();
            Some(HoldReason::EdgeTooSmall)
        } else if self.params.net_edge_gate_enabled
            && net_edge_bps < self.params.net_edge_threshold_bps
        {
            state.reset_confirmation();
            Some(HoldReason::NetEdgeTooSmall)
        } else if self.within(state.last_switch_at, now, self.params.min_hold) {
            Some(HoldReason::MinHold)
        } else if self.within(state.last_switch_at, now, self.params.cooldown) {
            Some(HoldReason::Cooldown)
        } else if state.switches_today >= self.params.max_switches_per_day {
            Some(HoldReason::MaxSwitches)
        } else {
            // Confirmation: consecutive ticks with the same candidate.
            if state.confirm_target.as_ref() == Some(&lead.asset) {
                state.confirm_count += 1;
            } else {
                state.confirm_target = Some(lead.asset.clone());
                state.confirm_count = 1;
            }
            if state.confirm_count < self.params.confirm_n {
                Some(HoldReason::Confirming)
            } else {
                None
            }
        };

        let decision = match reason {
            Some(reason) => Decision::Hold(reason),
            None => {
                let from = state.held.replace(lead.asset.clone());
                state.last_switch_at = Some(now);
                state.switches_today += 1;
                state.reset_confirmation();
                Decision::Switch {
                    from,
                    to: lead.asset.clone(),
                    edge_bps,
                    net_edge_bps,
                }
            }
        };

        Evaluation {
            decision,
            leader: Some(lead.asset.clone()),
            edge_bps: Some(edge_bps),
            net_edge_bps: Some(net_edge_bps),
            confirm_count: state.confirm_count,
        }
    }

    /// Eligible, non-blacklisted asset with the maximum score; ties go to
    /// the lexically smallest symbol
    fn leader<'a>(
        &self,
        scores: &'a BTreeMap<Asset, Score>,
        state: &RotationState,
    ) -> Option<&'a Score> {
        scores
            .values()
            .filter(|score| score.eligible && !state.blacklist.contains(&score.asset))
            .max_by(|a, b| a.value.cmp(&b.value).then_with(|| b.asset.cmp(&a.asset)))
    }

    fn within(&self, since: Option<DateTime<Utc>>, now: DateTime<Utc>, window: Duration) -> bool {
        since.is_some_and(|t| now - t < window)
    }
}
