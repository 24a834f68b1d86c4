//! Decision engine types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::asset::Asset;

/// Reason a tick resolved to HOLD
///
/// Closed enumeration: one variant per gate, so gate logic stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldReason {
    /// Feed is stale or no asset is eligible
    DataStale,
    /// No scores at all (feed never delivered)
    FeedError,
    /// Leader is already the held asset
    LeaderHeld,
    /// Leader edge below the edge threshold
    EdgeTooSmall,
    /// Edge net of round-trip cost below the net-edge threshold
    NetEdgeTooSmall,
    /// Held asset has not met the minimum hold duration
    MinHold,
    /// Still inside the post-switch cooldown
    Cooldown,
    /// Daily switch cap reached
    MaxSwitches,
    /// Candidate leader not yet confirmed for enough consecutive ticks
    Confirming,
}

impl HoldReason {
    /// Stable wire/log code for this reason
    pub fn code(&self) -> &'static str {
        match self {
            HoldReason::DataStale => "DATA_STALE",
            HoldReason::FeedError => "ERROR",
            HoldReason::LeaderHeld => "HOLD",
            HoldReason::EdgeTooSmall => "HOLD_EDGE_TOO_SMALL",
            HoldReason::NetEdgeTooSmall => "HOLD_NET_EDGE_TOO_SMALL",
            HoldReason::MinHold => "HOLD_MIN_HOLD",
            HoldReason::Cooldown => "HOLD_COOLDOWN",
            HoldReason::MaxSwitches => "HOLD_MAX_SWITCHES",
            HoldReason::Confirming => "HOLD_CONFIRMING",
        }
    }
}

/// Outcome of one evaluation tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Keep the current position
    Hold(HoldReason),
    /// Rotate the full position from `from` into `to`
    Switch {
        /// Previously held asset (`None` when parked in USDT)
        from: Option<Asset>,
        to: Asset,
        edge_bps: Decimal,
        net_edge_bps: Decimal,
    },
}

impl Decision {
    /// Stable wire/log code for this decision
    pub fn code(&self) -> &'static str {
        match self {
            Decision::Hold(reason) => reason.code(),
            Decision::Switch { .. } => "SWITCH",
        }
    }
}

/// Evaluation result: the decision plus the context it was made in
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub decision: Decision,
    /// Eligible leader this tick, when one exists
    pub leader: Option<Asset>,
    /// Leader edge over the held asset, in basis points
    pub edge_bps: Option<Decimal>,
    /// Edge net of round-trip cost, in basis points
    pub net_edge_bps: Option<Decimal>,
    /// Confirmation counter after this tick
    pub confirm_count: u32,
}

/// Persistent rotation state, threaded explicitly through `evaluate`
///
/// The orchestrator owns the one authoritative instance and passes it by
/// exclusive reference each tick; there is no ambient mutable singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    /// Currently held asset; `None` means fully parked in USDT
    pub held: Option<Asset>,
    /// Timestamp of the last executed switch
    pub last_switch_at: Option<DateTime<Utc>>,
    /// Candidate the confirmation counter is tracking
    pub confirm_target: Option<Asset>,
    /// Consecutive ticks the confirm target has led
    pub confirm_count: u32,
    /// Switches executed on `switch_day`
    pub switches_today: u32,
    /// UTC calendar day `switches_today` counts against
    pub switch_day: Option<NaiveDate>,
    /// Assets excluded from leadership
    pub blacklist: BTreeSet<Asset>,
}

impl Default for RotationState {
    fn default() -> Self {
        Self::parked()
    }
}

impl RotationState {
    /// Fresh state: parked in USDT, no timers running
    pub fn parked() -> Self {
        Self {
            held: None,
            last_switch_at: None,
            confirm_target: None,
            confirm_count: 0,
            switches_today: 0,
            switch_day: None,
            blacklist: BTreeSet::new(),
        }
    }

    /// Drop any in-progress confirmation
    pub(crate) fn reset_confirmation(&mut self) {
        self.confirm_target = None;
        self.confirm_count = 0;
    }

    /// Reset the daily switch counter when the UTC day rolls over
    pub(crate) fn roll_day(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        if self.switch_day != Some(today) {
            self.switch_day = Some(today);
            self.switches_today = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(HoldReason::DataStale.code(), "DATA_STALE");
        assert_eq!(HoldReason::EdgeTooSmall.code(), "HOLD_EDGE_TOO_SMALL");
        assert_eq!(HoldReason::Confirming.code(), "HOLD_CONFIRMING");
    }

    #[test]
    fn test_switch_code() {
        let decision = Decision::Switch {
            from: None,
            to: Asset::new("BTC"),
            edge_bps: dec!(80),
            net_edge_bps: dec!(51),
        };
        assert_eq!(decision.code(), "SWITCH");
    }

    #[test]
    fn test_day_roll_resets_counter() {
        let mut state = RotationState::parked();
        state.switches_today = 5;

        let day_one: DateTime<Utc> = "2024-06-01T23:59:00Z".parse().unwrap();
        state.roll_day(day_one);
        assert_eq!(state.switches_today, 0);

        state.switches_today = 5;
        state.roll_day(day_one);
        assert_eq!(state.switches_today, 5);

        let day_two: DateTime<Utc> = "2024-06-02T00:00:10Z".parse().unwrap();
        state.roll_day(day_two);
        assert_eq!(state.switches_today, 0);
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let mut state = RotationState::parked();
        state.held = Some(Asset::new("ETH"));
        state.switches_today = 2;
        state.blacklist.insert(Asset::new("DOGE"));

        let json = serde_json::to_string(&state).unwrap();
        let restored: RotationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
