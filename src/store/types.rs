//! Persistence record types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::broker::Position;
use crate::engine::{Evaluation, RotationState};

/// One immutable row of the decision log
///
/// Emitted every tick; `from`/`to` are set only on switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub timestamp: DateTime<Utc>,
    /// Stable reason code (`SWITCH`, `HOLD_COOLDOWN`, ...)
    pub reason: String,
    /// Asset held after this tick ("USDT" when parked)
    pub held: String,
    pub leader: Option<String>,
    pub edge_bps: Option<Decimal>,
    pub net_edge_bps: Option<Decimal>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Mark-to-market equity; absent when the held asset was unpriced
    pub equity_usdt: Option<Decimal>,
}

impl DecisionRecord {
    /// Build a record from a finished evaluation
    pub fn from_evaluation(
        evaluation: &Evaluation,
        timestamp: DateTime<Utc>,
        held: &str,
        equity_usdt: Option<Decimal>,
    ) -> Self {
        let (from, to) = match &evaluation.decision {
            crate::engine::Decision::Switch { from, to, .. } => (
                Some(from.as_ref().map_or("USDT".to_string(), |a| a.to_string())),
                Some(to.to_string()),
            ),
            crate::engine::Decision::Hold(_) => (None, None),
        };

        Self {
            timestamp,
            reason: evaluation.decision.code().to_string(),
            held: held.to_string(),
            leader: evaluation.leader.as_ref().map(|a| a.to_string()),
            edge_bps: evaluation.edge_bps,
            net_edge_bps: evaluation.net_edge_bps,
            from,
            to,
            equity_usdt,
        }
    }
}

/// One row of the equity curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub asset: String,
    pub equity_usdt: Decimal,
}

/// Restartable run state: rotation state plus the broker position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: RotationState,
    pub position: Position,
}
