//! Decision sink
//!
//! Receives each decision record plus the ranked leaderboard. The core
//! only emits structured records; formatting and routing live here.

use rust_decimal::prelude::ToPrimitive;

use crate::score::LeaderboardRow;
use crate::store::DecisionRecord;
use crate::telemetry::{set_gauge, GaugeMetric};

/// Trait for decision record consumers
pub trait DecisionSink: Send {
    /// Publish one tick's decision and leaderboard
    fn publish(&mut self, record: &DecisionRecord, leaderboard: &[LeaderboardRow]);
}

/// Default sink: structured logs plus metrics gauges
pub struct TracingSink;

impl DecisionSink for TracingSink {
    fn publish(&mut self, record: &DecisionRecord, leaderboard: &[LeaderboardRow]) {
        let eligible = leaderboard.iter().filter(|row| row.eligible).count();

        if record.reason == "SWITCH" {
            tracing::info!(
                from = record.from.as_deref().unwrap_or("USDT"),
                to = record.to.as_deref().unwrap_or(""),
                edge_bps = ?record.edge_bps,
                net_edge_bps = ?record.net_edge_bps,
                equity = ?record.equity_usdt,
                "DECISION SWITCH"
            );
        } else {
            tracing::info!(
                reason = %record.reason,
                held = %record.held,
                leader = record.leader.as_deref().unwrap_or("-"),
                edge_bps = ?record.edge_bps,
                net_edge_bps = ?record.net_edge_bps,
                equity = ?record.equity_usdt,
                "DECISION HOLD"
            );
        }

        if let Some(equity) = record.equity_usdt.and_then(|e| e.to_f64()) {
            set_gauge(GaugeMetric::Equity, equity);
        }
        set_gauge(GaugeMetric::EligibleAssets, eligible as f64);
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Sink that captures published records for assertions
    #[derive(Clone, Default)]
    pub struct CapturingSink {
        pub records: Arc<Mutex<Vec<DecisionRecord>>>,
    }

    impl DecisionSink for CapturingSink {
        fn publish(&mut self, record: &DecisionRecord, _leaderboard: &[LeaderboardRow]) {
            self.records.lock().expect("sink lock").push(record.clone());
        }
    }
}
