//! In-memory store for tests

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

use super::types::{DecisionRecord, EquityPoint, Snapshot};
use super::Store;

#[derive(Default)]
struct Inner {
    decisions: Vec<DecisionRecord>,
    equity: Vec<EquityPoint>,
    snapshot: Option<Snapshot>,
}

/// Shared in-memory store; clones observe the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> Vec<DecisionRecord> {
        self.inner.lock().expect("store lock").decisions.clone()
    }

    pub fn equity_points(&self) -> Vec<EquityPoint> {
        self.inner.lock().expect("store lock").equity.clone()
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.inner.lock().expect("store lock").snapshot.clone()
    }

    /// Seed a snapshot as if a prior run had saved it
    pub fn seed(&self, snapshot: Snapshot) {
        self.inner.lock().expect("store lock").snapshot = Some(snapshot);
    }
}

impl Store for MemoryStore {
    fn append_decision(&mut self, record: &DecisionRecord) -> anyhow::Result<()> {
        self.inner
            .lock()
            .expect("store lock")
            .decisions
            .push(record.clone());
        Ok(())
    }

    fn append_equity(
        &mut self,
        timestamp: DateTime<Utc>,
        asset: &str,
        equity_usdt: Decimal,
    ) -> anyhow::Result<()> {
        self.inner.lock().expect("store lock").equity.push(EquityPoint {
            timestamp,
            asset: asset.to_string(),
            equity_usdt,
        });
        Ok(())
    }

    fn load_state(&self) -> anyhow::Result<Option<Snapshot>> {
        Ok(self.inner.lock().expect("store lock").snapshot.clone())
    }

    fn save_state(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        self.inner.lock().expect("store lock").snapshot = Some(snapshot.clone());
        Ok(())
    }
}
