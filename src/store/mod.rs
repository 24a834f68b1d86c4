//! Persistence
//!
//! Append-only decision and equity logs plus a state snapshot for restart.
//! Absence of prior state means "start fresh, fully parked in USDT".
//! Write failures are fatal to the orchestrator; it never trades blind.

mod csv_store;
mod memory;
mod types;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use types::{DecisionRecord, EquityPoint, Snapshot};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Trait for persistence backends
pub trait Store: Send {
    /// Append one decision record to the decision log
    fn append_decision(&mut self, record: &DecisionRecord) -> anyhow::Result<()>;

    /// Append one point of the equity curve
    fn append_equity(
        &mut self,
        timestamp: DateTime<Utc>,
        asset: &str,
        equity_usdt: Decimal,
    ) -> anyhow::Result<()>;

    /// Load the last persisted snapshot, if any
    fn load_state(&self) -> anyhow::Result<Option<Snapshot>>;

    /// Persist the current snapshot
    fn save_state(&mut self, snapshot: &Snapshot) -> anyhow::Result<()>;
}
