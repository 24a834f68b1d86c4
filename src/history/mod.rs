//! Rolling price history
//!
//! Per-asset price series bounded to the maximum scoring lookback.
//! Scoring reads it, the orchestrator owns and writes it.

mod series;

pub use series::{HistoryError, PriceHistory};
