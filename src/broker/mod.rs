//! Paper execution
//!
//! Owns the simulated position and applies switch decisions as two priced
//! legs with modeled costs. No real orders are ever routed.

mod paper;
mod types;

pub use paper::PaperBroker;
pub use types::Position;
