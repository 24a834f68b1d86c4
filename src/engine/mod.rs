//! Switch-decision state machine
//!
//! Consumes per-tick scores and an explicit rotation state and decides,
//! under hysteresis, cooldown, and cost gates, whether to rotate capital
//! into the momentum leader.

mod decision;
mod types;

pub use decision::{DecisionEngine, EngineParams};
pub use types::{Decision, Evaluation, HoldReason, RotationState};
