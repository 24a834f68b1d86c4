//! momentum-rotator: Adaptive capital rotation with paper execution
//!
//! This library provides the core components for:
//! - Rolling per-asset price history with windowed-return queries
//! - Weighted three-window momentum scoring
//! - A gate-ordered switch-decision state machine with hysteresis,
//!   cooldown, and cost constraints
//! - A paper broker applying decisions to one simulated position
//! - A REST price feed for the USDT spot universe
//! - CSV/JSON persistence of decisions, equity, and restartable state
//! - A single serialized orchestrator loop tying it all together

pub mod asset;
pub mod broker;
pub mod cli;
pub mod config;
pub mod cost;
pub mod engine;
pub mod feed;
pub mod history;
pub mod rotator;
pub mod score;
pub mod sink;
pub mod store;
pub mod telemetry;
