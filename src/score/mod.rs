//! Momentum scoring
//!
//! Converts price history into a per-asset momentum score across three
//! return windows. Assets missing any window anchor are marked ineligible
//! and can never lead or be switched into.

mod leaderboard;
mod scorer;
mod types;

pub use leaderboard::{build_leaderboard, LeaderboardRow};
pub use scorer::Scorer;
pub use types::Score;
