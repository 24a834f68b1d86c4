//! Scoring types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// A momentum score for one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Scored asset
    pub asset: Asset,

    /// Weighted momentum score (missing returns contribute zero)
    pub value: Decimal,

    /// Return over the short window, if enough history exists
    pub ret_15m: Option<Decimal>,

    /// Return over the medium window
    pub ret_1h: Option<Decimal>,

    /// Return over the long window
    pub ret_4h: Option<Decimal>,

    /// True only when all three returns resolved; ineligible assets are
    /// excluded from leader selection
    pub eligible: bool,
}
