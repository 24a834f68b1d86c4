//! Switch cost model
//!
//! Converts a hypothetical rotation into a round-trip cost in basis points.
//! Stateless: a pure function of fee, slippage, and spread-buffer settings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::CostConfig;

/// Modeled per-trade costs in basis points
#[derive(Debug, Clone)]
pub struct CostModel {
    fee_bps: Decimal,
    slippage_bps: Decimal,
    spread_buffer_bps: Decimal,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(&CostConfig::default())
    }
}

impl CostModel {
    /// Build a cost model from configuration
    pub fn new(config: &CostConfig) -> Self {
        Self {
            fee_bps: config.fee_bps,
            slippage_bps: config.slippage_bps,
            spread_buffer_bps: config.spread_buffer_bps,
        }
    }

    /// Cost of a single leg in basis points
    pub fn per_leg_bps(&self) -> Decimal {
        self.fee_bps + self.slippage_bps + self.spread_buffer_bps
    }

    /// Cost of a full switch (sell leg + buy leg) in basis points
    pub fn round_trip_bps(&self) -> Decimal {
        dec!(2) * self.per_leg_bps()
    }

    /// Edge remaining after the modeled round-trip cost
    pub fn net_edge_bps(&self, edge_bps: Decimal) -> Decimal {
        edge_bps - self.round_trip_bps()
    }
}
