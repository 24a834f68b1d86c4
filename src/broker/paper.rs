//! Paper broker: applies decisions to the simulated position

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::types::Position;
use crate::asset::Asset;
use crate::cost::CostModel;
use crate::engine::Decision;

/// Simulated single-asset broker
///
/// Every equity change is attributable to a priced trade minus modeled
/// cost. Only `apply` and `park_to_usdt` mutate the position.
pub struct PaperBroker {
    position: Position,
    cost: CostModel,
}

impl PaperBroker {
    /// Start fully parked with the given USDT balance
    pub fn new(starting_balance: Decimal, cost: CostModel) -> Self {
        Self {
            position: Position::parked(starting_balance),
            cost,
        }
    }

    /// Resume from a persisted position
    pub fn resume(position: Position, cost: CostModel) -> Self {
        Self { position, cost }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Mark-to-market equity in USDT
    ///
    /// `None` when the held asset has no price in the snapshot; equity is
    /// never invented from a missing quote.
    pub fn equity(&self, prices: &HashMap<Asset, Decimal>) -> Option<Decimal> {
        match &self.position.asset {
            None => Some(self.position.cash_usdt),
            Some(asset) => prices
                .get(asset)
                .map(|price| self.position.quantity * price),
        }
    }

    /// Apply a decision: no-op for holds, two paper legs for a switch
    pub fn apply(&mut self, decision: &Decision, prices: &HashMap<Asset, Decimal>) {
        let Decision::Switch { to, .. } = decision else {
            return;
        };
        if self.position.asset.as_ref() == Some(to) {
            return;
        }
        self.park_to_usdt(prices);
        self.buy(to, prices);
    }

    /// Sell the entire held quantity into USDT at the current price,
    /// deducting a single leg of modeled cost
    ///
    /// Safe to call at any time; a no-op when already parked or unpriced.
    pub fn park_to_usdt(&mut self, prices: &HashMap<Asset, Decimal>) {
        let Some(asset) = &self.position.asset else {
            return;
        };
        let Some(price) = prices.get(asset) else {
            tracing::warn!(asset = %asset, "No price for held asset, park skipped");
            return;
        };

        let gross = self.position.quantity * price;
        let net = gross * self.leg_keep_ratio();
        tracing::info!(asset = %asset, %gross, %net, "Parked to USDT");
        self.position = Position::parked(net);
    }

    fn buy(&mut self, asset: &Asset, prices: &HashMap<Asset, Decimal>) {
        if !self.position.is_parked() {
            return;
        }
        let Some(price) = prices.get(asset) else {
            tracing::warn!(asset = %asset, "No price for switch target, buy leg skipped");
            return;
        };
        if *price <= Decimal::ZERO {
            return;
        }

        let net_cash = self.position.cash_usdt * self.leg_keep_ratio();
        self.position = Position {
            asset: Some(asset.clone()),
            quantity: net_cash / price,
            cash_usdt: Decimal::ZERO,
        };
    }

    /// Fraction of notional kept after one leg of cost
    fn leg_keep_ratio(&self) -> Decimal {
        dec!(1) - self.cost.per_leg_bps() / dec!(10000)
    }
}
