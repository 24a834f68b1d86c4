//! Paper position types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// The simulated position: one non-USDT asset at a time, or fully parked
///
/// Never short, never leveraged. When `asset` is `None`, `quantity` is zero
/// and all value sits in `cash_usdt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Held asset; `None` means parked in USDT
    pub asset: Option<Asset>,
    /// Quantity of the held asset
    pub quantity: Decimal,
    /// USDT cash balance (non-zero only while parked)
    pub cash_usdt: Decimal,
}

impl Position {
    /// A fresh position fully parked in USDT
    pub fn parked(balance: Decimal) -> Self {
        Self {
            asset: None,
            quantity: Decimal::ZERO,
            cash_usdt: balance,
        }
    }

    /// True when no non-USDT asset is held
    pub fn is_parked(&self) -> bool {
        self.asset.is_none()
    }

    /// Label for logs and persistence ("USDT" when parked)
    pub fn label(&self) -> &str {
        self.asset.as_ref().map_or("USDT", Asset::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parked_position() {
        let position = Position::parked(dec!(10000));
        assert!(position.is_parked());
        assert_eq!(position.label(), "USDT");
        assert_eq!(position.cash_usdt, dec!(10000));
    }

    #[test]
    fn test_label_for_held_asset() {
        let position = Position {
            asset: Some(Asset::new("BTC")),
            quantity: dec!(0.15),
            cash_usdt: Decimal::ZERO,
        };
        assert_eq!(position.label(), "BTC");
        assert!(!position.is_parked());
    }
}
