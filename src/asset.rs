//! Asset identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// An asset in the rotation universe, identified by its base symbol (e.g. "BTC").
///
/// Quote currency is always USDT; a parked position holds no `Asset` at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(String);

impl Asset {
    /// Create an asset from its base symbol
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into().to_uppercase())
    }

    /// Exchange symbol against the USDT quote (e.g. "BTCUSDT")
    pub fn symbol(&self) -> String {
        format!("{}USDT", self.0)
    }

    /// Parse a USDT-quoted exchange symbol back into an asset
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        symbol
            .strip_suffix("USDT")
            .filter(|base| !base.is_empty())
            .map(Asset::new)
    }

    /// Base symbol as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Asset {
    fn from(base: &str) -> Self {
        Asset::new(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip() {
        let btc = Asset::new("BTC");
        assert_eq!(btc.symbol(), "BTCUSDT");
        assert_eq!(Asset::from_symbol("BTCUSDT"), Some(btc));
    }

    #[test]
    fn test_from_symbol_rejects_non_usdt() {
        assert!(Asset::from_symbol("BTCEUR").is_none());
        assert!(Asset::from_symbol("USDT").is_none());
    }

    #[test]
    fn test_lowercase_normalized() {
        assert_eq!(Asset::new("eth").as_str(), "ETH");
    }

    #[test]
    fn test_ordering_is_lexical() {
        let mut assets = vec![Asset::new("SOL"), Asset::new("BTC"), Asset::new("ETH")];
        assets.sort();
        assert_eq!(assets[0].as_str(), "BTC");
        assert_eq!(assets[2].as_str(), "SOL");
    }
}
