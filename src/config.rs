//! Configuration types for momentum-rotator

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

use crate::asset::Asset;

/// Invalid configuration, fatal at startup only
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("universe must contain at least one asset")]
    EmptyUniverse,

    #[error("scoring weights must sum to a positive value")]
    ZeroWeights,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub universe: UniverseConfig,
    pub engine: EngineConfig,
    pub scoring: ScoringConfig,
    pub costs: CostConfig,
    pub feed: FeedConfig,
    pub broker: BrokerConfig,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
}

/// Rotation universe
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniverseConfig {
    /// Base symbols, quoted against USDT
    #[serde(default = "default_universe")]
    pub assets: Vec<String>,
}

fn default_universe() -> Vec<String> {
    [
        "BTC", "ETH", "BNB", "SOL", "XRP", "ADA", "DOGE", "TRX", "MATIC", "DOT", "LTC", "AVAX",
        "LINK", "BCH", "XLM", "ATOM", "ETC", "FIL", "APT", "NEAR",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            assets: default_universe(),
        }
    }
}

impl UniverseConfig {
    /// The universe as typed assets
    pub fn assets(&self) -> Vec<Asset> {
        self.assets.iter().map(Asset::new).collect()
    }
}

/// Decision engine thresholds and timers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Minimum leader edge over the held asset, in basis points
    #[serde(default = "default_edge_threshold_bps")]
    pub edge_threshold_bps: Decimal,

    /// Gate on edge net of round-trip cost
    #[serde(default = "default_true")]
    pub net_edge_gate_enabled: bool,

    /// Minimum net edge, in basis points
    #[serde(default = "default_net_edge_threshold_bps")]
    pub net_edge_threshold_bps: Decimal,

    /// Consecutive leading ticks required before a switch
    #[serde(default = "default_confirm_n")]
    pub confirm_n: u32,

    /// Minimum hold duration after a switch (seconds)
    #[serde(default = "default_min_hold_secs")]
    pub min_hold_secs: u64,

    /// Post-switch cooldown (seconds), measured separately from min-hold
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Hard cap on switches per UTC calendar day
    #[serde(default = "default_max_switches_per_day")]
    pub max_switches_per_day: u32,
}

fn default_true() -> bool {
    true
}
fn default_edge_threshold_bps() -> Decimal {
    dec!(50) // 0.5%
}
fn default_net_edge_threshold_bps() -> Decimal {
    dec!(25) // 0.25%
}
fn default_confirm_n() -> u32 {
    3
}
fn default_min_hold_secs() -> u64 {
    900
}
fn default_cooldown_secs() -> u64 {
    120
}
fn default_max_switches_per_day() -> u32 {
    12
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_threshold_bps: default_edge_threshold_bps(),
            net_edge_gate_enabled: true,
            net_edge_threshold_bps: default_net_edge_threshold_bps(),
            confirm_n: default_confirm_n(),
            min_hold_secs: default_min_hold_secs(),
            cooldown_secs: default_cooldown_secs(),
            max_switches_per_day: default_max_switches_per_day(),
        }
    }
}

/// Momentum scoring windows and weights
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_ret_15m_secs")]
    pub ret_15m_secs: u64,

    #[serde(default = "default_ret_1h_secs")]
    pub ret_1h_secs: u64,

    #[serde(default = "default_ret_4h_secs")]
    pub ret_4h_secs: u64,

    #[serde(default = "default_weight_15m")]
    pub weight_15m: Decimal,

    #[serde(default = "default_weight_1h")]
    pub weight_1h: Decimal,

    #[serde(default = "default_weight_4h")]
    pub weight_4h: Decimal,

    /// Slack kept beyond the longest window before eviction (seconds)
    #[serde(default = "default_lookback_slack_secs")]
    pub lookback_slack_secs: u64,
}

fn default_ret_15m_secs() -> u64 {
    15 * 60
}
fn default_ret_1h_secs() -> u64 {
    60 * 60
}
fn default_ret_4h_secs() -> u64 {
    4 * 60 * 60
}
fn default_weight_15m() -> Decimal {
    dec!(0.5)
}
fn default_weight_1h() -> Decimal {
    dec!(0.3)
}
fn default_weight_4h() -> Decimal {
    dec!(0.2)
}
fn default_lookback_slack_secs() -> u64 {
    300
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ret_15m_secs: default_ret_15m_secs(),
            ret_1h_secs: default_ret_1h_secs(),
            ret_4h_secs: default_ret_4h_secs(),
            weight_15m: default_weight_15m(),
            weight_1h: default_weight_1h(),
            weight_4h: default_weight_4h(),
            lookback_slack_secs: default_lookback_slack_secs(),
        }
    }
}

impl ScoringConfig {
    /// Longest lookback plus slack: the history eviction horizon (seconds)
    pub fn max_lookback_secs(&self) -> u64 {
        self.ret_15m_secs
            .max(self.ret_1h_secs)
            .max(self.ret_4h_secs)
            + self.lookback_slack_secs
    }
}

/// Switch cost model, in basis points per leg component
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostConfig {
    #[serde(default = "default_fee_bps")]
    pub fee_bps: Decimal,

    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: Decimal,

    #[serde(default = "default_spread_buffer_bps")]
    pub spread_buffer_bps: Decimal,
}

fn default_fee_bps() -> Decimal {
    dec!(7.5)
}
fn default_slippage_bps() -> Decimal {
    dec!(5)
}
fn default_spread_buffer_bps() -> Decimal {
    dec!(2)
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
            slippage_bps: default_slippage_bps(),
            spread_buffer_bps: default_spread_buffer_bps(),
        }
    }
}

/// Price feed and tick cadence
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    /// Sampling interval between ticks (seconds)
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Snapshot age beyond which the feed counts as stale (seconds)
    #[serde(default = "default_data_stale_secs")]
    pub data_stale_secs: u64,
}

fn default_tick_interval_secs() -> u64 {
    10
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_data_stale_secs() -> u64 {
    30
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            data_stale_secs: default_data_stale_secs(),
        }
    }
}

/// Paper broker configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrokerConfig {
    /// Starting USDT balance for a fresh run
    #[serde(default = "default_starting_balance")]
    pub starting_balance: Decimal,
}

fn default_starting_balance() -> Decimal {
    dec!(10000)
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
        }
    }
}

/// Persistence configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    /// Directory for decision/equity logs and the state snapshot
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_metrics_port() -> u16 {
    9184
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, defaulting only when the file does not exist
    ///
    /// A file that is present but fails to parse or validate is fatal;
    /// silently trading on defaults the operator never wrote is worse than
    /// refusing to start.
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.universe.assets.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        if self.engine.edge_threshold_bps < Decimal::ZERO {
            return Err(ConfigError::Negative {
                field: "engine.edge_threshold_bps",
            });
        }
        if self.engine.net_edge_threshold_bps < Decimal::ZERO {
            return Err(ConfigError::Negative {
                field: "engine.net_edge_threshold_bps",
            });
        }
        if self.engine.confirm_n == 0 {
            return Err(ConfigError::NonPositive {
                field: "engine.confirm_n",
            });
        }
        if self.engine.max_switches_per_day == 0 {
            return Err(ConfigError::NonPositive {
                field: "engine.max_switches_per_day",
            });
        }
        for (field, value) in [
            ("costs.fee_bps", self.costs.fee_bps),
            ("costs.slippage_bps", self.costs.slippage_bps),
            ("costs.spread_buffer_bps", self.costs.spread_buffer_bps),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::Negative { field });
            }
        }
        if self.scoring.weight_15m + self.scoring.weight_1h + self.scoring.weight_4h
            <= Decimal::ZERO
        {
            return Err(ConfigError::ZeroWeights);
        }
        for (field, value) in [
            ("feed.tick_interval_secs", self.feed.tick_interval_secs),
            ("feed.request_timeout_secs", self.feed.request_timeout_secs),
            ("scoring.ret_15m_secs", self.scoring.ret_15m_secs),
            ("scoring.ret_1h_secs", self.scoring.ret_1h_secs),
            ("scoring.ret_4h_secs", self.scoring.ret_4h_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if self.broker.starting_balance <= Decimal::ZERO {
            return Err(ConfigError::NonPositive {
                field: "broker.starting_balance",
            });
        }
        Ok(())
    }
}
