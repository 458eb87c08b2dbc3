//! Serializable screen configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use screenlab_core::domain::RiskParams;
use screenlab_core::engine::{
    IndicatorWindows, ScoreRetention, ScoringPolicy, DEFAULT_LIST_SIZE,
};

/// Unique identifier for a screen configuration (content-addressable hash).
pub type ConfigId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: Box<toml::de::Error>,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one screen run.
///
/// Every field has a default, so an empty TOML file is a valid config
/// and partial files override only what they mention. The optional
/// `policy` table replaces the baseline scoring policy wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Maximum rows per horizon list.
    pub list_size: usize,

    /// Which scores qualify for the ranked lists.
    pub retention: ScoreRetention,

    /// Calendar days of history to fetch before the evaluation date.
    pub lookback_days: i64,

    /// Buy band and per-horizon stop/target distances.
    pub risk: RiskParams,

    /// Indicator window lengths.
    pub windows: IndicatorWindows,

    /// Scoring policy override; baseline when omitted.
    pub policy: Option<ScoringPolicy>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            list_size: DEFAULT_LIST_SIZE,
            retention: ScoreRetention::default(),
            // 420 calendar days covers a trading year plus the 200-day
            // SMA warmup.
            lookback_days: 420,
            risk: RiskParams::default(),
            windows: IndicatorWindows::default(),
            policy: None,
        }
    }
}

impl ScreenConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("serialize config: {e}")))
    }

    /// The policy this config screens with.
    pub fn policy(&self) -> ScoringPolicy {
        self.policy.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list_size == 0 {
            return Err(ConfigError::Invalid("list_size must be at least 1".into()));
        }
        if self.lookback_days < 1 {
            return Err(ConfigError::Invalid(
                "lookback_days must be at least 1".into(),
            ));
        }
        self.risk
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let w = &self.windows;
        for (name, period) in [
            ("sma_short", w.sma_short),
            ("sma_long", w.sma_long),
            ("ema_fast", w.ema_fast),
            ("ema_slow", w.ema_slow),
            ("rsi", w.rsi),
            ("macd_signal", w.macd_signal),
            ("bollinger", w.bollinger),
        ] {
            if period == 0 {
                return Err(ConfigError::Invalid(format!(
                    "windows.{name} must be at least 1"
                )));
            }
        }
        if w.volatility < 2 {
            return Err(ConfigError::Invalid(
                "windows.volatility must be at least 2".into(),
            ));
        }
        // The MACD constructor requires this ordering.
        if w.ema_fast >= w.ema_slow {
            return Err(ConfigError::Invalid(format!(
                "windows.ema_fast ({}) must be shorter than windows.ema_slow ({})",
                w.ema_fast, w.ema_slow
            )));
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Stamped into every exported manifest, so two runs with identical
    /// configs are recognizably the same screen.
    pub fn config_id(&self) -> ConfigId {
        let json = serde_json::to_string(self).expect("ScreenConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}
