//! Time horizons and the per-horizon risk parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three recommendation horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Short, Horizon::Medium, Horizon::Long];

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::Short => "Short Term",
            Horizon::Medium => "Medium Term",
            Horizon::Long => "Long Term",
        }
    }
}

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("{field} must be within ({min}, {max}), got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Stop-loss and target distances for one horizon, in percent of entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonParams {
    pub stop_loss_pct: f64,
    pub target_pct: f64,
}

impl HorizonParams {
    pub fn new(stop_loss_pct: f64, target_pct: f64) -> Self {
        Self {
            stop_loss_pct,
            target_pct,
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.stop_loss_pct > 0.0 && self.stop_loss_pct < 100.0) {
            return Err(ParamError::OutOfRange {
                field: "stop_loss_pct",
                min: 0.0,
                max: 100.0,
                value: self.stop_loss_pct,
            });
        }
        if !(self.target_pct > 0.0 && self.target_pct.is_finite()) {
            return Err(ParamError::OutOfRange {
                field: "target_pct",
                min: 0.0,
                max: f64::INFINITY,
                value: self.target_pct,
            });
        }
        Ok(())
    }
}

/// Risk parameters for recommendation generation.
///
/// The buy-range half-width is shared across horizons; stop and target
/// distances widen with the horizon. Defaults: 0.5% band, 3%/5% short,
/// 4%/10% medium, 5%/15% long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    pub buy_band_pct: f64,
    pub short: HorizonParams,
    pub medium: HorizonParams,
    pub long: HorizonParams,
}

impl RiskParams {
    pub fn for_horizon(&self, horizon: Horizon) -> &HorizonParams {
        match horizon {
            Horizon::Short => &self.short,
            Horizon::Medium => &self.medium,
            Horizon::Long => &self.long,
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.buy_band_pct > 0.0 && self.buy_band_pct < 100.0) {
            return Err(ParamError::OutOfRange {
                field: "buy_band_pct",
                min: 0.0,
                max: 100.0,
                value: self.buy_band_pct,
            });
        }
        self.short.validate()?;
        self.medium.validate()?;
        self.long.validate()?;
        Ok(())
    }
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            buy_band_pct: 0.5,
            short: HorizonParams::new(3.0, 5.0),
            medium: HorizonParams::new(4.0, 10.0),
            long: HorizonParams::new(5.0, 15.0),
        }
    }
}
