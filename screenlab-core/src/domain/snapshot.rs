//! IndicatorSnapshot — the per-instrument record the scoring rules read.

use serde::{Deserialize, Serialize};

/// Latest indicator values for one instrument at evaluation time.
///
/// Every field is optional: an indicator that could not be computed
/// (insufficient history, NaN warmup, missing table cell) is absent, never
/// zero. Rules that need an absent field contribute nothing to the score.
///
/// `beta` is not derived from the price series; it arrives from the
/// watchlist or a pre-computed indicator table and passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub upper_bb: Option<f64>,
    pub lower_bb: Option<f64>,
    pub volatility_pct: Option<f64>,
    pub beta: Option<f64>,
}

impl IndicatorSnapshot {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.close.is_none()
            && self.sma_50.is_none()
            && self.sma_200.is_none()
            && self.ema_12.is_none()
            && self.ema_26.is_none()
            && self.rsi.is_none()
            && self.macd.is_none()
            && self.macd_signal.is_none()
            && self.macd_hist.is_none()
            && self.upper_bb.is_none()
            && self.lower_bb.is_none()
            && self.volatility_pct.is_none()
            && self.beta.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(IndicatorSnapshot::default().is_empty());
    }

    #[test]
    fn one_field_makes_it_non_empty() {
        let snap = IndicatorSnapshot {
            rsi: Some(55.0),
            ..Default::default()
        };
        assert!(!snap.is_empty());
    }

    #[test]
    fn json_roundtrip_preserves_absence() {
        let snap = IndicatorSnapshot {
            close: Some(101.5),
            sma_50: Some(99.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&snap).unwrap();
        let deser: IndicatorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, snap);
        assert_eq!(deser.sma_200, None);
    }
}
