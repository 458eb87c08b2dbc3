//! Recommendation generation from a scored snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::{Horizon, IndicatorSnapshot, Recommendation, RiskParams};

/// Which scores survive into the ranked lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRetention {
    /// Keep only strictly positive scores.
    #[default]
    Positive,
    /// Keep every score, including zero and negative.
    All,
}

impl ScoreRetention {
    pub fn keeps(self, score: i32) -> bool {
        match self {
            ScoreRetention::Positive => score > 0,
            ScoreRetention::All => true,
        }
    }
}

/// Turn a scored snapshot into a trade recommendation.
///
/// Returns `None` when the snapshot has no usable price: absent,
/// non-finite, or non-positive. Everything else derives linearly from
/// the price, the buy band, and the horizon's stop/target percentages.
pub fn generate(
    symbol: &str,
    snapshot: &IndicatorSnapshot,
    score: i32,
    horizon: Horizon,
    risk: &RiskParams,
) -> Option<Recommendation> {
    let price = snapshot.close.filter(|p| p.is_finite() && *p > 0.0)?;
    let band = risk.buy_band_pct / 100.0;
    let params = risk.for_horizon(horizon);

    Some(Recommendation {
        symbol: symbol.to_string(),
        horizon,
        current_price: price,
        lower_buy: price * (1.0 - band),
        upper_buy: price * (1.0 + band),
        stop_loss: price * (1.0 - params.stop_loss_pct / 100.0),
        target_price: price * (1.0 + params.target_pct / 100.0),
        score,
        snapshot: snapshot.clone(),
    })
}
