//! Recommendation — one ranked, risk-bounded trade suggestion.

use serde::{Deserialize, Serialize};

use super::horizon::Horizon;
use super::snapshot::IndicatorSnapshot;

/// A trade recommendation for one instrument on one horizon.
///
/// Immutable once generated. The snapshot is echoed so exported artifacts
/// show which indicator values produced the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: String,
    pub horizon: Horizon,
    pub current_price: f64,
    pub lower_buy: f64,
    pub upper_buy: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    pub score: i32,
    pub snapshot: IndicatorSnapshot,
}

impl Recommendation {
    /// The symmetric buy range as (lower, upper).
    pub fn buy_range(&self) -> (f64, f64) {
        (self.lower_buy, self.upper_buy)
    }

    /// Reward-to-risk ratio implied by the target and stop distances.
    pub fn reward_risk(&self) -> f64 {
        let risk = self.current_price - self.stop_loss;
        let reward = self.target_price - self.current_price;
        if risk > 0.0 {
            reward / risk
        } else {
            f64::NAN
        }
    }
}
