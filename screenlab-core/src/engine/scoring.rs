//! Rule-based scoring over indicator snapshots.
//!
//! A [`ScoringPolicy`] keys an ordered rule list per horizon; the score
//! of a snapshot is the sum of every rule's contribution. Rules read
//! `Option` fields and contribute 0 whenever an operand is absent, so a
//! thin snapshot degrades the score instead of failing the instrument.

use serde::{Deserialize, Serialize};

use crate::domain::{Horizon, IndicatorSnapshot};

/// One scoring rule. Weights are signed contributions; every rule
/// contributes 0 when an operand it needs is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Short SMA above long SMA scores +weight, below scores -weight.
    SmaCross { weight: i32 },
    /// Fast EMA above slow EMA scores +weight, below scores -weight.
    EmaTrend { weight: i32 },
    /// RSI below `oversold` scores +weight, above `overbought` scores
    /// -weight; in between scores 0.
    RsiReversal {
        oversold: f64,
        overbought: f64,
        weight: i32,
    },
    /// RSI within [lower, upper] scores +weight, otherwise 0.
    RsiRange { lower: f64, upper: f64, weight: i32 },
    /// MACD line above its signal scores +weight, below scores -weight.
    MacdCross { weight: i32 },
    /// Positive MACD histogram scores +weight, negative scores -weight.
    MacdHistogram { weight: i32 },
    /// Close at or below the lower band scores +weight; at or above the
    /// upper band scores -weight. Each side gates on its own band.
    BollingerTouch { weight: i32 },
    /// Volatility within [lower, upper] percent scores +weight, outside
    /// scores -penalty.
    VolatilityRegime {
        lower: f64,
        upper: f64,
        weight: i32,
        #[serde(default)]
        penalty: i32,
    },
    /// Beta within `tolerance` of 1.0 scores +weight, otherwise -weight.
    BetaAnchor { tolerance: f64, weight: i32 },
}

impl Rule {
    pub fn apply(&self, snapshot: &IndicatorSnapshot) -> i32 {
        match *self {
            Rule::SmaCross { weight } => {
                above_below(snapshot.sma_50.zip(snapshot.sma_200), weight)
            }
            Rule::EmaTrend { weight } => {
                above_below(snapshot.ema_12.zip(snapshot.ema_26), weight)
            }
            Rule::RsiReversal {
                oversold,
                overbought,
                weight,
            } => match snapshot.rsi {
                Some(rsi) if rsi < oversold => weight,
                Some(rsi) if rsi > overbought => -weight,
                _ => 0,
            },
            Rule::RsiRange {
                lower,
                upper,
                weight,
            } => match snapshot.rsi {
                Some(rsi) if (lower..=upper).contains(&rsi) => weight,
                _ => 0,
            },
            Rule::MacdCross { weight } => {
                above_below(snapshot.macd.zip(snapshot.macd_signal), weight)
            }
            Rule::MacdHistogram { weight } => match snapshot.macd_hist {
                Some(h) if h > 0.0 => weight,
                Some(h) if h < 0.0 => -weight,
                _ => 0,
            },
            Rule::BollingerTouch { weight } => {
                let mut delta = 0;
                if let Some((close, lower)) = snapshot.close.zip(snapshot.lower_bb) {
                    if close <= lower {
                        delta += weight;
                    }
                }
                if let Some((close, upper)) = snapshot.close.zip(snapshot.upper_bb) {
                    if close >= upper {
                        delta -= weight;
                    }
                }
                delta
            }
            Rule::VolatilityRegime {
                lower,
                upper,
                weight,
                penalty,
            } => match snapshot.volatility_pct {
                Some(vol) if (lower..=upper).contains(&vol) => weight,
                Some(_) => -penalty,
                None => 0,
            },
            Rule::BetaAnchor { tolerance, weight } => match snapshot.beta {
                Some(beta) if (beta - 1.0).abs() <= tolerance => weight,
                Some(_) => -weight,
                None => 0,
            },
        }
    }
}

fn above_below(pair: Option<(f64, f64)>, weight: i32) -> i32 {
    match pair {
        Some((a, b)) if a > b => weight,
        Some((a, b)) if a < b => -weight,
        _ => 0,
    }
}

/// Horizon-keyed rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub name: String,
    pub short: Vec<Rule>,
    pub medium: Vec<Rule>,
    pub long: Vec<Rule>,
}

impl ScoringPolicy {
    pub fn rules_for(&self, horizon: Horizon) -> &[Rule] {
        match horizon {
            Horizon::Short => &self.short,
            Horizon::Medium => &self.medium,
            Horizon::Long => &self.long,
        }
    }

    pub fn score(&self, snapshot: &IndicatorSnapshot, horizon: Horizon) -> i32 {
        self.rules_for(horizon)
            .iter()
            .map(|rule| rule.apply(snapshot))
            .sum()
    }
}

impl Default for ScoringPolicy {
    /// The baseline policy: mean-reversion entries on the short horizon,
    /// trend confirmation on the medium, regime quality on the long.
    fn default() -> Self {
        Self {
            name: "baseline".to_string(),
            short: vec![
                Rule::SmaCross { weight: 1 },
                Rule::RsiReversal {
                    oversold: 30.0,
                    overbought: 70.0,
                    weight: 1,
                },
                Rule::MacdCross { weight: 1 },
                Rule::MacdHistogram { weight: 1 },
                Rule::BollingerTouch { weight: 1 },
            ],
            medium: vec![
                Rule::SmaCross { weight: 1 },
                Rule::EmaTrend { weight: 1 },
                Rule::RsiRange {
                    lower: 40.0,
                    upper: 60.0,
                    weight: 1,
                },
                Rule::MacdCross { weight: 1 },
                Rule::VolatilityRegime {
                    lower: 0.5,
                    upper: 4.0,
                    weight: 1,
                    penalty: 0,
                },
            ],
            long: vec![
                Rule::SmaCross { weight: 2 },
                Rule::RsiRange {
                    lower: 30.0,
                    upper: 70.0,
                    weight: 1,
                },
                Rule::MacdHistogram { weight: 1 },
                Rule::VolatilityRegime {
                    lower: 0.0,
                    upper: 3.0,
                    weight: 1,
                    penalty: 1,
                },
                Rule::BetaAnchor {
                    tolerance: 0.3,
                    weight: 1,
                },
            ],
        }
    }
}
