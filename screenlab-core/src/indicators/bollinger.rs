//! Bollinger Bands.
//!
//! Middle band: SMA(period). Upper/lower: middle +/- k standard
//! deviations, population variant (divide by n), computed over the same
//! window. One instance emits one band. Lookback: period - 1.

use super::Indicator;

/// Which band this instance emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    k: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, k: f64) -> Self {
        Self::with_band(period, k, BollingerBand::Upper)
    }

    pub fn middle(period: usize, k: f64) -> Self {
        Self::with_band(period, k, BollingerBand::Middle)
    }

    pub fn lower(period: usize, k: f64) -> Self {
        Self::with_band(period, k, BollingerBand::Lower)
    }

    fn with_band(period: usize, k: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(k.is_finite() && k >= 0.0, "Bollinger k must be finite and >= 0");
        let name = match band {
            BollingerBand::Upper => format!("bb_upper_{period}"),
            BollingerBand::Middle => format!("bb_middle_{period}"),
            BollingerBand::Lower => format!("bb_lower_{period}"),
        };
        Self {
            period,
            k,
            band,
            name,
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &closes[i + 1 - self.period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let mean = window.iter().sum::<f64>() / self.period as f64;
            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper | BollingerBand::Lower => {
                    let variance = window
                        .iter()
                        .map(|v| (v - mean).powi(2))
                        .sum::<f64>()
                        / self.period as f64;
                    let std_dev = variance.sqrt();
                    match self.band {
                        BollingerBand::Upper => mean + self.k * std_dev,
                        BollingerBand::Lower => mean - self.k * std_dev,
                        BollingerBand::Middle => unreachable!(),
                    }
                }
            };
        }

        result
    }
}
