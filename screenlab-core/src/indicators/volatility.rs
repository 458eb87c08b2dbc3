//! Rolling volatility of daily returns.
//!
//! Each output is the sample standard deviation (n - 1 denominator) of
//! the last `period` daily percent returns. A return needs two closes,
//! so lookback is `period` and output i covers returns for closes
//! (i - period + 1)..=i.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    name: String,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "volatility period must be >= 2");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // Percent returns; returns[i] pairs with closes[i + 1].
        // A non-positive close is void data, not a -100% move.
        let returns: Vec<f64> = closes
            .windows(2)
            .map(|w| {
                let (prev, cur) = (w[0], w[1]);
                if prev.is_nan() || cur.is_nan() || prev <= 0.0 || cur <= 0.0 {
                    f64::NAN
                } else {
                    (cur / prev - 1.0) * 100.0
                }
            })
            .collect();

        for i in self.period..n {
            let window = &returns[i - self.period..i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let variance = window
                .iter()
                .map(|r| (r - mean).powi(2))
                .sum::<f64>()
                / (self.period as f64 - 1.0);
            result[i] = variance.sqrt();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn volatility_flat_prices_is_zero() {
        let closes = vec![100.0; 30];
        let result = Volatility::new(21).compute(&closes);

        for v in result.iter().take(21) {
            assert!(v.is_nan());
        }
        for v in result.iter().skip(21) {
            assert_approx(*v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn volatility_constant_growth_is_zero() {
        // Constant percent return each day: std of returns is 0
        let mut closes = vec![100.0];
        for _ in 0..30 {
            let prev = *closes.last().unwrap();
            closes.push(prev * 1.01);
        }
        let result = Volatility::new(21).compute(&closes);
        assert_approx(*result.last().unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn volatility_known_small_window() {
        // Closes 100 -> 102 -> 100.98: returns +2.0% and -1.0%
        // Sample std of [2.0, -1.0]: mean 0.5, var (1.5^2 + 1.5^2)/1 = 4.5
        let closes = [100.0, 102.0, 100.98];
        let result = Volatility::new(2).compute(&closes);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 4.5f64.sqrt(), 1e-9);
    }

    #[test]
    fn volatility_wilder_swings_rank_higher() {
        let calm: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.8).sin() * 0.5)
            .collect();
        let wild: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.8).sin() * 8.0)
            .collect();

        let indicator = Volatility::new(21);
        let calm_last = *indicator.compute(&calm).last().unwrap();
        let wild_last = *indicator.compute(&wild).last().unwrap();

        assert!(wild_last > calm_last);
    }

    #[test]
    fn volatility_non_positive_prev_close_taints_window() {
        let mut closes = vec![100.0; 30];
        closes[25] = 0.0;
        let result = Volatility::new(21).compute(&closes);

        // Both returns touching index 25 are undefined
        assert!(result[25].is_nan());
        assert!(result[26].is_nan());
        // Output 24 predates the bad close and stays defined
        assert_approx(result[24], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volatility_lookback_and_short_input() {
        let indicator = Volatility::new(21);
        assert_eq!(indicator.lookback(), 21);
        assert!(indicator.compute(&[100.0; 21]).iter().all(|v| v.is_nan()));
    }
}
