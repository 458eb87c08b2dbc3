//! Relative Strength Index (RSI) with Wilder smoothing.
//!
//! First average gain/loss is a simple mean over the initial `period`
//! price changes; subsequent averages use Wilder's recursive smoothing:
//! avg = (prev_avg * (period - 1) + current) / period.
//! Lookback: period (a change needs two closes, so the first RSI value
//! lands at index `period`).

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
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

        // Initial averages over the first `period` changes
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for i in 1..=self.period {
            let change = closes[i] - closes[i - 1];
            if change.is_nan() {
                return result;
            }
            if change > 0.0 {
                gain_sum += change;
            } else {
                loss_sum += -change;
            }
        }
        let mut avg_gain = gain_sum / self.period as f64;
        let mut avg_loss = loss_sum / self.period as f64;

        result[self.period] = compute_rsi(avg_gain, avg_loss);

        for i in (self.period + 1)..n {
            let change = closes[i] - closes[i - 1];
            if change.is_nan() {
                return result;
            }
            let (gain, loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };
            avg_gain = (avg_gain * (self.period as f64 - 1.0) + gain) / self.period as f64;
            avg_loss = (avg_loss * (self.period as f64 - 1.0) + loss) / self.period as f64;
            result[i] = compute_rsi(avg_gain, avg_loss);
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        // Flat prices: neither overbought nor oversold
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
