//! Moving Average Convergence Divergence (MACD).
//!
//! Line: EMA(fast) - EMA(slow).
//! Signal: EMA(signal_period) of the line.
//! Histogram: line - signal.
//!
//! One `Macd` instance produces one output, selected at construction.
//! This keeps the `Indicator` contract (one value stream per instance)
//! and lets a screen request only the outputs it needs.

use super::ema::ema_of_series;
use super::Indicator;

/// Which MACD series this instance emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Line)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Signal)
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_output(fast, slow, signal, MacdOutput::Histogram)
    }

    fn with_output(fast: usize, slow: usize, signal: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        let name = match output {
            MacdOutput::Line => format!("macd_{fast}_{slow}"),
            MacdOutput::Signal => format!("macd_signal_{fast}_{slow}_{signal}"),
            MacdOutput::Histogram => format!("macd_hist_{fast}_{slow}_{signal}"),
        };
        Self {
            fast,
            slow,
            signal,
            output,
            name,
        }
    }

    fn line_values(&self, closes: &[f64]) -> Vec<f64> {
        let fast_ema = ema_of_series(closes, self.fast);
        let slow_ema = ema_of_series(closes, self.slow);
        fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => self.slow - 1,
            MacdOutput::Signal | MacdOutput::Histogram => self.slow - 1 + self.signal - 1,
        }
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let line = self.line_values(closes);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::Signal => ema_over_valid(&line, self.signal),
            MacdOutput::Histogram => {
                let signal = ema_over_valid(&line, self.signal);
                line.iter().zip(signal.iter()).map(|(l, s)| l - s).collect()
            }
        }
    }
}

/// EMA of a series that starts with a NaN warm-up prefix.
///
/// `ema_of_series` treats any NaN in its seed window as fatal, so the
/// warm-up prefix is stripped before seeding and spliced back after.
fn ema_over_valid(values: &[f64], period: usize) -> Vec<f64> {
    let first_valid = match values.iter().position(|v| !v.is_nan()) {
        Some(i) => i,
        None => return vec![f64::NAN; values.len()],
    };
    let suffix = ema_of_series(&values[first_valid..], period);
    let mut result = vec![f64::NAN; first_valid];
    result.extend(suffix);
    result
}
