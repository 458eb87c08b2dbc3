//! Snapshot construction from a close series.
//!
//! The builder runs every configured indicator over the closes and keeps
//! only the most recent value of each, collapsing the NaN warm-up
//! convention into `Option`: too little history, or bad values in the
//! final window, simply leave the field `None`. Building never fails.

use serde::{Deserialize, Serialize};

use crate::domain::IndicatorSnapshot;
use crate::indicators::{Bollinger, Ema, Indicator, Macd, Rsi, Sma, Volatility};

/// Window lengths for every indicator the builder runs.
///
/// Defaults are the classic daily-bar settings: 50/200 SMA, 12/26/9
/// MACD, 14-day RSI, 20-day 2-sigma Bollinger, 21-day volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub sma_short: usize,
    pub sma_long: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi: usize,
    pub macd_signal: usize,
    pub bollinger: usize,
    pub bollinger_k: f64,
    pub volatility: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            sma_short: 50,
            sma_long: 200,
            ema_fast: 12,
            ema_slow: 26,
            rsi: 14,
            macd_signal: 9,
            bollinger: 20,
            bollinger_k: 2.0,
            volatility: 21,
        }
    }
}

/// Computes an [`IndicatorSnapshot`] from a close series.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    windows: IndicatorWindows,
}

impl SnapshotBuilder {
    pub fn new(windows: IndicatorWindows) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &IndicatorWindows {
        &self.windows
    }

    /// Build a snapshot from the full close history of one instrument.
    ///
    /// `beta` is an external input and passes through untouched (modulo
    /// the finite check every field gets).
    pub fn build(&self, closes: &[f64], beta: Option<f64>) -> IndicatorSnapshot {
        let w = &self.windows;

        IndicatorSnapshot {
            close: last_finite(closes),
            sma_50: last_output(&Sma::new(w.sma_short), closes),
            sma_200: last_output(&Sma::new(w.sma_long), closes),
            ema_12: last_output(&Ema::new(w.ema_fast), closes),
            ema_26: last_output(&Ema::new(w.ema_slow), closes),
            rsi: last_output(&Rsi::new(w.rsi), closes),
            macd: last_output(&Macd::line(w.ema_fast, w.ema_slow, w.macd_signal), closes),
            macd_signal: last_output(
                &Macd::signal(w.ema_fast, w.ema_slow, w.macd_signal),
                closes,
            ),
            macd_hist: last_output(
                &Macd::histogram(w.ema_fast, w.ema_slow, w.macd_signal),
                closes,
            ),
            upper_bb: last_output(&Bollinger::upper(w.bollinger, w.bollinger_k), closes),
            lower_bb: last_output(&Bollinger::lower(w.bollinger, w.bollinger_k), closes),
            volatility_pct: last_output(&Volatility::new(w.volatility), closes),
            beta: beta.filter(|b| b.is_finite()),
        }
    }
}

fn last_output(indicator: &dyn Indicator, closes: &[f64]) -> Option<f64> {
    last_finite(&indicator.compute(closes))
}

fn last_finite(values: &[f64]) -> Option<f64> {
    values.last().copied().filter(|v| v.is_finite())
}
