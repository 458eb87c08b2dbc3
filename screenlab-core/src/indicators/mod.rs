//! Concrete indicator implementations.
//!
//! All indicators implement the `Indicator` trait below and are computed once
//! per instrument over the full close-price series. Multi-series indicators
//! (Bollinger, MACD) are exposed as separate named instances per output,
//! keeping the single-series trait unchanged.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdOutput};
pub use rsi::Rsi;
pub use sma::Sma;
pub use volatility::Volatility;

/// Trait for close-series indicators.
///
/// Indicators take the full close series and produce a numeric output series
/// of the same length. The first `lookback()` values should be `f64::NAN`
/// (warmup), and a NaN input inside a window taints that window's output.
///
/// # Look-ahead contamination guard
/// No indicator value at index t may depend on closes from index t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of values needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire close series.
    ///
    /// Returns a `Vec<f64>` of the same length as `closes`.
    /// The first `lookback()` values should be `f64::NAN`.
    fn compute(&self, closes: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
