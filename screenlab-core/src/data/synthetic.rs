//! Synthetic data provider.
//!
//! Generates a deterministic random-walk price history per symbol, for
//! demos and tests that must not touch the network. Sub-seeds are
//! derived via BLAKE3 over (seed, symbol), so a symbol's history is
//! identical regardless of fetch order or thread count.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, MarketDataProvider};
use crate::domain::Bar;

/// Deterministic random-walk provider.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    seed: u64,
    start_price: f64,
    drift: f64,
    volatility: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_price: 100.0,
            // ~20% annual drift, ~19% annual vol at daily scale
            drift: 0.0008,
            volatility: 0.012,
        }
    }

    pub fn with_walk(mut self, start_price: f64, drift: f64, volatility: f64) -> Self {
        self.start_price = start_price;
        self.drift = drift;
        self.volatility = volatility;
        self
    }

    /// Derive a deterministic per-symbol sub-seed from the master seed.
    fn sub_seed(&self, symbol: &str) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        if end < start {
            return Err(DataError::Other(format!(
                "invalid range: {start} after {end}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol));
        let mut close = self.start_price;
        let mut bars = Vec::new();

        for offset in 0..=(end - start).num_days() {
            let date = start + chrono::Duration::days(offset);
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let open = close;

            // Daily return = drift + volatility * noise in [-1, 1]
            let u: f64 = rng.gen_range(-1.0..=1.0);
            let daily_return = self.drift + self.volatility * u;
            close = (open * (1.0 + daily_return)).max(self.start_price * 0.01);

            let span = open.max(close) - open.min(close);
            let high = open.max(close) + span * rng.gen_range(0.0..=0.5);
            let low = (open.min(close) - span * rng.gen_range(0.0..=0.5)).max(close * 0.5);
            let volume = rng.gen_range(500_000..2_000_000);

            bars.push(Bar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        if bars.is_empty() {
            return Err(DataError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        Ok(bars)
    }
}
