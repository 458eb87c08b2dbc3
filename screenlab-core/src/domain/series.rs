//! PriceSeries — validated daily bar history for one instrument.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::Bar;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("bar {index} for {symbol} is dated {date}, not after {prev}")]
    NonAscendingDates {
        symbol: String,
        index: usize,
        date: NaiveDate,
        prev: NaiveDate,
    },

    #[error("bar {index} carries symbol '{found}', series is for '{symbol}'")]
    SymbolMismatch {
        symbol: String,
        index: usize,
        found: String,
    },
}

/// Ordered daily OHLCV history for a single instrument.
///
/// Construction enforces strictly ascending dates and a uniform symbol.
/// The engine reads it; only the data layer builds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        for (i, bar) in bars.iter().enumerate() {
            if bar.symbol != symbol {
                return Err(SeriesError::SymbolMismatch {
                    symbol,
                    index: i,
                    found: bar.symbol.clone(),
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(SeriesError::NonAscendingDates {
                    symbol,
                    index: i,
                    date: bar.date,
                    prev: bars[i - 1].date,
                });
            }
        }
        Ok(Self { symbol, bars })
    }

    /// A series with no bars. Evaluating it yields an all-absent snapshot.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices in date order, the input to every indicator.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The most recent close, if the series has one.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
