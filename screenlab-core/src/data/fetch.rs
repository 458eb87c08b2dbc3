//! Fetch orchestrator — coordinates multi-symbol fetches with progress
//! reporting.
//!
//! Fetching is sequential on purpose: every supported provider is either
//! rate-limit sensitive or local disk, and the expensive part of a screen
//! (indicator evaluation) parallelizes downstream instead.

use chrono::NaiveDate;

use super::provider::{DataError, FetchProgress, MarketDataProvider};
use crate::domain::PriceSeries;

/// Result of a multi-symbol fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Validated series for every symbol that succeeded, in request order.
    pub series: Vec<PriceSeries>,
    pub summary: FetchSummary,
}

/// Summary of a batch fetch operation.
#[derive(Debug)]
pub struct FetchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(String, DataError)>,
}

impl FetchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Fetch every symbol, validating each into a [`PriceSeries`].
///
/// A failed symbol lands in `summary.errors` and the batch keeps going;
/// callers decide whether a partial result is acceptable.
pub fn fetch_symbols(
    provider: &dyn MarketDataProvider,
    symbols: &[String],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn FetchProgress,
) -> FetchOutcome {
    let total = symbols.len();
    let mut series = Vec::with_capacity(total);
    let mut succeeded = 0;
    let mut failed = 0;
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total);

        let result = fetch_single(provider, symbol, start, end);
        progress.on_complete(symbol, i, total, result.as_ref().map(|_| ()));

        match result {
            Ok(s) => {
                series.push(s);
                succeeded += 1;
            }
            Err(e) => {
                errors.push((symbol.clone(), e));
                failed += 1;
            }
        }
    }

    progress.on_batch_complete(succeeded, failed, total);

    FetchOutcome {
        series,
        summary: FetchSummary {
            total,
            succeeded,
            failed,
            errors,
        },
    }
}

/// Fetch one symbol: raw bars, void filtering, order, validate.
fn fetch_single(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, DataError> {
    let mut bars = provider.fetch(symbol, start, end)?;
    bars.retain(|b| !b.is_void());
    if bars.is_empty() {
        return Err(DataError::EmptyHistory {
            symbol: symbol.to_string(),
        });
    }
    bars.sort_by_key(|b| b.date);
    PriceSeries::new(symbol, bars).map_err(|e| DataError::ValidationError(e.to_string()))
}
