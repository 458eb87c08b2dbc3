//! Offline CSV directory provider.
//!
//! Reads `{dir}/{SYMBOL}.csv` with columns `date, open, high, low,
//! close, volume` (header required, dates as YYYY-MM-DD). Columns are
//! read as text and parsed explicitly, so the result does not depend on
//! schema inference sampling.

use chrono::NaiveDate;
use polars::prelude::*;
use std::path::PathBuf;

use super::provider::{DataError, MarketDataProvider};
use crate::domain::Bar;

const CSV_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Provider backed by a directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvDirProvider {
    dir: PathBuf,
}

impl CsvDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MarketDataProvider for CsvDirProvider {
    fn name(&self) -> &str {
        "csv_dir"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        let path = self.dir.join(format!("{symbol}.csv"));
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path))
            .map_err(|e| DataError::ReadFailed(e.to_string()))?
            .finish()
            .map_err(|e| DataError::ReadFailed(e.to_string()))?;

        bars_from_frame(symbol, &df, start, end)
    }
}

/// Convert an all-text frame into bars, keeping rows within [start, end].
fn bars_from_frame(
    symbol: &str,
    df: &DataFrame,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bar>, DataError> {
    let missing: Vec<&str> = CSV_COLUMNS
        .iter()
        .filter(|name| df.column(name).is_err())
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(DataError::ValidationError(format!(
            "{symbol}: missing columns: {}",
            missing.join(", ")
        )));
    }

    let date = text_column(df, "date")?;
    let open = text_column(df, "open")?;
    let high = text_column(df, "high")?;
    let low = text_column(df, "low")?;
    let close = text_column(df, "close")?;
    let volume = text_column(df, "volume")?;

    let mut bars = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let d = parse_date(symbol, i, date.get(i))?;
        if d < start || d > end {
            continue;
        }
        bars.push(Bar {
            symbol: symbol.to_string(),
            date: d,
            open: parse_price(symbol, i, "open", open.get(i))?,
            high: parse_price(symbol, i, "high", high.get(i))?,
            low: parse_price(symbol, i, "low", low.get(i))?,
            close: parse_price(symbol, i, "close", close.get(i))?,
            volume: parse_volume(symbol, i, volume.get(i))?,
        });
    }

    Ok(bars)
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DataError> {
    df.column(name)
        .map_err(|e| DataError::ReadFailed(e.to_string()))?
        .str()
        .map_err(|e| DataError::ValidationError(format!("column '{name}': {e}")))
}

fn parse_date(symbol: &str, row: usize, value: Option<&str>) -> Result<NaiveDate, DataError> {
    let text = value.ok_or_else(|| {
        DataError::ValidationError(format!("{symbol} row {row}: empty date"))
    })?;
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| {
        DataError::ValidationError(format!("{symbol} row {row}: bad date '{text}': {e}"))
    })
}

fn parse_price(
    symbol: &str,
    row: usize,
    name: &str,
    value: Option<&str>,
) -> Result<f64, DataError> {
    let text = value.ok_or_else(|| {
        DataError::ValidationError(format!("{symbol} row {row}: empty {name}"))
    })?;
    text.trim().parse::<f64>().map_err(|_| {
        DataError::ValidationError(format!("{symbol} row {row}: bad {name} '{text}'"))
    })
}

fn parse_volume(symbol: &str, row: usize, value: Option<&str>) -> Result<u64, DataError> {
    let text = value.ok_or_else(|| {
        DataError::ValidationError(format!("{symbol} row {row}: empty volume"))
    })?;
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .or_else(|_| trimmed.parse::<f64>().map(|v| v as u64))
        .map_err(|_| {
            DataError::ValidationError(format!("{symbol} row {row}: bad volume '{text}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "date" => &["2024-01-02", "2024-01-03", "2024-01-04"],
            "open" => &["100.0", "101.0", "102.0"],
            "high" => &["101.5", "102.5", "103.5"],
            "low" => &["99.5", "100.5", "101.5"],
            "close" => &["101.0", "102.0", "103.0"],
            "volume" => &["1000", "1100.0", "1200"],
        )
        .unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn frame_converts_to_bars() {
        let bars = bars_from_frame("ACME", &sample_frame(), jan(1), jan(31)).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, jan(2));
        assert_eq!(bars[0].close, 101.0);
        assert_eq!(bars[1].volume, 1100);
        assert_eq!(bars[2].symbol, "ACME");
    }

    #[test]
    fn range_filter_is_inclusive() {
        let bars = bars_from_frame("ACME", &sample_frame(), jan(3), jan(3)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, jan(3));
    }

    #[test]
    fn missing_columns_are_all_named() {
        let df = df!(
            "date" => &["2024-01-02"],
            "close" => &["101.0"],
        )
        .unwrap();
        let err = bars_from_frame("ACME", &df, jan(1), jan(31)).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("open"));
        assert!(text.contains("high"));
        assert!(text.contains("low"));
        assert!(text.contains("volume"));
    }

    #[test]
    fn bad_price_names_row_and_column() {
        let df = df!(
            "date" => &["2024-01-02"],
            "open" => &["100.0"],
            "high" => &["101.5"],
            "low" => &["99.5"],
            "close" => &["not-a-price"],
            "volume" => &["1000"],
        )
        .unwrap();
        let err = bars_from_frame("ACME", &df, jan(1), jan(31)).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("row 0"));
        assert!(text.contains("close"));
    }

    #[test]
    fn unknown_symbol_file_is_not_found() {
        let provider = CsvDirProvider::new("/nonexistent/prices");
        let err = provider.fetch("ACME", jan(1), jan(31)).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }
}
