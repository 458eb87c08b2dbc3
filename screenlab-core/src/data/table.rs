//! Pre-computed indicator table mode.
//!
//! Instead of price history, the caller supplies a table that already
//! carries one row of indicator values per instrument. Validation is
//! all-or-nothing: every required column must be present or the whole
//! table is rejected, naming every missing column at once.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::domain::IndicatorSnapshot;

/// Required columns, in canonical order. Error messages list missing
/// columns in this order regardless of the table's own layout.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "Stock",
    "Close",
    "SMA_50",
    "SMA_200",
    "EMA_12",
    "EMA_26",
    "RSI",
    "MACD",
    "MACD_Signal",
    "MACD_Hist",
    "Upper_BB",
    "Lower_BB",
    "Volatility (%)",
    "Beta",
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("missing columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("unsupported table format '{0}' (expected .csv or .parquet)")]
    UnsupportedFormat(String),
}

/// One table row: an instrument and its ready-made snapshot.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub symbol: String,
    pub snapshot: IndicatorSnapshot,
}

/// A validated indicator table.
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    rows: Vec<TableRow>,
}

impl IndicatorTable {
    /// Load a table, dispatching on the file extension.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Self::from_csv_file(path),
            "parquet" | "pq" => Self::from_parquet_file(path),
            other => Err(TableError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_csv_file(path: &Path) -> Result<Self, TableError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| TableError::ReadFailed(e.to_string()))?
            .finish()
            .map_err(|e| TableError::ReadFailed(e.to_string()))?;
        Self::from_frame(&df)
    }

    pub fn from_parquet_file(path: &Path) -> Result<Self, TableError> {
        let file =
            std::fs::File::open(path).map_err(|e| TableError::ReadFailed(e.to_string()))?;
        let df = ParquetReader::new(file)
            .finish()
            .map_err(|e| TableError::ReadFailed(e.to_string()))?;
        Self::from_frame(&df)
    }

    /// Validate and extract rows from a frame.
    ///
    /// Missing columns abort the whole table; a bad cell only blanks the
    /// corresponding snapshot field (null, unparseable, and non-finite
    /// values all become `None`).
    pub fn from_frame(df: &DataFrame) -> Result<Self, TableError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.column(name).is_err())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TableError::MissingColumns { columns: missing });
        }

        let symbols = symbol_column(df, "Stock")?;
        let close = numeric_column(df, "Close")?;
        let sma_50 = numeric_column(df, "SMA_50")?;
        let sma_200 = numeric_column(df, "SMA_200")?;
        let ema_12 = numeric_column(df, "EMA_12")?;
        let ema_26 = numeric_column(df, "EMA_26")?;
        let rsi = numeric_column(df, "RSI")?;
        let macd = numeric_column(df, "MACD")?;
        let macd_signal = numeric_column(df, "MACD_Signal")?;
        let macd_hist = numeric_column(df, "MACD_Hist")?;
        let upper_bb = numeric_column(df, "Upper_BB")?;
        let lower_bb = numeric_column(df, "Lower_BB")?;
        let volatility_pct = numeric_column(df, "Volatility (%)")?;
        let beta = numeric_column(df, "Beta")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(symbol) = symbols.get(i).map(str::trim).filter(|s| !s.is_empty()) else {
                continue;
            };
            rows.push(TableRow {
                symbol: symbol.to_string(),
                snapshot: IndicatorSnapshot {
                    close: finite(&close, i),
                    sma_50: finite(&sma_50, i),
                    sma_200: finite(&sma_200, i),
                    ema_12: finite(&ema_12, i),
                    ema_26: finite(&ema_26, i),
                    rsi: finite(&rsi, i),
                    macd: finite(&macd, i),
                    macd_signal: finite(&macd_signal, i),
                    macd_hist: finite(&macd_hist, i),
                    upper_bb: finite(&upper_bb, i),
                    lower_bb: finite(&lower_bb, i),
                    volatility_pct: finite(&volatility_pct, i),
                    beta: finite(&beta, i),
                },
            });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn symbol_column(df: &DataFrame, name: &str) -> Result<StringChunked, TableError> {
    let casted = df
        .column(name)
        .map_err(|e| TableError::ReadFailed(e.to_string()))?
        .cast(&DataType::String)
        .map_err(|e| TableError::ReadFailed(format!("column '{name}': {e}")))?;
    casted
        .str()
        .map(|ca| ca.clone())
        .map_err(|e| TableError::ReadFailed(format!("column '{name}': {e}")))
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, TableError> {
    let casted = df
        .column(name)
        .map_err(|e| TableError::ReadFailed(e.to_string()))?
        .cast(&DataType::Float64)
        .map_err(|e| TableError::ReadFailed(format!("column '{name}': {e}")))?;
    let values = casted
        .f64()
        .map_err(|e| TableError::ReadFailed(format!("column '{name}': {e}")))?;
    Ok(values.into_iter().collect())
}

fn finite(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}
