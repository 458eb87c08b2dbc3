//! Watchlist — the ordered set of instruments a screen evaluates.
//!
//! Loadable from a CSV file (configurable symbol column, `Symbol` by
//! default, plus an optional beta column) or a TOML file of
//! `[[entries]]` tables. Symbols keep their input order; duplicates
//! keep the first occurrence.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("parse failed: {0}")]
    ParseFailed(String),

    #[error("watchlist has no '{0}' column")]
    MissingColumn(String),
}

/// Symbol column expected in watchlist CSVs unless overridden.
pub const DEFAULT_SYMBOL_COLUMN: &str = "Symbol";

/// One watched instrument. `beta` is optional because it comes from an
/// external estimate, not from the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WatchlistFile {
    entries: Vec<WatchEntry>,
}

/// Ordered, deduplicated instrument list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    entries: Vec<WatchEntry>,
}

impl Watchlist {
    /// Build from entries, trimming symbols, dropping empties, and
    /// keeping only the first occurrence of each symbol.
    pub fn new(entries: Vec<WatchEntry>) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut deduped = Vec::with_capacity(entries.len());

        for mut entry in entries {
            entry.symbol = entry.symbol.trim().to_string();
            if entry.symbol.is_empty() || seen.iter().any(|s| *s == entry.symbol) {
                continue;
            }
            seen.push(entry.symbol.clone());
            deduped.push(entry);
        }

        Self { entries: deduped }
    }

    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            symbols
                .into_iter()
                .map(|s| WatchEntry {
                    symbol: s.into(),
                    beta: None,
                })
                .collect(),
        )
    }

    /// Load from a CSV file with a header row, taking symbols from the
    /// default `Symbol` column. A `Beta` (or `beta`) column is used
    /// when present.
    pub fn from_csv_file(path: &Path) -> Result<Self, WatchlistError> {
        Self::from_csv_file_with_column(path, DEFAULT_SYMBOL_COLUMN)
    }

    /// Load from a CSV file, taking symbols from `symbol_column`.
    pub fn from_csv_file_with_column(
        path: &Path,
        symbol_column: &str,
    ) -> Result<Self, WatchlistError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| WatchlistError::ReadFailed(e.to_string()))?
            .finish()
            .map_err(|e| WatchlistError::ReadFailed(e.to_string()))?;
        Self::from_frame(&df, symbol_column)
    }

    fn from_frame(df: &DataFrame, symbol_column: &str) -> Result<Self, WatchlistError> {
        let symbols = df
            .column(symbol_column)
            .map_err(|_| WatchlistError::MissingColumn(symbol_column.to_string()))?
            .str()
            .map_err(|e| WatchlistError::ParseFailed(e.to_string()))?;

        let beta_column = ["Beta", "beta"].iter().find(|c| df.column(c).is_ok());
        let betas = match beta_column {
            Some(name) => Some(
                df.column(name)
                    .map_err(|e| WatchlistError::ReadFailed(e.to_string()))?
                    .str()
                    .map_err(|e| WatchlistError::ParseFailed(e.to_string()))?,
            ),
            None => None,
        };

        let mut entries = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(symbol) = symbols.get(i) else {
                continue;
            };
            let beta = betas
                .and_then(|b| b.get(i))
                .and_then(|text| text.trim().parse::<f64>().ok());
            entries.push(WatchEntry {
                symbol: symbol.to_string(),
                beta,
            });
        }

        Ok(Self::new(entries))
    }

    /// Load from a TOML file of `[[entries]]` tables.
    pub fn from_toml_file(path: &Path) -> Result<Self, WatchlistError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WatchlistError::ReadFailed(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, WatchlistError> {
        let file: WatchlistFile =
            toml::from_str(content).map_err(|e| WatchlistError::ParseFailed(e.to_string()))?;
        Ok(Self::new(file.entries))
    }

    pub fn to_toml(&self) -> Result<String, WatchlistError> {
        toml::to_string_pretty(&WatchlistFile {
            entries: self.entries.clone(),
        })
        .map_err(|e| WatchlistError::ParseFailed(e.to_string()))
    }

    pub fn entries(&self) -> &[WatchEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    pub fn beta_for(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .and_then(|e| e.beta)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
