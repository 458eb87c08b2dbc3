//! Screen orchestration — fetch, evaluate, rank.
//!
//! Two entry points:
//! - `run_screen()`: fetches price history through a provider, then
//!   evaluates. Used by the CLI's `screen` command.
//! - `screen_table()`: evaluates a pre-computed indicator table file.
//!   Used by the CLI's `table` command.
//!
//! Fetching is sequential (provider-friendly); evaluation fans out per
//! instrument with rayon. A symbol that cannot be fetched or has no
//! usable price becomes a [`SkipRecord`], never a batch failure.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use screenlab_core::data::{
    fetch_symbols, FetchProgress, IndicatorTable, MarketDataProvider, TableError, Watchlist,
};
use screenlab_core::domain::{Horizon, IndicatorSnapshot, Recommendation};
use screenlab_core::engine::{generate, rank, ScoringPolicy, SnapshotBuilder};

use crate::config::{ConfigError, ScreenConfig};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("table error: {0}")]
    Table(#[from] TableError),
}

/// Why a symbol appears in no horizon list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipRecord {
    pub symbol: String,
    pub reason: String,
}

/// Complete result of one screen run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config_id: String,
    pub generated_at: String,
    /// Fetch range; empty in table mode.
    pub start_date: String,
    pub end_date: String,
    /// Symbols evaluated, including skipped ones.
    pub symbol_count: usize,
    pub short: Vec<Recommendation>,
    pub medium: Vec<Recommendation>,
    pub long: Vec<Recommendation>,
    pub skips: Vec<SkipRecord>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl ScreenReport {
    pub fn list_for(&self, horizon: Horizon) -> &[Recommendation] {
        match horizon {
            Horizon::Short => &self.short,
            Horizon::Medium => &self.medium,
            Horizon::Long => &self.long,
        }
    }

    /// Total rows across all three lists.
    pub fn total_listed(&self) -> usize {
        self.short.len() + self.medium.len() + self.long.len()
    }
}

/// Run a screen over a watchlist with live (or offline) price history.
///
/// The fetch range is `[end - lookback_days, end]`. Per-symbol fetch
/// failures and priceless symbols land in `skips`; the report is always
/// produced.
pub fn run_screen(
    watchlist: &Watchlist,
    provider: &dyn MarketDataProvider,
    config: &ScreenConfig,
    end: NaiveDate,
    progress: &dyn FetchProgress,
) -> Result<ScreenReport, ScreenError> {
    config.validate()?;

    let start = end - chrono::Duration::days(config.lookback_days);
    let symbols = watchlist.symbols();
    let outcome = fetch_symbols(provider, &symbols, start, end, progress);

    let mut closes_by_symbol: HashMap<String, Vec<f64>> = HashMap::new();
    for series in &outcome.series {
        closes_by_symbol.insert(series.symbol().to_string(), series.closes());
    }

    // Failed symbols still evaluate, against an empty series, so they
    // surface as skips instead of silently vanishing.
    let builder = SnapshotBuilder::new(config.windows);
    let rows: Vec<(String, IndicatorSnapshot)> = symbols
        .par_iter()
        .map(|symbol| {
            let closes = closes_by_symbol
                .get(symbol)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let snapshot = builder.build(closes, watchlist.beta_for(symbol));
            (symbol.clone(), snapshot)
        })
        .collect();

    let policy = config.policy();
    let Evaluation {
        short,
        medium,
        long,
        priceless,
    } = evaluate_rows(&rows, &policy, config);

    // Fetch errors take precedence over the generic no-price reason.
    let mut skips: Vec<SkipRecord> = outcome
        .summary
        .errors
        .iter()
        .map(|(symbol, err)| SkipRecord {
            symbol: symbol.clone(),
            reason: err.to_string(),
        })
        .collect();
    for symbol in priceless {
        if !skips.iter().any(|s| s.symbol == symbol) {
            skips.push(SkipRecord {
                symbol,
                reason: "no current price".into(),
            });
        }
    }

    Ok(ScreenReport {
        schema_version: SCHEMA_VERSION,
        config_id: config.config_id(),
        generated_at: now_stamp(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        symbol_count: symbols.len(),
        short,
        medium,
        long,
        skips,
    })
}

/// Evaluate a pre-computed indicator table file (CSV or Parquet).
///
/// A missing required column rejects the whole analysis before any
/// scoring happens.
pub fn screen_table(path: &Path, config: &ScreenConfig) -> Result<ScreenReport, ScreenError> {
    let table = IndicatorTable::from_file(path)?;
    evaluate_table(&table, config)
}

/// Evaluate an already-loaded indicator table.
pub fn evaluate_table(
    table: &IndicatorTable,
    config: &ScreenConfig,
) -> Result<ScreenReport, ScreenError> {
    config.validate()?;

    let rows: Vec<(String, IndicatorSnapshot)> = table
        .rows()
        .iter()
        .map(|row| (row.symbol.clone(), row.snapshot.clone()))
        .collect();

    let policy = config.policy();
    let Evaluation {
        short,
        medium,
        long,
        priceless,
    } = evaluate_rows(&rows, &policy, config);

    let skips = priceless
        .into_iter()
        .map(|symbol| SkipRecord {
            symbol,
            reason: "no current price".into(),
        })
        .collect();

    Ok(ScreenReport {
        schema_version: SCHEMA_VERSION,
        config_id: config.config_id(),
        generated_at: now_stamp(),
        start_date: String::new(),
        end_date: String::new(),
        symbol_count: table.len(),
        short,
        medium,
        long,
        skips,
    })
}

struct Evaluation {
    short: Vec<Recommendation>,
    medium: Vec<Recommendation>,
    long: Vec<Recommendation>,
    /// Symbols that produced no recommendation on any horizon.
    priceless: Vec<String>,
}

/// Score and rank every row. Pure and deterministic; the rayon fan-out
/// preserves input order, and ranking breaks score ties by symbol.
fn evaluate_rows(
    rows: &[(String, IndicatorSnapshot)],
    policy: &ScoringPolicy,
    config: &ScreenConfig,
) -> Evaluation {
    let scored: Vec<(String, Vec<Recommendation>)> = rows
        .par_iter()
        .map(|(symbol, snapshot)| {
            let recs: Vec<Recommendation> = Horizon::ALL
                .into_iter()
                .filter_map(|horizon| {
                    let score = policy.score(snapshot, horizon);
                    generate(symbol, snapshot, score, horizon, &config.risk)
                })
                .collect();
            (symbol.clone(), recs)
        })
        .collect();

    let mut short = Vec::new();
    let mut medium = Vec::new();
    let mut long = Vec::new();
    let mut priceless = Vec::new();

    for (symbol, recs) in scored {
        if recs.is_empty() {
            priceless.push(symbol);
            continue;
        }
        for rec in recs {
            if !config.retention.keeps(rec.score) {
                continue;
            }
            match rec.horizon {
                Horizon::Short => short.push(rec),
                Horizon::Medium => medium.push(rec),
                Horizon::Long => long.push(rec),
            }
        }
    }

    Evaluation {
        short: rank(short, config.list_size),
        medium: rank(medium, config.list_size),
        long: rank(long, config.list_size),
        priceless,
    }
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
