//! Data acquisition: providers, fetch orchestration, watchlists, and
//! the pre-computed indicator table mode.

pub mod csv_dir;
pub mod fetch;
pub mod provider;
pub mod synthetic;
pub mod table;
pub mod watchlist;
pub mod yahoo;

pub use csv_dir::CsvDirProvider;
pub use fetch::{fetch_symbols, FetchOutcome, FetchSummary};
pub use provider::{DataError, FetchProgress, MarketDataProvider, SilentProgress, StdoutProgress};
pub use synthetic::SyntheticProvider;
pub use table::{IndicatorTable, TableError, TableRow, REQUIRED_COLUMNS};
pub use watchlist::{WatchEntry, Watchlist, WatchlistError, DEFAULT_SYMBOL_COLUMN};
pub use yahoo::YahooProvider;
