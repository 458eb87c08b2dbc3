//! ScreenLab CLI — screen, table, and policy commands.
//!
//! Commands:
//! - `screen` — score a watchlist from per-symbol CSV files, synthetic data,
//!   or Yahoo Finance, print the horizon lists, and save the artifact set
//! - `table` — score a pre-computed indicator table (CSV or Parquet)
//! - `policy` — print the active scoring policy as TOML

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use screenlab_core::data::{
    CsvDirProvider, MarketDataProvider, StdoutProgress, SyntheticProvider, Watchlist,
    YahooProvider,
};
use screenlab_core::domain::{Horizon, Recommendation};
use screenlab_runner::{run_screen, save_artifacts, screen_table, ScreenConfig, ScreenReport};

#[derive(Parser)]
#[command(
    name = "screenlab",
    about = "ScreenLab CLI — indicator screening and trade recommendation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a screen over a watchlist and save the artifact set.
    Screen {
        /// Watchlist file (.toml, or .csv with a Symbol column).
        watchlist: PathBuf,

        /// Read price history from per-symbol CSV files in this directory.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Generate deterministic synthetic price history.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for synthetic price history.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Fetch price history from Yahoo Finance.
        #[arg(long, default_value_t = false)]
        online: bool,

        /// Screen end date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Path to a TOML config file. Defaults to the built-in config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the artifact set.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Score a pre-computed indicator table (CSV or Parquet).
    Table {
        /// Indicator table file (.csv or .parquet).
        table: PathBuf,

        /// Path to a TOML config file. Defaults to the built-in config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the artifact set.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Print the active scoring policy as TOML.
    Policy {
        /// Path to a TOML config file. Defaults to the built-in config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            watchlist,
            data_dir,
            synthetic,
            seed,
            online,
            end,
            config,
            output_dir,
        } => run_screen_cmd(
            &watchlist, data_dir, synthetic, seed, online, end, config, &output_dir,
        ),
        Commands::Table {
            table,
            config,
            output_dir,
        } => run_table_cmd(&table, config.as_deref(), &output_dir),
        Commands::Policy { config } => run_policy_cmd(config.as_deref()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_screen_cmd(
    watchlist_path: &Path,
    data_dir: Option<PathBuf>,
    synthetic: bool,
    seed: u64,
    online: bool,
    end: Option<String>,
    config_path: Option<PathBuf>,
    output_dir: &Path,
) -> Result<()> {
    let sources = usize::from(data_dir.is_some()) + usize::from(synthetic) + usize::from(online);
    if sources > 1 {
        bail!("--data-dir, --synthetic, and --online are mutually exclusive");
    }
    if sources == 0 {
        bail!("one of --data-dir, --synthetic, or --online is required");
    }

    let config = load_config(config_path.as_deref())?;
    let watchlist = load_watchlist(watchlist_path)?;

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let provider: Box<dyn MarketDataProvider> = if let Some(dir) = data_dir {
        Box::new(CsvDirProvider::new(dir))
    } else if synthetic {
        Box::new(SyntheticProvider::new(seed))
    } else {
        Box::new(YahooProvider::new())
    };

    let report = run_screen(
        &watchlist,
        provider.as_ref(),
        &config,
        end_date,
        &StdoutProgress,
    )?;

    print_report(&report);

    let run_dir = save_artifacts(&report, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn run_table_cmd(table_path: &Path, config_path: Option<&Path>, output_dir: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let report = screen_table(table_path, &config)?;

    print_report(&report);

    let run_dir = save_artifacts(&report, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn run_policy_cmd(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let policy = config.policy();
    print!("{}", toml::to_string_pretty(&policy)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ScreenConfig> {
    match path {
        Some(p) => Ok(ScreenConfig::from_toml_file(p)?),
        None => Ok(ScreenConfig::default()),
    }
}

fn load_watchlist(path: &Path) -> Result<Watchlist> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let watchlist = match ext {
        "toml" => Watchlist::from_toml_file(path)?,
        _ => Watchlist::from_csv_file(path)?,
    };
    if watchlist.is_empty() {
        bail!("watchlist is empty: {}", path.display());
    }
    Ok(watchlist)
}

fn print_report(report: &ScreenReport) {
    let id8: String = report.config_id.chars().take(8).collect();

    println!();
    println!("=== Screen Report ===");
    if !report.start_date.is_empty() {
        println!("Period:    {} to {}", report.start_date, report.end_date);
    }
    println!("Symbols:   {}", report.symbol_count);
    println!("Listed:    {}", report.total_listed());
    println!("Skipped:   {}", report.skips.len());
    println!("Config:    {id8}");

    for horizon in Horizon::ALL {
        print_horizon_table(horizon, report.list_for(horizon));
    }

    if !report.skips.is_empty() {
        println!();
        println!("--- Skipped ---");
        for skip in &report.skips {
            println!("  {}: {}", skip.symbol, skip.reason);
        }
    }
    println!();
}

fn print_horizon_table(horizon: Horizon, recs: &[Recommendation]) {
    println!();
    println!("--- {} ---", horizon.label());
    if recs.is_empty() {
        println!("(no qualifying instruments)");
        return;
    }
    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>6}",
        "Stock", "Price", "Buy Low", "Buy High", "Stop", "Target", "Score"
    );
    println!("{}", "-".repeat(70));
    for rec in recs {
        println!(
            "{:<8} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>6}",
            rec.symbol,
            rec.current_price,
            rec.lower_buy,
            rec.upper_buy,
            rec.stop_loss,
            rec.target_price,
            rec.score
        );
    }
}
