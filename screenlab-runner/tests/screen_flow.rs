//! End-to-end screen tests against a stub provider.
//!
//! Exercises the full fetch → evaluate → rank pipeline: partial fetch
//! failures, priceless symbols, list truncation, and determinism under
//! watchlist reordering.

use chrono::NaiveDate;
use screenlab_core::data::{DataError, MarketDataProvider, SilentProgress, Watchlist};
use screenlab_core::domain::{Bar, Horizon};
use screenlab_core::engine::ScoreRetention;
use screenlab_runner::{run_screen, ScreenConfig, ScreenReport};

/// Deterministic offline provider. `BAD01` fails outright, `BAD02`
/// returns only zero-price bars; every other symbol gets a positive
/// wavy series derived from its name.
struct StubProvider;

impl MarketDataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<Bar>, DataError> {
        if symbol == "BAD01" {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let base = if symbol == "BAD02" {
            0.0
        } else {
            40.0 + (symbol.bytes().map(u64::from).sum::<u64>() % 60) as f64
        };

        let bars = (0..280)
            .map(|i| {
                let close = if base == 0.0 {
                    0.0
                } else {
                    base + (i as f64 * 0.2).sin() * 2.0
                };
                Bar {
                    symbol: symbol.to_string(),
                    date: start + chrono::Duration::days(i),
                    open: close,
                    high: close + 0.5,
                    low: (close - 0.5).max(0.0),
                    close,
                    volume: 1_000_000,
                }
            })
            .collect();
        Ok(bars)
    }
}

fn watchlist_25() -> Watchlist {
    let mut symbols: Vec<String> = (0..23).map(|i| format!("SYM{i:02}")).collect();
    symbols.push("BAD01".to_string());
    symbols.push("BAD02".to_string());
    Watchlist::from_symbols(symbols)
}

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

fn screen(watchlist: &Watchlist, config: &ScreenConfig) -> ScreenReport {
    run_screen(watchlist, &StubProvider, config, end_date(), &SilentProgress).unwrap()
}

// ── Invalid symbols ──────────────────────────────────────────────────

#[test]
fn invalid_symbols_are_skipped_not_fatal() {
    let mut config = ScreenConfig::default();
    config.retention = ScoreRetention::All;
    config.list_size = 30;

    let report = screen(&watchlist_25(), &config);

    assert_eq!(report.symbol_count, 25);
    assert_eq!(report.skips.len(), 2);

    let bad01 = report.skips.iter().find(|s| s.symbol == "BAD01").unwrap();
    assert!(bad01.reason.contains("BAD01"), "reason: {}", bad01.reason);

    let bad02 = report.skips.iter().find(|s| s.symbol == "BAD02").unwrap();
    assert_eq!(bad02.reason, "no current price");
}

#[test]
fn lists_never_contain_invalid_symbols_and_cap_at_23() {
    let mut config = ScreenConfig::default();
    config.retention = ScoreRetention::All;
    config.list_size = 30;

    let report = screen(&watchlist_25(), &config);

    for horizon in Horizon::ALL {
        let list = report.list_for(horizon);
        assert!(list.len() <= 23, "{horizon:?} list has {} rows", list.len());
        assert!(list
            .iter()
            .all(|r| r.symbol != "BAD01" && r.symbol != "BAD02"));
    }
    // With retention = all, every valid symbol qualifies on every horizon.
    assert_eq!(report.short.len(), 23);
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn repeated_runs_give_identical_lists() {
    let config = ScreenConfig::default();
    let a = screen(&watchlist_25(), &config);
    let b = screen(&watchlist_25(), &config);

    assert_eq!(a.short, b.short);
    assert_eq!(a.medium, b.medium);
    assert_eq!(a.long, b.long);
    assert_eq!(a.skips, b.skips);
}

#[test]
fn watchlist_order_does_not_change_rankings() {
    let config = ScreenConfig::default();

    let forward = screen(&watchlist_25(), &config);
    let mut reversed_symbols = watchlist_25().symbols();
    reversed_symbols.reverse();
    let reversed = screen(&Watchlist::from_symbols(reversed_symbols), &config);

    assert_eq!(forward.short, reversed.short);
    assert_eq!(forward.medium, reversed.medium);
    assert_eq!(forward.long, reversed.long);
}

// ── Truncation and snapshot echo ─────────────────────────────────────

#[test]
fn list_size_truncates_each_horizon() {
    let mut config = ScreenConfig::default();
    config.retention = ScoreRetention::All;
    config.list_size = 5;

    let report = screen(&watchlist_25(), &config);

    for horizon in Horizon::ALL {
        assert_eq!(report.list_for(horizon).len(), 5);
    }
}

#[test]
fn recommendations_echo_snapshot_and_watchlist_beta() {
    let watchlist = Watchlist::from_toml(
        r#"
        [[entries]]
        symbol = "SYM00"
        beta = 1.05
        "#,
    )
    .unwrap();
    let mut config = ScreenConfig::default();
    config.retention = ScoreRetention::All;

    let report = run_screen(
        &watchlist,
        &StubProvider,
        &config,
        end_date(),
        &SilentProgress,
    )
    .unwrap();

    let rec = &report.long[0];
    assert_eq!(rec.symbol, "SYM00");
    assert_eq!(rec.snapshot.beta, Some(1.05));
    assert!(rec.snapshot.close.is_some());
    assert!(rec.snapshot.rsi.is_some());
    assert!(rec.stop_loss < rec.current_price);
    assert!(rec.target_price > rec.current_price);
}
