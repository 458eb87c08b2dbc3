//! Report export — JSON manifest, per-horizon CSV, artifact bundles.
//!
//! Three export surfaces for a [`ScreenReport`]:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: one file per horizon, the columns downstream sheets expect
//! - **Artifact directory**: manifest + CSVs + Markdown report per run
//!
//! All persisted manifests carry a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use screenlab_core::domain::{Horizon, Recommendation};

use crate::report::generate_report;
use crate::screen::{ScreenReport, SCHEMA_VERSION};

// ─── JSON manifest ──────────────────────────────────────────────────

/// Serialize a `ScreenReport` to pretty JSON.
pub fn export_json(report: &ScreenReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ScreenReport to JSON")
}

/// Deserialize a `ScreenReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScreenReport> {
    let report: ScreenReport =
        serde_json::from_str(json).context("failed to deserialize ScreenReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// The artifact file name for one horizon's CSV.
pub fn horizon_csv_name(horizon: Horizon) -> &'static str {
    match horizon {
        Horizon::Short => "short_term.csv",
        Horizon::Medium => "medium_term.csv",
        Horizon::Long => "long_term.csv",
    }
}

/// Export one horizon list as CSV.
///
/// Columns: Stock, Current Price, Lower Buy Range, Upper Buy Range,
/// Stop Loss, Target Price, Score
pub fn export_horizon_csv(recs: &[Recommendation]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "Stock",
        "Current Price",
        "Lower Buy Range",
        "Upper Buy Range",
        "Stop Loss",
        "Target Price",
        "Score",
    ])?;

    for rec in recs {
        wtr.write_record([
            rec.symbol.as_str(),
            &format!("{:.2}", rec.current_price),
            &format!("{:.2}", rec.lower_buy),
            &format!("{:.2}", rec.upper_buy),
            &format!("{:.2}", rec.stop_loss),
            &format!("{:.2}", rec.target_price),
            &rec.score.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one screen run.
///
/// Creates a directory named `screen_{config_id[..8]}_{timestamp}/`
/// under `output_dir` containing:
/// - `manifest.json` — the full `ScreenReport`
/// - `short_term.csv`, `medium_term.csv`, `long_term.csv`
/// - `report.md` — human-readable Markdown report
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &ScreenReport, output_dir: &Path) -> Result<PathBuf> {
    let id8: String = report.config_id.chars().take(8).collect();
    let dirname = format!(
        "screen_{}_{}",
        id8,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    for horizon in Horizon::ALL {
        let csv = export_horizon_csv(report.list_for(horizon))?;
        std::fs::write(run_dir.join(horizon_csv_name(horizon)), &csv)?;
    }

    std::fs::write(run_dir.join("report.md"), generate_report(report))?;

    Ok(run_dir)
}

/// Load a `ScreenReport` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<ScreenReport> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenlab_core::domain::IndicatorSnapshot;

    fn sample_rec(symbol: &str, horizon: Horizon, score: i32) -> Recommendation {
        Recommendation {
            symbol: symbol.into(),
            horizon,
            current_price: 100.0,
            lower_buy: 99.5,
            upper_buy: 100.5,
            stop_loss: 97.0,
            target_price: 105.0,
            score,
            snapshot: IndicatorSnapshot {
                close: Some(100.0),
                rsi: Some(25.0),
                ..IndicatorSnapshot::default()
            },
        }
    }

    fn sample_report() -> ScreenReport {
        ScreenReport {
            schema_version: SCHEMA_VERSION,
            config_id: "deadbeefcafe0123".into(),
            generated_at: "2024-06-28 09:00:00".into(),
            start_date: "2023-05-05".into(),
            end_date: "2024-06-28".into(),
            symbol_count: 3,
            short: vec![
                sample_rec("ACME", Horizon::Short, 3),
                sample_rec("BOLT", Horizon::Short, 1),
            ],
            medium: vec![sample_rec("ACME", Horizon::Medium, 2)],
            long: vec![],
            skips: vec![crate::screen::SkipRecord {
                symbol: "GONE".into(),
                reason: "no current price".into(),
            }],
        }
    }

    // ─── JSON round-trip ─────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_report();
        let json = export_json(&original).unwrap();
        let restored = import_json(&json).unwrap();

        assert_eq!(restored.schema_version, SCHEMA_VERSION);
        assert_eq!(restored.config_id, original.config_id);
        assert_eq!(restored.short.len(), 2);
        assert_eq!(restored.short[0].symbol, "ACME");
        assert_eq!(restored.short[0].snapshot.rsi, Some(25.0));
        assert_eq!(restored.skips, original.skips);
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut report = sample_report();
        report.schema_version = 99;
        let json = export_json(&report).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 99"));
    }

    // ─── CSV ────────────────────────────────────────────────────────

    #[test]
    fn csv_header_matches_sheet_columns() {
        let csv = export_horizon_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "Stock,Current Price,Lower Buy Range,Upper Buy Range,Stop Loss,Target Price,Score"
        );
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn csv_rows_two_decimal_prices() {
        let recs = vec![sample_rec("ACME", Horizon::Short, 2)];
        let csv = export_horizon_csv(&recs).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "ACME,100.00,99.50,100.50,97.00,105.00,2");
    }

    #[test]
    fn csv_names_per_horizon() {
        assert_eq!(horizon_csv_name(Horizon::Short), "short_term.csv");
        assert_eq!(horizon_csv_name(Horizon::Medium), "medium_term.csv");
        assert_eq!(horizon_csv_name(Horizon::Long), "long_term.csv");
    }

    // ─── Save/load artifacts ────────────────────────────────────────

    #[test]
    fn save_load_artifacts_roundtrip() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&report, dir.path()).unwrap();

        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("short_term.csv").exists());
        assert!(run_dir.join("medium_term.csv").exists());
        assert!(run_dir.join("long_term.csv").exists());
        assert!(run_dir.join("report.md").exists());
        assert!(run_dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("screen_deadbeef_"));

        let loaded = load_artifacts(&run_dir).unwrap();
        assert_eq!(loaded.config_id, report.config_id);
        assert_eq!(loaded.short.len(), report.short.len());
        assert_eq!(loaded.skips.len(), 1);
    }
}
