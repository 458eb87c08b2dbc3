//! ScreenLab Runner — screen orchestration, export, and reporting.
//!
//! This crate builds on `screenlab-core` to provide:
//! - TOML screen configuration with a blake3 `config_id` fingerprint
//! - The fetch/evaluate/rank pipeline over a watchlist and provider
//! - The pre-computed indicator-table mode
//! - JSON manifest, per-horizon CSV, and Markdown artifact export

pub mod config;
pub mod export;
pub mod report;
pub mod screen;

pub use config::{ConfigError, ConfigId, ScreenConfig};
pub use export::{
    export_horizon_csv, export_json, horizon_csv_name, import_json, load_artifacts,
    save_artifacts,
};
pub use report::generate_report;
pub use screen::{
    evaluate_table, run_screen, screen_table, ScreenError, ScreenReport, SkipRecord,
    SCHEMA_VERSION,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn screen_config_is_send_sync() {
        assert_send::<ScreenConfig>();
        assert_sync::<ScreenConfig>();
    }

    #[test]
    fn screen_report_is_send_sync() {
        assert_send::<ScreenReport>();
        assert_sync::<ScreenReport>();
    }

    #[test]
    fn skip_record_is_send_sync() {
        assert_send::<SkipRecord>();
        assert_sync::<SkipRecord>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
        assert_send::<ScreenError>();
        assert_sync::<ScreenError>();
    }
}
