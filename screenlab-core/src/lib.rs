//! ScreenLab Core — indicator engine, scoring policies, recommendations, ranking.
//!
//! This crate contains the heart of the screening engine:
//! - Domain types (bars, price series, snapshots, horizons, recommendations)
//! - Full-series indicators with a NaN warm-up convention (SMA, EMA, RSI,
//!   MACD, Bollinger Bands, rolling volatility)
//! - Snapshot builder collapsing indicator tails into `Option` fields
//! - Horizon-keyed, rule-based scoring policies
//! - Recommendation generation and bounded ranking
//! - Data providers (Yahoo Finance, CSV directories, synthetic walks) and
//!   the pre-computed indicator table mode

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
