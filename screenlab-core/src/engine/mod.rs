//! Screening engine: snapshot construction, rule-based scoring,
//! recommendation generation, and ranking.
//!
//! The stages are deliberately separable. A snapshot can come from the
//! builder (computed over a price series) or straight from a
//! pre-computed indicator table; scoring and everything downstream
//! neither knows nor cares which.

pub mod builder;
pub mod rank;
pub mod recommend;
pub mod scoring;

pub use builder::{IndicatorWindows, SnapshotBuilder};
pub use rank::{rank, DEFAULT_LIST_SIZE};
pub use recommend::{generate, ScoreRetention};
pub use scoring::{Rule, ScoringPolicy};
