//! Domain types for screenlab.

pub mod bar;
pub mod horizon;
pub mod recommendation;
pub mod series;
pub mod snapshot;

pub use bar::Bar;
pub use horizon::{Horizon, HorizonParams, ParamError, RiskParams};
pub use recommendation::Recommendation;
pub use series::{PriceSeries, SeriesError};
pub use snapshot::IndicatorSnapshot;

/// Symbol type alias
pub type Symbol = String;
