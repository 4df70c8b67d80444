//! Opportunity scoring for office-district cafe sites.
//!
//! A [`table::MetricTable`] of raw per-unit metrics is scored once into a
//! [`query::ScoredTable`]: percentile pass, composite opportunity index,
//! competitive rank. All queries then run against that immutable value.

pub mod error;
pub mod query;
pub mod scoring;
pub mod table;
pub mod types;

pub use error::ScoutError;
pub use query::{ScoredTable, SharedTable};
pub use scoring::ScoringWeights;
pub use table::{MetricTable, Unit};
pub use types::*;

/// Standard result type for all cafe-scout operations
pub type ScoutResult<T> = Result<T, ScoutError>;
