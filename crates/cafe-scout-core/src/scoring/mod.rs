pub mod factor;
pub mod opportunity;
pub mod percentile;
pub mod pipeline;
pub mod rank;
pub mod weights;

pub use factor::{
    Factor, FactorCounts, FactorPercentiles, PercentileColumn, EARLY_HOURS_SHARE, EMPLOYEE_DENSITY,
    LOW_COMPETITION, WEEKDAY_SHARE,
};
pub use percentile::percentile_rank;
pub use pipeline::{derive, DerivedColumns};
pub use weights::ScoringWeights;
