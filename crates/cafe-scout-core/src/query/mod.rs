pub mod explain;
pub mod profile;
pub mod scored_table;
pub mod shared;

pub use explain::{Explanation, ExplanationComponent, FormulaConstants};
pub use profile::{SeriesPoint, UnitProfile};
pub use scored_table::{
    requested_count, LeaderboardRow, ScoredTable, ScoredUnit, SupplyDemandPair,
};
pub use shared::SharedTable;
