//! Composite opportunity index.
//!
//! ```text
//! index = 100 * ( w_dc * avg(office_density, low_competition)
//!               + w_wd * weekday_share
//!               + w_eh * early_hours_share )
//! ```
//!
//! Every percentile is `count / N`, so the index is evaluated as
//!
//! ```text
//! index = 100 * ( w_dc * (c_density + c_competition) / 2
//!               + w_wd * c_weekday + w_eh * c_early ) / N
//! ```
//!
//! The numerator is exact in decimal arithmetic and `N` is divided out once,
//! so units that tie under the formula get bit-identical indexes. With
//! counts in [0, N] and weights summing to 1 the index is in [0, 100]; the
//! result is clamped to that range regardless.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::scoring::weights::INDEX_SCALE;
use crate::scoring::{FactorCounts, ScoringWeights};
use crate::types::Score;

/// Opportunity index of one unit from its factor counts in a table of
/// `total` units.
pub fn score(counts: &FactorCounts, total: u64, weights: &ScoringWeights) -> Score {
    let density_competition =
        Decimal::from(counts.employee_density + counts.low_competition) / dec!(2);
    let weighted = weights.density_competition * density_competition
        + weights.weekday_share * Decimal::from(counts.weekday_share)
        + weights.early_hours_share * Decimal::from(counts.early_hours_share);
    index_from_weighted_count(weighted, total)
}

/// Opportunity index of every unit, in row order.
pub fn score_all(counts: &[FactorCounts], weights: &ScoringWeights) -> Vec<Score> {
    let total = counts.len() as u64;
    counts.iter().map(|c| score(c, total, weights)).collect()
}

/// Scale a weighted count sum to the index range with the single division
/// by `total`. Equal sums always map to equal indexes.
pub fn index_from_weighted_count(weighted: Decimal, total: u64) -> Score {
    if total == 0 {
        return Decimal::ZERO;
    }
    let numerator = (weighted * INDEX_SCALE).normalize();
    (numerator / Decimal::from(total)).clamp(Decimal::ZERO, INDEX_SCALE)
}
