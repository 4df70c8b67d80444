//! Derived-column pipeline: percentile pass, composite pass, rank pass.
//!
//! Each pass is checked before the next one runs; a failed check aborts the
//! whole derivation with [`ScoutError::InvariantViolation`] instead of
//! handing out a wrong ranking.

use std::time::Instant;

use rust_decimal::Decimal;

use crate::error::ScoutError;
use crate::scoring::percentile::column_counts;
use crate::scoring::weights::INDEX_SCALE;
use crate::scoring::{
    opportunity, rank, Factor, FactorCounts, FactorPercentiles, ScoringWeights,
};
use crate::table::MetricTable;
use crate::types::{Percentile, Score};
use crate::ScoutResult;

const LOG_TARGET: &str = "cafe_scout::pipeline";

/// All derived columns, in table row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumns {
    pub counts: Vec<FactorCounts>,
    pub percentiles: Vec<FactorPercentiles>,
    pub scores: Vec<Score>,
    pub ranks: Vec<u32>,
}

/// Run the three passes over a table.
pub fn derive(table: &MetricTable, weights: &ScoringWeights) -> ScoutResult<DerivedColumns> {
    weights.validate()?;
    let start = Instant::now();
    let total = table.len() as u64;

    let [density, weekday, early, competition] =
        Factor::ALL.map(|factor| column_counts(table, factor.column()));
    let counts: Vec<FactorCounts> = (0..table.len())
        .map(|i| FactorCounts {
            employee_density: density[i],
            weekday_share: weekday[i],
            early_hours_share: early[i],
            low_competition: competition[i],
        })
        .collect();

    let percentiles: Vec<FactorPercentiles> =
        counts.iter().map(|c| c.percentiles(total)).collect();
    for factor in Factor::ALL {
        let column: Vec<Percentile> = percentiles.iter().map(|p| p.get(factor)).collect();
        check_percentiles(factor, &column)?;
    }

    let scores = opportunity::score_all(&counts, weights);
    check_scores(&scores)?;

    let ranks = rank::rank(&scores)?;
    check_ranks(&scores, &ranks)?;

    log::debug!(
        target: LOG_TARGET,
        "Derived percentiles, scores and ranks for {} units with '{}' in {}us",
        table.len(),
        weights.version,
        start.elapsed().as_micros()
    );

    Ok(DerivedColumns {
        counts,
        percentiles,
        scores,
        ranks,
    })
}

// ---------------------------------------------------------------------------
// Invariant checks
// ---------------------------------------------------------------------------

fn violation(stage: &str, detail: String) -> ScoutError {
    ScoutError::InvariantViolation {
        stage: stage.into(),
        detail,
    }
}

fn check_percentiles(factor: Factor, column: &[Percentile]) -> ScoutResult<()> {
    let stage = "percentile";
    if let Some(p) = column.iter().find(|p| **p < Decimal::ZERO || **p > Decimal::ONE) {
        return Err(violation(
            stage,
            format!("{} percentile {p} outside [0, 1]", factor.label()),
        ));
    }
    match column.iter().max() {
        Some(max) if *max != Decimal::ONE => Err(violation(
            stage,
            format!("{} percentile maximum is {max}, expected 1", factor.label()),
        )),
        _ => Ok(()),
    }
}

fn check_scores(scores: &[Score]) -> ScoutResult<()> {
    match scores.iter().find(|s| **s < Decimal::ZERO || **s > INDEX_SCALE) {
        Some(s) => Err(violation(
            "composite",
            format!("opportunity index {s} outside [0, {INDEX_SCALE}]"),
        )),
        None => Ok(()),
    }
}

/// Ranks must be exactly the min-ranking of `scores`: walking rows in rank
/// order, every tie group starts at its 1-based position, shares one score,
/// and scores strictly higher than the next group.
fn check_ranks(scores: &[Score], ranks: &[u32]) -> ScoutResult<()> {
    let stage = "rank";
    let n = ranks.len();
    if n != scores.len() {
        return Err(violation(
            stage,
            format!("{n} ranks for {} scores", scores.len()),
        ));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| ranks[i]);

    let mut pos = 0;
    while pos < n {
        let head = order[pos];
        let group_rank = ranks[head];
        if group_rank as usize != pos + 1 {
            return Err(violation(
                stage,
                format!("rank {group_rank} found where rank {} was expected", pos + 1),
            ));
        }

        let mut end = pos;
        while end < n && ranks[order[end]] == group_rank {
            if scores[order[end]] != scores[head] {
                return Err(violation(
                    stage,
                    format!("rows sharing rank {group_rank} have different scores"),
                ));
            }
            end += 1;
        }

        if end < n && scores[order[end]] >= scores[head] {
            return Err(violation(
                stage,
                format!(
                    "rank {} does not score below rank {group_rank}",
                    ranks[order[end]]
                ),
            ));
        }
        pos = end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Unit;
    use rust_decimal_macros::dec;

    fn abc_table() -> MetricTable {
        MetricTable::new(vec![
            Unit::new("A", 100, dec!(0.9), dec!(0.5), dec!(1)),
            Unit::new("B", 50, dec!(0.5), dec!(0.5), dec!(5)),
            Unit::new("C", 100, dec!(0.9), dec!(0.5), dec!(1)),
        ])
        .unwrap()
    }

    #[test]
    fn test_identical_units_tie_at_rank_one() {
        let d = derive(&abc_table(), &ScoringWeights::default()).unwrap();
        assert_eq!(d.scores[0], d.scores[2]);
        assert_eq!(d.scores[0], dec!(100));
        assert!(d.scores[1] < d.scores[0]);
        assert_eq!(d.ranks, vec![1, 3, 1]);
    }

    #[test]
    fn test_factor_percentiles_of_lower_unit() {
        let d = derive(&abc_table(), &ScoringWeights::default()).unwrap();
        let b = d.percentiles[1];
        let third = Decimal::ONE / dec!(3);
        assert_eq!(b.employee_density, third);
        assert_eq!(b.low_competition, third);
        assert_eq!(b.weekday_share, third);
        assert_eq!(b.early_hours_share, Decimal::ONE);
    }

    #[test]
    fn test_mixed_thirds_tie_exactly() {
        let table = MetricTable::new(vec![
            Unit::new("X", 10, dec!(0.5), dec!(0.5), dec!(1)),
            Unit::new("Y", 20, dec!(0.5), dec!(0.5), dec!(5)),
            Unit::new("Z", 30, dec!(0.5), dec!(0.5), dec!(9)),
        ])
        .unwrap();
        let d = derive(&table, &ScoringWeights::default()).unwrap();
        assert_eq!(d.counts[0].employee_density, 1);
        assert_eq!(d.counts[0].low_competition, 3);
        assert_eq!(d.scores[0], d.scores[1]);
        assert_eq!(d.scores[1], d.scores[2]);
        assert_eq!(d.ranks, vec![1, 1, 1]);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let table = abc_table();
        let w = ScoringWeights::default();
        assert_eq!(derive(&table, &w).unwrap(), derive(&table, &w).unwrap());
    }

    #[test]
    fn test_invalid_weights_abort() {
        let w = ScoringWeights {
            weekday_share: dec!(0.9),
            ..ScoringWeights::default()
        };
        assert!(matches!(
            derive(&abc_table(), &w),
            Err(ScoutError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_check_ranks_rejects_gapless_ties() {
        // naive dense ranking: [1, 2, 1] instead of [1, 3, 1]
        let scores = [dec!(90), dec!(50), dec!(90)];
        assert!(check_ranks(&scores, &[1, 2, 1]).is_err());
        assert!(check_ranks(&scores, &[1, 3, 1]).is_ok());
    }

    #[test]
    fn test_check_ranks_rejects_rank_one_below_max() {
        let scores = [dec!(10), dec!(90)];
        let err = check_ranks(&scores, &[1, 2]).unwrap_err();
        assert!(matches!(err, ScoutError::InvariantViolation { .. }));
    }

    #[test]
    fn test_check_ranks_rejects_split_tie() {
        let scores = [dec!(90), dec!(90)];
        assert!(check_ranks(&scores, &[1, 2]).is_err());
    }

    #[test]
    fn test_check_percentiles_requires_max_one() {
        assert!(check_percentiles(Factor::WeekdayShare, &[dec!(0.5), dec!(0.9)]).is_err());
        assert!(check_percentiles(Factor::WeekdayShare, &[dec!(0.5), dec!(1)]).is_ok());
        assert!(check_percentiles(Factor::WeekdayShare, &[dec!(1.5)]).is_err());
    }

    #[test]
    fn test_check_scores_range() {
        assert!(check_scores(&[dec!(100.01)]).is_err());
        assert!(check_scores(&[dec!(0), dec!(100)]).is_ok());
    }
}
