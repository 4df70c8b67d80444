//! "Why this score": a per-unit breakdown of the opportunity index.
//!
//! The breakdown carries every constant of the formula, so
//! `scale * sum(effective_weight * count) / total_units` over the components
//! reproduces `opportunity_index` exactly, without touching the raw table.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::query::ScoredTable;
use crate::scoring::opportunity::index_from_weighted_count;
use crate::scoring::weights::INDEX_SCALE;
use crate::scoring::Factor;
use crate::types::{Percentile, Score};
use crate::ScoutResult;

/// One weighted factor of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationComponent {
    pub factor: Factor,
    pub label: String,
    /// Raw metric value the percentile was taken from.
    pub raw_value: Decimal,
    /// Whether a higher raw value ranks higher.
    pub ascending: bool,
    /// Units at or behind this one for the factor; `percentile = count / totalUnits`.
    pub count: u64,
    pub percentile: Percentile,
    /// Percentile on the 0-100 scale.
    pub points: Decimal,
    /// Share of the index this factor carries; the four sum to 1.
    pub effective_weight: Decimal,
}

/// The formula constants in force when the table was scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaConstants {
    pub version: String,
    pub density_competition_weight: Decimal,
    pub weekday_share_weight: Decimal,
    pub early_hours_share_weight: Decimal,
    pub scale: Decimal,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub name: String,
    pub opportunity_index: Score,
    pub overall_rank: u32,
    pub total_units: usize,
    pub components: Vec<ExplanationComponent>,
    pub formula: FormulaConstants,
}

impl Explanation {
    /// Recompute the index from the components alone.
    pub fn recomputed_index(&self) -> Score {
        let weighted: Decimal = self
            .components
            .iter()
            .map(|c| c.effective_weight * Decimal::from(c.count))
            .sum();
        index_from_weighted_count(weighted, self.total_units as u64)
    }
}

impl ScoredTable {
    /// Breakdown of one unit's index; fails with `UnitNotFound` on an unknown
    /// name.
    pub fn explain(&self, name: &str) -> ScoutResult<Explanation> {
        let scored = self.lookup_by_name(name)?;
        let weights = self.weights();

        let components = Factor::ALL
            .into_iter()
            .map(|factor| {
                let source = factor.column();
                let percentile = scored.percentiles.get(factor);
                ExplanationComponent {
                    factor,
                    label: factor.label().to_string(),
                    raw_value: source.column.value(scored.unit),
                    ascending: source.ascending,
                    count: scored.factor_counts.get(factor),
                    percentile,
                    points: percentile * INDEX_SCALE,
                    effective_weight: weights.effective_weight(factor),
                }
            })
            .collect();

        Ok(Explanation {
            name: scored.unit.name.clone(),
            opportunity_index: scored.opportunity_index,
            overall_rank: scored.overall_rank,
            total_units: self.total_units(),
            components,
            formula: FormulaConstants {
                version: weights.version.clone(),
                density_competition_weight: weights.density_competition,
                weekday_share_weight: weights.weekday_share,
                early_hours_share_weight: weights.early_hours_share,
                scale: INDEX_SCALE,
                expression: weights.formula(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::table::{MetricTable, Unit};
    use rust_decimal_macros::dec;

    fn table() -> ScoredTable {
        ScoredTable::from_table(
            MetricTable::new(vec![
                Unit::new("A", 100, dec!(0.9), dec!(0.5), dec!(1)),
                Unit::new("B", 50, dec!(0.5), dec!(0.5), dec!(5)),
                Unit::new("C", 100, dec!(0.9), dec!(0.5), dec!(1)),
            ])
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_explain_lists_four_components() {
        let e = table().explain("B").unwrap();
        assert_eq!(e.components.len(), 4);
        assert_eq!(e.overall_rank, 3);
        assert_eq!(e.total_units, 3);
        assert_eq!(e.formula.version, "opportunity-v1");
        let competition = e
            .components
            .iter()
            .find(|c| c.factor == Factor::LowCompetition)
            .unwrap();
        assert_eq!(competition.raw_value, dec!(5));
        assert!(!competition.ascending);
    }

    #[test]
    fn test_components_reproduce_index() {
        let t = table();
        for name in ["A", "B", "C"] {
            let e = t.explain(name).unwrap();
            assert_eq!(e.recomputed_index(), e.opportunity_index, "{name}");
        }
    }

    #[test]
    fn test_explain_unknown_unit() {
        assert!(matches!(
            table().explain("Z"),
            Err(ScoutError::UnitNotFound { .. })
        ));
    }

    #[test]
    fn test_points_are_percentile_times_100() {
        let e = table().explain("A").unwrap();
        assert!(e.components.iter().all(|c| c.points == dec!(100)));
    }
}
