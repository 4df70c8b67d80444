//! Fully materialized, read-only scored table and its point and aggregate
//! queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ScoutError;
use crate::scoring::{self, FactorCounts, FactorPercentiles, ScoringWeights};
use crate::table::{MetricTable, Unit};
use crate::types::{Score, Share};
use crate::ScoutResult;

const LOG_TARGET: &str = "cafe_scout::query";

/// Derived fields of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DerivedRow {
    counts: FactorCounts,
    percentiles: FactorPercentiles,
    opportunity_index: Score,
    overall_rank: u32,
}

/// A unit together with all of its derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredUnit<'a> {
    #[serde(flatten)]
    pub unit: &'a Unit,
    /// Exact numerators of `percentiles` over `total_units`.
    #[serde(skip)]
    pub factor_counts: FactorCounts,
    pub percentiles: FactorPercentiles,
    pub opportunity_index: Score,
    pub overall_rank: u32,
}

/// Scatter-plot projection of one unit: supply (cafes) against demand
/// (employees), sized by the opportunity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDemandPair<'a> {
    pub cafe_count: Decimal,
    pub employee_count: u64,
    pub opportunity_index: Score,
    pub name: &'a str,
}

/// One line of the ranked leaderboard. The index is rounded to two places
/// for display; ranking always uses the exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: u32,
    pub name: String,
    pub opportunity_index: Score,
    pub employee_count: u64,
    pub weekday_sales_share: Share,
    pub cafe_count: Decimal,
}

/// Immutable table with percentile, index and rank columns computed once at
/// construction.
#[derive(Debug, Clone)]
pub struct ScoredTable {
    table: MetricTable,
    weights: ScoringWeights,
    rows: Vec<DerivedRow>,
    /// Row indices ordered by rank, then name.
    by_rank: Vec<usize>,
    loaded_at: DateTime<Utc>,
}

impl ScoredTable {
    /// Run the derivation pipeline over `table` and take ownership of it.
    pub fn build(table: MetricTable, weights: ScoringWeights) -> ScoutResult<Self> {
        let derived = scoring::derive(&table, &weights)?;

        let rows: Vec<DerivedRow> = derived
            .counts
            .into_iter()
            .zip(derived.percentiles)
            .zip(derived.scores)
            .zip(derived.ranks)
            .map(|(((counts, percentiles), opportunity_index), overall_rank)| DerivedRow {
                counts,
                percentiles,
                opportunity_index,
                overall_rank,
            })
            .collect();

        let units = table.units();
        let mut by_rank: Vec<usize> = (0..rows.len()).collect();
        by_rank.sort_by(|&a, &b| {
            rows[a]
                .overall_rank
                .cmp(&rows[b].overall_rank)
                .then_with(|| units[a].name.cmp(&units[b].name))
        });

        if let Some(&top) = by_rank.first() {
            log::info!(
                target: LOG_TARGET,
                "Scored {} units with '{}'; rank 1: '{}' ({})",
                rows.len(),
                weights.version,
                units[top].name,
                rows[top].opportunity_index.round_dp(2)
            );
        }

        Ok(Self {
            table,
            weights,
            rows,
            by_rank,
            loaded_at: Utc::now(),
        })
    }

    /// Load-and-score convenience for the published weights.
    pub fn from_table(table: MetricTable) -> ScoutResult<Self> {
        Self::build(table, ScoringWeights::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn table(&self) -> &MetricTable {
        &self.table
    }

    pub fn warnings(&self) -> &[String] {
        self.table.warnings()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn total_units(&self) -> usize {
        self.rows.len()
    }

    fn scored(&self, i: usize) -> ScoredUnit<'_> {
        let row = &self.rows[i];
        ScoredUnit {
            unit: &self.table.units()[i],
            factor_counts: row.counts,
            percentiles: row.percentiles,
            opportunity_index: row.opportunity_index,
            overall_rank: row.overall_rank,
        }
    }

    /// Every unit with derived fields, in table row order.
    pub fn units(&self) -> impl Iterator<Item = ScoredUnit<'_>> + '_ {
        (0..self.rows.len()).map(move |i| self.scored(i))
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup_by_name(&self, name: &str) -> ScoutResult<ScoredUnit<'_>> {
        self.table
            .position(name)
            .map(|i| self.scored(i))
            .ok_or_else(|| ScoutError::UnitNotFound {
                name: name.to_string(),
            })
    }

    /// Up to `n` units by ascending rank; tied units are listed by name.
    pub fn top_n(&self, n: usize) -> Vec<ScoredUnit<'_>> {
        self.by_rank
            .iter()
            .take(n)
            .map(|&i| self.scored(i))
            .collect()
    }

    pub fn all_units_sorted_by_name(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.units().iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Supply/demand projection of every unit, in table row order.
    pub fn supply_demand_pairs(&self) -> Vec<SupplyDemandPair<'_>> {
        self.units()
            .map(|s| SupplyDemandPair {
                cafe_count: s.unit.cafe_count,
                employee_count: s.unit.employee_count,
                opportunity_index: s.opportunity_index,
                name: &s.unit.name,
            })
            .collect()
    }

    pub fn leaderboard(&self, n: usize) -> Vec<LeaderboardRow> {
        self.top_n(n)
            .into_iter()
            .map(|s| LeaderboardRow {
                rank: s.overall_rank,
                name: s.unit.name.clone(),
                opportunity_index: s.opportunity_index.round_dp(2),
                employee_count: s.unit.employee_count,
                weekday_sales_share: s.unit.weekday_sales_share,
                cafe_count: s.unit.cafe_count,
            })
            .collect()
    }
}

/// Validate a caller-supplied result count. Zero is a valid request for an
/// empty listing; negative counts are rejected.
pub fn requested_count(n: i64) -> ScoutResult<usize> {
    usize::try_from(n).map_err(|_| ScoutError::InvalidInput {
        field: "n".into(),
        reason: format!("requested count must be zero or positive, got {n}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn five_unit_table() -> ScoredTable {
        let units = vec![
            Unit::new("Yeoksam 1", 52_000, dec!(0.86), dec!(0.55), dec!(120)),
            Unit::new("Myeong", 31_000, dec!(0.74), dec!(0.48), dec!(85)),
            Unit::new("Jongno 1.2.3.4", 45_000, dec!(0.88), dec!(0.61), dec!(60)),
            Unit::new("Yeouido", 70_000, dec!(0.91), dec!(0.63), dec!(95)),
            Unit::new("Hongdae", 12_000, dec!(0.52), dec!(0.22), dec!(140)),
        ];
        ScoredTable::from_table(MetricTable::new(units).unwrap()).unwrap()
    }

    #[test]
    fn test_top_n_larger_than_table_returns_all() {
        let t = five_unit_table();
        let top = t.top_n(10);
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].overall_rank <= w[1].overall_rank));
        assert_eq!(top[0].overall_rank, 1);
    }

    #[test]
    fn test_top_zero_is_empty() {
        assert!(five_unit_table().top_n(0).is_empty());
    }

    #[test]
    fn test_lookup_unknown_then_known() {
        let t = five_unit_table();
        assert!(matches!(
            t.lookup_by_name("NonexistentUnit"),
            Err(ScoutError::UnitNotFound { .. })
        ));
        assert_eq!(t.lookup_by_name("Myeong").unwrap().unit.name, "Myeong");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(five_unit_table().lookup_by_name("myeong").is_err());
    }

    #[test]
    fn test_names_sorted() {
        let t = five_unit_table();
        assert_eq!(
            t.all_units_sorted_by_name(),
            vec!["Hongdae", "Jongno 1.2.3.4", "Myeong", "Yeoksam 1", "Yeouido"]
        );
    }

    #[test]
    fn test_supply_demand_pairs_cover_every_unit() {
        let t = five_unit_table();
        let pairs = t.supply_demand_pairs();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[4].name, "Hongdae");
        assert_eq!(pairs[4].cafe_count, dec!(140));
        assert_eq!(pairs[4].employee_count, 12_000);
    }

    #[test]
    fn test_leaderboard_projection() {
        let t = five_unit_table();
        let board = t.leaderboard(3);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].name, t.top_n(1)[0].unit.name);
    }

    #[test]
    fn test_requested_count() {
        assert_eq!(requested_count(0).unwrap(), 0);
        assert_eq!(requested_count(10).unwrap(), 10);
        let err = requested_count(-3).unwrap_err();
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn test_scored_unit_serializes_flat() {
        let t = five_unit_table();
        let json = serde_json::to_value(t.lookup_by_name("Yeouido").unwrap()).unwrap();
        assert_eq!(json["name"], "Yeouido");
        assert!(json.get("opportunityIndex").is_some());
        assert!(json.get("overallRank").is_some());
        assert!(json["percentiles"].get("lowCompetition").is_some());
    }
}
