//! Percentile ranks.
//!
//! For a column of N values, ascending orientation gives each row
//! `count(v <= x) / N` and descending orientation gives `count(v >= x) / N`.
//! Equal values share one percentile, the highest percentile is exactly 1,
//! and the result depends only on the multiset of values, never on row order.

use rust_decimal::Decimal;

use crate::scoring::PercentileColumn;
use crate::table::{MetricColumn, MetricTable};
use crate::types::Percentile;
use crate::ScoutResult;

/// Percentile rank of every row for a named column, in row order.
///
/// `ascending = true` rewards high raw values; `false` rewards low ones.
pub fn percentile_rank(
    table: &MetricTable,
    column: &str,
    ascending: bool,
) -> ScoutResult<Vec<Percentile>> {
    let column: MetricColumn = column.parse()?;
    Ok(column_percentiles(table, PercentileColumn { column, ascending }))
}

/// Percentile rank of every row for a typed, oriented column.
pub fn column_percentiles(table: &MetricTable, source: PercentileColumn) -> Vec<Percentile> {
    percentiles(&table.column_values(source.column), source.ascending)
}

/// Rank count of every row for a typed, oriented column.
pub fn column_counts(table: &MetricTable, source: PercentileColumn) -> Vec<u64> {
    rank_counts(&table.column_values(source.column), source.ascending)
}

/// Percentile rank of each value within `values`.
pub fn percentiles(values: &[Decimal], ascending: bool) -> Vec<Percentile> {
    let total = Decimal::from(values.len() as u64);
    rank_counts(values, ascending)
        .into_iter()
        .map(|count| Decimal::from(count) / total)
        .collect()
}

/// Numerator of each value's percentile: `count(v <= x)` ascending,
/// `count(v >= x)` descending.
pub fn rank_counts(values: &[Decimal], ascending: bool) -> Vec<u64> {
    let n = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    values
        .iter()
        .map(|v| {
            let count = if ascending {
                sorted.partition_point(|x| x <= v)
            } else {
                n - sorted.partition_point(|x| x < v)
            };
            count as u64
        })
        .collect()
}
