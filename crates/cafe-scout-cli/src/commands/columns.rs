use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use cafe_scout_core::scoring::percentile_rank;
use cafe_scout_core::table::MetricColumn;

use super::{envelope, load_scored};
use crate::SourceArgs;

/// Arguments for a raw column percentile pass
#[derive(Args)]
pub struct PercentileArgs {
    /// Column name, e.g. employeeCount, cafeCount, sales11to14, salesMon
    pub column: String,

    /// Rank high values low (share of units at or above each value)
    #[arg(long)]
    pub descending: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnPercentile<'a> {
    name: &'a str,
    value: Decimal,
    percentile: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    total_units: usize,
    weights_version: String,
    published_weights: bool,
    loaded_at: String,
    warning_count: usize,
}

pub fn run_percentile(
    source: &SourceArgs,
    args: PercentileArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let column: MetricColumn = args.column.parse()?;
    let table = load_scored(source)?;

    let percentiles = percentile_rank(table.table(), &args.column, !args.descending)?;
    let result: Vec<ColumnPercentile<'_>> = table
        .table()
        .units()
        .iter()
        .zip(percentiles)
        .map(|(unit, percentile)| ColumnPercentile {
            name: &unit.name,
            value: column.value(unit),
            percentile,
        })
        .collect();
    envelope(&table, started, result)
}

pub fn run_validate(source: &SourceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let weights = table.weights();
    let result = ValidationReport {
        total_units: table.total_units(),
        weights_version: weights.version.clone(),
        published_weights: weights.is_published(),
        loaded_at: table.loaded_at().to_rfc3339(),
        warning_count: table.warnings().len(),
    };
    envelope(&table, started, result)
}
