use std::path::Path;

use napi::Result as NapiResult;
use napi_derive::napi;

use cafe_scout_core::query::requested_count;
use cafe_scout_core::scoring::percentile_rank;
use cafe_scout_core::table::{loader, MetricColumn, MetricTable};
use cafe_scout_core::{ScoredTable, ScoringWeights, SharedTable};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_weights(weights_json: Option<String>) -> NapiResult<ScoringWeights> {
    match weights_json {
        Some(json) => {
            let weights: ScoringWeights = serde_json::from_str(&json).map_err(to_napi_error)?;
            weights.validate().map_err(to_napi_error)?;
            Ok(weights)
        }
        None => Ok(ScoringWeights::default()),
    }
}

fn score(table: MetricTable, weights: ScoringWeights) -> NapiResult<ScoredTable> {
    ScoredTable::build(table, weights).map_err(to_napi_error)
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct TableSummary<'a> {
    total_units: usize,
    weights_version: &'a str,
    methodology: String,
    loaded_at: String,
    warnings: &'a [String],
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnPercentile<'a> {
    name: &'a str,
    value: rust_decimal::Decimal,
    percentile: rust_decimal::Decimal,
}

// ---------------------------------------------------------------------------
// Scored table handle
// ---------------------------------------------------------------------------

/// One scored table shared by every query of a dashboard process.
///
/// Each query works on a snapshot, so a concurrent `reload` never shows it a
/// half-replaced table.
#[napi]
pub struct ScoutTable {
    shared: SharedTable,
}

#[napi]
impl ScoutTable {
    /// Load a .csv or .json metrics file and score it.
    #[napi(factory)]
    pub fn load(path: String, weights_json: Option<String>) -> napi::Result<Self> {
        let weights = parse_weights(weights_json)?;
        let table = loader::load_path(Path::new(&path)).map_err(to_napi_error)?;
        Ok(Self {
            shared: SharedTable::new(score(table, weights)?),
        })
    }

    /// Score a JSON array of unit records.
    #[napi(factory)]
    pub fn from_records(records_json: String, weights_json: Option<String>) -> napi::Result<Self> {
        let weights = parse_weights(weights_json)?;
        let table = loader::load_json_str(&records_json).map_err(to_napi_error)?;
        Ok(Self {
            shared: SharedTable::new(score(table, weights)?),
        })
    }

    /// Re-read `path` with the current weights and swap the whole table in.
    /// On error the current table stays in place.
    #[napi]
    pub fn reload(&self, path: String) -> NapiResult<u32> {
        let weights = self.shared.snapshot().weights().clone();
        let table = loader::load_path(Path::new(&path)).map_err(to_napi_error)?;
        let next = score(table, weights)?;
        let units = next.total_units();
        self.shared.replace(next);
        Ok(units as u32)
    }

    #[napi]
    pub fn summary(&self) -> NapiResult<String> {
        let table = self.shared.snapshot();
        let summary = TableSummary {
            total_units: table.total_units(),
            weights_version: &table.weights().version,
            methodology: table.weights().formula(),
            loaded_at: table.loaded_at().to_rfc3339(),
            warnings: table.warnings(),
        };
        serde_json::to_string(&summary).map_err(to_napi_error)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[napi]
    pub fn lookup(&self, name: String) -> NapiResult<String> {
        let table = self.shared.snapshot();
        let unit = table.lookup_by_name(&name).map_err(to_napi_error)?;
        serde_json::to_string(&unit).map_err(to_napi_error)
    }

    #[napi]
    pub fn top_n(&self, n: i64) -> NapiResult<String> {
        let n = requested_count(n).map_err(to_napi_error)?;
        let table = self.shared.snapshot();
        serde_json::to_string(&table.top_n(n)).map_err(to_napi_error)
    }

    #[napi]
    pub fn leaderboard(&self, n: i64) -> NapiResult<String> {
        let n = requested_count(n).map_err(to_napi_error)?;
        let table = self.shared.snapshot();
        serde_json::to_string(&table.leaderboard(n)).map_err(to_napi_error)
    }

    #[napi]
    pub fn names(&self) -> NapiResult<String> {
        let table = self.shared.snapshot();
        serde_json::to_string(&table.all_units_sorted_by_name()).map_err(to_napi_error)
    }

    #[napi]
    pub fn supply_demand_pairs(&self) -> NapiResult<String> {
        let table = self.shared.snapshot();
        serde_json::to_string(&table.supply_demand_pairs()).map_err(to_napi_error)
    }

    #[napi]
    pub fn explain(&self, name: String) -> NapiResult<String> {
        let table = self.shared.snapshot();
        let explanation = table.explain(&name).map_err(to_napi_error)?;
        serde_json::to_string(&explanation).map_err(to_napi_error)
    }

    #[napi]
    pub fn profile(&self, name: String) -> NapiResult<String> {
        let table = self.shared.snapshot();
        let profile = table.profile(&name).map_err(to_napi_error)?;
        serde_json::to_string(&profile).map_err(to_napi_error)
    }

    #[napi]
    pub fn column_percentiles(&self, column: String, descending: bool) -> NapiResult<String> {
        let metric: MetricColumn = column.parse().map_err(to_napi_error)?;
        let table = self.shared.snapshot();
        let percentiles =
            percentile_rank(table.table(), &column, !descending).map_err(to_napi_error)?;
        let rows: Vec<ColumnPercentile<'_>> = table
            .table()
            .units()
            .iter()
            .zip(percentiles)
            .map(|(unit, percentile)| ColumnPercentile {
                name: &unit.name,
                value: metric.value(unit),
                percentile,
            })
            .collect();
        serde_json::to_string(&rows).map_err(to_napi_error)
    }
}
