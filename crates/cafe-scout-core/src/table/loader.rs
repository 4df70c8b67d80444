//! Table ingestion.
//!
//! CSV and JSON sources are first flattened into a [`RawTable`] of string
//! cells, then resolved against the required columns in one place so both
//! formats share the same schema and cell validation.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ScoutError;
use crate::table::column::{MetricColumn, NAME_ALIASES, NAME_COLUMN};
use crate::table::metric_table::MetricTable;
use crate::table::unit::Unit;
use crate::ScoutResult;

const LOG_TARGET: &str = "cafe_scout::loader";

/// Headers plus string cells, before any typing.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header position of every required column.
struct ColumnLayout {
    name: usize,
    metrics: Vec<(MetricColumn, usize)>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Load a table from a `.csv` or `.json` file.
pub fn load_path(path: &Path) -> ScoutResult<MetricTable> {
    let start = Instant::now();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let table = match extension.as_deref() {
        Some("csv") => load_csv(File::open(path)?)?,
        Some("json") => {
            let mut contents = String::new();
            File::open(path)?.read_to_string(&mut contents)?;
            load_json_str(&contents)?
        }
        _ => {
            return Err(ScoutError::InvalidInput {
                field: "path".into(),
                reason: format!(
                    "unsupported table format for '{}'; expected .csv or .json",
                    path.display()
                ),
            })
        }
    };

    log::info!(
        target: LOG_TARGET,
        "Loaded {} units from '{}' in {:.3}s",
        table.len(),
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(table)
}

/// Load a table from CSV text with a header row.
pub fn load_csv<R: Read>(reader: R) -> ScoutResult<MetricTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    build_table(RawTable { headers, rows })
}

/// Load a table from a JSON array of flat records keyed by column name.
pub fn load_json_str(json: &str) -> ScoutResult<MetricTable> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_str(json)?;

    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).map(json_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    build_table(RawTable { headers, rows })
}

/// Resolve, type and validate a raw table.
pub fn build_table(raw: RawTable) -> ScoutResult<MetricTable> {
    let layout = resolve_layout(&raw.headers)?;
    log::debug!(
        target: LOG_TARGET,
        "Resolved {} required columns across {} headers",
        layout.metrics.len() + 1,
        raw.headers.len()
    );

    let units = raw
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_row(row, i + 1, &layout))
        .collect::<ScoutResult<Vec<Unit>>>()?;

    MetricTable::new(units)
}

// ---------------------------------------------------------------------------
// Schema resolution
// ---------------------------------------------------------------------------

fn resolve_layout(headers: &[String]) -> ScoutResult<ColumnLayout> {
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .rev()
        .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim(), i))
        .collect();

    let find = |aliases: &[&str]| aliases.iter().find_map(|a| positions.get(a).copied());

    let mut missing = Vec::new();
    let name = find(NAME_ALIASES);
    if name.is_none() {
        missing.push(NAME_COLUMN.to_string());
    }

    let mut metrics = Vec::new();
    for column in MetricColumn::all() {
        match find(column.aliases()) {
            Some(i) => metrics.push((column, i)),
            None => missing.push(column.canonical_name().to_string()),
        }
    }

    match name {
        Some(name) if missing.is_empty() => Ok(ColumnLayout { name, metrics }),
        _ => Err(ScoutError::Schema { missing }),
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn parse_row(row: &[String], row_no: usize, layout: &ColumnLayout) -> ScoutResult<Unit> {
    let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");

    let name = cell(layout.name).to_string();
    let mut unit = Unit::new(name, 0, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);

    for &(column, i) in &layout.metrics {
        let value = parse_decimal(cell(i), column, row_no)?;
        match column {
            MetricColumn::EmployeeCount => {
                unit.employee_count = parse_count(value, column, row_no)?;
            }
            MetricColumn::WeekdaySalesShare => unit.weekday_sales_share = value,
            MetricColumn::EarlyHoursSalesShare => unit.early_hours_sales_share = value,
            MetricColumn::CafeCount => unit.cafe_count = value,
            MetricColumn::TimeOfDay(band) => unit.time_of_day_sales.set(band, value),
            MetricColumn::DayOfWeek(day) => unit.day_of_week_sales.set(day, value),
        }
    }
    Ok(unit)
}

fn parse_decimal(cell: &str, column: MetricColumn, row: usize) -> ScoutResult<Decimal> {
    if cell.is_empty() {
        return Err(ScoutError::InvalidColumn {
            column: column.canonical_name().into(),
            reason: format!("missing value at row {row}"),
        });
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .map_err(|_| ScoutError::InvalidColumn {
            column: column.canonical_name().into(),
            reason: format!("non-numeric value '{cell}' at row {row}"),
        })
}

fn parse_count(value: Decimal, column: MetricColumn, row: usize) -> ScoutResult<u64> {
    if value < Decimal::ZERO {
        return Err(ScoutError::InvalidInput {
            field: format!("{column} (row {row})"),
            reason: format!("must be non-negative, got {value}"),
        });
    }
    if !value.fract().is_zero() {
        return Err(ScoutError::InvalidColumn {
            column: column.canonical_name().into(),
            reason: format!("expected a whole number at row {row}, got {value}"),
        });
    }
    value.to_u64().ok_or_else(|| ScoutError::InvalidColumn {
        column: column.canonical_name().into(),
        reason: format!("value {value} at row {row} is out of range"),
    })
}

fn json_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
