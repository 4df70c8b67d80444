use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ScoutError;
use crate::table::column::MetricColumn;
use crate::table::unit::Unit;
use crate::ScoutResult;

const LOG_TARGET: &str = "cafe_scout::table";

/// Largest tolerated gap between the stated early-hours share and the share
/// implied by the time-band breakdown before a load warning is raised.
const EARLY_SHARE_TOLERANCE: Decimal = dec!(0.05);

/// Immutable table of administrative units.
///
/// Construction validates every row; a `MetricTable` value therefore always
/// holds at least one unit, unique names and in-range metrics.
#[derive(Debug, Clone)]
pub struct MetricTable {
    units: Vec<Unit>,
    by_name: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl MetricTable {
    pub fn new(units: Vec<Unit>) -> ScoutResult<Self> {
        if units.is_empty() {
            return Err(ScoutError::InsufficientData(
                "metric table has no units".into(),
            ));
        }

        let mut by_name = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            let row = i + 1;
            validate_unit(unit, row)?;
            if by_name.insert(unit.name.clone(), i).is_some() {
                return Err(ScoutError::DuplicateUnit {
                    name: unit.name.clone(),
                    row,
                });
            }
        }

        let warnings: Vec<String> = units.iter().filter_map(consistency_warning).collect();
        for w in &warnings {
            log::warn!(target: LOG_TARGET, "{w}");
        }

        Ok(Self {
            units,
            by_name,
            warnings,
        })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false for a constructed table; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Row index of a unit by exact, case-sensitive name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.position(name).map(|i| &self.units[i])
    }

    /// Values of one numeric column, in row order.
    pub fn column_values(&self, column: MetricColumn) -> Vec<Decimal> {
        self.units.iter().map(|u| column.value(u)).collect()
    }

    /// Non-fatal data-quality findings collected at construction.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn validate_unit(unit: &Unit, row: usize) -> ScoutResult<()> {
    if unit.name.trim().is_empty() {
        return Err(ScoutError::InvalidInput {
            field: format!("name (row {row})"),
            reason: "unit name must not be empty".into(),
        });
    }

    for column in MetricColumn::all() {
        let value = column.value(unit);
        if value < Decimal::ZERO {
            return Err(ScoutError::InvalidInput {
                field: format!("{column} (row {row}, unit '{}')", unit.name),
                reason: format!("must be non-negative, got {value}"),
            });
        }
        if column.is_share() && value > Decimal::ONE {
            return Err(ScoutError::InvalidInput {
                field: format!("{column} (row {row}, unit '{}')", unit.name),
                reason: format!("share must be within [0, 1], got {value}"),
            });
        }
    }
    Ok(())
}

fn consistency_warning(unit: &Unit) -> Option<String> {
    match unit.time_of_day_sales.early_hours_share() {
        None => Some(format!(
            "Unit '{}' has zero total time-of-day sales; its sales breakdown is empty.",
            unit.name
        )),
        Some(implied) => {
            let gap = (implied - unit.early_hours_sales_share).abs();
            (gap > EARLY_SHARE_TOLERANCE).then(|| {
                format!(
                    "Unit '{}' early-hours share {} differs from the 06-14 breakdown share {} by more than {}.",
                    unit.name,
                    unit.early_hours_sales_share,
                    implied.round_dp(4),
                    EARLY_SHARE_TOLERANCE
                )
            })
        }
    }
}
