use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::table::MetricColumn;
use crate::types::Percentile;

/// A column together with the orientation its percentile is taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileColumn {
    pub column: MetricColumn,
    /// `true`: higher raw value scores higher.
    pub ascending: bool,
}

pub const EMPLOYEE_DENSITY: PercentileColumn = PercentileColumn {
    column: MetricColumn::EmployeeCount,
    ascending: true,
};

pub const WEEKDAY_SHARE: PercentileColumn = PercentileColumn {
    column: MetricColumn::WeekdaySalesShare,
    ascending: true,
};

pub const EARLY_HOURS_SHARE: PercentileColumn = PercentileColumn {
    column: MetricColumn::EarlyHoursSalesShare,
    ascending: true,
};

/// Fewer competing cafes scores higher: the descending percentile of the
/// cafe count, not one minus the ascending percentile.
pub const LOW_COMPETITION: PercentileColumn = PercentileColumn {
    column: MetricColumn::CafeCount,
    ascending: false,
};

/// The four weighted factors of the opportunity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    EmployeeDensity,
    WeekdayShare,
    EarlyHoursShare,
    LowCompetition,
}

impl Factor {
    pub const ALL: [Factor; 4] = [
        Factor::EmployeeDensity,
        Factor::WeekdayShare,
        Factor::EarlyHoursShare,
        Factor::LowCompetition,
    ];

    pub fn column(self) -> PercentileColumn {
        match self {
            Factor::EmployeeDensity => EMPLOYEE_DENSITY,
            Factor::WeekdayShare => WEEKDAY_SHARE,
            Factor::EarlyHoursShare => EARLY_HOURS_SHARE,
            Factor::LowCompetition => LOW_COMPETITION,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Factor::EmployeeDensity => "Office density",
            Factor::WeekdayShare => "Weekday sales share",
            Factor::EarlyHoursShare => "Early-hours sales share",
            Factor::LowCompetition => "Low competition",
        }
    }
}

/// The four factor percentiles of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorPercentiles {
    pub employee_density: Percentile,
    pub weekday_share: Percentile,
    pub early_hours_share: Percentile,
    pub low_competition: Percentile,
}

impl FactorPercentiles {
    pub fn get(&self, factor: Factor) -> Percentile {
        match factor {
            Factor::EmployeeDensity => self.employee_density,
            Factor::WeekdayShare => self.weekday_share,
            Factor::EarlyHoursShare => self.early_hours_share,
            Factor::LowCompetition => self.low_competition,
        }
    }
}

/// Per-factor rank counts of one unit: how many units sit at or behind it
/// in the factor's orientation. The percentile is `count / N`.
///
/// Scoring works on these integers and divides by `N` once, so two units
/// whose weighted counts are equal always receive identical indexes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCounts {
    pub employee_density: u64,
    pub weekday_share: u64,
    pub early_hours_share: u64,
    pub low_competition: u64,
}

impl FactorCounts {
    pub fn get(&self, factor: Factor) -> u64 {
        match factor {
            Factor::EmployeeDensity => self.employee_density,
            Factor::WeekdayShare => self.weekday_share,
            Factor::EarlyHoursShare => self.early_hours_share,
            Factor::LowCompetition => self.low_competition,
        }
    }

    /// Percentiles over a table of `total` units.
    pub fn percentiles(&self, total: u64) -> FactorPercentiles {
        let of = |count: u64| {
            if total == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(count) / Decimal::from(total)
            }
        };
        FactorPercentiles {
            employee_density: of(self.employee_density),
            weekday_share: of(self.weekday_share),
            early_hours_share: of(self.early_hours_share),
            low_competition: of(self.low_competition),
        }
    }
}
