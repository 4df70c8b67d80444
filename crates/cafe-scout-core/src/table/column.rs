//! Named metric columns.
//!
//! [`MetricColumn`] is the only string-keyed access path into a [`Unit`]. Every
//! column has one canonical (camelCase) name plus accepted aliases: the
//! snake_case form and the header used by the Seoul commercial-district
//! dataset the tables are exported from.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ScoutError;
use crate::table::unit::{TimeBand, Unit, Weekday};

/// Canonical name of the unit identifier column.
pub const NAME_COLUMN: &str = "name";

/// Accepted headers for the unit identifier column.
pub const NAME_ALIASES: &[&str] = &["name", "unit_name", "표준_행정동_명"];

/// A numeric column of the metric table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricColumn {
    EmployeeCount,
    WeekdaySalesShare,
    EarlyHoursSalesShare,
    CafeCount,
    TimeOfDay(TimeBand),
    DayOfWeek(Weekday),
}

impl MetricColumn {
    /// Every numeric column, in load order.
    pub fn all() -> impl Iterator<Item = MetricColumn> {
        [
            MetricColumn::EmployeeCount,
            MetricColumn::WeekdaySalesShare,
            MetricColumn::EarlyHoursSalesShare,
            MetricColumn::CafeCount,
        ]
        .into_iter()
        .chain(TimeBand::ALL.into_iter().map(MetricColumn::TimeOfDay))
        .chain(Weekday::ALL.into_iter().map(MetricColumn::DayOfWeek))
    }

    pub fn canonical_name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted headers; the first entry is the canonical name.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            MetricColumn::EmployeeCount => &["employeeCount", "employee_count", "총_종사자수"],
            MetricColumn::WeekdaySalesShare => {
                &["weekdaySalesShare", "weekday_sales_share", "평일_매출_비중"]
            }
            MetricColumn::EarlyHoursSalesShare => &[
                "earlyHoursSalesShare",
                "early_hours_sales_share",
                "수혈_시간대_매출_비중",
            ],
            MetricColumn::CafeCount => &["cafeCount", "cafe_count", "카페_수"],
            MetricColumn::TimeOfDay(band) => match band {
                TimeBand::Dawn => &["sales00to06", "sales_00_06", "시간대_00~06_매출_금액"],
                TimeBand::Morning => &["sales06to11", "sales_06_11", "시간대_06~11_매출_금액"],
                TimeBand::Lunch => &["sales11to14", "sales_11_14", "시간대_11~14_매출_금액"],
                TimeBand::Afternoon => &["sales14to17", "sales_14_17", "시간대_14~17_매출_금액"],
                TimeBand::Evening => &["sales17to21", "sales_17_21", "시간대_17~21_매출_금액"],
                TimeBand::Night => &["sales21to24", "sales_21_24", "시간대_21~24_매출_금액"],
            },
            MetricColumn::DayOfWeek(day) => match day {
                Weekday::Monday => &["salesMon", "sales_mon", "월요일_매출_금액"],
                Weekday::Tuesday => &["salesTue", "sales_tue", "화요일_매출_금액"],
                Weekday::Wednesday => &["salesWed", "sales_wed", "수요일_매출_금액"],
                Weekday::Thursday => &["salesThu", "sales_thu", "목요일_매출_금액"],
                Weekday::Friday => &["salesFri", "sales_fri", "금요일_매출_금액"],
                Weekday::Saturday => &["salesSat", "sales_sat", "토요일_매출_금액"],
                Weekday::Sunday => &["salesSun", "sales_sun", "일요일_매출_금액"],
            },
        }
    }

    pub fn matches(self, header: &str) -> bool {
        self.aliases().contains(&header)
    }

    /// Fraction columns must lie in [0, 1].
    pub fn is_share(self) -> bool {
        matches!(
            self,
            MetricColumn::WeekdaySalesShare | MetricColumn::EarlyHoursSalesShare
        )
    }

    /// Read this column from a unit.
    pub fn value(self, unit: &Unit) -> Decimal {
        match self {
            MetricColumn::EmployeeCount => Decimal::from(unit.employee_count),
            MetricColumn::WeekdaySalesShare => unit.weekday_sales_share,
            MetricColumn::EarlyHoursSalesShare => unit.early_hours_sales_share,
            MetricColumn::CafeCount => unit.cafe_count,
            MetricColumn::TimeOfDay(band) => unit.time_of_day_sales.get(band),
            MetricColumn::DayOfWeek(day) => unit.day_of_week_sales.get(day),
        }
    }
}

impl fmt::Display for MetricColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for MetricColumn {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let header = s.trim();
        if let Some(column) = MetricColumn::all().find(|c| c.matches(header)) {
            return Ok(column);
        }
        let reason = if NAME_ALIASES.contains(&header) {
            "column holds unit names, not numeric values".to_string()
        } else {
            "no such column".to_string()
        };
        Err(ScoutError::InvalidColumn {
            column: s.to_string(),
            reason,
        })
    }
}
