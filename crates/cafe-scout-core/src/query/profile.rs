use rust_decimal::Decimal;
use serde::Serialize;

use crate::query::ScoredTable;
use crate::table::{TimeBand, Weekday};
use crate::types::{Money, Score, Share};
use crate::ScoutResult;

/// One labelled point of a sales series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub amount: Money,
}

/// KPI card and sales rhythm of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitProfile {
    pub name: String,
    pub overall_rank: u32,
    pub total_units: usize,
    /// Rounded to two places for display.
    pub opportunity_index: Score,
    pub employee_count: u64,
    pub weekday_sales_share: Share,
    pub early_hours_sales_share: Share,
    pub cafe_count: Decimal,
    pub time_of_day: Vec<SeriesPoint>,
    pub day_of_week: Vec<SeriesPoint>,
    pub weekend_sales: Money,
    pub peak_time_band: TimeBand,
    pub peak_weekday: Weekday,
}

impl ScoredTable {
    pub fn profile(&self, name: &str) -> ScoutResult<UnitProfile> {
        let scored = self.lookup_by_name(name)?;
        let unit = scored.unit;

        let time_of_day = unit
            .time_of_day_sales
            .iter()
            .map(|(band, amount)| SeriesPoint {
                label: band.label().to_string(),
                amount,
            })
            .collect();
        let day_of_week = unit
            .day_of_week_sales
            .iter()
            .map(|(day, amount)| SeriesPoint {
                label: day.label().to_string(),
                amount,
            })
            .collect();

        Ok(UnitProfile {
            name: unit.name.clone(),
            overall_rank: scored.overall_rank,
            total_units: self.total_units(),
            opportunity_index: scored.opportunity_index.round_dp(2),
            employee_count: unit.employee_count,
            weekday_sales_share: unit.weekday_sales_share,
            early_hours_sales_share: unit.early_hours_sales_share,
            cafe_count: unit.cafe_count,
            time_of_day,
            day_of_week,
            weekend_sales: unit.day_of_week_sales.weekend_total(),
            peak_time_band: unit.time_of_day_sales.peak(),
            peak_weekday: unit.day_of_week_sales.peak(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DayOfWeekSales, MetricTable, TimeOfDaySales, Unit};
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_series_and_peaks() {
        let unit = Unit::new("Yeouido", 70_000, dec!(0.91), dec!(0.6), dec!(95))
            .with_time_of_day_sales(TimeOfDaySales {
                dawn: dec!(0),
                morning: dec!(250),
                lunch: dec!(350),
                afternoon: dec!(200),
                evening: dec!(150),
                night: dec!(50),
            })
            .with_day_of_week_sales(DayOfWeekSales {
                monday: dec!(180),
                tuesday: dec!(200),
                wednesday: dec!(210),
                thursday: dec!(205),
                friday: dec!(190),
                saturday: dec!(10),
                sunday: dec!(5),
            });
        let t = ScoredTable::from_table(MetricTable::new(vec![unit]).unwrap()).unwrap();
        let p = t.profile("Yeouido").unwrap();

        assert_eq!(p.overall_rank, 1);
        assert_eq!(p.total_units, 1);
        assert_eq!(p.time_of_day.len(), 6);
        assert_eq!(p.day_of_week.len(), 7);
        assert_eq!(p.time_of_day[2].label, "11-14");
        assert_eq!(p.day_of_week[6].label, "Sun");
        assert_eq!(p.peak_time_band, TimeBand::Lunch);
        assert_eq!(p.peak_weekday, Weekday::Wednesday);
        assert_eq!(p.weekend_sales, dec!(15));
    }

    #[test]
    fn test_profile_unknown_unit() {
        let t = ScoredTable::from_table(
            MetricTable::new(vec![Unit::new("A", 1, dec!(0.5), dec!(0.5), dec!(1))]).unwrap(),
        )
        .unwrap();
        assert!(t.profile("B").is_err());
    }
}
