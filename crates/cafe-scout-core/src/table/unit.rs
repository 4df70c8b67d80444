//! Raw per-unit record.
//!
//! One [`Unit`] is one administrative unit ("dong") with the raw metrics the
//! scoring pipeline consumes. The time-of-day and day-of-week breakdowns are
//! fixed-size records keyed by [`TimeBand`] and [`Weekday`], so the key set is
//! closed at compile time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Share};

// ---------------------------------------------------------------------------
// Breakdown keys
// ---------------------------------------------------------------------------

/// The six sales time bands, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    /// 00:00-06:00
    Dawn,
    /// 06:00-11:00
    Morning,
    /// 11:00-14:00
    Lunch,
    /// 14:00-17:00
    Afternoon,
    /// 17:00-21:00
    Evening,
    /// 21:00-24:00
    Night,
}

impl TimeBand {
    pub const ALL: [TimeBand; 6] = [
        TimeBand::Dawn,
        TimeBand::Morning,
        TimeBand::Lunch,
        TimeBand::Afternoon,
        TimeBand::Evening,
        TimeBand::Night,
    ];

    /// Hour range label, e.g. "06-11".
    pub fn label(self) -> &'static str {
        match self {
            TimeBand::Dawn => "00-06",
            TimeBand::Morning => "06-11",
            TimeBand::Lunch => "11-14",
            TimeBand::Afternoon => "14-17",
            TimeBand::Evening => "17-21",
            TimeBand::Night => "21-24",
        }
    }

    /// Whether the band falls inside the 06:00-14:00 early-hours window.
    pub fn is_early_hours(self) -> bool {
        matches!(self, TimeBand::Morning | TimeBand::Lunch)
    }
}

/// Days of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

// ---------------------------------------------------------------------------
// Breakdown records
// ---------------------------------------------------------------------------

/// Sales amount per time band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDaySales {
    pub dawn: Money,
    pub morning: Money,
    pub lunch: Money,
    pub afternoon: Money,
    pub evening: Money,
    pub night: Money,
}

impl TimeOfDaySales {
    pub fn get(&self, band: TimeBand) -> Money {
        match band {
            TimeBand::Dawn => self.dawn,
            TimeBand::Morning => self.morning,
            TimeBand::Lunch => self.lunch,
            TimeBand::Afternoon => self.afternoon,
            TimeBand::Evening => self.evening,
            TimeBand::Night => self.night,
        }
    }

    pub fn set(&mut self, band: TimeBand, amount: Money) {
        let slot = match band {
            TimeBand::Dawn => &mut self.dawn,
            TimeBand::Morning => &mut self.morning,
            TimeBand::Lunch => &mut self.lunch,
            TimeBand::Afternoon => &mut self.afternoon,
            TimeBand::Evening => &mut self.evening,
            TimeBand::Night => &mut self.night,
        };
        *slot = amount;
    }

    /// (band, amount) pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeBand, Money)> + '_ {
        TimeBand::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn total(&self) -> Money {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Share of sales inside the early-hours window, or `None` when there
    /// are no sales at all.
    pub fn early_hours_share(&self) -> Option<Share> {
        let total = self.total();
        if total.is_zero() {
            return None;
        }
        let early: Money = self
            .iter()
            .filter(|(b, _)| b.is_early_hours())
            .map(|(_, v)| v)
            .sum();
        Some(early / total)
    }

    /// Band with the highest sales; ties go to the earliest band.
    pub fn peak(&self) -> TimeBand {
        let mut best = TimeBand::Dawn;
        for (band, amount) in self.iter() {
            if amount > self.get(best) {
                best = band;
            }
        }
        best
    }
}

/// Sales amount per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOfWeekSales {
    pub monday: Money,
    pub tuesday: Money,
    pub wednesday: Money,
    pub thursday: Money,
    pub friday: Money,
    pub saturday: Money,
    pub sunday: Money,
}

impl DayOfWeekSales {
    pub fn get(&self, day: Weekday) -> Money {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
            Weekday::Sunday => self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, amount: Money) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Money)> + '_ {
        Weekday::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn total(&self) -> Money {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Saturday plus Sunday sales.
    pub fn weekend_total(&self) -> Money {
        self.iter()
            .filter(|(day, _)| day.is_weekend())
            .map(|(_, v)| v)
            .sum()
    }

    /// Day with the highest sales; ties go to the earliest day.
    pub fn peak(&self) -> Weekday {
        let mut best = Weekday::Monday;
        for (day, amount) in self.iter() {
            if amount > self.get(best) {
                best = day;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Unit
// ---------------------------------------------------------------------------

/// One administrative unit with its raw metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub name: String,
    pub employee_count: u64,
    pub weekday_sales_share: Share,
    pub early_hours_sales_share: Share,
    pub cafe_count: Decimal,
    pub time_of_day_sales: TimeOfDaySales,
    pub day_of_week_sales: DayOfWeekSales,
}

impl Unit {
    /// A unit with the four ranked metrics set and empty sales breakdowns.
    pub fn new(
        name: impl Into<String>,
        employee_count: u64,
        weekday_sales_share: Share,
        early_hours_sales_share: Share,
        cafe_count: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            employee_count,
            weekday_sales_share,
            early_hours_sales_share,
            cafe_count,
            time_of_day_sales: TimeOfDaySales::default(),
            day_of_week_sales: DayOfWeekSales::default(),
        }
    }

    pub fn with_time_of_day_sales(mut self, sales: TimeOfDaySales) -> Self {
        self.time_of_day_sales = sales;
        self
    }

    pub fn with_day_of_week_sales(mut self, sales: DayOfWeekSales) -> Self {
        self.day_of_week_sales = sales;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_time_sales() -> TimeOfDaySales {
        TimeOfDaySales {
            dawn: dec!(10),
            morning: dec!(300),
            lunch: dec!(450),
            afternoon: dec!(150),
            evening: dec!(70),
            night: dec!(20),
        }
    }

    #[test]
    fn test_early_hours_share_from_breakdown() {
        // (300 + 450) / 1000
        assert_eq!(sample_time_sales().early_hours_share(), Some(dec!(0.75)));
    }

    #[test]
    fn test_early_hours_share_without_sales() {
        assert_eq!(TimeOfDaySales::default().early_hours_share(), None);
    }

    #[test]
    fn test_time_band_peak() {
        assert_eq!(sample_time_sales().peak(), TimeBand::Lunch);
    }

    #[test]
    fn test_peak_ties_resolve_to_earliest() {
        let mut sales = DayOfWeekSales::default();
        sales.set(Weekday::Wednesday, dec!(5));
        sales.set(Weekday::Friday, dec!(5));
        assert_eq!(sales.peak(), Weekday::Wednesday);
        assert_eq!(DayOfWeekSales::default().peak(), Weekday::Monday);
    }

    #[test]
    fn test_set_then_get_each_band() {
        let mut sales = TimeOfDaySales::default();
        for (i, band) in TimeBand::ALL.into_iter().enumerate() {
            sales.set(band, Decimal::from(i as u64 + 1));
        }
        assert_eq!(sales.get(TimeBand::Night), dec!(6));
        assert_eq!(sales.total(), dec!(21));
    }

    #[test]
    fn test_unit_serializes_camel_case() {
        let unit = Unit::new("Yeoksam 1", 120, dec!(0.8), dec!(0.5), dec!(12));
        let json = serde_json::to_value(&unit).unwrap();
        assert!(json.get("employeeCount").is_some());
        assert!(json.get("cafeCount").is_some());
        assert!(json.get("timeOfDaySales").is_some());
    }

    #[test]
    fn test_weekend_days() {
        let weekend: Vec<Weekday> = Weekday::ALL.into_iter().filter(|d| d.is_weekend()).collect();
        assert_eq!(weekend, vec![Weekday::Saturday, Weekday::Sunday]);
    }
}
