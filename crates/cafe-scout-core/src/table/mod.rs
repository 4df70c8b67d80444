pub mod column;
pub mod loader;
pub mod metric_table;
pub mod unit;

pub use column::MetricColumn;
pub use metric_table::MetricTable;
pub use unit::{DayOfWeekSales, TimeBand, TimeOfDaySales, Unit, Weekday};
