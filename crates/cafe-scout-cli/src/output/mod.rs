pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
///
/// The csv and minimal formats have no room for load warnings, so those are
/// sent to the log instead of being dropped.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => {
            log_warnings(value);
            csv_out::print_csv(value)
        }
        OutputFormat::Minimal => {
            log_warnings(value);
            minimal::print_minimal(value)
        }
    }
}

fn log_warnings(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings.iter().filter_map(Value::as_str) {
            log::warn!("{}", w);
        }
    }
}
