use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales amounts. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fractions in [0, 1] (0.75 = 75%). Never as percentages.
pub type Share = Decimal;

/// Percentile rank of a unit for one metric, in [0, 1].
pub type Percentile = Decimal;

/// Composite opportunity index on the 0-100 scale.
pub type Score = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap query results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_with_metadata_carries_warnings_and_assumptions() {
        let out = with_metadata(
            "opportunity-v1",
            &serde_json::json!({ "weekday_share": "0.3" }),
            vec!["zero sales".into()],
            42,
            dec!(87.5),
        );
        assert_eq!(out.methodology, "opportunity-v1");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.assumptions["weekday_share"], "0.3");
    }
}
