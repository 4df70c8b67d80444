use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Schema error: missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    #[error("Unit not found: '{name}' (lookups are exact and case-sensitive)")]
    UnitNotFound { name: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Duplicate unit name '{name}' at row {row}")]
    DuplicateUnit { name: String, row: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invariant violated in {stage}: {detail}")]
    InvariantViolation { stage: String, detail: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ScoutError {
    fn from(e: serde_json::Error) -> Self {
        ScoutError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for ScoutError {
    fn from(e: csv::Error) -> Self {
        ScoutError::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for ScoutError {
    fn from(e: std::io::Error) -> Self {
        ScoutError::ParseError(e.to_string())
    }
}
