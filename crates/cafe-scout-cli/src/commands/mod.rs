pub mod columns;
pub mod rankings;
pub mod units;

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use cafe_scout_core::table::loader;
use cafe_scout_core::types::with_metadata;
use cafe_scout_core::{ScoredTable, ScoringWeights};

use crate::input;
use crate::SourceArgs;

/// Load the metrics table and score it with the requested weights.
pub fn load_scored(source: &SourceArgs) -> Result<ScoredTable, Box<dyn std::error::Error>> {
    let weights = match source.weights {
        Some(ref path) => input::file::read_weights(path)?,
        None => ScoringWeights::default(),
    };

    let table = if let Some(ref path) = source.data {
        let canonical = input::file::resolve_path(path)?;
        loader::load_path(&canonical)?
    } else if let Some(json) = input::stdin::read_stdin()? {
        loader::load_json_str(&json)?
    } else {
        return Err(
            "--data <file.csv|file.json>, CAFE_SCOUT_DATA or a JSON array on stdin required"
                .into(),
        );
    };

    Ok(ScoredTable::build(table, weights)?)
}

/// Wrap a query result in the standard output envelope.
pub fn envelope<T: Serialize>(
    table: &ScoredTable,
    started: Instant,
    result: T,
) -> Result<Value, Box<dyn std::error::Error>> {
    let weights = table.weights();
    let output = with_metadata(
        &weights.formula(),
        weights,
        table.warnings().to_vec(),
        started.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
