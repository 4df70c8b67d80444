use clap::Args;
use serde_json::Value;
use std::time::Instant;

use super::{envelope, load_scored};
use crate::SourceArgs;

/// Arguments for single-unit queries
#[derive(Args)]
pub struct UnitArgs {
    /// Exact unit name (case-sensitive)
    pub name: String,
}

pub fn run_lookup(source: &SourceArgs, args: UnitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let result = table.lookup_by_name(&args.name)?;
    envelope(&table, started, result)
}

pub fn run_explain(source: &SourceArgs, args: UnitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let result = table.explain(&args.name)?;
    envelope(&table, started, result)
}

pub fn run_profile(source: &SourceArgs, args: UnitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let result = table.profile(&args.name)?;
    envelope(&table, started, result)
}
