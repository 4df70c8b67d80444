use clap::Args;
use serde_json::Value;
use std::time::Instant;

use cafe_scout_core::query::requested_count;

use super::{envelope, load_scored};
use crate::SourceArgs;

/// Arguments for ranked listings
#[derive(Args)]
pub struct CountArgs {
    /// Number of units to list
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub n: i64,
}

pub fn run_top(source: &SourceArgs, args: CountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let n = requested_count(args.n)?;
    let table = load_scored(source)?;
    let result = table.top_n(n);
    envelope(&table, started, result)
}

pub fn run_leaderboard(
    source: &SourceArgs,
    args: CountArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let n = requested_count(args.n)?;
    let table = load_scored(source)?;
    let result = table.leaderboard(n);
    envelope(&table, started, result)
}

pub fn run_names(source: &SourceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let result = table.all_units_sorted_by_name();
    envelope(&table, started, result)
}

pub fn run_pairs(source: &SourceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let table = load_scored(source)?;
    let result = table.supply_demand_pairs();
    envelope(&table, started, result)
}
