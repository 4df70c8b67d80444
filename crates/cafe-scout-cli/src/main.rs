mod commands;
mod input;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::columns::PercentileArgs;
use commands::rankings::CountArgs;
use commands::units::UnitArgs;

/// Office-district cafe opportunity rankings
#[derive(Parser)]
#[command(
    name = "scout",
    version,
    about = "Office-district cafe opportunity rankings",
    long_about = "Loads a per-unit metrics table (CSV or JSON), scores every unit with \
                  the opportunity index and answers one query against the ranked table: \
                  top-N, lookup, explain, profile, names, supply/demand pairs or a raw \
                  column percentile."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: SourceArgs,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where the metrics table and the scoring weights come from
#[derive(Args)]
pub struct SourceArgs {
    /// Path to the metrics table (.csv or .json); a JSON array on stdin also works
    #[arg(long, env = "CAFE_SCOUT_DATA", global = true)]
    pub data: Option<String>,

    /// Path to alternative scoring weights (.yaml, .yml or .json)
    #[arg(long, global = true)]
    pub weights: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Best-ranked units, ties listed by name
    Top(CountArgs),
    /// Top-N summary table (rank, name, index, employees, weekday share, cafes)
    Leaderboard(CountArgs),
    /// One unit with its percentiles, index and rank
    Lookup(UnitArgs),
    /// Break a unit's index down into its weighted components
    Explain(UnitArgs),
    /// KPI card and sales rhythm of one unit
    Profile(UnitArgs),
    /// All unit names in alphabetical order
    Names,
    /// Cafe count vs employee count for every unit
    Pairs,
    /// Percentile rank of every unit for one raw column
    Percentile(PercentileArgs),
    /// Load and score the table, then report its size and load warnings
    Validate,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Warn);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Top(args) => commands::rankings::run_top(&cli.source, args),
        Commands::Leaderboard(args) => commands::rankings::run_leaderboard(&cli.source, args),
        Commands::Lookup(args) => commands::units::run_lookup(&cli.source, args),
        Commands::Explain(args) => commands::units::run_explain(&cli.source, args),
        Commands::Profile(args) => commands::units::run_profile(&cli.source, args),
        Commands::Names => commands::rankings::run_names(&cli.source),
        Commands::Pairs => commands::rankings::run_pairs(&cli.source),
        Commands::Percentile(args) => commands::columns::run_percentile(&cli.source, args),
        Commands::Validate => commands::columns::run_validate(&cli.source),
        Commands::Version => {
            println!("scout {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
