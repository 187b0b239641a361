//! Command-line interface for exploring Keep Media station datasets.
//!
//! `keepmedia at-risk` runs the exposure-weighted at-risk selection and
//! `keepmedia nearest` lists the stations around a coordinate. `search` and
//! `stats` look up and summarise the catalogue. Every command reads a JSON
//! dataset and prints its result as pretty JSON on stdout; logs go to stderr.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod at_risk;
mod dataset;
mod error;
mod exposure;
mod fs;
mod nearest;
mod search;
mod stats;

pub use dataset::DatasetError;
pub use error::CliError;

use at_risk::AtRiskArgs;
use nearest::NearestArgs;
use search::SearchArgs;
use stats::StatsArgs;

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_COUNT: &str = "count";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_STRICT_TIERS: &str = "strict-tiers";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_RADIUS_MILES: &str = "radius-miles";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ENV_AT_RISK_DATASET: &str = "KEEPMEDIA_CMDS_AT_RISK_DATASET";
pub(crate) const ENV_NEAREST_DATASET: &str = "KEEPMEDIA_CMDS_NEAREST_DATASET";
pub(crate) const ENV_SEARCH_DATASET: &str = "KEEPMEDIA_CMDS_SEARCH_DATASET";
pub(crate) const ENV_SEARCH_QUERY: &str = "KEEPMEDIA_CMDS_SEARCH_QUERY";
pub(crate) const ENV_STATS_DATASET: &str = "KEEPMEDIA_CMDS_STATS_DATASET";

/// Run the Keep Media CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(&cli.log_level)?;
    match cli.command {
        Command::AtRisk(args) => at_risk::run_at_risk(args),
        Command::Nearest(args) => nearest::run_nearest(args),
        Command::Search(args) => search::run_search(args),
        Command::Stats(args) => stats::run_stats(args),
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "keepmedia",
    about = "Station discovery utilities for the Keep Media Public engine",
    version
)]
struct Cli {
    /// Default log filter when `RUST_LOG` is unset (e.g. "debug").
    #[arg(long, global = true, default_value = "warn", value_name = "filter")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick at-risk stations to feature, favouring the least exposed.
    AtRisk(AtRiskArgs),
    /// List the stations nearest to a coordinate.
    Nearest(NearestArgs),
    /// Search stations by name, call sign, state or transmitter city.
    Search(SearchArgs),
    /// Summarise a dataset by tier and state.
    Stats(StatsArgs),
}

#[cfg(test)]
mod tests;
