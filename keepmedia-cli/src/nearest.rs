//! `nearest` command implementation.

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use keepmedia_engine::{
    LocalStationOptions, LocalStations, StationStore, local_stations, resolve_origin,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::dataset::load_dataset;
use crate::fs::require_existing;
use crate::{
    ARG_DATASET, ARG_LATITUDE, ARG_LIMIT, ARG_LONGITUDE, ARG_RADIUS_MILES, CliError,
    ENV_NEAREST_DATASET,
};

/// CLI arguments for the `nearest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "nearest",
    long_about = "Rank the stations in a dataset by great-circle distance \
                 from a coordinate, keeping each station's closest \
                 transmitter. Without a coordinate the central-US fallback \
                 (Chicago) is used.",
    about = "List the stations nearest to a coordinate"
)]
#[ortho_config(prefix = "KEEPMEDIA")]
pub(crate) struct NearestArgs {
    /// Path to the JSON station dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Visitor latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Visitor longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Maximum number of stations ranked (defaults to 20).
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Drop stations further than this many miles (defaults to 100).
    #[arg(long = ARG_RADIUS_MILES, value_name = "miles")]
    #[serde(default)]
    pub(crate) radius_miles: Option<f64>,
}

impl NearestArgs {
    pub(crate) fn into_config(self) -> Result<NearestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearestConfig::try_from(merged)
    }
}

/// Resolved `nearest` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearestConfig {
    /// Path to the dataset file.
    pub(crate) dataset: Utf8PathBuf,
    /// Visitor position, when both halves were supplied.
    pub(crate) origin: Option<Coord<f64>>,
    /// Ranking limit and radius.
    pub(crate) options: LocalStationOptions,
}

impl TryFrom<NearestArgs> for NearestConfig {
    type Error = CliError;

    fn try_from(args: NearestArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_NEAREST_DATASET,
        })?;
        let origin = match (args.latitude, args.longitude) {
            (Some(y), Some(x)) => Some(Coord { x, y }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(CliError::IncompleteCoordinate {
                    provided: ARG_LATITUDE,
                    missing: ARG_LONGITUDE,
                });
            }
            (None, Some(_)) => {
                return Err(CliError::IncompleteCoordinate {
                    provided: ARG_LONGITUDE,
                    missing: ARG_LATITUDE,
                });
            }
        };
        let defaults = LocalStationOptions::default();
        Ok(Self {
            dataset,
            origin,
            options: LocalStationOptions {
                limit: args.limit.unwrap_or(defaults.limit),
                radius_miles: args.radius_miles.unwrap_or(defaults.radius_miles),
            },
        })
    }
}

pub(crate) fn run_nearest(args: NearestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_nearest_with(args, &mut stdout)
}

pub(crate) fn run_nearest_with(args: NearestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.dataset, ARG_DATASET)?;
    let store = load_dataset(&config.dataset)?;
    let local = execute_nearest(&config, &store)?;
    crate::write_json(writer, &local)
}

pub(crate) fn execute_nearest(
    config: &NearestConfig,
    store: &dyn StationStore,
) -> Result<LocalStations, CliError> {
    let origin = resolve_origin(config.origin);
    Ok(local_stations(store, origin, config.options)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearestConfig, CliError> {
    let merged = NearestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearestConfig::try_from(merged)
}
