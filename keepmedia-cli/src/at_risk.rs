//! `at-risk` command implementation.

use camino::Utf8PathBuf;
use clap::Parser;
use keepmedia_engine::{
    DEFAULT_AT_RISK_COUNT, ExposureLog, ExposureWeightedSampler, RandomSource, RngSource, Station,
    StationStore, surface_at_risk_with,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::dataset::load_dataset;
use crate::exposure::LogExposureLog;
use crate::fs::require_existing;
use crate::{ARG_COUNT, ARG_DATASET, ARG_SEED, ARG_STRICT_TIERS, CliError, ENV_AT_RISK_DATASET};

/// CLI arguments for the `at-risk` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "at-risk",
    long_about = "Select financially at-risk stations from a dataset using \
                 exposure-weighted sampling without replacement. Stations \
                 shown less often are more likely to be picked. Pass a seed \
                 to reproduce a draw.",
    about = "Pick at-risk stations to feature"
)]
#[ortho_config(prefix = "KEEPMEDIA")]
pub(crate) struct AtRiskArgs {
    /// Path to the JSON station dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Number of stations to pick (defaults to 3).
    #[arg(long = ARG_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Seed for a reproducible draw.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Sample from the whole catalogue and fail if any station sits outside
    /// the Critical and High tiers.
    #[arg(
        long = ARG_STRICT_TIERS,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) strict_tiers: Option<bool>,
}

impl AtRiskArgs {
    pub(crate) fn into_config(self) -> Result<AtRiskConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AtRiskConfig::try_from(merged)
    }
}

/// Resolved `at-risk` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AtRiskConfig {
    /// Path to the dataset file.
    pub(crate) dataset: Utf8PathBuf,
    /// Number of stations to pick.
    pub(crate) count: usize,
    /// Seed for the generator; entropy when absent.
    pub(crate) seed: Option<u64>,
    /// Whether the whole catalogue is sampled and lower tiers abort the run.
    pub(crate) strict_tiers: bool,
}

impl AtRiskConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }

    fn sampler(&self) -> ExposureWeightedSampler {
        let sampler = ExposureWeightedSampler::new();
        if self.strict_tiers {
            sampler.strict()
        } else {
            sampler
        }
    }

    fn random(&self) -> impl RandomSource {
        self.seed
            .map_or_else(RngSource::from_entropy, RngSource::seeded)
    }
}

impl TryFrom<AtRiskArgs> for AtRiskConfig {
    type Error = CliError;

    fn try_from(args: AtRiskArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_AT_RISK_DATASET,
        })?;
        Ok(Self {
            dataset,
            count: args.count.unwrap_or(DEFAULT_AT_RISK_COUNT),
            seed: args.seed,
            strict_tiers: args.strict_tiers.unwrap_or(false),
        })
    }
}

pub(crate) fn run_at_risk(args: AtRiskArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_at_risk_with(args, &LogExposureLog, &mut stdout)
}

pub(crate) fn run_at_risk_with(
    args: AtRiskArgs,
    exposure_log: &dyn ExposureLog,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let store = load_dataset(&config.dataset)?.with_all_tiers(config.strict_tiers);
    let mut random = config.random();
    let picked = execute_at_risk(&config, &store, exposure_log, &mut random)?;
    crate::write_json(writer, &picked)
}

pub(crate) fn execute_at_risk(
    config: &AtRiskConfig,
    store: &dyn StationStore,
    exposure_log: &dyn ExposureLog,
    random: &mut dyn RandomSource,
) -> Result<Vec<Station>, CliError> {
    Ok(surface_at_risk_with(
        &config.sampler(),
        store,
        exposure_log,
        random,
        config.count,
    )?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AtRiskConfig, CliError> {
    let merged = AtRiskArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AtRiskConfig::try_from(merged)
}
