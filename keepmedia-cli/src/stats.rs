//! `stats` command implementation.

use std::collections::{BTreeMap, HashMap};

use camino::Utf8PathBuf;
use clap::Parser;
use keepmedia_core::RiskTier;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::dataset::{DatasetStore, load_dataset};
use crate::fs::require_existing;
use crate::{ARG_DATASET, CliError, ENV_STATS_DATASET};

/// Label used for stations without a tier or state.
pub(crate) const UNKNOWN_LABEL: &str = "Unknown";

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "stats",
    long_about = "Summarise a station dataset: station and transmitter \
                 counts, stations per risk tier and stations per state, \
                 most populous state first.",
    about = "Summarise a station dataset"
)]
#[ortho_config(prefix = "KEEPMEDIA")]
pub(crate) struct StatsArgs {
    /// Path to the JSON station dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

impl StatsArgs {
    pub(crate) fn into_config(self) -> Result<StatsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StatsConfig::try_from(merged)
    }
}

/// Resolved `stats` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatsConfig {
    /// Path to the dataset file.
    pub(crate) dataset: Utf8PathBuf,
}

impl TryFrom<StatsArgs> for StatsConfig {
    type Error = CliError;

    fn try_from(args: StatsArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_STATS_DATASET,
        })?;
        Ok(Self { dataset })
    }
}

/// Number of stations in one risk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TierCount {
    pub(crate) risk_tier: String,
    pub(crate) count: usize,
}

/// Number of stations in one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StateCount {
    pub(crate) state: String,
    pub(crate) count: usize,
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DatasetStats {
    pub(crate) stations: usize,
    pub(crate) sites: usize,
    /// Sites with both coordinates known.
    pub(crate) located_sites: usize,
    /// Mean CPB dependency over stations that report one.
    pub(crate) mean_cpb_dependency_pct: Option<f64>,
    /// Tiers in severity order, `Unknown` last; empty tiers are omitted.
    pub(crate) risk_tiers: Vec<TierCount>,
    /// Largest count first, ties by state code.
    pub(crate) states: Vec<StateCount>,
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_stats_with(args, &mut stdout)
}

pub(crate) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.dataset, ARG_DATASET)?;
    let store = load_dataset(&config.dataset)?;
    crate::write_json(writer, &dataset_stats(&store))
}

pub(crate) fn dataset_stats(store: &DatasetStore) -> DatasetStats {
    let stations = store.stations();

    let mut tiers: BTreeMap<Option<RiskTier>, usize> = BTreeMap::new();
    let mut states: HashMap<&str, usize> = HashMap::new();
    let mut dependency_sum = 0.0;
    let mut dependency_count = 0_u32;
    for station in stations {
        *tiers.entry(station.risk_tier).or_default() += 1;
        let state = if station.state.is_empty() {
            UNKNOWN_LABEL
        } else {
            station.state.as_str()
        };
        *states.entry(state).or_default() += 1;
        if let Some(pct) = station.cpb_dependency_pct {
            dependency_sum += pct;
            dependency_count += 1;
        }
    }

    // `None` sorts first in the map; report it after the named tiers.
    let unknown = tiers.remove(&None);
    let risk_tiers = tiers
        .into_iter()
        .filter_map(|(tier, count)| tier.map(|t| (t.as_str(), count)))
        .chain(unknown.map(|count| (UNKNOWN_LABEL, count)))
        .map(|(label, count)| TierCount {
            risk_tier: label.to_owned(),
            count,
        })
        .collect();

    let mut states: Vec<StateCount> = states
        .into_iter()
        .map(|(state, count)| StateCount {
            state: state.to_owned(),
            count,
        })
        .collect();
    states.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.state.cmp(&right.state))
    });

    DatasetStats {
        stations: stations.len(),
        sites: store.sites().len(),
        located_sites: store
            .sites()
            .iter()
            .filter(|site| site.coordinate().is_some())
            .count(),
        mean_cpb_dependency_pct: (dependency_count > 0)
            .then(|| dependency_sum / f64::from(dependency_count)),
        risk_tiers,
        states,
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<StatsConfig, CliError> {
    let merged = StatsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    StatsConfig::try_from(merged)
}
