//! `search` command implementation.

use std::collections::HashSet;

use camino::Utf8PathBuf;
use clap::Parser;
use keepmedia_core::{Station, StationId};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::dataset::{DatasetStore, load_dataset};
use crate::fs::require_existing;
use crate::{ARG_DATASET, ARG_LIMIT, ARG_QUERY, CliError, ENV_SEARCH_DATASET, ENV_SEARCH_QUERY};

/// Default number of search results.
pub(crate) const DEFAULT_SEARCH_LIMIT: usize = 20;

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "search",
    long_about = "Find stations whose name, call sign or state, or one of \
                 whose transmitters' call sign or city, contains the query. \
                 Matching ignores case. Results are ordered by station name.",
    about = "Search stations by name, call sign, state or city"
)]
#[ortho_config(prefix = "KEEPMEDIA")]
pub(crate) struct SearchArgs {
    /// Path to the JSON station dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Text to look for.
    #[arg(long = ARG_QUERY, value_name = "text")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Maximum number of stations returned (defaults to 20).
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    /// Path to the dataset file.
    pub(crate) dataset: Utf8PathBuf,
    /// Trimmed, non-empty query text.
    pub(crate) query: String,
    /// Maximum number of results.
    pub(crate) limit: usize,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_SEARCH_DATASET,
        })?;
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(CliError::BlankQuery);
        }
        Ok(Self {
            dataset,
            query: trimmed.to_owned(),
            limit: args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        })
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &mut stdout)
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.dataset, ARG_DATASET)?;
    let store = load_dataset(&config.dataset)?;
    let found = search_stations(&store, &config.query, config.limit);
    crate::write_json(writer, &found)
}

/// Return up to `limit` distinct stations matching `query`, ordered by name
/// and then id.
pub(crate) fn search_stations(store: &DatasetStore, query: &str, limit: usize) -> Vec<Station> {
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    let via_sites: HashSet<&StationId> = store
        .sites()
        .iter()
        .filter(|site| hit(&site.call_sign) || site.city.as_deref().is_some_and(hit))
        .map(|site| &site.station_id)
        .collect();

    let mut found: Vec<&Station> = store
        .stations()
        .iter()
        .filter(|station| {
            hit(&station.name)
                || hit(&station.call_sign)
                || hit(&station.state)
                || via_sites.contains(&station.id)
        })
        .collect();
    found.sort_by(|left, right| {
        left.name
            .to_lowercase()
            .cmp(&right.name.to_lowercase())
            .then_with(|| left.id.cmp(&right.id))
    });
    found.truncate(limit);
    log::debug!("search {query:?} matched {} stations", found.len());
    found.into_iter().cloned().collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
