//! JSON station datasets and the in-memory store built from them.
//!
//! A dataset bundles the station catalogue, transmitter sites and the
//! trailing exposure counters:
//!
//! ```json
//! {
//!   "stations": [{ "id": "wxpn", "risk_tier": "High" }],
//!   "sites": [{ "station_id": "wxpn", "latitude": 39.95, "longitude": -75.16 }],
//!   "exposure": { "wxpn": { "impressions": 12, "clicks": 1 } }
//! }
//! ```

use std::collections::HashMap;
use std::io::BufReader;

use camino::Utf8Path;
use keepmedia_core::{
    AtRiskCandidate, BroadcastSite, ExposureCounters, Station, StationError, StationId,
    StationStore, StoreError,
};
use serde::Deserialize;
use thiserror::Error;

use crate::CliError;
use crate::fs::open_utf8_file;

/// Raw dataset document as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Dataset {
    #[serde(default)]
    pub(crate) stations: Vec<Station>,
    #[serde(default)]
    pub(crate) sites: Vec<BroadcastSite>,
    #[serde(default)]
    pub(crate) exposure: HashMap<StationId, ExposureCounters>,
}

/// Consistency problems found in a decoded dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Two stations share an id.
    #[error("station {0} is listed more than once")]
    DuplicateStation(StationId),
    /// A site references a station that is not in the catalogue.
    #[error("site {call_sign:?} belongs to unknown station {station}")]
    UnknownStation {
        station: StationId,
        call_sign: String,
    },
    /// A station failed its own validation.
    #[error(transparent)]
    InvalidStation(#[from] StationError),
}

/// `StationStore` over a validated, fully loaded dataset.
///
/// The at-risk pool holds only `Critical` and `High` stations unless the
/// store was switched to offer the whole catalogue.
#[derive(Debug, Clone, Default)]
pub(crate) struct DatasetStore {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    sites: Vec<BroadcastSite>,
    exposure: HashMap<StationId, ExposureCounters>,
    all_tiers: bool,
}

impl DatasetStore {
    pub(crate) fn from_dataset(dataset: Dataset) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(dataset.stations.len());
        for (position, station) in dataset.stations.iter().enumerate() {
            station.validate()?;
            if index.insert(station.id.clone(), position).is_some() {
                return Err(DatasetError::DuplicateStation(station.id.clone()));
            }
        }
        if let Some(orphan) = dataset
            .sites
            .iter()
            .find(|site| !index.contains_key(&site.station_id))
        {
            return Err(DatasetError::UnknownStation {
                station: orphan.station_id.clone(),
                call_sign: orphan.call_sign.clone(),
            });
        }
        let unused = dataset
            .exposure
            .keys()
            .filter(|id| !index.contains_key(*id))
            .count();
        if unused > 0 {
            log::warn!("ignoring exposure counters for {unused} unknown stations");
        }
        Ok(Self {
            stations: dataset.stations,
            index,
            sites: dataset.sites,
            exposure: dataset.exposure,
            all_tiers: false,
        })
    }

    /// Offer every catalogued station to the sampler, not just the at-risk
    /// tiers.
    #[must_use]
    pub(crate) const fn with_all_tiers(mut self, all_tiers: bool) -> Self {
        self.all_tiers = all_tiers;
        self
    }

    pub(crate) fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub(crate) fn sites(&self) -> &[BroadcastSite] {
        &self.sites
    }

    fn station(&self, id: &StationId) -> Option<&Station> {
        self.index
            .get(id)
            .and_then(|position| self.stations.get(*position))
    }
}

impl StationStore for DatasetStore {
    fn at_risk_pool(&self) -> Result<Vec<AtRiskCandidate>, StoreError> {
        Ok(self
            .stations
            .iter()
            .filter(|station| self.all_tiers || station.is_at_risk())
            .map(|station| {
                let counters = self.exposure.get(&station.id).copied().unwrap_or_default();
                AtRiskCandidate::new(station.clone(), counters)
            })
            .collect())
    }

    fn broadcast_sites(&self) -> Result<Vec<(Station, BroadcastSite)>, StoreError> {
        self.sites
            .iter()
            .map(|site| {
                self.station(&site.station_id)
                    .map(|station| (station.clone(), site.clone()))
                    .ok_or_else(|| StoreError::Unavailable {
                        message: format!("site references unknown station {}", site.station_id),
                    })
            })
            .collect()
    }
}

/// Load and validate the dataset at `path`.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<DatasetStore, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDataset {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let dataset: Dataset =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseDataset {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "loaded dataset {path}: {} stations, {} sites",
        dataset.stations.len(),
        dataset.sites.len()
    );
    DatasetStore::from_dataset(dataset).map_err(|source| CliError::InvalidDataset {
        path: path.to_path_buf(),
        source,
    })
}
