//! Request-cycle helpers combining the store, the algorithms and the
//! exposure log.
//!
//! These functions are what a page handler calls: pick the at-risk stations
//! to feature and record that they were shown, or resolve a visitor position
//! to the local stations worth listing.

use geo::Coord;
use keepmedia_core::{
    ExposureLog, ImpressionSlot, RandomSource, Station, StationCategory, StationStore, StoreError,
};
use keepmedia_ranker::{NearestStationRanker, RankError, RankedStation};
use keepmedia_sampler::{ExposureWeightedSampler, SelectionError};
use thiserror::Error;

/// Number of at-risk stations featured per page view.
pub const DEFAULT_AT_RISK_COUNT: usize = 3;

/// Fallback visitor position when geolocation is unavailable (Chicago).
pub const DEFAULT_ORIGIN: Coord<f64> = Coord {
    x: -87.6298,
    y: 41.8781,
};

/// Errors surfaced by the discovery helpers.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The station store could not answer.
    #[error("station store failed")]
    Store(#[from] StoreError),
    /// At-risk selection rejected its input.
    #[error("at-risk selection failed")]
    Selection(#[from] SelectionError),
    /// Distance ranking rejected its input.
    #[error("nearest-station ranking failed")]
    Rank(#[from] RankError),
    /// The search radius was negative or not finite.
    #[error("search radius {value} must be a finite, non-negative number of miles")]
    InvalidRadius {
        /// Rejected radius.
        value: f64,
    },
}

/// Limits applied when listing local stations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalStationOptions {
    /// Maximum number of stations ranked before the radius cut.
    pub limit: usize,
    /// Stations further than this many miles are dropped.
    pub radius_miles: f64,
}

impl Default for LocalStationOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            radius_miles: 100.0,
        }
    }
}

/// Local stations around a visitor, nearest first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalStations {
    /// Closest television station within the radius.
    pub nearest_tv: Option<RankedStation>,
    /// Closest radio station within the radius.
    pub nearest_radio: Option<RankedStation>,
    /// Every station within the radius.
    pub all: Vec<RankedStation>,
}

/// Return `origin`, or [`DEFAULT_ORIGIN`] when the visitor could not be
/// located.
#[must_use]
pub fn resolve_origin(origin: Option<Coord<f64>>) -> Coord<f64> {
    origin.unwrap_or_else(|| {
        log::warn!(
            "visitor location unavailable; falling back to ({}, {})",
            DEFAULT_ORIGIN.y,
            DEFAULT_ORIGIN.x
        );
        DEFAULT_ORIGIN
    })
}

/// Select `count` at-risk stations with the default sampler and record an
/// at-risk impression for each.
///
/// # Errors
/// See [`surface_at_risk_with`].
pub fn surface_at_risk<S, L, R>(
    store: &S,
    exposure_log: &L,
    random: &mut R,
    count: usize,
) -> Result<Vec<Station>, DiscoveryError>
where
    S: StationStore + ?Sized,
    L: ExposureLog + ?Sized,
    R: RandomSource + ?Sized,
{
    surface_at_risk_with(
        &ExposureWeightedSampler::new(),
        store,
        exposure_log,
        random,
        count,
    )
}

/// Select `count` at-risk stations with `sampler` and record an at-risk
/// impression for each.
///
/// Exposure log failures are logged and otherwise ignored; the selection is
/// still returned.
///
/// # Errors
/// Returns [`DiscoveryError::Store`] when the pool cannot be fetched and
/// [`DiscoveryError::Selection`] when the sampler rejects the pool.
pub fn surface_at_risk_with<S, L, R>(
    sampler: &ExposureWeightedSampler,
    store: &S,
    exposure_log: &L,
    random: &mut R,
    count: usize,
) -> Result<Vec<Station>, DiscoveryError>
where
    S: StationStore + ?Sized,
    L: ExposureLog + ?Sized,
    R: RandomSource + ?Sized,
{
    let pool = store.at_risk_pool()?;
    let selected: Vec<Station> = sampler
        .select(&pool, count, random)?
        .into_iter()
        .cloned()
        .collect();
    for station in &selected {
        if let Err(err) = exposure_log.record_impression(&station.id, ImpressionSlot::AtRisk) {
            log::warn!("ignoring exposure log failure: {err}");
        }
    }
    Ok(selected)
}

/// Rank the stations around `origin` and split them by medium.
///
/// # Errors
/// Returns [`DiscoveryError::InvalidRadius`] for a negative or non-finite
/// radius, [`DiscoveryError::Store`] when sites cannot be fetched and
/// [`DiscoveryError::Rank`] for invalid coordinates.
pub fn local_stations<S>(
    store: &S,
    origin: Coord<f64>,
    options: LocalStationOptions,
) -> Result<LocalStations, DiscoveryError>
where
    S: StationStore + ?Sized,
{
    let radius = options.radius_miles;
    if !radius.is_finite() || radius < 0.0 {
        return Err(DiscoveryError::InvalidRadius { value: radius });
    }
    let sites = store.broadcast_sites()?;
    let all: Vec<RankedStation> = NearestStationRanker::new()
        .rank(&sites, origin, options.limit)?
        .into_iter()
        .filter(|entry| entry.distance_miles <= radius)
        .collect();
    let nearest = |category: StationCategory| {
        all.iter()
            .find(|entry| entry.station.category == category)
            .cloned()
    };
    Ok(LocalStations {
        nearest_tv: nearest(StationCategory::Tv),
        nearest_radio: nearest(StationCategory::Radio),
        all,
    })
}
