//! Facade crate for the Keep Media Public discovery engine.
//!
//! Re-exports the domain types, the exposure-weighted sampler and the
//! nearest-station ranker, and adds the [`discovery`] helpers that wire them
//! to a [`StationStore`] and an [`ExposureLog`] for a single request.

#![forbid(unsafe_code)]

pub mod discovery;

pub use discovery::{
    DEFAULT_AT_RISK_COUNT, DEFAULT_ORIGIN, DiscoveryError, LocalStationOptions, LocalStations,
    local_stations, resolve_origin, surface_at_risk, surface_at_risk_with,
};
pub use keepmedia_core::{
    AtRiskCandidate, BroadcastSite, ClickKind, ExposureCounters, ExposureEvent, ExposureLog,
    ExposureLogError, ImpressionSlot, RandomSource, RiskTier, Station, StationCategory,
    StationError, StationId, StationStore, StoreError,
};
pub use keepmedia_ranker::{
    EARTH_RADIUS_MILES, NearestStationRanker, RankError, RankedStation, haversine_miles,
};
pub use keepmedia_sampler::{ExposureWeightedSampler, RngSource, SamplerWeights, SelectionError};
