//! Read-only access to the station catalogue.
//!
//! The `StationStore` trait is the boundary to the external data store. It
//! hands the algorithms fully resolved inputs: the at-risk pool is already
//! filtered by tier and carries its exposure counters, and sites come paired
//! with their owning station.

use thiserror::Error;

use crate::{AtRiskCandidate, BroadcastSite, Station};

/// Errors surfaced by a [`StationStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached or queried.
    #[error("station store unavailable: {message}")]
    Unavailable {
        /// Backend-specific description.
        message: String,
    },
}

/// Read-only access to persisted stations.
///
/// # Examples
///
/// ```rust
/// use keepmedia_core::{
///     AtRiskCandidate, BroadcastSite, ExposureCounters, RiskTier, Station, StationStore,
///     StoreError,
/// };
///
/// struct Single(AtRiskCandidate);
///
/// impl StationStore for Single {
///     fn at_risk_pool(&self) -> Result<Vec<AtRiskCandidate>, StoreError> {
///         Ok(vec![self.0.clone()])
///     }
///
///     fn broadcast_sites(&self) -> Result<Vec<(Station, BroadcastSite)>, StoreError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let station = Station::new("wesa", Some(RiskTier::Critical), None).unwrap();
/// let store = Single(AtRiskCandidate::new(station, ExposureCounters::default()));
/// assert_eq!(store.at_risk_pool().unwrap().len(), 1);
/// ```
pub trait StationStore {
    /// Return every `Critical` or `High` station with its exposure counters.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend fails.
    fn at_risk_pool(&self) -> Result<Vec<AtRiskCandidate>, StoreError>;

    /// Return every broadcast site paired with its owning station.
    ///
    /// Sites with unknown coordinates may be included; ranking skips them.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend fails.
    fn broadcast_sites(&self) -> Result<Vec<(Station, BroadcastSite)>, StoreError>;
}
