//! Error types raised while ranking stations by distance.

use keepmedia_core::StationId;
use thiserror::Error;

/// Errors raised by [`NearestStationRanker`](crate::NearestStationRanker).
///
/// Every variant is a caller precondition violation; missing coordinates are
/// not an error and are skipped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The visitor coordinate was non-finite or outside WGS84 bounds.
    #[error("origin ({latitude}, {longitude}) is not a valid WGS84 coordinate")]
    InvalidOrigin {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// A site carried coordinates that are non-finite or out of bounds.
    #[error("site of station {station} has invalid coordinate ({latitude}, {longitude})")]
    InvalidSite {
        /// Owning station.
        station: StationId,
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// A site was paired with a station it does not belong to.
    #[error("site owned by {site_owner} was paired with station {station}")]
    MismatchedSite {
        /// Station the site was paired with.
        station: StationId,
        /// Station recorded on the site.
        site_owner: StationId,
    },
}
