//! Transmitter sites and their optional positions.

use geo::Coord;

use crate::StationId;

/// A physical transmitter belonging to exactly one station.
///
/// Coordinates are WGS84 degrees. Either value may be missing in the source
/// data; such sites cannot be placed and are skipped by distance ranking.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use keepmedia_core::BroadcastSite;
///
/// let site = BroadcastSite::located("whyy", 39.95, -75.16);
/// assert_eq!(site.coordinate(), Some(Coord { x: -75.16, y: 39.95 }));
///
/// let unplaced = BroadcastSite::unlocated("whyy");
/// assert!(unplaced.coordinate().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroadcastSite {
    /// Owning station.
    pub station_id: StationId,
    /// Transmitter call sign.
    #[cfg_attr(feature = "serde", serde(default))]
    pub call_sign: String,
    /// City of licence, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
}

impl BroadcastSite {
    /// Construct a site with known coordinates.
    pub fn located(station_id: impl Into<StationId>, latitude: f64, longitude: f64) -> Self {
        Self {
            station_id: station_id.into(),
            call_sign: String::new(),
            city: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Construct a site whose position is unknown.
    pub fn unlocated(station_id: impl Into<StationId>) -> Self {
        Self {
            station_id: station_id.into(),
            call_sign: String::new(),
            city: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Return the site position (`x = longitude`, `y = latitude`) when both
    /// values are known.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coord<f64>> {
        match (self.latitude, self.longitude) {
            (Some(y), Some(x)) => Some(Coord { x, y }),
            _ => None,
        }
    }
}
