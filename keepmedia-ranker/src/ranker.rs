//! Resolve a visitor coordinate to the closest stations.

use std::collections::HashMap;

use geo::Coord;
use keepmedia_core::{BroadcastSite, Station, StationId};

use crate::{RankError, haversine_miles};

/// A station paired with its closest transmitter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedStation {
    /// The ranked station.
    pub station: Station,
    /// Its transmitter nearest to the origin.
    pub site: BroadcastSite,
    /// Great-circle distance from the origin, in miles.
    pub distance_miles: f64,
}

/// Ranks stations by the great-circle distance of their nearest site.
///
/// A station with several transmitters is represented once, by its closest
/// site with known coordinates. Sites missing either coordinate are skipped.
/// Radius cutoffs and category splits are presentation concerns left to the
/// caller.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use keepmedia_core::{BroadcastSite, Station};
/// use keepmedia_ranker::NearestStationRanker;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let here = Station::new("here", None, None)?;
/// let north = Station::new("north", None, None)?;
/// let sites = vec![
///     (here.clone(), BroadcastSite::located("here", 40.0, -75.0)),
///     (north.clone(), BroadcastSite::located("north", 41.0, -75.0)),
/// ];
/// let ranked = NearestStationRanker::new().rank(&sites, Coord { x: -75.0, y: 40.0 }, 1)?;
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].station.id.as_str(), "here");
/// assert_eq!(ranked[0].distance_miles, 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestStationRanker;

impl NearestStationRanker {
    /// Construct a ranker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rank `sites` by distance from `origin`, returning at most `limit`
    /// stations nearest-first.
    ///
    /// Equal distances are ordered by station id so output is deterministic.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidOrigin`] for a non-finite or out-of-bounds
    /// origin, [`RankError::InvalidSite`] for a site with unusable
    /// coordinates, and [`RankError::MismatchedSite`] when a site is paired
    /// with a station it does not belong to.
    pub fn rank(
        &self,
        sites: &[(Station, BroadcastSite)],
        origin: Coord<f64>,
        limit: usize,
    ) -> Result<Vec<RankedStation>, RankError> {
        if !is_valid_coordinate(origin) {
            return Err(RankError::InvalidOrigin {
                latitude: origin.y,
                longitude: origin.x,
            });
        }

        let mut nearest: HashMap<&StationId, (usize, f64)> = HashMap::new();
        let mut skipped = 0_usize;
        for (index, (station, site)) in sites.iter().enumerate() {
            let Some(position) = site_position(station, site)? else {
                skipped = skipped.saturating_add(1);
                continue;
            };
            let distance = haversine_miles(origin, position);
            nearest
                .entry(&station.id)
                .and_modify(|best| {
                    if distance < best.1 {
                        *best = (index, distance);
                    }
                })
                .or_insert((index, distance));
        }

        let mut ordered: Vec<(&StationId, usize, f64)> = nearest
            .into_iter()
            .map(|(id, (index, distance))| (id, index, distance))
            .collect();
        ordered.sort_by(|left, right| {
            left.2
                .total_cmp(&right.2)
                .then_with(|| left.0.cmp(right.0))
        });
        ordered.truncate(limit);

        log::debug!(
            "ranked {} stations from {} sites ({skipped} without coordinates)",
            ordered.len(),
            sites.len()
        );

        Ok(ordered
            .into_iter()
            .filter_map(|(_, index, distance_miles)| {
                sites.get(index).map(|(station, site)| RankedStation {
                    station: station.clone(),
                    site: site.clone(),
                    distance_miles,
                })
            })
            .collect())
    }
}

fn site_position(
    station: &Station,
    site: &BroadcastSite,
) -> Result<Option<Coord<f64>>, RankError> {
    if site.station_id != station.id {
        return Err(RankError::MismatchedSite {
            station: station.id.clone(),
            site_owner: site.station_id.clone(),
        });
    }
    let Some(position) = site.coordinate() else {
        return Ok(None);
    };
    if is_valid_coordinate(position) {
        Ok(Some(position))
    } else {
        Err(RankError::InvalidSite {
            station: station.id.clone(),
            latitude: position.y,
            longitude: position.x,
        })
    }
}

fn is_valid_coordinate(position: Coord<f64>) -> bool {
    position.x.is_finite()
        && position.y.is_finite()
        && (-90.0..=90.0).contains(&position.y)
        && (-180.0..=180.0).contains(&position.x)
}
