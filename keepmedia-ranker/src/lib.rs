//! Nearest-station ranking for visitor locations.
//!
//! Distances use the haversine formula on a sphere of
//! [`EARTH_RADIUS_MILES`]. [`NearestStationRanker`] collapses stations with
//! several transmitters to their closest site before ordering, so each
//! station appears at most once in a ranking.

#![forbid(unsafe_code)]

mod error;
mod haversine;
mod ranker;

pub use error::RankError;
pub use haversine::{EARTH_RADIUS_MILES, haversine_miles};
pub use ranker::{NearestStationRanker, RankedStation};
