//! Property-based tests for distance ranking.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `haversine_miles(a, b) == haversine_miles(b, a)`.
//! - **Identity:** a point is zero miles from itself.
//! - **Antipodes:** opposite points are finite and half a circumference apart.
//! - **Uniqueness:** a ranking lists each station at most once.
//! - **Ordering:** rankings are non-decreasing in distance and within limit.

use std::collections::HashSet;

use geo::Coord;
use keepmedia_core::{BroadcastSite, Station};
use keepmedia_ranker::{EARTH_RADIUS_MILES, NearestStationRanker, haversine_miles};
use proptest::prelude::*;

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(y, x)| Coord { x, y })
}

/// Sites spread over a handful of stations so collapsing is exercised.
fn sites_strategy() -> impl Strategy<Value = Vec<(Station, BroadcastSite)>> {
    proptest::collection::vec((0_u8..8, coord_strategy()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(owner, position)| {
                let id = format!("station-{owner}");
                (
                    Station::new(id.clone(), None, None).expect("valid station"),
                    BroadcastSite::located(id, position.y, position.x),
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn distance_is_symmetric(a in coord_strategy(), b in coord_strategy()) {
        let forward = haversine_miles(a, b);
        let backward = haversine_miles(b, a);
        prop_assert!((forward - backward).abs() < 1e-6);
        prop_assert!(forward >= 0.0);
        prop_assert!(forward <= std::f64::consts::PI * EARTH_RADIUS_MILES + 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero(a in coord_strategy()) {
        prop_assert!(haversine_miles(a, a).abs() < 1e-9);
    }

    #[test]
    fn antipodal_distance_is_finite(a in coord_strategy()) {
        let opposite = Coord {
            x: if a.x > 0.0 { a.x - 180.0 } else { a.x + 180.0 },
            y: -a.y,
        };
        let miles = haversine_miles(a, opposite);
        prop_assert!(miles.is_finite(), "{a:?} -> {opposite:?} gave {miles}");
        prop_assert!((miles - std::f64::consts::PI * EARTH_RADIUS_MILES).abs() < 1e-3);

        let sites = vec![(
            Station::new("far", None, None).expect("valid station"),
            BroadcastSite::located("far", opposite.y, opposite.x),
        )];
        let ranked = NearestStationRanker::new()
            .rank(&sites, a, 1)
            .expect("valid inputs rank");
        prop_assert!(ranked.iter().all(|entry| entry.distance_miles.is_finite()));
    }

    #[test]
    fn ranking_is_unique_sorted_and_bounded(
        sites in sites_strategy(),
        origin in coord_strategy(),
        limit in 0_usize..12,
    ) {
        let ranked = NearestStationRanker::new()
            .rank(&sites, origin, limit)
            .expect("valid inputs rank");
        prop_assert!(ranked.len() <= limit);

        let mut seen = HashSet::new();
        for entry in &ranked {
            prop_assert!(seen.insert(entry.station.id.clone()));
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].distance_miles <= pair[1].distance_miles);
        }
    }

    #[test]
    fn ranked_distance_is_the_stations_minimum(
        sites in sites_strategy(),
        origin in coord_strategy(),
    ) {
        let ranked = NearestStationRanker::new()
            .rank(&sites, origin, usize::MAX)
            .expect("valid inputs rank");
        for entry in &ranked {
            let minimum = sites
                .iter()
                .filter(|(station, _)| station.id == entry.station.id)
                .filter_map(|(_, site)| site.coordinate())
                .map(|position| haversine_miles(origin, position))
                .fold(f64::INFINITY, f64::min);
            prop_assert!((entry.distance_miles - minimum).abs() < 1e-9);
        }
    }
}
