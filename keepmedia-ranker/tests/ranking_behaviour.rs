//! Behaviour tests for nearest-station ranking.

use std::cell::RefCell;

use geo::Coord;
use keepmedia_core::{BroadcastSite, Station};
use keepmedia_ranker::{NearestStationRanker, RankedStation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const ORIGIN: Coord<f64> = Coord { x: -75.0, y: 40.0 };

fn station(id: &str) -> Station {
    Station::new(id, None, None).expect("valid station")
}

#[fixture]
fn sites() -> RefCell<Vec<(Station, BroadcastSite)>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn ranked() -> RefCell<Option<Vec<RankedStation>>> {
    RefCell::new(None)
}

fn rank_into(
    sites: &RefCell<Vec<(Station, BroadcastSite)>>,
    ranked: &RefCell<Option<Vec<RankedStation>>>,
    limit: usize,
) {
    let result = NearestStationRanker::new()
        .rank(&sites.borrow(), ORIGIN, limit)
        .expect("rank stations");
    ranked.replace(Some(result));
}

fn ranked_ids(ranked: &RefCell<Option<Vec<RankedStation>>>) -> Vec<String> {
    ranked
        .borrow()
        .as_ref()
        .expect("ranking ran")
        .iter()
        .map(|entry| entry.station.id.as_str().to_owned())
        .collect()
}

#[given("a station broadcasting from the visitor's location")]
fn co_located_station(#[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>) {
    sites.borrow_mut().push((
        station("here"),
        BroadcastSite::located("here", ORIGIN.y, ORIGIN.x),
    ));
}

#[given("a station broadcasting one degree further north")]
fn northern_station(#[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>) {
    sites
        .borrow_mut()
        .push((station("north"), BroadcastSite::located("north", 41.0, -75.0)));
}

#[given("a station with transmitters ten and fifty miles away")]
fn multi_site_station(#[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>) {
    let mut sites = sites.borrow_mut();
    sites.push((station("wide"), BroadcastSite::located("wide", 40.7238, -75.0)));
    sites.push((station("wide"), BroadcastSite::located("wide", 40.1449, -75.0)));
}

#[given("a station whose only site has no coordinates")]
fn unlocated_station(#[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>) {
    sites
        .borrow_mut()
        .push((station("ghost"), BroadcastSite::unlocated("ghost")));
}

#[when("I rank the stations keeping one result")]
fn rank_one(
    #[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>,
    #[from(ranked)] ranked: &RefCell<Option<Vec<RankedStation>>>,
) {
    rank_into(sites, ranked, 1);
}

#[when("I rank the stations keeping five results")]
fn rank_five(
    #[from(sites)] sites: &RefCell<Vec<(Station, BroadcastSite)>>,
    #[from(ranked)] ranked: &RefCell<Option<Vec<RankedStation>>>,
) {
    rank_into(sites, ranked, 5);
}

#[then("only the co-located station is returned at zero miles")]
fn co_located_only(#[from(ranked)] ranked: &RefCell<Option<Vec<RankedStation>>>) {
    assert_eq!(ranked_ids(ranked), vec!["here".to_owned()]);
    let borrowed = ranked.borrow();
    let first = &borrowed.as_ref().expect("ranking ran")[0];
    assert!(first.distance_miles.abs() < f64::EPSILON);
}

#[then("the station appears once at about ten miles")]
fn collapsed_once(#[from(ranked)] ranked: &RefCell<Option<Vec<RankedStation>>>) {
    assert_eq!(ranked_ids(ranked), vec!["wide".to_owned()]);
    let borrowed = ranked.borrow();
    let first = &borrowed.as_ref().expect("ranking ran")[0];
    assert!((first.distance_miles - 10.0).abs() < 0.1);
}

#[then("only the located station is returned")]
fn located_only(#[from(ranked)] ranked: &RefCell<Option<Vec<RankedStation>>>) {
    assert_eq!(ranked_ids(ranked), vec!["north".to_owned()]);
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn closest_station_wins(
    sites: RefCell<Vec<(Station, BroadcastSite)>>,
    ranked: RefCell<Option<Vec<RankedStation>>>,
) {
    let _ = (sites, ranked);
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn multi_transmitter_collapse(
    sites: RefCell<Vec<(Station, BroadcastSite)>>,
    ranked: RefCell<Option<Vec<RankedStation>>>,
) {
    let _ = (sites, ranked);
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn unlocated_sites_ignored(
    sites: RefCell<Vec<(Station, BroadcastSite)>>,
    ranked: RefCell<Option<Vec<RankedStation>>>,
) {
    let _ = (sites, ranked);
}
