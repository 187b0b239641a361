//! Unit tests for exposure-weighted selection.

use std::collections::HashSet;

use keepmedia_core::test_support::ScriptedDraws;
use keepmedia_core::{AtRiskCandidate, ExposureCounters, RiskTier, Station};
use rstest::{fixture, rstest};

use crate::sampler::pick_index;
use crate::{ExposureWeightedSampler, RngSource, SelectionError};

fn candidate(id: &str, tier: RiskTier, impressions: u64, clicks: u64) -> AtRiskCandidate {
    AtRiskCandidate::new(
        Station::new(id, Some(tier), None).expect("valid station"),
        ExposureCounters::new(impressions, clicks),
    )
}

fn ids(stations: &[&Station]) -> Vec<String> {
    stations
        .iter()
        .map(|station| station.id.as_str().to_owned())
        .collect()
}

#[fixture]
fn contrasted_pool() -> Vec<AtRiskCandidate> {
    vec![
        candidate("A", RiskTier::Critical, 0, 0),
        candidate("B", RiskTier::High, 100, 50),
    ]
}

#[fixture]
fn uniform_pool() -> Vec<AtRiskCandidate> {
    vec![
        candidate("first", RiskTier::High, 0, 0),
        candidate("second", RiskTier::High, 0, 0),
        candidate("third", RiskTier::High, 0, 0),
    ]
}

#[rstest]
fn empty_pool_yields_empty_selection() {
    let mut draws = ScriptedDraws::new([0.5]);
    let picked = ExposureWeightedSampler::new()
        .select(&[], 3, &mut draws)
        .expect("empty pool is valid");
    assert!(picked.is_empty());
}

#[rstest]
fn zero_count_yields_empty_selection(uniform_pool: Vec<AtRiskCandidate>) {
    let mut draws = ScriptedDraws::new([0.5]);
    let picked = ExposureWeightedSampler::new()
        .select(&uniform_pool, 0, &mut draws)
        .expect("zero count is valid");
    assert!(picked.is_empty());
}

#[rstest]
fn contrasted_pool_returns_both_and_favours_unexposed(contrasted_pool: Vec<AtRiskCandidate>) {
    let sampler = ExposureWeightedSampler::new();
    let shares = sampler
        .normalised_weights(&contrasted_pool)
        .expect("weights");
    let expected_a = 2.0 / (2.0 + 1.0 / 201.0);
    assert!((shares[0] - expected_a).abs() < 1e-12);
    assert!(shares[0] > shares[1]);

    let mut random = RngSource::seeded(11);
    let picked = sampler
        .select(&contrasted_pool, 2, &mut random)
        .expect("select");
    let picked: HashSet<String> = ids(&picked).into_iter().collect();
    assert_eq!(picked, HashSet::from(["A".to_owned(), "B".to_owned()]));
}

#[rstest]
#[case(0.0, "first")]
#[case(0.3, "first")]
#[case(0.5, "second")]
#[case(0.99, "third")]
fn draw_selects_first_cumulative_match(
    uniform_pool: Vec<AtRiskCandidate>,
    #[case] draw: f64,
    #[case] expected: &str,
) {
    let mut draws = ScriptedDraws::new([draw]);
    let picked = ExposureWeightedSampler::new()
        .select(&uniform_pool, 1, &mut draws)
        .expect("select");
    assert_eq!(ids(&picked), vec![expected.to_owned()]);
}

#[rstest]
fn remaining_weights_are_renormalised_between_draws(uniform_pool: Vec<AtRiskCandidate>) {
    // 0.5 picks "second" of three; the next 0.5 falls exactly on the boundary
    // between the two remaining halves and picks "first".
    let mut draws = ScriptedDraws::new([0.5, 0.5, 0.0]);
    let picked = ExposureWeightedSampler::new()
        .select(&uniform_pool, 3, &mut draws)
        .expect("select");
    assert_eq!(
        ids(&picked),
        vec!["second".to_owned(), "first".to_owned(), "third".to_owned()]
    );
}

#[rstest]
fn oversized_count_returns_whole_pool(uniform_pool: Vec<AtRiskCandidate>) {
    let mut random = RngSource::seeded(3);
    let picked = ExposureWeightedSampler::new()
        .select(&uniform_pool, 10, &mut random)
        .expect("select");
    let mut got = ids(&picked);
    got.sort();
    assert_eq!(got, vec!["first", "second", "third"]);
}

#[rstest]
#[case(1.0)]
#[case(-0.1)]
#[case(f64::NAN)]
fn out_of_range_draw_fails_fast(uniform_pool: Vec<AtRiskCandidate>, #[case] draw: f64) {
    let mut draws = ScriptedDraws::new([draw]);
    let err = ExposureWeightedSampler::new()
        .select(&uniform_pool, 1, &mut draws)
        .expect_err("draw outside [0, 1)");
    assert!(matches!(err, SelectionError::DrawOutOfRange { .. }));
}

#[rstest]
fn strict_mode_rejects_lower_tiers() {
    let pool = vec![
        candidate("ok", RiskTier::High, 0, 0),
        candidate("calm", RiskTier::Stable, 0, 0),
    ];
    let mut draws = ScriptedDraws::new([0.1]);
    let err = ExposureWeightedSampler::new()
        .strict()
        .select(&pool, 1, &mut draws)
        .expect_err("stable tier rejected");
    match err {
        SelectionError::IneligibleTier { station, tier } => {
            assert_eq!(station.as_str(), "calm");
            assert_eq!(tier, Some(RiskTier::Stable));
        }
        other => panic!("expected IneligibleTier, found {other:?}"),
    }
}

#[rstest]
fn lenient_mode_weights_lower_tiers_as_standard() {
    let pool = vec![
        candidate("high", RiskTier::High, 0, 0),
        candidate("moderate", RiskTier::Moderate, 0, 0),
    ];
    let shares = ExposureWeightedSampler::new()
        .normalised_weights(&pool)
        .expect("weights");
    assert!((shares[0] - shares[1]).abs() < 1e-12);
}

#[rstest]
fn strict_mode_rejects_missing_tier() {
    let pool = vec![AtRiskCandidate::new(
        Station::new("unrated", None, None).expect("valid station"),
        ExposureCounters::default(),
    )];
    let err = ExposureWeightedSampler::new()
        .strict()
        .normalised_weights(&pool)
        .expect_err("missing tier rejected");
    assert!(matches!(
        err,
        SelectionError::IneligibleTier { tier: None, .. }
    ));
}

#[rstest]
fn pick_index_falls_back_to_last_candidate() {
    let a = Station::new("a", Some(RiskTier::High), None).expect("valid station");
    let b = Station::new("b", Some(RiskTier::High), None).expect("valid station");
    // Weights deliberately sum below the total to mimic accumulated drift.
    let remaining = vec![(&a, 0.4), (&b, 0.4)];
    assert_eq!(pick_index(&remaining, 1.0, 0.95), 1);
}

#[rstest]
fn same_seed_reproduces_order(uniform_pool: Vec<AtRiskCandidate>) {
    let sampler = ExposureWeightedSampler::new();
    let first = sampler
        .select(&uniform_pool, 3, &mut RngSource::seeded(99))
        .expect("select");
    let second = sampler
        .select(&uniform_pool, 3, &mut RngSource::seeded(99))
        .expect("select");
    assert_eq!(ids(&first), ids(&second));
}

#[rstest]
fn first_pick_frequency_tracks_weight_share() {
    let pool = vec![
        candidate("fresh", RiskTier::High, 0, 0),
        candidate("worn", RiskTier::High, 2, 0),
    ];
    let sampler = ExposureWeightedSampler::new();
    let expected = sampler.normalised_weights(&pool).expect("weights")[0];
    let mut random = RngSource::seeded(2024);
    let trials = 10_000_u32;
    let mut fresh_first = 0_u32;
    for _ in 0..trials {
        let picked = sampler.select(&pool, 1, &mut random).expect("select");
        if picked[0].id.as_str() == "fresh" {
            fresh_first += 1;
        }
    }
    let observed = f64::from(fresh_first) / f64::from(trials);
    assert!(
        (observed - expected).abs() < 0.03,
        "observed {observed}, expected {expected}"
    );
}
