//! Criterion benchmarks for exposure-weighted selection.
//!
//! Pools mirror production sizes: tens to a few hundred at-risk stations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keepmedia_core::{AtRiskCandidate, ExposureCounters, RiskTier, Station};
use keepmedia_sampler::{ExposureWeightedSampler, RngSource};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn build_pool(size: usize, seed: u64) -> Vec<AtRiskCandidate> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|idx| {
            let tier = if rng.gen_bool(0.3) {
                RiskTier::Critical
            } else {
                RiskTier::High
            };
            let station = Station::new(format!("bench-{idx}"), Some(tier), None)
                .expect("valid station");
            let exposure = ExposureCounters::new(rng.gen_range(0..500), rng.gen_range(0..50));
            AtRiskCandidate::new(station, exposure)
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let sampler = ExposureWeightedSampler::new();
    let mut group = c.benchmark_group("select_three");
    for size in [25_usize, 100, 400] {
        let pool = build_pool(size, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            let mut random = RngSource::seeded(7);
            b.iter(|| {
                let picked = sampler
                    .select(black_box(pool), 3, &mut random)
                    .expect("select");
                black_box(picked.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
