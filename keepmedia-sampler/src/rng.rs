//! `RandomSource` adapters over `rand` generators.

use keepmedia_core::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Adapt any `rand` generator into a [`RandomSource`].
///
/// # Examples
/// ```
/// use keepmedia_core::RandomSource;
/// use keepmedia_sampler::RngSource;
///
/// let mut first = RngSource::seeded(42);
/// let mut second = RngSource::seeded(42);
/// let draw = first.next_unit();
/// assert!((0.0..1.0).contains(&draw));
/// assert_eq!(draw, second.next_unit());
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Source seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}
