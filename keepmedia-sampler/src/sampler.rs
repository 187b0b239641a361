//! Weighted random selection without replacement.

use keepmedia_core::{AtRiskCandidate, RandomSource, Station};

use crate::{SamplerWeights, SelectionError};

/// Picks at-risk stations so that no single station dominates impressions.
///
/// Each candidate is weighted by `risk_multiplier / exposure_score`: higher
/// risk and lower prior exposure both raise the odds of being drawn. Draws
/// are made without replacement, re-normalising the remaining weights before
/// every pick.
///
/// The sampler holds configuration only and is safe to share across
/// threads; randomness is supplied per call.
///
/// # Examples
/// ```
/// use keepmedia_core::{AtRiskCandidate, ExposureCounters, RiskTier, Station};
/// use keepmedia_sampler::{ExposureWeightedSampler, RngSource};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = vec![
///     AtRiskCandidate::new(
///         Station::new("a", Some(RiskTier::Critical), None)?,
///         ExposureCounters::new(0, 0),
///     ),
///     AtRiskCandidate::new(
///         Station::new("b", Some(RiskTier::High), None)?,
///         ExposureCounters::new(100, 50),
///     ),
/// ];
/// let mut random = RngSource::seeded(7);
/// let picked = ExposureWeightedSampler::new().select(&pool, 2, &mut random)?;
/// assert_eq!(picked.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExposureWeightedSampler {
    config: SamplerWeights,
    strict_tiers: bool,
}

impl ExposureWeightedSampler {
    /// Construct a sampler with the default weights.
    ///
    /// The pool is trusted to contain only `Critical` and `High` stations;
    /// any other tier silently receives the standard multiplier. Use
    /// [`Self::strict`] to reject such candidates instead.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a sampler with explicit weights.
    ///
    /// # Errors
    /// Returns [`SelectionError::InvalidWeights`] when `weights` fail
    /// [`SamplerWeights::validate`].
    pub fn with_weights(weights: SamplerWeights) -> Result<Self, SelectionError> {
        Ok(Self {
            config: weights.validate()?,
            strict_tiers: false,
        })
    }

    /// Reject candidates outside the `Critical`/`High` tiers.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict_tiers = true;
        self
    }

    /// Return the configured weights.
    #[must_use]
    pub const fn config(&self) -> &SamplerWeights {
        &self.config
    }

    /// Return each candidate's initial selection probability.
    ///
    /// The result is parallel to `pool` and sums to `1.0` within
    /// floating-point tolerance. An empty pool yields an empty vector.
    ///
    /// # Errors
    /// Returns [`SelectionError`] when a candidate is ineligible in strict
    /// mode or a weight is unusable.
    #[expect(
        clippy::float_arithmetic,
        reason = "normalising divides each weight by the total"
    )]
    pub fn normalised_weights(
        &self,
        pool: &[AtRiskCandidate],
    ) -> Result<Vec<f64>, SelectionError> {
        let raw = self.raw_weights(pool)?;
        let total: f64 = raw.iter().sum();
        if !total.is_finite() {
            return Err(SelectionError::NonFiniteTotal);
        }
        Ok(raw.into_iter().map(|weight| weight / total).collect())
    }

    /// Draw up to `count` distinct stations from `pool`.
    ///
    /// Returns `min(count, pool.len())` stations in draw order. An empty pool
    /// or a zero count yields an empty result. The caller is responsible for
    /// recording an impression for every returned station.
    ///
    /// # Errors
    /// Returns [`SelectionError`] when the pool or the random source violate
    /// their preconditions; see the variant docs.
    pub fn select<'a, R>(
        &self,
        pool: &'a [AtRiskCandidate],
        count: usize,
        random: &mut R,
    ) -> Result<Vec<&'a Station>, SelectionError>
    where
        R: RandomSource + ?Sized,
    {
        if pool.is_empty() || count == 0 {
            return Ok(Vec::new());
        }
        let weights = self.normalised_weights(pool)?;
        let mut remaining: Vec<(&'a Station, f64)> = pool
            .iter()
            .map(|candidate| &candidate.station)
            .zip(weights)
            .collect();

        let draws = count.min(pool.len());
        let mut selected = Vec::with_capacity(draws);
        for _ in 0..draws {
            let draw = random.next_unit();
            if !(0.0..1.0).contains(&draw) {
                return Err(SelectionError::DrawOutOfRange { value: draw });
            }
            let total: f64 = remaining.iter().map(|(_, weight)| weight).sum();
            let index = pick_index(&remaining, total, draw);
            let (station, _) = remaining.remove(index);
            selected.push(station);
        }

        log::debug!(
            "selected {} of {} at-risk candidates",
            selected.len(),
            pool.len()
        );
        Ok(selected)
    }

    fn raw_weights(&self, pool: &[AtRiskCandidate]) -> Result<Vec<f64>, SelectionError> {
        pool.iter()
            .map(|candidate| {
                let station = &candidate.station;
                if self.strict_tiers && !station.is_at_risk() {
                    return Err(SelectionError::IneligibleTier {
                        station: station.id.clone(),
                        tier: station.risk_tier,
                    });
                }
                let weight = self.config.weight(candidate);
                if weight.is_finite() && weight > 0.0 {
                    Ok(weight)
                } else {
                    Err(SelectionError::NonFiniteWeight {
                        station: station.id.clone(),
                        weight,
                    })
                }
            })
            .collect()
    }
}

/// Walk the cumulative, re-normalised weights and return the first index
/// whose cumulative share meets `draw`.
///
/// Rounding can leave the final cumulative share just below `draw`; the last
/// candidate is picked in that case so every draw makes progress.
#[expect(
    clippy::float_arithmetic,
    reason = "cumulative walk over normalised weights"
)]
pub(crate) fn pick_index(remaining: &[(&Station, f64)], total: f64, draw: f64) -> usize {
    let mut cumulative = 0.0_f64;
    for (index, (_, weight)) in remaining.iter().enumerate() {
        cumulative += weight / total;
        if draw <= cumulative {
            return index;
        }
    }
    log::warn!(
        "cumulative weight {cumulative} fell short of draw {draw}; picking last remaining candidate"
    );
    remaining.len().saturating_sub(1)
}
