//! Tunable weights that turn risk and exposure into selection odds.

use keepmedia_core::{AtRiskCandidate, ExposureCounters, RiskTier};

use crate::SelectionError;

/// Multipliers applied when weighting at-risk candidates.
///
/// The defaults give `Critical` stations double odds and count a click as
/// twice an impression, i.e. `weight = multiplier / (1 + impressions + 2 *
/// clicks)`.
///
/// # Examples
/// ```
/// use keepmedia_core::{ExposureCounters, RiskTier};
/// use keepmedia_sampler::SamplerWeights;
///
/// let weights = SamplerWeights::default();
/// assert_eq!(weights.risk_multiplier(Some(RiskTier::Critical)), 2.0);
/// assert_eq!(weights.exposure_score(ExposureCounters::new(100, 50)), 201.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerWeights {
    /// Multiplier for `Critical` stations.
    pub critical_multiplier: f64,
    /// Multiplier for every other tier.
    pub standard_multiplier: f64,
    /// Exposure cost of one impression.
    pub impression_weight: f64,
    /// Exposure cost of one click.
    pub click_weight: f64,
}

impl Default for SamplerWeights {
    fn default() -> Self {
        Self {
            critical_multiplier: 2.0,
            standard_multiplier: 1.0,
            impression_weight: 1.0,
            click_weight: 2.0,
        }
    }
}

impl SamplerWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`SelectionError::InvalidWeights`] when a value is not finite,
    /// a multiplier is not positive, or an exposure weight is negative.
    pub fn validate(self) -> Result<Self, SelectionError> {
        let values = [
            self.critical_multiplier,
            self.standard_multiplier,
            self.impression_weight,
            self.click_weight,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(SelectionError::InvalidWeights {
                reason: "weights must be finite",
            });
        }
        if self.critical_multiplier <= 0.0 || self.standard_multiplier <= 0.0 {
            return Err(SelectionError::InvalidWeights {
                reason: "risk multipliers must be positive",
            });
        }
        if self.impression_weight < 0.0 || self.click_weight < 0.0 {
            return Err(SelectionError::InvalidWeights {
                reason: "exposure weights must not be negative",
            });
        }
        Ok(self)
    }

    /// Multiplier for a tier. Anything but `Critical` gets the standard
    /// multiplier.
    #[must_use]
    pub fn risk_multiplier(&self, tier: Option<RiskTier>) -> f64 {
        match tier {
            Some(RiskTier::Critical) => self.critical_multiplier,
            _ => self.standard_multiplier,
        }
    }

    /// Exposure score of `exposure` under these impression and click costs.
    ///
    /// With the default weights this equals
    /// [`ExposureCounters::exposure_score`].
    #[must_use]
    pub fn exposure_score(&self, exposure: ExposureCounters) -> f64 {
        exposure.weighted_score(self.impression_weight, self.click_weight)
    }

    /// Unnormalised selection weight for a candidate.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "weight is a ratio of risk to exposure"
    )]
    pub fn weight(&self, candidate: &AtRiskCandidate) -> f64 {
        self.risk_multiplier(candidate.station.risk_tier)
            / self.exposure_score(candidate.exposure)
    }
}
