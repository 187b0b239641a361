//! Fair selection of financially at-risk stations.
//!
//! The crate implements exposure-weighted sampling without replacement:
//! every candidate's odds grow with its risk tier and shrink with the
//! impressions and clicks it has already received, so repeated visits rotate
//! through the whole at-risk pool instead of favouring a few stations.
//!
//! Randomness is injected through
//! [`RandomSource`](keepmedia_core::RandomSource); [`RngSource`] adapts any
//! `rand` generator, with seeded `ChaCha8` helpers for reproducible runs.
//!
//! # Examples
//!
//! ```
//! use keepmedia_core::{AtRiskCandidate, ExposureCounters, RiskTier, Station};
//! use keepmedia_sampler::ExposureWeightedSampler;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = vec![
//!     AtRiskCandidate::new(
//!         Station::new("a", Some(RiskTier::Critical), None)?,
//!         ExposureCounters::default(),
//!     ),
//!     AtRiskCandidate::new(
//!         Station::new("b", Some(RiskTier::High), None)?,
//!         ExposureCounters::new(100, 50),
//!     ),
//! ];
//! let shares = ExposureWeightedSampler::new().normalised_weights(&pool)?;
//! assert!(shares[0] > shares[1]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod rng;
mod sampler;
mod weights;

pub use error::SelectionError;
pub use rng::RngSource;
pub use sampler::ExposureWeightedSampler;
pub use weights::SamplerWeights;

#[cfg(test)]
mod tests;
