//! Error types raised while selecting at-risk stations.

use keepmedia_core::{RiskTier, StationId};
use thiserror::Error;

/// Errors raised by [`ExposureWeightedSampler`](crate::ExposureWeightedSampler).
///
/// All variants describe a caller precondition violation. Well-formed input
/// never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Weight configuration was non-finite or out of range.
    #[error("invalid sampler weights: {reason}")]
    InvalidWeights {
        /// Which constraint failed.
        reason: &'static str,
    },
    /// A candidate's computed weight was not a positive finite number.
    #[error("station {station} has unusable selection weight {weight}")]
    NonFiniteWeight {
        /// Offending station.
        station: StationId,
        /// Computed weight.
        weight: f64,
    },
    /// The pool's weights summed to a non-finite total.
    #[error("selection weights sum to a non-finite total")]
    NonFiniteTotal,
    /// Strict mode found a station outside the `Critical`/`High` tiers.
    #[error("station {station} with tier {tier:?} is not eligible for at-risk selection")]
    IneligibleTier {
        /// Offending station.
        station: StationId,
        /// Its tier, if any.
        tier: Option<RiskTier>,
    },
    /// The random source returned a value outside `[0, 1)`.
    #[error("random draw {value} is outside [0, 1)")]
    DrawOutOfRange {
        /// Value returned by the source.
        value: f64,
    },
}
