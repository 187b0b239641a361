//! Core domain types for the Keep Media Public discovery engine.
//!
//! The crate models stations, their transmitters and exposure counters, and
//! declares the collaborator boundaries the algorithms consume: a read-only
//! [`StationStore`], an append-only [`ExposureLog`], and an injectable
//! [`RandomSource`]. Constructors return `Result` to surface invalid input
//! early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod exposure;
mod random;
mod site;
mod station;
mod store;
mod tier;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use exposure::{
    AtRiskCandidate, ClickKind, ExposureCounters, ExposureEvent, ExposureLog, ExposureLogError,
    ImpressionSlot,
};
pub use random::RandomSource;
pub use site::BroadcastSite;
pub use station::{Station, StationCategory, StationError, StationId};
pub use store::{StationStore, StoreError};
pub use tier::{ParseRiskTierError, RiskTier};
