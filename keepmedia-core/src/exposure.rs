//! Exposure counters and the collaborator that records them.
//!
//! Counters are accumulated by an external logging collaborator over a
//! trailing window (typically seven days). The selection algorithms only
//! ever read them; recording new impressions and clicks is the caller's job
//! and goes through [`ExposureLog`].

use thiserror::Error;

use crate::{Station, StationId};

/// Rolling impression and click counts for one station.
///
/// # Examples
/// ```
/// use keepmedia_core::ExposureCounters;
///
/// let counters = ExposureCounters::new(100, 50);
/// assert_eq!(counters.exposure_score(), 201.0);
/// assert_eq!(ExposureCounters::default().exposure_score(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureCounters {
    /// Times the station was shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub impressions: u64,
    /// Times a visitor clicked through to the station.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clicks: u64,
}

impl ExposureCounters {
    /// Build counters from raw counts.
    #[must_use]
    pub const fn new(impressions: u64, clicks: u64) -> Self {
        Self {
            impressions,
            clicks,
        }
    }

    /// Combined prior-attention measure: `1 + impressions + 2 * clicks`.
    ///
    /// Never below `1.0`, so it is always safe to divide by.
    #[must_use]
    pub fn exposure_score(&self) -> f64 {
        self.weighted_score(1.0, 2.0)
    }

    /// Exposure measure with explicit costs per impression and per click:
    /// `1 + impression_weight * impressions + click_weight * clicks`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "counts are widened to f64 so large values cannot overflow"
    )]
    pub fn weighted_score(&self, impression_weight: f64, click_weight: f64) -> f64 {
        1.0 + impression_weight * self.impressions as f64 + click_weight * self.clicks as f64
    }
}

/// A station offered to the at-risk sampler together with its counters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtRiskCandidate {
    /// The station itself.
    pub station: Station,
    /// Exposure accumulated over the trailing window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposure: ExposureCounters,
}

impl AtRiskCandidate {
    /// Pair a station with its counters.
    #[must_use]
    pub const fn new(station: Station, exposure: ExposureCounters) -> Self {
        Self { station, exposure }
    }
}

/// Page position in which a station was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ImpressionSlot {
    /// Nearby stations bar.
    Local,
    /// Solidarity cards on the landing page.
    Solidarity,
    /// Rotating at-risk selection.
    AtRisk,
    /// Station detail page.
    Detail,
}

impl ImpressionSlot {
    /// Return the slot label used by analytics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Solidarity => "solidarity",
            Self::AtRisk => "at-risk",
            Self::Detail => "detail",
        }
    }
}

/// Kind of click a visitor made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ClickKind {
    /// Followed the donation link.
    Donate,
    /// Opened the station detail page.
    Detail,
}

/// An exposure event to append to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureEvent {
    /// The station was shown.
    Impression {
        /// Where it was shown.
        slot: ImpressionSlot,
    },
    /// A visitor clicked the station.
    Click {
        /// What was clicked.
        kind: ClickKind,
        /// Where the click happened.
        slot: ImpressionSlot,
    },
}

/// Errors reported by an [`ExposureLog`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExposureLogError {
    /// The backing log rejected or failed to store the event.
    #[error("failed to record exposure for station {station}: {message}")]
    Rejected {
        /// Station the event concerned.
        station: StationId,
        /// Backend-specific description.
        message: String,
    },
}

/// Append-only sink for exposure events.
///
/// Implementations own their consistency discipline; callers treat failures
/// as non-fatal.
pub trait ExposureLog {
    /// Append `event` for `station`.
    ///
    /// # Errors
    /// Returns [`ExposureLogError`] when the backend cannot store the event.
    fn record(&self, station: &StationId, event: ExposureEvent) -> Result<(), ExposureLogError>;

    /// Record that `station` was shown in `slot`.
    ///
    /// # Errors
    /// Propagates failures from [`ExposureLog::record`].
    fn record_impression(
        &self,
        station: &StationId,
        slot: ImpressionSlot,
    ) -> Result<(), ExposureLogError> {
        self.record(station, ExposureEvent::Impression { slot })
    }

    /// Record a click on `station` from `slot`.
    ///
    /// # Errors
    /// Propagates failures from [`ExposureLog::record`].
    fn record_click(
        &self,
        station: &StationId,
        kind: ClickKind,
        slot: ImpressionSlot,
    ) -> Result<(), ExposureLogError> {
        self.record(station, ExposureEvent::Click { kind, slot })
    }
}
