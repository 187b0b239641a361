//! Broadcasting organisations surfaced to visitors.

use thiserror::Error;

use crate::RiskTier;

/// Opaque, unique identifier of a station.
///
/// # Examples
/// ```
/// use keepmedia_core::StationId;
///
/// let id = StationId::from("wxpn");
/// assert_eq!(id.as_str(), "wxpn");
/// assert_eq!(id.to_string(), "wxpn");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StationId(String);

impl StationId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broadcast medium of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationCategory {
    /// Television broadcaster.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "TV"))]
    Tv,
    /// Radio broadcaster.
    Radio,
}

/// A public-media broadcasting organisation.
///
/// Stations are owned by the data store and are never mutated by the
/// selection or ranking algorithms.
///
/// # Examples
/// ```
/// use keepmedia_core::{RiskTier, Station};
///
/// # fn main() -> Result<(), keepmedia_core::StationError> {
/// let station = Station::new("wxpn", Some(RiskTier::High), Some(42.5))?
///     .with_name("WXPN")
///     .with_call_sign("WXPN-FM");
/// assert_eq!(station.id.as_str(), "wxpn");
/// assert_eq!(station.cpb_dependency_pct, Some(42.5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Unique identifier.
    pub id: StationId,
    /// URL-friendly handle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Primary call sign.
    #[cfg_attr(feature = "serde", serde(default))]
    pub call_sign: String,
    /// Two-letter state code.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: String,
    /// Broadcast medium.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: StationCategory,
    /// Financial risk tier, when assessed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub risk_tier: Option<RiskTier>,
    /// Share of revenue historically sourced from CPB, in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cpb_dependency_pct: Option<f64>,
}

/// Errors returned by [`Station::new`] and [`Station::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    /// The dependency percentage was not a finite value in `0..=100`.
    #[error("station {station} has CPB dependency {value}, expected 0 to 100")]
    InvalidDependency {
        /// Offending station.
        station: StationId,
        /// Rejected percentage.
        value: f64,
    },
}

impl Station {
    /// Validate and construct a [`Station`] with empty descriptive fields.
    ///
    /// # Errors
    /// Returns [`StationError::InvalidDependency`] when the percentage is
    /// non-finite or outside `0..=100`.
    pub fn new(
        id: impl Into<StationId>,
        risk_tier: Option<RiskTier>,
        cpb_dependency_pct: Option<f64>,
    ) -> Result<Self, StationError> {
        let station = Self {
            id: id.into(),
            slug: String::new(),
            name: String::new(),
            call_sign: String::new(),
            state: String::new(),
            category: StationCategory::default(),
            risk_tier,
            cpb_dependency_pct,
        };
        station.validate()?;
        Ok(station)
    }

    /// Check invariants on a station built elsewhere, e.g. deserialised.
    ///
    /// # Errors
    /// Returns [`StationError::InvalidDependency`] for an out-of-range
    /// dependency percentage.
    pub fn validate(&self) -> Result<(), StationError> {
        match self.cpb_dependency_pct {
            Some(value) if !value.is_finite() || !(0.0..=100.0).contains(&value) => {
                Err(StationError::InvalidDependency {
                    station: self.id.clone(),
                    value,
                })
            }
            _ => Ok(()),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the primary call sign.
    #[must_use]
    pub fn with_call_sign(mut self, call_sign: impl Into<String>) -> Self {
        self.call_sign = call_sign.into();
        self
    }

    /// Set the broadcast medium.
    #[must_use]
    pub const fn with_category(mut self, category: StationCategory) -> Self {
        self.category = category;
        self
    }

    /// Report whether the station belongs in the at-risk rotation.
    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        self.risk_tier.is_some_and(|tier| tier.is_at_risk())
    }
}
