//! Coarse financial-vulnerability buckets for stations.
//!
//! Tiers summarise how exposed a station is to the loss of federal
//! (CPB) funding. Only `Critical` and `High` stations are eligible for the
//! at-risk rotation.
//!
//! # Examples
//! ```
//! use keepmedia_core::RiskTier;
//!
//! assert_eq!(RiskTier::Critical.as_str(), "Critical");
//! assert_eq!("high".parse::<RiskTier>(), Ok(RiskTier::High));
//! assert!(RiskTier::High.is_at_risk());
//! ```
use thiserror::Error;

/// Financial risk tier assigned to a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskTier {
    /// Funding loss threatens the station's survival.
    Critical,
    /// Heavy dependency on federal funding.
    High,
    /// Noticeable but manageable dependency.
    Moderate,
    /// Little or no dependency.
    Stable,
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown risk tier '{0}'")]
pub struct ParseRiskTierError(pub String);

impl RiskTier {
    /// Return the canonical, capitalised tier name.
    ///
    /// # Examples
    /// ```
    /// use keepmedia_core::RiskTier;
    ///
    /// assert_eq!(RiskTier::Moderate.as_str(), "Moderate");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Stable => "Stable",
        }
    }

    /// Report whether the tier belongs in the at-risk rotation.
    #[must_use]
    pub const fn is_at_risk(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskTier {
    type Err = ParseRiskTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "moderate" => Ok(Self::Moderate),
            "stable" => Ok(Self::Stable),
            _ => Err(ParseRiskTierError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(RiskTier::Critical.to_string(), RiskTier::Critical.as_str());
    }

    #[rstest]
    #[case("Critical", RiskTier::Critical)]
    #[case("HIGH", RiskTier::High)]
    #[case(" moderate ", RiskTier::Moderate)]
    #[case("stable", RiskTier::Stable)]
    fn parses_case_insensitively(#[case] raw: &str, #[case] expected: RiskTier) {
        assert_eq!(RiskTier::from_str(raw), Ok(expected));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = RiskTier::from_str("dire").unwrap_err();
        assert!(err.to_string().contains("unknown risk tier"));
    }

    #[rstest]
    #[case(RiskTier::Critical, true)]
    #[case(RiskTier::High, true)]
    #[case(RiskTier::Moderate, false)]
    #[case(RiskTier::Stable, false)]
    fn only_critical_and_high_are_at_risk(#[case] tier: RiskTier, #[case] expected: bool) {
        assert_eq!(tier.is_at_risk(), expected);
    }
}
