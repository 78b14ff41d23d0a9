//! Customer risk tiers and the rule that assigns them.
//!
//! A customer is classified from two nullable integers, age in years and
//! spend in currency units. Rules are checked in order and the first match
//! wins:
//!
//! 1. either input missing → `UNKNOWN`
//! 2. age > 45 and spend > 70000 → `HIGH_RISK`
//! 3. spend > 40000 → `MEDIUM_RISK`
//! 4. anything else → `LOW_RISK`
//!
//! Every comparison is strict. The thresholds are fixed and have no
//! configuration surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Age above which a high spender counts as high risk.
pub const AGE_THRESHOLD: i64 = 45;

/// Spend above which an older customer counts as high risk.
pub const HIGH_SPEND_THRESHOLD: i64 = 70_000;

/// Spend above which any customer counts as at least medium risk.
pub const MEDIUM_SPEND_THRESHOLD: i64 = 40_000;

/// The closed set of labels the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// At least one input was missing.
    Unknown,
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Unknown,
        RiskTier::HighRisk,
        RiskTier::MediumRisk,
        RiskTier::LowRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::HighRisk => "HIGH_RISK",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::LowRisk => "LOW_RISK",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown risk tier: {0:?}")]
pub struct ParseTierError(pub String);

impl FromStr for RiskTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}

/// Classify a customer. Total over its domain: never fails, never panics.
pub fn classify(age: Option<i64>, spend: Option<i64>) -> RiskTier {
    let (Some(age), Some(spend)) = (age, spend) else {
        return RiskTier::Unknown;
    };

    if age > AGE_THRESHOLD && spend > HIGH_SPEND_THRESHOLD {
        RiskTier::HighRisk
    } else if spend > MEDIUM_SPEND_THRESHOLD {
        RiskTier::MediumRisk
    } else {
        RiskTier::LowRisk
    }
}

/// One call's worth of classifier arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub age: Option<i64>,
    pub spend: Option<i64>,
}

impl ClassificationInput {
    pub fn new(age: Option<i64>, spend: Option<i64>) -> Self {
        Self { age, spend }
    }

    pub fn classify(&self) -> RiskTier {
        classify(self.age, self.spend)
    }
}
