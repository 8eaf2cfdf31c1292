//! Merge-confidence levels
//!
//! An externally computed empirical score for a version transition.
//! Levels are ordered so that policy thresholds ("at least high") can be
//! expressed with plain comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Empirical safety score for a version transition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergeConfidence {
    /// Transition has a poor adoption/success record
    Low,
    /// No strong signal either way
    Neutral,
    /// Transition has a good adoption/success record
    High,
    /// Transition is broadly adopted and very rarely reverted
    VeryHigh,
}

impl MergeConfidence {
    /// Returns all levels, lowest first
    pub fn all() -> &'static [MergeConfidence] {
        &[
            MergeConfidence::Low,
            MergeConfidence::Neutral,
            MergeConfidence::High,
            MergeConfidence::VeryHigh,
        ]
    }
}

impl fmt::Display for MergeConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeConfidence::Low => "low",
            MergeConfidence::Neutral => "neutral",
            MergeConfidence::High => "high",
            MergeConfidence::VeryHigh => "very-high",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MergeConfidence {
    type Err = String;

    /// Parses a service-reported level; tolerant of casing and the
    /// space/underscore spellings used by older API versions
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "low" => Ok(MergeConfidence::Low),
            "neutral" => Ok(MergeConfidence::Neutral),
            "high" => Ok(MergeConfidence::High),
            "very-high" => Ok(MergeConfidence::VeryHigh),
            other => Err(format!("unknown confidence level '{}'", other)),
        }
    }
}
