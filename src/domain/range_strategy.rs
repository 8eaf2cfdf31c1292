//! Range-update strategy definitions
//!
//! A range strategy controls how an existing constraint string is
//! rewritten once a new version has been selected:
//! - `replace`: keep the constraint shape, move it to the new version
//! - `widen`: extend the constraint so it also covers the new version
//! - `pin`: narrow the constraint to the exact new version
//! - `bump`: move the lower bound even when the new version is in range
//! - `update-lockfile`: leave the constraint alone, bump the lock only
//! - `in-range-only`: never rewrite; out-of-range versions are rejected
//! - `auto`: let the engine pick (resolves to `replace`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for rewriting a version constraint when adopting a new version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeStrategy {
    /// Replace the constraint with the same shape at the new version
    Replace,
    /// Widen the constraint to also include the new version
    Widen,
    /// Pin the constraint to the exact new version
    Pin,
    /// Bump the constraint's lower bound to the new version
    Bump,
    /// Keep the constraint text, update only the locked version
    UpdateLockfile,
    /// Only accept versions already satisfying the constraint
    InRangeOnly,
    /// Defer to the engine default
    Auto,
}

impl RangeStrategy {
    /// Resolves `auto` to the engine's default rewrite strategy
    pub fn resolve(self) -> Self {
        match self {
            RangeStrategy::Auto => RangeStrategy::Replace,
            other => other,
        }
    }
}

impl fmt::Display for RangeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RangeStrategy::Replace => "replace",
            RangeStrategy::Widen => "widen",
            RangeStrategy::Pin => "pin",
            RangeStrategy::Bump => "bump",
            RangeStrategy::UpdateLockfile => "update-lockfile",
            RangeStrategy::InRangeOnly => "in-range-only",
            RangeStrategy::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}
