//! Cargo-style semver scheme
//!
//! Backed by the `semver` crate: bare requirements are caret-like
//! (`1.2` allows `1.9.0`), `=` pins exactly, and the pre-1.0 rule
//! applies (`0.x` minor bumps are breaking). This scheme carries the
//! breaking-change capability.

use super::{Constraint, NewValueArgs, VersioningScheme};
use crate::domain::RangeStrategy;
use crate::error::VersioningError;
use semver::{Version, VersionReq};
use std::cmp::Ordering;

/// Versioning scheme with Cargo requirement semantics
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverScheme;

impl SemverScheme {
    /// Creates the scheme
    pub fn new() -> Self {
        Self
    }

    fn parse(version: &str) -> Option<Version> {
        Version::parse(version.trim()).ok()
    }

    /// Shape-preserving rewrite, shared by replace/bump/widen fallbacks
    fn replace_value(
        &self,
        constraint: &Constraint,
        new_version: &str,
    ) -> Result<String, VersioningError> {
        if !constraint.is_rewritable() {
            return Err(VersioningError::not_rewritable(
                &constraint.raw,
                new_version,
                format!("{:?} constraints have no single movable bound", constraint.kind),
            ));
        }
        Ok(constraint.rewritten(new_version))
    }
}

impl VersioningScheme for SemverScheme {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn is_version(&self, input: &str) -> bool {
        Self::parse(input).is_some()
    }

    fn is_valid(&self, input: &str) -> bool {
        self.is_version(input) || VersionReq::parse(input.trim()).is_ok()
    }

    fn get_major(&self, version: &str) -> Option<u64> {
        Self::parse(version).map(|v| v.major)
    }

    fn get_minor(&self, version: &str) -> Option<u64> {
        Self::parse(version).map(|v| v.minor)
    }

    fn get_patch(&self, version: &str) -> Option<u64> {
        Self::parse(version).map(|v| v.patch)
    }

    fn is_stable(&self, version: &str) -> bool {
        Self::parse(version).map(|v| v.pre.is_empty()).unwrap_or(false)
    }

    fn matches(&self, version: &str, range: &str) -> bool {
        match (Self::parse(version), VersionReq::parse(range.trim())) {
            (Some(v), Ok(req)) => req.matches(&v),
            _ => false,
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (Self::parse(a), Self::parse(b)) {
            (Some(va), Some(vb)) => va.cmp(&vb),
            _ => a.cmp(b),
        }
    }

    fn get_new_value(&self, args: &NewValueArgs<'_>) -> Result<String, VersioningError> {
        let constraint = Constraint::parse(args.current_value);
        match args.range_strategy.resolve() {
            RangeStrategy::Pin => Ok(format!("={}", args.new_version)),
            RangeStrategy::InRangeOnly => {
                if self.matches(args.new_version, args.current_value) {
                    Ok(constraint.raw)
                } else {
                    Err(VersioningError::outside_range(
                        args.current_value,
                        args.new_version,
                    ))
                }
            }
            RangeStrategy::UpdateLockfile => {
                if self.matches(args.new_version, args.current_value) {
                    Ok(constraint.raw)
                } else {
                    self.replace_value(&constraint, args.new_version)
                }
            }
            // Cargo requirements are intersections and cannot express a
            // union, so widen degrades to the replace rewrite once the
            // new version falls outside the range
            RangeStrategy::Widen => {
                if self.matches(args.new_version, args.current_value) {
                    Ok(constraint.raw)
                } else {
                    self.replace_value(&constraint, args.new_version)
                }
            }
            RangeStrategy::Replace | RangeStrategy::Bump | RangeStrategy::Auto => {
                self.replace_value(&constraint, args.new_version)
            }
        }
    }

    /// Cargo compatibility rule: major bumps break, and below 1.0.0 the
    /// minor digit is the compatibility boundary
    fn is_breaking(&self, current: &str, new: &str) -> Option<bool> {
        let (cur, new) = (Self::parse(current)?, Self::parse(new)?);
        Some(new.major != cur.major || (cur.major == 0 && new.minor != cur.minor))
    }
}
