//! npm scheme
//!
//! Backed by the `node-semver` crate: bare versions pin exactly, caret
//! and tilde ranges behave per the npm spec, and unions (`||`) are
//! valid ranges, which gives `widen` a real representation here.
//!
//! This scheme has no breaking-change capability; consumers fall back
//! to the major-only policy.

use super::{Constraint, NewValueArgs, VersioningScheme};
use crate::domain::RangeStrategy;
use crate::error::VersioningError;
use node_semver::{Range, Version};
use std::cmp::Ordering;

/// Versioning scheme with npm range semantics
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmScheme;

impl NpmScheme {
    /// Creates the scheme
    pub fn new() -> Self {
        Self
    }

    fn parse(version: &str) -> Option<Version> {
        Version::parse(version.trim()).ok()
    }

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

impl VersioningScheme for NpmScheme {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn is_version(&self, input: &str) -> bool {
        Self::parse(input).is_some()
    }

    fn is_valid(&self, input: &str) -> bool {
        self.is_version(input) || Range::parse(input.trim()).is_ok()
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
        Self::parse(version)
            .map(|v| v.pre_release.is_empty())
            .unwrap_or(false)
    }

    fn matches(&self, version: &str, range: &str) -> bool {
        match (Self::parse(version), Range::parse(range.trim())) {
            (Some(v), Ok(r)) => r.satisfies(&v),
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
            // npm pins with the bare version, no operator
            RangeStrategy::Pin => Ok(args.new_version.to_string()),
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
            RangeStrategy::Widen => {
                if self.matches(args.new_version, args.current_value) {
                    Ok(constraint.raw)
                } else {
                    Ok(format!("{} || ^{}", constraint.raw.trim(), args.new_version))
                }
            }
            RangeStrategy::Replace | RangeStrategy::Bump | RangeStrategy::Auto => {
                self.replace_value(&constraint, args.new_version)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(
        current_value: &'a str,
        strategy: RangeStrategy,
        current_version: Option<&'a str>,
        new_version: &'a str,
    ) -> NewValueArgs<'a> {
        NewValueArgs {
            current_value,
            range_strategy: strategy,
            current_version,
            new_version,
        }
    }

    #[test]
    fn test_is_version() {
        let scheme = NpmScheme::new();
        assert!(scheme.is_version("1.2.3"));
        assert!(scheme.is_version("1.2.3-canary.4"));
        assert!(!scheme.is_version("^1.2.3"));
        assert!(!scheme.is_version("latest"));
    }

    #[test]
    fn test_is_valid_accepts_unions() {
        let scheme = NpmScheme::new();
        assert!(scheme.is_valid("^1.0.0 || ^2.0.0"));
        assert!(scheme.is_valid(">=1.0.0 <2.0.0"));
        assert!(scheme.is_valid("~1.2.0"));
    }

    #[test]
    fn test_decomposition() {
        let scheme = NpmScheme::new();
        assert_eq!(scheme.get_major("4.17.21"), Some(4));
        assert_eq!(scheme.get_minor("4.17.21"), Some(17));
        assert_eq!(scheme.get_patch("4.17.21"), Some(21));
        assert_eq!(scheme.get_major("not-a-version"), None);
    }

    #[test]
    fn test_is_stable() {
        let scheme = NpmScheme::new();
        assert!(scheme.is_stable("19.2.1"));
        assert!(!scheme.is_stable("19.3.0-canary.20251110"));
    }

    #[test]
    fn test_matches_npm_semantics() {
        let scheme = NpmScheme::new();
        assert!(scheme.matches("1.5.0", "^1.0.0"));
        assert!(!scheme.matches("2.0.0", "^1.0.0"));
        assert!(scheme.matches("1.0.5", "~1.0.0"));
        assert!(scheme.matches("2.1.0", "^1.0.0 || ^2.0.0"));
    }

    #[test]
    fn test_compare() {
        let scheme = NpmScheme::new();
        assert_eq!(scheme.compare("1.9.0", "1.10.0"), Ordering::Less);
        assert_eq!(scheme.compare("2.0.0", "2.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_get_new_value_replace() {
        let scheme = NpmScheme::new();
        let value = scheme
            .get_new_value(&args("^4.17.0", RangeStrategy::Replace, Some("4.17.0"), "4.18.1"))
            .unwrap();
        assert_eq!(value, "^4.18.1");
    }

    #[test]
    fn test_get_new_value_pin_is_bare() {
        let scheme = NpmScheme::new();
        let value = scheme
            .get_new_value(&args("^4.17.0", RangeStrategy::Pin, Some("4.17.0"), "4.17.0"))
            .unwrap();
        assert_eq!(value, "4.17.0");
    }

    #[test]
    fn test_get_new_value_widen_in_range_keeps_value() {
        let scheme = NpmScheme::new();
        let value = scheme
            .get_new_value(&args("^1.0.0", RangeStrategy::Widen, Some("1.0.0"), "1.5.0"))
            .unwrap();
        assert_eq!(value, "^1.0.0");
    }

    #[test]
    fn test_get_new_value_widen_appends_union() {
        let scheme = NpmScheme::new();
        let value = scheme
            .get_new_value(&args("^1.0.0", RangeStrategy::Widen, Some("1.0.0"), "2.1.0"))
            .unwrap();
        assert_eq!(value, "^1.0.0 || ^2.1.0");
        // The widened range must cover both old and new versions
        assert!(scheme.matches("1.0.0", &value));
        assert!(scheme.matches("2.1.0", &value));
    }

    #[test]
    fn test_get_new_value_update_lockfile_in_range() {
        let scheme = NpmScheme::new();
        let value = scheme
            .get_new_value(&args(
                "^1.0.0",
                RangeStrategy::UpdateLockfile,
                Some("1.0.0"),
                "1.2.0",
            ))
            .unwrap();
        assert_eq!(value, "^1.0.0");
    }

    #[test]
    fn test_get_new_value_in_range_only_rejects() {
        let scheme = NpmScheme::new();
        let err = scheme
            .get_new_value(&args(
                "~1.0.0",
                RangeStrategy::InRangeOnly,
                Some("1.0.0"),
                "1.1.0",
            ))
            .unwrap_err();
        assert!(matches!(err, VersioningError::OutsideRange { .. }));
    }

    #[test]
    fn test_no_breaking_capability() {
        let scheme = NpmScheme::new();
        assert_eq!(scheme.is_breaking("1.0.0", "2.0.0"), None);
    }
}
