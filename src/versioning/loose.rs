//! Lenient dotted-numeric scheme
//!
//! For ecosystems without strict semver: any dotted run of numbers is a
//! version, a leading `v` is tolerated and preserved, and there is no
//! range syntax, so every constraint is an exact value. Decomposition is
//! partial: `v2` has a major but no minor, which downstream
//! classification reports as a coarse `replacement`.

use super::{Constraint, NewValueArgs, VersioningScheme};
use crate::domain::RangeStrategy;
use crate::error::VersioningError;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

// Dotted numerics with an optional leading `v` and prerelease tail
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?\d+(?:\.\d+)*(?:-[\w.]+)?$").unwrap());

// Markers treated as prerelease tails
const PRERELEASE_MARKERS: &[&str] = &["alpha", "beta", "rc", "canary", "dev", "pre", "snapshot"];

/// Versioning scheme for loosely versioned ecosystems
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseScheme;

impl LooseScheme {
    /// Creates the scheme
    pub fn new() -> Self {
        Self
    }

    /// Numeric parts of a version: strips a leading `v`, splits on `.`
    /// and `-`, keeps only the numeric segments
    fn parts(version: &str) -> Vec<u64> {
        let version = version.trim();
        let version = version.strip_prefix('v').unwrap_or(version);
        version
            .split(['.', '-'])
            .filter_map(|p| p.parse().ok())
            .collect()
    }
}

impl VersioningScheme for LooseScheme {
    fn name(&self) -> &'static str {
        "loose"
    }

    fn is_version(&self, input: &str) -> bool {
        VERSION_RE.is_match(input.trim())
    }

    // No range syntax exists, so valid means version
    fn is_valid(&self, input: &str) -> bool {
        self.is_version(input)
    }

    fn get_major(&self, version: &str) -> Option<u64> {
        Self::parts(version).first().copied()
    }

    fn get_minor(&self, version: &str) -> Option<u64> {
        Self::parts(version).get(1).copied()
    }

    fn get_patch(&self, version: &str) -> Option<u64> {
        Self::parts(version).get(2).copied()
    }

    fn is_stable(&self, version: &str) -> bool {
        let lowered = version.to_ascii_lowercase();
        !PRERELEASE_MARKERS.iter().any(|m| lowered.contains(m))
    }

    /// Without ranges, a "range" only matches its own version
    fn matches(&self, version: &str, range: &str) -> bool {
        self.is_version(version) && self.is_version(range)
            && self.compare(version, range) == Ordering::Equal
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        let parts_a = Self::parts(a);
        let parts_b = Self::parts(b);

        for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
            match pa.cmp(pb) {
                Ordering::Equal => continue,
                other => return other,
            }
        }

        // All common parts equal: the longer version is greater
        parts_a.len().cmp(&parts_b.len())
    }

    fn get_new_value(&self, args: &NewValueArgs<'_>) -> Result<String, VersioningError> {
        if !self.is_version(args.new_version) {
            return Err(VersioningError::invalid_version(
                args.new_version,
                "not a dotted-numeric version",
            ));
        }

        let constraint = Constraint::parse(args.current_value);
        let payload = args.new_version.trim().trim_start_matches('v');

        match args.range_strategy.resolve() {
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
                    Ok(constraint.rewritten(payload))
                }
            }
            // Every value is exact, so the remaining strategies all
            // reduce to replacing the payload and keeping the prefix
            RangeStrategy::Pin
            | RangeStrategy::Replace
            | RangeStrategy::Widen
            | RangeStrategy::Bump
            | RangeStrategy::Auto => Ok(constraint.rewritten(payload)),
        }
    }
}
