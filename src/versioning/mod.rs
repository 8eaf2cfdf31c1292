//! Versioning scheme adapters
//!
//! A `VersioningScheme` encapsulates one ecosystem's version semantics:
//! parsing, ordering, range matching and constraint rewriting. The engine
//! is polymorphic over this trait and never interprets version strings
//! itself.
//!
//! Shipped schemes:
//! - [`SemverScheme`]: Cargo-style semantics on the `semver` crate
//! - [`NpmScheme`]: npm semantics on the `node-semver` crate
//! - [`LooseScheme`]: lenient dotted-numeric comparison, no ranges

mod constraint;
mod loose;
mod npm;
mod semver;

pub use self::constraint::{Constraint, ConstraintKind};
pub use self::loose::LooseScheme;
pub use self::npm::NpmScheme;
pub use self::semver::SemverScheme;

use crate::domain::RangeStrategy;
use crate::error::VersioningError;
use std::cmp::Ordering;

/// Inputs for a constraint rewrite
#[derive(Debug, Clone, Copy)]
pub struct NewValueArgs<'a> {
    /// The declared constraint being rewritten
    pub current_value: &'a str,
    /// The strategy controlling the rewrite
    pub range_strategy: RangeStrategy,
    /// The resolved current version, when known
    pub current_version: Option<&'a str>,
    /// The version the constraint must come to cover
    pub new_version: &'a str,
}

/// One ecosystem's version semantics
///
/// All required methods must be total: malformed input yields `false`
/// or `None`, never a panic. `is_breaking` is an optional capability;
/// the default returns `None` ("not supported") and callers branch on
/// presence rather than assuming it.
pub trait VersioningScheme: Send + Sync {
    /// Short identifier, used in logs
    fn name(&self) -> &'static str;

    /// True if the input is a single concrete version
    fn is_version(&self, input: &str) -> bool;

    /// True if the input is a version or a well-formed range
    fn is_valid(&self, input: &str) -> bool;

    /// Major component, when the scheme can decompose the version
    fn get_major(&self, version: &str) -> Option<u64>;

    /// Minor component, when present
    fn get_minor(&self, version: &str) -> Option<u64>;

    /// Patch component, when present
    fn get_patch(&self, version: &str) -> Option<u64>;

    /// True if the version is a stable release (not a prerelease)
    fn is_stable(&self, version: &str) -> bool;

    /// True if the version satisfies the range
    fn matches(&self, version: &str, range: &str) -> bool;

    /// Total order over versions; callers only compare strings that
    /// passed `is_version`
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Rewrites the current constraint for the new version per strategy
    fn get_new_value(&self, args: &NewValueArgs<'_>) -> Result<String, VersioningError>;

    /// Optional capability: scheme-specific breaking-change detection.
    /// `None` means the scheme has no such notion and the caller falls
    /// back to its own policy.
    fn is_breaking(&self, _current: &str, _new: &str) -> Option<bool> {
        None
    }
}
