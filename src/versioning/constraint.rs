//! Constraint shape parsing shared by the rewriting schemes
//!
//! Handles constraint shapes like:
//! - Exact: `1.2.3`, `=1.2.3`
//! - Caret: `^1.2.3`
//! - Tilde: `~1.2.3`
//! - Bounds: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`
//! - Wildcards: `*`, `1.2.*`, `1.x`
//! - Compound: `>=1.0.0, <2.0.0`, `^1.0.0 || ^2.0.0`
//!
//! A shape-preserving rewrite swaps the version payload while keeping the
//! operator prefix; shapes without a single movable payload (compound,
//! wildcard, strict upper bounds) are reported as not rewritable and the
//! scheme decides how to degrade.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a version constraint string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Bare version (e.g., `1.2.3`) or explicit `=1.2.3`
    Exact,
    /// Caret range (e.g., `^1.2.3`)
    Caret,
    /// Tilde range (e.g., `~1.2.3`)
    Tilde,
    /// Greater than or equal (e.g., `>=1.2.3`)
    GreaterOrEqual,
    /// Greater than (e.g., `>1.2.3`)
    Greater,
    /// Less than or equal (e.g., `<=1.2.3`)
    LessOrEqual,
    /// Less than (e.g., `<1.2.3`)
    Less,
    /// Wildcard (e.g., `*`, `1.2.*`, `1.x`)
    Wildcard,
    /// Multiple comparators or union (e.g., `>=1.0.0, <2.0.0`)
    Compound,
    /// Empty constraint
    Empty,
}

/// A parsed constraint: operator prefix plus version payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// The shape of the constraint
    pub kind: ConstraintKind,
    /// The raw constraint string as declared
    pub raw: String,
    /// Operator prefix kept across rewrites (e.g., `^`, `>=`, `v`)
    pub prefix: String,
    /// The version payload without the prefix
    pub version: String,
}

impl Constraint {
    /// Parses a constraint string; never fails, unrecognized shapes are
    /// classified as `Compound`
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Self::with_kind(ConstraintKind::Empty, raw, "", "");
        }
        if trimmed.contains("||") || trimmed.contains(',') || trimmed.contains(char::is_whitespace)
        {
            return Self::with_kind(ConstraintKind::Compound, raw, "", trimmed);
        }
        if trimmed == "*"
            || trimmed.ends_with(".*")
            || trimmed.ends_with(".x")
            || trimmed.ends_with(".X")
        {
            return Self::with_kind(ConstraintKind::Wildcard, raw, "", trimmed);
        }

        for (prefix, kind) in [
            (">=", ConstraintKind::GreaterOrEqual),
            ("<=", ConstraintKind::LessOrEqual),
            (">", ConstraintKind::Greater),
            ("<", ConstraintKind::Less),
            ("^", ConstraintKind::Caret),
            ("~", ConstraintKind::Tilde),
            ("=", ConstraintKind::Exact),
        ] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return Self::with_kind(kind, raw, prefix, rest.trim());
            }
        }

        // Leading `v` on a bare version is an exact constraint whose
        // prefix survives rewrites (go.mod style)
        if let Some(rest) = trimmed.strip_prefix('v') {
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                return Self::with_kind(ConstraintKind::Exact, raw, "v", rest);
            }
        }

        Self::with_kind(ConstraintKind::Exact, raw, "", trimmed)
    }

    fn with_kind(
        kind: ConstraintKind,
        raw: impl Into<String>,
        prefix: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            raw: raw.into(),
            prefix: prefix.into(),
            version: version.into(),
        }
    }

    /// True when the shape has a single movable payload so a rewrite can
    /// keep the operator. Strict `<` is excluded: `<{new}` would not
    /// include the new version.
    pub fn is_rewritable(&self) -> bool {
        matches!(
            self.kind,
            ConstraintKind::Exact
                | ConstraintKind::Caret
                | ConstraintKind::Tilde
                | ConstraintKind::GreaterOrEqual
                | ConstraintKind::Greater
                | ConstraintKind::LessOrEqual
        )
    }

    /// Produces the same-shape constraint at the new version
    pub fn rewritten(&self, new_version: &str) -> String {
        format!("{}{}", self.prefix, new_version)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
