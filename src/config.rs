//! Resolution configuration
//!
//! This module provides the `LookupConfig` struct that carries the
//! per-dependency inputs of the engine (current constraint, resolved
//! version, range strategy) together with the candidate and bucketing
//! policies resolved by upstream config merging.

use crate::domain::{MergeConfidence, RangeStrategy, UpdateType};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A package rule as produced by upstream config merging
///
/// Only the confidence-gating aspect is interpreted by this engine:
/// enrichment runs when at least one rule carries a non-empty
/// `match_confidence` list. Full rule matching (names, managers, paths)
/// belongs to the upstream layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRule {
    /// Package names the rule applies to (empty means all)
    #[serde(default)]
    pub match_package_names: Vec<String>,
    /// Update types the rule applies to (empty means all)
    #[serde(default)]
    pub match_update_types: Vec<UpdateType>,
    /// Confidence levels the rule gates on; non-empty requests enrichment
    #[serde(default)]
    pub match_confidence: Vec<MergeConfidence>,
}

/// How candidate releases are grouped into buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPolicy {
    /// Separate major updates from the rest; when false everything
    /// lands in a single "latest" bucket
    pub separate_major_minor: bool,
    /// Give each distinct newer major its own "v{N}" bucket
    pub separate_multiple_major: bool,
    /// Separate patch-level updates from minor ones
    pub separate_minor_patch: bool,
}

impl Default for BucketPolicy {
    fn default() -> Self {
        Self {
            separate_major_minor: true,
            separate_multiple_major: false,
            separate_minor_patch: false,
        }
    }
}

/// Filters applied while building the candidate pool
#[derive(Debug, Clone, Default)]
pub struct CandidatePolicy {
    /// Consider unstable releases even when the current version is stable
    pub allow_unstable: bool,
    /// Ignore releases younger than this
    pub min_release_age: Option<Duration>,
    /// Propose a downgrade when the current version vanished upstream
    pub allow_rollback: bool,
}

impl CandidatePolicy {
    /// Create a policy with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unstable releases are considered
    pub fn with_allow_unstable(mut self, allow: bool) -> Self {
        self.allow_unstable = allow;
        self
    }

    /// Set the minimum release age
    pub fn with_min_release_age(mut self, age: Duration) -> Self {
        self.min_release_age = Some(age);
        self
    }

    /// Set whether rollbacks may be proposed
    pub fn with_allow_rollback(mut self, allow: bool) -> Self {
        self.allow_rollback = allow;
        self
    }
}

/// Per-dependency inputs and policies for one resolution run
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Package name, forwarded to the confidence lookup
    pub package_name: String,
    /// Registry datasource identifier (e.g. "npm", "crates-io")
    pub datasource: String,
    /// The declared constraint; `None` for unconstrained/digest-pinned
    pub current_value: Option<String>,
    /// The resolved concrete version, when determinable
    pub current_version: Option<String>,
    /// The currently locked content digest, when tracked
    pub current_digest: Option<String>,
    /// How the constraint is rewritten for a new version
    pub range_strategy: RangeStrategy,
    /// Caller-supplied update type; skips classification when set
    pub update_type: Option<UpdateType>,
    /// Bucket grouping policy
    pub buckets: BucketPolicy,
    /// Candidate pool filters
    pub candidates: CandidatePolicy,
    /// Package rules from upstream config merging
    pub package_rules: Vec<PackageRule>,
}

impl LookupConfig {
    /// Creates a config with default policies and no current state
    pub fn new(package_name: impl Into<String>, datasource: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            datasource: datasource.into(),
            current_value: None,
            current_version: None,
            current_digest: None,
            range_strategy: RangeStrategy::Auto,
            update_type: None,
            buckets: BucketPolicy::default(),
            candidates: CandidatePolicy::default(),
            package_rules: Vec::new(),
        }
    }

    /// Set the declared constraint
    pub fn with_current_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = Some(value.into());
        self
    }

    /// Set the resolved current version
    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = Some(version.into());
        self
    }

    /// Set the locked content digest
    pub fn with_current_digest(mut self, digest: impl Into<String>) -> Self {
        self.current_digest = Some(digest.into());
        self
    }

    /// Set the range strategy
    pub fn with_range_strategy(mut self, strategy: RangeStrategy) -> Self {
        self.range_strategy = strategy;
        self
    }

    /// Force a specific update type, skipping classification
    pub fn with_update_type(mut self, update_type: UpdateType) -> Self {
        self.update_type = Some(update_type);
        self
    }

    /// Set the bucket grouping policy
    pub fn with_buckets(mut self, buckets: BucketPolicy) -> Self {
        self.buckets = buckets;
        self
    }

    /// Set the candidate pool policy
    pub fn with_candidates(mut self, candidates: CandidatePolicy) -> Self {
        self.candidates = candidates;
        self
    }

    /// Set the package rules
    pub fn with_package_rules(mut self, rules: Vec<PackageRule>) -> Self {
        self.package_rules = rules;
        self
    }

    /// True when at least one rule requests confidence matching; the
    /// enrichment call is made only in that case
    pub fn wants_merge_confidence(&self) -> bool {
        self.package_rules
            .iter()
            .any(|rule| !rule.match_confidence.is_empty())
    }
}
