//! The update descriptor produced by the generator
//!
//! A `LookupUpdate` is built once per (bucket, release) pair and not
//! mutated afterwards. `new_value` mirrors the dependency's declared
//! constraint: `None` means the dependency was unconstrained and stays
//! that way. Optional metadata is passed through from the `Release`
//! only when present there.

use super::{MergeConfidence, UpdateType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully resolved update recommendation for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupUpdate {
    /// Bucket this update was generated for (e.g. "non-major", "v3")
    pub bucket: String,
    /// The version being proposed
    pub new_version: String,
    /// The rewritten constraint, or `None` for unconstrained dependencies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// Major component of the new version, when the scheme can decompose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_major: Option<u64>,
    /// Minor component of the new version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_minor: Option<u64>,
    /// Patch component of the new version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_patch: Option<u64>,
    /// Classified transition type; absent only on the degenerate
    /// no-current-version path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    /// Whether the transition is considered breaking
    pub is_breaking: bool,
    /// True when `new_value` is itself a range rather than a pinned version
    pub is_range: bool,
    /// True for update-lockfile updates that leave the constraint text alone
    pub is_lockfile_update: bool,
    /// True for bump updates whose new version already satisfied the range
    pub is_bump: bool,
    /// Empirical confidence for the transition, only when policy asked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_confidence: Option<MergeConfidence>,
    /// Publication instant of the proposed release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_timestamp: Option<DateTime<Utc>>,
    /// Whole days elapsed since publication, floored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version_age_days: Option<i64>,
    /// Source registry, passed through from the release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    /// Checksum URL, passed through from the release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_url: Option<String>,
    /// Download URL, passed through from the release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// New content digest, passed through from the release
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_digest: Option<String>,
}

impl LookupUpdate {
    /// Creates a descriptor with only the identifying fields set; all
    /// flags false, all optional metadata absent
    pub fn new(bucket: impl Into<String>, new_version: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            new_version: new_version.into(),
            new_value: None,
            new_major: None,
            new_minor: None,
            new_patch: None,
            update_type: None,
            is_breaking: false,
            is_range: false,
            is_lockfile_update: false,
            is_bump: false,
            merge_confidence: None,
            release_timestamp: None,
            new_version_age_days: None,
            registry_url: None,
            checksum_url: None,
            download_url: None,
            new_digest: None,
        }
    }

    /// Returns true if this update only touches the lock/digest side,
    /// leaving the manifest text unchanged
    pub fn is_manifest_noop(&self) -> bool {
        self.is_lockfile_update || self.update_type == Some(UpdateType::Digest)
    }
}

impl fmt::Display for LookupUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.update_type {
            Some(kind) => write!(f, "[{}] {} -> {}", self.bucket, kind, self.new_version),
            None => write!(f, "[{}] -> {}", self.bucket, self.new_version),
        }
    }
}
