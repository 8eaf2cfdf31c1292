//! Published release facts from the registry-fetch layer
//!
//! A `Release` is an immutable record of one published artifact version.
//! Everything besides the version string is optional metadata; absent
//! fields stay absent all the way through to the output descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One published artifact version with optional registry metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// The version string (e.g., "1.2.3")
    pub version: String,
    /// When this version was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_timestamp: Option<DateTime<Utc>>,
    /// Content hash of the artifact, when the registry provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_digest: Option<String>,
    /// URL of a checksum file for the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_url: Option<String>,
    /// Direct download URL for the artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Registry this release was fetched from, set when releases are
    /// merged across multiple registries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
}

impl Release {
    /// Creates a release with only a version, no metadata
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_timestamp: None,
            new_digest: None,
            checksum_url: None,
            download_url: None,
            registry_url: None,
        }
    }

    /// Sets the release timestamp (builder pattern)
    pub fn with_timestamp(mut self, released_at: DateTime<Utc>) -> Self {
        self.release_timestamp = Some(released_at);
        self
    }

    /// Sets the content digest
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.new_digest = Some(digest.into());
        self
    }

    /// Sets the checksum URL
    pub fn with_checksum_url(mut self, url: impl Into<String>) -> Self {
        self.checksum_url = Some(url.into());
        self
    }

    /// Sets the download URL
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    /// Sets the source registry URL
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = Some(url.into());
        self
    }

    /// Copies metadata absent on `self` from another record of the same
    /// version; used when merging duplicates across registries
    pub fn merge_metadata(mut self, other: &Release) -> Self {
        if self.release_timestamp.is_none() {
            self.release_timestamp = other.release_timestamp;
        }
        if self.new_digest.is_none() {
            self.new_digest = other.new_digest.clone();
        }
        if self.checksum_url.is_none() {
            self.checksum_url = other.checksum_url.clone();
        }
        if self.download_url.is_none() {
            self.download_url = other.download_url.clone();
        }
        if self.registry_url.is_none() {
            self.registry_url = other.registry_url.clone();
        }
        self
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
