//! Error types for the resolution engine, using thiserror
//!
//! Error hierarchy:
//! - VersioningError: Failures at the versioning-scheme boundary
//! - EnrichmentError: Failures talking to the merge-confidence service
//!
//! Nothing in this crate treats these as fatal: a rewrite failure is
//! absorbed by the update generator (the constraint is kept unchanged)
//! and an enrichment failure only leaves the confidence field absent.

use thiserror::Error;

/// Errors raised by a versioning scheme
#[derive(Error, Debug)]
pub enum VersioningError {
    /// A string could not be parsed as a version
    #[error("invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// A string could not be parsed as a range/constraint
    #[error("invalid range '{range}': {message}")]
    InvalidRange { range: String, message: String },

    /// The constraint shape cannot be rewritten for the new version
    #[error("cannot rewrite '{current_value}' to include {new_version}: {message}")]
    NotRewritable {
        current_value: String,
        new_version: String,
        message: String,
    },

    /// The new version falls outside the current range (in-range-only)
    #[error("version {new_version} is outside the current range '{current_value}'")]
    OutsideRange {
        current_value: String,
        new_version: String,
    },
}

/// Errors raised by the merge-confidence service client
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// Network request failed
    #[error("confidence lookup for '{package}' failed: {message}")]
    Network { package: String, message: String },

    /// Service returned a non-success HTTP status
    #[error("confidence service returned HTTP {status} for '{package}'")]
    HttpStatus { package: String, status: u16 },

    /// Rate limit exceeded
    #[error("confidence service rate limit exceeded")]
    RateLimitExceeded,

    /// Timeout
    #[error("timeout during confidence lookup for '{package}'")]
    Timeout { package: String },

    /// Response body could not be interpreted
    #[error("invalid confidence response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },
}

impl VersioningError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        VersioningError::InvalidVersion {
            version: version.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidRange error
    pub fn invalid_range(range: impl Into<String>, message: impl Into<String>) -> Self {
        VersioningError::InvalidRange {
            range: range.into(),
            message: message.into(),
        }
    }

    /// Creates a new NotRewritable error
    pub fn not_rewritable(
        current_value: impl Into<String>,
        new_version: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        VersioningError::NotRewritable {
            current_value: current_value.into(),
            new_version: new_version.into(),
            message: message.into(),
        }
    }

    /// Creates a new OutsideRange error
    pub fn outside_range(
        current_value: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        VersioningError::OutsideRange {
            current_value: current_value.into(),
            new_version: new_version.into(),
        }
    }
}

impl EnrichmentError {
    /// Creates a new Network error
    pub fn network(package: impl Into<String>, message: impl Into<String>) -> Self {
        EnrichmentError::Network {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new HttpStatus error
    pub fn http_status(package: impl Into<String>, status: u16) -> Self {
        EnrichmentError::HttpStatus {
            package: package.into(),
            status,
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        EnrichmentError::Timeout {
            package: package.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        EnrichmentError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }
}
