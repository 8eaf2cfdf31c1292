//! Update-candidate resolution
//!
//! This module provides:
//! - Release set normalization into a candidate pool
//! - Update type classification and breaking-change detection
//! - Bucket assignment per grouping policy
//! - The update generator producing `LookupUpdate` descriptors
//! - Merge-confidence enrichment
//! - The `UpdateResolver` driving the whole pipeline for one dependency

mod bucket;
mod classify;
mod confidence;
mod generate;
mod normalize;

pub use bucket::{
    assign_buckets, bucket_for, BUCKET_LATEST, BUCKET_MAJOR, BUCKET_NON_MAJOR, BUCKET_PATCH,
};
pub use classify::{classify_update_type, is_breaking_transition};
pub use confidence::{ConfidenceRequest, HttpConfidenceClient, MergeConfidenceLookup};
pub use generate::UpdateGenerator;
pub use normalize::normalize_releases;

use crate::config::LookupConfig;
use crate::domain::{LookupUpdate, RangeStrategy, Release, UpdateType};
use crate::versioning::VersioningScheme;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::debug;

/// Bucket id used for the pin special update
pub const BUCKET_PIN: &str = "pin";
/// Bucket id used for the digest special update
pub const BUCKET_DIGEST: &str = "digest";
/// Bucket id used for the rollback special update
pub const BUCKET_ROLLBACK: &str = "rollback";

/// Resolves the update list for one dependency
///
/// Runs normalize -> bucket -> generate and adds the special updates a
/// plain bucket walk cannot express: digest-only refreshes, pin
/// narrowing and rollbacks after upstream deletions.
pub struct UpdateResolver<'a> {
    config: &'a LookupConfig,
    scheme: &'a dyn VersioningScheme,
    /// Current time for age calculations
    now: DateTime<Utc>,
}

impl<'a> UpdateResolver<'a> {
    /// Create a resolver using the current wall clock
    pub fn new(config: &'a LookupConfig, scheme: &'a dyn VersioningScheme) -> Self {
        Self {
            config,
            scheme,
            now: Utc::now(),
        }
    }

    /// Create a resolver with a custom current time (for testing)
    pub fn with_time(
        config: &'a LookupConfig,
        scheme: &'a dyn VersioningScheme,
        now: DateTime<Utc>,
    ) -> Self {
        Self { config, scheme, now }
    }

    /// Generates one update under a forced update type
    async fn generate_special(
        &self,
        update_type: UpdateType,
        bucket: &str,
        release: &Release,
        enricher: Option<&dyn MergeConfidenceLookup>,
    ) -> LookupUpdate {
        let config = self.config.clone().with_update_type(update_type);
        let generator = UpdateGenerator::with_time(&config, self.scheme, self.now);
        generator.generate(bucket, release, enricher).await
    }

    /// Resolves all updates for the dependency against the given releases
    pub async fn resolve(
        &self,
        releases: &[Release],
        enricher: Option<&dyn MergeConfidenceLookup>,
    ) -> Vec<LookupUpdate> {
        let current_version = self.config.current_version.as_deref();
        let pool = normalize_releases(
            releases,
            current_version,
            self.scheme,
            &self.config.candidates,
            self.now,
        );

        let mut updates = Vec::new();

        // Digest refresh: the registry serves a different digest for the
        // version currently in use
        if let (Some(current), Some(current_digest)) =
            (current_version, self.config.current_digest.as_deref())
        {
            let same_version = pool
                .iter()
                .find(|r| self.scheme.compare(&r.version, current) == Ordering::Equal);
            if let Some(release) = same_version {
                if let Some(digest) = release.new_digest.as_deref() {
                    if digest != current_digest {
                        debug!(package = %self.config.package_name, digest, "digest changed upstream");
                        updates.push(
                            self.generate_special(
                                UpdateType::Digest,
                                BUCKET_DIGEST,
                                release,
                                enricher,
                            )
                            .await,
                        );
                    }
                }
            }
        }

        // Pin narrowing: a ranged constraint under the pin strategy is
        // first narrowed to the version already in use
        if self.config.range_strategy == RangeStrategy::Pin {
            if let (Some(current), Some(value)) =
                (current_version, self.config.current_value.as_deref())
            {
                if !self.scheme.is_version(value) {
                    let release = pool
                        .iter()
                        .find(|r| self.scheme.compare(&r.version, current) == Ordering::Equal)
                        .cloned()
                        .unwrap_or_else(|| Release::new(current));
                    updates.push(
                        self.generate_special(UpdateType::Pin, BUCKET_PIN, &release, enricher)
                            .await,
                    );
                }
            }
        }

        let newer: Vec<Release> = match current_version {
            Some(current) => pool
                .iter()
                .filter(|r| self.scheme.compare(&r.version, current) == Ordering::Greater)
                .cloned()
                .collect(),
            None => pool.clone(),
        };

        // Rollback: the version in use vanished upstream and nothing
        // newer exists to move to
        if let Some(current) = current_version {
            let current_listed = pool
                .iter()
                .any(|r| self.scheme.compare(&r.version, current) == Ordering::Equal);
            if !current_listed && newer.is_empty() && self.config.candidates.allow_rollback {
                let best_below = pool
                    .iter()
                    .filter(|r| self.scheme.compare(&r.version, current) == Ordering::Less)
                    .max_by(|a, b| self.scheme.compare(&a.version, &b.version));
                if let Some(release) = best_below {
                    debug!(package = %self.config.package_name, current, rollback_to = %release.version, "current version missing upstream");
                    updates.push(
                        self.generate_special(
                            UpdateType::Rollback,
                            BUCKET_ROLLBACK,
                            release,
                            enricher,
                        )
                        .await,
                    );
                }
            }
        }

        let generator = UpdateGenerator::with_time(self.config, self.scheme, self.now);
        for (bucket, release) in
            assign_buckets(&newer, current_version, &self.config.buckets, self.scheme)
        {
            updates.push(generator.generate(&bucket, &release, enricher).await);
        }

        updates
    }
}
