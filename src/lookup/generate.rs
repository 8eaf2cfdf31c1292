//! Update descriptor generation
//!
//! The generator synthesizes one `LookupUpdate` per (bucket, release)
//! pair. It is deterministic for a fixed clock and touches no shared
//! state; the only suspension point is the optional merge-confidence
//! lookup. A failed constraint rewrite is absorbed here: the update is
//! still produced, value-unchanged, and nothing propagates to the
//! caller.

use super::classify::{classify_update_type, is_breaking_transition};
use super::confidence::{ConfidenceRequest, MergeConfidenceLookup};
use crate::config::LookupConfig;
use crate::domain::{LookupUpdate, RangeStrategy, Release, UpdateType};
use crate::versioning::{NewValueArgs, VersioningScheme};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Builds `LookupUpdate` descriptors for one dependency
pub struct UpdateGenerator<'a> {
    config: &'a LookupConfig,
    scheme: &'a dyn VersioningScheme,
    /// Current time for age calculations
    now: DateTime<Utc>,
}

impl<'a> UpdateGenerator<'a> {
    /// Create a generator using the current wall clock
    pub fn new(config: &'a LookupConfig, scheme: &'a dyn VersioningScheme) -> Self {
        Self {
            config,
            scheme,
            now: Utc::now(),
        }
    }

    /// Create a generator with a custom current time (for testing)
    pub fn with_time(
        config: &'a LookupConfig,
        scheme: &'a dyn VersioningScheme,
        now: DateTime<Utc>,
    ) -> Self {
        Self { config, scheme, now }
    }

    /// Rewrites the declared constraint for the new version. A scheme
    /// failure is logged and neutralized to the unchanged value; an
    /// absent or empty constraint is carried through untouched.
    fn rewrite_value(&self, current_value: Option<&str>, new_version: &str) -> Option<String> {
        let value = match current_value {
            Some(value) if !value.is_empty() => value,
            other => return other.map(str::to_string),
        };

        let args = NewValueArgs {
            current_value: value,
            range_strategy: self.config.range_strategy,
            current_version: self.config.current_version.as_deref(),
            new_version,
        };
        match self.scheme.get_new_value(&args) {
            Ok(rewritten) => Some(rewritten),
            Err(error) => {
                warn!(
                    current_value = %value,
                    range_strategy = %self.config.range_strategy,
                    current_version = ?self.config.current_version,
                    new_version = %new_version,
                    error = %error,
                    "constraint rewrite failed, keeping current value"
                );
                Some(value.to_string())
            }
        }
    }

    /// Generates the full update descriptor for one chosen release
    pub async fn generate(
        &self,
        bucket: &str,
        release: &Release,
        enricher: Option<&dyn MergeConfidenceLookup>,
    ) -> LookupUpdate {
        let new_version = release.version.as_str();
        let current_value = self.config.current_value.as_deref();
        let current_version = self.config.current_version.as_deref();

        let base = LookupUpdate {
            bucket: bucket.to_string(),
            new_version: new_version.to_string(),
            new_value: self.rewrite_value(current_value, new_version),
            new_major: self.scheme.get_major(new_version),
            new_minor: self.scheme.get_minor(new_version),
            new_patch: self.scheme.get_patch(new_version),
            update_type: None,
            is_breaking: false,
            is_range: false,
            is_lockfile_update: false,
            is_bump: false,
            merge_confidence: None,
            release_timestamp: release.release_timestamp,
            new_version_age_days: release
                .release_timestamp
                .map(|released_at| (self.now - released_at).num_days()),
            registry_url: release.registry_url.clone(),
            checksum_url: release.checksum_url.clone(),
            download_url: release.download_url.clone(),
            new_digest: release.new_digest.clone(),
        };

        // Classification is meaningless without a current version and
        // without a caller-supplied type: return the degenerate update
        // with the constraint untouched
        if self.config.update_type.is_none() && current_version.is_none() {
            return LookupUpdate {
                new_value: current_value.map(str::to_string),
                ..base
            };
        }

        let update_type = self.config.update_type.or_else(|| {
            current_version
                .map(|current| classify_update_type(self.scheme, current, new_version))
        });

        let is_breaking = match current_version {
            Some(current) => {
                is_breaking_transition(self.scheme, current, new_version, update_type)
            }
            None => update_type == Some(UpdateType::Major),
        };

        let merge_confidence = match enricher {
            Some(enricher) if self.config.wants_merge_confidence() => {
                let request = ConfidenceRequest {
                    datasource: &self.config.datasource,
                    package_name: &self.config.package_name,
                    current_version,
                    new_version,
                    update_type,
                };
                match enricher.lookup(&request).await {
                    Ok(level) => level,
                    Err(error) => {
                        warn!(
                            package = %self.config.package_name,
                            new_version = %new_version,
                            error = %error,
                            "merge confidence lookup failed"
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        let is_range = base
            .new_value
            .as_deref()
            .map(|value| !self.scheme.is_version(value))
            .unwrap_or(false);

        let is_lockfile_update = self.config.range_strategy == RangeStrategy::UpdateLockfile
            && base.new_value.as_deref() == current_value;

        let is_bump = self.config.range_strategy == RangeStrategy::Bump
            && current_value
                .map(|value| self.scheme.matches(new_version, value))
                .unwrap_or(false);

        LookupUpdate {
            update_type,
            is_breaking,
            is_range,
            is_lockfile_update,
            is_bump,
            merge_confidence,
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageRule;
    use crate::domain::{MergeConfidence, UpdateType};
    use crate::error::EnrichmentError;
    use crate::versioning::{NpmScheme, SemverScheme};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn npm_config(current_value: &str, current_version: &str) -> LookupConfig {
        LookupConfig::new("lodash", "npm")
            .with_current_value(current_value)
            .with_current_version(current_version)
            .with_range_strategy(RangeStrategy::Replace)
    }

    struct FixedConfidence(Option<MergeConfidence>);

    #[async_trait]
    impl MergeConfidenceLookup for FixedConfidence {
        async fn lookup(
            &self,
            _request: &ConfidenceRequest<'_>,
        ) -> Result<Option<MergeConfidence>, EnrichmentError> {
            Ok(self.0)
        }
    }

    struct FailingConfidence;

    #[async_trait]
    impl MergeConfidenceLookup for FailingConfidence {
        async fn lookup(
            &self,
            request: &ConfidenceRequest<'_>,
        ) -> Result<Option<MergeConfidence>, EnrichmentError> {
            Err(EnrichmentError::timeout(request.package_name))
        }
    }

    fn confidence_rules() -> Vec<PackageRule> {
        vec![PackageRule {
            match_confidence: vec![MergeConfidence::High],
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn test_generate_minor_replace() {
        let config = npm_config("^1.2.0", "1.2.0");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("non-major", &Release::new("1.3.0"), None)
            .await;

        assert_eq!(update.new_value.as_deref(), Some("^1.3.0"));
        assert_eq!(update.update_type, Some(UpdateType::Minor));
        assert!(!update.is_breaking);
        assert!(update.is_range);
        assert_eq!(update.new_major, Some(1));
        assert_eq!(update.new_minor, Some(3));
        assert_eq!(update.new_patch, Some(0));
    }

    #[tokio::test]
    async fn test_generate_major_pin() {
        let config = LookupConfig::new("lodash", "npm")
            .with_current_value("1.2.0")
            .with_current_version("1.2.0")
            .with_range_strategy(RangeStrategy::Pin);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("major", &Release::new("2.0.0"), None)
            .await;

        assert_eq!(update.update_type, Some(UpdateType::Major));
        assert!(update.is_breaking);
        assert_eq!(update.new_value.as_deref(), Some("2.0.0"));
        assert!(!update.is_range);
    }

    #[tokio::test]
    async fn test_generate_early_exit_without_current_version() {
        let config = LookupConfig::new("lodash", "npm");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("latest", &Release::new("3.1.0"), None)
            .await;

        assert!(update.new_value.is_none());
        assert!(update.update_type.is_none());
        assert!(!update.is_breaking);
        // Decomposition still happened before the early exit
        assert_eq!(update.new_major, Some(3));
    }

    #[tokio::test]
    async fn test_generate_early_exit_keeps_constraint_untouched() {
        let config = LookupConfig::new("lodash", "npm")
            .with_current_value("^1.0.0")
            .with_range_strategy(RangeStrategy::Replace);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("latest", &Release::new("3.1.0"), None)
            .await;

        // Step 4 rewrote the value, the early exit restored it
        assert_eq!(update.new_value.as_deref(), Some("^1.0.0"));
        assert!(update.update_type.is_none());
    }

    #[tokio::test]
    async fn test_generate_override_skips_classification() {
        let config = npm_config("^1.2.0", "1.2.0").with_update_type(UpdateType::Rollback);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("rollback", &Release::new("1.1.0"), None)
            .await;

        assert_eq!(update.update_type, Some(UpdateType::Rollback));
    }

    #[tokio::test]
    async fn test_generate_rewrite_failure_keeps_value() {
        // Compound cargo ranges cannot be shape-rewritten
        let config = LookupConfig::new("serde", "crates-io")
            .with_current_value(">=1.0.0, <2.0.0")
            .with_current_version("1.5.0")
            .with_range_strategy(RangeStrategy::Replace);
        let scheme = SemverScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("major", &Release::new("3.0.0"), None)
            .await;

        assert_eq!(update.new_value.as_deref(), Some(">=1.0.0, <2.0.0"));
        assert_eq!(update.update_type, Some(UpdateType::Major));
        assert!(update.is_range);
    }

    #[tokio::test]
    async fn test_generate_unconstrained_dependency() {
        let config = LookupConfig::new("lodash", "npm").with_current_version("1.2.0");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("non-major", &Release::new("1.3.0"), None)
            .await;

        assert!(update.new_value.is_none());
        assert_eq!(update.update_type, Some(UpdateType::Minor));
        assert!(!update.is_range);
    }

    #[tokio::test]
    async fn test_generate_age_and_metadata_passthrough() {
        let config = npm_config("^1.2.0", "1.2.0");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let release = Release::new("1.3.0")
            .with_timestamp(fixed_now() - Duration::days(12))
            .with_digest("sha512:abc")
            .with_registry_url("https://registry.npmjs.org");
        let update = generator.generate("non-major", &release, None).await;

        assert_eq!(update.new_version_age_days, Some(12));
        assert_eq!(update.new_digest.as_deref(), Some("sha512:abc"));
        assert_eq!(
            update.registry_url.as_deref(),
            Some("https://registry.npmjs.org")
        );
        // Absent input metadata stays absent
        assert!(update.checksum_url.is_none());
        assert!(update.download_url.is_none());
    }

    #[tokio::test]
    async fn test_generate_age_floors_partial_days() {
        let config = npm_config("^1.2.0", "1.2.0");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let release = Release::new("1.3.0")
            .with_timestamp(fixed_now() - Duration::days(5) - Duration::hours(23));
        let update = generator.generate("non-major", &release, None).await;

        assert_eq!(update.new_version_age_days, Some(5));
    }

    #[tokio::test]
    async fn test_generate_confidence_only_when_requested() {
        let config = npm_config("^1.2.0", "1.2.0");
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());
        let enricher = FixedConfidence(Some(MergeConfidence::High));

        // No rule requests confidence: the enricher must not be consulted
        let update = generator
            .generate("non-major", &Release::new("1.3.0"), Some(&enricher))
            .await;
        assert!(update.merge_confidence.is_none());
    }

    #[tokio::test]
    async fn test_generate_confidence_attached_when_requested() {
        let config = npm_config("^1.2.0", "1.2.0").with_package_rules(confidence_rules());
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());
        let enricher = FixedConfidence(Some(MergeConfidence::VeryHigh));

        let update = generator
            .generate("non-major", &Release::new("1.3.0"), Some(&enricher))
            .await;
        assert_eq!(update.merge_confidence, Some(MergeConfidence::VeryHigh));
    }

    #[tokio::test]
    async fn test_generate_confidence_failure_leaves_field_absent() {
        let config = npm_config("^1.2.0", "1.2.0").with_package_rules(confidence_rules());
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("non-major", &Release::new("1.3.0"), Some(&FailingConfidence))
            .await;
        assert!(update.merge_confidence.is_none());
        // The rest of the descriptor is still complete
        assert_eq!(update.update_type, Some(UpdateType::Minor));
        assert_eq!(update.new_value.as_deref(), Some("^1.3.0"));
    }

    #[tokio::test]
    async fn test_generate_lockfile_update_flag() {
        let config = LookupConfig::new("lodash", "npm")
            .with_current_value("^1.2.0")
            .with_current_version("1.2.0")
            .with_range_strategy(RangeStrategy::UpdateLockfile);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("non-major", &Release::new("1.3.0"), None)
            .await;

        assert_eq!(update.new_value.as_deref(), Some("^1.2.0"));
        assert!(update.is_lockfile_update);
        assert!(!update.is_bump);
    }

    #[tokio::test]
    async fn test_generate_bump_flag() {
        let config = LookupConfig::new("lodash", "npm")
            .with_current_value("^1.0.0")
            .with_current_version("1.0.0")
            .with_range_strategy(RangeStrategy::Bump);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("non-major", &Release::new("1.5.0"), None)
            .await;

        assert_eq!(update.new_value.as_deref(), Some("^1.5.0"));
        assert!(update.is_bump);
        assert!(!update.is_lockfile_update);
    }

    #[tokio::test]
    async fn test_generate_bump_out_of_range_is_not_bump() {
        let config = LookupConfig::new("lodash", "npm")
            .with_current_value("^1.0.0")
            .with_current_version("1.0.0")
            .with_range_strategy(RangeStrategy::Bump);
        let scheme = NpmScheme::new();
        let generator = UpdateGenerator::with_time(&config, &scheme, fixed_now());

        let update = generator
            .generate("major", &Release::new("2.0.0"), None)
            .await;

        assert!(!update.is_bump);
    }
}
