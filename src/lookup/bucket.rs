//! Bucket assignment for candidate releases
//!
//! Buckets group candidates so that one update is proposed per group:
//! everything in `latest` when major/minor separation is off, otherwise
//! `major`/`non-major` (or one `v{N}` bucket per newer major line), with
//! an optional dedicated `patch` bucket. Within a bucket the
//! highest-precedence release wins.

use crate::config::BucketPolicy;
use crate::domain::Release;
use crate::versioning::VersioningScheme;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Bucket id for all candidates when separation is off or decomposition
/// is unavailable
pub const BUCKET_LATEST: &str = "latest";
/// Bucket id for major updates
pub const BUCKET_MAJOR: &str = "major";
/// Bucket id for same-major updates
pub const BUCKET_NON_MAJOR: &str = "non-major";
/// Bucket id for patch-level updates when minor/patch separation is on
pub const BUCKET_PATCH: &str = "patch";

/// Computes the bucket a candidate version belongs to
pub fn bucket_for(
    policy: &BucketPolicy,
    scheme: &dyn VersioningScheme,
    current_version: Option<&str>,
    new_version: &str,
) -> String {
    if !policy.separate_major_minor {
        return BUCKET_LATEST.to_string();
    }

    let current_major = current_version.and_then(|v| scheme.get_major(v));
    let new_major = scheme.get_major(new_version);

    let (current_major, new_major) = match (current_major, new_major) {
        (Some(current), Some(new)) => (current, new),
        // Without decomposition there is nothing to separate on
        _ => return BUCKET_LATEST.to_string(),
    };

    if new_major != current_major {
        if policy.separate_multiple_major {
            return format!("v{}", new_major);
        }
        return BUCKET_MAJOR.to_string();
    }

    if policy.separate_minor_patch {
        let current_minor = current_version.and_then(|v| scheme.get_minor(v));
        let new_minor = scheme.get_minor(new_version);
        if let (Some(current), Some(new)) = (current_minor, new_minor) {
            if current == new {
                return BUCKET_PATCH.to_string();
            }
        }
    }

    BUCKET_NON_MAJOR.to_string()
}

/// Partitions candidates into buckets and picks the highest release of
/// each per the scheme's ordering. The map is ordered so iteration (and
/// thus output order) is deterministic.
pub fn assign_buckets(
    releases: &[Release],
    current_version: Option<&str>,
    policy: &BucketPolicy,
    scheme: &dyn VersioningScheme,
) -> BTreeMap<String, Release> {
    let mut buckets: BTreeMap<String, Release> = BTreeMap::new();

    for release in releases {
        let id = bucket_for(policy, scheme, current_version, &release.version);
        let replaces_chosen = match buckets.get(&id) {
            Some(chosen) => scheme.compare(&release.version, &chosen.version) == Ordering::Greater,
            None => true,
        };
        if replaces_chosen {
            buckets.insert(id, release.clone());
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versioning::SemverScheme;

    fn releases(versions: &[&str]) -> Vec<Release> {
        versions.iter().map(|v| Release::new(*v)).collect()
    }

    #[test]
    fn test_single_bucket_when_separation_off() {
        let policy = BucketPolicy {
            separate_major_minor: false,
            ..Default::default()
        };
        let scheme = SemverScheme::new();

        let pool = releases(&["1.3.0", "2.0.0", "3.1.0"]);
        let buckets = assign_buckets(&pool, Some("1.2.0"), &policy, &scheme);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[BUCKET_LATEST].version, "3.1.0");
    }

    #[test]
    fn test_major_and_non_major() {
        let policy = BucketPolicy::default();
        let scheme = SemverScheme::new();

        let pool = releases(&["1.3.0", "1.4.0", "2.0.0", "2.1.0"]);
        let buckets = assign_buckets(&pool, Some("1.2.0"), &policy, &scheme);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[BUCKET_NON_MAJOR].version, "1.4.0");
        assert_eq!(buckets[BUCKET_MAJOR].version, "2.1.0");
    }

    #[test]
    fn test_separate_multiple_major() {
        let policy = BucketPolicy {
            separate_multiple_major: true,
            ..Default::default()
        };
        let scheme = SemverScheme::new();

        let pool = releases(&["2.0.0", "2.5.0", "3.0.0", "3.2.0"]);
        let buckets = assign_buckets(&pool, Some("1.2.0"), &policy, &scheme);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets["v2"].version, "2.5.0");
        assert_eq!(buckets["v3"].version, "3.2.0");
    }

    #[test]
    fn test_separate_minor_patch() {
        let policy = BucketPolicy {
            separate_minor_patch: true,
            ..Default::default()
        };
        let scheme = SemverScheme::new();

        let pool = releases(&["1.2.1", "1.2.5", "1.3.0"]);
        let buckets = assign_buckets(&pool, Some("1.2.0"), &policy, &scheme);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[BUCKET_PATCH].version, "1.2.5");
        assert_eq!(buckets[BUCKET_NON_MAJOR].version, "1.3.0");
    }

    #[test]
    fn test_no_current_version_lands_in_latest() {
        let policy = BucketPolicy::default();
        let scheme = SemverScheme::new();

        let pool = releases(&["1.3.0", "2.0.0"]);
        let buckets = assign_buckets(&pool, None, &policy, &scheme);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[BUCKET_LATEST].version, "2.0.0");
    }

    #[test]
    fn test_highest_release_wins_within_bucket() {
        let policy = BucketPolicy::default();
        let scheme = SemverScheme::new();

        // Multi-digit comparison, not lexicographic
        let pool = releases(&["1.9.0", "1.10.0", "1.2.1"]);
        let buckets = assign_buckets(&pool, Some("1.2.0"), &policy, &scheme);

        assert_eq!(buckets[BUCKET_NON_MAJOR].version, "1.10.0");
    }

    #[test]
    fn test_empty_pool() {
        let policy = BucketPolicy::default();
        let scheme = SemverScheme::new();
        let buckets = assign_buckets(&[], Some("1.0.0"), &policy, &scheme);
        assert!(buckets.is_empty());
    }
}
