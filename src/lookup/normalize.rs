//! Release set normalization
//!
//! Turns the raw fetched release list into the candidate pool: versions
//! the scheme cannot parse are dropped, duplicates across registries are
//! merged into one record, unstable releases are filtered out unless the
//! current version is itself unstable (or policy allows them), releases
//! younger than the configured minimum age are held back, and the result
//! is sorted ascending by the scheme's ordering.

use crate::config::CandidatePolicy;
use crate::domain::Release;
use crate::versioning::VersioningScheme;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Builds the candidate pool from raw releases
pub fn normalize_releases(
    releases: &[Release],
    current_version: Option<&str>,
    scheme: &dyn VersioningScheme,
    policy: &CandidatePolicy,
    now: DateTime<Utc>,
) -> Vec<Release> {
    let mut pool: Vec<Release> = Vec::new();

    for release in releases {
        if !scheme.is_version(&release.version) {
            debug!(version = %release.version, scheme = scheme.name(), "dropping unparseable release");
            continue;
        }
        match pool.iter_mut().find(|r| r.version == release.version) {
            // Same version from another registry: keep the first record,
            // fill in whatever metadata it was missing
            Some(existing) => *existing = existing.clone().merge_metadata(release),
            None => pool.push(release.clone()),
        }
    }

    // Stable current versions only consider stable candidates; a
    // dependency already on a prerelease keeps seeing prereleases
    let allow_unstable = policy.allow_unstable
        || current_version.map(|v| !scheme.is_stable(v)).unwrap_or(false);
    if !allow_unstable {
        pool.retain(|r| scheme.is_stable(&r.version));
    }

    if let Some(min_age) = policy.min_release_age {
        // Releases without a timestamp cannot be age-checked and are kept
        pool.retain(|r| match r.release_timestamp {
            Some(released_at) => now - released_at >= min_age,
            None => true,
        });
    }

    pool.sort_by(|a, b| scheme.compare(&a.version, &b.version));
    pool
}
