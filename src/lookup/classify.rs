//! Update type classification and breaking-change detection

use crate::domain::UpdateType;
use crate::versioning::VersioningScheme;

/// Classifies the transition between two concrete versions
///
/// Decomposes both versions through the scheme: a differing major digit
/// is `major`, a differing minor is `minor`, anything else that changed
/// is `patch`. A scheme that cannot decompose one of the versions yields
/// the coarse `replacement` result instead of failing.
pub fn classify_update_type(
    scheme: &dyn VersioningScheme,
    current_version: &str,
    new_version: &str,
) -> UpdateType {
    let current_major = scheme.get_major(current_version);
    let new_major = scheme.get_major(new_version);

    match (current_major, new_major) {
        (Some(current), Some(new)) if current != new => return UpdateType::Major,
        (Some(_), Some(_)) => {}
        // Best effort for schemes without decomposition
        _ => return UpdateType::Replacement,
    }

    if let (Some(current), Some(new)) = (
        scheme.get_minor(current_version),
        scheme.get_minor(new_version),
    ) {
        if current != new {
            return UpdateType::Minor;
        }
    }

    // Patch digit differs, or the strings differ in some finer way
    // (prerelease tag, build metadata, missing components)
    UpdateType::Patch
}

/// Computes the breaking flag for a transition, once per update
///
/// Delegates to the scheme's `is_breaking` capability when present.
/// Without the capability the documented fallback applies: only major
/// transitions are breaking. Transitions into or out of unstable
/// versions are deliberately not flagged by the fallback, even though
/// they can be semantically breaking; schemes that care carry the
/// capability instead.
pub fn is_breaking_transition(
    scheme: &dyn VersioningScheme,
    current_version: &str,
    new_version: &str,
    update_type: Option<UpdateType>,
) -> bool {
    match scheme.is_breaking(current_version, new_version) {
        Some(breaking) => breaking,
        None => update_type == Some(UpdateType::Major),
    }
}
