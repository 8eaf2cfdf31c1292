//! Update type classification values

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of transition an update represents
///
/// Exactly one type is attached per update. `major`/`minor`/`patch` come
/// from scheme decomposition; `pin`, `digest` and `rollback` are assigned
/// by the resolver for their special flows; `replacement` is the coarse
/// result for schemes that cannot decompose versions; `bump` marks an
/// in-range lower-bound move when a caller chooses to label it as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// Major version transition, potentially breaking
    Major,
    /// Minor version transition
    Minor,
    /// Patch-level transition
    Patch,
    /// Constraint narrowed to an exact version, version unchanged
    Pin,
    /// Only the content digest changes, version unchanged
    Digest,
    /// Proposed downgrade to a version still present upstream
    Rollback,
    /// Scheme could not decompose; treated as a wholesale replacement
    Replacement,
    /// In-range lower-bound move
    Bump,
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdateType::Major => "major",
            UpdateType::Minor => "minor",
            UpdateType::Patch => "patch",
            UpdateType::Pin => "pin",
            UpdateType::Digest => "digest",
            UpdateType::Rollback => "rollback",
            UpdateType::Replacement => "replacement",
            UpdateType::Bump => "bump",
        };
        write!(f, "{}", name)
    }
}
