//! upres - dependency update-candidate resolution engine
//!
//! Given a dependency's current constraint, the set of releases
//! published upstream, a versioning scheme and a range-update strategy,
//! this library deterministically resolves which updates to propose:
//! it normalizes the release set, groups candidates into buckets,
//! classifies each transition and produces one `LookupUpdate`
//! descriptor per bucket, optionally enriched with an externally
//! computed merge-confidence score.
//!
//! Manifest parsing, registry fetching and config merging are upstream
//! concerns; this crate only consumes their results.

pub mod config;
pub mod domain;
pub mod error;
pub mod lookup;
pub mod versioning;
