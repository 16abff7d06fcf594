//! Version parsing and ordering
//!
//! Versions are full semver values so pre-release/build metadata survives a
//! round-trip, but ordering looks at the numeric triple only.

use crate::error::MalformedVersion;
use semver::Version;
use std::cmp::Ordering;

/// Parses a bare version string as reported by the registry.
///
/// A leading `v` is tolerated (`v1.2.3`). Anything without a full
/// `major.minor.patch` triple is malformed.
pub fn parse_version(raw: &str) -> Result<Version, MalformedVersion> {
    let trimmed = raw.trim();
    let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(candidate).map_err(|_| MalformedVersion::new(raw))
}

/// Compares two versions over (major, minor, patch), in that order.
///
/// Pre-release and build metadata never affect the ordering.
pub fn compare(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch).cmp(&(b.major, b.minor, b.patch))
}
