//! Per-dependency record and decision structures

use super::constraint::VersionConstraint;
use semver::Version;
use std::fmt;

/// Joined view of one dependency: what the manifest declares and what the
/// registry currently serves. Built fresh per run, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Package name, the unique key
    pub name: String,
    /// Declared constraint; `None` when the manifest target carries no
    /// parseable version (a git URL, a branch name) - the dependency is
    /// tracked for display but never flagged outdated
    pub declared: Option<VersionConstraint>,
    /// Latest version the registry reports
    pub latest: Version,
}

impl DependencyRecord {
    pub fn new(
        name: impl Into<String>,
        declared: Option<VersionConstraint>,
        latest: Version,
    ) -> Self {
        Self {
            name: name.into(),
            declared,
            latest,
        }
    }

    /// Creates a record with a parsed constraint
    pub fn tracked(name: impl Into<String>, declared: VersionConstraint, latest: Version) -> Self {
        Self::new(name, Some(declared), latest)
    }

    /// Creates a record whose local target had no version constraint
    pub fn untracked(name: impl Into<String>, latest: Version) -> Self {
        Self::new(name, None, latest)
    }

    /// True iff the declared constraint is strictly behind the latest version
    pub fn is_outdated(&self) -> bool {
        self.declared
            .as_ref()
            .is_some_and(|c| c.needs_update(&self.latest))
    }

    /// The constraint to write back on an accepted upgrade
    pub fn recommended(&self) -> Option<VersionConstraint> {
        self.declared
            .as_ref()
            .map(|c| c.recommended_upgrade(&self.latest))
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declared {
            Some(declared) => write!(f, "{} {} (latest {})", self.name, declared, self.latest),
            None => write!(f, "{} (untracked, latest {})", self.name, self.latest),
        }
    }
}

/// Outcome of one confirmation question; lives for a single run
#[derive(Debug, Clone)]
pub struct UpgradeDecision {
    pub record: DependencyRecord,
    pub accepted: bool,
}

impl UpgradeDecision {
    pub fn accept(record: DependencyRecord) -> Self {
        Self {
            record,
            accepted: true,
        }
    }

    pub fn decline(record: DependencyRecord) -> Self {
        Self {
            record,
            accepted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_version;

    fn record(declared: &str, latest: &str) -> DependencyRecord {
        DependencyRecord::tracked(
            "jquery",
            VersionConstraint::parse(declared).unwrap(),
            parse_version(latest).unwrap(),
        )
    }

    #[test]
    fn test_is_outdated() {
        assert!(record("~2.1.0", "2.2.0").is_outdated());
        assert!(!record("~2.2.0", "2.2.0").is_outdated());
        assert!(!record("^2.0.0", "1.9.9").is_outdated());
    }

    #[test]
    fn test_untracked_never_outdated() {
        let rec = DependencyRecord::untracked("jquery", parse_version("9.9.9").unwrap());
        assert!(!rec.is_outdated());
        assert!(rec.recommended().is_none());
    }

    #[test]
    fn test_recommended() {
        let rec = record("~2.1.0", "2.2.0");
        assert_eq!(rec.recommended().unwrap().to_string(), "~2.2.0");
    }

    #[test]
    fn test_display_tracked() {
        let display = format!("{}", record("~2.1.0", "2.2.0"));
        assert_eq!(display, "jquery ~2.1.0 (latest 2.2.0)");
    }

    #[test]
    fn test_display_untracked() {
        let rec = DependencyRecord::untracked("moment", parse_version("2.30.1").unwrap());
        let display = format!("{}", rec);
        assert!(display.contains("untracked"));
    }

    #[test]
    fn test_decision_constructors() {
        let rec = record("~2.1.0", "2.2.0");
        assert!(UpgradeDecision::accept(rec.clone()).accepted);
        assert!(!UpgradeDecision::decline(rec).accepted);
    }
}
