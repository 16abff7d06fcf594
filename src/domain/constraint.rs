//! Declared version constraints
//!
//! Handles the constraint shapes found in bower.json targets:
//! - Exact: `1.2.3`
//! - Caret: `^1.2.3` - compatible with major version
//! - Tilde: `~1.2.3` - compatible with minor version
//! - Bower endpoint targets: `jquery#~2.1.0`, `#1.2.3`
//!
//! The operator prefix and the numeric triple are extracted by a single
//! anchored pattern, so `#`, `^` and `~` never need order-dependent
//! stripping; when several operator characters precede the triple, the last
//! one wins.

use crate::domain::version::compare;
use crate::error::MalformedVersion;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // optional endpoint prefix up to the last '#', then the operator run,
    // then the numeric triple with optional pre-release/build metadata
    Regex::new(r"^(?:.*#)?([\^~]*)(\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]*)?)$").unwrap()
});

/// The operator prefix of a declared constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    /// No operator: the version is pinned exactly
    Exact,
    /// `^` - compatible with major version
    Caret,
    /// `~` - compatible with minor version
    Tilde,
}

impl ConstraintOp {
    /// The prefix character(s) this operator serializes to
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstraintOp::Exact => "",
            ConstraintOp::Caret => "^",
            ConstraintOp::Tilde => "~",
        }
    }

    fn from_run(run: &str) -> Self {
        match run.chars().last() {
            Some('^') => ConstraintOp::Caret,
            Some('~') => ConstraintOp::Tilde,
            _ => ConstraintOp::Exact,
        }
    }
}

/// A declared version plus its operator prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub op: ConstraintOp,
    pub version: Version,
}

impl VersionConstraint {
    pub fn new(op: ConstraintOp, version: Version) -> Self {
        Self { op, version }
    }

    /// Parses a raw constraint string from a manifest target.
    ///
    /// Accepts a plain `N.N.N`, an operator-prefixed `^N.N.N` / `~N.N.N`,
    /// and full bower targets like `jquery#~2.1.0` (everything through the
    /// last `#` is the endpoint, not part of the constraint). Fails when no
    /// numeric triple follows; callers treat that dependency as untracked.
    pub fn parse(raw: &str) -> Result<Self, MalformedVersion> {
        let caps = CONSTRAINT_RE
            .captures(raw.trim())
            .ok_or_else(|| MalformedVersion::new(raw))?;
        let op = ConstraintOp::from_run(&caps[1]);
        let version = Version::parse(&caps[2]).map_err(|_| MalformedVersion::new(raw))?;
        Ok(Self { op, version })
    }

    /// True iff `latest` is strictly ahead of the declared version.
    ///
    /// Evaluated over the full (major, minor, patch) ordering; a larger
    /// minor never hides a patch-level difference and vice versa.
    pub fn needs_update(&self, latest: &Version) -> bool {
        compare(&self.version, latest) == Ordering::Less
    }

    /// The constraint to write back when accepting an upgrade.
    ///
    /// Carries the latest release verbatim (real patch and metadata, no
    /// synthesized `.0`) under the original operator; when no update is
    /// needed the constraint comes back unchanged.
    pub fn recommended_upgrade(&self, latest: &Version) -> VersionConstraint {
        if self.needs_update(latest) {
            VersionConstraint::new(self.op, latest.clone())
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.prefix(), self.version)
    }
}
