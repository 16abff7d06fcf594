//! Joins the two data sources into per-dependency records
//!
//! `resolve` walks the declared dependency map in manifest order and looks
//! each name up in the installed package list. One bad entry never aborts
//! the batch: it becomes an issue, gets reported, and the rest proceed.

use crate::domain::{parse_version, DependencyRecord, VersionConstraint};
use crate::source::RemotePackage;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// A recoverable per-entry problem found while resolving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// Declared locally but absent from the installed list (or present
    /// without any published version)
    UnknownRemote { name: String },
    /// The installed list reports a latest version we cannot parse
    MalformedRemote { name: String, raw: String },
    /// The local target carries no parseable version constraint; the
    /// dependency is kept but cannot be tracked for updates
    UntrackedLocal { name: String, raw: String },
}

impl fmt::Display for ResolveIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveIssue::UnknownRemote { name } => {
                write!(f, "dependency '{}' is missing from the installed list", name)
            }
            ResolveIssue::MalformedRemote { name, raw } => {
                write!(f, "dependency '{}' reports unparseable version '{}'", name, raw)
            }
            ResolveIssue::UntrackedLocal { name, raw } => {
                write!(f, "dependency '{}' has no trackable version in '{}'", name, raw)
            }
        }
    }
}

/// Result of resolving the declared map against the installed list
#[derive(Debug, Default)]
pub struct Resolution {
    /// Records in manifest declaration order
    pub records: Vec<DependencyRecord>,
    /// Per-entry problems, reported separately from up-to-date entries
    pub issues: Vec<ResolveIssue>,
}

/// Resolves declared constraints against the installed package list.
///
/// Only local keys are considered; packages that exist remotely but are not
/// declared in the manifest never appear in the output. Output order is the
/// manifest's declaration order.
pub fn resolve(local: &Map<String, Value>, remote: &HashMap<String, RemotePackage>) -> Resolution {
    let mut resolution = Resolution::default();

    for (name, target) in local {
        let latest_raw = match remote.get(name).and_then(RemotePackage::latest) {
            Some(raw) => raw,
            None => {
                resolution.issues.push(ResolveIssue::UnknownRemote {
                    name: name.clone(),
                });
                continue;
            }
        };

        let latest = match parse_version(latest_raw) {
            Ok(version) => version,
            Err(_) => {
                resolution.issues.push(ResolveIssue::MalformedRemote {
                    name: name.clone(),
                    raw: latest_raw.to_string(),
                });
                continue;
            }
        };

        let declared = match target.as_str() {
            Some(raw) => match VersionConstraint::parse(raw) {
                Ok(constraint) => Some(constraint),
                Err(_) => {
                    resolution.issues.push(ResolveIssue::UntrackedLocal {
                        name: name.clone(),
                        raw: raw.to_string(),
                    });
                    None
                }
            },
            // non-string targets (object endpoints) carry no constraint
            None => {
                resolution.issues.push(ResolveIssue::UntrackedLocal {
                    name: name.clone(),
                    raw: target.to_string(),
                });
                None
            }
        };

        resolution
            .records
            .push(DependencyRecord::new(name.clone(), declared, latest));
    }

    resolution
}
