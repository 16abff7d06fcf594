//! Update report
//!
//! The report is a value built from the resolved records and threaded
//! through the orchestrator; rendering is a pure function of that value.

use crate::domain::DependencyRecord;
use colored::Colorize;
use semver::Version;
use std::fmt::Write;

/// Semantic weight of a version change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Major,
    Minor,
    Patch,
}

impl ChangeKind {
    fn between(old: &Version, new: &Version) -> Self {
        if new.major != old.major {
            ChangeKind::Major
        } else if new.minor != old.minor {
            ChangeKind::Minor
        } else {
            ChangeKind::Patch
        }
    }

    fn colored_label(&self) -> String {
        match self {
            ChangeKind::Major => "major".red().bold().to_string(),
            ChangeKind::Minor => "minor".yellow().to_string(),
            ChangeKind::Patch => "patch".green().to_string(),
        }
    }
}

/// Resolved records grouped for display
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<DependencyRecord>,
}

impl Report {
    pub fn from_records(records: Vec<DependencyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }

    /// Outdated records, in report (= manifest) order
    pub fn outdated(&self) -> Vec<&DependencyRecord> {
        self.records.iter().filter(|r| r.is_outdated()).collect()
    }

    pub fn outdated_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_outdated()).count()
    }

    /// Renders the report for terminal display
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        let outdated = self.outdated();

        if outdated.is_empty() {
            let _ = writeln!(out, "{}", "All dependencies are up to date.".green());
        } else {
            let _ = writeln!(out, "{}", "Dependencies that can be updated:".bold());

            let name_width = outdated.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for record in &outdated {
                // outdated records always carry a constraint
                let Some(declared) = record.declared.as_ref() else {
                    continue;
                };
                let Some(recommended) = record.recommended() else {
                    continue;
                };
                let change = ChangeKind::between(&declared.version, &record.latest);
                let _ = writeln!(
                    out,
                    "  {:<width$}  {} {} {}  {}",
                    record.name,
                    declared,
                    "→".dimmed(),
                    recommended,
                    change.colored_label(),
                    width = name_width,
                );
            }
        }

        if verbose {
            for record in &self.records {
                if record.is_outdated() {
                    continue;
                }
                let line = match &record.declared {
                    Some(declared) => {
                        format!("  {}  {} (latest {})", record.name, declared, record.latest)
                    }
                    None => format!("  {}  untracked (latest {})", record.name, record.latest),
                };
                let _ = writeln!(out, "{}", line.dimmed());
            }
        }

        out
    }
}
