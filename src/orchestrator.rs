//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Phase sequencing: init → fetch → resolve → report → confirm → rewrite
//! - Concurrent fetch of the installed list and the declared manifest
//! - Working copy teardown on every exit path
//! - Error handling with partial continuation for per-entry problems

use crate::cli::CliArgs;
use crate::domain::UpgradeDecision;
use crate::error::{AppError, ManifestError};
use crate::manifest::{self, ManifestDocument, MANIFEST_FILE};
use crate::progress::Progress;
use crate::prompt::{AssumeYes, Prompter, Question, TerminalPrompter};
use crate::report::Report;
use crate::resolver;
use crate::source::{BowerCli, PackageClient};
use crate::workdir::WorkingCopy;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// Phases of a single run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Fetching,
    Resolved,
    Reported,
    Confirming,
    Rewriting,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::Fetching => "fetching",
            Phase::Resolved => "resolved",
            Phase::Reported => "reported",
            Phase::Confirming => "confirming",
            Phase::Rewriting => "rewriting",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Package data source
    client: Box<dyn PackageClient>,
    /// Confirmation collaborator
    prompter: Box<dyn Prompter>,
}

/// What a completed run did
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Outdated dependencies found
    pub outdated: usize,
    /// Upgrades the user accepted
    pub accepted: usize,
    /// Manifest lines rewritten in memory
    pub lines_changed: usize,
    /// Whether the manifest was written back to disk
    pub saved: bool,
    /// Path of the backup file, when one was written
    pub backup_path: Option<PathBuf>,
    /// Recoverable problems reported along the way
    pub warnings: Vec<String>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Self {
        let client = Box::new(BowerCli::new(&args.bower_bin));
        let prompter: Box<dyn Prompter> = if args.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalPrompter)
        };
        Self {
            args,
            client,
            prompter,
        }
    }

    /// Create an orchestrator with custom collaborators (for testing)
    pub fn with_collaborators(
        args: CliArgs,
        client: Box<dyn PackageClient>,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            args,
            client,
            prompter,
        }
    }

    /// Run the update workflow.
    ///
    /// The working copy is torn down whichever way the phases end; an error
    /// from the phases wins over an error from teardown.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        let mut progress = Progress::new(!self.args.quiet);
        let mut summary = RunSummary::default();

        self.trace(Phase::Init);
        let workdir = WorkingCopy::create(&self.args.path)?;

        let outcome = self
            .run_phases(&workdir, &mut progress, &mut summary)
            .await;
        progress.finish_and_clear();

        match (outcome, workdir.teardown()) {
            (Err(e), _) => {
                self.trace(Phase::Failed);
                Err(e)
            }
            (Ok(()), Err(e)) => Err(e.into()),
            (Ok(()), Ok(())) => Ok(summary),
        }
    }

    async fn run_phases(
        &self,
        workdir: &WorkingCopy,
        progress: &mut Progress,
        summary: &mut RunSummary,
    ) -> Result<(), AppError> {
        // FETCHING: sync the working copy, then read both data sources.
        // The join is conjunctive; the first failure wins and the other
        // branch is dropped.
        self.trace(Phase::Fetching);
        progress.spinner("Syncing packages...");
        self.client.install(workdir.path()).await?;
        progress.set_message("Fetching dependency data...");
        let manifest_path = workdir.manifest_path();
        let (installed, manifest) = tokio::try_join!(
            async {
                self.client
                    .list_installed(workdir.path())
                    .await
                    .map_err(AppError::from)
            },
            async { manifest::load(&manifest_path).await.map_err(AppError::from) },
        )?;
        progress.finish_and_clear();

        // RESOLVED: per-entry problems are reported and skipped, never fatal
        self.trace(Phase::Resolved);
        let declared = manifest.declared();
        let resolution = resolver::resolve(&declared, &installed);
        for issue in &resolution.issues {
            summary.warnings.push(issue.to_string());
            if !self.args.quiet {
                eprintln!("{} {}", "warning:".yellow().bold(), issue);
            }
        }

        // REPORTED
        self.trace(Phase::Reported);
        let report = Report::from_records(resolution.records);
        summary.outdated = report.outdated_count();
        if !self.args.quiet {
            print!("{}", report.render(self.args.verbose));
        }

        if report.outdated_count() == 0 || self.args.dry_run {
            self.trace(Phase::Done);
            return Ok(());
        }

        // CONFIRMING: one question per outdated dependency, report order
        self.trace(Phase::Confirming);
        let outdated = report.outdated();
        let questions: Vec<Question> = outdated
            .iter()
            .filter_map(|record| {
                let declared = record.declared.as_ref()?;
                let recommended = record.recommended()?;
                Some(Question::new(
                    &record.name,
                    format!(
                        "Update {} from {} to {}?",
                        record.name, declared, recommended
                    ),
                    true,
                ))
            })
            .collect();
        let answers = self.prompter.confirm_batch(&questions);

        let decisions: Vec<UpgradeDecision> = outdated
            .into_iter()
            .map(|record| UpgradeDecision {
                record: record.clone(),
                accepted: answers.get(&record.name).copied().unwrap_or(false),
            })
            .collect();
        summary.accepted = decisions.iter().filter(|d| d.accepted).count();

        if summary.accepted == 0 {
            if !self.args.quiet {
                println!("No updates accepted.");
            }
            self.trace(Phase::Done);
            return Ok(());
        }

        // REWRITING: buffered in memory, written once after every
        // confirmation is collected. Failures here abort this phase only;
        // the working copy still comes down and the run reaches done.
        self.trace(Phase::Rewriting);
        let manifest_file = self.args.path.join(MANIFEST_FILE);
        let mut document = match ManifestDocument::read(&manifest_file) {
            Ok(document) => document,
            Err(e) => {
                self.phase_failure(summary, &e);
                self.trace(Phase::Done);
                return Ok(());
            }
        };

        summary.lines_changed = document.apply_upgrades(&decisions);
        if summary.lines_changed == 0 {
            if !self.args.quiet {
                println!("No changes to apply.");
            }
            self.trace(Phase::Done);
            return Ok(());
        }

        let save_questions = [
            Question::new(
                "save",
                format!("Write the updated manifest to {}?", manifest_file.display()),
                true,
            ),
            Question::new("backup", "Back up the old manifest first?", true),
        ];
        let answers = self.prompter.confirm_batch(&save_questions);

        if answers.get("save").copied().unwrap_or(false) {
            if answers.get("backup").copied().unwrap_or(false) {
                match document.backup(&manifest_file) {
                    Ok(backup_path) => {
                        if !self.args.quiet {
                            println!("Old manifest backed up to {}", backup_path.display());
                        }
                        summary.backup_path = Some(backup_path);
                    }
                    Err(e) => {
                        self.phase_failure(summary, &e);
                        self.trace(Phase::Done);
                        return Ok(());
                    }
                }
            }
            match document.save(&manifest_file) {
                Ok(()) => {
                    summary.saved = true;
                    if !self.args.quiet {
                        println!(
                            "Updated {} ({} lines changed)",
                            manifest_file.display(),
                            summary.lines_changed
                        );
                    }
                }
                Err(e) => self.phase_failure(summary, &e),
            }
        } else if !self.args.quiet {
            println!("Manifest left untouched.");
        }

        self.trace(Phase::Done);
        Ok(())
    }

    fn phase_failure(&self, summary: &mut RunSummary, error: &ManifestError) {
        summary.warnings.push(error.to_string());
        eprintln!("{} {}", "error:".red().bold(), error);
    }

    fn trace(&self, phase: Phase) {
        if self.args.verbose {
            eprintln!("phase: {}", phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Init.to_string(), "init");
        assert_eq!(Phase::Fetching.to_string(), "fetching");
        assert_eq!(Phase::Confirming.to_string(), "confirming");
        assert_eq!(Phase::Done.to_string(), "done");
        assert_eq!(Phase::Failed.to_string(), "failed");
    }

    #[test]
    fn test_run_summary_default() {
        let summary = RunSummary::default();
        assert_eq!(summary.outdated, 0);
        assert_eq!(summary.accepted, 0);
        assert_eq!(summary.lines_changed, 0);
        assert!(!summary.saved);
        assert!(summary.backup_path.is_none());
        assert!(summary.warnings.is_empty());
    }
}
