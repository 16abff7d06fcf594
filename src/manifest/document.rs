//! Raw-text manifest rewriting
//!
//! The rewrite path works on raw lines, not parsed JSON: an accepted
//! upgrade replaces exactly one version token on the dependency's own
//! declaration line, and every other byte of the file (indentation, key
//! order, line endings) survives untouched.

use crate::domain::UpgradeDecision;
use crate::error::ManifestError;
use chrono::Utc;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// First operator-prefix + numeric triple (with optional metadata) on a line
static VERSION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\^~]?\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]*)?").unwrap());

/// The manifest as an ordered sequence of raw text lines.
///
/// Owned exclusively by one update pass; writing back to disk is a
/// separate, explicit step.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    /// Raw lines with their original terminators
    lines: Vec<String>,
    /// The content exactly as read, kept for backups
    original: String,
}

impl ManifestDocument {
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_string).collect(),
            original: content.to_string(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Ok(Self::from_content(&content))
    }

    /// Current content of the document
    pub fn content(&self) -> String {
        self.lines.concat()
    }

    /// Rewrites the declaration lines of every accepted decision.
    ///
    /// A line is touched only when its key token is the dependency's quoted
    /// name, so a name appearing in a value, a comment, or as a substring
    /// of a longer name never matches. Within a matching line, the first
    /// version token is replaced with the recommended constraint.
    ///
    /// Returns the number of lines changed; zero means there is nothing to
    /// save and callers must not write the document.
    pub fn apply_upgrades(&mut self, decisions: &[UpgradeDecision]) -> usize {
        let mut changed = 0;

        for decision in decisions.iter().filter(|d| d.accepted) {
            let Some(recommended) = decision.record.recommended() else {
                continue;
            };
            let replacement = recommended.to_string();
            let Ok(key_re) = declaration_pattern(&decision.record.name) else {
                continue;
            };

            for line in &mut self.lines {
                if !key_re.is_match(line) {
                    continue;
                }
                let rewritten = VERSION_TOKEN_RE.replace(line, NoExpand(replacement.as_str()));
                if rewritten.as_ref() != line.as_str() {
                    *line = rewritten.into_owned();
                    changed += 1;
                }
            }
        }

        changed
    }

    /// Writes the current content to `path`. The content is buffered in
    /// full beforehand, so a declined or failed run never produces a
    /// half-updated file.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        fs::write(path, self.content()).map_err(|e| ManifestError::write_error(path, e))
    }

    /// Writes the content as read at startup to a timestamped sibling file
    /// and returns its path.
    pub fn backup(&self, path: &Path) -> Result<PathBuf, ManifestError> {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("{}.{}.bak", name, stamp),
            None => format!("manifest.{}.bak", stamp),
        };
        let backup_path = path.with_file_name(file_name);
        fs::write(&backup_path, &self.original)
            .map_err(|e| ManifestError::write_error(&backup_path, e))?;
        Ok(backup_path)
    }
}

/// Matches lines where the quoted name sits in key position
fn declaration_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r#"^\s*"{}"\s*:"#, regex::escape(name)))
}
