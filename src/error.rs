//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SourceError: package data source (bower CLI) failures, fatal to a run
//! - ManifestError: bower.json reading, parsing and rewriting
//! - MalformedVersion: unparseable version strings, recoverable per entry
//! - WorkdirError: working copy setup/teardown failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package data source related errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Working copy related errors
    #[error(transparent)]
    Workdir(#[from] WorkdirError),
}

/// Errors from the external package data source. Any of these aborts the
/// run: without the installed list there is nothing to compare against.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The data source could not be reached at all
    #[error("{source_name} is unavailable: {message}")]
    Unavailable {
        source_name: String,
        message: String,
    },

    /// The data source command ran but reported failure
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The data source produced output we cannot decode
    #[error("could not decode {source_name} output: {message}")]
    InvalidOutput {
        source_name: String,
        message: String,
    },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse manifest JSON
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to write manifest file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A version string that carries no `major.minor.patch` triple.
///
/// Recoverable: the entry is skipped and reported, the batch continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed version string '{raw}'")]
pub struct MalformedVersion {
    pub raw: String,
}

/// Errors related to the disposable working copy
#[derive(Error, Debug)]
pub enum WorkdirError {
    /// Failed to create or populate the working copy
    #[error("failed to prepare working copy of {path}: {source}")]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove the working copy
    #[error("failed to remove working copy {path}: {source}")]
    Teardown {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Creates a new Unavailable error
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::Unavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(
        command: impl Into<String>,
        status: &std::process::ExitStatus,
        stderr: impl Into<String>,
    ) -> Self {
        SourceError::CommandFailed {
            command: command.into(),
            status: status.to_string(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new InvalidOutput error
    pub fn invalid_output(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::InvalidOutput {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a Read error, mapping a missing file to NotFound
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestError::NotFound { path }
        } else {
            ManifestError::Read { path, source }
        }
    }

    /// Creates a new Parse error
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Write error
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Write {
            path: path.into(),
            source,
        }
    }
}

impl MalformedVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl WorkdirError {
    /// Creates a new Setup error
    pub fn setup(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkdirError::Setup {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Teardown error
    pub fn teardown(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkdirError::Teardown {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_unavailable() {
        let err = SourceError::unavailable("bower", "spawn failed");
        let msg = format!("{}", err);
        assert!(msg.contains("bower is unavailable"));
        assert!(msg.contains("spawn failed"));
    }

    #[test]
    fn test_source_error_invalid_output() {
        let err = SourceError::invalid_output("bower list", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("could not decode bower list output"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_manifest_error_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ManifestError::read_error("/project/bower.json", io);
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("bower.json"));
    }

    #[test]
    fn test_manifest_error_read_other_kinds() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = ManifestError::read_error("/project/bower.json", io);
        let msg = format!("{}", err);
        assert!(msg.contains("failed to read manifest file"));
    }

    #[test]
    fn test_manifest_error_parse() {
        let err = ManifestError::parse_error("/project/bower.json", "unexpected token");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn test_malformed_version_display() {
        let err = MalformedVersion::new("not-a-version");
        let msg = format!("{}", err);
        assert!(msg.contains("malformed version string"));
        assert!(msg.contains("not-a-version"));
    }

    #[test]
    fn test_workdir_error_setup() {
        let io = std::io::Error::other("disk full");
        let err = WorkdirError::setup("/project", io);
        let msg = format!("{}", err);
        assert!(msg.contains("failed to prepare working copy"));
    }

    #[test]
    fn test_app_error_from_source_error() {
        let source_err = SourceError::unavailable("bower", "boom");
        let app_err: AppError = source_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("bower is unavailable"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let manifest_err = ManifestError::parse_error("/p/bower.json", "bad");
        let app_err: AppError = manifest_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("failed to parse"));
    }

    #[test]
    fn test_app_error_from_workdir_error() {
        let workdir_err = WorkdirError::teardown("/tmp/x", std::io::Error::other("busy"));
        let app_err: AppError = workdir_err.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("failed to remove working copy"));
    }
}
