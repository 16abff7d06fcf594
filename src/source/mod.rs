//! External package data sources
//!
//! The package manager is seen as a data source with two operations: one
//! sync ("install") and one list/inspect. Failure is signalled distinctly
//! from an empty result.

mod bower;

pub use bower::BowerCli;

use crate::error::SourceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Installed package metadata as reported by the package manager
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePackage {
    /// Published versions, newest first
    #[serde(default)]
    pub versions: Vec<String>,
}

impl RemotePackage {
    pub fn with_versions(versions: impl IntoIterator<Item = String>) -> Self {
        Self {
            versions: versions.into_iter().collect(),
        }
    }

    /// Latest published version, if the registry reported any
    pub fn latest(&self) -> Option<&str> {
        self.versions.first().map(String::as_str)
    }
}

/// Trait for package data source clients
#[async_trait]
pub trait PackageClient: Send + Sync {
    /// Brings the installed set in line with the declared constraints.
    /// Fire-and-forget apart from success/failure.
    async fn install(&self, project_dir: &Path) -> Result<(), SourceError>;

    /// Installed packages keyed by name. An empty map is a valid result;
    /// errors mean the source itself was unreachable.
    async fn list_installed(
        &self,
        project_dir: &Path,
    ) -> Result<HashMap<String, RemotePackage>, SourceError>;
}
