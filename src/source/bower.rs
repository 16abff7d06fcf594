//! bower CLI adapter
//!
//! Talks to the registry and the lockfile through the `bower` executable:
//! `bower install --force-latest` for sync, `bower list --json` for the
//! installed set. stdout is decoded with serde; anything the process
//! reports as failure becomes a `SourceError`.

use super::{PackageClient, RemotePackage};
use crate::error::SourceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Shape of `bower list --json` output; only the pieces we read
#[derive(Debug, Deserialize)]
struct ListOutput {
    #[serde(default)]
    dependencies: HashMap<String, RemotePackage>,
}

/// Package client backed by the bower executable
pub struct BowerCli {
    bin: PathBuf,
}

impl BowerCli {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    async fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<u8>, SourceError> {
        let output = Command::new(&self.bin)
            .args(args)
            .current_dir(dir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                SourceError::unavailable(
                    "bower",
                    format!("failed to run {}: {}", self.bin.display(), e),
                )
            })?;

        if !output.status.success() {
            return Err(SourceError::command_failed(
                format!("{} {}", self.bin.display(), args.join(" ")),
                &output.status,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl PackageClient for BowerCli {
    async fn install(&self, project_dir: &Path) -> Result<(), SourceError> {
        self.run(
            project_dir,
            &["install", "--force-latest", "--config.interactive=false"],
        )
        .await
        .map(|_| ())
    }

    async fn list_installed(
        &self,
        project_dir: &Path,
    ) -> Result<HashMap<String, RemotePackage>, SourceError> {
        let stdout = self.run(project_dir, &["list", "--json"]).await?;
        let parsed: ListOutput = serde_json::from_slice(&stdout)
            .map_err(|e| SourceError::invalid_output("bower list", e.to_string()))?;
        Ok(parsed.dependencies)
    }
}
