//! Ensures a project's working copy exists on disk.

use crate::core::retry::RetryPolicy;
use crate::utils::{DevEnvError, Result};
use std::path::Path;
use std::process::Command;

/// Source-control capability consumed by the materializer.
pub trait SourceTransport {
    /// Clones `url` into `destination`, streaming progress to the terminal.
    fn clone_repo(&self, url: &str, destination: &Path) -> std::result::Result<(), String>;
}

/// Clones with the `git` command line client.
pub struct GitCli {
    binary: String,
}

impl GitCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl SourceTransport for GitCli {
    fn clone_repo(&self, url: &str, destination: &Path) -> std::result::Result<(), String> {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }

        let status = Command::new(&self.binary)
            .arg("clone")
            .arg("--progress")
            .arg(url)
            .arg(destination)
            .status()
            .map_err(|e| format!("failed to run {}: {}", self.binary, e))?;

        if !status.success() {
            return Err(match status.code() {
                Some(code) => format!("git clone exited with status {}", code),
                None => "git clone terminated by signal".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeOutcome {
    Cloned,
    AlreadyPresent,
}

pub struct SourceMaterializer<'a> {
    transport: &'a dyn SourceTransport,
    retry: RetryPolicy,
}

impl<'a> SourceMaterializer<'a> {
    pub fn new(transport: &'a dyn SourceTransport, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Clones `url` into `destination` unless something already exists there.
    ///
    /// Existing content is trusted as-is. A failed clone is not cleaned up.
    pub fn ensure(&self, url: &str, destination: &Path) -> Result<MaterializeOutcome> {
        if destination.exists() {
            println!(
                "📁 Project directory {} already exists. Skipping clone.",
                destination.display()
            );
            return Ok(MaterializeOutcome::AlreadyPresent);
        }

        println!("📥 Cloning {} into {}", url, destination.display());
        tracing::info!(url, destination = %destination.display(), "cloning repository");

        self.retry
            .run("clone", || self.transport.clone_repo(url, destination))
            .map_err(|message| {
                tracing::error!(url, %message, "clone failed");
                DevEnvError::source_error(url, message)
            })?;

        Ok(MaterializeOutcome::Cloned)
    }
}
