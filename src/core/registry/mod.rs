//! Persisted project records, keyed by (project directory, repository name).

use crate::core::bindings::Binding;
use crate::utils::{validate_name, DevEnvError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod file;
pub mod memory;

pub use file::FileProjectStore;
pub use memory::MemoryProjectStore;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey {
    project_dir: String,
    repo_name: String,
}

impl ProjectKey {
    pub fn new(project_dir: impl Into<String>, repo_name: impl Into<String>) -> Result<Self> {
        let project_dir = project_dir.into();
        let repo_name = repo_name.into();
        validate_name("Project directory", &project_dir)?;
        validate_name("Repository name", &repo_name)?;
        Ok(Self {
            project_dir,
            repo_name,
        })
    }

    pub fn project_dir(&self) -> &str {
        &self.project_dir
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Dotted location of the record inside the registry document.
    pub fn record_path(&self, user: &str) -> String {
        format!(
            "users.{}.projects.{}.repos.{}",
            user, self.project_dir, self.repo_name
        )
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_dir, self.repo_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub repo_url: String,
    pub docker_image: String,
    pub container_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_bindings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    pub fn new(
        repo_url: impl Into<String>,
        docker_image: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            docker_image: docker_image.into(),
            container_name: container_name.into(),
            volume_bindings: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<String>) -> Self {
        self.volume_bindings = bindings;
        self
    }

    pub fn validate(&self, key: &ProjectKey) -> Result<()> {
        if self.repo_url.trim().is_empty() {
            return Err(DevEnvError::invalid_record(key, "repo_url is empty"));
        }
        if self.docker_image.trim().is_empty() {
            return Err(DevEnvError::invalid_record(key, "docker_image is empty"));
        }
        if self.container_name.trim().is_empty() {
            return Err(DevEnvError::invalid_record(key, "container_name is empty"));
        }
        for entry in &self.volume_bindings {
            Binding::parse(entry)
                .map_err(|e| DevEnvError::invalid_record(key, e.to_string()))?;
        }
        Ok(())
    }
}

/// Keyed store of [`ProjectRecord`]s.
///
/// Records are immutable once written: `set` rejects a key that already
/// exists, and nothing reaches disk until `persist`.
pub trait ProjectStore {
    fn exists(&self, key: &ProjectKey) -> Result<bool>;

    fn get(&self, key: &ProjectKey) -> Result<Option<ProjectRecord>>;

    fn set(&mut self, key: &ProjectKey, record: ProjectRecord) -> Result<()>;

    fn list(&self) -> Result<Vec<(ProjectKey, ProjectRecord)>>;

    fn persist(&mut self) -> Result<()>;
}

/// Registers a new project, failing if the key is already taken.
pub fn add_project(
    store: &mut dyn ProjectStore,
    key: &ProjectKey,
    record: ProjectRecord,
) -> Result<()> {
    if store.exists(key)? {
        return Err(DevEnvError::duplicate_project(key));
    }
    record.validate(key)?;
    store.set(key, record)?;
    store.persist()?;
    tracing::info!(project = %key, "registered project");
    Ok(())
}
