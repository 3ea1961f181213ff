use super::{ProjectKey, ProjectRecord, ProjectStore};
use crate::utils::{DevEnvError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    users: BTreeMap<String, UserProjects>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserProjects {
    #[serde(default)]
    projects: BTreeMap<String, ProjectRepos>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectRepos {
    #[serde(default)]
    repos: BTreeMap<String, ProjectRecord>,
}

/// JSON-file registry scoped to one user's namespace.
pub struct FileProjectStore {
    path: PathBuf,
    user: String,
    document: RegistryDocument,
}

impl FileProjectStore {
    /// Loads the registry at `path`; a missing file is an empty registry.
    pub fn open(path: &Path, user: impl Into<String>) -> Result<Self> {
        let document = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                RegistryDocument::default()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    DevEnvError::config_error(format!(
                        "Failed to parse project registry {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            tracing::warn!(
                path = %path.display(),
                "no project registry found; a new one will be created upon adding projects"
            );
            RegistryDocument::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            user: user.into(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn lookup(&self, key: &ProjectKey) -> Option<&ProjectRecord> {
        self.document
            .users
            .get(&self.user)?
            .projects
            .get(key.project_dir())?
            .repos
            .get(key.repo_name())
    }
}

impl ProjectStore for FileProjectStore {
    fn exists(&self, key: &ProjectKey) -> Result<bool> {
        Ok(self.lookup(key).is_some())
    }

    fn get(&self, key: &ProjectKey) -> Result<Option<ProjectRecord>> {
        match self.lookup(key) {
            Some(record) => {
                record.validate(key)?;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &ProjectKey, record: ProjectRecord) -> Result<()> {
        let repos = &mut self
            .document
            .users
            .entry(self.user.clone())
            .or_default()
            .projects
            .entry(key.project_dir().to_string())
            .or_default()
            .repos;

        if repos.contains_key(key.repo_name()) {
            return Err(DevEnvError::duplicate_project(key));
        }

        repos.insert(key.repo_name().to_string(), record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<(ProjectKey, ProjectRecord)>> {
        let Some(user) = self.document.users.get(&self.user) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (project_dir, project) in &user.projects {
            for (repo_name, record) in &project.repos {
                records.push((
                    ProjectKey::new(project_dir.as_str(), repo_name.as_str())?,
                    record.clone(),
                ));
            }
        }
        Ok(records)
    }

    fn persist(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.document)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }
}
