//! Resolves the repository URL, image, container name and source path for a
//! project key. A stored record always wins; otherwise the values are derived
//! from the naming templates.

use crate::config::NamingConfig;
use crate::core::registry::{ProjectKey, ProjectRecord, ProjectStore};
use crate::utils::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Stored,
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub repo_url: String,
    pub image: String,
    pub container_name: String,
    /// Working copy on the host, `<projects root>/<project dir>/<repo name>`.
    pub source_path: PathBuf,
    /// Project-specific bindings from the stored record.
    pub extra_bindings: Vec<String>,
    pub source: IdentitySource,
}

pub struct IdentityResolver<'a> {
    store: &'a dyn ProjectStore,
    naming: &'a NamingConfig,
    projects_root: PathBuf,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(store: &'a dyn ProjectStore, naming: &'a NamingConfig, projects_root: &Path) -> Self {
        Self {
            store,
            naming,
            projects_root: projects_root.to_path_buf(),
        }
    }

    /// The repository name keeps its case here; only derived names are lower-cased.
    pub fn source_path(&self, key: &ProjectKey) -> PathBuf {
        self.projects_root
            .join(key.project_dir())
            .join(key.repo_name())
    }

    pub fn resolve(&self, key: &ProjectKey) -> Result<ResolvedIdentity> {
        let source_path = self.source_path(key);

        match self.store.get(key)? {
            Some(record) => {
                tracing::debug!(project = %key, "using stored project record");
                Ok(from_record(record, source_path))
            }
            None => {
                tracing::debug!(project = %key, "no project record, deriving defaults");
                Ok(self.derive(key, source_path))
            }
        }
    }

    fn derive(&self, key: &ProjectKey, source_path: PathBuf) -> ResolvedIdentity {
        let repo = key.repo_name();
        ResolvedIdentity {
            repo_url: self.naming.repo_url_for(repo),
            image: self.naming.image_for(repo),
            container_name: self.naming.container_name_for(repo),
            source_path,
            extra_bindings: Vec::new(),
            source: IdentitySource::Derived,
        }
    }
}

fn from_record(record: ProjectRecord, source_path: PathBuf) -> ResolvedIdentity {
    ResolvedIdentity {
        repo_url: record.repo_url,
        image: record.docker_image,
        container_name: record.container_name,
        source_path,
        extra_bindings: record.volume_bindings,
        source: IdentitySource::Stored,
    }
}
