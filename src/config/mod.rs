use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub session: SessionConfig,
    pub naming: NamingConfig,
    pub bindings: BindingConfig,
    pub engine: EngineConfig,
    #[serde(default = "defaults::default_retry_config")]
    pub retry: RetryConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SessionConfig {
    /// Base directory for working copies, relative to the home directory
    /// unless absolute.
    pub projects_dir: String,
    /// Interactive command run inside the container.
    pub command: Vec<String>,
    /// `KEY=VALUE` pairs passed to the container.
    pub environment: Vec<String>,
    /// Container-side mount point for the project source.
    pub workdir: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NamingConfig {
    /// `{repo}` is replaced with the lower-cased repository name.
    pub repo_url_template: String,
    pub image_template: String,
    pub container_prefix: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BindingConfig {
    /// `host:container[:mode]` entries mounted into every session.
    pub defaults: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EngineConfig {
    pub binary: String,
    pub git_binary: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error)
    }
}

impl Config {
    pub fn load_or_create() -> Result<Self> {
        ConfigManager::load_or_create()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Base directory under which `<project-dir>/<repo-name>` working copies live.
    pub fn projects_root(&self, home: &Path) -> PathBuf {
        let dir = Path::new(&self.session.projects_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            home.join(dir)
        }
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.retry.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.retry.max_backoff_ms)
    }
}

impl NamingConfig {
    pub fn repo_url_for(&self, repo_name: &str) -> String {
        render_template(&self.repo_url_template, repo_name)
    }

    pub fn image_for(&self, repo_name: &str) -> String {
        render_template(&self.image_template, repo_name)
    }

    pub fn container_name_for(&self, repo_name: &str) -> String {
        format!(
            "{}-{}",
            self.container_prefix,
            crate::utils::normalize_repo_name(repo_name)
        )
    }
}

fn render_template(template: &str, repo_name: &str) -> String {
    template.replace("{repo}", &crate::utils::normalize_repo_name(repo_name))
}
