use super::{BindingConfig, Config, EngineConfig, NamingConfig, RetryConfig, SessionConfig};
use std::path::PathBuf;

pub fn default_config() -> Config {
    Config {
        session: default_session_config(),
        naming: default_naming_config(),
        bindings: default_binding_config(),
        engine: default_engine_config(),
        retry: default_retry_config(),
    }
}

pub fn default_session_config() -> SessionConfig {
    SessionConfig {
        projects_dir: "Projects".to_string(),
        command: vec!["nvim".to_string()],
        environment: vec!["HOME=/home/cdaprod".to_string()],
        workdir: "/usr/src/app".to_string(),
    }
}

pub fn default_naming_config() -> NamingConfig {
    NamingConfig {
        repo_url_template: "https://github.com/Cdaprod/{repo}.git".to_string(),
        image_template: "cdaprod/{repo}:latest".to_string(),
        container_prefix: "nvim".to_string(),
    }
}

pub fn default_binding_config() -> BindingConfig {
    BindingConfig {
        defaults: vec![
            "~/.config/nvim:/root/.config/nvim".to_string(),
            "~/.vim:/root/.vim".to_string(),
            "~/.vimrc:/root/.vimrc".to_string(),
        ],
    }
}

pub fn default_engine_config() -> EngineConfig {
    EngineConfig {
        binary: "docker".to_string(),
        git_binary: "git".to_string(),
    }
}

pub fn default_retry_config() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_backoff_ms: 500,
        max_backoff_ms: 5000,
    }
}

pub fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "devenv") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("devenv")
    }
}

pub fn get_config_file_path() -> PathBuf {
    if let Ok(config_path) = std::env::var("DEVENV_CONFIG_PATH") {
        return PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}

pub fn get_projects_file_path() -> PathBuf {
    if let Ok(projects_path) = std::env::var("DEVENV_PROJECTS_PATH") {
        return PathBuf::from(projects_path);
    }

    get_default_config_dir().join("projects.json")
}
