use super::{
    BindingConfig, Config, ConfigError, EngineConfig, NamingConfig, Result, RetryConfig,
    SessionConfig,
};
use crate::core::bindings::Binding;

pub fn validate_config(config: &Config) -> Result<()> {
    validate_session_config(&config.session)?;
    validate_naming_config(&config.naming)?;
    validate_binding_config(&config.bindings)?;
    validate_engine_config(&config.engine)?;
    validate_retry_config(&config.retry)?;
    Ok(())
}

pub fn validate_session_config(session: &SessionConfig) -> Result<()> {
    if session.projects_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Projects directory cannot be empty".to_string(),
        ));
    }

    if session.command.is_empty() || session.command[0].trim().is_empty() {
        return Err(ConfigError::Validation(
            "Session command cannot be empty".to_string(),
        ));
    }

    for entry in &session.environment {
        match entry.split_once('=') {
            Some((key, _)) if !key.is_empty() => {}
            _ => {
                return Err(ConfigError::Validation(format!(
                    "Environment entry '{}' must be in KEY=VALUE form",
                    entry
                )))
            }
        }
    }

    if !session.workdir.starts_with('/') {
        return Err(ConfigError::Validation(
            "Container workdir must be an absolute path".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_naming_config(naming: &NamingConfig) -> Result<()> {
    if !naming.repo_url_template.contains("{repo}") {
        return Err(ConfigError::Validation(
            "Repository URL template must contain {repo}".to_string(),
        ));
    }

    if !naming.image_template.contains("{repo}") {
        return Err(ConfigError::Validation(
            "Image template must contain {repo}".to_string(),
        ));
    }

    if naming.container_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Container prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_binding_config(bindings: &BindingConfig) -> Result<()> {
    for entry in &bindings.defaults {
        Binding::parse(entry).map_err(|e| {
            ConfigError::Validation(format!("Invalid default binding '{}': {}", entry, e))
        })?;
    }
    Ok(())
}

pub fn validate_engine_config(engine: &EngineConfig) -> Result<()> {
    if engine.binary.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Container engine binary cannot be empty".to_string(),
        ));
    }

    if engine.git_binary.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Git binary cannot be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_retry_config(retry: &RetryConfig) -> Result<()> {
    if retry.max_attempts == 0 {
        return Err(ConfigError::Validation(
            "Retry attempts must be at least 1".to_string(),
        ));
    }

    if retry.initial_backoff_ms > retry.max_backoff_ms {
        return Err(ConfigError::Validation(
            "Initial backoff cannot exceed maximum backoff".to_string(),
        ));
    }

    Ok(())
}
