use crate::core::docker::DockerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevEnvError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Repository '{key}' is already registered")]
    DuplicateProject { key: String },

    #[error("Invalid project record for '{key}': {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("Failed to materialize source from {url}: {message}")]
    Source { url: String, message: String },

    #[error("Container error for '{container}': {source}")]
    Container {
        container: String,
        #[source]
        source: DockerError,
    },

    #[error("Session in container '{container}' failed: {message}")]
    Attach { container: String, message: String },

    #[error("Failed to remove container '{container}': {source}")]
    Teardown {
        container: String,
        #[source]
        source: DockerError,
    },

    #[error("{attach}; additionally: {teardown}")]
    SessionFailed {
        attach: Box<DevEnvError>,
        teardown: Box<DevEnvError>,
    },

    #[error("Interrupted during {phase}")]
    Interrupted { phase: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DevEnvError>;

impl DevEnvError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn duplicate_project(key: impl ToString) -> Self {
        Self::DuplicateProject {
            key: key.to_string(),
        }
    }

    pub fn invalid_record(key: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn source_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn container_error(container: impl Into<String>, source: DockerError) -> Self {
        Self::Container {
            container: container.into(),
            source,
        }
    }

    pub fn attach_error(container: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Attach {
            container: container.into(),
            message: message.into(),
        }
    }

    pub fn teardown_error(container: impl Into<String>, source: DockerError) -> Self {
        Self::Teardown {
            container: container.into(),
            source,
        }
    }

    pub fn interrupted(phase: impl Into<String>) -> Self {
        Self::Interrupted {
            phase: phase.into(),
        }
    }

    /// Joins the attach and teardown outcomes of a session, keeping the worst.
    pub fn join_session(
        attach: std::result::Result<(), DevEnvError>,
        teardown: std::result::Result<(), DevEnvError>,
    ) -> Result<()> {
        match (attach, teardown) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(attach), Err(teardown)) => Err(Self::SessionFailed {
                attach: Box::new(attach),
                teardown: Box::new(teardown),
            }),
        }
    }

    pub fn is_teardown_failure(&self) -> bool {
        match self {
            Self::Teardown { .. } => true,
            Self::SessionFailed { teardown, .. } => teardown.is_teardown_failure(),
            _ => false,
        }
    }
}

impl From<&str> for DevEnvError {
    fn from(message: &str) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }
}

impl From<String> for DevEnvError {
    fn from(message: String) -> Self {
        Self::Config { message }
    }
}
