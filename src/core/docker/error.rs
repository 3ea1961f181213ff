//! Docker-specific error types

use std::fmt;
use thiserror::Error;

/// Engine interaction a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerPhase {
    Pull,
    Inspect,
    Create,
    Start,
    Exec,
    Remove,
}

impl fmt::Display for ContainerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerPhase::Pull => "pull",
            ContainerPhase::Inspect => "inspect",
            ContainerPhase::Create => "create",
            ContainerPhase::Start => "start",
            ContainerPhase::Exec => "exec",
            ContainerPhase::Remove => "remove",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum DockerError {
    #[error("Docker daemon not available during {phase}: {message}")]
    DaemonNotAvailable {
        phase: ContainerPhase,
        message: String,
    },

    #[error("Failed to pull image {image}: {message}")]
    ImagePullFailed { image: String, message: String },

    #[error("Failed to create container {name}: {message}")]
    ContainerCreationFailed { name: String, message: String },

    #[error("Failed to start container {id}: {message}")]
    ContainerStartFailed { id: String, message: String },

    #[error("Failed to remove container {id}: {message}")]
    ContainerRemovalFailed { id: String, message: String },

    #[error("{phase} failed for {target}: {message}")]
    PhaseFailed {
        phase: ContainerPhase,
        target: String,
        message: String,
    },
}

impl DockerError {
    pub fn phase_failed(
        phase: ContainerPhase,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PhaseFailed {
            phase,
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn daemon_unavailable(phase: ContainerPhase, message: impl Into<String>) -> Self {
        Self::DaemonNotAvailable {
            phase,
            message: message.into(),
        }
    }

    pub fn phase(&self) -> ContainerPhase {
        match self {
            DockerError::DaemonNotAvailable { phase, .. } => *phase,
            DockerError::ImagePullFailed { .. } => ContainerPhase::Pull,
            DockerError::ContainerCreationFailed { .. } => ContainerPhase::Create,
            DockerError::ContainerStartFailed { .. } => ContainerPhase::Start,
            DockerError::ContainerRemovalFailed { .. } => ContainerPhase::Remove,
            DockerError::PhaseFailed { phase, .. } => *phase,
        }
    }
}

pub type DockerResult<T> = Result<T, DockerError>;
