//! Container session state for one reconciliation attempt.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Absent,
    Created,
    Running,
    Attached,
    Removed,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerState::Absent => "absent",
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Attached => "attached",
            ContainerState::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// A container owned by the current invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSession {
    pub container_id: String,
    pub container_name: String,
    pub image: String,
    state: ContainerState,
}

impl ContainerSession {
    pub fn created(
        container_id: impl Into<String>,
        container_name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            container_name: container_name.into(),
            image: image.into(),
            state: ContainerState::Created,
        }
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn mark_running(&mut self) {
        debug_assert_eq!(self.state, ContainerState::Created);
        self.state = ContainerState::Running;
    }

    pub fn mark_attached(&mut self) {
        debug_assert_eq!(self.state, ContainerState::Running);
        self.state = ContainerState::Attached;
    }

    pub fn mark_removed(&mut self) {
        self.state = ContainerState::Removed;
    }

    pub fn is_removed(&self) -> bool {
        self.state == ContainerState::Removed
    }
}
