//! Runs the interactive editor inside a running session container.

use super::{ContainerEngine, ContainerSession};
use crate::utils::{DevEnvError, Result};

pub struct SessionAttachment<'a> {
    engine: &'a dyn ContainerEngine,
    command: &'a [String],
}

impl<'a> SessionAttachment<'a> {
    pub fn new(engine: &'a dyn ContainerEngine, command: &'a [String]) -> Self {
        Self { engine, command }
    }

    /// Blocks until the interactive process exits. Any non-zero exit or
    /// transport failure is an [`DevEnvError::Attach`].
    pub fn attach(&self, session: &mut ContainerSession) -> Result<()> {
        println!(
            "🔗 Attaching to container {} with {}...",
            session.container_name,
            self.command.join(" ")
        );
        session.mark_attached();

        let exit = self
            .engine
            .exec_interactive(&session.container_id, self.command)
            .map_err(|e| DevEnvError::attach_error(&session.container_name, e.to_string()))?;

        match exit {
            Some(0) => {
                tracing::info!(container = %session.container_name, "session ended");
                Ok(())
            }
            Some(code) => Err(DevEnvError::attach_error(
                &session.container_name,
                format!("{} exited with status {}", self.command.join(" "), code),
            )),
            None => Err(DevEnvError::attach_error(
                &session.container_name,
                format!("{} was terminated by a signal", self.command.join(" ")),
            )),
        }
    }
}
