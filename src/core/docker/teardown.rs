//! Guaranteed removal of a session container.
//!
//! The guard takes ownership of the container as soon as it is running.
//! [`TeardownGuard::release`] removes it and reports the outcome; if the
//! guard is dropped without being released (early return, panic) the
//! container is still removed.

use super::{ContainerEngine, ContainerSession};
use crate::utils::{DevEnvError, Result};

pub struct TeardownGuard<'a> {
    engine: &'a dyn ContainerEngine,
    session: ContainerSession,
    armed: bool,
}

impl<'a> TeardownGuard<'a> {
    pub fn new(engine: &'a dyn ContainerEngine, session: ContainerSession) -> Self {
        Self {
            engine,
            session,
            armed: true,
        }
    }

    pub fn session(&self) -> &ContainerSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ContainerSession {
        &mut self.session
    }

    /// Removes the container, returning the final session state.
    pub fn release(mut self) -> Result<ContainerSession> {
        self.armed = false;
        remove(self.engine, &mut self.session)?;
        Ok(self.session.clone())
    }
}

fn remove(engine: &dyn ContainerEngine, session: &mut ContainerSession) -> Result<()> {
    println!("🧹 Removing container {}...", session.container_name);
    match engine.remove_container(&session.container_id) {
        Ok(()) => {
            session.mark_removed();
            tracing::info!(
                container = %session.container_name,
                id = %session.container_id,
                "container removed"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                container = %session.container_name,
                id = %session.container_id,
                error = %e,
                "failed to remove container"
            );
            Err(DevEnvError::teardown_error(&session.container_name, e))
        }
    }
}

impl Drop for TeardownGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.armed = false;
            if let Err(e) = remove(self.engine, &mut self.session) {
                eprintln!("devenv: {}", e);
            }
        }
    }
}
