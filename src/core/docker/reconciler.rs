//! Brings a named container to a fresh running state.
//!
//! Absent -> (existing found? remove it) -> Create -> Start -> Running.
//! Running the reconciler twice with the same name always leaves exactly one
//! container behind.

use super::{ContainerEngine, ContainerSession, ContainerSpec, DockerResult};
use crate::core::retry::RetryPolicy;

pub struct ContainerReconciler<'a> {
    engine: &'a dyn ContainerEngine,
    retry: RetryPolicy,
}

impl<'a> ContainerReconciler<'a> {
    pub fn new(engine: &'a dyn ContainerEngine, retry: RetryPolicy) -> Self {
        Self { engine, retry }
    }

    pub fn reconcile(&self, spec: &ContainerSpec) -> DockerResult<ContainerSession> {
        println!("🐋 Pulling image {}...", spec.image);
        self.retry
            .run("image pull", || self.engine.pull_image(&spec.image))?;

        self.remove_existing(&spec.name)?;

        // A failed create gets no cleanup; a leftover is removed by the next
        // reconcile's `remove_existing`.
        println!("🏗️  Creating container {}...", spec.name);
        let container_id = self
            .retry
            .run("container create", || self.engine.create_container(spec))?;
        let mut session = ContainerSession::created(&container_id, &spec.name, &spec.image);

        println!("▶️  Starting container {}...", spec.name);
        if let Err(start_err) = self
            .retry
            .run("container start", || self.engine.start_container(&container_id))
        {
            // A created-but-never-started container would otherwise linger
            // under the session's name.
            if let Err(remove_err) = self.engine.remove_container(&container_id) {
                tracing::warn!(
                    container = %spec.name,
                    id = %container_id,
                    error = %remove_err,
                    "failed to remove container after start failure"
                );
            }
            return Err(start_err);
        }

        session.mark_running();
        tracing::info!(
            container = %spec.name,
            id = %container_id,
            image = %spec.image,
            "container started"
        );
        Ok(session)
    }

    /// Force-removes any container already using `name`, whatever its state.
    ///
    /// A failed inspect is treated as "nothing there"; create will surface any
    /// real conflict.
    fn remove_existing(&self, name: &str) -> DockerResult<()> {
        match self.engine.inspect_container(name) {
            Ok(Some(existing)) => {
                println!(
                    "♻️  Removing existing container {} ({})",
                    name, existing.status
                );
                self.engine.remove_container(&existing.id)?;
                tracing::info!(container = %name, id = %existing.id, "removed stale container");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(container = %name, error = %e, "inspect failed, assuming absent");
            }
        }
        Ok(())
    }
}
