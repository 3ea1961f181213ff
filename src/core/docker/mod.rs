//! Container engine integration for devenv sessions
//!
//! The engine is consumed through [`ContainerEngine`]; [`DockerCli`] drives
//! the `docker` command line client. On top of it sit the reconciler (fresh
//! running container per session), the attachment (interactive editor) and
//! the teardown guard (guaranteed removal).

pub mod attach;
pub mod error;
pub mod reconciler;
pub mod service;
pub mod session;
pub mod teardown;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use attach::SessionAttachment;
pub use error::{ContainerPhase, DockerError, DockerResult};
pub use reconciler::ContainerReconciler;
pub use service::DockerCli;
pub use session::{ContainerSession, ContainerState};
pub use teardown::TeardownGuard;

/// Everything needed to create a session container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    /// `KEY=VALUE` entries.
    pub environment: Vec<String>,
    /// `host:container[:mode]` bind directives, in mount order.
    pub bindings: Vec<String>,
    pub workdir: Option<String>,
    pub tty: bool,
    pub interactive: bool,
}

/// What an inspect-by-name lookup found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Container engine capability.
///
/// Inspecting a name that does not exist returns `Ok(None)`. Removal is
/// forced and treats an already-gone container as success.
pub trait ContainerEngine {
    fn pull_image(&self, image: &str) -> DockerResult<()>;

    fn inspect_container(&self, name: &str) -> DockerResult<Option<ContainerInfo>>;

    /// Returns the new container's ID.
    fn create_container(&self, spec: &ContainerSpec) -> DockerResult<String>;

    fn start_container(&self, id: &str) -> DockerResult<()>;

    fn remove_container(&self, id: &str) -> DockerResult<()>;

    /// Runs `command` in the container attached to the invoking terminal and
    /// blocks until it exits. Returns the exit code, `None` if killed by a
    /// signal.
    fn exec_interactive(&self, id: &str, command: &[String]) -> DockerResult<Option<i32>>;
}
