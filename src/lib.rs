pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::config::Config;
pub use crate::core::docker::{ContainerEngine, ContainerSpec, DockerCli};
pub use crate::core::lifecycle::{SessionLifecycle, SessionReport};
pub use crate::core::registry::{FileProjectStore, ProjectKey, ProjectRecord, ProjectStore};
pub use crate::core::source::{GitCli, SourceTransport};
pub use crate::utils::{DevEnvError, Result};
