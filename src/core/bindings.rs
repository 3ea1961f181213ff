//! Bind-mount composition for session containers.
//!
//! A session's bindings are, in order: the global defaults from
//! configuration, the project's own extra bindings, and finally the
//! project source mounted at the container workdir. The engine lets later
//! entries win when two bindings target the same container path, so the
//! order is part of the contract.

use crate::utils::{expand_home, DevEnvError, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub host_path: String,
    pub container_path: String,
    /// Optional engine mount mode such as `ro`.
    pub mode: Option<String>,
}

impl Binding {
    pub fn new(host_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            mode: None,
        }
    }

    /// Parses a `host:container[:mode]` directive.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.splitn(3, ':');
        let host = parts.next().unwrap_or_default().trim();
        let container = parts.next().unwrap_or_default().trim();
        let mode = parts.next().map(|m| m.trim().to_string());

        if host.is_empty() || container.is_empty() {
            return Err(DevEnvError::invalid_args(format!(
                "binding '{}' must be in host:container form",
                spec
            )));
        }

        if !container.starts_with('/') {
            return Err(DevEnvError::invalid_args(format!(
                "container path '{}' must be absolute",
                container
            )));
        }

        if let Some(mode) = &mode {
            if mode != "ro" && mode != "rw" {
                return Err(DevEnvError::invalid_args(format!(
                    "unsupported mount mode '{}'",
                    mode
                )));
            }
        }

        Ok(Self {
            host_path: host.to_string(),
            container_path: container.to_string(),
            mode,
        })
    }

    fn expanded(mut self, home: &Path) -> Self {
        self.host_path = expand_home(&self.host_path, home);
        self
    }

    /// The `-v` argument understood by the engine.
    pub fn to_bind_arg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_path, self.container_path)?;
        if let Some(mode) = &self.mode {
            write!(f, ":{}", mode)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<Binding>,
}

impl BindingSet {
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn to_bind_args(&self) -> Vec<String> {
        self.bindings.iter().map(Binding::to_bind_arg).collect()
    }
}

/// Inputs to [`compose_bindings`].
pub struct BindingRequest<'a> {
    pub home: &'a Path,
    pub defaults: &'a [String],
    pub project: &'a [String],
    pub source_path: &'a Path,
    pub workdir: &'a str,
}

pub fn compose_bindings(request: &BindingRequest<'_>) -> Result<BindingSet> {
    let mut bindings = Vec::with_capacity(request.defaults.len() + request.project.len() + 1);

    for entry in request.defaults.iter().chain(request.project.iter()) {
        bindings.push(Binding::parse(entry)?.expanded(request.home));
    }

    bindings.push(Binding::new(
        request.source_path.to_string_lossy().to_string(),
        request.workdir,
    ));

    Ok(BindingSet { bindings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_binding_config;

    fn compose(project: &[String]) -> BindingSet {
        let defaults = default_binding_config().defaults;
        compose_bindings(&BindingRequest {
            home: Path::new("/home/u"),
            defaults: &defaults,
            project,
            source_path: Path::new("/home/u/Projects/p/r"),
            workdir: "/usr/src/app",
        })
        .unwrap()
    }

    #[test]
    fn test_defaults_then_source() {
        let set = compose(&[]);
        assert_eq!(
            set.to_bind_args(),
            vec![
                "/home/u/.config/nvim:/root/.config/nvim",
                "/home/u/.vim:/root/.vim",
                "/home/u/.vimrc:/root/.vimrc",
                "/home/u/Projects/p/r:/usr/src/app",
            ]
        );
    }

    #[test]
    fn test_project_bindings_keep_input_order() {
        let project = vec![
            "$HOME/.ssh:/root/.ssh:ro".to_string(),
            "/data/cache:/cache".to_string(),
            "~/.gitconfig:/root/.gitconfig".to_string(),
        ];
        let set = compose(&project);
        let args = set.to_bind_args();

        assert_eq!(args.len(), 7);
        assert_eq!(args[3], "/home/u/.ssh:/root/.ssh:ro");
        assert_eq!(args[4], "/data/cache:/cache");
        assert_eq!(args[5], "/home/u/.gitconfig:/root/.gitconfig");
        assert_eq!(args[6], "/home/u/Projects/p/r:/usr/src/app");
    }

    #[test]
    fn test_composition_is_deterministic() {
        let project = vec!["~/.tmux.conf:/root/.tmux.conf".to_string()];
        assert_eq!(compose(&project), compose(&project));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Binding::parse("/only/host").is_err());
        assert!(Binding::parse(":/container").is_err());
        assert!(Binding::parse("/host:relative").is_err());
        assert!(Binding::parse("/host:/container:zz").is_err());
    }

    #[test]
    fn test_invalid_project_binding_fails_composition() {
        let defaults = default_binding_config().defaults;
        let project = vec!["broken".to_string()];
        let result = compose_bindings(&BindingRequest {
            home: Path::new("/home/u"),
            defaults: &defaults,
            project: &project,
            source_path: Path::new("/home/u/Projects/p/r"),
            workdir: "/usr/src/app",
        });
        assert!(result.is_err());
    }
}
