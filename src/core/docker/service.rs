//! `docker` command line implementation of [`ContainerEngine`].

use super::{
    ContainerEngine, ContainerInfo, ContainerPhase, ContainerSpec, DockerError, DockerResult,
};
use crate::core::interrupt::InterruptSignal;
use crate::utils::debug_log;
use std::process::{Command, Output};

pub struct DockerCli {
    binary: String,
    interrupt: Option<InterruptSignal>,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            interrupt: None,
        }
    }

    /// Forwards interrupts to the interactive child while it runs.
    pub fn with_interrupt(mut self, interrupt: InterruptSignal) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Check if Docker is available
    pub fn health_check(&self) -> DockerResult<()> {
        let output = Command::new(&self.binary)
            .args(["version", "--format", "{{.Server.Version}}"])
            .output()
            .map_err(|e| {
                DockerError::daemon_unavailable(
                    ContainerPhase::Inspect,
                    format!("{} not found: {}", self.binary, e),
                )
            })?;

        if !output.status.success() {
            return Err(DockerError::daemon_unavailable(
                ContainerPhase::Inspect,
                "Docker daemon not running",
            ));
        }

        Ok(())
    }

    fn run(&self, phase: ContainerPhase, args: &[String]) -> DockerResult<Output> {
        debug_log(&format!("{} {}", self.binary, args.join(" ")));
        Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| DockerError::daemon_unavailable(phase, e.to_string()))
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn is_missing_container(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("no such container") || lower.contains("no such object")
}

/// Arguments for `docker create`, bindings in composed order.
pub fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec!["create".to_string(), "--name".to_string(), spec.name.clone()];

    if spec.tty {
        args.push("--tty".to_string());
    }
    if spec.interactive {
        args.push("--interactive".to_string());
    }

    for entry in &spec.environment {
        args.push("--env".to_string());
        args.push(entry.clone());
    }

    for bind in &spec.bindings {
        args.push("--volume".to_string());
        args.push(bind.clone());
    }

    if let Some(workdir) = &spec.workdir {
        args.push("--workdir".to_string());
        args.push(workdir.clone());
    }

    args.push(spec.image.clone());
    args.extend(spec.command.iter().cloned());
    args
}

/// Arguments for `docker exec`; `-t` only when stdin is a terminal.
pub fn exec_args(id: &str, command: &[String], stdin_is_tty: bool) -> Vec<String> {
    let mut args = vec!["exec".to_string()];
    args.push(if stdin_is_tty { "-it" } else { "-i" }.to_string());
    args.push(id.to_string());
    args.extend(command.iter().cloned());
    args
}

fn parse_inspect_line(line: &str) -> Option<ContainerInfo> {
    let mut parts = line.trim().splitn(3, '|');
    let id = parts.next()?.trim();
    let name = parts.next()?.trim().trim_start_matches('/');
    let status = parts.next()?.trim();
    if id.is_empty() {
        return None;
    }
    Some(ContainerInfo {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
    })
}

impl ContainerEngine for DockerCli {
    fn pull_image(&self, image: &str) -> DockerResult<()> {
        // Inherit stdio so pull progress reaches the terminal.
        let status = Command::new(&self.binary)
            .args(["pull", image])
            .status()
            .map_err(|e| DockerError::daemon_unavailable(ContainerPhase::Pull, e.to_string()))?;

        if !status.success() {
            return Err(DockerError::ImagePullFailed {
                image: image.to_string(),
                message: format!("{} pull exited with {}", self.binary, status),
            });
        }

        Ok(())
    }

    fn inspect_container(&self, name: &str) -> DockerResult<Option<ContainerInfo>> {
        let args = vec![
            "container".to_string(),
            "inspect".to_string(),
            "--format".to_string(),
            "{{.Id}}|{{.Name}}|{{.State.Status}}".to_string(),
            name.to_string(),
        ];
        let output = self.run(ContainerPhase::Inspect, &args)?;

        if !output.status.success() {
            let stderr = stderr_of(&output);
            if is_missing_container(&stderr) {
                return Ok(None);
            }
            return Err(DockerError::phase_failed(
                ContainerPhase::Inspect,
                name,
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .find_map(parse_inspect_line))
    }

    fn create_container(&self, spec: &ContainerSpec) -> DockerResult<String> {
        let output = self.run(ContainerPhase::Create, &create_args(spec))?;

        if !output.status.success() {
            return Err(DockerError::ContainerCreationFailed {
                name: spec.name.clone(),
                message: stderr_of(&output),
            });
        }

        let container_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if container_id.is_empty() {
            return Err(DockerError::ContainerCreationFailed {
                name: spec.name.clone(),
                message: "engine returned no container ID".to_string(),
            });
        }

        Ok(container_id)
    }

    fn start_container(&self, id: &str) -> DockerResult<()> {
        let output = self.run(ContainerPhase::Start, &["start".to_string(), id.to_string()])?;

        if !output.status.success() {
            return Err(DockerError::ContainerStartFailed {
                id: id.to_string(),
                message: stderr_of(&output),
            });
        }

        Ok(())
    }

    fn remove_container(&self, id: &str) -> DockerResult<()> {
        let output = self.run(
            ContainerPhase::Remove,
            &["rm".to_string(), "-f".to_string(), id.to_string()],
        )?;

        if !output.status.success() {
            let stderr = stderr_of(&output);
            if is_missing_container(&stderr) {
                return Ok(());
            }
            return Err(DockerError::ContainerRemovalFailed {
                id: id.to_string(),
                message: stderr,
            });
        }

        Ok(())
    }

    fn exec_interactive(&self, id: &str, command: &[String]) -> DockerResult<Option<i32>> {
        let args = exec_args(id, command, atty::is(atty::Stream::Stdin));
        debug_log(&format!("{} {}", self.binary, args.join(" ")));

        let mut child = Command::new(&self.binary)
            .args(&args)
            .spawn()
            .map_err(|e| DockerError::daemon_unavailable(ContainerPhase::Exec, e.to_string()))?;

        if let Some(interrupt) = &self.interrupt {
            interrupt.track_child(child.id());
        }

        let status = child.wait();

        if let Some(interrupt) = &self.interrupt {
            interrupt.clear_child();
        }

        let status = status
            .map_err(|e| DockerError::phase_failed(ContainerPhase::Exec, id, e.to_string()))?;
        Ok(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ContainerSpec {
        ContainerSpec {
            name: "nvim-api".to_string(),
            image: "cdaprod/api:latest".to_string(),
            command: vec!["nvim".to_string()],
            environment: vec!["HOME=/home/cdaprod".to_string()],
            bindings: vec![
                "/home/u/.vim:/root/.vim".to_string(),
                "/home/u/Projects/demo/api:/usr/src/app".to_string(),
            ],
            workdir: Some("/usr/src/app".to_string()),
            tty: true,
            interactive: true,
        }
    }

    #[test]
    fn test_create_args() {
        assert_eq!(
            create_args(&spec()),
            vec![
                "create",
                "--name",
                "nvim-api",
                "--tty",
                "--interactive",
                "--env",
                "HOME=/home/cdaprod",
                "--volume",
                "/home/u/.vim:/root/.vim",
                "--volume",
                "/home/u/Projects/demo/api:/usr/src/app",
                "--workdir",
                "/usr/src/app",
                "cdaprod/api:latest",
                "nvim",
            ]
        );
    }

    #[test]
    fn test_create_args_without_tty() {
        let mut spec = spec();
        spec.tty = false;
        spec.interactive = false;
        spec.workdir = None;
        let args = create_args(&spec);
        assert!(!args.contains(&"--tty".to_string()));
        assert!(!args.contains(&"--workdir".to_string()));
        assert_eq!(args.last().unwrap(), "nvim");
    }

    #[test]
    fn test_exec_args() {
        let command = vec!["nvim".to_string()];
        assert_eq!(exec_args("abc", &command, true), vec!["exec", "-it", "abc", "nvim"]);
        assert_eq!(exec_args("abc", &command, false), vec!["exec", "-i", "abc", "nvim"]);
    }

    #[test]
    fn test_parse_inspect_line() {
        let info = parse_inspect_line("4f2a9c|/nvim-api|exited\n").unwrap();
        assert_eq!(info.id, "4f2a9c");
        assert_eq!(info.name, "nvim-api");
        assert_eq!(info.status, "exited");

        assert!(parse_inspect_line("").is_none());
        assert!(parse_inspect_line("only-id").is_none());
    }

    #[test]
    fn test_missing_container_detection() {
        assert!(is_missing_container(
            "Error: No such container: nvim-api"
        ));
        assert!(is_missing_container("Error: No such object: nvim-api"));
        assert!(!is_missing_container("permission denied"));
    }
}
