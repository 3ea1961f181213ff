use super::{
    ContainerEngine, ContainerInfo, ContainerPhase, ContainerSpec, DockerError, DockerResult,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockContainer {
    pub id: String,
    pub spec: ContainerSpec,
    pub running: bool,
}

/// One engine call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Pull(String),
    Inspect(String),
    Create(String),
    Start(String),
    Remove(String),
    Exec(String),
}

#[derive(Clone, Default)]
pub struct MockEngine {
    containers: Arc<Mutex<HashMap<String, MockContainer>>>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
    failures: Arc<Mutex<HashMap<String, u32>>>,
    exec_exit: Arc<Mutex<Option<i32>>>,
}

fn phase_key(phase: ContainerPhase) -> String {
    phase.to_string()
}

impl MockEngine {
    pub fn new() -> Self {
        let engine = Self::default();
        *engine.exec_exit.lock().unwrap() = Some(0);
        engine
    }

    /// Makes the next `times` calls of `phase` fail.
    pub fn fail_next(&self, phase: ContainerPhase, times: u32) {
        self.failures
            .lock()
            .unwrap()
            .insert(phase_key(phase), times);
    }

    /// Exit code reported by the interactive process; `None` means killed.
    pub fn set_exec_exit(&self, code: Option<i32>) {
        *self.exec_exit.lock().unwrap() = code;
    }

    /// Seeds a container as if left over from an earlier run.
    pub fn seed_container(&self, name: &str, image: &str, running: bool) -> String {
        let id = format!("mock-{}", uuid::Uuid::new_v4());
        let spec = ContainerSpec {
            name: name.to_string(),
            image: image.to_string(),
            command: vec![],
            environment: vec![],
            bindings: vec![],
            workdir: None,
            tty: true,
            interactive: true,
        };
        self.containers.lock().unwrap().insert(
            name.to_string(),
            MockContainer {
                id: id.clone(),
                spec,
                running,
            },
        );
        id
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, matches: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn get_container(&self, name: &str) -> Option<MockContainer> {
        self.containers.lock().unwrap().get(name).cloned()
    }

    pub fn list_containers(&self) -> Vec<MockContainer> {
        self.containers.lock().unwrap().values().cloned().collect()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn should_fail(&self, phase: ContainerPhase) -> bool {
        let mut failures = self.failures.lock().unwrap();
        match failures.get_mut(&phase_key(phase)) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn name_for_id(&self, id: &str) -> Option<String> {
        self.containers
            .lock()
            .unwrap()
            .values()
            .find(|c| c.id == id)
            .map(|c| c.spec.name.clone())
    }
}

impl ContainerEngine for MockEngine {
    fn pull_image(&self, image: &str) -> DockerResult<()> {
        self.record(EngineCall::Pull(image.to_string()));
        if self.should_fail(ContainerPhase::Pull) {
            return Err(DockerError::ImagePullFailed {
                image: image.to_string(),
                message: "mock pull failure".to_string(),
            });
        }
        Ok(())
    }

    fn inspect_container(&self, name: &str) -> DockerResult<Option<ContainerInfo>> {
        self.record(EngineCall::Inspect(name.to_string()));
        if self.should_fail(ContainerPhase::Inspect) {
            return Err(DockerError::phase_failed(
                ContainerPhase::Inspect,
                name,
                "mock inspect failure",
            ));
        }
        Ok(self
            .containers
            .lock()
            .unwrap()
            .get(name)
            .map(|c| ContainerInfo {
                id: c.id.clone(),
                name: name.to_string(),
                status: if c.running { "running" } else { "exited" }.to_string(),
            }))
    }

    fn create_container(&self, spec: &ContainerSpec) -> DockerResult<String> {
        self.record(EngineCall::Create(spec.name.clone()));
        if self.should_fail(ContainerPhase::Create) {
            return Err(DockerError::ContainerCreationFailed {
                name: spec.name.clone(),
                message: "mock create failure".to_string(),
            });
        }

        let mut containers = self.containers.lock().unwrap();
        if containers.contains_key(&spec.name) {
            return Err(DockerError::ContainerCreationFailed {
                name: spec.name.clone(),
                message: format!("Conflict. The container name \"/{}\" is already in use", spec.name),
            });
        }

        let id = format!("mock-{}", uuid::Uuid::new_v4());
        containers.insert(
            spec.name.clone(),
            MockContainer {
                id: id.clone(),
                spec: spec.clone(),
                running: false,
            },
        );
        Ok(id)
    }

    fn start_container(&self, id: &str) -> DockerResult<()> {
        self.record(EngineCall::Start(id.to_string()));
        if self.should_fail(ContainerPhase::Start) {
            return Err(DockerError::ContainerStartFailed {
                id: id.to_string(),
                message: "mock start failure".to_string(),
            });
        }

        let name = self.name_for_id(id).ok_or_else(|| DockerError::ContainerStartFailed {
            id: id.to_string(),
            message: "No such container".to_string(),
        })?;
        if let Some(container) = self.containers.lock().unwrap().get_mut(&name) {
            container.running = true;
        }
        Ok(())
    }

    fn remove_container(&self, id: &str) -> DockerResult<()> {
        self.record(EngineCall::Remove(id.to_string()));
        if self.should_fail(ContainerPhase::Remove) {
            return Err(DockerError::ContainerRemovalFailed {
                id: id.to_string(),
                message: "mock remove failure".to_string(),
            });
        }

        // Forced removal: running containers go too, missing ones are fine.
        if let Some(name) = self.name_for_id(id) {
            self.containers.lock().unwrap().remove(&name);
        }
        Ok(())
    }

    fn exec_interactive(&self, id: &str, _command: &[String]) -> DockerResult<Option<i32>> {
        self.record(EngineCall::Exec(id.to_string()));
        if self.should_fail(ContainerPhase::Exec) {
            return Err(DockerError::phase_failed(
                ContainerPhase::Exec,
                id,
                "mock exec transport failure",
            ));
        }

        let running = self
            .containers
            .lock()
            .unwrap()
            .values()
            .any(|c| c.id == id && c.running);
        if !running {
            return Err(DockerError::phase_failed(
                ContainerPhase::Exec,
                id,
                "container is not running",
            ));
        }

        Ok(*self.exec_exit.lock().unwrap())
    }
}
