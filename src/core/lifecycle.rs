//! One interactive session, end to end:
//! resolve -> materialize -> compose bindings -> reconcile -> attach -> teardown.
//!
//! Teardown is owned by a [`TeardownGuard`] from the moment the container
//! is running, so it runs on every exit path. The reported result is the
//! worse of the attach and teardown outcomes.

use crate::config::Config;
use crate::core::bindings::{compose_bindings, BindingRequest};
use crate::core::docker::{
    ContainerEngine, ContainerReconciler, ContainerSpec, SessionAttachment, TeardownGuard,
};
use crate::core::identity::{IdentityResolver, ResolvedIdentity};
use crate::core::interrupt::InterruptSignal;
use crate::core::registry::{ProjectKey, ProjectStore};
use crate::core::retry::RetryPolicy;
use crate::core::source::{MaterializeOutcome, SourceMaterializer, SourceTransport};
use crate::utils::{DevEnvError, Result};
use std::path::{Path, PathBuf};

/// What a completed session did.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub key: ProjectKey,
    pub identity: ResolvedIdentity,
    pub materialized: MaterializeOutcome,
    pub container_id: String,
    pub bindings: Vec<String>,
}

pub struct SessionLifecycle<'a> {
    config: &'a Config,
    store: &'a dyn ProjectStore,
    engine: &'a dyn ContainerEngine,
    transport: &'a dyn SourceTransport,
    home: PathBuf,
    retry: RetryPolicy,
    interrupt: Option<InterruptSignal>,
}

impl<'a> SessionLifecycle<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn ProjectStore,
        engine: &'a dyn ContainerEngine,
        transport: &'a dyn SourceTransport,
        home: &Path,
    ) -> Self {
        Self {
            config,
            store,
            engine,
            transport,
            home: home.to_path_buf(),
            retry: RetryPolicy::from_config(config),
            interrupt: None,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_interrupt(mut self, interrupt: InterruptSignal) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    fn check_interrupt(&self, phase: &str) -> Result<()> {
        match &self.interrupt {
            Some(signal) if signal.is_interrupted() => Err(DevEnvError::interrupted(phase)),
            _ => Ok(()),
        }
    }

    /// Retry policy that gives up as soon as the session is interrupted.
    fn retry_policy(&self) -> RetryPolicy {
        match &self.interrupt {
            Some(signal) => self.retry.clone().with_interrupt(signal.clone()),
            None => self.retry.clone(),
        }
    }

    /// An interrupt during a phase wins over the failure it caused.
    fn interrupted_or(&self, phase: &str, err: DevEnvError) -> DevEnvError {
        match &self.interrupt {
            Some(signal) if signal.is_interrupted() => DevEnvError::interrupted(phase),
            _ => err,
        }
    }

    /// Resolves the identity for `key` without touching disk or the engine.
    pub fn resolve(&self, key: &ProjectKey) -> Result<ResolvedIdentity> {
        IdentityResolver::new(
            self.store,
            &self.config.naming,
            &self.config.projects_root(&self.home),
        )
        .resolve(key)
    }

    pub fn run(&self, key: &ProjectKey) -> Result<SessionReport> {
        let _span = tracing::info_span!("session", project = %key).entered();

        let identity = self.resolve(key)?;
        tracing::info!(
            repo_url = %identity.repo_url,
            image = %identity.image,
            container = %identity.container_name,
            "resolved project"
        );

        self.check_interrupt("source materialization")?;
        let materialized = SourceMaterializer::new(self.transport, self.retry_policy())
            .ensure(&identity.repo_url, &identity.source_path)
            .map_err(|e| self.interrupted_or("source materialization", e))?;

        let bindings = compose_bindings(&BindingRequest {
            home: &self.home,
            defaults: &self.config.bindings.defaults,
            project: &identity.extra_bindings,
            source_path: &identity.source_path,
            workdir: &self.config.session.workdir,
        })
        .map_err(|e| DevEnvError::invalid_record(key, e.to_string()))?
        .to_bind_args();

        let spec = ContainerSpec {
            name: identity.container_name.clone(),
            image: identity.image.clone(),
            command: self.config.session.command.clone(),
            environment: self.config.session.environment.clone(),
            bindings: bindings.clone(),
            workdir: Some(self.config.session.workdir.clone()),
            tty: true,
            interactive: true,
        };

        self.check_interrupt("container reconciliation")?;
        let session = ContainerReconciler::new(self.engine, self.retry_policy())
            .reconcile(&spec)
            .map_err(|e| {
                self.interrupted_or(
                    "container reconciliation",
                    DevEnvError::container_error(&identity.container_name, e),
                )
            })?;
        let container_id = session.container_id.clone();

        let mut guard = TeardownGuard::new(self.engine, session);

        let attach_result = match self.check_interrupt("attach") {
            Ok(()) => SessionAttachment::new(self.engine, &self.config.session.command)
                .attach(guard.session_mut()),
            Err(e) => Err(e),
        };
        if let Err(e) = &attach_result {
            tracing::warn!(error = %e, "interactive session ended with an error");
        }

        let teardown_result = guard.release().map(|_| ());

        DevEnvError::join_session(attach_result, teardown_result)?;

        Ok(SessionReport {
            key: key.clone(),
            identity,
            materialized,
            container_id,
            bindings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::docker::mock::{EngineCall, MockEngine};
    use crate::core::docker::ContainerPhase;
    use crate::core::registry::{MemoryProjectStore, ProjectRecord};
    use crate::test_utils::test_helpers::{create_test_config, RecordingTransport};
    use std::cell::Cell;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Clone that is cut short by Ctrl-C, the way a killed `git` child fails.
    struct InterruptedClone {
        signal: InterruptSignal,
        attempts: Cell<u32>,
    }

    impl SourceTransport for InterruptedClone {
        fn clone_repo(&self, _url: &str, _destination: &Path) -> std::result::Result<(), String> {
            self.attempts.set(self.attempts.get() + 1);
            self.signal.trigger();
            Err("git clone terminated by signal".to_string())
        }
    }

    struct Fixture {
        home: TempDir,
        config: Config,
        engine: MockEngine,
        transport: RecordingTransport,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                home: TempDir::new().unwrap(),
                config: create_test_config(),
                engine: MockEngine::new(),
                transport: RecordingTransport::default(),
            }
        }

        fn lifecycle<'a>(&'a self, store: &'a MemoryProjectStore) -> SessionLifecycle<'a> {
            SessionLifecycle::new(
                &self.config,
                store,
                &self.engine,
                &self.transport,
                self.home.path(),
            )
            .with_retry(RetryPolicy::none())
        }
    }

    #[test]
    fn test_full_session_with_derived_identity() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "API").unwrap();

        let report = fixture.lifecycle(&store).run(&key).unwrap();

        assert_eq!(report.identity.container_name, "nvim-api");
        assert_eq!(report.identity.image, "cdaprod/api:latest");
        assert_eq!(report.materialized, MaterializeOutcome::Cloned);
        assert_eq!(fixture.transport.clone_count(), 1);
        assert!(fixture.engine.list_containers().is_empty());

        let calls = fixture.engine.calls();
        assert_eq!(calls.first(), Some(&EngineCall::Pull("cdaprod/api:latest".to_string())));
        assert_eq!(calls.last(), Some(&EngineCall::Remove(report.container_id.clone())));
    }

    #[test]
    fn test_bindings_order_and_source_last() {
        let fixture = Fixture::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        let store = MemoryProjectStore::new().with_record(
            key.clone(),
            ProjectRecord::new("https://example.com/api.git", "cdaprod/api:latest", "nvim-api")
                .with_bindings(vec!["~/.ssh:/root/.ssh:ro".to_string()]),
        );
        let home = fixture.home.path().to_string_lossy().to_string();

        let report = fixture.lifecycle(&store).run(&key).unwrap();

        assert_eq!(
            report.bindings,
            vec![
                format!("{home}/.config/nvim:/root/.config/nvim"),
                format!("{home}/.vim:/root/.vim"),
                format!("{home}/.vimrc:/root/.vimrc"),
                format!("{home}/.ssh:/root/.ssh:ro"),
                format!("{home}/Projects/demo/api:/usr/src/app"),
            ]
        );
    }

    #[test]
    fn test_existing_source_skips_clone() {
        let fixture = Fixture::new();
        std::fs::create_dir_all(fixture.home.path().join("Projects/demo/api")).unwrap();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();

        let report = fixture.lifecycle(&store).run(&key).unwrap();

        assert_eq!(report.materialized, MaterializeOutcome::AlreadyPresent);
        assert_eq!(fixture.transport.clone_count(), 0);
    }

    #[test]
    fn test_clone_failure_aborts_before_engine() {
        let fixture = Fixture::new();
        fixture.transport.fail_next(1);
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();

        let err = fixture.lifecycle(&store).run(&key).unwrap_err();

        assert!(matches!(err, DevEnvError::Source { .. }));
        assert!(fixture.engine.calls().is_empty());
    }

    #[test]
    fn test_attach_failure_still_tears_down_once() {
        let fixture = Fixture::new();
        fixture.engine.set_exec_exit(Some(2));
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();

        let err = fixture.lifecycle(&store).run(&key).unwrap_err();

        assert!(matches!(err, DevEnvError::Attach { .. }));
        assert!(fixture.engine.list_containers().is_empty());
        let removes: Vec<EngineCall> = fixture
            .engine
            .calls()
            .into_iter()
            .filter(|c| matches!(c, EngineCall::Remove(_)))
            .collect();
        assert_eq!(removes.len(), 1);
    }

    #[test]
    fn test_teardown_failure_fails_session() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        fixture.engine.fail_next(ContainerPhase::Remove, 1);

        let err = fixture.lifecycle(&store).run(&key).unwrap_err();

        assert!(matches!(err, DevEnvError::Teardown { .. }));
    }

    #[test]
    fn test_attach_and_teardown_failures_are_joined() {
        let fixture = Fixture::new();
        fixture.engine.set_exec_exit(Some(1));
        fixture.engine.fail_next(ContainerPhase::Remove, 1);
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();

        let err = fixture.lifecycle(&store).run(&key).unwrap_err();

        assert!(matches!(err, DevEnvError::SessionFailed { .. }));
    }

    #[test]
    fn test_container_error_carries_name() {
        let fixture = Fixture::new();
        fixture.engine.fail_next(ContainerPhase::Create, 1);
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();

        let err = fixture.lifecycle(&store).run(&key).unwrap_err();

        match err {
            DevEnvError::Container { container, source } => {
                assert_eq!(container, "nvim-api");
                assert_eq!(source.phase(), ContainerPhase::Create);
            }
            other => panic!("expected container error, got {other:?}"),
        }
    }

    #[test]
    fn test_interrupt_before_start_touches_nothing() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        let signal = InterruptSignal::new();
        let lifecycle = fixture.lifecycle(&store).with_interrupt(signal.clone());
        signal.trigger();

        let err = lifecycle.run(&key).unwrap_err();

        assert!(matches!(err, DevEnvError::Interrupted { .. }));
        assert_eq!(fixture.transport.clone_count(), 0);
        assert!(fixture.engine.calls().is_empty());
    }

    #[test]
    fn test_second_run_replaces_prior_container() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        let leftover = fixture
            .engine
            .seed_container("nvim-api", "cdaprod/api:latest", true);

        fixture.lifecycle(&store).run(&key).unwrap();

        assert!(fixture
            .engine
            .calls()
            .contains(&EngineCall::Remove(leftover)));
        assert!(fixture.engine.list_containers().is_empty());
    }

    #[test]
    fn test_interrupt_during_clone_is_not_retried() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        let signal = InterruptSignal::new();
        let transport = InterruptedClone {
            signal: signal.clone(),
            attempts: Cell::new(0),
        };
        let retry = RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(1),
            jitter: false,
            interrupt: None,
        };

        let err = SessionLifecycle::new(
            &fixture.config,
            &store,
            &fixture.engine,
            &transport,
            fixture.home.path(),
        )
        .with_retry(retry)
        .with_interrupt(signal)
        .run(&key)
        .unwrap_err();

        assert_eq!(transport.attempts.get(), 1);
        match err {
            DevEnvError::Interrupted { phase } => assert_eq!(phase, "source materialization"),
            other => panic!("expected interrupt, got {other:?}"),
        }
        assert!(fixture.engine.calls().is_empty());
    }

    #[test]
    fn test_stored_record_overrides_derived_identity() {
        let fixture = Fixture::new();
        let key = ProjectKey::new("demo", "api").unwrap();
        let store = MemoryProjectStore::new().with_record(
            key.clone(),
            ProjectRecord::new("https://git.example.org/team/api.git", "acme/custom:1", "editor-x"),
        );

        let report = fixture.lifecycle(&store).run(&key).unwrap();

        assert_eq!(report.identity.repo_url, "https://git.example.org/team/api.git");
        assert_eq!(report.identity.image, "acme/custom:1");
        assert_eq!(report.identity.container_name, "editor-x");
        assert_eq!(
            fixture.transport.clones()[0].0,
            "https://git.example.org/team/api.git"
        );

        let calls = fixture.engine.calls();
        assert!(calls.contains(&EngineCall::Pull("acme/custom:1".to_string())));
        assert!(calls.contains(&EngineCall::Create("editor-x".to_string())));
        assert!(!calls.contains(&EngineCall::Create("nvim-api".to_string())));
    }

    #[test]
    fn test_mixed_case_repo_keeps_case_on_disk() {
        let fixture = Fixture::new();
        let store = MemoryProjectStore::new();
        let key = ProjectKey::new("demo", "API").unwrap();

        let report = fixture.lifecycle(&store).run(&key).unwrap();

        let expected = fixture.home.path().join("Projects").join("demo").join("API");
        assert_eq!(report.identity.source_path, expected);
        assert_eq!(fixture.transport.clones()[0].1, expected);
        assert!(expected.is_dir());
        assert_eq!(
            report.bindings.last().unwrap(),
            &format!("{}:/usr/src/app", expected.display())
        );
    }
}
