use crate::cli::parser::StartArgs;
use crate::config::defaults::get_projects_file_path;
use crate::config::Config;
use crate::core::docker::DockerCli;
use crate::core::identity::IdentitySource;
use crate::core::interrupt::InterruptSignal;
use crate::core::lifecycle::SessionLifecycle;
use crate::core::registry::{FileProjectStore, ProjectKey};
use crate::core::source::{GitCli, MaterializeOutcome};
use crate::utils::{current_username, home_dir, DevEnvError, Result};

pub fn execute(config: Config, args: StartArgs) -> Result<()> {
    let key = ProjectKey::new(args.project_dir.as_str(), args.repo_name.as_str())?;
    let home = home_dir()?;
    let store = FileProjectStore::open(&get_projects_file_path(), current_username())?;

    let interrupt = InterruptSignal::install().map_err(|e| {
        DevEnvError::config_error(format!("Failed to install interrupt handler: {}", e))
    })?;
    let engine = DockerCli::new(config.engine.binary.clone()).with_interrupt(interrupt.clone());
    let transport = GitCli::new(config.engine.git_binary.clone());

    let lifecycle = SessionLifecycle::new(&config, &store, &engine, &transport, &home)
        .with_interrupt(interrupt);

    let identity = lifecycle.resolve(&key)?;
    if identity.source == IdentitySource::Derived {
        println!(
            "ℹ️  '{}' is not registered, using derived defaults for {}",
            key, identity.repo_url
        );
    }
    engine
        .health_check()
        .map_err(|e| DevEnvError::container_error(&identity.container_name, e))?;

    println!(
        "🚀 Starting {} in container '{}' ({})",
        key, identity.container_name, identity.image
    );

    let report = lifecycle.run(&key)?;

    if report.materialized == MaterializeOutcome::Cloned {
        println!("   Cloned: {}", report.identity.source_path.display());
    }
    println!(
        "✅ Session for {} ended, container '{}' removed",
        report.key, report.identity.container_name
    );

    Ok(())
}
