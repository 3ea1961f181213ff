use crate::cli::parser::AddArgs;
use crate::config::defaults::get_projects_file_path;
use crate::config::Config;
use crate::core::registry::{add_project, FileProjectStore, ProjectKey, ProjectRecord, ProjectStore};
use crate::utils::{current_username, Result};

pub fn execute(config: Config, args: AddArgs) -> Result<()> {
    let mut store = FileProjectStore::open(&get_projects_file_path(), current_username())?;
    let (key, record) = register(&mut store, &config, &args)?;

    println!(
        "✅ Added repository '{}' to project '{}'",
        key.repo_name(),
        key.project_dir()
    );
    println!("   URL: {}", record.repo_url);
    println!("   Image: {}", record.docker_image);
    println!("   Container: {}", record.container_name);
    for binding in &record.volume_bindings {
        println!("   Bind: {}", binding);
    }

    Ok(())
}

/// Builds the record for `args`, deriving image and container name when not given,
/// and stores it.
pub fn register(
    store: &mut dyn ProjectStore,
    config: &Config,
    args: &AddArgs,
) -> Result<(ProjectKey, ProjectRecord)> {
    let key = ProjectKey::new(args.project_dir.as_str(), args.repo_name.as_str())?;

    let image = args
        .image
        .clone()
        .unwrap_or_else(|| config.naming.image_for(key.repo_name()));
    let container = args
        .container
        .clone()
        .unwrap_or_else(|| config.naming.container_name_for(key.repo_name()));

    let record = ProjectRecord::new(args.repo_url.trim(), image, container)
        .with_bindings(args.bindings.clone());

    add_project(store, &key, record.clone())?;
    Ok((key, record))
}
