use crate::config::defaults::get_projects_file_path;
use crate::config::Config;
use crate::core::registry::{FileProjectStore, ProjectKey, ProjectRecord, ProjectStore};
use crate::utils::{current_username, Result};

pub fn execute(_config: Config) -> Result<()> {
    let store = FileProjectStore::open(&get_projects_file_path(), current_username())?;
    let records = store.list()?;

    if records.is_empty() {
        println!("No projects registered for user '{}'.", store.user());
        return Ok(());
    }

    for line in format_records(&records) {
        println!("{}", line);
    }
    Ok(())
}

pub fn format_records(records: &[(ProjectKey, ProjectRecord)]) -> Vec<String> {
    let width = records
        .iter()
        .map(|(key, _)| key.to_string().len())
        .max()
        .unwrap_or(0);

    records
        .iter()
        .map(|(key, record)| {
            format!(
                "{:<width$}  {}  {}  {}",
                key.to_string(),
                record.container_name,
                record.docker_image,
                record.repo_url,
                width = width
            )
        })
        .collect()
}
