use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::defaults::{get_config_file_path, get_projects_file_path};
use crate::config::ConfigManager;
use crate::utils::{DevEnvError, Result};
use std::path::Path;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    match args.command {
        Some(ConfigCommands::Path) => execute_path(config_path),
        Some(ConfigCommands::Show) | None => execute_show(config_path),
    }
}

fn execute_show(config_path: Option<&Path>) -> Result<()> {
    let config = ConfigManager::load_or_create_with_path(config_path)
        .map_err(|e| DevEnvError::config_error(format!("Failed to load configuration: {e}")))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn execute_path(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => get_config_file_path(),
    };
    println!("config:   {}", path.display());
    println!("projects: {}", get_projects_file_path().display());
    Ok(())
}
