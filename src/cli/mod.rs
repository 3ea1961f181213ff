pub mod commands;
pub mod completion;
pub mod parser;

#[cfg(test)]
mod tests;

pub use parser::{Cli, Commands};

use crate::config::{Config, ConfigManager};
use crate::utils::{DevEnvError, Result};

pub fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None)
}

pub fn execute_command_with_config(cli: Cli, test_config: Option<Config>) -> Result<()> {
    let config_path = cli.config;

    let load_config = || -> Result<Config> {
        match test_config {
            Some(cfg) => Ok(cfg),
            None => ConfigManager::load_or_create_with_path(config_path.as_deref()).map_err(|e| {
                DevEnvError::config_error(format!("Failed to load config: {}", e))
            }),
        }
    };

    match cli.command {
        Commands::Add(args) => {
            args.validate()?;
            commands::add::execute(load_config()?, args)
        }
        Commands::Start(args) => {
            args.validate()?;
            commands::start::execute(load_config()?, args)
        }
        Commands::List => commands::list::execute(load_config()?),
        Commands::Config(args) => commands::config::execute(args, config_path.as_deref()),
        Commands::Completion(args) => commands::completion::execute(args),
    }
}
