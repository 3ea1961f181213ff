use crate::utils::{validate_name, DevEnvError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devenv")]
#[command(about = "Containerized editor sessions for your repositories")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a repository under a project directory
    Add(AddArgs),
    /// Clone if needed, then open an editor session in a fresh container
    Start(StartArgs),
    /// List registered repositories
    #[command(alias = "ls")]
    List,
    /// Inspect configuration
    Config(ConfigArgs),
    /// Generate shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    devenv add demo api https://github.com/acme/api.git
    devenv add demo web https://github.com/acme/web.git --image acme/web:dev
    devenv add demo cli https://github.com/acme/cli.git --bind ~/.ssh:/root/.ssh:ro")]
pub struct AddArgs {
    /// Project directory the repository belongs to
    pub project_dir: String,

    /// Repository name
    pub repo_name: String,

    /// Clone URL
    pub repo_url: String,

    /// Image to run instead of the derived one
    #[arg(long)]
    pub image: Option<String>,

    /// Container name instead of the derived one
    #[arg(long)]
    pub container: Option<String>,

    /// Extra host:container[:ro|rw] binding (repeatable)
    #[arg(long = "bind", value_name = "HOST:CONTAINER")]
    pub bindings: Vec<String>,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Project directory the repository belongs to
    pub project_dir: String,

    /// Repository name
    pub repo_name: String,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completion for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl AddArgs {
    pub fn validate(&self) -> crate::utils::Result<()> {
        validate_name("Project directory", &self.project_dir)?;
        validate_name("Repository name", &self.repo_name)?;

        if self.repo_url.trim().is_empty() {
            return Err(DevEnvError::invalid_args("Repository URL cannot be empty"));
        }
        if matches!(&self.image, Some(image) if image.trim().is_empty()) {
            return Err(DevEnvError::invalid_args("--image cannot be empty"));
        }
        if let Some(container) = &self.container {
            validate_name("Container name", container)?;
        }
        for binding in &self.bindings {
            crate::core::bindings::Binding::parse(binding)?;
        }
        Ok(())
    }
}

impl StartArgs {
    pub fn validate(&self) -> crate::utils::Result<()> {
        validate_name("Project directory", &self.project_dir)?;
        validate_name("Repository name", &self.repo_name)
    }
}
