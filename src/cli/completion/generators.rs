use crate::cli::parser::{Cli, Shell};
use crate::utils::{DevEnvError, Result};
use clap::{Command, CommandFactory};
use clap_complete::{generate, shells};

pub struct ShellCompletionGenerator;

impl ShellCompletionGenerator {
    /// Completion script for `shell`, followed by a comment block listing
    /// each subcommand with its positional arguments.
    pub fn generate_completion(shell: Shell) -> Result<String> {
        let mut cmd = Cli::command();
        let usage = usage_summary(&cmd);
        let mut buf = Vec::new();

        match shell {
            Shell::Bash => generate(shells::Bash, &mut cmd, "devenv", &mut buf),
            Shell::Zsh => generate(shells::Zsh, &mut cmd, "devenv", &mut buf),
            Shell::Fish => generate(shells::Fish, &mut cmd, "devenv", &mut buf),
        }

        let mut script = String::from_utf8(buf).map_err(|e| {
            DevEnvError::invalid_args(format!("completion script is not UTF-8: {}", e))
        })?;
        // Appended rather than prepended: zsh needs `#compdef` on the first line.
        if !script.ends_with('\n') {
            script.push('\n');
        }
        script.push_str(&usage);
        Ok(script)
    }

    pub fn get_installation_instructions(shell: Shell) -> String {
        let install = match shell {
            Shell::Bash => {
                "mkdir -p ~/.local/share/bash-completion/completions
devenv completion bash > ~/.local/share/bash-completion/completions/devenv
# or: echo 'eval \"$(devenv completion bash)\"' >> ~/.bashrc"
            }
            Shell::Zsh => {
                "mkdir -p ~/.zsh_completions
devenv completion zsh > ~/.zsh_completions/_devenv
# then in ~/.zshrc: fpath=(~/.zsh_completions $fpath); autoload -U compinit && compinit"
            }
            Shell::Fish => {
                "mkdir -p ~/.config/fish/completions
devenv completion fish > ~/.config/fish/completions/devenv.fish"
            }
        };

        format!(
            "# Installing devenv completion for {shell:?}:\n\n{install}\n\n\
             # Afterwards `devenv <TAB>` offers add, start, list and config.\n\
             # Project directories and repository names are free text:\n\
             #   devenv add <project-dir> <repo-name> <repo-url>\n\
             #   devenv start <project-dir> <repo-name>"
        )
    }
}

fn usage_summary(cmd: &Command) -> String {
    let mut lines = vec!["# devenv commands:".to_string()];

    for sub in cmd.get_subcommands().filter(|sub| sub.get_name() != "help") {
        let mut usage = format!("devenv {}", sub.get_name());
        for arg in sub.get_positionals() {
            usage.push_str(&format!(" <{}>", arg.get_id().as_str().to_uppercase()));
        }
        match sub.get_about() {
            Some(about) => lines.push(format!("#   {:<48} {}", usage, about)),
            None => lines.push(format!("#   {}", usage)),
        }
    }

    lines.join("\n") + "\n"
}
