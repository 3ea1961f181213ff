#[cfg(test)]
mod cli_tests {
    use crate::cli::parser::*;
    use clap::Parser;

    #[test]
    fn test_add_command_parsing() {
        let cli = Cli::try_parse_from([
            "devenv",
            "add",
            "demo",
            "api",
            "https://github.com/acme/api.git",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.project_dir, "demo");
                assert_eq!(args.repo_name, "api");
                assert_eq!(args.repo_url, "https://github.com/acme/api.git");
                assert!(args.image.is_none());
                assert!(args.container.is_none());
                assert!(args.bindings.is_empty());
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_add_command_with_overrides() {
        let cli = Cli::try_parse_from([
            "devenv",
            "add",
            "demo",
            "api",
            "https://github.com/acme/api.git",
            "--image",
            "acme/api:dev",
            "--container",
            "api-editor",
            "--bind",
            "~/.ssh:/root/.ssh:ro",
            "--bind",
            "/data:/data",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.image.as_deref(), Some("acme/api:dev"));
                assert_eq!(args.container.as_deref(), Some("api-editor"));
                assert_eq!(args.bindings, vec!["~/.ssh:/root/.ssh:ro", "/data:/data"]);
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_add_requires_three_arguments() {
        assert!(Cli::try_parse_from(["devenv", "add", "demo", "api"]).is_err());
    }

    #[test]
    fn test_start_command_parsing() {
        let cli = Cli::try_parse_from(["devenv", "start", "demo", "api"]).unwrap();
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.project_dir, "demo");
                assert_eq!(args.repo_name, "api");
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_start_requires_repo_name() {
        assert!(Cli::try_parse_from(["devenv", "start", "demo"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["devenv", "start", "demo", "api", "--config", "/tmp/c.json"])
                .unwrap();
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/c.json"))
        );

        let cli = Cli::try_parse_from(["devenv", "--config", "/tmp/c.json", "list"]).unwrap();
        assert!(cli.config.is_some());
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_list_command_alias() {
        let cli = Cli::try_parse_from(["devenv", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::try_parse_from(["devenv", "config", "show"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.command, Some(ConfigCommands::Show))),
            _ => panic!("Expected Config command"),
        }

        let cli = Cli::try_parse_from(["devenv", "config", "path"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.command, Some(ConfigCommands::Path))),
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_completion_command() {
        let cli = Cli::try_parse_from(["devenv", "completion", "zsh"]).unwrap();
        match cli.command {
            Commands::Completion(args) => assert_eq!(args.shell, Shell::Zsh),
            _ => panic!("Expected Completion command"),
        }
        assert!(Cli::try_parse_from(["devenv", "completion", "powershell"]).is_err());
    }

    #[test]
    fn test_add_args_validation() {
        let base = AddArgs {
            project_dir: "demo".to_string(),
            repo_name: "api".to_string(),
            repo_url: "https://github.com/acme/api.git".to_string(),
            image: None,
            container: None,
            bindings: vec![],
        };
        assert!(base.validate().is_ok());

        let escaping = AddArgs {
            project_dir: "..".to_string(),
            ..clone_add(&base)
        };
        assert!(escaping.validate().is_err());

        let nested = AddArgs {
            repo_name: "a/b".to_string(),
            ..clone_add(&base)
        };
        assert!(nested.validate().is_err());

        let blank_url = AddArgs {
            repo_url: "  ".to_string(),
            ..clone_add(&base)
        };
        assert!(blank_url.validate().is_err());

        let bad_bind = AddArgs {
            bindings: vec!["/data:relative".to_string()],
            ..clone_add(&base)
        };
        assert!(bad_bind.validate().is_err());
    }

    #[test]
    fn test_start_args_validation() {
        let args = StartArgs {
            project_dir: "demo".to_string(),
            repo_name: "".to_string(),
        };
        assert!(args.validate().is_err());
    }

    fn clone_add(args: &AddArgs) -> AddArgs {
        AddArgs {
            project_dir: args.project_dir.clone(),
            repo_name: args.repo_name.clone(),
            repo_url: args.repo_url.clone(),
            image: args.image.clone(),
            container: args.container.clone(),
            bindings: args.bindings.clone(),
        }
    }
}

#[cfg(test)]
mod execution_tests {
    use crate::cli::{execute_command_with_config, Cli};
    use crate::core::registry::{FileProjectStore, ProjectKey, ProjectStore};
    use crate::test_utils::test_helpers::{create_test_config, TestEnvironmentGuard};
    use crate::utils::{current_username, DevEnvError};
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_add_persists_and_rejects_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let guard = TestEnvironmentGuard::new(&temp_dir);

        let add = || {
            Cli::try_parse_from([
                "devenv",
                "add",
                "demo",
                "api",
                "https://github.com/acme/api.git",
            ])
            .unwrap()
        };

        execute_command_with_config(add(), Some(create_test_config())).unwrap();

        let store = FileProjectStore::open(&guard.projects_file, current_username()).unwrap();
        let key = ProjectKey::new("demo", "api").unwrap();
        let record = store.get(&key).unwrap().unwrap();
        assert_eq!(record.repo_url, "https://github.com/acme/api.git");
        assert_eq!(record.docker_image, "cdaprod/api:latest");
        assert_eq!(record.container_name, "nvim-api");

        let err = execute_command_with_config(add(), Some(create_test_config())).unwrap_err();
        assert!(matches!(err, DevEnvError::DuplicateProject { .. }));
    }
}
