pub mod test_helpers {
    use crate::config::Config;
    use crate::core::source::SourceTransport;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    pub fn create_test_config() -> Config {
        crate::config::defaults::default_config()
    }

    /// Transport that "clones" by creating the destination directory.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        clones: Arc<Mutex<Vec<(String, PathBuf)>>>,
        fail_times: Arc<Mutex<u32>>,
    }

    impl RecordingTransport {
        pub fn fail_next(&self, times: u32) {
            *self.fail_times.lock().unwrap() = times;
        }

        pub fn clone_count(&self) -> usize {
            self.clones.lock().unwrap().len()
        }

        pub fn clones(&self) -> Vec<(String, PathBuf)> {
            self.clones.lock().unwrap().clone()
        }
    }

    impl SourceTransport for RecordingTransport {
        fn clone_repo(&self, url: &str, destination: &Path) -> Result<(), String> {
            self.clones
                .lock()
                .unwrap()
                .push((url.to_string(), destination.to_path_buf()));

            let mut fail_times = self.fail_times.lock().unwrap();
            if *fail_times > 0 {
                *fail_times -= 1;
                return Err("fatal: repository not found".to_string());
            }
            fs::create_dir_all(destination).map_err(|e| e.to_string())
        }
    }

    /// Points config and registry paths into `temp_dir`, writing a default config.
    pub fn setup_isolated_test_environment(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
        let config_dir = temp_dir.path().join(".config").join("devenv");
        fs::create_dir_all(&config_dir).unwrap();
        let config_file = config_dir.join("config.json");
        let projects_file = config_dir.join("projects.json");

        let mut config = create_test_config();
        config.session.projects_dir = temp_dir
            .path()
            .join("Projects")
            .to_string_lossy()
            .to_string();

        let config_json =
            serde_json::to_string_pretty(&config).expect("Failed to serialize config");
        fs::write(&config_file, config_json).expect("Failed to write config file");

        std::env::set_var("DEVENV_CONFIG_PATH", &config_file);
        std::env::set_var("DEVENV_PROJECTS_PATH", &projects_file);

        (config_file, projects_file)
    }

    pub struct TestEnvironmentGuard {
        pub config_file: PathBuf,
        pub projects_file: PathBuf,
        original_config: Option<String>,
        original_projects: Option<String>,
    }

    impl TestEnvironmentGuard {
        pub fn new(temp_dir: &TempDir) -> Self {
            let original_config = std::env::var("DEVENV_CONFIG_PATH").ok();
            let original_projects = std::env::var("DEVENV_PROJECTS_PATH").ok();
            let (config_file, projects_file) = setup_isolated_test_environment(temp_dir);

            Self {
                config_file,
                projects_file,
                original_config,
                original_projects,
            }
        }
    }

    fn restore_var(name: &str, value: &Option<String>) {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    impl Drop for TestEnvironmentGuard {
        fn drop(&mut self) {
            restore_var("DEVENV_CONFIG_PATH", &self.original_config);
            restore_var("DEVENV_PROJECTS_PATH", &self.original_projects);
        }
    }
}
