use crate::utils::{DevEnvError, Result};
use std::path::{Path, PathBuf};

/// Resolves the invoking user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| DevEnvError::config_error("Unable to determine home directory"))
}

/// Name of the current OS user, used to namespace project records.
///
/// Some platforms report the user as a path (e.g. `/home/alice`); only the
/// last component is kept.
pub fn current_username() -> String {
    let raw = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            home_dir()
                .ok()
                .and_then(|home| home.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| "default".to_string());

    strip_user_prefix(&raw)
}

fn strip_user_prefix(raw: &str) -> String {
    raw.rsplit(|c: char| c == '/' || c == '\\')
        .find(|part| !part.is_empty())
        .unwrap_or(raw)
        .to_string()
}

/// Expands a leading `~`, `$HOME` or `${HOME}` against `home`.
pub fn expand_home(value: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    if value == "~" {
        return home.to_string();
    }
    if let Some(rest) = value.strip_prefix("~/") {
        return format!("{home}/{rest}");
    }
    value.replace("${HOME}", &home).replace("$HOME", &home)
}

/// Debug logging helper
pub fn debug_log(message: &str) {
    if std::env::var("DEVENV_DEBUG").is_ok() {
        eprintln!("[DEVENV_DEBUG] {}", message);
    }
}
