use crate::utils::DevEnvError;
use crate::utils::Result;

/// Validates a project directory or repository name.
///
/// Names become path components under the projects directory and keys in
/// the project registry, so they must:
/// - Not be empty
/// - Not contain path separators or whitespace
/// - Not be `.` or `..`
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DevEnvError::invalid_args(format!(
            "{kind} cannot be empty"
        )));
    }

    if name == "." || name == ".." {
        return Err(DevEnvError::invalid_args(format!(
            "{kind} cannot be '{name}'"
        )));
    }

    if name.len() > 100 {
        return Err(DevEnvError::invalid_args(format!(
            "{kind} must be less than 100 characters"
        )));
    }

    for ch in name.chars() {
        if ch == '/' || ch == '\\' {
            return Err(DevEnvError::invalid_args(format!(
                "{kind} cannot contain path separators"
            )));
        }
        if ch.is_whitespace() || ch.is_control() {
            return Err(DevEnvError::invalid_args(format!(
                "{kind} cannot contain whitespace"
            )));
        }
    }

    Ok(())
}

/// Lower-cases a repository name for use in image and container names.
pub fn normalize_repo_name(name: &str) -> String {
    name.to_lowercase()
}
