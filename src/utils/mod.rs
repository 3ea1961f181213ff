pub mod error;
pub mod path;
pub mod validation;

pub use error::{DevEnvError, Result};
pub use path::{current_username, debug_log, expand_home, home_dir};
pub use validation::{normalize_repo_name, validate_name};
