//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::PathMode;

/// Domain errors represent failed checks and invalid inputs.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{name} is required.")]
    MissingVariable { name: String },

    #[error(
        "At least one of these environment variables is required: {}",
        names.join(", ")
    )]
    NoneOfVariables { names: Vec<String> },

    #[error("invalid timeout: {value} (expected a non-negative number of seconds)")]
    InvalidTimeout { value: f64 },

    #[error("{} does not exist.", path.display())]
    PathMissing { path: PathBuf },

    #[error("{} is not {mode}.", path.display())]
    PathNotAccessible { path: PathBuf, mode: PathMode },
}
