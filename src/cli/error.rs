//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("no command given")]
    MissingCommand,
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Argument parsing errors never get here: clap exits with `exitcode::USAGE`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingCommand | CliError::Infra(_) => crate::exitcode::FAILURE,
        }
    }

    /// Whether the failure banner should follow the diagnostic.
    pub fn is_command_failure(&self) -> bool {
        !matches!(self, CliError::MissingCommand)
    }
}
