//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::PathMode;

/// Docker Utility Belt.
#[derive(Parser, Debug)]
#[command(name = "sdub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate template from env vars.
    Template {
        /// Path to template file.
        #[arg(value_hint = ValueHint::FilePath)]
        input: String,
        /// Path of output file.
        #[arg(value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },

    /// Check if env var exists.
    Ensure {
        /// Name of env var.
        name: String,
    },

    /// Check if at least one of the env vars exists.
    #[command(name = "ensure-atleast-one")]
    EnsureAtleastOne {
        /// Names of env var.
        names: Vec<String>,
    },

    /// Wait for network service to appear.
    Wait {
        /// Host.
        host: String,
        /// Port.
        port: u16,
        /// Timeout in secs.
        #[arg(allow_negative_numbers = true)]
        timeout: f64,
    },

    /// Wait for an HTTP/HTTPS URL to be retrievable.
    #[command(name = "http-ready")]
    HttpReady {
        /// URL to retrieve. Expected HTTP status code: 2xx.
        #[arg(value_hint = ValueHint::Url)]
        url: String,
        /// Time in secs to wait for the URL to be retrievable.
        #[arg(allow_negative_numbers = true)]
        timeout: f64,
    },

    /// Check for path permissions and existence.
    Path {
        /// Full path.
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Condition to check.
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Wait for a path to exist.
    #[command(name = "path-wait")]
    PathWait {
        /// Full path.
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Time in secs to wait for the path to exist.
        #[arg(allow_negative_numbers = true)]
        timeout: f64,
    },
}

/// Path condition as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Writable,
    Readable,
    Executable,
    Exists,
}

impl From<ModeArg> for PathMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Writable => PathMode::Writable,
            ModeArg::Readable => PathMode::Readable,
            ModeArg::Executable => PathMode::Executable,
            ModeArg::Exists => PathMode::Exists,
        }
    }
}
