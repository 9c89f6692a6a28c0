//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// A check failed, timed out, or an action raised an error
pub const FAILURE: i32 = 1;

/// Command line usage error (clap's own exit status)
pub const USAGE: i32 = 2;
