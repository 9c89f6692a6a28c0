//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print a one-line diagnostic (red) to stderr
pub fn diagnostic(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg.to_string().red());
}

/// Print the failure banner for the invoked command line to stderr
pub fn command_failed(command_line: &str) {
    eprintln!("Command [{}] FAILED !", command_line);
}
