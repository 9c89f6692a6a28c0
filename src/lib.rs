//! sdub: Docker utility belt for container entrypoints
//!
//! Renders configuration files from Jinja2-style templates and environment
//! variables, checks that required variables are set, and waits for TCP ports,
//! HTTP endpoints and filesystem paths.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
