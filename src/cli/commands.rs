use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands, ModeArg};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::EnvSnapshot;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command line against the real environment.
///
/// Without a subcommand the usage text is printed and `CliError::MissingCommand` returned.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print usage", e))?;
        return Err(CliError::MissingCommand);
    };

    let env = EnvSnapshot::from_process();
    debug!("captured {} environment variables", env.len());
    let settings = Settings::load(&env)?;
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings, env);
    dispatch(command, &container)
}

/// Execute one subcommand with the given services.
pub fn dispatch(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Template { input, output } => _template(container, input, output),
        Commands::Ensure { name } => _ensure(container, name),
        Commands::EnsureAtleastOne { names } => _ensure_atleast_one(container, names),
        Commands::Wait {
            host,
            port,
            timeout,
        } => _wait(container, host, *port, *timeout),
        Commands::HttpReady { url, timeout } => _http_ready(container, url, *timeout),
        Commands::Path { path, mode } => _path(container, path, *mode),
        Commands::PathWait { path, timeout } => _path_wait(container, path, *timeout),
    }
}

#[instrument(skip(container))]
fn _template(container: &ServiceContainer, input: &str, output: &Path) -> CliResult<()> {
    container
        .template_service()
        .render_to_file(input, output, &container.env)?;
    Ok(())
}

#[instrument(skip(container))]
fn _ensure(container: &ServiceContainer, name: &str) -> CliResult<()> {
    container.ensure_service().ensure(name)?;
    info!("{} is set", name);
    Ok(())
}

#[instrument(skip(container))]
fn _ensure_atleast_one(container: &ServiceContainer, names: &[String]) -> CliResult<()> {
    container.ensure_service().ensure_at_least_one(names)?;
    Ok(())
}

#[instrument(skip(container))]
fn _wait(container: &ServiceContainer, host: &str, port: u16, timeout: f64) -> CliResult<()> {
    container.wait_service().wait_for_port(host, port, timeout)?;
    Ok(())
}

#[instrument(skip(container))]
fn _http_ready(container: &ServiceContainer, url: &str, timeout: f64) -> CliResult<()> {
    container.wait_service().wait_for_http(url, timeout)?;
    Ok(())
}

#[instrument(skip(container))]
fn _path(container: &ServiceContainer, path: &Path, mode: ModeArg) -> CliResult<()> {
    container.path_service().check(path, mode.into())?;
    Ok(())
}

#[instrument(skip(container))]
fn _path_wait(container: &ServiceContainer, path: &Path, timeout: f64) -> CliResult<()> {
    container.wait_service().wait_for_path(path, timeout)?;
    Ok(())
}
