//! Application runtime composition modules.

pub(crate) mod command_dispatcher;
pub(crate) mod context;
pub(crate) mod exit_handler;
pub(crate) mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::ProcessExit;
use crate::app_config::load_config;
use crate::cli::Cli;

/// Parses arguments, resolves configuration, installs logging and runs the command.
pub(crate) fn run() -> Result<ProcessExit> {
    // Parse before tracing so --help works without logs
    let cli = Cli::parse();

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let loaded = load_config(cli.config.as_deref(), &root)?;
    let ctx = context::SiteContext::resolve(&cli, &root, loaded);

    let no_color =
        terminal::should_disable_color(terminal::no_color_env_requested(), terminal::is_dumb_terminal());
    terminal::init_tracing(ctx.verbosity.log_level(), no_color);
    debug!(root = %ctx.paths.root.display(), config = ?ctx.config.path, "Site context resolved");

    command_dispatcher::dispatch(&cli, &ctx)
}
