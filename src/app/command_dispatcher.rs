//! CLI command routing: runs the handler for the chosen subcommand.

use anyhow::Result;

use crate::app::context::SiteContext;
use crate::cli::{Cli, Command, ConfigCommand, NewsCommand};
use crate::{ProcessExit, commands};

/// Runs the command in `cli` and returns the exit outcome.
pub(crate) fn dispatch(cli: &Cli, ctx: &SiteContext) -> Result<ProcessExit> {
    match &cli.command {
        Command::Publications(args) => commands::run_publications_command(ctx, args)?,
        Command::Metrics(args) => commands::run_metrics_command(ctx, args)?,
        Command::News { command } => match command {
            NewsCommand::Render(args) => commands::run_news_render_command(ctx, args)?,
            NewsCommand::Add(args) => commands::run_news_add_command(ctx, args)?,
        },
        Command::Merge(args) => commands::run_merge_command(ctx, args)?,
        Command::Backup => commands::run_backup_command(ctx)?,
        Command::Restore => commands::run_restore_command(ctx)?,
        Command::Validate(args) => return commands::run_validate_command(ctx, args),
        Command::Status => commands::run_status_command(ctx)?,
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::run_config_show_command(ctx),
        },
    }

    Ok(ProcessExit::Success)
}
