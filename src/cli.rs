//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use labsite_core::{NewsCategory, NewsIcon};

/// Maintain the generated content of a lab website.
///
/// Labsite classifies and renders publications, news and publication
/// metrics, and splices them into named regions of the site's index page.
#[derive(Parser, Debug)]
#[command(name = "labsite")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Site root directory containing index.html and the data files
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/labsite.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render publications into the index page
    Publications(PublicationsArgs),
    /// Render the statistics and publication-impact regions only
    Metrics(MetricsArgs),
    /// Manage and render news items
    News {
        #[command(subcommand)]
        command: NewsCommand,
    },
    /// Merge a fetched publication batch into the store
    Merge(MergeArgs),
    /// Back up the index page and every data file
    Backup,
    /// Restore the index page from its newest backup
    Restore,
    /// Check the data files and the index page
    Validate(ValidateArgs),
    /// Summarise the data files and backups
    Status,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PublicationsArgs {
    /// Do not back up index.html before writing
    #[arg(long)]
    pub no_backup: bool,

    /// Leave the statistics and impact regions untouched
    #[arg(long)]
    pub skip_metrics: bool,

    /// Print the rendered fragments instead of writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MetricsArgs {
    /// Do not back up index.html before writing
    #[arg(long)]
    pub no_backup: bool,

    /// Print the rendered fragments instead of writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
    /// Render news items into the index page
    Render(NewsRenderArgs),
    /// Add a news item to the store
    Add(NewsAddArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct NewsRenderArgs {
    /// Do not back up index.html before writing
    #[arg(long)]
    pub no_backup: bool,

    /// Maximum number of featured items shown before the collapsible block (1-50)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub featured_limit: Option<u8>,

    /// Print the rendered fragment instead of writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NewsAddArgs {
    /// Headline
    #[arg(long)]
    pub title: String,

    /// Body text
    #[arg(long)]
    pub description: String,

    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, value_enum, default_value_t = IconArg::Newspaper)]
    pub icon: IconArg,

    #[arg(long, value_enum, default_value_t = CategoryArg::Other)]
    pub category: CategoryArg,

    /// Show the item in the always-visible block
    #[arg(long)]
    pub featured: bool,

    /// Store the item without rendering it
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// JSON array of fetched publications; a relative path resolves against the site root
    #[arg(value_name = "FETCHED_JSON")]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Treat warnings as failures (exit code 2)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconArg {
    Trophy,
    GraduationCap,
    Microscope,
    Users,
    BookOpen,
    Medal,
    Globe,
    LaptopCode,
    Lightbulb,
    Newspaper,
}

impl From<IconArg> for NewsIcon {
    fn from(value: IconArg) -> Self {
        match value {
            IconArg::Trophy => Self::Trophy,
            IconArg::GraduationCap => Self::GraduationCap,
            IconArg::Microscope => Self::Microscope,
            IconArg::Users => Self::Users,
            IconArg::BookOpen => Self::BookOpen,
            IconArg::Medal => Self::Medal,
            IconArg::Globe => Self::Globe,
            IconArg::LaptopCode => Self::LaptopCode,
            IconArg::Lightbulb => Self::Lightbulb,
            IconArg::Newspaper => Self::Newspaper,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Award,
    Team,
    Grant,
    Collaboration,
    Publication,
    Presentation,
    Opensource,
    Other,
}

impl From<CategoryArg> for NewsCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Award => Self::Award,
            CategoryArg::Team => Self::Team,
            CategoryArg::Grant => Self::Grant,
            CategoryArg::Collaboration => Self::Collaboration,
            CategoryArg::Publication => Self::Publication,
            CategoryArg::Presentation => Self::Presentation,
            CategoryArg::Opensource => Self::Opensource,
            CategoryArg::Other => Self::Other,
        }
    }
}
