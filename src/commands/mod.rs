//! Subcommand handlers.

mod backup;
mod config;
mod merge;
mod metrics;
mod news;
mod publications;
mod restore;
mod status;
mod validate;

pub(crate) use backup::run_backup_command;
pub(crate) use config::run_config_show_command;
pub(crate) use merge::run_merge_command;
pub(crate) use metrics::run_metrics_command;
pub(crate) use news::{run_news_add_command, run_news_render_command};
pub(crate) use publications::run_publications_command;
pub(crate) use restore::run_restore_command;
pub(crate) use status::run_status_command;
pub(crate) use validate::run_validate_command;

use anyhow::{Context, Result};
use labsite_core::model::{Publication, ScholarProfile};
use labsite_core::splice::{ApplyOutcome, RegionEdit, TemplateDocument};
use labsite_core::store::{load_document, load_records};
use tracing::{info, warn};

use crate::app::context::SiteContext;

fn load_publications(ctx: &SiteContext) -> Result<Vec<Publication>> {
    let path = &ctx.paths.publications;
    let publications: Vec<Publication> = load_records(path)
        .with_context(|| format!("Cannot load publications from '{}'", path.display()))?;
    info!(count = publications.len(), "Loaded publications");
    Ok(publications)
}

/// The scholar profile, or `None` when the file is absent.
fn load_profile(ctx: &SiteContext) -> Result<Option<ScholarProfile>> {
    let path = &ctx.paths.profile;
    match load_document::<ScholarProfile>(path) {
        Ok(profile) => Ok(Some(profile)),
        Err(e) if e.is_not_found() => {
            warn!(path = %path.display(), "Scholar profile not found");
            Ok(None)
        }
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("Cannot load scholar profile from '{}'", path.display()))),
    }
}

fn read_template(ctx: &SiteContext) -> Result<TemplateDocument> {
    let path = &ctx.paths.index;
    TemplateDocument::read(path)
        .with_context(|| format!("Cannot read template '{}'", path.display()))
}

fn print_fragments(edits: &[RegionEdit<'_>]) {
    for edit in edits {
        println!("{}", edit.fragment);
    }
}

fn print_apply_outcome(template: &TemplateDocument, outcome: &ApplyOutcome) {
    if !outcome.changed {
        println!("{} already up to date", template.path().display());
        return;
    }
    println!(
        "Updated {} (regions: {})",
        template.path().display(),
        outcome.regions.join(", ")
    );
    if let Some(backup) = &outcome.backup {
        println!("Backup: {}", backup.display());
    }
}
