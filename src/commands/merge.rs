//! `labsite merge`: merge a fetched publication batch into the store.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use labsite_core::backup::BackupContext;
use labsite_core::model::{Publication, merge_publications};
use labsite_core::store::{load_records, load_records_or_empty, save_json};
use tracing::info;

use super::load_profile;
use crate::app::context::SiteContext;
use crate::cli::MergeArgs;

pub(crate) fn run_merge_command(ctx: &SiteContext, args: &MergeArgs) -> Result<()> {
    let fetched_path = ctx.paths.resolve(&args.file);
    let fetched: Vec<Publication> = load_records(&fetched_path).with_context(|| {
        format!("Cannot load fetched publications from '{}'", fetched_path.display())
    })?;

    let store = &ctx.paths.publications;
    let existing: Vec<Publication> = load_records_or_empty(store)
        .with_context(|| format!("Cannot load publications from '{}'", store.display()))?;
    let fetched_count = fetched.len();
    let outcome = merge_publications(existing, fetched);
    info!(
        fetched = fetched_count,
        added = outcome.added,
        total = outcome.publications.len(),
        "Merged publications"
    );

    if outcome.added > 0 {
        backup_before_write(ctx, store)?;
        save_json(store, &outcome.publications)?;
    }
    println!(
        "Merged {fetched_count} fetched publications: {} new, {} total",
        outcome.added,
        outcome.publications.len()
    );

    if let Some(mut profile) = load_profile(ctx)? {
        backup_before_write(ctx, &ctx.paths.profile)?;
        profile.touch(Local::now());
        save_json(&ctx.paths.profile, &profile)?;
        if let Some(stamp) = &profile.last_update {
            println!("Profile last_update = {stamp}");
        }
    }
    Ok(())
}

fn backup_before_write(ctx: &SiteContext, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    if let Some(policy) = ctx.backup_policy(false, BackupContext::Backup) {
        let backup = policy.store.create(path, policy.context)?;
        println!("Backup: {}", backup.display());
    }
    Ok(())
}
