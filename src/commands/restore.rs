//! `labsite restore`: put the newest template backup back in place.

use anyhow::{Context, Result};

use crate::app::context::SiteContext;

pub(crate) fn run_restore_command(ctx: &SiteContext) -> Result<()> {
    let index = &ctx.paths.index;
    let outcome = ctx
        .backup_store()
        .restore_latest(index)
        .with_context(|| format!("Cannot restore '{}'", index.display()))?;

    println!(
        "Restored {} from {}",
        index.display(),
        outcome.restored_from.display()
    );
    if let Some(safety) = &outcome.safety_backup {
        println!("Previous version saved as {}", safety.display());
    }
    Ok(())
}
