//! `labsite backup`: manual backup of the template and data files.

use anyhow::{Result, bail};
use labsite_core::backup::BackupContext;
use tracing::{info, warn};

use crate::app::context::SiteContext;

pub(crate) fn run_backup_command(ctx: &SiteContext) -> Result<()> {
    let store = ctx.backup_store();
    let sources = [
        &ctx.paths.index,
        &ctx.paths.publications,
        &ctx.paths.news,
        &ctx.paths.profile,
    ];

    let mut created = 0;
    for source in sources {
        if !source.is_file() {
            warn!(path = %source.display(), "Skipping missing file");
            println!("missing  {}", source.display());
            continue;
        }
        let backup = store.create(source, BackupContext::Manual)?;
        println!("backed up  {} -> {}", source.display(), backup.display());
        created += 1;
    }

    if created == 0 {
        bail!("Nothing to back up: none of the site files exist under '{}'", ctx.paths.root.display());
    }
    info!(created, dir = %store.dir().display(), "Manual backup complete");
    Ok(())
}
