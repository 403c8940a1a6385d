//! `labsite status`: one-screen summary of the site's files.

use std::path::Path;

use anyhow::Result;
use labsite_core::backup::BackupStore;
use labsite_core::model::{NewsItem, Publication};
use labsite_core::render::total_citations;
use labsite_core::store::load_records;
use tracing::debug;

use super::load_profile;
use crate::app::context::SiteContext;

pub(crate) fn run_status_command(ctx: &SiteContext) -> Result<()> {
    let paths = &ctx.paths;
    println!("Site root: {}", paths.root.display());

    println!();
    println!("Files:");
    for (label, path) in [
        ("index", &paths.index),
        ("publications", &paths.publications),
        ("news", &paths.news),
        ("profile", &paths.profile),
    ] {
        println!("  {label:<13} {}", describe_file(path));
    }

    println!();
    println!("News:");
    match load_records::<NewsItem>(&paths.news) {
        Ok(items) => {
            let visible = items.iter().filter(|item| item.visible).count();
            let featured = items.iter().filter(|item| item.is_featured_and_visible()).count();
            println!("  total = {}, visible = {visible}, featured = {featured}", items.len());
            if let Some(latest) = items.iter().map(|item| item.date.as_str()).max() {
                println!("  latest = {latest}");
            }
        }
        Err(e) => println!("  unavailable ({e})"),
    }

    println!();
    println!("Publications:");
    match load_records::<Publication>(&paths.publications) {
        Ok(publications) => {
            let citations = total_citations(&publications);
            println!("  total = {}, citations = {citations}", publications.len());
            let years = publications.iter().filter_map(|p| p.year);
            if let (Some(first), Some(last)) = (years.clone().min(), years.max()) {
                println!("  years = {first}-{last}");
            }
        }
        Err(e) => println!("  unavailable ({e})"),
    }

    println!();
    println!("Profile:");
    match load_profile(ctx) {
        Ok(Some(profile)) => {
            println!("  author = {}", profile.author_name);
            println!("  affiliation = {}", profile.affiliation);
            println!(
                "  last_update = {}",
                profile.last_update.as_deref().unwrap_or("never")
            );
        }
        Ok(None) => println!("  not configured"),
        Err(e) => println!("  unavailable ({e:#})"),
    }

    println!();
    println!("Backups ({}):", ctx.backup_store().dir().display());
    for (label, path) in [
        ("index", &paths.index),
        ("publications", &paths.publications),
        ("news", &paths.news),
        ("profile", &paths.profile),
    ] {
        println!("  {label:<13} {}", describe_backups(ctx.backup_store(), path));
    }
    Ok(())
}

fn describe_file(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => format!("{} ({} bytes)", path.display(), meta.len()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "File not readable");
            format!("{} (missing)", path.display())
        }
    }
}

fn describe_backups(store: &BackupStore, source: &Path) -> String {
    match store.list(source, None) {
        Ok(entries) => match entries.first() {
            Some(newest) => format!(
                "{} backup(s), newest {} ({})",
                entries.len(),
                newest.timestamp.format("%Y-%m-%d %H:%M:%S"),
                newest.context
            ),
            None => "none".to_string(),
        },
        Err(e) => format!("unavailable ({e})"),
    }
}
