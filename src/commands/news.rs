//! `labsite news`: render news into the template, or add an item to the store.

use anyhow::{Context, Result, bail};
use chrono::Local;
use labsite_core::backup::BackupContext;
use labsite_core::model::{NewsDraft, NewsItem, add_news_item, next_news_id, parse_news_date};
use labsite_core::render::{partition_news, render_news_section};
use labsite_core::splice::RegionEdit;
use labsite_core::store::{load_records, load_records_or_empty, save_json};
use tracing::{info, warn};

use super::{print_apply_outcome, print_fragments, read_template};
use crate::app::context::SiteContext;
use crate::cli::{NewsAddArgs, NewsRenderArgs};

fn load_news(ctx: &SiteContext) -> Result<Vec<NewsItem>> {
    let path = &ctx.paths.news;
    let items: Vec<NewsItem> = load_records(path)
        .with_context(|| format!("Cannot load news from '{}'", path.display()))?;
    info!(count = items.len(), "Loaded news items");
    Ok(items)
}

pub(crate) fn run_news_render_command(ctx: &SiteContext, args: &NewsRenderArgs) -> Result<()> {
    let items = load_news(ctx)?;
    let featured_limit = args
        .featured_limit
        .map_or(ctx.featured_news_limit, usize::from);

    let region = ctx.markers.news_region();
    let edits = [RegionEdit {
        spec: &region,
        fragment: render_news_section(&region.start, &items, featured_limit),
    }];

    if args.dry_run {
        print_fragments(&edits);
        return Ok(());
    }

    let mut template = read_template(ctx)?;
    let outcome = template.apply(&edits, ctx.backup_policy(args.no_backup, BackupContext::Backup))?;

    let partition = partition_news(&items, featured_limit);
    println!(
        "Rendered {} news items ({} featured, {} past)",
        partition.featured.len() + partition.past.len(),
        partition.featured.len(),
        partition.past.len()
    );
    print_apply_outcome(&template, &outcome);
    Ok(())
}

pub(crate) fn run_news_add_command(ctx: &SiteContext, args: &NewsAddArgs) -> Result<()> {
    let title = args.title.trim();
    let description = args.description.trim();
    if title.is_empty() || description.is_empty() {
        bail!("News title and description must not be empty");
    }

    let date = match &args.date {
        Some(raw) => parse_news_date(raw.trim())?,
        None => Local::now().date_naive(),
    };

    let path = &ctx.paths.news;
    let mut items: Vec<NewsItem> = load_records_or_empty(path)
        .with_context(|| format!("Cannot load news from '{}'", path.display()))?;

    let id = next_news_id(&items)?;
    let item = NewsItem::new(
        id.clone(),
        NewsDraft {
            date,
            icon: args.icon.into(),
            category: args.category.into(),
            title: title.to_string(),
            description: description.to_string(),
            visible: !args.hidden,
            featured: args.featured,
        },
    );
    add_news_item(&mut items, item)?;

    if path.is_file() {
        if let Some(policy) = ctx.backup_policy(false, BackupContext::Backup) {
            let backup = policy.store.create(path, policy.context)?;
            println!("Backup: {}", backup.display());
        }
    } else {
        warn!(path = %path.display(), "News store not found, creating it");
    }

    save_json(path, &items)?;
    info!(id = %id, total = items.len(), "News item added");
    println!("Added {id} to {}", path.display());
    Ok(())
}
