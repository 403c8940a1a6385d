//! Config command handlers: show effective configuration.

use crate::app::context::SiteContext;

pub(crate) fn run_config_show_command(ctx: &SiteContext) {
    let resolved_path = ctx.config.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if ctx.config.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("root = {}", ctx.paths.root.display());
    println!("index = {}", ctx.paths.index.display());
    println!("publications = {}", ctx.paths.publications.display());
    println!("news = {}", ctx.paths.news.display());
    println!("profile = {}", ctx.paths.profile.display());
    println!("backup_dir = {}", ctx.paths.backup_dir.display());
    println!("backups = {}", ctx.backups_enabled);
    println!("featured_news_limit = {}", ctx.featured_news_limit);
    println!(
        "topics_file = {}",
        ctx.topics_file
            .as_ref()
            .map_or_else(|| "<built-in>".to_string(), |path| path.display().to_string())
    );
    println!("verbosity = {}", ctx.verbosity.as_str());
    for region in ctx.markers.regions() {
        println!("markers.{}.start = {:?}", region.name, region.start.trim());
        let ends: Vec<&str> = region.end_candidates.iter().map(|end| end.trim()).collect();
        println!("markers.{}.end = {ends:?}", region.name);
    }
}
