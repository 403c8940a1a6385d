//! `labsite publications`: render the publication list (and metrics) into the template.

use anyhow::Result;
use labsite_core::backup::BackupContext;
use labsite_core::model::Publication;
use labsite_core::render::render_publications_section;
use labsite_core::splice::RegionEdit;
use labsite_core::topics::Classifier;
use tracing::info;

use super::metrics::{MetricFragments, metric_fragments, print_metrics_report};
use super::{load_profile, load_publications, print_apply_outcome, print_fragments, read_template};
use crate::app::context::SiteContext;
use crate::cli::PublicationsArgs;

pub(crate) fn run_publications_command(ctx: &SiteContext, args: &PublicationsArgs) -> Result<()> {
    let publications = load_publications(ctx)?;
    let classifier = ctx.classifier()?;

    let publications_region = ctx.markers.publications_region();
    let stats_region = ctx.markers.stats_region();
    let impact_region = ctx.markers.impact_region();

    let mut edits = vec![RegionEdit {
        spec: &publications_region,
        fragment: render_publications_section(&publications_region.start, &publications, &classifier),
    }];
    let mut report = None;
    if !args.skip_metrics {
        let lead_author = load_profile(ctx)?.and_then(|p| p.lead_author().map(str::to_string));
        let MetricFragments {
            metrics,
            venues,
            stats,
            impact,
        } = metric_fragments(
            ctx,
            &publications,
            lead_author.as_deref(),
            &stats_region,
            &impact_region,
        );
        edits.push(RegionEdit {
            spec: &stats_region,
            fragment: stats,
        });
        edits.push(RegionEdit {
            spec: &impact_region,
            fragment: impact,
        });
        report = Some((metrics, venues));
    }

    if args.dry_run {
        print_fragments(&edits);
        return Ok(());
    }

    let mut template = read_template(ctx)?;
    let outcome = template.apply(&edits, ctx.backup_policy(args.no_backup, BackupContext::Backup))?;
    info!(publications = publications.len(), changed = outcome.changed, "Publications rendered");

    println!("Rendered {} publications", publications.len());
    if let Some((metrics, venues)) = &report {
        print_metrics_report(metrics, venues);
    }
    print_topic_distribution(&classifier, &publications);
    print_apply_outcome(&template, &outcome);
    Ok(())
}

fn print_topic_distribution(classifier: &Classifier, publications: &[Publication]) {
    let distribution = classifier.topic_distribution(publications);
    if distribution.is_empty() {
        return;
    }
    println!("Topic distribution:");
    for (tag, count) in distribution {
        let label = classifier
            .taxonomy()
            .get(&tag)
            .map_or(tag.as_str(), |topic| topic.label.as_str());
        println!("  {label}: {count}");
    }
}
