//! `labsite metrics`: render the statistics and publication-impact regions.

use anyhow::Result;
use labsite_core::backup::BackupContext;
use labsite_core::model::Publication;
use labsite_core::render::{
    HIGH_IMPACT_CITATIONS, KeyVenues, PublicationMetrics, RECENT_YEARS, render_impact_section,
    render_stats_section,
};
use labsite_core::splice::{RegionEdit, RegionSpec};
use tracing::{debug, info};

use super::{load_profile, load_publications, print_apply_outcome, print_fragments, read_template};
use crate::app::context::SiteContext;
use crate::cli::MetricsArgs;

pub(super) struct MetricFragments {
    pub(super) metrics: PublicationMetrics,
    pub(super) venues: KeyVenues,
    pub(super) stats: String,
    pub(super) impact: String,
}

/// Computes metrics and renders the stats and impact fragments.
pub(super) fn metric_fragments(
    ctx: &SiteContext,
    publications: &[Publication],
    lead_author: Option<&str>,
    stats_region: &RegionSpec,
    impact_region: &RegionSpec,
) -> MetricFragments {
    let metrics = PublicationMetrics::compute(publications, ctx.current_year, lead_author);
    let venues = KeyVenues::extract(publications);
    debug!(
        h_index = metrics.h_index,
        citations = metrics.total_citations,
        "Computed publication metrics"
    );
    MetricFragments {
        stats: render_stats_section(&stats_region.start, &metrics, publications, ctx.current_year),
        impact: render_impact_section(&impact_region.start, &metrics, &venues),
        metrics,
        venues,
    }
}

/// Prints the metrics summary shared by `metrics` and `publications`.
pub(super) fn print_metrics_report(metrics: &PublicationMetrics, venues: &KeyVenues) {
    println!(
        "Publications: {}, citations: {}, h-index: {}",
        metrics.total_publications, metrics.total_citations, metrics.h_index
    );
    println!("IEEE Transactions: {}", metrics.ieee_transactions);
    println!(
        "Journals: {}, conferences: {}",
        metrics.journal_publications, metrics.conference_publications
    );
    println!(
        "Recent ({RECENT_YEARS} years): {} publications, {} citations",
        metrics.recent_publications, metrics.recent_citations
    );
    println!(
        "High-impact papers ({HIGH_IMPACT_CITATIONS}+ citations): {}",
        metrics.high_impact_publications
    );
    println!("Average citations: {:.1}", metrics.avg_citations);
    println!("First-author papers: {}", metrics.first_author_papers);
    println!(
        "Key venues: {} IEEE, {} journals, {} conferences",
        venues.ieee_transactions.len(),
        venues.top_journals.len(),
        venues.conferences.len()
    );
}

pub(crate) fn run_metrics_command(ctx: &SiteContext, args: &MetricsArgs) -> Result<()> {
    let publications = load_publications(ctx)?;
    let lead_author = load_profile(ctx)?.and_then(|p| p.lead_author().map(str::to_string));

    let stats_region = ctx.markers.stats_region();
    let impact_region = ctx.markers.impact_region();
    let MetricFragments {
        metrics,
        venues,
        stats,
        impact,
    } = metric_fragments(ctx, &publications, lead_author.as_deref(), &stats_region, &impact_region);
    let edits = [
        RegionEdit {
            spec: &stats_region,
            fragment: stats,
        },
        RegionEdit {
            spec: &impact_region,
            fragment: impact,
        },
    ];

    if args.dry_run {
        print_fragments(&edits);
        return Ok(());
    }

    let mut template = read_template(ctx)?;
    let outcome =
        template.apply(&edits, ctx.backup_policy(args.no_backup, BackupContext::MetricsBackup))?;
    info!(changed = outcome.changed, "Metrics rendered");

    print_metrics_report(&metrics, &venues);
    print_apply_outcome(&template, &outcome);
    Ok(())
}
