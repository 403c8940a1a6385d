//! HTML fragment rendering for the template regions.
//!
//! Every region renderer returns a fragment that begins with the region's
//! start marker, so the spliced document can be regenerated any number of
//! times.

pub mod html;
mod metrics;
mod news;
mod publication;

pub use metrics::{
    HIGH_IMPACT_CITATIONS, KeyVenues, PublicationMetrics, RECENT_YEARS, SiteStats, h_index,
    render_impact_section, render_stats_section, total_citations,
};
pub use news::{
    DEFAULT_FEATURED_LIMIT, NewsPartition, partition_news, render_news_item, render_news_section,
};
pub use publication::{
    YearGroup, format_authors, format_venue, group_by_year, render_publication,
    render_publications_section,
};
