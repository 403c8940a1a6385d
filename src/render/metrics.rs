//! Publication metrics and the statistics / publication-impact regions.

use std::collections::{BTreeSet, HashSet};

use tracing::instrument;

use super::html::{escape, format_thousands};
use super::publication::format_authors;
use crate::model::{Publication, UNKNOWN_VENUE};

/// Years, counting the current one, that make a publication recent.
pub const RECENT_YEARS: i32 = 5;
/// Citation count from which a paper counts as high impact.
pub const HIGH_IMPACT_CITATIONS: u64 = 50;

const JOURNAL_KEYWORDS: [&str; 3] = ["journal", "transactions", "technometrics"];
const CONFERENCE_KEYWORDS: [&str; 4] = ["conference", "proceedings", "aaai", "ijcai"];
const KEY_CONFERENCE_KEYWORDS: [&str; 6] =
    ["conference", "proceedings", "aaai", "ijcai", "icml", "nips"];
const INDUSTRY_KEYWORDS: [&str; 5] = ["industrial", "manufacturing", "tesla", "industry", "commercial"];

const MAX_ACTIVE_RESEARCHERS: usize = 15;
const MAX_INDUSTRY_PARTNERS: usize = 12;
const KEY_VENUES_KEPT: usize = 5;
const KEY_VENUES_SHOWN: usize = 4;

/// Aggregate numbers over the publication store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationMetrics {
    pub total_publications: usize,
    pub total_citations: u64,
    /// Venue mentions both "ieee" and "transaction".
    pub ieee_transactions: usize,
    pub journal_publications: usize,
    pub conference_publications: usize,
    pub recent_publications: usize,
    pub recent_citations: u64,
    pub high_impact_publications: usize,
    pub h_index: usize,
    pub avg_citations: f64,
    pub first_author_papers: usize,
}

impl PublicationMetrics {
    /// Computes metrics for `publications` as of `current_year`.
    ///
    /// `lead_author` is matched case-insensitively against the start of
    /// each author list; without it no paper counts as first-authored.
    #[must_use]
    #[instrument(skip(publications), fields(count = publications.len()))]
    pub fn compute(publications: &[Publication], current_year: i32, lead_author: Option<&str>) -> Self {
        let total_publications = publications.len();
        let total_citations = total_citations(publications);

        let mut metrics = Self {
            total_publications,
            total_citations,
            ..Self::default()
        };

        let lead = lead_author.map(str::to_lowercase);
        let recent_from = current_year - (RECENT_YEARS - 1);

        for publication in publications {
            let venue = publication.venue.to_lowercase();
            if venue.contains("ieee") && venue.contains("transaction") {
                metrics.ieee_transactions += 1;
            }
            if JOURNAL_KEYWORDS.iter().any(|k| venue.contains(k)) {
                metrics.journal_publications += 1;
            } else if CONFERENCE_KEYWORDS.iter().any(|k| venue.contains(k)) {
                metrics.conference_publications += 1;
            }

            if publication
                .year
                .is_some_and(|year| (recent_from..=current_year).contains(&year))
            {
                metrics.recent_publications += 1;
                metrics.recent_citations = metrics
                    .recent_citations
                    .saturating_add(publication.citation_count());
            }

            if publication.citation_count() >= HIGH_IMPACT_CITATIONS {
                metrics.high_impact_publications += 1;
            }

            if lead
                .as_deref()
                .is_some_and(|lead| publication.authors.to_lowercase().starts_with(lead))
            {
                metrics.first_author_papers += 1;
            }
        }

        metrics.h_index = h_index(publications);
        metrics.avg_citations = if total_publications == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let avg = total_citations as f64 / total_publications as f64;
            avg
        };
        metrics
    }
}

/// Sum of clamped citation counts, saturating at `u64::MAX`.
#[must_use]
pub fn total_citations(publications: &[Publication]) -> u64 {
    publications
        .iter()
        .map(Publication::citation_count)
        .fold(0, u64::saturating_add)
}

/// Largest `h` such that `h` papers have at least `h` citations each.
#[must_use]
pub fn h_index(publications: &[Publication]) -> usize {
    let mut citations: Vec<u64> = publications.iter().map(Publication::citation_count).collect();
    citations.sort_unstable_by(|a, b| b.cmp(a));
    citations
        .iter()
        .enumerate()
        .take_while(|(i, c)| **c >= (*i as u64) + 1)
        .count()
}

/// Distinct venue names per group, sorted, at most five each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyVenues {
    pub ieee_transactions: Vec<String>,
    pub top_journals: Vec<String>,
    pub conferences: Vec<String>,
}

impl KeyVenues {
    #[must_use]
    pub fn extract(publications: &[Publication]) -> Self {
        let mut ieee = BTreeSet::new();
        let mut journals = BTreeSet::new();
        let mut conferences = BTreeSet::new();

        for publication in publications {
            let venue = publication.venue.trim();
            if venue.is_empty() || venue == UNKNOWN_VENUE {
                continue;
            }
            let lower = venue.to_lowercase();

            if lower.contains("ieee") {
                if lower.contains("transaction") {
                    let name = venue
                        .replace("IEEE Transactions on", "")
                        .replace("IEEE Transaction on", "");
                    let name = name.trim();
                    if name.chars().count() > 5 {
                        ieee.insert(name.to_string());
                    }
                } else {
                    ieee.insert(venue.to_string());
                }
            } else if lower.contains("journal") || lower.contains("technometrics") {
                journals.insert(venue.to_string());
            } else if KEY_CONFERENCE_KEYWORDS.iter().any(|k| lower.contains(k)) {
                let name = if lower.contains("proceedings of") {
                    venue
                        .replace("Proceedings of the", "")
                        .replace("Proceedings of", "")
                        .trim()
                        .to_string()
                } else {
                    venue.to_string()
                };
                if name.chars().count() < 60 {
                    conferences.insert(name);
                }
            }
        }

        let top = |set: BTreeSet<String>| set.into_iter().take(KEY_VENUES_KEPT).collect();
        Self {
            ieee_transactions: top(ieee),
            top_journals: top(journals),
            conferences: top(conferences),
        }
    }
}

/// Estimates shown in the top statistics grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteStats {
    /// Distinct names among the first three authors of papers from the
    /// last two years, capped at 15.
    pub active_researchers: usize,
    /// Industry-related papers divided by three, capped at 12.
    pub industry_partners: usize,
}

impl SiteStats {
    #[must_use]
    pub fn estimate(publications: &[Publication], current_year: i32) -> Self {
        let mut recent_authors: HashSet<String> = HashSet::new();
        for publication in publications {
            if !publication
                .year
                .is_some_and(|y| y == current_year || y == current_year - 1)
            {
                continue;
            }
            let authors = format_authors(&publication.authors);
            recent_authors.extend(
                authors
                    .split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .take(3)
                    .map(String::from),
            );
        }

        let industry_papers = publications
            .iter()
            .filter(|p| {
                let text = format!("{} {}", p.title, p.abstract_str()).to_lowercase();
                INDUSTRY_KEYWORDS.iter().any(|k| text.contains(k))
            })
            .count();

        Self {
            active_researchers: recent_authors.len().min(MAX_ACTIVE_RESEARCHERS),
            industry_partners: (industry_papers / 3).min(MAX_INDUSTRY_PARTNERS),
        }
    }
}

fn stat_item(number: &str, label: &str) -> String {
    format!(
        r#"                        <div class="stat-item">
                            <h3 class="stat-number">{number}</h3>
                            <p>{label}</p>
                        </div>"#
    )
}

/// Renders the top statistics region, starting with its start marker.
#[must_use]
pub fn render_stats_section(
    start_marker: &str,
    metrics: &PublicationMetrics,
    publications: &[Publication],
    current_year: i32,
) -> String {
    let stats = SiteStats::estimate(publications, current_year);
    let items = [
        stat_item(&stats.active_researchers.to_string(), "Active Researchers"),
        stat_item(&metrics.total_publications.to_string(), "Top-Tier Publications"),
        stat_item(&stats.industry_partners.to_string(), "Elite Industry Partners"),
        stat_item(&format_thousands(metrics.total_citations), "Total Citations"),
        r#"                        <div class="stat-item">
                            <h3>AI-First</h3>
                            <p>Research Philosophy</p>
                        </div>"#
            .to_string(),
    ];
    format!(
        r#"{start_marker}
        <section class="section">
            <div class="container">
                <div class="stats-section">
                    <div class="stats-grid">
{items}
                    </div>
                </div>
            </div>
        </section>"#,
        items = items.join("\n"),
    )
}

fn venue_card(heading: &str, venues: &[String]) -> String {
    let mut card = format!(
        r#"                        <div class="venue-card">
                            <h4 style="color: var(--accent-blue); margin-bottom: 0.5rem;">{heading}</h4>
                            <ul style="color: #64748b; margin: 0; padding-left: 1rem;">"#
    );
    for venue in venues.iter().take(KEY_VENUES_SHOWN) {
        card.push_str(&format!("\n                                <li>{}</li>", escape(venue)));
    }
    card.push_str(
        "
                            </ul>
                        </div>",
    );
    card
}

/// Renders the publication-impact region, starting with its start marker.
#[must_use]
pub fn render_impact_section(start_marker: &str, metrics: &PublicationMetrics, venues: &KeyVenues) -> String {
    let items = [
        stat_item(&metrics.total_publications.to_string(), "Total Publications"),
        stat_item(&metrics.ieee_transactions.to_string(), "IEEE Transactions"),
        stat_item(&metrics.h_index.to_string(), "H-Index"),
        stat_item(&format_thousands(metrics.total_citations), "Total Citations"),
    ];
    let cards = [
        venue_card("IEEE Transactions", &venues.ieee_transactions),
        venue_card("Top Journals", &venues.top_journals),
        venue_card("Top Conferences", &venues.conferences),
    ];
    format!(
        r#"{start_marker}
                <div style="margin-top: 5rem;">
                    <div class="section-header">
                        <h2>Publication Impact</h2>
                        <p>Research metrics and achievements</p>
                    </div>
                    <div class="stats-grid">
{items}
                    </div>
                </div>

                <!-- Key Venues -->
                <div class="key-venues-section">
                    <h3 style="font-size: 1.8rem; color: var(--text-primary); margin-bottom: 1.5rem; font-weight: 700;">
                        <i class="fas fa-university" style="color: #0ea5e9; margin-right: 0.5rem;"></i>
                        Key Publication Venues
                    </h3>
                    <div class="venue-grid">
{cards}
                    </div>
                </div>"#,
        items = items.join("\n"),
        cards = cards.join("\n"),
    )
}
