//! Publication list rendering: author/venue formatting, year grouping and
//! the filter bars of the publications region.

use std::sync::LazyLock;

use regex::Regex;

use super::html::escape;
use crate::model::{Publication, UNKNOWN_VENUE, sort_newest_first};
use crate::topics::{Classification, Classifier, VenueCategory};

/// Two commas separated only by whitespace.
#[allow(clippy::expect_used)]
static DOUBLE_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*,").expect("double comma regex is valid"));

/// Normalizes an author list for display.
///
/// `" and "` becomes `", "` and runs of empty comma-separated entries
/// collapse; applied until nothing changes, so the result is idempotent.
#[must_use]
pub fn format_authors(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = DOUBLE_COMMA
            .replace_all(&current.replace(" and ", ", "), ",")
            .trim()
            .to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Venue line: `"{year} {venue}"`, or `"{year} Conference Proceedings"` when
/// the venue is missing.
#[must_use]
pub fn format_venue(venue: &str, year: i32) -> String {
    let venue = venue.trim();
    if venue.is_empty() || venue == UNKNOWN_VENUE {
        format!("{year} Conference Proceedings")
    } else {
        format!("{year} {venue}")
    }
}

/// Renders one publication item.
#[must_use]
pub fn render_publication(publication: &Publication, classification: &Classification) -> String {
    let year = publication.effective_year();
    let title = if publication.title.trim().is_empty() {
        "Untitled"
    } else {
        publication.title.as_str()
    };

    let mut data_attrs = format!(
        r#"data-year="{year}" data-category="{}""#,
        classification.venue.tag()
    );
    for tag in &classification.topics {
        data_attrs.push_str(&format!(r#" data-{}="true""#, escape(tag)));
    }

    let pdf_link = match publication.document_url() {
        Some(url) => format!(
            r#"<a href="{}" class="btn btn-small" target="_blank"><i class="fas fa-file-pdf"></i> PDF</a>"#,
            escape(url)
        ),
        None => {
            r##"<a href="#" class="btn btn-small"><i class="fas fa-file-pdf"></i> PDF</a>"##.to_string()
        }
    };

    format!(
        r##"                        <div class="publication-item {classes}" {data_attrs}>
                            <div class="publication-vertical-content">
                                <div class="publication-title">{title}</div>
                                <div class="publication-authors">{authors}</div>
                                <div class="publication-venue">{venue}</div>
                                <div class="publication-meta-row">
                                    <span class="publication-links">
                                        {pdf_link}
                                        <a href="#" class="btn btn-small btn-secondary"><i class="fas fa-code"></i> Code</a>
                                    </span>
                                </div>
                            </div>
                        </div>"##,
        classes = escape(&classification.css_classes),
        title = escape(title),
        authors = escape(&format_authors(&publication.authors)),
        venue = escape(&format_venue(&publication.venue, year)),
    )
}

/// Publications sharing one effective year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub publications: Vec<&'a Publication>,
}

/// Groups publications by effective year, newest first. Members keep their
/// relative input order.
#[must_use]
pub fn group_by_year(publications: &[Publication]) -> Vec<YearGroup<'_>> {
    let mut ordered: Vec<&Publication> = publications.iter().collect();
    ordered.sort_by(|a, b| b.effective_year().cmp(&a.effective_year()));

    let mut groups: Vec<YearGroup<'_>> = Vec::new();
    for publication in ordered {
        let year = publication.effective_year();
        match groups.last_mut() {
            Some(group) if group.year == year => group.publications.push(publication),
            _ => groups.push(YearGroup {
                year,
                publications: vec![publication],
            }),
        }
    }
    groups
}

fn render_year_group(group: &YearGroup<'_>, classifier: &Classifier) -> String {
    let items: Vec<String> = group
        .publications
        .iter()
        .map(|p| render_publication(p, &classifier.classify(p)))
        .collect();
    let year = group.year;
    format!(
        r#"
                <!-- {year} Publications -->
                <div style="margin-bottom: 4rem;">
                    <h3 style="font-size: 2rem; margin-bottom: 2rem; color: var(--text-primary); position: relative; display: inline-block;">
                        {year} Publications
                        <span style="position: absolute; bottom: -8px; left: 0; width: 60px; height: 4px; background: linear-gradient(135deg, #2563eb 0%, #7c3aed 100%); border-radius: 2px;"></span>
                    </h3>

                    <div class="publications-list">
{items}
                    </div>
                </div>"#,
        items = items.join("\n"),
    )
}

fn venue_filter_buttons() -> String {
    let mut buttons = vec![
        r#"                        <button class="publication-filter btn btn-primary active" data-category="all"><i class="fas fa-list-ul"></i> All Publications</button>"#
            .to_string(),
    ];
    for category in VenueCategory::ALL {
        buttons.push(format!(
            r#"                        <button class="publication-filter btn btn-secondary" data-category="{}"><i class="fas {}"></i> {}</button>"#,
            category.tag(),
            category.icon(),
            category.label()
        ));
    }
    buttons.join("\n")
}

fn topic_filter_buttons(classifier: &Classifier) -> String {
    classifier
        .taxonomy()
        .topics()
        .iter()
        .map(|topic| {
            format!(
                r#"                        <button class="publication-filter btn btn-secondary" data-category="{}"><i class="fas {}"></i> {}</button>"#,
                escape(&topic.tag),
                escape(&topic.icon),
                escape(&topic.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the publications region: start marker, filter bars and one
/// block per year.
#[must_use]
pub fn render_publications_section(
    start_marker: &str,
    publications: &[Publication],
    classifier: &Classifier,
) -> String {
    let mut sorted = publications.to_vec();
    sort_newest_first(&mut sorted);
    let years: Vec<String> = group_by_year(&sorted)
        .iter()
        .map(|group| render_year_group(group, classifier))
        .collect();

    format!(
        r#"{start_marker}
                <div style="margin-bottom: 4rem;">
                    <div style="display: flex; gap: 1rem; justify-content: center; flex-wrap: wrap; margin-bottom: 2rem;">
{venue_buttons}
                    </div>

                    <!-- Topic Filters -->
                    <div style="display: flex; gap: 0.5rem; justify-content: center; flex-wrap: wrap; margin-bottom: 1rem;">
                        <h4 style="width: 100%; text-align: center; margin-bottom: 0.5rem; color: var(--text-secondary); font-size: 1rem;">Filter by Research Topics:</h4>
{topic_buttons}
                    </div>
                </div>
{years}"#,
        venue_buttons = venue_filter_buttons(),
        topic_buttons = topic_filter_buttons(classifier),
        years = years.join("\n"),
    )
}
