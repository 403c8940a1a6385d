//! News region rendering.

use super::html::escape;
use crate::model::NewsItem;

/// Featured items shown in the always-visible block when not configured.
pub const DEFAULT_FEATURED_LIMIT: usize = 5;

/// Visible news split into the always-visible and the collapsible block.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsPartition<'a> {
    /// Featured and visible, capped, in storage order.
    pub featured: Vec<&'a NewsItem>,
    /// Visible but not featured, in storage order.
    pub past: Vec<&'a NewsItem>,
}

/// Splits visible items into featured and past. Hidden items are dropped.
///
/// Featured items beyond `featured_limit` are not rendered at all.
#[must_use]
pub fn partition_news(items: &[NewsItem], featured_limit: usize) -> NewsPartition<'_> {
    let featured = items
        .iter()
        .filter(|item| item.is_featured_and_visible())
        .take(featured_limit)
        .collect();
    let past = items
        .iter()
        .filter(|item| item.visible && !item.featured)
        .collect();
    NewsPartition { featured, past }
}

/// Renders a single news item.
#[must_use]
pub fn render_news_item(item: &NewsItem) -> String {
    format!(
        r#"                        <!-- News Item -->
                        <div class="news-item">
                            <div class="news-date">
                                <span class="news-month">{month}</span>
                                <span class="news-day">{day}</span>
                                <span class="news-year">{year}</span>
                            </div>
                            <div class="news-content">
                                <div class="news-icon">
                                    <i class="{icon}"></i>
                                </div>
                                <div class="news-text">
                                    <h4>{title}</h4>
                                    <p>{description}</p>
                                </div>
                            </div>
                        </div>"#,
        month = escape(&item.month),
        day = escape(&item.day),
        year = escape(&item.year),
        icon = escape(&item.icon),
        title = escape(&item.title),
        description = escape(&item.description),
    )
}

fn render_items(items: &[&NewsItem]) -> String {
    items
        .iter()
        .map(|item| render_news_item(item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the news region, starting with its start marker.
#[must_use]
pub fn render_news_section(start_marker: &str, items: &[NewsItem], featured_limit: usize) -> String {
    let partition = partition_news(items, featured_limit);
    format!(
        r#"{start_marker}
        <section class="section">
            <div class="container">
                <div class="section-header">
                    <h2><i class="fas fa-newspaper"></i> Lab News</h2>
                    <p>Latest announcements and updates from our research lab</p>
                </div>

                <!-- Recent News (Always Visible) -->
                <div class="news-container">
                    <div class="news-recent">
{featured}
                    </div>

                    <!-- Toggle Button -->
                    <div class="news-toggle-container">
                        <button id="news-toggle-btn" class="btn btn-secondary news-toggle-btn">
                            <i class="fas fa-chevron-down"></i>
                            Show Past Announcements
                        </button>
                    </div>

                    <!-- Past News (Initially Hidden) -->
                    <div id="news-past" class="news-past" style="display: none;">
{past}
                    </div>
                </div>
            </div>
        </section>"#,
        featured = render_items(&partition.featured),
        past = render_items(&partition.past),
    )
}
