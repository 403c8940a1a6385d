//! Keyword classification of publications into topics and venue categories.

use std::fmt;

use tracing::instrument;

use super::taxonomy::{TopicTaxonomy, VenueRules};
use crate::model::Publication;

/// Venue bucket used by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueCategory {
    Ieee,
    Journals,
    Conferences,
}

impl VenueCategory {
    pub const ALL: [Self; 3] = [Self::Ieee, Self::Journals, Self::Conferences];

    /// Tag used as CSS class and `data-category` value.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ieee => "ieee",
            Self::Journals => "journals",
            Self::Conferences => "conferences",
        }
    }

    /// Filter button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ieee => "IEEE Transactions",
            Self::Journals => "Journals",
            Self::Conferences => "Conferences",
        }
    }

    /// Filter button icon class.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Ieee => "fa-graduation-cap",
            Self::Journals => "fa-book-open",
            Self::Conferences => "fa-users",
        }
    }
}

impl fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Classification result for one publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Matched topic tags, in taxonomy order.
    pub topics: Vec<String>,
    pub venue: VenueCategory,
    /// Topic tags followed by the venue tag, space separated.
    pub css_classes: String,
}

/// Assigns topics and a venue category from fixed keyword tables.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    taxonomy: TopicTaxonomy,
    venue_rules: VenueRules,
}

impl Classifier {
    #[must_use]
    pub fn new(taxonomy: TopicTaxonomy, venue_rules: VenueRules) -> Self {
        let venue_rules = VenueRules {
            conference_keywords: lowercase_all(venue_rules.conference_keywords),
            journal_keywords: lowercase_all(venue_rules.journal_keywords),
        };
        Self {
            taxonomy,
            venue_rules,
        }
    }

    #[must_use]
    pub fn taxonomy(&self) -> &TopicTaxonomy {
        &self.taxonomy
    }

    /// Classifies a publication by its title, abstract and venue.
    #[must_use]
    pub fn classify(&self, publication: &Publication) -> Classification {
        let text = format!("{} {}", publication.title, publication.abstract_str()).to_lowercase();
        let topics: Vec<String> = self
            .taxonomy
            .topics()
            .iter()
            .filter(|topic| topic.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|topic| topic.tag.clone())
            .collect();

        let venue = self.venue_category(&publication.venue);

        let mut css_classes = topics.join(" ");
        if !css_classes.is_empty() {
            css_classes.push(' ');
        }
        css_classes.push_str(venue.tag());

        Classification {
            topics,
            venue,
            css_classes,
        }
    }

    /// Venue category by precedence: IEEE, conference keywords, journal
    /// keywords, preprint servers (conferences), otherwise journals.
    #[must_use]
    pub fn venue_category(&self, venue: &str) -> VenueCategory {
        let venue = venue.to_lowercase();
        let contains_any = |keywords: &[String]| keywords.iter().any(|k| venue.contains(k.as_str()));

        if venue.contains("ieee") {
            VenueCategory::Ieee
        } else if contains_any(&self.venue_rules.conference_keywords) {
            VenueCategory::Conferences
        } else if contains_any(&self.venue_rules.journal_keywords) {
            VenueCategory::Journals
        } else if venue.contains("arxiv") || venue.contains("preprint") {
            VenueCategory::Conferences
        } else {
            VenueCategory::Journals
        }
    }

    /// Publications per topic, most frequent first; ties keep taxonomy order.
    /// Topics with no publications are omitted.
    #[must_use]
    #[instrument(skip_all, fields(count = publications.len()))]
    pub fn topic_distribution(&self, publications: &[Publication]) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .taxonomy
            .topics()
            .iter()
            .map(|topic| (topic.tag.clone(), 0))
            .collect();
        for publication in publications {
            for tag in self.classify(publication).topics {
                if let Some(entry) = counts.iter_mut().find(|(t, _)| *t == tag) {
                    entry.1 += 1;
                }
            }
        }
        counts.retain(|(_, n)| *n > 0);
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}
