//! Publication records as stored in `publications.json`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Year used for grouping and display when a record carries no year.
pub const FALLBACK_YEAR: i32 = 2020;

/// Venue string the fetcher writes when the source had no venue.
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

/// A single publication record.
///
/// Fields the pipeline does not know about are kept in [`Publication::extra`]
/// so rewriting the store never drops hand-added data. `year` and
/// `citations` are read leniently: an integer, an integer-valued float or a
/// numeric string is accepted, anything else reads as no year and zero
/// citations. The value as read is written back while the parsed value is
/// left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredPublication", into = "StoredPublication")]
pub struct Publication {
    pub title: String,
    /// Author list, usually joined with " and ".
    pub authors: String,
    pub venue: String,
    pub year: Option<i32>,
    /// Signed so a malformed negative count surfaces as a validation warning
    /// instead of a load failure.
    pub citations: i64,
    pub url: Option<String>,
    pub eprint_url: Option<String>,
    pub abstract_text: Option<String>,
    pub extra: Map<String, Value>,
    raw: RawNumbers,
}

/// `year` and `citations` exactly as they appeared in the store.
#[derive(Debug, Clone, Default, PartialEq)]
struct RawNumbers {
    year: Option<Value>,
    citations: Option<Value>,
}

/// On-disk shape of a [`Publication`].
#[derive(Serialize, Deserialize)]
struct StoredPublication {
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: String,
    #[serde(default)]
    venue: String,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    year: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    citations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eprint_url: Option<String>,
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    abstract_text: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)` so it is written back.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Integer reading of a JSON value: integers, integer-valued floats and
/// numeric strings.
fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn parse_year(value: &Value) -> Option<i32> {
    lenient_integer(value).and_then(|y| i32::try_from(y).ok())
}

fn parse_citations(value: &Value) -> i64 {
    lenient_integer(value).unwrap_or(0)
}

impl From<StoredPublication> for Publication {
    fn from(stored: StoredPublication) -> Self {
        Self {
            title: stored.title,
            authors: stored.authors,
            venue: stored.venue,
            year: stored.year.as_ref().and_then(parse_year),
            citations: stored.citations.as_ref().map_or(0, parse_citations),
            url: stored.url,
            eprint_url: stored.eprint_url,
            abstract_text: stored.abstract_text,
            extra: stored.extra,
            raw: RawNumbers {
                year: stored.year,
                citations: stored.citations,
            },
        }
    }
}

impl From<Publication> for StoredPublication {
    fn from(publication: Publication) -> Self {
        let year = match publication.raw.year {
            Some(raw) if parse_year(&raw) == publication.year => Some(raw),
            _ => publication.year.map(Value::from),
        };
        let citations = match publication.raw.citations {
            Some(raw) if parse_citations(&raw) == publication.citations => raw,
            _ => Value::from(publication.citations),
        };
        Self {
            title: publication.title,
            authors: publication.authors,
            venue: publication.venue,
            year,
            citations: Some(citations),
            url: publication.url,
            eprint_url: publication.eprint_url,
            abstract_text: publication.abstract_text,
            extra: publication.extra,
        }
    }
}

impl Publication {
    /// Creates a record with the given title, authors, venue and year.
    #[must_use]
    pub fn new(title: &str, authors: &str, venue: &str, year: i32) -> Self {
        Self {
            title: title.to_string(),
            authors: authors.to_string(),
            venue: venue.to_string(),
            year: Some(year),
            ..Self::default()
        }
    }

    /// Year used for grouping and display.
    #[must_use]
    pub fn effective_year(&self) -> i32 {
        self.year.unwrap_or(FALLBACK_YEAR)
    }

    /// Citation count with malformed negative values clamped to zero.
    #[must_use]
    pub fn citation_count(&self) -> u64 {
        u64::try_from(self.citations).unwrap_or(0)
    }

    /// Natural key used to de-duplicate merged records.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        self.title.trim().to_lowercase()
    }

    /// Abstract text, empty when absent.
    #[must_use]
    pub fn abstract_str(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Best available document link: e-print first, then the primary URL.
    #[must_use]
    pub fn document_url(&self) -> Option<&str> {
        non_empty(self.eprint_url.as_deref()).or_else(|| non_empty(self.url.as_deref()))
    }

    /// True when the venue is missing or the fetcher's placeholder.
    #[must_use]
    pub fn has_unknown_venue(&self) -> bool {
        let venue = self.venue.trim();
        venue.is_empty() || venue == UNKNOWN_VENUE
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Result of merging a fetched batch into the existing store.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Merged collection, newest year first.
    pub publications: Vec<Publication>,
    /// Number of fetched records that were new.
    pub added: usize,
}

/// Merges `fetched` into `existing`, skipping records whose title is already known.
///
/// Records with an empty title are never added. The merged list is stably
/// sorted by year, newest first.
#[must_use]
#[instrument(skip_all, fields(existing = existing.len(), fetched = fetched.len()))]
pub fn merge_publications(existing: Vec<Publication>, fetched: Vec<Publication>) -> MergeOutcome {
    let mut seen: HashSet<String> = existing.iter().map(Publication::dedup_key).collect();
    let mut merged = existing;
    let mut added = 0;

    for publication in fetched {
        let key = publication.dedup_key();
        if key.is_empty() {
            debug!("Skipping fetched publication without a title");
            continue;
        }
        if seen.insert(key) {
            merged.push(publication);
            added += 1;
        }
    }

    sort_newest_first(&mut merged);
    MergeOutcome {
        publications: merged,
        added,
    }
}

/// Stable sort by effective year, newest first.
pub fn sort_newest_first(publications: &mut [Publication]) {
    publications.sort_by(|a, b| b.effective_year().cmp(&a.effective_year()));
}
