//! Marker-delimited region replacement in a text document.
//!
//! The splicer has no notion of HTML structure: a region is the span from a
//! literal start marker up to the first of several literal end markers found
//! after it. Both markers must be unambiguous; a marker that occurs more than
//! once is reported instead of guessed at.

mod error;
mod template;

pub use error::{SpliceError, TemplateError};
pub use template::{ApplyOutcome, BackupPolicy, RegionEdit, TemplateDocument};

use std::ops::Range;

use serde::Serialize;

/// Default separator between a fragment and the text after the region.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// A named region and the markers that delimit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSpec {
    pub name: String,
    pub start: String,
    /// End markers in priority order; the first one found is used.
    pub end_candidates: Vec<String>,
    /// Replace the end marker too, instead of keeping it in the suffix.
    pub consume_end: bool,
    /// Inserted between the fragment and the suffix.
    pub separator: String,
}

impl RegionSpec {
    #[must_use]
    pub fn new(name: &str, start: &str, end_candidates: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            start: start.to_string(),
            end_candidates,
            consume_end: false,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        self.separator = separator.to_string();
        self
    }

    #[must_use]
    pub fn consuming_end(mut self) -> Self {
        self.consume_end = true;
        self
    }

    /// Checks that markers are non-empty and distinct from the start marker.
    ///
    /// # Errors
    /// [`SpliceError::InvalidRegion`] describing the first problem.
    pub fn validate(&self) -> Result<(), SpliceError> {
        let invalid = |reason: &str| SpliceError::InvalidRegion {
            region: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.start.is_empty() {
            return Err(invalid("start marker is empty"));
        }
        if self.end_candidates.is_empty() {
            return Err(invalid("no end marker configured"));
        }
        if self.end_candidates.iter().any(String::is_empty) {
            return Err(invalid("end marker is empty"));
        }
        if self.end_candidates.iter().any(|end| *end == self.start) {
            return Err(invalid("end marker equals the start marker"));
        }
        Ok(())
    }
}

/// Byte offsets of a located region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Offset of the start marker.
    pub start: usize,
    /// Offset where the preserved suffix begins.
    pub end: usize,
    /// Index into [`RegionSpec::end_candidates`] of the marker used.
    pub end_marker: usize,
}

/// Locates `spec` in `document`.
///
/// # Errors
/// * [`SpliceError::MarkerNotFound`] if the start marker is absent.
/// * [`SpliceError::DuplicateMarker`] if the start marker occurs more than
///   once, or the chosen end marker occurs more than once after it.
/// * [`SpliceError::EndMarkerNotFound`] if no end candidate follows the start.
pub fn locate(document: &str, spec: &RegionSpec) -> Result<Region, SpliceError> {
    spec.validate()?;

    let start = document
        .find(&spec.start)
        .ok_or_else(|| SpliceError::MarkerNotFound {
            region: spec.name.clone(),
            marker: spec.start.clone(),
        })?;
    let start_count = document.matches(spec.start.as_str()).count();
    if start_count > 1 {
        return Err(SpliceError::DuplicateMarker {
            region: spec.name.clone(),
            marker: spec.start.clone(),
            count: start_count,
        });
    }

    let search_from = start + spec.start.len();
    let after_start = &document[search_from..];
    for (index, candidate) in spec.end_candidates.iter().enumerate() {
        let Some(offset) = after_start.find(candidate.as_str()) else {
            continue;
        };
        let count = after_start.matches(candidate.as_str()).count();
        if count > 1 {
            return Err(SpliceError::DuplicateMarker {
                region: spec.name.clone(),
                marker: candidate.clone(),
                count,
            });
        }
        let mut end = search_from + offset;
        if spec.consume_end {
            end += candidate.len();
        }
        return Ok(Region {
            start,
            end,
            end_marker: index,
        });
    }

    Err(SpliceError::EndMarkerNotFound {
        region: spec.name.clone(),
        candidates: spec.end_candidates.clone(),
    })
}

/// Document text after a splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub text: String,
    /// Byte range of the inserted fragment within `text`.
    pub fragment_range: Range<usize>,
}

/// Replaces the region `spec` of `document` with `fragment`.
///
/// The result is the text before the start marker, the fragment, the
/// separator, then the text from the end marker on (or from just after it
/// when the spec consumes the end marker).
///
/// # Errors
/// Any [`locate`] error; no text is produced in that case.
pub fn splice(document: &str, spec: &RegionSpec, fragment: &str) -> Result<Spliced, SpliceError> {
    let region = locate(document, spec)?;
    let prefix = &document[..region.start];
    let suffix = &document[region.end..];

    let mut text =
        String::with_capacity(prefix.len() + fragment.len() + spec.separator.len() + suffix.len());
    text.push_str(prefix);
    text.push_str(fragment);
    let fragment_range = prefix.len()..text.len();
    text.push_str(&spec.separator);
    text.push_str(suffix);

    Ok(Spliced {
        text,
        fragment_range,
    })
}
