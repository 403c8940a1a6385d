//! Error types for region splicing.

use std::path::PathBuf;

use thiserror::Error;

use crate::backup::BackupError;
use crate::store::StoreError;

/// A region could not be located unambiguously.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpliceError {
    /// The region's start marker is absent from the document.
    #[error("{region} region: start marker {marker:?} not found")]
    MarkerNotFound { region: String, marker: String },
    /// None of the end candidates occurs after the start marker.
    #[error("{region} region: no end marker found after the start marker (tried {candidates:?})")]
    EndMarkerNotFound {
        region: String,
        candidates: Vec<String>,
    },
    /// A marker that must be unique occurs more than once.
    #[error("{region} region: marker {marker:?} occurs {count} times, expected exactly once")]
    DuplicateMarker {
        region: String,
        marker: String,
        count: usize,
    },
    /// The region definition itself is unusable.
    #[error("{region} region: {reason}")]
    InvalidRegion { region: String, reason: String },
}

impl SpliceError {
    /// Name of the region the error refers to.
    #[must_use]
    pub fn region(&self) -> &str {
        match self {
            Self::MarkerNotFound { region, .. }
            | Self::EndMarkerNotFound { region, .. }
            | Self::DuplicateMarker { region, .. }
            | Self::InvalidRegion { region, .. } => region,
        }
    }
}

/// Errors updating the template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{path}': {source}")]
    Splice {
        path: PathBuf,
        #[source]
        source: SpliceError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("backup before writing the template failed: {0}")]
    Backup(#[from] BackupError),
}
