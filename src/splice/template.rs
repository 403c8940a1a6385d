//! The template document on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::error::TemplateError;
use super::{RegionSpec, splice};
use crate::backup::{BackupContext, BackupStore};
use crate::store::{StoreError, write_atomic};

/// Replacement content for one region.
#[derive(Debug, Clone)]
pub struct RegionEdit<'a> {
    pub spec: &'a RegionSpec,
    /// Rendered fragment, beginning with the region's start marker.
    pub fragment: String,
}

/// Where to keep a copy of the template before it is rewritten.
#[derive(Debug, Clone, Copy)]
pub struct BackupPolicy<'a> {
    pub store: &'a BackupStore,
    pub context: BackupContext,
}

/// Result of [`TemplateDocument::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// False when every region already held its fragment; nothing was written.
    pub changed: bool,
    pub backup: Option<PathBuf>,
    /// Names of the spliced regions, in application order.
    pub regions: Vec<String>,
}

/// HTML template with named regions, read fully into memory.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    path: PathBuf,
    text: String,
}

impl TemplateDocument {
    /// Reads the template.
    ///
    /// # Errors
    /// [`StoreError::Io`] if the file cannot be read.
    #[instrument(fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = text.len(), "Read template");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Splices every edit into a copy of the document, in order.
    ///
    /// # Errors
    /// The first [`TemplateError::Splice`] encountered; the document is not
    /// modified.
    pub fn render(&self, edits: &[RegionEdit<'_>]) -> Result<String, TemplateError> {
        let mut text = self.text.clone();
        for edit in edits {
            text = splice(&text, edit.spec, &edit.fragment)
                .map_err(|source| TemplateError::Splice {
                    path: self.path.clone(),
                    source,
                })?
                .text;
        }
        Ok(text)
    }

    /// Splices all edits and rewrites the file once.
    ///
    /// Every region is located before anything touches the disk, so a
    /// missing or duplicated marker leaves the file byte-identical. When a
    /// backup policy is given, the current file is copied immediately
    /// before the write.
    ///
    /// # Errors
    /// [`TemplateError`] on a splice, backup or write failure.
    #[instrument(skip(self, edits, backup), fields(path = %self.path.display(), regions = edits.len()))]
    pub fn apply(
        &mut self,
        edits: &[RegionEdit<'_>],
        backup: Option<BackupPolicy<'_>>,
    ) -> Result<ApplyOutcome, TemplateError> {
        let updated = self.render(edits)?;
        let regions = edits.iter().map(|e| e.spec.name.clone()).collect();

        if updated == self.text {
            info!("Template already up to date");
            return Ok(ApplyOutcome {
                changed: false,
                backup: None,
                regions,
            });
        }

        let backup = match backup {
            Some(policy) => Some(policy.store.create(&self.path, policy.context)?),
            None => None,
        };

        write_atomic(&self.path, updated.as_bytes())?;
        info!(bytes = updated.len(), "Template updated");
        self.text = updated;

        Ok(ApplyOutcome {
            changed: true,
            backup,
            regions,
        })
    }
}
