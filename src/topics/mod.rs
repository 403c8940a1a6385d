//! Topic and venue classification of publications.
//!
//! Topics come from an injected [`TopicTaxonomy`]; the default is the lab's
//! sixteen-topic table. A replacement can be loaded from a JSON file holding
//! an array of `{tag, label, icon, keywords}` objects.

mod classifier;
mod taxonomy;

pub use classifier::{Classification, Classifier, VenueCategory};
pub use taxonomy::{TaxonomyError, Topic, TopicTaxonomy, VenueRules};

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Loads a topic taxonomy from a JSON file.
///
/// # Errors
/// Returns error if the file cannot be read, is not a JSON topic array, or
/// fails [`TopicTaxonomy::new`] validation.
#[instrument(fields(path = %path.display()))]
pub fn load_taxonomy(path: &Path) -> Result<TopicTaxonomy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read topics file '{}'", path.display()))?;
    let topics: Vec<Topic> = serde_json::from_str(&content)
        .with_context(|| format!("Malformed topics file '{}'", path.display()))?;
    let taxonomy = TopicTaxonomy::new(topics)
        .with_context(|| format!("Invalid topics file '{}'", path.display()))?;
    debug!(topics = taxonomy.len(), "Loaded topic taxonomy");
    Ok(taxonomy)
}
