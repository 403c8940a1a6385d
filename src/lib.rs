//! Lab website content library
//!
//! This library maintains the generated parts of an academic lab website:
//! publication and news records kept as flat JSON files, and the HTML
//! fragments spliced into named regions of the site's `index.html`.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`model`] - Publication, news and scholar-profile records
//! - [`store`] - JSON loading and atomic file replacement
//! - [`topics`] - Topic taxonomy and publication classifier
//! - [`render`] - HTML fragments for publications, news and metrics
//! - [`splice`] - Marker-delimited region replacement in the template
//! - [`backup`] - Timestamped backup copies and restore
//! - [`validation`] - Data file and template checks
//! - [`site`] - Default file layout and region markers

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod model;
pub mod render;
pub mod site;
pub mod splice;
pub mod store;
pub mod topics;
pub mod validation;

// Re-export commonly used types
pub use backup::{BackupContext, BackupEntry, BackupError, BackupStore, RestoreOutcome};
pub use model::{NewsCategory, NewsDraft, NewsIcon, NewsItem, Publication, ScholarProfile};
pub use site::{MarkerSet, SitePaths};
pub use splice::{
    ApplyOutcome, BackupPolicy, RegionEdit, RegionSpec, SpliceError, TemplateDocument,
    TemplateError,
};
pub use store::StoreError;
pub use topics::{Classifier, TopicTaxonomy, VenueCategory};
pub use validation::{Severity, ValidationReport, Validator};
