//! Shared runtime context built after CLI and config resolution.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Datelike, Local};
use labsite_core::backup::{BackupContext, BackupStore};
use labsite_core::render::DEFAULT_FEATURED_LIMIT;
use labsite_core::splice::BackupPolicy;
use labsite_core::topics::{Classifier, TopicTaxonomy, VenueRules, load_taxonomy};
use labsite_core::{MarkerSet, SitePaths};

use crate::app_config::{FileConfig, LoadedConfig, VerbositySetting};
use crate::cli::Cli;

/// Effective settings for one run: CLI flags over config file over defaults.
#[derive(Debug, Clone)]
pub(crate) struct SiteContext {
    pub(crate) paths: SitePaths,
    pub(crate) markers: MarkerSet,
    pub(crate) backups_enabled: bool,
    pub(crate) featured_news_limit: usize,
    pub(crate) topics_file: Option<PathBuf>,
    pub(crate) verbosity: VerbositySetting,
    pub(crate) config: LoadedConfig,
    pub(crate) current_year: i32,
    backup_store: BackupStore,
}

impl SiteContext {
    pub(crate) fn resolve(cli: &Cli, root: &Path, config: LoadedConfig) -> Self {
        let file = config.config.clone().unwrap_or_default();
        let defaults = SitePaths::under(root);
        let pick = |value: Option<&PathBuf>, default: PathBuf| {
            value.map_or(default, |path| defaults.resolve(path))
        };

        let paths = SitePaths {
            index: pick(file.index.as_ref(), defaults.index.clone()),
            publications: pick(file.publications.as_ref(), defaults.publications.clone()),
            news: pick(file.news.as_ref(), defaults.news.clone()),
            profile: pick(file.profile.as_ref(), defaults.profile.clone()),
            backup_dir: pick(file.backup_dir.as_ref(), defaults.backup_dir.clone()),
            root: defaults.root.clone(),
        };
        let backup_store = BackupStore::new(paths.backup_dir.clone());

        Self {
            markers: file.markers.clone().unwrap_or_default(),
            backups_enabled: file.backups.unwrap_or(true),
            featured_news_limit: file.featured_news_limit.unwrap_or(DEFAULT_FEATURED_LIMIT),
            topics_file: file.topics_file.as_ref().map(|path| defaults.resolve(path)),
            verbosity: effective_verbosity(cli, &file),
            current_year: Local::now().year(),
            paths,
            config,
            backup_store,
        }
    }

    pub(crate) fn backup_store(&self) -> &BackupStore {
        &self.backup_store
    }

    /// Backup policy for a rewrite, or `None` when backups are off.
    pub(crate) fn backup_policy(
        &self,
        no_backup_flag: bool,
        context: BackupContext,
    ) -> Option<BackupPolicy<'_>> {
        (self.backups_enabled && !no_backup_flag).then_some(BackupPolicy {
            store: &self.backup_store,
            context,
        })
    }

    /// Classifier over the configured taxonomy, or the built-in one.
    pub(crate) fn classifier(&self) -> Result<Classifier> {
        let taxonomy = match &self.topics_file {
            Some(path) => load_taxonomy(path)?,
            None => TopicTaxonomy::default(),
        };
        Ok(Classifier::new(taxonomy, VenueRules::default()))
    }
}

fn effective_verbosity(cli: &Cli, file: &FileConfig) -> VerbositySetting {
    if cli.quiet {
        VerbositySetting::Quiet
    } else {
        match cli.verbose {
            0 => file.verbosity.unwrap_or(VerbositySetting::Default),
            1 => VerbositySetting::Verbose,
            _ => VerbositySetting::Debug,
        }
    }
}
