//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use labsite_core::MarkerSet;
use serde::Deserialize;

/// Config file name looked up in the site root.
pub const SITE_CONFIG_FILE: &str = "labsite.toml";

/// TOML-backed file configuration for site defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Template path, relative to the site root.
    pub index: Option<PathBuf>,
    /// Publication store path.
    pub publications: Option<PathBuf>,
    /// News store path.
    pub news: Option<PathBuf>,
    /// Scholar-profile config path.
    pub profile: Option<PathBuf>,
    /// Directory receiving backup copies.
    pub backup_dir: Option<PathBuf>,
    /// Featured news items shown before the collapsible block.
    pub featured_news_limit: Option<usize>,
    /// Back up files before rewriting them.
    pub backups: Option<bool>,
    /// JSON topic taxonomy replacing the built-in one.
    pub topics_file: Option<PathBuf>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
    /// Region markers; omitted keys keep their defaults.
    pub markers: Option<MarkerSet>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.featured_news_limit
            && !(1..=50).contains(&limit)
        {
            bail!("Invalid config value for `featured_news_limit`: {limit}. Expected range: 1..=50");
        }

        for (field, value) in [
            ("index", &self.index),
            ("publications", &self.publications),
            ("news", &self.news),
            ("profile", &self.profile),
            ("backup_dir", &self.backup_dir),
            ("topics_file", &self.topics_file),
        ] {
            if value.as_ref().is_some_and(|path| path.as_os_str().is_empty()) {
                bail!("Invalid config value for `{field}`: path must not be empty");
            }
        }

        if let Some(markers) = &self.markers {
            for region in markers.regions() {
                if let Err(err) = region.validate() {
                    bail!("Invalid config value for `markers`: {err}");
                }
            }
        }

        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Log level used when neither `RUST_LOG` nor a CLI flag decides.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Resolved config path, if any location could be determined.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default user config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/labsite/config.toml`
/// 2. `$HOME/.config/labsite/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("labsite")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("labsite")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the site config.
///
/// An explicit path must exist. Otherwise `<root>/labsite.toml` is tried,
/// then the user config path; a missing file means defaults.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file '{}' does not exist", path.display());
        }
        return loaded(path.to_path_buf());
    }

    let site_config = root.join(SITE_CONFIG_FILE);
    if site_config.exists() {
        return loaded(site_config);
    }

    let path = resolve_default_config_path();
    match path {
        Some(path) if path.exists() => loaded(path),
        path => Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        }),
    }
}

fn loaded(path: PathBuf) -> Result<LoadedConfig> {
    let config = load_file_config(&path)?;
    Ok(LoadedConfig {
        path: Some(path),
        config: Some(config),
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let cfg: FileConfig = toml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}
