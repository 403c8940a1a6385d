//! Timestamped backup copies of mutated files.
//!
//! Backups live in one directory and are named
//! `{stem}_{context}_{YYYYMMDD_HHMMSS}.{ext}`; a second backup of the same
//! file and context within one second gets a `_2`, `_3`, ... suffix after
//! the timestamp.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Timestamp layout embedded in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors from backup creation, listing and restore.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("cannot back up '{path}': file does not exist")]
    SourceMissing { path: PathBuf },
    #[error("no backups of '{path}' found in '{dir}'")]
    NoBackups { path: PathBuf, dir: PathBuf },
    #[error("backup I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{path}' has no file name")]
    InvalidSource { path: PathBuf },
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}

/// Why a backup was taken; part of the backup file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackupContext {
    /// Before a region splice or store rewrite.
    Backup,
    /// Before a metrics-only splice.
    MetricsBackup,
    /// Explicit `labsite backup`.
    Manual,
    /// Current file before it is overwritten by a restore.
    PreRestore,
}

impl BackupContext {
    pub const ALL: [Self; 4] = [Self::Backup, Self::MetricsBackup, Self::Manual, Self::PreRestore];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::MetricsBackup => "metrics_backup",
            Self::Manual => "manual",
            Self::PreRestore => "pre_restore",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for BackupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One backup file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub context: BackupContext,
    pub timestamp: NaiveDateTime,
    /// Collision suffix; 1 when absent.
    pub sequence: u32,
}

/// Outcome of [`BackupStore::restore_latest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub restored_from: PathBuf,
    /// Copy of the file as it was before the restore, if it existed.
    pub safety_backup: Option<PathBuf>,
}

/// Directory holding backup copies.
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
}

impl BackupStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into the backup directory, stamped with the current
    /// local time.
    ///
    /// # Errors
    /// [`BackupError::SourceMissing`] when `source` does not exist, or an
    /// I/O error creating the directory or copying.
    pub fn create(&self, source: &Path, context: BackupContext) -> Result<PathBuf, BackupError> {
        self.create_at(source, context, Local::now().naive_local())
    }

    /// Like [`BackupStore::create`] with an explicit timestamp.
    ///
    /// # Errors
    /// See [`BackupStore::create`].
    #[instrument(skip(self), fields(source = %source.display(), context = %context))]
    pub fn create_at(
        &self,
        source: &Path,
        context: BackupContext,
        now: NaiveDateTime,
    ) -> Result<PathBuf, BackupError> {
        if !source.is_file() {
            return Err(BackupError::SourceMissing {
                path: source.to_path_buf(),
            });
        }
        let (stem, ext) = split_name(source)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut sequence = 1u32;
        let target = loop {
            let suffix = if sequence == 1 {
                String::new()
            } else {
                format!("_{sequence}")
            };
            let candidate = self
                .dir
                .join(format!("{stem}_{context}_{stamp}{suffix}{ext}"));
            if !candidate.exists() {
                break candidate;
            }
            sequence += 1;
        };

        fs::copy(source, &target).map_err(|e| io_error(&target, e))?;
        info!(backup = %target.display(), "Backup created");
        Ok(target)
    }

    /// Backups of `source`, newest first, optionally limited to one context.
    ///
    /// A missing backup directory yields an empty list.
    ///
    /// # Errors
    /// I/O error reading the directory.
    pub fn list(
        &self,
        source: &Path,
        context: Option<BackupContext>,
    ) -> Result<Vec<BackupEntry>, BackupError> {
        let (stem, ext) = split_name(source)?;
        let pattern = backup_name_pattern(&stem, &ext);

        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.dir, e)),
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| io_error(&self.dir, e))?;
            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(entry) = parse_backup_name(&pattern, name, dir_entry.path()) else {
                continue;
            };
            if context.is_none_or(|c| c == entry.context) {
                entries.push(entry);
            }
        }
        entries.sort_by(|a, b| (b.timestamp, b.sequence).cmp(&(a.timestamp, a.sequence)));
        debug!(count = entries.len(), "Listed backups");
        Ok(entries)
    }

    /// Newest backup of `source`, optionally limited to one context.
    ///
    /// # Errors
    /// I/O error reading the directory.
    pub fn latest(
        &self,
        source: &Path,
        context: Option<BackupContext>,
    ) -> Result<Option<BackupEntry>, BackupError> {
        Ok(self.list(source, context)?.into_iter().next())
    }

    /// Copies the newest backup of `target` over it.
    ///
    /// Snapshots taken by earlier restores are not candidates. The current
    /// file is itself backed up first with [`BackupContext::PreRestore`].
    ///
    /// # Errors
    /// [`BackupError::NoBackups`] when nothing can be restored, or an I/O
    /// error.
    #[instrument(skip(self), fields(target = %target.display()))]
    pub fn restore_latest(&self, target: &Path) -> Result<RestoreOutcome, BackupError> {
        let latest = self
            .list(target, None)?
            .into_iter()
            .find(|entry| entry.context != BackupContext::PreRestore)
            .ok_or_else(|| BackupError::NoBackups {
                path: target.to_path_buf(),
                dir: self.dir.clone(),
            })?;

        let safety_backup = if target.is_file() {
            Some(self.create(target, BackupContext::PreRestore)?)
        } else {
            None
        };

        let bytes = fs::read(&latest.path).map_err(|e| io_error(&latest.path, e))?;
        crate::store::write_atomic(target, &bytes)?;
        info!(from = %latest.path.display(), "Restored from backup");

        Ok(RestoreOutcome {
            restored_from: latest.path,
            safety_backup,
        })
    }
}

fn io_error(path: &Path, source: io::Error) -> BackupError {
    BackupError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// File stem and `.ext` (empty when the file has no extension).
fn split_name(path: &Path) -> Result<(String, String), BackupError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| BackupError::InvalidSource {
            path: path.to_path_buf(),
        })?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    Ok((stem.to_string(), ext))
}

fn backup_name_pattern(stem: &str, ext: &str) -> Regex {
    let contexts = BackupContext::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"^{}_({contexts})_(\d{{8}}_\d{{6}})(?:_(\d+))?{}$",
        regex::escape(stem),
        regex::escape(ext)
    );
    // Built from escaped literals and a fixed alternation.
    #[allow(clippy::expect_used)]
    Regex::new(&pattern).expect("backup name pattern is valid")
}

fn parse_backup_name(pattern: &Regex, name: &str, path: PathBuf) -> Option<BackupEntry> {
    let caps = pattern.captures(name)?;
    let context = BackupContext::from_name(caps.get(1)?.as_str())?;
    let timestamp =
        NaiveDateTime::parse_from_str(caps.get(2)?.as_str(), BACKUP_TIMESTAMP_FORMAT).ok()?;
    let sequence = match caps.get(3) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1,
    };
    Some(BackupEntry {
        path,
        context,
        timestamp,
        sequence,
    })
}
