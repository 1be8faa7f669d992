//! Backups.
//!
//! - `Json`: a logical dump of every record plus the export time
//! - `Database`: a byte-for-byte copy of the SQLite file
//!
//! A [`BackupTarget::Directory`] is created when missing and receives a file
//! named `<YYYYMMDD>_backup_database.<ext>`. A [`BackupTarget::Path`] is
//! treated the same way when it is an existing directory or ends in a path
//! separator, and is used as the file name otherwise.
//!
//! No backup ever overwrites the database it reads from.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlatebookError, Result};
use crate::model::{PlateRecord, SortOrder};
use crate::store::RecordStore;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupFormat {
    #[default]
    Json,
    Database,
}

impl BackupFormat {
    pub fn extension(self) -> &'static str {
        match self {
            BackupFormat::Json => "json",
            BackupFormat::Database => "db",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDump {
    pub exported_at: DateTime<Utc>,
    pub records: Vec<PlateRecord>,
}

pub fn default_file_name(format: BackupFormat, date: NaiveDate) -> String {
    format!(
        "{}_backup_database.{}",
        date.format("%Y%m%d"),
        format.extension()
    )
}

/// Where a backup goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupTarget {
    /// A file, or a directory when it already is one or ends in a separator.
    Path(PathBuf),
    /// Always a directory, created when missing.
    Directory(PathBuf),
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator)
}

fn resolve_destination(format: BackupFormat, target: &BackupTarget) -> Result<PathBuf> {
    let dir = match target {
        BackupTarget::Directory(dir) => dir,
        BackupTarget::Path(path) if path.is_dir() || ends_with_separator(path) => path,
        BackupTarget::Path(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            return Ok(path.clone());
        }
    };
    fs::create_dir_all(dir)?;
    Ok(dir.join(default_file_name(format, Local::now().date_naive())))
}

fn same_file(a: &Path, b: &Path) -> Result<bool> {
    if !a.exists() || !b.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

pub fn run<S: RecordStore>(
    store: &S,
    format: BackupFormat,
    dest: &BackupTarget,
) -> Result<CmdResult> {
    let target = resolve_destination(format, dest)?;
    if let Some(database) = store.file_path() {
        if same_file(database, &target)? {
            warn!(path = %target.display(), "backup target is the database itself");
            return Err(PlatebookError::Api(format!(
                "Backup target is the database itself: {}",
                target.display()
            )));
        }
    }
    let mut result = CmdResult::default();

    let count = match format {
        BackupFormat::Json => {
            let mut records = store.list()?;
            SortOrder::Id.sort(&mut records);
            let dump = BackupDump {
                exported_at: Utc::now(),
                records,
            };
            if dump.records.is_empty() {
                result.add_message(CmdMessage::warning("The registry is empty."));
            }
            fs::write(&target, serde_json::to_string_pretty(&dump)?)?;
            Some(dump.records.len())
        }
        BackupFormat::Database => {
            let source = store.file_path().ok_or_else(|| {
                PlatebookError::Api("This store has no database file to copy".to_string())
            })?;
            if !store.exists() {
                return Err(PlatebookError::Api(format!(
                    "Database does not exist: {}",
                    source.display()
                )));
            }
            fs::copy(source, &target)?;
            None
        }
    };

    info!(path = %target.display(), ?format, "backup written");
    let message = match count {
        Some(n) => format!("Backed up {} records to {}", n, target.display()),
        None => format!("Backed up database to {}", target.display()),
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_backup_path(target))
}
