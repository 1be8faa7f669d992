use crate::api::{PlatebookApi, PlatebookPaths};
use crate::config::PlatebookConfig;
use crate::error::{PlatebookError, Result};
use crate::store::sqlite::SqliteStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub struct PlatebookContext {
    pub api: PlatebookApi<SqliteStore>,
    pub config: PlatebookConfig,
}

/// Picks the data directory: the override when given (the CLI passes
/// `PLATEBOOK_HOME`), otherwise the platform data dir.
pub fn resolve_data_dir(home_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = home_override.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "platebook", "platebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PlatebookError::Config("Could not determine data directory".to_string()))
}

/// Loads the configuration from `data_dir` and wires a SQLite-backed API.
///
/// `database_override` wins over the configured `database-file`. Nothing is
/// created on disk here; the database file appears on first use.
pub fn initialize(data_dir: PathBuf, database_override: Option<PathBuf>) -> Result<PlatebookContext> {
    let config = PlatebookConfig::load(&data_dir)?;
    let database = database_override.unwrap_or_else(|| config.database_path(&data_dir));
    debug!(data_dir = %data_dir.display(), database = %database.display(), "context initialized");

    let store = SqliteStore::new(&database);
    let paths = PlatebookPaths { data_dir, database };
    let api = PlatebookApi::new(store, paths).with_sort(config.sort);

    Ok(PlatebookContext { api, config })
}
