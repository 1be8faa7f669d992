use crate::error::{PlatebookError, Result};
use crate::model::SortOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATABASE_FILE: &str = "platebook.db";

/// Configuration for platebook, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PlatebookConfig {
    /// Database file. Relative paths resolve against the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Order used by `list` and `search`
    #[serde(default)]
    pub sort: SortOrder,

    /// Default directory for backups (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

impl Default for PlatebookConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            sort: SortOrder::default(),
            backup_dir: None,
        }
    }
}

impl PlatebookConfig {
    pub const KEYS: &'static [&'static str] = &["database-file", "sort", "backup-dir"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PlatebookConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Resolves the database file against the data directory.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        let file = Path::new(&self.database_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.join(file)
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "database-file" => Some(self.database_file.clone()),
            "sort" => Some(self.sort.to_string()),
            "backup-dir" => Some(
                self.backup_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "database-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(PlatebookError::Config(
                        "database-file cannot be empty".to_string(),
                    ));
                }
                self.database_file = value.to_string();
            }
            "sort" => {
                self.sort = value.parse().map_err(PlatebookError::Config)?;
            }
            "backup-dir" => {
                let value = value.trim();
                self.backup_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => {
                return Err(PlatebookError::Config(format!(
                    "Unknown config key: {} (known keys: {})",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
