use crate::config::PlatebookConfig;
use crate::model::PlateRecord;
use std::path::PathBuf;

pub mod add;
pub mod backup;
pub mod config;
pub mod delete;
pub mod edit;
pub mod filter;
pub mod init;
pub mod list;
pub mod update;

/// Where platebook keeps its files.
#[derive(Debug, Clone)]
pub struct PlatebookPaths {
    /// Directory holding `config.json`, logs and (by default) the database.
    pub data_dir: PathBuf,
    /// Resolved database file.
    pub database: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<PlateRecord>,
    pub listed_records: Vec<PlateRecord>,
    pub backup_path: Option<PathBuf>,
    pub config: Option<PlatebookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<PlateRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<PlateRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_backup_path(mut self, path: PathBuf) -> Self {
        self.backup_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: PlatebookConfig) -> Self {
        self.config = Some(config);
        self
    }
}
