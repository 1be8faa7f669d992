use crate::commands::{CmdMessage, CmdResult, PlatebookPaths};
use crate::error::Result;
use crate::store::RecordStore;
use std::fs;

/// Creates the data directory and the database schema.
///
/// Safe to run repeatedly: an existing database is left as is and reported
/// as connected.
pub fn run<S: RecordStore>(store: &mut S, paths: &PlatebookPaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.data_dir)?;

    let existed = store.exists();
    store.initialize()?;

    let mut result = CmdResult::default();
    if existed {
        result.add_message(CmdMessage::info(format!(
            "Database connected: {}",
            paths.database.display()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Initialized database at {}",
            paths.database.display()
        )));
    }
    Ok(result)
}
