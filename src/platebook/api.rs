//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for platebook operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (plate text such as `ABC-1234` into [`Plate`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no I/O and no formatting.
//!
//! ## Generic Over RecordStore
//!
//! `PlatebookApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `PlatebookApi<SqliteStore>`
//! - Testing: `PlatebookApi<InMemoryStore>`

use crate::commands;
use crate::error::{PlatebookError, Result};
use crate::model::{Plate, RecordForm, RecordId, SearchMode, SortOrder};
use crate::store::RecordStore;

/// The main API facade for platebook operations.
pub struct PlatebookApi<S: RecordStore> {
    store: S,
    paths: commands::PlatebookPaths,
    sort: SortOrder,
}

impl<S: RecordStore> PlatebookApi<S> {
    pub fn new(store: S, paths: commands::PlatebookPaths) -> Self {
        Self {
            store,
            paths,
            sort: SortOrder::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn check_add(&self, form: &RecordForm) -> Result<AddCheck> {
        commands::add::check(&self.store, form)
    }

    pub fn add_record(
        &mut self,
        form: &RecordForm,
        confirm_soft_duplicate: bool,
    ) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, form, confirm_soft_duplicate)
    }

    pub fn edit_record(&mut self, id: RecordId, form: &RecordForm) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.store, id, form)
    }

    pub fn update_plate(
        &mut self,
        plate: &str,
        phone_number: &str,
        note: &str,
    ) -> Result<commands::CmdResult> {
        let plate = parse_plate(plate)?;
        commands::update::run(&mut self.store, &plate, phone_number, note)
    }

    pub fn preview_delete(&self, plate: &str) -> Result<Vec<crate::model::PlateRecord>> {
        let plate = parse_plate(plate)?;
        commands::delete::preview(&self.store, &plate)
    }

    pub fn delete_plate(&mut self, plate: &str) -> Result<commands::CmdResult> {
        let plate = parse_plate(plate)?;
        commands::delete::run(&mut self.store, &plate)
    }

    /// Lists every record. `sort` overrides the configured order.
    pub fn list_records(&self, sort: Option<SortOrder>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, sort.unwrap_or(self.sort))
    }

    pub fn search_records(
        &self,
        mode: SearchMode,
        first: &str,
        second: &str,
        sort: Option<SortOrder>,
    ) -> Result<commands::CmdResult> {
        commands::filter::run(&self.store, mode, first, second, sort.unwrap_or(self.sort))
    }

    pub fn backup(&self, format: BackupFormat, dest: &BackupTarget) -> Result<commands::CmdResult> {
        commands::backup::run(&self.store, format, dest)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store, &self.paths)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::PlatebookPaths {
        &self.paths
    }
}

fn parse_plate(input: &str) -> Result<Plate> {
    input.parse::<Plate>().map_err(PlatebookError::Api)
}

pub use crate::commands::add::AddCheck;
pub use crate::commands::backup::{BackupFormat, BackupTarget};
pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, PlatebookPaths};
