//! # Storage Layer
//!
//! This module defines the storage abstraction for platebook. The [`RecordStore`]
//! trait allows the application to work with different storage backends.
//!
//! ## Implementations
//!
//! - [`sqlite::SqliteStore`]: Production single-file SQLite storage
//!   - One `plate_info` table, unique on `(part1, part2, phone_number)`
//!   - A connection is opened per operation and dropped when it returns
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Enforces the same uniqueness constraint
//!
//! ## Error Contract
//!
//! Stores never collapse failures into booleans. Every operation returns a
//! `Result` whose `PlatebookError` tells apart:
//! - `NotFound` / `RecordNotFound`: nothing matched
//! - `Conflict`: the uniqueness constraint rejected the write
//! - `Storage` / `Io`: the backend failed
//!
//! Each failure is logged once, at the store boundary.
//!
//! ## Storage Format
//!
//! ```text
//! plate_info
//! ├── id            INTEGER PRIMARY KEY AUTOINCREMENT
//! ├── part1         TEXT NOT NULL
//! ├── part2         TEXT NOT NULL
//! ├── phone_number  TEXT NOT NULL
//! └── note          TEXT
//! UNIQUE(part1, part2, phone_number)
//! ```

use crate::error::Result;
use crate::model::{NewRecord, Plate, PlateRecord, RecordId, RecordQuery};
use std::path::Path;

pub mod memory;
pub mod sqlite;

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Create the schema if needed.
    fn initialize(&mut self) -> Result<()>;

    /// Whether the backing storage already exists.
    fn exists(&self) -> bool;

    /// Insert a new record. Fails with `Conflict` if the
    /// `(part1, part2, phone_number)` key is taken.
    fn create(&mut self, record: &NewRecord) -> Result<PlateRecord>;

    /// Every record, in insertion order.
    fn list(&self) -> Result<Vec<PlateRecord>>;

    /// Get a record by id.
    fn get(&self, id: RecordId) -> Result<PlateRecord>;

    /// Records whose plate matches exactly.
    fn find_by_plate(&self, plate: &Plate) -> Result<Vec<PlateRecord>>;

    /// Replace phone number and note on every record with this plate.
    /// Returns the number of records changed.
    fn update(&mut self, plate: &Plate, phone_number: &str, note: &str) -> Result<usize>;

    /// Rewrite all fields of one record, keeping its id.
    fn replace(&mut self, id: RecordId, record: &NewRecord) -> Result<PlateRecord>;

    /// Delete every record with this plate. Returns the number removed.
    fn delete(&mut self, plate: &Plate) -> Result<usize>;

    /// Records matching all present substring constraints.
    fn filter(&self, query: &RecordQuery) -> Result<Vec<PlateRecord>>;

    /// Location of the backing file, for file-based stores.
    fn file_path(&self) -> Option<&Path> {
        None
    }
}
