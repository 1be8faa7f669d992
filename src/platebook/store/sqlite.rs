use super::RecordStore;
use crate::error::{PlatebookError, Result};
use crate::model::{NewRecord, Plate, PlateRecord, RecordId, RecordQuery};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS plate_info (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        part1 TEXT NOT NULL,
        part2 TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        note TEXT,
        UNIQUE(part1, part2, phone_number)
    );
"#;

const SELECT_COLUMNS: &str = "SELECT id, part1, part2, phone_number, note FROM plate_info";

/// Single-file SQLite storage.
///
/// Holds only the database path. Every operation opens its own connection,
/// makes sure the schema is there, and closes the connection on return.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    error!(path = %parent.display(), error = %e, "cannot create database directory");
                    PlatebookError::Io(e)
                })?;
            }
        }
        let conn = Connection::open(&self.path).map_err(|e| storage_error("open", e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| storage_error("schema", e))?;
        Ok(conn)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PlateRecord> {
    Ok(PlateRecord {
        id: row.get(0)?,
        part1: row.get(1)?,
        part2: row.get(2)?,
        phone_number: row.get(3)?,
        note: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Converts a SQLite failure into a typed error, logging it once.
fn storage_error(op: &str, err: rusqlite::Error) -> PlatebookError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, ref msg)
            if e.code == ErrorCode::ConstraintViolation =>
        {
            let detail = msg.clone().unwrap_or_else(|| e.to_string());
            warn!(op, %detail, "uniqueness constraint violated");
            PlatebookError::Conflict(detail)
        }
        err => {
            error!(op, error = %err, "storage operation failed");
            PlatebookError::Storage(err)
        }
    }
}

/// Escapes `LIKE` wildcards so user input only ever matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    op: &str,
    sql: &str,
    params: P,
) -> Result<Vec<PlateRecord>> {
    let mut stmt = conn.prepare(sql).map_err(|e| storage_error(op, e))?;
    let rows = stmt
        .query_map(params, row_to_record)
        .map_err(|e| storage_error(op, e))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| storage_error(op, e))
}

impl RecordStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        self.connect()?;
        info!(path = %self.path.display(), "database initialized");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create(&mut self, record: &NewRecord) -> Result<PlateRecord> {
        let conn = self.connect()?;
        let note = (!record.note.is_empty()).then_some(record.note.as_str());
        conn.execute(
            "INSERT INTO plate_info (part1, part2, phone_number, note) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.plate.part1,
                record.plate.part2,
                record.phone_number,
                note
            ],
        )
        .map_err(|e| storage_error("create", e))?;

        let id = conn.last_insert_rowid();
        info!(id, plate = %record.plate, "added plate info");
        Ok(PlateRecord {
            id,
            part1: record.plate.part1.clone(),
            part2: record.plate.part2.clone(),
            phone_number: record.phone_number.clone(),
            note: record.note.clone(),
        })
    }

    fn list(&self) -> Result<Vec<PlateRecord>> {
        let conn = self.connect()?;
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        query_records(&conn, "list", &sql, params![])
    }

    fn get(&self, id: RecordId) -> Result<PlateRecord> {
        let conn = self.connect()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        conn.query_row(&sql, params![id], row_to_record)
            .optional()
            .map_err(|e| storage_error("get", e))?
            .ok_or_else(|| {
                warn!(id, "record not found");
                PlatebookError::RecordNotFound(id)
            })
    }

    fn find_by_plate(&self, plate: &Plate) -> Result<Vec<PlateRecord>> {
        let conn = self.connect()?;
        let sql = format!(
            "{} WHERE part1 = ?1 AND part2 = ?2 ORDER BY id",
            SELECT_COLUMNS
        );
        query_records(
            &conn,
            "find_by_plate",
            &sql,
            params![plate.part1, plate.part2],
        )
    }

    fn update(&mut self, plate: &Plate, phone_number: &str, note: &str) -> Result<usize> {
        let conn = self.connect()?;
        let note = (!note.is_empty()).then_some(note);
        let changed = conn
            .execute(
                "UPDATE plate_info SET phone_number = ?1, note = ?2 WHERE part1 = ?3 AND part2 = ?4",
                params![phone_number, note, plate.part1, plate.part2],
            )
            .map_err(|e| storage_error("update", e))?;

        if changed == 0 {
            warn!(%plate, "plate info not found");
            return Err(PlatebookError::NotFound(plate.clone()));
        }
        info!(%plate, changed, "updated plate info");
        Ok(changed)
    }

    fn replace(&mut self, id: RecordId, record: &NewRecord) -> Result<PlateRecord> {
        let conn = self.connect()?;
        let note = (!record.note.is_empty()).then_some(record.note.as_str());
        let changed = conn
            .execute(
                "UPDATE plate_info SET part1 = ?1, part2 = ?2, phone_number = ?3, note = ?4 WHERE id = ?5",
                params![
                    record.plate.part1,
                    record.plate.part2,
                    record.phone_number,
                    note,
                    id
                ],
            )
            .map_err(|e| storage_error("replace", e))?;

        if changed == 0 {
            warn!(id, "record not found");
            return Err(PlatebookError::RecordNotFound(id));
        }
        info!(id, plate = %record.plate, "replaced plate info");
        Ok(PlateRecord {
            id,
            part1: record.plate.part1.clone(),
            part2: record.plate.part2.clone(),
            phone_number: record.phone_number.clone(),
            note: record.note.clone(),
        })
    }

    fn delete(&mut self, plate: &Plate) -> Result<usize> {
        let conn = self.connect()?;
        let removed = conn
            .execute(
                "DELETE FROM plate_info WHERE part1 = ?1 AND part2 = ?2",
                params![plate.part1, plate.part2],
            )
            .map_err(|e| storage_error("delete", e))?;

        if removed == 0 {
            warn!(%plate, "plate info not found");
            return Err(PlatebookError::NotFound(plate.clone()));
        }
        info!(%plate, removed, "deleted plate info");
        Ok(removed)
    }

    fn filter(&self, query: &RecordQuery) -> Result<Vec<PlateRecord>> {
        let mut clauses = Vec::new();
        let mut values = Vec::new();
        for (column, needle) in [
            ("part1", &query.part1),
            ("part2", &query.part2),
            ("phone_number", &query.phone),
        ] {
            if let Some(needle) = needle {
                values.push(like_pattern(needle));
                clauses.push(format!("{} LIKE ?{} ESCAPE '\\'", column, values.len()));
            }
        }

        let sql = if clauses.is_empty() {
            format!("{} ORDER BY id", SELECT_COLUMNS)
        } else {
            format!(
                "{} WHERE {} ORDER BY id",
                SELECT_COLUMNS,
                clauses.join(" AND ")
            )
        };
        debug!(%sql, ?values, "filter query");

        let conn = self.connect()?;
        query_records(&conn, "filter", &sql, params_from_iter(values.iter()))
    }

    fn file_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordForm;
    use crate::validation::validate_form;
    use tempfile::TempDir;

    fn new_record(part1: &str, part2: &str, phone: &str, note: &str) -> NewRecord {
        validate_form(&RecordForm::new(part1, part2, phone, note)).unwrap()
    }

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::new(dir.path().join("platebook.db"));
        (dir, store)
    }

    #[test]
    fn initialize_creates_database_file() {
        let (_dir, mut store) = temp_store();
        assert!(!store.exists());
        store.initialize().unwrap();
        assert!(store.exists());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn initialize_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = SqliteStore::new(dir.path().join("nested").join("data.db"));
        store.initialize().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn create_and_list() {
        let (_dir, mut store) = temp_store();
        let created = store
            .create(&new_record("abc", "1234", "0912345678", "hello"))
            .unwrap();
        assert_eq!(created.part1, "ABC");

        let all = store.list().unwrap();
        assert_eq!(all, vec![created]);
    }

    #[test]
    fn duplicate_key_is_conflict_and_keeps_original() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABC", "1234", "0912345678", "")).unwrap();
        let err = store
            .create(&new_record("ABC", "1234", "0912345678", "x"))
            .unwrap_err();
        assert!(matches!(err, PlatebookError::Conflict(_)), "{err:?}");

        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].note, "");
    }

    #[test]
    fn same_plate_different_phone_is_allowed() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABC", "1234", "0912345678", "")).unwrap();
        store.create(&new_record("ABC", "1234", "0987654321", "")).unwrap();

        let rows = store.find_by_plate(&Plate::new("abc", "1234")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].phone_number, rows[1].phone_number);
    }

    #[test]
    fn update_changes_only_phone_and_note() {
        let (_dir, mut store) = temp_store();
        let before = store.create(&new_record("ABC", "1234", "0912345678", "old")).unwrap();

        let changed = store
            .update(&Plate::new("abc", "1234"), "0987654321", "new")
            .unwrap();
        assert_eq!(changed, 1);

        let after = store.get(before.id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.plate(), before.plate());
        assert_eq!(after.phone_number, "0987654321");
        assert_eq!(after.note, "new");
    }

    #[test]
    fn update_missing_plate_is_not_found() {
        let (_dir, mut store) = temp_store();
        let err = store.update(&Plate::new("NO", "PE"), "1", "").unwrap_err();
        assert!(matches!(err, PlatebookError::NotFound(_)));
    }

    #[test]
    fn update_to_clashing_key_is_conflict() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABC", "1234", "1", "")).unwrap();
        store.create(&new_record("ABC", "1234", "2", "")).unwrap();
        let err = store.update(&Plate::new("ABC", "1234"), "3", "").unwrap_err();
        assert!(matches!(err, PlatebookError::Conflict(_)));

        let phones: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.phone_number)
            .collect();
        assert_eq!(phones, vec!["1", "2"]);
    }

    #[test]
    fn replace_rewrites_in_place() {
        let (_dir, mut store) = temp_store();
        let original = store.create(&new_record("ABC", "1234", "1", "")).unwrap();
        let replaced = store
            .replace(original.id, &new_record("XYZ", "9", "2", "moved"))
            .unwrap();
        assert_eq!(replaced.id, original.id);

        let all = store.list().unwrap();
        assert_eq!(all, vec![replaced]);
    }

    #[test]
    fn replace_missing_id_is_record_not_found() {
        let (_dir, mut store) = temp_store();
        let err = store.replace(42, &new_record("A", "B", "1", "")).unwrap_err();
        assert!(matches!(err, PlatebookError::RecordNotFound(42)));
    }

    #[test]
    fn delete_removes_every_row_with_plate() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABC", "1234", "1", "")).unwrap();
        store.create(&new_record("ABC", "1234", "2", "")).unwrap();
        store.create(&new_record("ABC", "5678", "1", "")).unwrap();

        assert_eq!(store.delete(&Plate::new("ABC", "1234")).unwrap(), 2);

        let query = RecordQuery {
            part1: Some("ABC".into()),
            part2: Some("1234".into()),
            phone: None,
        };
        assert!(store.filter(&query).unwrap().is_empty());
        assert_eq!(store.list().unwrap().len(), 1);

        let err = store.delete(&Plate::new("ABC", "1234")).unwrap_err();
        assert!(matches!(err, PlatebookError::NotFound(_)));
    }

    #[test]
    fn filter_is_infix_and_case_insensitive() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABCD", "1234", "0912345678", "")).unwrap();
        store.create(&new_record("XYAB", "1234", "0987654321", "")).unwrap();
        store.create(&new_record("QQQ", "1234", "0911111111", "")).unwrap();

        let query = RecordQuery {
            part1: Some("ab".into()),
            ..Default::default()
        };
        let parts: Vec<_> = store
            .filter(&query)
            .unwrap()
            .into_iter()
            .map(|r| r.part1)
            .collect();
        assert_eq!(parts, vec!["ABCD", "XYAB"]);

        let query = RecordQuery {
            phone: Some("4321".into()),
            ..Default::default()
        };
        assert_eq!(store.filter(&query).unwrap().len(), 1);
    }

    #[test]
    fn filter_treats_wildcards_literally() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABCD", "1234", "0912345678", "")).unwrap();

        let query = RecordQuery {
            part1: Some("%".into()),
            ..Default::default()
        };
        assert!(store.filter(&query).unwrap().is_empty());

        let query = RecordQuery {
            part1: Some("A_C".into()),
            ..Default::default()
        };
        assert!(store.filter(&query).unwrap().is_empty());
    }

    #[test]
    fn empty_filter_equals_list() {
        let (_dir, mut store) = temp_store();
        store.create(&new_record("ABCD", "1234", "0912345678", "")).unwrap();
        store.create(&new_record("XYAB", "1234", "0987654321", "")).unwrap();

        assert_eq!(
            store.filter(&RecordQuery::default()).unwrap(),
            store.list().unwrap()
        );
    }

    #[test]
    fn empty_note_reads_back_as_empty_string() {
        let (_dir, mut store) = temp_store();
        let created = store.create(&new_record("ABC", "1", "1", "")).unwrap();
        assert_eq!(store.get(created.id).unwrap().note, "");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("AB"), "%AB%");
        assert_eq!(like_pattern("5%_\\"), "%5\\%\\_\\\\%");
    }

    #[test]
    fn unreadable_database_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.db");
        fs::write(&path, b"this is definitely not a sqlite database file, not at all").unwrap();
        let store = SqliteStore::new(&path);
        let err = store.list().unwrap_err();
        assert!(matches!(err, PlatebookError::Storage(_)), "{err:?}");
    }
}
