use super::RecordStore;
use crate::error::{PlatebookError, Result};
use crate::model::{NewRecord, Plate, PlateRecord, RecordId, RecordQuery};
use tracing::warn;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<PlateRecord>,
    last_id: RecordId,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_taken(&self, record: &NewRecord, except: Option<RecordId>) -> bool {
        self.records
            .iter()
            .any(|r| Some(r.id) != except && r.same_key(record))
    }

    fn conflict(plate: &Plate, phone: &str) -> PlatebookError {
        warn!(%plate, phone, "uniqueness constraint violated");
        PlatebookError::Conflict(format!("{} {}", plate, phone))
    }
}

impl RecordStore for InMemoryStore {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn exists(&self) -> bool {
        true
    }

    fn create(&mut self, record: &NewRecord) -> Result<PlateRecord> {
        if self.key_taken(record, None) {
            return Err(Self::conflict(&record.plate, &record.phone_number));
        }
        self.last_id += 1;
        let created = PlateRecord {
            id: self.last_id,
            part1: record.plate.part1.clone(),
            part2: record.plate.part2.clone(),
            phone_number: record.phone_number.clone(),
            note: record.note.clone(),
        };
        self.records.push(created.clone());
        Ok(created)
    }

    fn list(&self) -> Result<Vec<PlateRecord>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: RecordId) -> Result<PlateRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                warn!(id, "record not found");
                PlatebookError::RecordNotFound(id)
            })
    }

    fn find_by_plate(&self, plate: &Plate) -> Result<Vec<PlateRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.same_plate(plate))
            .cloned()
            .collect())
    }

    fn update(&mut self, plate: &Plate, phone_number: &str, note: &str) -> Result<usize> {
        let targets: Vec<RecordId> = self
            .records
            .iter()
            .filter(|r| r.same_plate(plate))
            .map(|r| r.id)
            .collect();
        if targets.is_empty() {
            warn!(%plate, "update matched no records");
            return Err(PlatebookError::NotFound(plate.clone()));
        }

        // Every matching row ends up with the same key.
        if targets.len() > 1 {
            return Err(Self::conflict(plate, phone_number));
        }

        for record in self.records.iter_mut().filter(|r| targets.contains(&r.id)) {
            record.phone_number = phone_number.to_string();
            record.note = note.to_string();
        }
        Ok(targets.len())
    }

    fn replace(&mut self, id: RecordId, record: &NewRecord) -> Result<PlateRecord> {
        if !self.records.iter().any(|r| r.id == id) {
            warn!(id, "replace matched no record");
            return Err(PlatebookError::RecordNotFound(id));
        }
        if self.key_taken(record, Some(id)) {
            return Err(Self::conflict(&record.plate, &record.phone_number));
        }
        let target = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(PlatebookError::RecordNotFound(id))?;
        target.part1 = record.plate.part1.clone();
        target.part2 = record.plate.part2.clone();
        target.phone_number = record.phone_number.clone();
        target.note = record.note.clone();
        Ok(target.clone())
    }

    fn delete(&mut self, plate: &Plate) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| !r.same_plate(plate));
        let removed = before - self.records.len();
        if removed == 0 {
            warn!(%plate, "delete matched no records");
            return Err(PlatebookError::NotFound(plate.clone()));
        }
        Ok(removed)
    }

    fn filter(&self, query: &RecordQuery) -> Result<Vec<PlateRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::RecordForm;
    use crate::validation::validate_form;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_record(mut self, part1: &str, part2: &str, phone: &str, note: &str) -> Self {
            let record = validate_form(&RecordForm::new(part1, part2, phone, note)).unwrap();
            self.store.create(&record).unwrap();
            self
        }

        /// Adds `count` records, two phone numbers per plate.
        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let part1 = format!("P{}", (i / 2) % 1000);
                let phone = format!("09{:08}", i);
                let record =
                    validate_form(&RecordForm::new(part1, "TEST", phone, format!("note {}", i)))
                        .unwrap();
                self.store.create(&record).unwrap();
            }
            self
        }
    }
}
