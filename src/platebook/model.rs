use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surrogate key assigned by the store on creation.
pub type RecordId = i64;

/// The two-segment plate number, always stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Plate {
    pub part1: String,
    pub part2: String,
}

impl Plate {
    pub fn new(part1: impl AsRef<str>, part2: impl AsRef<str>) -> Self {
        Self {
            part1: normalize_part(part1.as_ref()),
            part2: normalize_part(part2.as_ref()),
        }
    }
}

pub(crate) fn normalize_part(part: &str) -> String {
    part.trim().to_uppercase()
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.part1, self.part2)
    }
}

impl FromStr for Plate {
    type Err = String;

    /// Parses the displayed form, e.g. `ABC-1234`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (part1, part2) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid plate '{}', expected PART1-PART2", s))?;
        let plate = Plate::new(part1, part2);
        if plate.part1.is_empty() || plate.part2.is_empty() || plate.part2.contains('-') {
            return Err(format!("Invalid plate '{}', expected PART1-PART2", s));
        }
        Ok(plate)
    }
}

/// One row of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub id: RecordId,
    pub part1: String,
    pub part2: String,
    pub phone_number: String,
    #[serde(default)]
    pub note: String,
}

impl PlateRecord {
    pub fn plate(&self) -> Plate {
        Plate {
            part1: self.part1.clone(),
            part2: self.part2.clone(),
        }
    }

    pub fn same_plate(&self, plate: &Plate) -> bool {
        self.part1 == plate.part1 && self.part2 == plate.part2
    }

    pub fn same_key(&self, record: &NewRecord) -> bool {
        self.same_plate(&record.plate) && self.phone_number == record.phone_number
    }
}

/// Raw field values as submitted by a form or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub part1: String,
    pub part2: String,
    pub phone_number: String,
    pub note: String,
}

impl RecordForm {
    pub fn new(
        part1: impl Into<String>,
        part2: impl Into<String>,
        phone_number: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            part1: part1.into(),
            part2: part2.into(),
            phone_number: phone_number.into(),
            note: note.into(),
        }
    }
}

/// A validated, normalized record ready to be written.
///
/// Only [`crate::validation::validate_form`] builds these from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub plate: Plate,
    pub phone_number: String,
    pub note: String,
}

impl NewRecord {
    pub(crate) fn new(plate: Plate, phone_number: String, note: String) -> Self {
        Self {
            plate,
            phone_number,
            note,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Plate,
    Phone,
}

/// Substring constraints for a filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub part1: Option<String>,
    pub part2: Option<String>,
    pub phone: Option<String>,
}

impl RecordQuery {
    pub fn is_empty(&self) -> bool {
        self.part1.is_none() && self.part2.is_none() && self.phone.is_none()
    }

    /// Case-insensitive infix containment, the same semantics as `LIKE '%q%'`.
    pub fn matches(&self, record: &PlateRecord) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            match needle {
                Some(n) => haystack.to_uppercase().contains(&n.to_uppercase()),
                None => true,
            }
        }
        contains(&record.part1, &self.part1)
            && contains(&record.part2, &self.part2)
            && contains(&record.phone_number, &self.phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Id,
    #[default]
    Plate,
    Phone,
}

impl SortOrder {
    pub fn sort(self, records: &mut [PlateRecord]) {
        match self {
            SortOrder::Id => records.sort_by_key(|r| r.id),
            SortOrder::Plate => records.sort_by(|a, b| {
                (&a.part1, &a.part2, a.id).cmp(&(&b.part1, &b.part2, b.id))
            }),
            SortOrder::Phone => {
                records.sort_by(|a, b| (&a.phone_number, a.id).cmp(&(&b.phone_number, b.id)))
            }
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SortOrder::Id),
            "plate" => Ok(SortOrder::Plate),
            "phone" => Ok(SortOrder::Phone),
            other => Err(format!(
                "Unknown sort order '{}', expected id, plate or phone",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Id => "id",
            SortOrder::Plate => "plate",
            SortOrder::Phone => "phone",
        };
        f.write_str(name)
    }
}
