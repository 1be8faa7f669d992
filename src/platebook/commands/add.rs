//! Adding records, with the two-tier duplicate check.
//!
//! ```text
//! submitted ──invalid field──────────────────────────▶ rejected (error)
//!     │
//!     ├── same plate + same phone exists ────────────▶ rejected (HardDuplicate)
//!     │
//!     ├── same plate, other phone exists ──▶ needs confirmation
//!     │                                        ├── yes ▶ accepted (written)
//!     │                                        └── no  ▶ rejected-soft (nothing written)
//!     │
//!     └── otherwise ─────────────────────────────────▶ accepted (written)
//! ```
//!
//! The CLI calls [`check`] first so it can ask the user before calling [`run`].
//! `run` repeats the check, so it is safe to call on its own with a decision
//! made up front.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlatebookError, Result};
use crate::model::{NewRecord, PlateRecord, RecordForm};
use crate::store::RecordStore;
use crate::validation::validate_form;
use tracing::debug;

/// Outcome of the duplicate check for a valid, non-conflicting form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCheck {
    /// No record shares the plate.
    Clear,
    /// Records with the same plate but other phone numbers exist.
    NeedsConfirmation { existing: Vec<PlateRecord> },
}

/// Validates the form and classifies it against the store.
///
/// Returns `Err(Validation)` or `Err(HardDuplicate)` for the blocking cases.
pub fn check<S: RecordStore>(store: &S, form: &RecordForm) -> Result<AddCheck> {
    let record = validate_form(form)?;
    classify(store, &record)
}

fn classify<S: RecordStore>(store: &S, record: &NewRecord) -> Result<AddCheck> {
    let existing = store.find_by_plate(&record.plate)?;

    if existing.iter().any(|r| r.phone_number == record.phone_number) {
        debug!(plate = %record.plate, "hard duplicate");
        return Err(PlatebookError::HardDuplicate {
            plate: record.plate.clone(),
            phone: record.phone_number.clone(),
        });
    }

    if existing.is_empty() {
        Ok(AddCheck::Clear)
    } else {
        debug!(plate = %record.plate, count = existing.len(), "soft duplicate");
        Ok(AddCheck::NeedsConfirmation { existing })
    }
}

/// Adds a record.
///
/// `confirm_soft_duplicate` is the user's answer for the case where the plate
/// is already registered under another phone number. When it is `false` the
/// flow ends without writing and the result carries an info message.
pub fn run<S: RecordStore>(
    store: &mut S,
    form: &RecordForm,
    confirm_soft_duplicate: bool,
) -> Result<CmdResult> {
    let record = validate_form(form)?;
    let mut result = CmdResult::default();

    if let AddCheck::NeedsConfirmation { .. } = classify(store, &record)? {
        if !confirm_soft_duplicate {
            result.add_message(CmdMessage::info(format!(
                "Not saved: {} is already registered with another phone number.",
                record.plate
            )));
            return Ok(result);
        }
    }

    let created = store.create(&record)?;
    result.add_message(CmdMessage::success(format!(
        "Added {} {}",
        record.plate, record.phone_number
    )));
    Ok(result.with_affected_records(vec![created]))
}
