use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PlatebookError, Result};
use crate::model::{RecordForm, RecordId};
use crate::store::RecordStore;
use crate::validation::validate_form;
use tracing::debug;

/// Edits the record `id` in place with the submitted form.
///
/// Blocks when a record with the same plate, phone number *and* note already
/// exists (this includes submitting the record unchanged). Otherwise all four
/// fields of the target row are rewritten and its id is kept, so changing the
/// plate moves the record rather than creating a new one. Taking over the
/// `(plate, phone)` key of a different record fails with `Conflict`.
pub fn run<S: RecordStore>(store: &mut S, id: RecordId, form: &RecordForm) -> Result<CmdResult> {
    let record = validate_form(form)?;
    let before = store.get(id)?;

    let identical = store
        .find_by_plate(&record.plate)?
        .into_iter()
        .any(|r| r.phone_number == record.phone_number && r.note == record.note);
    if identical {
        debug!(id, plate = %record.plate, "edit matches an existing record");
        return Err(PlatebookError::HardDuplicate {
            plate: record.plate,
            phone: record.phone_number,
        });
    }

    let after = store.replace(id, &record)?;

    let mut result = CmdResult::default();
    if before.plate() != after.plate() {
        result.add_message(CmdMessage::success(format!(
            "Updated #{}: {} -> {} {}",
            id,
            before.plate(),
            after.plate(),
            after.phone_number
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Updated #{}: {} {}",
            id,
            after.plate(),
            after.phone_number
        )));
    }
    Ok(result.with_affected_records(vec![after]))
}
