use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Plate;
use crate::store::RecordStore;
use crate::validation::{validate_phone, validate_plate};

/// Replaces phone number and note on every record registered under `plate`.
pub fn run<S: RecordStore>(
    store: &mut S,
    plate: &Plate,
    phone_number: &str,
    note: &str,
) -> Result<CmdResult> {
    validate_plate(plate)?;
    let phone_number = phone_number.trim();
    validate_phone(phone_number)?;

    let changed = store.update(plate, phone_number, note.trim())?;
    let records = store.find_by_plate(plate)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {} ({} record{})",
        plate,
        changed,
        if changed == 1 { "" } else { "s" }
    )));
    Ok(result.with_affected_records(records))
}
