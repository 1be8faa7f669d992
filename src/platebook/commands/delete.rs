use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Plate, PlateRecord};
use crate::store::RecordStore;
use crate::validation::validate_plate;

/// Records that [`run`] would remove. Used by the CLI to confirm first.
pub fn preview<S: RecordStore>(store: &S, plate: &Plate) -> Result<Vec<PlateRecord>> {
    validate_plate(plate)?;
    store.find_by_plate(plate)
}

/// Removes every record registered under `plate`.
///
/// Does NOT prompt. The CLI calls [`preview`] and asks before calling this.
pub fn run<S: RecordStore>(store: &mut S, plate: &Plate) -> Result<CmdResult> {
    validate_plate(plate)?;
    let doomed = store.find_by_plate(plate)?;
    let removed = store.delete(plate)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {} ({} record{})",
        plate,
        removed,
        if removed == 1 { "" } else { "s" }
    )));
    Ok(result.with_affected_records(doomed))
}
