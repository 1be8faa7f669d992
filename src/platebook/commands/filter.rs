//! Search.
//!
//! Two modes share the same pair of free-text inputs:
//! - **Plate**: `first` narrows `part1`, `second` narrows `part2`
//! - **Phone**: `first` narrows the phone number, `second` is ignored
//!
//! Each input narrows its column only when non-empty, by infix containment.
//! With nothing to narrow, a search returns the same records as a listing.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{normalize_part, RecordQuery, SearchMode, SortOrder};
use crate::store::RecordStore;

pub fn build_query(mode: SearchMode, first: &str, second: &str) -> RecordQuery {
    fn non_empty(value: String) -> Option<String> {
        (!value.is_empty()).then_some(value)
    }

    match mode {
        SearchMode::Phone => RecordQuery {
            phone: non_empty(first.trim().to_string()),
            ..Default::default()
        },
        SearchMode::Plate => RecordQuery {
            part1: non_empty(normalize_part(first)),
            part2: non_empty(normalize_part(second)),
            phone: None,
        },
    }
}

pub fn run<S: RecordStore>(
    store: &S,
    mode: SearchMode,
    first: &str,
    second: &str,
    sort: SortOrder,
) -> Result<CmdResult> {
    let query = build_query(mode, first, second);
    let mut records = if query.is_empty() {
        store.list()?
    } else {
        store.filter(&query)?
    };
    sort.sort(&mut records);
    Ok(CmdResult::default().with_listed_records(records))
}
