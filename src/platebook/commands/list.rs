use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::SortOrder;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S, sort: SortOrder) -> Result<CmdResult> {
    let mut records = store.list()?;
    sort.sort(&mut records);
    Ok(CmdResult::default().with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_everything_sorted_by_plate() {
        let store = StoreFixture::new()
            .with_record("XYZ", "1", "1", "")
            .with_record("ABC", "2", "2", "")
            .with_record("ABC", "1", "3", "")
            .store;

        let result = run(&store, SortOrder::Plate).unwrap();
        let plates: Vec<String> = result
            .listed_records
            .iter()
            .map(|r| r.plate().to_string())
            .collect();
        assert_eq!(plates, vec!["ABC-1", "ABC-2", "XYZ-1"]);
    }

    #[test]
    fn lists_in_insertion_order_by_id() {
        let store = StoreFixture::new()
            .with_record("XYZ", "1", "1", "")
            .with_record("ABC", "2", "2", "")
            .store;

        let result = run(&store, SortOrder::Id).unwrap();
        assert_eq!(result.listed_records[0].part1, "XYZ");
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = StoreFixture::new().store;
        assert!(run(&store, SortOrder::Plate)
            .unwrap()
            .listed_records
            .is_empty());
    }
}
