use record_editor::{BudgetEntry, EmployeeContact, LocalStorage, RecordList, RecordStore, SourceFormat};
use std::path::Path;
use tempfile::TempDir;

fn months(count: usize) -> RecordList<BudgetEntry> {
    (1..=count)
        .map(|i| BudgetEntry::new(format!("M{}", i), i as f64 * 10.0))
        .collect()
}

#[test]
fn test_edit_any_valid_position_replaces_only_that_entry() {
    for len in 1..=6 {
        for position in 1..=len {
            let mut list = months(len);
            let replacement = BudgetEntry::new("Edited", -5.25);

            list.edit(position, replacement.clone()).unwrap();

            assert_eq!(list.len(), len);
            assert_eq!(list.get(position), Some(&replacement));
            for (i, entry) in list.iter().enumerate() {
                if i + 1 != position {
                    assert_eq!(entry.month, format!("M{}", i + 1));
                }
            }
        }
    }
}

#[test]
fn test_delete_any_valid_position_shrinks_by_one_and_keeps_order() {
    for len in 1..=6 {
        for position in 1..=len {
            let mut list = months(len);
            list.delete(position).unwrap();

            assert_eq!(list.len(), len - 1);
            let expected: Vec<String> = (1..=len)
                .filter(|i| *i != position)
                .map(|i| format!("M{}", i))
                .collect();
            let actual: Vec<String> = list.iter().map(|e| e.month.clone()).collect();
            assert_eq!(actual, expected);
        }
    }
}

#[test]
fn test_boundary_positions_rejected() {
    for len in 0..=4 {
        let mut list = months(len);
        assert!(list.edit(0, BudgetEntry::new("X", 1.0)).is_err());
        assert!(list.edit(len + 1, BudgetEntry::new("X", 1.0)).is_err());
        assert!(list.delete(0).is_err());
        assert!(list.delete(len + 1).is_err());
        assert_eq!(list, months(len));
    }
}

#[test]
fn test_merge_length_depends_only_on_key_match() {
    let mut list = months(3);

    for key in ["m1", "M2", "m3"] {
        let summary = list.merge(vec![BudgetEntry::new(key, 0.0)]);
        assert_eq!(summary.updated, 1);
        assert_eq!(list.len(), 3);
    }

    for (i, key) in ["Jan", "Feb", "Mar"].iter().enumerate() {
        let summary = list.merge(vec![BudgetEntry::new(*key, 0.0)]);
        assert_eq!(summary.inserted, 1);
        assert_eq!(list.len(), 4 + i);
    }
}

#[test]
fn test_spec_example_merge() {
    let mut list = RecordList::from(vec![
        BudgetEntry::new("Jan", 100.0),
        BudgetEntry::new("Feb", 200.0),
    ]);

    let summary = list.merge(vec![BudgetEntry::new("Jan", 150.0)]);
    assert_eq!((summary.updated, summary.inserted), (1, 0));
    assert_eq!(
        list.as_slice(),
        &[BudgetEntry::new("Jan", 150.0), BudgetEntry::new("Feb", 200.0)]
    );

    let summary = list.merge(vec![BudgetEntry::new("Mar", 50.0)]);
    assert_eq!((summary.updated, summary.inserted), (0, 1));
    assert_eq!(list.get(3), Some(&BudgetEntry::new("Mar", 50.0)));
}

#[test]
fn test_export_then_load_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(LocalStorage::new(temp_dir.path()));

    let budget = RecordList::from(vec![
        BudgetEntry::new("Jan", 100.0),
        BudgetEntry::new("Feb", 1234.5),
        BudgetEntry::new("Refund, March", -20.0),
        BudgetEntry::new("Apr", 0.125),
        BudgetEntry::new("May", 19.9999),
    ]);
    store.export(&budget, Path::new("budget.csv")).unwrap();
    let reloaded: RecordList<BudgetEntry> =
        store.try_load(Path::new("budget.csv"), SourceFormat::Csv).unwrap();
    assert_eq!(reloaded, budget);

    let staff = RecordList::from(vec![
        EmployeeContact::new("Jake", "jake@example.com"),
        EmployeeContact::new("Steve", "steve@jobs.org"),
    ]);
    store.export(&staff, Path::new("staff.csv")).unwrap();
    let reloaded: RecordList<EmployeeContact> =
        store.try_load(Path::new("staff.csv"), SourceFormat::Csv).unwrap();
    assert_eq!(reloaded, staff);
}

#[test]
fn test_export_empty_list_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = RecordStore::new(LocalStorage::new(temp_dir.path()));

    let empty: RecordList<BudgetEntry> = RecordList::new();
    assert_eq!(store.export(&empty, Path::new("empty.csv")).unwrap(), 0);

    let content = std::fs::read_to_string(temp_dir.path().join("empty.csv")).unwrap();
    assert_eq!(content, "Month,Amount\n");

    let reloaded: RecordList<BudgetEntry> =
        store.try_load(Path::new("empty.csv"), SourceFormat::Csv).unwrap();
    assert!(reloaded.is_empty());
}
