use chrono::{NaiveDate, TimeZone, Utc};
use stockpile_core::{
    ElectronicItem, EntityRepository, GroceryItem, InMemoryRepository, InventoryItem,
    PersistenceError, RepoError, WarehouseItem,
};
use std::fs;

fn inventory_repo() -> InMemoryRepository<InventoryItem> {
    let mut repo = InMemoryRepository::new();
    repo.add(InventoryItem::new(
        1,
        "Wireless Headphones",
        25,
        Utc.with_ymd_and_hms(2024, 2, 1, 10, 15, 30).unwrap(),
    ))
    .unwrap();
    repo.add(InventoryItem::new(
        2,
        "Gaming Keyboard",
        15,
        Utc.with_ymd_and_hms(2024, 2, 3, 18, 0, 0).unwrap(),
    ))
    .unwrap();
    repo
}

#[test]
fn save_then_load_into_fresh_repository_roundtrips_all_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory_data.json");
    let original = inventory_repo();

    assert_eq!(original.save_to_file(&path).unwrap(), 2);

    let mut restored = InMemoryRepository::<InventoryItem>::new();
    assert_eq!(restored.load_from_file(&path).unwrap(), 2);
    assert_eq!(restored.get_all(), original.get_all());
}

#[test]
fn saved_file_is_pretty_camel_case_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory_data.json");
    inventory_repo().save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {"));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["name"], "Wireless Headphones");
    assert_eq!(first["quantity"], 25);
    assert_eq!(first["dateAdded"], "2024-02-01T10:15:30Z");
}

#[test]
fn load_missing_file_yields_empty_repository() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = inventory_repo();

    let loaded = repo.load_from_file(dir.path().join("missing.json")).unwrap();

    assert_eq!(loaded, 0);
    assert!(repo.get_all().is_empty());
}

#[test]
fn load_blank_file_yields_empty_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.json");
    fs::write(&path, "\n   \n").unwrap();
    let mut repo = inventory_repo();

    assert_eq!(repo.load_from_file(&path).unwrap(), 0);
    assert!(repo.is_empty());
}

#[test]
fn load_null_document_yields_empty_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("null.json");
    fs::write(&path, "null\n").unwrap();
    let mut repo = inventory_repo();

    assert_eq!(repo.load_from_file(&path).unwrap(), 0);
    assert!(repo.is_empty());
}

#[test]
fn load_replaces_rather_than_merges() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory_data.json");
    let mut only_first = inventory_repo();
    only_first.remove_by_id(2).unwrap();
    only_first.save_to_file(&path).unwrap();

    let mut repo = inventory_repo();
    repo.load_from_file(&path).unwrap();

    let ids: Vec<i32> = repo.get_all().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn corrupt_file_resets_repository_and_reports_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.json");
    fs::write(&path, "[{\"id\": 1, \"name\": \"half").unwrap();
    let mut repo = inventory_repo();

    let err = repo.load_from_file(&path).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Persistence(PersistenceError::Decode { .. })
    ));
    assert!(repo.is_empty());
}

#[test]
fn structural_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wrong_shape.json");
    fs::write(
        &path,
        r#"[{"id": 1, "name": "A", "quantity": -2, "dateAdded": "2024-02-01T10:15:30Z"}]"#,
    )
    .unwrap();
    let mut repo = InMemoryRepository::<InventoryItem>::new();
    assert!(repo.load_from_file(&path).is_err());

    fs::write(&path, r#"{"id": 1}"#).unwrap();
    assert!(repo.load_from_file(&path).is_err());
    assert!(repo.is_empty());
}

#[test]
fn duplicate_ids_in_snapshot_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.json");
    fs::write(
        &path,
        r#"[
  {"id": 7, "name": "A", "quantity": 1, "dateAdded": "2024-02-01T10:15:30Z"},
  {"id": 7, "name": "B", "quantity": 2, "dateAdded": "2024-02-01T10:15:30Z"}
]"#,
    )
    .unwrap();
    let mut repo = InMemoryRepository::<InventoryItem>::new();

    let err = repo.load_from_file(&path).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Persistence(PersistenceError::DuplicateKey { id: 7, .. })
    ));
    assert!(repo.is_empty());
}

#[test]
fn save_failure_is_reported_and_memory_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("inventory.json");
    let repo = inventory_repo();

    let err = repo.save_to_file(&path).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Persistence(PersistenceError::Io { .. })
    ));
    assert_eq!(repo.len(), 2);
}

#[test]
fn mixed_warehouse_items_roundtrip_with_kind_tag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warehouse.json");
    let mut repo = InMemoryRepository::<WarehouseItem>::new();
    repo.add(ElectronicItem::new(1, "Phone", 15, "Samsung", 24).into())
        .unwrap();
    repo.add(
        GroceryItem::new(101, "Milk", 50, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).into(),
    )
    .unwrap();

    repo.save_to_file(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json[0]["kind"], "electronic");
    assert_eq!(json[0]["warrantyMonths"], 24);
    assert_eq!(json[1]["expiryDate"], "2024-05-01");

    let mut restored = InMemoryRepository::<WarehouseItem>::new();
    restored.load_from_file(&path).unwrap();
    assert_eq!(restored.get_all(), repo.get_all());
}
