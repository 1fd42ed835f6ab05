use campmap_core::{CampgroundStore, CatalogError, Region, StoreIssue};

fn ids<'a>(records: impl IntoIterator<Item = &'a campmap_core::CampgroundRecord>) -> Vec<&'a str> {
    records.into_iter().map(|record| record.id.as_str()).collect()
}

#[test]
fn builtin_store_concatenates_regions_in_fixed_order() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");

    assert_eq!(store.len(), 8);
    assert_eq!(
        ids(store.records()),
        vec![
            "camping-1",
            "camping-2",
            "camping-3",
            "camping-6",
            "camping-7",
            "camping-4",
            "camping-5",
            "camping-8",
        ]
    );
    assert_eq!(
        ids(store.regional(Region::Kaluga)),
        vec!["camping-4", "camping-5", "camping-8"]
    );
}

#[test]
fn builtin_store_is_loaded_once() {
    let first = CampgroundStore::builtin().expect("first load");
    let second = CampgroundStore::builtin().expect("second load");
    assert!(std::ptr::eq(first, second));
}

#[test]
fn builtin_catalog_passes_audit() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    assert_eq!(store.audit(), Vec::new());
}

#[test]
fn kaluga_fixture_matches_published_values() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    let rechnoy = store.require("camping-4").expect("camping-4 exists");

    assert_eq!(rechnoy.price_per_day, 450.0);
    assert_eq!(rechnoy.rating, 4.5);
    assert_eq!(rechnoy.review_count, 132);
    assert_eq!(rechnoy.region_name, "Калужская область");
    assert_eq!(rechnoy.images.len(), 3);
    assert_eq!(rechnoy.rules.as_ref().map(Vec::len), Some(4));
}

#[test]
fn require_reports_missing_id() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    let err = store
        .require("camping-404")
        .expect_err("unknown id must fail");
    assert!(matches!(err, CatalogError::NotFound(ref id) if id == "camping-404"));
    assert_eq!(err.to_string(), "campground not found: camping-404");
}

#[test]
fn duplicate_ids_across_regions_load_but_are_audited() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    let kaluga = store
        .regional(Region::Kaluga)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let mut moved = kaluga[0].clone();
    moved.region = Region::Tver;

    let merged = CampgroundStore::from_regions(Vec::new(), vec![moved], kaluga);
    assert_eq!(merged.len(), 4);

    let issues = merged.audit();
    assert!(issues.contains(&StoreIssue::DuplicateId {
        id: "camping-4".to_string(),
        positions: vec![0, 1],
    }));
    assert!(!issues
        .iter()
        .any(|issue| matches!(issue, StoreIssue::RegionMismatch { .. })));
}

#[test]
fn record_serialization_uses_dataset_field_names() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    let record = store.require("camping-6").expect("camping-6 exists");

    let json = serde_json::to_value(record).expect("record serializes");
    assert_eq!(json["type"], "rv");
    assert_eq!(json["region"], "tver");
    assert_eq!(json["pricePerDay"], 1200.0);
    assert_eq!(json["reviews"], 61);
    assert!(json.get("rules").is_none());

    let decoded: campmap_core::CampgroundRecord =
        serde_json::from_value(json).expect("record decodes");
    assert_eq!(&decoded, record);
}
