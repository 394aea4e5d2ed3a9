mod common;

use common::{PARTY_HASH, PARTY_PAGE, party_game};
use gbfsnap_core::party::extract_party;
use gbfsnap_core::store::{
    ExportKind, PartySummary, backup_store, check_version, classify_export, list_saved,
    load_artifact, load_emp, save_artifact, save_emp, summarize_party,
};
use gbfsnap_core::{HtmlPage, SchemaVersion, StoreError};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn exports_are_classified_by_their_keys() {
    assert_eq!(classify_export(&json!({"emp": [], "id": 1})), ExportKind::Emp);
    assert_eq!(classify_export(&json!({"artifact": {}})), ExportKind::Artifact);
    assert_eq!(classify_export(&json!({"p": 1, "c": []})), ExportKind::Party);
}

#[test]
fn old_exports_are_rejected() {
    assert!(matches!(
        check_version(&json!({"p": 1})),
        Err(StoreError::Outdated(v)) if v == 0.0
    ));
    assert!(matches!(
        check_version(&json!({"ver": 0.5})),
        Err(StoreError::Outdated(v)) if v == 0.5
    ));
    assert_eq!(check_version(&json!({"ver": 2})).unwrap(), 2.0);
    // JSON writers may emit integral versions as floats
    assert_eq!(check_version(&json!({"ver": 2.0})).unwrap(), 2.0);
}

#[test]
fn party_summary_tolerates_dropped_keys() {
    let page = HtmlPage::parse(PARTY_PAGE);
    let rec = extract_party(PARTY_HASH, &party_game(), &page, SchemaVersion::V2).unwrap();
    let mut export = serde_json::to_value(&rec).unwrap();
    // the page serializer omits undefined values
    export.as_object_mut().unwrap().remove("cpl");
    assert_eq!(classify_export(&export), ExportKind::Party);
    assert_eq!(check_version(&export).unwrap(), 2.0);
    assert_eq!(
        summarize_party(&export),
        PartySummary {
            class_id: Some(150201),
            allies: 3,
            summons: 4,
            weapons: 6,
        }
    );

    assert_eq!(
        summarize_party(&json!({"ver": 2})),
        PartySummary {
            class_id: None,
            allies: 0,
            summons: 0,
            weapons: 0,
        }
    );
}

#[test]
fn ids_that_escape_the_store_are_refused() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    for id in ["../x", "a/b", "..", ""] {
        let err = save_emp(&store, &json!({"emp": [], "id": id, "ring": []})).unwrap_err();
        assert!(matches!(err, StoreError::BadId(_)), "{id}: {err}");
        let err = save_artifact(&store, &json!({"id": id, "artifact": {}})).unwrap_err();
        assert!(matches!(err, StoreError::BadId(_)), "{id}: {err}");
    }
    assert!(load_emp(&store, "../x").is_err());
    assert!(!dir.path().join("x.json").exists());
    assert!(list_saved(&store).is_empty());
}

#[test]
fn emp_is_saved_and_loaded_by_id() {
    let dir = tempdir().unwrap();
    let export = json!({
        "ver": 2, "lang": "en", "id": 3040001000_i64,
        "emp": [{"a": 1}, {"b": 2}], "ring": [{"r": 1}],
        "awakening": 10, "awaktype": "Attack",
        "domain": [], "saint": [["ico", null, null]], "extra": []
    });
    let summary = save_emp(dir.path(), &export).unwrap();
    assert_eq!(summary.id, "3040001000");
    assert_eq!(summary.emp, 2);
    assert_eq!(summary.rings, 1);
    assert_eq!(summary.saint, Some(1));
    assert!(summary.has_awakening);

    let loaded = load_emp(dir.path(), "3040001000").unwrap().unwrap();
    assert_eq!(loaded, export);
    assert!(load_emp(dir.path(), "1").unwrap().is_none());
}

#[test]
fn emp_without_ring_is_invalid() {
    let dir = tempdir().unwrap();
    let err = save_emp(dir.path(), &json!({"emp": [], "id": 1})).unwrap_err();
    assert!(matches!(err, StoreError::Invalid { field: "ring", .. }));
}

#[test]
fn artifact_urls_and_levels_are_shortened() {
    let dir = tempdir().unwrap();
    let export = json!({
        "ver": 2, "lang": "en", "id": 3040002000_i64,
        "artifact": {
            "img": "https://example.invalid/a/301010101.jpg",
            "skills": [{"lvl": "Lv 5", "icon": "https://example.invalid/s/1.png", "desc": "ATK", "value": "+1800"}]
        }
    });
    assert!(save_artifact(dir.path(), &export).unwrap());
    let loaded = load_artifact(dir.path(), "3040002000").unwrap().unwrap();
    assert_eq!(loaded["artifact"]["img"], json!("301010101.jpg"));
    assert_eq!(loaded["artifact"]["skills"][0]["icon"], json!("1.png"));
    assert_eq!(loaded["artifact"]["skills"][0]["lvl"], json!("5"));

    // nothing equipped
    assert!(!save_artifact(dir.path(), &json!({"ver": 2, "id": 1, "artifact": {}})).unwrap());
}

#[test]
fn list_and_backup_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    save_emp(&store, &json!({"emp": [], "id": 2, "ring": []})).unwrap();
    save_artifact(&store, &json!({"id": 1, "artifact": {}})).unwrap();
    let saved = list_saved(&store);
    assert_eq!(saved.len(), 2);
    assert!(saved[0].ends_with("artifact/1.json"));
    assert!(saved[1].ends_with("emp/2.json"));

    std::fs::write(store.join("notes.txt"), "not a snapshot").unwrap();

    let backup = backup_store(&store).unwrap();
    assert!(backup.path.exists());
    assert_eq!(backup.path.parent(), Some(dir.path()));
    assert_eq!(backup.files, vec!["artifact/1.json", "emp/2.json"]);

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&backup.path).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, backup.files);
}
