mod common;

use common::counts;
use patent_class_counter::{
    PatentService,
    domain::{patent::NewPatent, store::keys},
    infrastructure::store::{JsonFileStore, MemoryStore},
    parse,
};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

const R1: &str = "A 1 first line\nA 2 second line";
const R2: &str = "A 1 third line";

#[test]
fn add_add_remove_matches_fresh_parse() {
    let mut svc = PatentService::open(MemoryStore::new()).unwrap();

    let r1 = svc.add_patent(NewPatent::new("R1", R1)).unwrap().unwrap();
    assert_eq!(svc.class_counts(), &counts(&[("A", 2, &[("1", 1), ("2", 1)])]));

    svc.add_patent(NewPatent::new("R2", R2)).unwrap().unwrap();
    assert_eq!(svc.class_counts(), &counts(&[("A", 3, &[("1", 2), ("2", 1)])]));

    let removed = svc.remove_patent(r1.id).unwrap().unwrap();
    assert_eq!(removed.title, "R1");
    assert_eq!(svc.class_counts(), &counts(&[("A", 1, &[("1", 1)])]));
    assert_eq!(svc.class_counts(), &parse(R2));
    assert!(svc.verify_counts());
}

#[test]
fn duplicate_title_leaves_state_unchanged() {
    let mut svc = PatentService::open(MemoryStore::new()).unwrap();
    svc.add_patent(NewPatent::new("Widget", "G06F 16/00 storage")).unwrap();

    let patents_before = svc.patents().to_vec();
    let counts_before = svc.class_counts().clone();
    let saves_before = svc.store().save_count();

    let result = svc
        .add_patent(NewPatent::new("Widget", "H04N 19/126 video"))
        .unwrap();

    assert!(result.is_none());
    assert_eq!(svc.patents(), patents_before.as_slice());
    assert_eq!(svc.class_counts(), &counts_before);
    assert_eq!(svc.store().save_count(), saves_before);
}

#[test]
fn removing_every_record_empties_counts() {
    let mut svc = PatentService::open(MemoryStore::new()).unwrap();
    let texts = [
        "G06F 16/2455 indexing\nH04N 19/126 adaptive",
        "G06F 16/00 structures\nnotes only",
        "B62D 5//04 steering\r\nG06F 12/12 cache",
    ];
    let ids: Vec<i64> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            svc.add_patent(NewPatent::new(format!("P{i}"), *t))
                .unwrap()
                .unwrap()
                .id
        })
        .collect();

    for id in ids.iter().rev() {
        svc.remove_patent(*id).unwrap();
        assert!(svc.verify_counts());
    }
    assert!(svc.class_counts().is_empty());
    assert_eq!(svc.store().get(keys::CLASS_COUNTS), Some(json!({})));
}

#[test]
fn data_survives_reopen_from_disk() {
    let dir = tempdir().unwrap();

    let id = {
        let mut svc = PatentService::open(JsonFileStore::new(dir.path()).unwrap()).unwrap();
        let rec = svc
            .add_patent(
                NewPatent::new("Widget", "G06F 16/2455 indexing")
                    .with_url("https://patents.google.com/patent/US0000000A"),
            )
            .unwrap()
            .unwrap();
        svc.toggle_minor_completion("G06F", "2455").unwrap();
        rec.id
    };

    let svc = PatentService::open(JsonFileStore::new(dir.path()).unwrap()).unwrap();
    let rec = svc.find(id).expect("record reloaded");
    assert_eq!(rec.title, "Widget");
    assert_eq!(
        rec.url.as_deref(),
        Some("https://patents.google.com/patent/US0000000A")
    );
    assert_eq!(
        svc.class_counts(),
        &counts(&[("G06F", 1, &[("16", 1), ("2455", 1)])])
    );
    assert!(svc.completion().is_minor_completed("G06F", "2455"));

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("classCounts.json")).unwrap())
            .unwrap();
    assert_eq!(raw, json!({"G06F": {"count": 1, "minor": {"16": 1, "2455": 1}}}));
}

#[test]
fn corrupt_files_start_empty_and_are_overwritten_on_save() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("patentData.json"), "[{\"title\": ").unwrap();
    fs::write(dir.path().join("classCounts.json"), "garbage").unwrap();

    let mut svc = PatentService::open(JsonFileStore::new(dir.path()).unwrap()).unwrap();
    assert!(svc.patents().is_empty());
    assert!(svc.class_counts().is_empty());

    svc.add_patent(NewPatent::new("Widget", "G06F 16/00 x")).unwrap();
    let reopened = PatentService::open(JsonFileStore::new(dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.patents().len(), 1);
    assert_eq!(reopened.class_counts().get("G06F").unwrap().count, 1);
}

#[test]
fn browser_saved_data_loads_and_stays_consistent() {
    let store = MemoryStore::with_entries([
        (
            keys::PATENT_DATA,
            json!([{
                "id": 1697600000000i64,
                "title": "Widget",
                "classDescription": "G06F 16/00 a",
                "url": "",
                "dateAdded": "10/18/2023"
            }]),
        ),
        (keys::CLASS_COUNTS, json!({"G06F": {"count": 1, "minor": {"16": 1, "00": 1}}})),
    ]);

    let mut svc = PatentService::open(store).unwrap();
    assert_eq!(svc.patents().len(), 1);
    assert_eq!(svc.patents()[0].title, "Widget");
    assert!(svc.verify_counts());
    assert_eq!(svc.store().save_count(), 0);

    svc.add_patent(NewPatent::new("Other", "G06F 16/20 b")).unwrap().unwrap();
    let stored = svc.store().get(keys::PATENT_DATA).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert!(svc.verify_counts());
    assert_eq!(svc.class_counts().get("G06F").unwrap().count, 2);
}

#[test]
fn one_bad_record_does_not_drop_the_rest() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("patentData.json"),
        r#"[
            {"id": 1, "title": "Kept", "classDescription": "H04N 19/126 video", "dateAdded": "10/18/2023"},
            {"id": 2, "title": "Broken", "classDescription": "A01B 1/2 x", "dateAdded": "sometime"}
        ]"#,
    )
    .unwrap();

    let svc = PatentService::open(JsonFileStore::new(dir.path()).unwrap()).unwrap();
    assert_eq!(svc.patents().len(), 1);
    assert_eq!(svc.patents()[0].title, "Kept");
    // 集計は読めたレコードから作り直される
    assert_eq!(svc.class_counts(), &parse("H04N 19/126 video"));
}
