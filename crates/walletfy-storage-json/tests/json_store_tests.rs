use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use walletfy_core::{InitialBalance, KeyValueStore, PersistenceBridge, StorageKeys};
use walletfy_domain::Event;
use walletfy_storage_json::JsonFileStore;

#[test]
fn json_store_reads_back_what_it_wrote() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("data")).expect("create store");

    assert_eq!(store.get("initialBalance").unwrap(), None);
    store.set("initialBalance", "125.5").expect("write");
    assert_eq!(
        store.get("initialBalance").unwrap().as_deref(),
        Some("125.5")
    );

    let path = store.path_for("initialBalance");
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert_eq!(store.list_keys().unwrap(), vec!["initialBalance".to_string()]);
}

#[test]
fn json_store_overwrites_without_leaving_temp_files() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");

    store.set("walletfyEvents", "[]").unwrap();
    store.set("walletfyEvents", "[1]").unwrap();

    assert_eq!(store.get("walletfyEvents").unwrap().as_deref(), Some("[1]"));
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temporary files must be renamed away");
}

#[test]
fn failed_write_keeps_previous_value() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set("initialBalance", "10").unwrap();

    // A directory squatting on the temp path makes File::create fail.
    let mut blocker = store.path_for("initialBalance").into_os_string();
    blocker.push(".tmp");
    fs::create_dir_all(&blocker).unwrap();

    assert!(store.set("initialBalance", "20").is_err());
    assert_eq!(store.get("initialBalance").unwrap().as_deref(), Some("10"));
}

#[test]
fn remove_is_quiet_for_missing_keys() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.remove("never-written").expect("missing key is fine");
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn persistence_bridge_round_trips_through_files() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("walletfy");
    let bridge = PersistenceBridge::new(Box::new(JsonFileStore::new(root.clone()).unwrap()));

    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let events = vec![
        Event::income("Salary", 2000.0, date),
        Event::expense("Groceries", 82.4, date).with_description("market"),
    ];
    bridge
        .save(&events, InitialBalance::new(300.0).unwrap())
        .unwrap();

    let reopened = PersistenceBridge::new(Box::new(JsonFileStore::new(root).unwrap()));
    let report = reopened.load().unwrap();
    assert_eq!(report.events, events);
    assert_eq!(report.initial_balance.value(), 300.0);
    assert!(report.is_clean());
}

#[test]
fn keys_that_only_differ_in_punctuation_keep_separate_files() {
    let dir = tempdir().expect("tempdir");
    let keys = StorageKeys {
        events: "my events".into(),
        initial_balance: "my_events".into(),
    };
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    assert_ne!(store.path_for(&keys.events), store.path_for(&keys.initial_balance));

    let bridge = PersistenceBridge::with_keys(Box::new(store), keys);
    let date = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
    let events = vec![Event::income("Bonus", 40.0, date)];
    bridge
        .save(&events, InitialBalance::new(10.0).unwrap())
        .unwrap();

    let report = bridge.load().unwrap();
    assert_eq!(report.events, events);
    assert_eq!(report.initial_balance.value(), 10.0);
    assert!(report.is_clean());
}
