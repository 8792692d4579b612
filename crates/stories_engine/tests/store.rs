use std::fs;

use stories_core::{KeyValueStore, PersistentValue, StoreError};
use stories_engine::RonFileStore;
use tempfile::TempDir;

#[test]
fn missing_file_reads_as_absent() {
    let temp = TempDir::new().unwrap();
    let store = RonFileStore::open(temp.path().join("state.ron")).unwrap();
    assert_eq!(store.get("search"), None);
}

#[test]
fn open_creates_missing_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("state").join("state.ron");

    let store = RonFileStore::open(&path).unwrap();
    assert!(path.parent().unwrap().is_dir());

    store.set("search", "Rust").unwrap();
    assert!(path.is_file());
}

#[test]
fn open_fails_when_directory_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let result = RonFileStore::open(blocker.join("state.ron"));
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn values_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.ron");

    let store = RonFileStore::open(&path).unwrap();
    store.set("search", "Rust").unwrap();
    store.set("other", "x").unwrap();
    store.set("search", "Tokio").unwrap();
    assert_eq!(store.path(), path.as_path());

    let reopened = RonFileStore::open(&path).unwrap();
    assert_eq!(reopened.get("search").as_deref(), Some("Tokio"));
    assert_eq!(reopened.get("other").as_deref(), Some("x"));
}

#[test]
fn rewrite_leaves_only_the_state_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.ron");

    let store = RonFileStore::open(&path).unwrap();
    store.set("search", "Rust").unwrap();
    store.set("search", "Tokio").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("state.ron")]);
}

#[test]
fn unparsable_file_reads_as_absent_and_is_replaced() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.ron");
    fs::write(&path, "{ not ron").unwrap();

    let store = RonFileStore::open(&path).unwrap();
    assert_eq!(store.get("search"), None);

    store.set("search", "Rust").unwrap();
    assert_eq!(
        RonFileStore::open(&path).unwrap().get("search").as_deref(),
        Some("Rust")
    );
}

#[test]
fn hydrates_persistent_value() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.ron");
    RonFileStore::open(&path).unwrap().set("search", "Rust").unwrap();

    let store = RonFileStore::open(&path).unwrap();
    let value = PersistentValue::create("search", "React", &store);
    assert_eq!(value.get(), "Rust");
}

#[test]
fn failed_rewrite_leaves_target_untouched_and_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("state.ron");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), "x").unwrap();

    let store = RonFileStore::open(&target).unwrap();
    assert_eq!(store.get("search"), None);

    assert!(store.set("search", "Rust").is_err());
    assert_eq!(store.get("search").as_deref(), Some("Rust"));
    assert_eq!(fs::read_to_string(target.join("keep")).unwrap(), "x");

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("state.ron")]);
}

#[test]
fn write_failure_after_directory_disappears_keeps_value_in_memory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("state");
    let store = RonFileStore::open(dir.join("state.ron")).unwrap();

    fs::remove_dir_all(&dir).unwrap();
    fs::write(&dir, "x").unwrap();

    assert!(store.set("search", "Rust").is_err());
    assert_eq!(store.get("search").as_deref(), Some("Rust"));
}
