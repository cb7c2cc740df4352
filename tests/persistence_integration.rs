//! Completion flags stored on disk through `FileStore`.
//!
//! ```bash
//! cargo test --test persistence_integration
//! ```

use helpcenter::completion::{CompletionTracker, FileStore, KeyValueStore, STORAGE_KEY};
use helpcenter::config::Config;
use helpcenter::content::ContentStore;
use helpcenter::navigation::NavigationController;
use helpcenter::search::SearchIndex;
use std::fs;
use tempfile::TempDir;

fn storage_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("state").join("storage.json")
}

fn tracker(dir: &TempDir) -> CompletionTracker {
    CompletionTracker::load(Box::new(FileStore::new(storage_path(dir))))
}

#[test]
fn test_toggle_survives_reconstruction() {
    let dir = TempDir::new().unwrap();

    let mut first = tracker(&dir);
    assert!(first.toggle("c1", "t1", 0));
    assert!(first.toggle("c1", "t1", 2));
    assert!(!first.toggle("c1", "t1", 2));
    drop(first);

    let second = tracker(&dir);
    assert!(second.is_done("c1", "t1", 0));
    assert!(!second.is_done("c1", "t1", 2));
    assert!(!second.is_done("c2", "t1", 0));
}

#[test]
fn test_record_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut tracker = tracker(&dir);
    tracker.toggle("wartung", "oel", 1);

    let store = FileStore::new(storage_path(&dir));
    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"wartung": {"oel": [1]}}));
}

#[test]
fn test_legacy_record_is_migrated() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(storage_path(&dir));
    store
        .set(
            STORAGE_KEY,
            r#"{"wartung__oel__0": true, "wartung__oel__1": false}"#,
        )
        .unwrap();

    let mut tracker = tracker(&dir);
    assert!(tracker.is_done("wartung", "oel", 0));
    assert!(!tracker.is_done("wartung", "oel", 1));

    // The next write uses the nested layout
    tracker.toggle("wartung", "oel", 3);
    let raw = FileStore::new(storage_path(&dir))
        .get(STORAGE_KEY)
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"wartung": {"oel": [0, 3]}}));
}

#[test]
fn test_corrupt_storage_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = storage_path(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json at all").unwrap();

    let mut tracker = tracker(&dir);
    assert!(tracker.done_keys().is_empty());

    // Toggling still works and repairs the file
    assert!(tracker.toggle("c1", "t1", 0));
    assert!(self::tracker(&dir).is_done("c1", "t1", 0));
}

#[test]
fn test_config_storage_path_drives_navigation() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.paths.state = dir.path().join("state").to_string_lossy().to_string();
    assert_eq!(config.storage_path(), storage_path(&dir));

    let store = ContentStore::from_json(
        r#"[{"slug": "c1", "title": "C", "topics": [
            {"slug": "t1", "title": "T", "steps": [{"title": "S"}]}
        ]}]"#,
    )
    .unwrap();

    let mut nav = NavigationController::new(
        store.clone(),
        CompletionTracker::load(Box::new(config.file_store())),
        SearchIndex::new(config.search.max_results),
    );
    nav.select("c1");
    nav.select("t1");
    assert_eq!(nav.toggle_step(0), Some(true));

    let reopened = NavigationController::new(
        store,
        CompletionTracker::load(Box::new(config.file_store())),
        SearchIndex::default(),
    );
    assert!(reopened.tracker().is_done("c1", "t1", 0));
}
