use chrono::{NaiveDate, TimeZone, Utc};
use slate_core::datastore::DataStore;
use slate_core::store::TaskStore;
use slate_core::theme::{Theme, ThemePreference};
use tempfile::tempdir;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0)
        .single()
        .expect("valid time")
}

#[test]
fn add_round_trips_after_reload() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    let due = NaiveDate::from_ymd_opt(2024, 6, 20);

    let mut store = TaskStore::open(datastore.clone());
    let task = store
        .add("  Write weekly report  ", due, now())
        .expect("task should be created");
    assert_eq!(task.text, "Write weekly report");
    assert!(!task.completed);

    let reloaded = TaskStore::open(datastore);
    assert_eq!(reloaded.tasks().len(), 1);
    assert_eq!(reloaded.tasks()[0], task);
}

#[test]
fn blank_text_never_grows_the_collection() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    let mut store = TaskStore::open(datastore.clone());

    assert!(store.add("", None, now()).is_none());
    assert!(store.add("   ", None, now()).is_none());
    assert!(store.add("\t\n", None, now()).is_none());

    assert!(store.tasks().is_empty());
    // A rejection is not a mutation, so nothing was ever written.
    assert!(!datastore.tasks_path.exists());
}

#[test]
fn toggle_is_an_involution_and_unknown_ids_are_noops() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    let mut store = TaskStore::open(datastore);

    let task = store.add("Pay rent", None, now()).expect("task created");
    assert_eq!(store.toggle(task.id), Some(true));
    assert_eq!(store.toggle(task.id), Some(false));
    assert_eq!(store.tasks()[0].completed, task.completed);

    assert_eq!(store.toggle(999), None);
}

#[test]
fn remove_is_idempotent() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    let mut store = TaskStore::open(datastore);

    let keep = store.add("Keep me", None, now()).expect("task created");
    let gone = store.add("Remove me", None, now()).expect("task created");

    assert!(store.remove(gone.id));
    assert!(!store.remove(gone.id));

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, keep.id);
}

#[test]
fn clear_completed_with_nothing_completed_never_writes() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    let mut store = TaskStore::open(datastore.clone());

    let task = store.add("Still open", None, now()).expect("task created");

    // Removing the slot makes any write observable.
    std::fs::remove_file(&datastore.tasks_path).expect("remove task slot");
    assert_eq!(store.clear_completed(), 0);
    assert!(!datastore.tasks_path.exists());

    store.toggle(task.id);
    assert!(datastore.tasks_path.exists());
    assert_eq!(store.clear_completed(), 1);
    assert!(store.tasks().is_empty());
}

#[test]
fn corrupt_slot_loads_as_empty_and_recovers() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    std::fs::write(&datastore.tasks_path, "{not json").expect("write garbage");

    let mut store = TaskStore::open(datastore.clone());
    assert!(store.tasks().is_empty());

    store.add("Fresh start", None, now()).expect("task created");
    let reloaded = TaskStore::open(datastore);
    assert_eq!(reloaded.tasks().len(), 1);
}

#[test]
fn ids_stay_unique_across_removals_and_reloads() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");

    let mut store = TaskStore::open(datastore.clone());
    let first = store.add("first", None, now()).expect("task created");
    let second = store.add("second", None, now()).expect("task created");
    assert_ne!(first.id, second.id);
    store.remove(first.id);

    let mut reloaded = TaskStore::open(datastore);
    let third = reloaded.add("third", None, now()).expect("task created");
    assert_ne!(third.id, second.id);
}

#[test]
fn theme_defaults_to_light_and_round_trips() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");

    let mut pref = ThemePreference::load(datastore.clone());
    assert_eq!(pref.current(), Theme::Light);

    assert_eq!(pref.toggle(), Theme::Dark);
    let reloaded = ThemePreference::load(datastore.clone());
    assert_eq!(reloaded.current(), Theme::Dark);

    let raw = std::fs::read_to_string(&datastore.theme_path).expect("read theme slot");
    assert_eq!(raw.trim(), "dark");
}

#[test]
fn unreadable_theme_slot_falls_back_to_light() {
    let temp = tempdir().expect("tempdir");
    let datastore = DataStore::open(temp.path()).expect("open datastore");
    std::fs::write(&datastore.theme_path, "mauve").expect("write garbage");

    let pref = ThemePreference::load(datastore);
    assert_eq!(pref.current(), Theme::Light);
}
