use super::*;
use crate::core::local_store::MemoryBackend;
use crate::core::local_store::error::BackendError;
use crate::types::ContactForm;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn message(n: i64) -> ContactMessage {
    let form = ContactForm {
        name: format!("Sender {n}"),
        email: format!("sender{n}@example.com"),
        phone: if n % 2 == 0 { String::new() } else { "+1 555 0100".to_string() },
        message: format!("Message number {n}"),
    };
    ContactMessage::capture(&form, base_time() + Duration::seconds(n))
}

fn create_store() -> (MessageStore, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = MessageStore::new(
        LocalStore::new(backend.clone(), 1024 * 1024),
        StorageKey::messages(),
    );
    (store, backend)
}

#[test]
fn test_empty_store() {
    let (store, _backend) = create_store();
    assert!(store.list_all().is_empty());
    assert_eq!(store.count(), 0);
}

#[test]
fn test_append_is_newest_first() {
    let (mut store, _backend) = create_store();
    let appended: Vec<_> = (0..5).map(message).collect();

    for m in &appended {
        store.append(m.clone()).unwrap();
    }

    let listed = store.list_all();
    assert_eq!(listed.len(), 5);
    let expected: Vec<_> = appended.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_duplicates_are_preserved() {
    let (mut store, _backend) = create_store();
    let m = message(1);

    store.append(m.clone()).unwrap();
    store.append(m.clone()).unwrap();

    assert_eq!(store.list_all(), vec![m.clone(), m]);
}

#[test]
fn test_stored_bytes_round_trip() {
    let (mut store, backend) = create_store();
    store.append(message(1)).unwrap();
    store.append(message(2)).unwrap();

    let raw = backend.raw(&StorageKey::messages()).unwrap();
    let reserialized = serde_json::to_string(&store.list_all()).unwrap();

    assert_eq!(raw, reserialized);
}

#[test]
fn test_clear_all() {
    let (mut store, backend) = create_store();
    store.append(message(1)).unwrap();
    store.append(message(2)).unwrap();

    store.clear_all().unwrap();

    assert!(store.list_all().is_empty());
    assert_eq!(store.count(), 0);
    assert_eq!(backend.raw(&StorageKey::messages()), None);
}

#[test]
fn test_append_failure_leaves_collection_unchanged() {
    let (mut store, backend) = create_store();
    store.append(message(1)).unwrap();
    backend.set_available(false);

    let result = store.append(message(2));

    assert!(matches!(
        result,
        Err(StoreError::Backend(BackendError::Unavailable(_)))
    ));
    backend.set_available(true);
    assert_eq!(store.list_all(), vec![message(1)]);
}

#[test]
fn test_sequential_appends_from_two_stores_are_kept() {
    let (mut first, backend) = create_store();
    let mut second = MessageStore::new(
        LocalStore::new(backend, 1024 * 1024),
        StorageKey::messages(),
    );

    first.append(message(1)).unwrap();
    second.append(message(2)).unwrap();

    assert_eq!(first.list_all(), vec![message(2), message(1)]);
}

#[test]
fn test_corrupt_collection_is_replaced_on_append() {
    let (mut store, backend) = create_store();
    backend.insert_raw(&StorageKey::messages(), "garbage");

    store.append(message(1)).unwrap();

    assert_eq!(store.list_all(), vec![message(1)]);
}

#[test]
fn test_try_list_all_tells_empty_from_unreadable() {
    let (mut store, backend) = create_store();
    assert_eq!(store.try_list_all().unwrap(), Vec::new());

    store.append(message(1)).unwrap();
    assert_eq!(store.try_list_all().unwrap(), vec![message(1)]);

    backend.insert_raw(&StorageKey::messages(), "garbage");
    assert!(matches!(store.try_list_all(), Err(StoreError::Corrupt(_))));
    assert!(store.list_all().is_empty());
}
