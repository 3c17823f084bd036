use hybridplan_core::{
    DocumentStore, ErrorKind, Event, EventRepository, NotFoundTarget, RepoError, ResourceKey,
    StoreConfig, StoreEventRepository,
};

#[test]
fn adjacent_event_is_accepted() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);

    repo.add_event("Monday", Event::new("standup", 8, 1)).unwrap();
    let events = repo.add_event("Monday", Event::new("planning", 9, 1)).unwrap();

    let monday = events.day("Monday").unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[1].title, "planning");
}

#[test]
fn overlapping_event_is_rejected_without_mutation() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Monday", Event::new("standup", 9, 1)).unwrap();
    let before = repo.list_events().unwrap();

    let err = repo
        .add_event("Monday", Event::new("workshop", 8, 2))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    match err {
        RepoError::Conflict(conflict) => {
            assert_eq!(conflict.day, "Monday");
            assert_eq!(conflict.index, 0);
            assert_eq!(conflict.existing.title, "standup");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(repo.list_events().unwrap(), before);
}

#[test]
fn overlap_is_checked_per_day_only() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Monday", Event::new("standup", 9, 1)).unwrap();

    let events = repo.add_event("Tuesday", Event::new("standup", 9, 1)).unwrap();
    assert_eq!(events.event_count(), 2);
}

#[test]
fn insertion_order_is_kept_unsorted() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Friday", Event::new("late", 16, 1)).unwrap();
    repo.add_event("Friday", Event::new("early", 8, 1)).unwrap();

    let events = repo.list_events().unwrap();
    let titles: Vec<&str> = events
        .day("Friday")
        .unwrap()
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, vec!["late", "early"]);
}

#[test]
fn invalid_event_fields_are_rejected() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);

    let err = repo.add_event("Monday", Event::new("", 9, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = repo.add_event("Monday", Event::new("x", 9, 0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(repo.list_events().unwrap().is_empty());
}

#[test]
fn deleting_last_event_removes_day_key() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Wednesday", Event::new("gym", 18, 1)).unwrap();

    let events = repo.delete_event("Wednesday", 0).unwrap();
    assert!(events.day("Wednesday").is_none());
    assert!(!repo.list_events().unwrap().days.contains_key("Wednesday"));

    let raw = store.backend().raw(ResourceKey::Events).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[test]
fn writes_keep_existing_day_order() {
    let backend = hybridplan_core::MemoryBackend::default().with_raw(
        ResourceKey::Events,
        r#"{"Monday": [{"title": "standup", "hour": 9, "duration": 1}], "Friday": [{"title": "retro", "hour": 15, "duration": 1}]}"#,
    );
    let store = DocumentStore::new(backend);
    let repo = StoreEventRepository::new(&store);

    repo.add_event("Tuesday", Event::new("gym", 18, 1)).unwrap();
    repo.add_event("Monday", Event::new("lunch", 12, 1)).unwrap();

    let raw = String::from_utf8(store.backend().raw(ResourceKey::Events).unwrap()).unwrap();
    let offsets: Vec<usize> = ["\"Monday\"", "\"Friday\"", "\"Tuesday\""]
        .iter()
        .map(|day| raw.find(*day).unwrap())
        .collect();
    assert!(offsets[0] < offsets[1] && offsets[1] < offsets[2]);

    repo.delete_event("Friday", 0).unwrap();
    let days: Vec<String> = repo.list_events().unwrap().days.keys().cloned().collect();
    assert_eq!(days, vec!["Monday".to_string(), "Tuesday".to_string()]);
}

#[test]
fn delete_shifts_later_events_down() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Monday", Event::new("a", 8, 1)).unwrap();
    repo.add_event("Monday", Event::new("b", 9, 1)).unwrap();
    repo.add_event("Monday", Event::new("c", 10, 1)).unwrap();

    let events = repo.delete_event("Monday", 1).unwrap();
    let monday = events.day("Monday").unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[1].title, "c");
}

#[test]
fn delete_missing_day_or_index_is_not_found() {
    let store = DocumentStore::in_memory();
    let repo = StoreEventRepository::new(&store);
    repo.add_event("Monday", Event::new("a", 8, 1)).unwrap();

    let err = repo.delete_event("Sunday", 0).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound(NotFoundTarget::Day(ref day)) if day == "Sunday"
    ));

    let err = repo.delete_event("Monday", 1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound(NotFoundTarget::EventIndex { index: 1, .. })
    ));
    assert_eq!(repo.list_events().unwrap().event_count(), 1);
}

#[test]
fn list_drops_malformed_entries_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("events.json"),
        r#"{"Monday": [{"title": "ok", "hour": 9, "duration": 1}, {"title": "bad"}], "Tuesday": 5}"#,
    )
    .unwrap();
    let store = DocumentStore::open(StoreConfig::new(dir.path()));
    let repo = StoreEventRepository::new(&store);

    let events = repo.list_events().unwrap();
    assert_eq!(events.event_count(), 1);
    assert_eq!(events.day("Monday").unwrap()[0].title, "ok");
}

#[test]
fn each_call_rereads_current_state() {
    let store = DocumentStore::in_memory();
    let first = StoreEventRepository::new(&store);
    let second = StoreEventRepository::new(&store);

    first.add_event("Monday", Event::new("a", 8, 2)).unwrap();
    let err = second.add_event("Monday", Event::new("b", 9, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}
