use hybridplan_core::{
    ActionCategory, ActionItem, ActionItemRepository, ActionItemsDocument, DocumentStore,
    ErrorKind, NotFoundTarget, Priority, RepoError, ResourceKey, StoreActionItemRepository,
};
use serde_json::json;

fn item(title: &str, priority: Priority) -> ActionItem {
    ActionItem::new(title, format!("{title} description"), priority)
}

#[test]
fn list_contains_all_categories_when_empty() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);

    let document = repo.list().unwrap();
    for category in ActionCategory::ALL {
        assert!(document.categories.contains_key(&category));
    }
}

#[test]
fn create_update_delete_by_index() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);

    repo.create("arbeitsplatz", item("Monitor", Priority::High))
        .unwrap();
    repo.create("arbeitsplatz", item("Chair", Priority::Low))
        .unwrap();
    repo.create("arbeitsplatz", item("Lamp", Priority::Medium))
        .unwrap();

    let document = repo
        .update("arbeitsplatz", 1, item("Ergonomic chair", Priority::Medium))
        .unwrap();
    assert_eq!(
        document.items(ActionCategory::Workplace)[1].title,
        "Ergonomic chair"
    );

    let document = repo.delete("arbeitsplatz", 0).unwrap();
    let workplace = document.items(ActionCategory::Workplace);
    assert_eq!(workplace.len(), 2);
    assert_eq!(workplace[0].title, "Ergonomic chair");
    assert_eq!(workplace[1].title, "Lamp");
    assert!(document.items(ActionCategory::OneOff).is_empty());
}

#[test]
fn invalid_category_never_mutates() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);
    repo.create("einmalige_massnahmen", item("Kickoff", Priority::High))
        .unwrap();
    let before = repo.list().unwrap();

    let errors = [
        repo.create("sonstiges", item("x", Priority::Low)).unwrap_err(),
        repo.update("sonstiges", 0, item("x", Priority::Low))
            .unwrap_err(),
        repo.delete("sonstiges", 0).unwrap_err(),
        repo.delete("", 0).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, RepoError::InvalidCategory(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
    }
    assert_eq!(repo.list().unwrap(), before);
}

#[test]
fn out_of_range_index_is_not_found() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);
    repo.create("arbeitsplatz", item("Monitor", Priority::High))
        .unwrap();

    let err = repo
        .update("arbeitsplatz", 1, item("x", Priority::Low))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound(NotFoundTarget::ActionItemIndex {
            category: ActionCategory::Workplace,
            index: 1
        })
    ));
    let err = repo.delete("einmalige_massnahmen", 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(repo.list().unwrap().items(ActionCategory::Workplace).len(), 1);
}

#[test]
fn replace_all_keeps_valid_plan_items_only() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);
    repo.create("arbeitsplatz", item("Old", Priority::Low)).unwrap();

    let plan = json!({
        "einmalige_massnahmen": [
            {"title": "Workshop", "description": "hybrid rules", "priority": "mittel"},
            {"title": "Broken", "priority": "hoch"}
        ],
        "unbekannt": [
            {"title": "x", "description": "y", "priority": "hoch"}
        ]
    });
    let document = repo.replace_all(plan).unwrap();

    assert_eq!(document.items(ActionCategory::OneOff).len(), 1);
    assert!(document.items(ActionCategory::Workplace).is_empty());
    assert_eq!(repo.list().unwrap(), document);
}

#[test]
fn replace_all_rejects_non_object_plan() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);

    let err = repo.replace_all(json!(["not", "a", "plan"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(repo.list().unwrap(), ActionItemsDocument::default());
}

#[test]
fn persisted_document_uses_wire_names() {
    let store = DocumentStore::in_memory();
    let repo = StoreActionItemRepository::new(&store);
    repo.create("einmalige_massnahmen", item("Kickoff", Priority::High))
        .unwrap();

    let raw = store.backend().raw(ResourceKey::ActionItems).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        json,
        json!({
            "einmalige_massnahmen": [
                {"title": "Kickoff", "description": "Kickoff description", "priority": "hoch"}
            ],
            "arbeitsplatz": []
        })
    );
}
