use atlasnote_core::db::{open_db, open_db_in_memory};
use atlasnote_core::repo::kv_store::NOTES_KEY;
use atlasnote_core::{
    AuthProvider, KvStore, MemoryKvStore, NotePatch, NoteStore, SqliteKvStore, StoreError, Theme,
};
use std::collections::HashSet;
use uuid::Uuid;

fn memory_store() -> NoteStore<SqliteKvStore> {
    NoteStore::new(SqliteKvStore::new(open_db_in_memory().unwrap()))
}

#[test]
fn create_prepends_and_ids_stay_unique() {
    let mut store = memory_store();
    let first = store.create_note().unwrap();
    let second = store.create_note().unwrap();
    let third = store.create_note().unwrap();

    let listed = store.list_notes().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, third.id);
    assert_eq!(listed[1].id, second.id);
    assert_eq!(listed[2].id, first.id);

    let ids: HashSet<_> = listed.iter().map(|note| note.id).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn updates_never_reorder_the_collection() {
    let mut store = memory_store();
    let oldest = store.create_note().unwrap();
    let middle = store.create_note().unwrap();
    let newest = store.create_note().unwrap();

    store
        .update_note(oldest.id, NotePatch::title("bumped last"))
        .unwrap();
    store
        .update_note(middle.id, NotePatch::content("<p>body</p>"))
        .unwrap();

    let listed = store.list_notes().unwrap();
    let order: Vec<_> = listed.iter().map(|note| note.id).collect();
    assert_eq!(order, vec![newest.id, middle.id, oldest.id]);
}

#[test]
fn update_merges_fields_and_stamps_time() {
    let mut store = memory_store();
    let note = store.create_note().unwrap();

    let updated = store
        .update_note(note.id, NotePatch::title("plans"))
        .unwrap();
    assert_eq!(updated.title, "plans");
    assert_eq!(updated.content, "");
    assert!(updated.updated_at >= note.updated_at);

    let updated = store
        .update_note(note.id, NotePatch::content("<p>x</p>"))
        .unwrap();
    assert_eq!(updated.title, "plans");
    assert_eq!(updated.content, "<p>x</p>");
    assert_eq!(updated.cover, None);
}

#[test]
fn update_unknown_id_is_not_found_and_leaves_collection_unchanged() {
    let mut store = memory_store();
    store.create_note().unwrap();
    let before = store.list_notes().unwrap();

    let err = store
        .update_note(Uuid::new_v4(), NotePatch::title("ghost"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.list_notes().unwrap(), before);
}

#[test]
fn delete_removes_one_note_and_rejects_unknown_ids() {
    let mut store = memory_store();
    let keep = store.create_note().unwrap();
    let gone = store.create_note().unwrap();

    store.delete_note(gone.id).unwrap();
    let listed = store.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);

    let err = store.delete_note(gone.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == gone.id));
}

#[test]
fn collection_survives_reopen_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atlas.sqlite3");

    let note_id = {
        let mut store = NoteStore::new(SqliteKvStore::new(open_db(&path).unwrap()));
        let note = store.create_note().unwrap();
        store
            .update_note(note.id, NotePatch::title("durable"))
            .unwrap();
        note.id
    };

    let store = NoteStore::new(SqliteKvStore::new(open_db(&path).unwrap()));
    let loaded = store.get_note(note_id).unwrap().unwrap();
    assert_eq!(loaded.title, "durable");
}

#[test]
fn corrupt_notes_blob_surfaces_corrupt_error() {
    let mut kv = SqliteKvStore::new(open_db_in_memory().unwrap());
    kv.set(NOTES_KEY, "{not json").unwrap();

    let store = NoteStore::new(kv);
    let err = store.list_notes().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { key, .. } if key == NOTES_KEY));
}

#[test]
fn search_matches_title_and_stripped_content_case_insensitively() {
    let mut store = memory_store();
    let by_title = store.create_note().unwrap();
    store
        .update_note(by_title.id, NotePatch::title("Groceries"))
        .unwrap();

    let by_body = store.create_note().unwrap();
    store
        .update_note(by_body.id, NotePatch::content("<p>Buy <b>milk</b> today</p>"))
        .unwrap();

    let hits = store.search_notes("groceries").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, by_title.id);

    let hits = store.search_notes("MILK").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, by_body.id);

    // Tag markup itself is not searchable text.
    assert!(store.search_notes("<b>").unwrap().is_empty());
}

#[test]
fn blank_search_returns_nothing() {
    let mut store = memory_store();
    store.create_note().unwrap();
    assert!(store.search_notes("").unwrap().is_empty());
    assert!(store.search_notes("   ").unwrap().is_empty());
}

#[test]
fn session_and_theme_records_round_trip() {
    let mut store = NoteStore::new(MemoryKvStore::new());
    assert_eq!(store.current_user().unwrap(), None);
    assert_eq!(store.ui_meta().unwrap().theme, Theme::Dark);

    let session = store.login(AuthProvider::Google).unwrap();
    assert_eq!(store.current_user().unwrap(), Some(session));

    store.set_theme(Theme::Oled).unwrap();
    assert_eq!(store.ui_meta().unwrap().theme, Theme::Oled);

    store.logout().unwrap();
    assert_eq!(store.current_user().unwrap(), None);
}
