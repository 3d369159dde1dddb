use atlasnote_core::db::open_db_in_memory;
use atlasnote_core::{EditorController, Focus, NoteStore, SqliteKvStore};
use uuid::Uuid;

fn controller() -> EditorController<SqliteKvStore> {
    EditorController::new(NoteStore::new(SqliteKvStore::new(
        open_db_in_memory().unwrap(),
    )))
}

#[test]
fn creating_a_note_focuses_the_title_field() {
    let mut editor = controller();
    editor.create_note().unwrap();
    assert_eq!(editor.surface().focus, Focus::Title);
    assert!(editor.surface().title.is_empty());
    assert!(editor.surface().body.is_empty());
}

#[test]
fn switching_notes_round_trips_last_persisted_state() {
    let mut editor = controller();
    let first = editor.create_note().unwrap();
    editor.on_title_changed("first note").unwrap();
    editor.on_body_changed("<p>alpha</p>").unwrap();

    let second = editor.create_note().unwrap();
    editor.on_title_changed("second note").unwrap();
    editor.on_body_changed("<p>beta</p>").unwrap();

    editor.set_active_note(Some(first)).unwrap();
    assert_eq!(editor.surface().title, "first note");
    assert_eq!(editor.surface().body, "<p>alpha</p>");

    editor.set_active_note(Some(second)).unwrap();
    assert_eq!(editor.surface().title, "second note");
    assert_eq!(editor.surface().body, "<p>beta</p>");
}

#[test]
fn null_or_unresolved_ids_blank_the_surface() {
    let mut editor = controller();
    editor.create_note().unwrap();
    editor.on_title_changed("something").unwrap();

    editor.set_active_note(None).unwrap();
    assert_eq!(editor.active_note_id(), None);
    assert!(editor.surface().title.is_empty());
    assert!(editor.editor_view().unwrap().empty);

    editor.set_active_note(Some(Uuid::new_v4())).unwrap();
    assert_eq!(editor.active_note_id(), None);
    assert!(editor.editor_view().unwrap().empty);
}

#[test]
fn title_edits_flush_synchronously() {
    let mut editor = controller();
    let id = editor.create_note().unwrap();
    editor.on_title_changed("draft").unwrap();

    let stored = editor.store().get_note(id).unwrap().unwrap();
    assert_eq!(stored.title, "draft");
}

#[test]
fn flush_against_a_deleted_note_is_a_silent_no_op() {
    let mut editor = controller();
    let id = editor.create_note().unwrap();
    editor.store_mut().delete_note(id).unwrap();

    // The surface still points at the removed id; edits must not crash.
    editor.on_title_changed("orphan").unwrap();
    editor.on_body_changed("<p>orphan</p>").unwrap();
    assert!(editor.store().list_notes().unwrap().is_empty());
}

#[test]
fn refresh_skips_the_body_while_it_holds_focus() {
    let mut editor = controller();
    let id = editor.create_note().unwrap();
    editor.on_body_changed("<p>typed</p>").unwrap();
    editor.focus_body();

    // Another writer path changes the stored content.
    editor
        .store_mut()
        .update_note(id, atlasnote_core::NotePatch::content("<p>external</p>"))
        .unwrap();

    editor.refresh_from_store().unwrap();
    assert_eq!(editor.surface().body, "<p>typed</p>");

    editor.blur_body().unwrap();
    assert_eq!(editor.surface().body, "<p>external</p>");
}

#[test]
fn refresh_blanks_the_surface_when_the_active_note_disappears() {
    let mut editor = controller();
    let id = editor.create_note().unwrap();
    editor.on_title_changed("vanishing").unwrap();
    editor.store_mut().delete_note(id).unwrap();

    editor.refresh_from_store().unwrap();
    assert_eq!(editor.active_note_id(), None);
    assert!(editor.editor_view().unwrap().empty);
}

#[test]
fn note_list_marks_selection_and_placeholder_titles() {
    let mut editor = controller();
    let untitled = editor.create_note().unwrap();
    editor.on_body_changed("<p>body only</p>").unwrap();

    let titled = editor.create_note().unwrap();
    editor.on_title_changed("named").unwrap();

    let list = editor.note_list().unwrap();
    assert_eq!(list.len(), 2);

    // Newest first; the second created note is active.
    assert_eq!(list[0].id, titled);
    assert!(list[0].selected);
    assert_eq!(list[0].title.as_deref(), Some("named"));

    assert_eq!(list[1].id, untitled);
    assert!(!list[1].selected);
    assert_eq!(list[1].title, None);
    assert_eq!(list[1].preview.as_deref(), Some("body only"));
}
