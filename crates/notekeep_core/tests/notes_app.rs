use notekeep_core::db::open_db_in_memory;
use notekeep_core::{
    deserialize_notes, CardAction, ChangeKind, KvStore, MemoryKvStore, Note, NoteDraft,
    NoteServiceError, NotesApp, SqliteKvStore, NOTES_STORAGE_KEY,
};
use std::collections::HashSet;
use uuid::Uuid;

fn stored_notes<S: KvStore>(app: &NotesApp<S>) -> Vec<Note> {
    let raw = app
        .service()
        .repository()
        .load_raw()
        .unwrap()
        .expect("notes should be stored");
    deserialize_notes(&raw).unwrap()
}

fn create<S: KvStore>(app: &mut NotesApp<S>, title: &str, content: &str) -> Note {
    app.open_create();
    app.form_mut().set_title(title);
    app.form_mut().set_content(content);
    app.submit_form().unwrap().expect("note should be created").note
}

#[test]
fn creating_a_note_prepends_one_entry_and_persists() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let first = create(&mut app, "first", "");
    let second = create(&mut app, "", "second body");

    let notes = app.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, second.id);
    assert_eq!(notes[1].id, first.id);
    assert_ne!(first.id, second.id);
    assert!(second.created_at >= first.created_at);
    assert!(!app.is_modal_open());
    assert_eq!(stored_notes(&app), app.notes());
}

#[test]
fn created_ids_are_unique() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    for idx in 0..25 {
        create(&mut app, &format!("note {idx}"), "");
    }
    let ids = app.notes().iter().map(|note| note.id).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 25);
}

#[test]
fn blank_submission_is_a_no_op_and_keeps_overlay_open() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    create(&mut app, "existing", "");
    let before = app.notes().to_vec();

    app.open_create();
    app.form_mut().set_title("   ");
    app.form_mut().set_content("\n\t");
    assert_eq!(app.submit_form().unwrap(), None);

    assert!(app.is_modal_open());
    assert_eq!(app.form().title(), "   ");
    assert_eq!(app.notes(), before.as_slice());
    assert_eq!(stored_notes(&app), before);
}

#[test]
fn blank_draft_is_rejected_by_direct_save() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let err = app.save(NoteDraft::new("", " ")).unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidDraft(_)));
    assert!(app.notes().is_empty());
}

#[test]
fn editing_changes_only_title_and_content_in_place() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let oldest = create(&mut app, "oldest", "a");
    let middle = create(&mut app, "middle", "b");
    create(&mut app, "newest", "c");

    app.open_edit(&middle);
    assert_eq!(app.selected().map(|note| note.id), Some(middle.id));
    assert_eq!(app.form().title(), "middle");
    assert_eq!(app.form().content(), "b");
    app.form_mut().set_title("middle (edited)");
    app.form_mut().set_content("");
    let change = app.submit_form().unwrap().expect("edit should save");

    assert_eq!(change.kind, ChangeKind::Updated);
    let notes = app.notes();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[1].id, middle.id);
    assert_eq!(notes[1].created_at, middle.created_at);
    assert_eq!(notes[1].title, "middle (edited)");
    assert_eq!(notes[1].content, "");
    assert_eq!(notes[2], oldest);
    assert!(!app.is_modal_open());
    assert!(app.selected().is_none());
    assert_eq!(stored_notes(&app), app.notes());
}

#[test]
fn updating_unknown_id_leaves_list_untouched_and_closes_overlay() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    create(&mut app, "keep", "");
    let before = app.notes().to_vec();

    app.open_create();
    let missing = Uuid::new_v4();
    let draft = NoteDraft {
        id: Some(missing),
        title: "ghost".to_string(),
        content: String::new(),
    };
    let err = app.save(draft).unwrap_err();

    assert!(matches!(err, NoteServiceError::NoteNotFound(id) if id == missing));
    assert_eq!(app.notes(), before.as_slice());
    assert!(!app.is_modal_open());
}

#[test]
fn deleting_removes_exactly_that_entry() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let a = create(&mut app, "a", "");
    let b = create(&mut app, "b", "");
    let c = create(&mut app, "c", "");

    let change = app.delete(b.id).unwrap();
    assert_eq!(change.kind, ChangeKind::Deleted);
    assert_eq!(change.note.id, b.id);

    let ids = app.notes().iter().map(|note| note.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![c.id, a.id]);
    assert_eq!(stored_notes(&app), app.notes());

    let err = app.delete(b.id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
    assert_eq!(app.notes().len(), 2);
}

#[test]
fn close_discards_draft_without_saving() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let note = create(&mut app, "original", "");

    app.open_edit(&note);
    app.form_mut().set_title("unsaved change");
    app.close();

    assert!(!app.is_modal_open());
    assert!(app.selected().is_none());
    assert_eq!(app.form().title(), "");
    assert_eq!(app.notes()[0].title, "original");

    app.open_create();
    assert_eq!(app.form().title(), "");
    assert_eq!(app.form().target(), None);
}

#[test]
fn card_actions_route_to_edit_and_delete() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    create(&mut app, "first", "");
    create(&mut app, "second", "");

    let edit = app.cards().nth(1).map(|card| card.edit()).unwrap();
    assert_eq!(app.dispatch(edit).unwrap(), None);
    assert!(app.is_modal_open());
    assert_eq!(app.form().title(), "first");

    let target = app.notes()[1].id;
    let change = app
        .dispatch(CardAction::Delete(target))
        .unwrap()
        .expect("delete should report a change");
    assert_eq!(change.note.id, target);
    assert!(!app.is_modal_open(), "deleting the edit target closes the overlay");
    assert_eq!(app.notes().len(), 1);
}

#[test]
fn open_edit_by_id_rejects_unknown_note() {
    let mut app = NotesApp::mount(MemoryKvStore::new());
    let err = app.open_edit_by_id(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, NoteServiceError::NoteNotFound(_)));
    assert!(!app.is_modal_open());
}

#[test]
fn failed_write_keeps_in_memory_change_and_old_stored_value() {
    let mut app = NotesApp::mount(MemoryKvStore::with_quota(400));
    let kept = create(&mut app, "small", "");
    let stored_before = stored_notes(&app);

    app.open_create();
    app.form_mut().set_content("x".repeat(500));
    let change = app.submit_form().unwrap().expect("note should be created");

    assert!(!change.persisted);
    assert_eq!(app.notes().len(), 2);
    assert_eq!(app.notes()[1].id, kept.id);
    assert_eq!(stored_notes(&app), stored_before);
}

#[test]
fn sessions_share_notes_through_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let open = || {
        SqliteKvStore::try_new(notekeep_core::db::open_db(&path).unwrap()).unwrap()
    };

    let created = {
        let mut app = NotesApp::mount(open());
        create(&mut app, "persisted", "across sessions")
    };

    let app = NotesApp::mount(open());
    assert_eq!(app.notes(), &[created][..]);
}

#[test]
fn render_shows_empty_state_then_cards_and_overlay() {
    let store = SqliteKvStore::try_new(open_db_in_memory().unwrap()).unwrap();
    let mut app = NotesApp::mount(store);
    assert!(app.render().contains("No notes yet!"));

    create(&mut app, "Groceries", "milk");
    app.open_create();
    let screen = app.render();
    assert!(screen.contains("Groceries"));
    assert!(screen.contains("Add New Note"));
    assert!(!screen.contains("No notes yet!"));
    assert!(app
        .service()
        .repository()
        .store()
        .get_item(NOTES_STORAGE_KEY)
        .unwrap()
        .is_some());
}
