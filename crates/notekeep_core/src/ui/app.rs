//! Root container: note list, overlay visibility and edit target.
//!
//! # Responsibility
//! - Own all mutable UI state; leaves (card, form) only return actions.
//! - Route form submissions and card actions into the note service.
//!
//! # Invariants
//! - `selected` is `Some` only while the overlay is open in edit mode.
//! - Every save attempt closes the overlay; ignored submissions do not.
//! - Only this container mutates the note list.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::note_repo::NoteListRepository;
use crate::service::note_service::{NoteChange, NoteService, NoteServiceError};
use crate::store::KvStore;
use crate::ui::card::{CardAction, NoteCard};
use crate::ui::form::{FormSubmission, NoteForm};
use log::debug;

const APP_HEADING: &str = "My Notes";
const EMPTY_STATE: &str = "No notes yet!\nClick 'Add Note' to get started.";
const CARD_SEPARATOR: &str = "\n----\n";

/// Top-level note-taking state.
pub struct NotesApp<S: KvStore> {
    service: NoteService<S>,
    modal_open: bool,
    selected: Option<Note>,
    form: NoteForm,
}

impl<S: KvStore> NotesApp<S> {
    /// Mounts the app on `store`, loading the persisted notes.
    ///
    /// Load failures are logged and yield an empty list. Mounting never
    /// writes to the store.
    pub fn mount(store: S) -> Self {
        Self::with_repository(NoteListRepository::new(store))
    }

    /// Mounts the app on an explicitly keyed repository.
    pub fn with_repository(repo: NoteListRepository<S>) -> Self {
        Self {
            service: NoteService::mount(repo),
            modal_open: false,
            selected: None,
            form: NoteForm::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        self.service.notes()
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.service.get_note(id)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Current edit target, `None` in create mode or when closed.
    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &NoteForm {
        &self.form
    }

    /// Mutable draft access while the overlay is open.
    pub fn form_mut(&mut self) -> &mut NoteForm {
        &mut self.form
    }

    pub fn service(&self) -> &NoteService<S> {
        &self.service
    }

    /// Opens the overlay with an empty draft.
    pub fn open_create(&mut self) {
        self.open(None);
    }

    /// Opens the overlay with a draft initialised from `note`.
    pub fn open_edit(&mut self, note: &Note) {
        self.open(Some(note.clone()));
    }

    /// Resolves `id` and opens the overlay in edit mode.
    pub fn open_edit_by_id(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        let note = self
            .service
            .get_note(id)
            .cloned()
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        self.open(Some(note));
        Ok(())
    }

    /// Closes the overlay and discards the draft.
    pub fn close(&mut self) {
        self.selected = None;
        self.modal_open = false;
        self.form.discard();
        debug!("event=modal_close module=ui status=ok");
    }

    /// Saves `draft` (create or update) and closes the overlay.
    pub fn save(&mut self, draft: NoteDraft) -> Result<NoteChange, NoteServiceError> {
        let result = self.service.save_note(draft);
        self.close();
        result
    }

    /// Submits the current form draft.
    ///
    /// Returns `Ok(None)` when the submission was ignored (both fields blank);
    /// the overlay then stays open with the draft intact.
    pub fn submit_form(&mut self) -> Result<Option<NoteChange>, NoteServiceError> {
        match self.form.submit() {
            FormSubmission::Ignored => {
                debug!("event=form_submit module=ui status=ignored reason=blank");
                Ok(None)
            }
            FormSubmission::Submitted(draft) => self.save(draft).map(Some),
        }
    }

    /// Deletes the note with `id`, without confirmation.
    ///
    /// Closes the overlay when the deleted note is the current edit target.
    pub fn delete(&mut self, id: NoteId) -> Result<NoteChange, NoteServiceError> {
        let change = self.service.delete_note(id)?;
        if self.selected.as_ref().is_some_and(|note| note.id == id) {
            self.close();
        }
        Ok(change)
    }

    /// Applies an action emitted by a note card.
    pub fn dispatch(&mut self, action: CardAction) -> Result<Option<NoteChange>, NoteServiceError> {
        match action {
            CardAction::Edit(note) => {
                self.open_edit(&note);
                Ok(None)
            }
            CardAction::Delete(id) => self.delete(id).map(Some),
        }
    }

    /// Cards for the current list, in display order.
    pub fn cards(&self) -> impl Iterator<Item = NoteCard<'_>> {
        self.service.notes().iter().map(NoteCard::new)
    }

    /// Text rendering of the whole screen.
    pub fn render(&self) -> String {
        let mut out = format!("{APP_HEADING}  [+ Add Note]\n\n");
        if self.service.is_empty() {
            out.push_str(EMPTY_STATE);
        } else {
            let cards = self
                .cards()
                .map(|card| card.render())
                .collect::<Vec<_>>();
            out.push_str(&cards.join(CARD_SEPARATOR));
        }
        if self.modal_open {
            out.push_str("\n\n");
            out.push_str(&self.form.render());
        }
        out
    }

    fn open(&mut self, note: Option<Note>) {
        self.form.load(note.as_ref());
        debug!(
            "event=modal_open module=ui status=ok mode={}",
            if note.is_some() { "edit" } else { "create" }
        );
        self.selected = note;
        self.modal_open = true;
    }
}
