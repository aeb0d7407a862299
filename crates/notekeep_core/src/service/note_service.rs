//! Note use-case service.
//!
//! # Responsibility
//! - Hold the in-memory note sequence for one session.
//! - Apply create/update/delete semantics and persist after every change.
//!
//! # Invariants
//! - New notes are prepended; updates and deletes never reorder survivors.
//! - Updates touch only `title` and `content`.
//! - A failed store write never rolls back the in-memory change.
//! - A failed load starts the session from an empty sequence.

use crate::model::note::{Note, NoteDraft, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteListRepository, RepoError};
use crate::store::KvStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Draft has both title and content blank.
    InvalidDraft(NoteValidationError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDraft(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDraft(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidDraft(value)
    }
}

/// Kind of sequence mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Result of one sequence mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChange {
    /// The note after the change (or the removed note for `Deleted`).
    pub note: Note,
    pub kind: ChangeKind,
    /// `false` when the store write failed; the session keeps the change.
    pub persisted: bool,
}

/// Session-scoped note list backed by a repository.
pub struct NoteService<S: KvStore> {
    repo: NoteListRepository<S>,
    notes: Vec<Note>,
}

impl<S: KvStore> NoteService<S> {
    /// Loads the persisted sequence, falling back to empty on any failure.
    pub fn mount(repo: NoteListRepository<S>) -> Self {
        let notes = match repo.load_notes() {
            Ok(notes) => {
                info!(
                    "event=notes_load module=service status=ok count={}",
                    notes.len()
                );
                notes
            }
            Err(err) => {
                error!(
                    "event=notes_load module=service status=error error_code={} error={err}",
                    load_error_code(&err)
                );
                Vec::new()
            }
        };
        Self { repo, notes }
    }

    /// Notes in display order (newest-created first).
    pub fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    pub fn get_note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &NoteListRepository<S> {
        &self.repo
    }

    /// Creates (no id) or updates (with id) one note, then persists.
    ///
    /// # Errors
    /// - `InvalidDraft` when title and content are both blank.
    /// - `NoteNotFound` when the draft id matches no note.
    pub fn save_note(&mut self, draft: NoteDraft) -> Result<NoteChange, NoteServiceError> {
        draft.validate()?;

        let (note, kind) = match draft.id {
            Some(id) => {
                let existing = self
                    .notes
                    .iter_mut()
                    .find(|note| note.id == id)
                    .ok_or(NoteServiceError::NoteNotFound(id))?;
                existing.revise(draft.title, draft.content);
                info!("event=note_update module=service status=ok note_id={id}");
                (existing.clone(), ChangeKind::Updated)
            }
            None => {
                let note = Note::new(draft.title, draft.content);
                self.notes.insert(0, note.clone());
                info!(
                    "event=note_create module=service status=ok note_id={} count={}",
                    note.id,
                    self.notes.len()
                );
                (note, ChangeKind::Created)
            }
        };

        let persisted = self.persist();
        Ok(NoteChange {
            note,
            kind,
            persisted,
        })
    }

    /// Removes the note with `id`, then persists.
    pub fn delete_note(&mut self, id: NoteId) -> Result<NoteChange, NoteServiceError> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NoteServiceError::NoteNotFound(id))?;
        let note = self.notes.remove(index);
        info!(
            "event=note_delete module=service status=ok note_id={id} count={}",
            self.notes.len()
        );

        let persisted = self.persist();
        Ok(NoteChange {
            note,
            kind: ChangeKind::Deleted,
            persisted,
        })
    }

    fn persist(&mut self) -> bool {
        match self.repo.save_notes(&self.notes) {
            Ok(()) => {
                info!(
                    "event=notes_save module=service status=ok count={}",
                    self.notes.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=notes_save module=service status=error error_code=notes_save_failed count={} error={err}",
                    self.notes.len()
                );
                false
            }
        }
    }
}

fn load_error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Store(_) => "notes_read_failed",
        RepoError::Serialization(_) => "notes_parse_failed",
        RepoError::InvalidData(_) => "notes_invalid_data",
    }
}
