//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` record and the `NoteDraft` submitted by forms.
//! - Own the blank-draft rule shared by the form and the service.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at` is set once at creation and never rewritten.
//! - A draft with both title and content blank is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// One user-authored note.
///
/// Field names are serialized in camelCase (`createdAt`) to keep the stored
/// JSON shape stable across front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable unique id.
    pub id: NoteId,
    /// Free-text title. May be empty when `content` is not.
    pub title: String,
    /// Free-text body. May be empty when `title` is not.
    pub content: String,
    /// Creation instant in UTC, serialized as RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a generated id stamped with the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, Utc::now())
    }

    /// Creates a note with caller-provided identity and creation time.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Replaces title and content in place. Identity and timestamp are kept.
    pub fn revise(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }
}

/// Partial note handed from the form to the container on submit.
///
/// `id == None` means "create", `Some(id)` means "update that note".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Draft for a new note.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Draft pre-filled from an existing note (edit mode).
    pub fn for_note(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    /// Returns whether both title and content are empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Rejects blank drafts.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.is_blank() {
            return Err(NoteValidationError::BlankDraft);
        }
        Ok(())
    }
}

/// Validation failure for note drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title and content are both blank.
    BlankDraft,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDraft => write!(f, "note title and content cannot both be blank"),
        }
    }
}

impl Error for NoteValidationError {}

#[cfg(test)]
mod tests {
    use super::{Note, NoteDraft, NoteValidationError};

    #[test]
    fn draft_with_only_whitespace_is_blank() {
        let draft = NoteDraft::new("  ", "\n\t");
        assert!(draft.is_blank());
        assert_eq!(draft.validate(), Err(NoteValidationError::BlankDraft));
    }

    #[test]
    fn draft_with_title_only_is_valid() {
        assert!(NoteDraft::new("groceries", "").validate().is_ok());
        assert!(NoteDraft::new("", "milk").validate().is_ok());
    }

    #[test]
    fn revise_keeps_identity_and_timestamp() {
        let mut note = Note::new("a", "b");
        let (id, created_at) = (note.id, note.created_at);
        note.revise("c", "d");
        assert_eq!(note.id, id);
        assert_eq!(note.created_at, created_at);
        assert_eq!(note.title, "c");
        assert_eq!(note.content, "d");
    }

    #[test]
    fn serializes_with_camel_case_timestamp_field() {
        let note = Note::new("t", "c");
        let json = serde_json::to_string(&note).expect("note should serialize");
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("created_at"));
    }
}
