//! Add/edit form overlay state.
//!
//! # Invariants
//! - The draft is re-initialised whenever the target note changes.
//! - Blank submissions are ignored and leave the draft untouched.

use crate::model::note::{Note, NoteDraft, NoteId};

/// Outcome of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Both fields were blank; nothing to save.
    Ignored,
    /// Draft ready for the container's save path.
    Submitted(NoteDraft),
}

/// Draft title/content for create or edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    target: Option<NoteId>,
    title: String,
    content: String,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-initialises the draft from `note` (edit mode) or empty (create mode).
    pub fn load(&mut self, note: Option<&Note>) {
        match note {
            Some(note) => {
                self.target = Some(note.id);
                self.title = note.title.clone();
                self.content = note.content.clone();
            }
            None => self.discard(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Id of the note being edited, `None` in create mode.
    pub fn target(&self) -> Option<NoteId> {
        self.target
    }

    pub fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() {
            "Edit Note"
        } else {
            "Add New Note"
        }
    }

    /// Builds the draft to save, or `Ignored` when both fields are blank.
    ///
    /// Text is submitted as typed; only the blank check trims.
    pub fn submit(&self) -> FormSubmission {
        let draft = NoteDraft {
            id: self.target,
            title: self.title.clone(),
            content: self.content.clone(),
        };
        if draft.is_blank() {
            return FormSubmission::Ignored;
        }
        FormSubmission::Submitted(draft)
    }

    /// Drops the draft and target without saving.
    pub fn discard(&mut self) {
        self.target = None;
        self.title.clear();
        self.content.clear();
    }

    /// Text rendering of the overlay.
    pub fn render(&self) -> String {
        format!(
            "┌ {}\n│ Title:   {}\n│ Content: {}\n└ [Save] [x]",
            self.heading(),
            self.title,
            self.content.replace('\n', "\n│          ")
        )
    }
}
