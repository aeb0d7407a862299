//! Note summary card.
//!
//! Pure view over one `Note`; actions are returned to the container rather
//! than applied here.

use crate::model::note::{Note, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const CREATED_DATE_FORMAT: &str = "%Y-%m-%d";
const UNTITLED_LABEL: &str = "(untitled)";

/// Action triggered from a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Open the form overlay for this note.
    Edit(Note),
    /// Remove the note with this id.
    Delete(NoteId),
}

/// Display of one note plus its edit/delete triggers.
#[derive(Debug, Clone, Copy)]
pub struct NoteCard<'a> {
    note: &'a Note,
}

impl<'a> NoteCard<'a> {
    pub fn new(note: &'a Note) -> Self {
        Self { note }
    }

    pub fn note(&self) -> &'a Note {
        self.note
    }

    /// Creation date as shown in the card footer.
    pub fn created_label(&self) -> String {
        self.note.created_at.format(CREATED_DATE_FORMAT).to_string()
    }

    pub fn edit(&self) -> CardAction {
        CardAction::Edit(self.note.clone())
    }

    pub fn delete(&self) -> CardAction {
        CardAction::Delete(self.note.id)
    }

    /// One-line summary: id, date, title and collapsed content, cut to
    /// `width` characters.
    pub fn summary(&self, width: usize) -> String {
        let mut title = collapse_whitespace(&self.note.title);
        if title.is_empty() {
            title = UNTITLED_LABEL.to_string();
        }
        let body = collapse_whitespace(&self.note.content);
        let line = if body.is_empty() {
            format!("{}  {}  {title}", self.note.id, self.created_label())
        } else {
            format!("{}  {}  {title}: {body}", self.note.id, self.created_label())
        };
        truncate_chars(&line, width)
    }

    /// Full multi-line rendering of the card.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(self.note.title.as_str());
        out.push('\n');
        if !self.note.content.is_empty() {
            out.push_str(self.note.content.as_str());
            out.push('\n');
        }
        out.push_str(&format!(
            "{}  [edit] [delete]  id={}",
            self.created_label(),
            self.note.id
        ));
        out
    }
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, " ").trim().to_string()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{CardAction, NoteCard};
    use crate::model::note::Note;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn fixed_note(title: &str, content: &str) -> Note {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Note::with_id(Uuid::new_v4(), title, content, created_at)
    }

    #[test]
    fn actions_carry_note_and_id() {
        let note = fixed_note("a", "b");
        let card = NoteCard::new(&note);
        assert_eq!(card.edit(), CardAction::Edit(note.clone()));
        assert_eq!(card.delete(), CardAction::Delete(note.id));
    }

    #[test]
    fn summary_collapses_whitespace_and_truncates() {
        let note = fixed_note("Groceries", "milk\n\n  eggs\tbread");
        let card = NoteCard::new(&note);

        let full = card.summary(200);
        assert!(full.contains("2024-05-01"));
        assert!(full.ends_with("Groceries: milk eggs bread"));

        let short = card.summary(20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn summary_labels_untitled_notes() {
        let note = fixed_note("  ", "body only");
        assert!(NoteCard::new(&note).summary(200).contains("(untitled): body only"));
    }
}
