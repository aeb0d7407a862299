//! Note sequence persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole note sequence to JSON under one fixed key.
//! - Load and validate the sequence back from the store.
//!
//! # Invariants
//! - The sequence is written and read as one unit; no partial writes.
//! - Stored order is preserved exactly (newest-created first).
//! - Read paths reject duplicate ids instead of masking them.

use crate::model::note::{Note, NoteId};
use crate::store::{KvStore, StoreError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed store key holding the serialized note sequence.
pub const NOTES_STORAGE_KEY: &str = "notekeep-notes-data";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note sequence persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store read/write failure.
    Store(StoreError),
    /// Stored value is not a valid JSON note sequence.
    Serialization(serde_json::Error),
    /// Stored value parsed but violates sequence invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid note sequence json: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Serializes the note sequence to its stored JSON form.
pub fn serialize_notes(notes: &[Note]) -> RepoResult<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Parses a stored JSON value back into a note sequence.
///
/// # Errors
/// - `Serialization` when the value is not a JSON array of notes.
/// - `InvalidData` when two entries share an id.
pub fn deserialize_notes(raw: &str) -> RepoResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_str(raw)?;
    if let Some(id) = first_duplicate_id(&notes) {
        return Err(RepoError::InvalidData(format!("duplicate note id `{id}`")));
    }
    Ok(notes)
}

fn first_duplicate_id(notes: &[Note]) -> Option<NoteId> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes.iter().map(|note| note.id).find(|id| !seen.insert(*id))
}

/// Persists the note sequence as one store entry.
pub struct NoteListRepository<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> NoteListRepository<S> {
    /// Uses the default `NOTES_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, NOTES_STORAGE_KEY)
    }

    /// Uses a caller-provided store key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Loads the stored sequence. A missing entry is an empty sequence.
    pub fn load_notes(&self) -> RepoResult<Vec<Note>> {
        match self.store.get_item(self.key.as_str())? {
            Some(raw) => deserialize_notes(raw.as_str()),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the stored sequence with `notes`.
    pub fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let raw = serialize_notes(notes)?;
        self.store.set_item(self.key.as_str(), raw.as_str())?;
        Ok(())
    }

    /// Returns the raw stored value without parsing it.
    pub fn load_raw(&self) -> RepoResult<Option<String>> {
        Ok(self.store.get_item(self.key.as_str())?)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
