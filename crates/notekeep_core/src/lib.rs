//! Core domain logic for notekeep.
//! This crate is the single source of truth for note invariants; front ends
//! only drive `NotesApp` and render what it exposes.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod ui;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError};
pub use repo::note_repo::{
    deserialize_notes, serialize_notes, NoteListRepository, RepoError, RepoResult,
    NOTES_STORAGE_KEY,
};
pub use service::note_service::{ChangeKind, NoteChange, NoteService, NoteServiceError};
pub use store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use ui::app::NotesApp;
pub use ui::card::{CardAction, NoteCard};
pub use ui::form::{FormSubmission, NoteForm};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
