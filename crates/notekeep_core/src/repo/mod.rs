//! Repository layer over the key-value store.
//!
//! # Responsibility
//! - Define use-case oriented persistence for the note sequence.
//! - Isolate JSON encoding and store keys from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   store transport errors.

pub mod note_repo;
