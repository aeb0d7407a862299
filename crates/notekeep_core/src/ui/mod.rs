//! Front-end state: root container plus its two presentational leaves.
//!
//! # Responsibility
//! - Model overlay visibility, edit target and form drafts without tying
//!   them to a rendering toolkit.
//! - Keep data flow one-way: state in, actions out.

pub mod app;
pub mod card;
pub mod form;
