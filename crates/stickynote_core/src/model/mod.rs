//! Domain model for sticky notes.
//!
//! # Responsibility
//! - Define the note record shared by store, service and view layers.
//!
//! # Invariants
//! - A note is identified by an integer `NoteId` allocated by the store.
//! - Collection order is display order; no other ordering exists.

pub mod note;
