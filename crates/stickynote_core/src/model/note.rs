//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note shape (`{"id": <integer>, "content": "<string>"}`).
//! - Provide first-match and filter helpers over note collections.
//!
//! # Invariants
//! - `content` is stored verbatim; no length or charset validation.
//! - Serialized field names are exactly `id` and `content`.

use serde::{Deserialize, Serialize};

/// Integer identifier of one note inside a collection.
pub type NoteId = u64;

/// One user-authored text entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Allocated by the store counter; see `NoteStore::allocate_id`.
    pub id: NoteId,
    /// Free text, empty at creation.
    pub content: String,
}

impl Note {
    /// Creates a note with empty content.
    pub fn empty(id: NoteId) -> Self {
        Self::new(id, String::new())
    }

    /// Creates a note with the given content.
    pub fn new(id: NoteId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

/// Returns the first note with `id`, if any.
///
/// Legacy collections may contain duplicate ids; only the first match is
/// returned in that case.
pub fn find_first_mut(notes: &mut [Note], id: NoteId) -> Option<&mut Note> {
    notes.iter_mut().find(|note| note.id == id)
}

/// Removes every note with `id` and returns how many were removed.
pub fn remove_all(notes: &mut Vec<Note>, id: NoteId) -> usize {
    let before = notes.len();
    notes.retain(|note| note.id != id);
    before - notes.len()
}

/// Returns the largest id present in the collection.
pub fn max_id(notes: &[Note]) -> Option<NoteId> {
    notes.iter().map(|note| note.id).max()
}
