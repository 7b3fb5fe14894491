//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/list APIs over the whole-collection store.
//!
//! # Invariants
//! - Every mutation loads the latest persisted collection first; nothing is
//!   cached between calls.
//! - `update_note` changes the first note with a matching id only.
//! - `delete_note` removes every note with a matching id and always persists,
//!   so repeating it is harmless.

use crate::model::note::{find_first_mut, remove_all, Note, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use crate::store::slot::StorageSlot;
use log::{info, warn};
use thiserror::Error;

pub type NoteResult<T> = Result<T, NoteServiceError>;

/// Service error for note use-cases.
#[derive(Debug, Error)]
pub enum NoteServiceError {
    /// Target id is not in the persisted collection (stale reference).
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Note service facade over a notes store.
pub struct NoteService<S: StorageSlot> {
    store: NoteStore<S>,
}

impl<S: StorageSlot> NoteService<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Appends a new empty note and returns it.
    pub fn create_note(&self) -> NoteResult<Note> {
        self.create_note_with("")
    }

    /// Appends a new note with initial content and returns it.
    pub fn create_note_with(&self, content: impl Into<String>) -> NoteResult<Note> {
        let mut notes = self.store.load_all()?;
        let id = self.store.allocate_id(&notes)?;
        let note = Note::new(id, content);
        notes.push(note.clone());
        self.store.save_all(&notes)?;
        info!(
            "event=note_create module=service status=ok id={} count={}",
            id,
            notes.len()
        );
        Ok(note)
    }

    /// Replaces the content of the first note with `id`.
    ///
    /// # Errors
    /// - `NoteNotFound` when no persisted note has `id`.
    pub fn update_note(&self, id: NoteId, content: impl Into<String>) -> NoteResult<Note> {
        let mut notes = self.store.load_all()?;
        let Some(note) = find_first_mut(&mut notes, id) else {
            warn!("event=note_update module=service status=error error_code=not_found id={id}");
            return Err(NoteServiceError::NoteNotFound(id));
        };
        note.content = content.into();
        let updated = note.clone();
        self.store.save_all(&notes)?;
        info!(
            "event=note_update module=service status=ok id={} chars={}",
            id,
            updated.content.chars().count()
        );
        Ok(updated)
    }

    /// Removes every note with `id` and returns how many were removed.
    pub fn delete_note(&self, id: NoteId) -> NoteResult<usize> {
        let mut notes = self.store.load_all()?;
        let removed = remove_all(&mut notes, id);
        self.store.save_all(&notes)?;
        info!(
            "event=note_delete module=service status=ok id={} removed={} count={}",
            id,
            removed,
            notes.len()
        );
        Ok(removed)
    }

    /// Gets the first note with `id`.
    pub fn get_note(&self, id: NoteId) -> NoteResult<Option<Note>> {
        Ok(self
            .store
            .load_all()?
            .into_iter()
            .find(|note| note.id == id))
    }

    /// Lists the collection in persisted order.
    pub fn list_notes(&self) -> NoteResult<Vec<Note>> {
        Ok(self.store.load_all()?)
    }

    /// Drops every note and the id counter.
    pub fn reset(&self) -> NoteResult<()> {
        self.store.clear()?;
        info!("event=notes_reset module=service status=ok");
        Ok(())
    }
}
