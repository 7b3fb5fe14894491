//! Notes collection store over a storage slot.
//!
//! # Responsibility
//! - Load/save the full notes collection as one JSON array blob.
//! - Allocate note ids from a counter persisted next to the collection.
//!
//! # Invariants
//! - Absent collection key loads as an empty collection.
//! - Malformed collection or counter values surface as `StoreError::Malformed`.
//! - Allocated ids are strictly greater than every id previously allocated
//!   and every id present in the collection.

use crate::model::note::{max_id, Note, NoteId};
use crate::store::slot::{SlotError, StorageSlot};
use log::{debug, error};
use thiserror::Error;

const NEXT_ID_SUFFIX: &str = ".next_id";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for collection persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted value exists but cannot be parsed.
    #[error("malformed value under key `{key}`: {message}")]
    Malformed { key: String, message: String },
    /// Collection could not be serialized.
    #[error("failed to encode notes collection: {0}")]
    Encode(#[source] serde_json::Error),
    /// Underlying slot failure.
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// Whole-collection store for notes.
pub struct NoteStore<S: StorageSlot> {
    slot: S,
    key: String,
    counter_key: String,
}

impl<S: StorageSlot> NoteStore<S> {
    /// Creates a store that persists the collection under `key`.
    pub fn new(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let counter_key = format!("{key}{NEXT_ID_SUFFIX}");
        Self {
            slot,
            key,
            counter_key,
        }
    }

    /// Storage key of the collection blob.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Loads the full collection.
    ///
    /// # Errors
    /// - `Malformed` when the blob is not a JSON array of notes.
    /// - `Slot` when the backend read fails.
    pub fn load_all(&self) -> StoreResult<Vec<Note>> {
        let Some(raw) = self.slot.get_item(&self.key)? else {
            debug!("event=notes_load module=store status=ok source=absent count=0");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                debug!(
                    "event=notes_load module=store status=ok count={} bytes={}",
                    notes.len(),
                    raw.len()
                );
                Ok(notes)
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error error_code=malformed_blob key={} bytes={} error={}",
                    self.key,
                    raw.len(),
                    err
                );
                Err(StoreError::Malformed {
                    key: self.key.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Serializes and overwrites the full collection.
    pub fn save_all(&self, notes: &[Note]) -> StoreResult<()> {
        let raw = serde_json::to_string(notes).map_err(StoreError::Encode)?;
        if let Err(err) = self.slot.set_item(&self.key, &raw) {
            error!(
                "event=notes_save module=store status=error error_code=slot_write_failed count={} error={}",
                notes.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=notes_save module=store status=ok count={} bytes={}",
            notes.len(),
            raw.len()
        );
        Ok(())
    }

    /// Allocates the next note id and persists the advanced counter.
    ///
    /// The id is `max(counter, max(existing) + 1)` so collections written
    /// before the counter existed never produce duplicates.
    pub fn allocate_id(&self, notes: &[Note]) -> StoreResult<NoteId> {
        let counter = self.read_counter()?;
        let after_existing = max_id(notes).map_or(0, |id| id.saturating_add(1));
        let id = counter.max(after_existing);
        let next = id.saturating_add(1);
        self.slot.set_item(&self.counter_key, &next.to_string())?;
        debug!("event=note_id_alloc module=store status=ok id={id}");
        Ok(id)
    }

    /// Removes both the collection and the counter.
    pub fn clear(&self) -> StoreResult<()> {
        self.slot.remove_item(&self.key)?;
        self.slot.remove_item(&self.counter_key)?;
        debug!("event=notes_clear module=store status=ok");
        Ok(())
    }

    fn read_counter(&self) -> StoreResult<NoteId> {
        match self.slot.get_item(&self.counter_key)? {
            None => Ok(0),
            Some(raw) => raw.trim().parse::<NoteId>().map_err(|err| {
                error!(
                    "event=note_id_alloc module=store status=error error_code=malformed_counter key={}",
                    self.counter_key
                );
                StoreError::Malformed {
                    key: self.counter_key.clone(),
                    message: err.to_string(),
                }
            }),
        }
    }
}
