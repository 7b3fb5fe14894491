//! Persistence layer: key-value storage slots and the notes blob store.
//!
//! # Responsibility
//! - Define the `StorageSlot` capability every host backend implements.
//! - Keep JSON (de)serialization of the collection inside one boundary.
//!
//! # Invariants
//! - The collection is always read and written as one blob; no partial writes.
//! - Absent keys are not errors; malformed values are.

pub mod note_store;
pub mod slot;
#[cfg(feature = "native")]
pub mod sqlite_slot;

pub use note_store::{NoteStore, StoreError, StoreResult};
pub use slot::{MemorySlot, SlotError, SlotResult, StorageSlot};
#[cfg(feature = "native")]
pub use sqlite_slot::SqliteSlot;
