//! Key-value storage slot contract and in-memory implementation.
//!
//! # Responsibility
//! - Abstract the host persistence mechanism (browser `localStorage`,
//!   SQLite table, in-memory map) behind three string operations.
//!
//! # Invariants
//! - `set_item` fully overwrites the previous value for the key.
//! - `get_item` returns `Ok(None)` for absent keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Backend is not reachable (e.g. storage disabled by the browser).
    #[error("storage slot unavailable: {0}")]
    Unavailable(String),
    /// Backend rejected the operation (quota exceeded, I/O error, ...).
    #[error("storage slot operation `{op}` failed for key `{key}`: {message}")]
    Backend {
        op: &'static str,
        key: String,
        message: String,
    },
}

impl SlotError {
    pub fn backend(op: &'static str, key: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            op,
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Capability interface for a synchronous string key-value store.
pub trait StorageSlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> SlotResult<()>;
    fn remove_item(&self, key: &str) -> SlotResult<()>;
}

/// In-memory slot.
///
/// Clones share the same underlying map, which models several script
/// contexts (tabs) of one origin writing to the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageSlot for MemorySlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlot, StorageSlot};

    #[test]
    fn absent_key_reads_as_none() {
        let slot = MemorySlot::new();
        assert_eq!(slot.get_item("notes").unwrap(), None);
    }

    #[test]
    fn clones_share_storage() {
        let first = MemorySlot::new();
        let second = first.clone();
        first.set_item("notes", "[]").unwrap();
        assert_eq!(second.get_item("notes").unwrap().as_deref(), Some("[]"));

        second.remove_item("notes").unwrap();
        assert!(first.is_empty());
    }
}
