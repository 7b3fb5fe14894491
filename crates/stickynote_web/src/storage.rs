//! `localStorage`-backed storage slot.
//!
//! # Invariants
//! - Every browser error is mapped to `SlotError`; nothing panics.

use stickynote_core::{SlotError, SlotResult, StorageSlot};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Storage slot over the origin's `localStorage`.
pub struct LocalStorageSlot {
    storage: Storage,
}

impl LocalStorageSlot {
    /// Resolves `window.localStorage`.
    ///
    /// # Errors
    /// - `Unavailable` outside a window context or when storage is disabled.
    pub fn from_window() -> SlotResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| SlotError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|err| SlotError::Unavailable(js_message(&err)))?
            .ok_or_else(|| SlotError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl StorageSlot for LocalStorageSlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| SlotError::backend("get_item", key, js_message(&err)))
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| SlotError::backend("set_item", key, js_message(&err)))
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| SlotError::backend("remove_item", key, js_message(&err)))
    }
}

/// Best-effort readable text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
