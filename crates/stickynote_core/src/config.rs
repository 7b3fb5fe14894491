//! Widget configuration.
//!
//! # Responsibility
//! - Name the storage key and the host selectors the widget binds to.
//!
//! # Invariants
//! - Every field has a default, so `{}` is a complete configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORAGE_KEY: &str = "notes";
pub const DEFAULT_CONTAINER_SELECTOR: &str = "#app";
pub const DEFAULT_ADD_CONTROL_SELECTOR: &str = ".add-note";
pub const DEFAULT_NOTE_CLASS: &str = "note";

/// Host-provided settings for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Storage key of the collection blob. The id counter lives at
    /// `<storage_key>.next_id`.
    pub storage_key: String,
    /// Selector of the container that receives note fields.
    pub container_selector: String,
    /// Selector of the pre-existing add control inside the container.
    pub add_control_selector: String,
    /// CSS class applied to every rendered note field.
    pub note_class: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            add_control_selector: DEFAULT_ADD_CONTROL_SELECTOR.to_string(),
            note_class: DEFAULT_NOTE_CLASS.to_string(),
        }
    }
}

impl NotesConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
