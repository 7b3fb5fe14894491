//! Core of the StickyNote widget.
//!
//! Notes live as one JSON array in a key-value storage slot; the controller
//! renders them onto an injected surface and applies user gestures as
//! read-modify-write cycles over that slot.

pub mod config;
pub mod controller;
#[cfg(feature = "native")]
pub mod db;
#[cfg(feature = "native")]
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::NotesConfig;
pub use controller::{ControllerError, ControllerResult, NoteController};
#[cfg(feature = "native")]
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use service::note_service::{NoteResult, NoteService, NoteServiceError};
#[cfg(feature = "native")]
pub use store::SqliteSlot;
pub use store::{MemorySlot, NoteStore, SlotError, SlotResult, StorageSlot, StoreError, StoreResult};
pub use view::{
    Dispatch, MemoryElement, MemorySurface, NoteEvent, NoteSurface, NoteView, SurfaceError,
    SurfaceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
