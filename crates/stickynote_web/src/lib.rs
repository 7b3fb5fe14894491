//! Browser bridge for the StickyNote widget.
//!
//! # Responsibility
//! - Back the core store with `window.localStorage`.
//! - Render notes as `<textarea>` fields inside the host page container.
//! - Expose `mount`/`unmount` to JavaScript.

pub mod api;
pub mod console;
pub mod dom;
pub mod storage;
#[cfg(all(test, target_arch = "wasm32"))]
mod test_support;

pub use console::{init_console_logging, ConsoleLogger};
pub use dom::DomSurface;
pub use storage::LocalStorageSlot;
