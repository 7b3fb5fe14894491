//! JavaScript-facing entry points.
//!
//! # Contract
//! - `mount` must run after the container and add control exist.
//! - Errors are returned as `Error` strings; nothing panics across the boundary.
//! - One widget per page; the mounted controller is kept alive until
//!   `unmount`, after which pending listeners become no-ops.

use crate::console::init_console_logging;
use crate::dom::DomSurface;
use crate::storage::LocalStorageSlot;
use log::{error, info, LevelFilter};
use std::cell::RefCell;
use std::rc::Rc;
use stickynote_core::{core_version as core_version_inner, NoteController, NotesConfig};
use wasm_bindgen::prelude::*;

type WebController = NoteController<LocalStorageSlot, DomSurface>;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
}

/// Mounts the widget and renders persisted notes.
///
/// `config_json` is an optional JSON object overriding `NotesConfig`
/// defaults (`storage_key`, `container_selector`, `add_control_selector`,
/// `note_class`). Returns the number of rendered notes.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<u32, JsError> {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Already installed by an earlier mount in the same page.
    let _ = init_console_logging(level);

    if MOUNTED.with(|mounted| mounted.borrow().is_some()) {
        return Err(JsError::new("stickynote is already mounted"));
    }

    let config = match config_json.as_deref() {
        Some(raw) => NotesConfig::from_json(raw).map_err(|err| fail("config", err))?,
        None => NotesConfig::default(),
    };
    let slot = LocalStorageSlot::from_window().map_err(|err| fail("storage", err))?;
    let surface = DomSurface::from_document(&config).map_err(|err| fail("surface", err))?;

    let controller = NoteController::from_config(slot, surface, &config);
    let rendered = controller.mount().map_err(|err| fail("render", err))?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(controller));

    info!(
        "event=widget_mount module=web status=ok count={} version={}",
        rendered,
        core_version_inner()
    );
    Ok(u32::try_from(rendered).unwrap_or(u32::MAX))
}

/// Drops the mounted widget. Rendered fields stay in the page but no
/// longer react to gestures.
#[wasm_bindgen]
pub fn unmount() -> bool {
    let was_mounted = MOUNTED.with(|mounted| mounted.borrow_mut().take().is_some());
    info!("event=widget_unmount module=web status=ok was_mounted={was_mounted}");
    was_mounted
}

/// Core crate version.
#[wasm_bindgen]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

fn fail(stage: &'static str, err: impl std::fmt::Display) -> JsError {
    error!("event=widget_mount module=web status=error stage={stage} error={err}");
    JsError::new(&format!("stickynote {stage} failed: {err}"))
}
