//! Controller glue between surface gestures and note use-cases.
//!
//! # Responsibility
//! - Render the persisted collection on mount and bind the add control.
//! - Apply add/update/delete to storage, then to the surface.
//!
//! # Invariants
//! - Storage is written before the surface changes; a failed write leaves
//!   the surface untouched, and a failed render undoes the write.
//! - A failing event handler is logged and aborts only that handler.
//! - Surface callbacks hold a `Weak` reference; dropping the last `Rc`
//!   turns pending callbacks into no-ops.

use crate::config::NotesConfig;
use crate::model::note::{Note, NoteId};
use crate::service::note_service::{NoteService, NoteServiceError};
use crate::store::note_store::NoteStore;
use crate::store::slot::StorageSlot;
use crate::view::{Dispatch, NoteEvent, NoteSurface, NoteView, SurfaceError};
use log::{error, info};
use std::rc::{Rc, Weak};
use thiserror::Error;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Service(#[from] NoteServiceError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl ControllerError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Service(NoteServiceError::NoteNotFound(_)) => "not_found",
            Self::Service(NoteServiceError::Store(_)) => "store_failed",
            Self::Surface(_) => "surface_failed",
        }
    }
}

/// Wires one surface to one notes collection.
pub struct NoteController<S: StorageSlot, V: NoteSurface> {
    service: NoteService<S>,
    view: NoteView<V>,
    this: Weak<Self>,
}

impl<S, V> NoteController<S, V>
where
    S: StorageSlot + 'static,
    V: NoteSurface + 'static,
{
    /// Creates a controller with injected storage and surface.
    pub fn new(service: NoteService<S>, surface: V) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            service,
            view: NoteView::new(surface),
            this: this.clone(),
        })
    }

    /// Creates a controller storing notes under `config.storage_key`.
    pub fn from_config(slot: S, surface: V, config: &NotesConfig) -> Rc<Self> {
        let store = NoteStore::new(slot, config.storage_key.clone());
        Self::new(NoteService::new(store), surface)
    }

    pub fn service(&self) -> &NoteService<S> {
        &self.service
    }

    pub fn surface(&self) -> &V {
        self.view.surface()
    }

    /// Binds the add control and renders every persisted note.
    ///
    /// Returns the number of rendered notes.
    pub fn mount(&self) -> ControllerResult<usize> {
        let dispatch = self.dispatch();
        self.view.bind_add(&dispatch)?;
        let notes = self.service.list_notes().inspect_err(|err| {
            error!("event=notes_mount module=controller status=error error={err}");
        })?;
        let rendered = self.view.render_all(&notes, &dispatch)?;
        info!(
            "event=notes_mount module=controller status=ok count={}",
            rendered.len()
        );
        Ok(rendered.len())
    }

    /// Persists a new empty note and renders it before the add control.
    ///
    /// A note that fails to render is deleted again so storage keeps
    /// matching the surface.
    pub fn add_note(&self) -> ControllerResult<(Note, V::Element)> {
        let note = self.service.create_note()?;
        match self.view.append(&note, &self.dispatch()) {
            Ok(element) => Ok((note, element)),
            Err(err) => {
                error!(
                    "event=note_render module=controller status=error id={} error={}",
                    note.id, err
                );
                if let Err(rollback) = self.service.delete_note(note.id) {
                    error!(
                        "event=note_rollback module=controller status=error id={} error={}",
                        note.id, rollback
                    );
                }
                Err(err.into())
            }
        }
    }

    /// Persists new content for the first note with `id`.
    pub fn update_note(&self, id: NoteId, content: impl Into<String>) -> ControllerResult<Note> {
        Ok(self.service.update_note(id, content)?)
    }

    /// Removes `id` from storage, then detaches `element`.
    ///
    /// Returns how many persisted notes were removed; `0` for a repeated
    /// delete against a stale element.
    pub fn delete_note(&self, id: NoteId, element: &V::Element) -> ControllerResult<usize> {
        let removed = self.service.delete_note(id)?;
        self.view.detach(element)?;
        Ok(removed)
    }

    /// Routes one surface event to its operation.
    pub fn handle(&self, event: NoteEvent<V::Element>) -> ControllerResult<()> {
        let (name, result) = match event {
            NoteEvent::Add => ("add", self.add_note().map(|_| ())),
            NoteEvent::Commit { id, text } => ("commit", self.update_note(id, text).map(|_| ())),
            NoteEvent::Delete { id, element } => {
                ("delete", self.delete_note(id, &element).map(|_| ()))
            }
        };
        if let Err(err) = &result {
            error!(
                "event=note_event module=controller status=error kind={} error_code={} error={}",
                name,
                err.code(),
                err
            );
        }
        result
    }

    fn dispatch(&self) -> Dispatch<V::Element> {
        let this = self.this.clone();
        Rc::new(move |event: NoteEvent<V::Element>| {
            if let Some(controller) = this.upgrade() {
                let _ = controller.handle(event);
            }
        })
    }
}
