//! Note view: renders notes onto a host surface and routes gestures.
//!
//! # Responsibility
//! - Define the `NoteSurface` capability a host (DOM, in-memory) provides:
//!   create field, insert before the add control, remove, listen.
//! - Translate rendered fields into `NoteEvent`s through a `Dispatch`.
//!
//! # Invariants
//! - Rendered fields are always inserted before the add control, so the
//!   add control stays last in the container.
//! - The view holds no note state; ids live only in event bindings.

pub mod memory;

use crate::model::note::{Note, NoteId};
use log::debug;
use std::rc::Rc;
use thiserror::Error;

pub use memory::{MemoryElement, MemorySurface};

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Callback receiving surface events. Single-threaded by construction.
pub type Dispatch<E> = Rc<dyn Fn(NoteEvent<E>)>;

/// User gesture translated by a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteEvent<E> {
    /// The add control was activated.
    Add,
    /// A note field lost focus after its text changed.
    Commit { id: NoteId, text: String },
    /// A note field received the delete gesture (double activation).
    Delete { id: NoteId, element: E },
}

/// Host surface failure.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A required host element (container, add control) is missing.
    #[error("surface element not found: {0}")]
    MissingElement(String),
    /// Host rejected a mutation or listener registration.
    #[error("surface operation `{op}` failed: {message}")]
    Host { op: &'static str, message: String },
}

impl SurfaceError {
    pub fn host(op: &'static str, message: impl Into<String>) -> Self {
        Self::Host {
            op,
            message: message.into(),
        }
    }
}

/// Capability interface of the container that hosts note fields.
pub trait NoteSurface {
    /// Handle to one rendered note field.
    type Element: Clone + 'static;

    /// Creates a detached editable field holding `content`.
    fn create_field(&self, content: &str) -> SurfaceResult<Self::Element>;
    /// Inserts `element` immediately before the add control.
    fn insert_before_add(&self, element: &Self::Element) -> SurfaceResult<()>;
    /// Detaches `element` from the container. Detached elements are ignored.
    fn remove(&self, element: &Self::Element) -> SurfaceResult<()>;
    /// Wires commit-edit and delete-gesture listeners of `element` to `dispatch`.
    fn bind_note(
        &self,
        element: &Self::Element,
        id: NoteId,
        dispatch: Dispatch<Self::Element>,
    ) -> SurfaceResult<()>;
    /// Wires the add control to `dispatch`.
    fn bind_add(&self, dispatch: Dispatch<Self::Element>) -> SurfaceResult<()>;
}

/// Renders notes onto an injected surface.
pub struct NoteView<V: NoteSurface> {
    surface: V,
}

impl<V: NoteSurface> NoteView<V> {
    pub fn new(surface: V) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Creates a field for `note` and binds its listeners. The field is
    /// returned detached.
    pub fn render(&self, note: &Note, dispatch: &Dispatch<V::Element>) -> SurfaceResult<V::Element> {
        let element = self.surface.create_field(&note.content)?;
        self.surface
            .bind_note(&element, note.id, Rc::clone(dispatch))?;
        Ok(element)
    }

    /// Renders `note` and inserts it before the add control.
    pub fn append(&self, note: &Note, dispatch: &Dispatch<V::Element>) -> SurfaceResult<V::Element> {
        let element = self.render(note, dispatch)?;
        self.surface.insert_before_add(&element)?;
        debug!("event=note_render module=view status=ok id={}", note.id);
        Ok(element)
    }

    /// Renders the whole collection in order.
    pub fn render_all(
        &self,
        notes: &[Note],
        dispatch: &Dispatch<V::Element>,
    ) -> SurfaceResult<Vec<V::Element>> {
        notes.iter().map(|note| self.append(note, dispatch)).collect()
    }

    /// Detaches a rendered field.
    pub fn detach(&self, element: &V::Element) -> SurfaceResult<()> {
        self.surface.remove(element)
    }

    pub fn bind_add(&self, dispatch: &Dispatch<V::Element>) -> SurfaceResult<()> {
        self.surface.bind_add(Rc::clone(dispatch))
    }
}
