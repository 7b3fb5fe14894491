//! DOM surface: note fields as `<textarea>` children of the host container.
//!
//! # Responsibility
//! - Resolve the container and add control from configured selectors.
//! - Translate `change`, `dblclick` and `click` events into `NoteEvent`s.
//!
//! # Invariants
//! - Fields are inserted before the add control, which stays last.
//! - A handler may detach its own field, so listeners of removed fields are
//!   released on the next `listen` call, never inside `remove`. The rest are
//!   released (and unregistered) on drop.

use crate::storage::js_message;
use log::debug;
use std::cell::RefCell;
use stickynote_core::{
    Dispatch, NoteEvent, NoteId, NoteSurface, NotesConfig, SurfaceError, SurfaceResult,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlTextAreaElement, Node};

struct Listener {
    target: Element,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Host page container with its add control.
pub struct DomSurface {
    document: Document,
    container: Element,
    add_control: Element,
    note_class: String,
    listeners: RefCell<Vec<Listener>>,
    removed: RefCell<Vec<Element>>,
}

impl DomSurface {
    /// Looks up the container and add control in the current document.
    ///
    /// # Errors
    /// - `MissingElement` when the window, document or either selector
    ///   does not resolve.
    pub fn from_document(config: &NotesConfig) -> SurfaceResult<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SurfaceError::MissingElement("document".to_string()))?;
        let container = query(&document, &config.container_selector)?;
        let add_control = query(&document, &config.add_control_selector)?;
        Ok(Self {
            document,
            container,
            add_control,
            note_class: config.note_class.clone(),
            listeners: RefCell::new(Vec::new()),
            removed: RefCell::new(Vec::new()),
        })
    }

    fn listen(
        &self,
        target: &Element,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> SurfaceResult<()> {
        self.release_removed();
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| SurfaceError::host("add_event_listener", js_message(&err)))?;
        self.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    fn release_removed(&self) {
        let removed = std::mem::take(&mut *self.removed.borrow_mut());
        if removed.is_empty() {
            return;
        }
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| {
            let target: &Node = &listener.target;
            let gone = removed.iter().any(|field| field.is_same_node(Some(target)));
            if gone {
                let _ = listener.target.remove_event_listener_with_callback(
                    listener.event,
                    listener.closure.as_ref().unchecked_ref(),
                );
            }
            !gone
        });
        debug!(
            "event=listener_release module=dom status=ok released={}",
            before - listeners.len()
        );
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl NoteSurface for DomSurface {
    type Element = HtmlTextAreaElement;

    fn create_field(&self, content: &str) -> SurfaceResult<HtmlTextAreaElement> {
        let field = self
            .document
            .create_element("textarea")
            .map_err(|err| SurfaceError::host("create_element", js_message(&err)))?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| SurfaceError::host("create_element", "not a textarea"))?;
        field
            .class_list()
            .add_1(&self.note_class)
            .map_err(|err| SurfaceError::host("class_list_add", js_message(&err)))?;
        field.set_value(content);
        Ok(field)
    }

    fn insert_before_add(&self, element: &HtmlTextAreaElement) -> SurfaceResult<()> {
        let anchor: &Node = &self.add_control;
        self.container
            .insert_before(element, Some(anchor))
            .map(|_| ())
            .map_err(|err| SurfaceError::host("insert_before", js_message(&err)))
    }

    fn remove(&self, element: &HtmlTextAreaElement) -> SurfaceResult<()> {
        let container: &Node = &self.container;
        let attached = element
            .parent_node()
            .is_some_and(|parent| parent.is_same_node(Some(container)));
        if !attached {
            debug!("event=note_detach module=dom status=skip reason=not_attached");
            return Ok(());
        }
        self.container
            .remove_child(element)
            .map_err(|err| SurfaceError::host("remove_child", js_message(&err)))?;
        let field: &Element = element;
        self.removed.borrow_mut().push(field.clone());
        Ok(())
    }

    fn bind_note(
        &self,
        element: &HtmlTextAreaElement,
        id: NoteId,
        dispatch: Dispatch<HtmlTextAreaElement>,
    ) -> SurfaceResult<()> {
        let field = element.clone();
        let on_commit = dispatch.clone();
        self.listen(element, "change", move |_event: Event| {
            on_commit(NoteEvent::Commit {
                id,
                text: field.value(),
            });
        })?;

        let field = element.clone();
        self.listen(element, "dblclick", move |_event: Event| {
            dispatch(NoteEvent::Delete {
                id,
                element: field.clone(),
            });
        })
    }

    fn bind_add(&self, dispatch: Dispatch<HtmlTextAreaElement>) -> SurfaceResult<()> {
        let add_control = self.add_control.clone();
        self.listen(&add_control, "click", move |_event: Event| {
            dispatch(NoteEvent::Add);
        })
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        for listener in self.listeners.get_mut().drain(..) {
            // Rendered fields stay in the page; they just stop reacting.
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

fn query(document: &Document, selector: &str) -> SurfaceResult<Element> {
    document
        .query_selector(selector)
        .map_err(|err: JsValue| SurfaceError::host("query_selector", js_message(&err)))?
        .ok_or_else(|| SurfaceError::MissingElement(selector.to_string()))
}
