//! In-memory note surface for headless hosts and tests.
//!
//! # Responsibility
//! - Model the container as an ordered child list followed by the add control.
//! - Simulate user gestures (`click_add`, `type_and_blur`, `double_activate`).
//!
//! # Invariants
//! - No `RefCell` borrow is held while a dispatch callback runs, so handlers
//!   may mutate the surface re-entrantly.

use crate::model::note::NoteId;
use crate::view::{Dispatch, NoteEvent, NoteSurface, SurfaceResult};
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

struct ElementState {
    key: u64,
    value: RefCell<String>,
    binding: RefCell<Option<(NoteId, Dispatch<MemoryElement>)>>,
}

/// Handle to one in-memory note field. Clones refer to the same field.
#[derive(Clone)]
pub struct MemoryElement {
    state: Rc<ElementState>,
}

impl MemoryElement {
    /// Current text of the field.
    pub fn value(&self) -> String {
        self.state.value.borrow().clone()
    }

    /// Note id this field is bound to, once rendered by a view.
    pub fn note_id(&self) -> Option<NoteId> {
        self.state.binding.borrow().as_ref().map(|(id, _)| *id)
    }

    fn binding(&self) -> Option<(NoteId, Dispatch<MemoryElement>)> {
        self.state
            .binding
            .borrow()
            .as_ref()
            .map(|(id, dispatch)| (*id, Rc::clone(dispatch)))
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Debug for MemoryElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryElement")
            .field("key", &self.state.key)
            .field("note_id", &self.note_id())
            .field("value", &*self.state.value.borrow())
            .finish()
    }
}

#[derive(Default)]
struct SurfaceState {
    next_key: Cell<u64>,
    children: RefCell<Vec<MemoryElement>>,
    add_dispatch: RefCell<Option<Dispatch<MemoryElement>>>,
}

/// Container with a trailing add control, kept in memory.
///
/// Clones share the same container.
#[derive(Clone, Default)]
pub struct MemorySurface {
    state: Rc<SurfaceState>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached note fields in container order (the add control excluded).
    pub fn children(&self) -> Vec<MemoryElement> {
        self.state.children.borrow().clone()
    }

    /// Texts of attached note fields in container order.
    pub fn contents(&self) -> Vec<String> {
        self.state
            .children
            .borrow()
            .iter()
            .map(MemoryElement::value)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.children.borrow().is_empty()
    }

    pub fn contains(&self, element: &MemoryElement) -> bool {
        self.state.children.borrow().iter().any(|child| child == element)
    }

    /// Activates the add control. Returns `false` when nothing is bound.
    pub fn click_add(&self) -> bool {
        let dispatch = self.state.add_dispatch.borrow().as_ref().map(Rc::clone);
        match dispatch {
            Some(dispatch) => {
                dispatch(NoteEvent::Add);
                true
            }
            None => false,
        }
    }

    /// Replaces the field text and moves focus away.
    ///
    /// Commits only when the text actually changed, like a DOM `change`
    /// event. Returns whether a commit was dispatched.
    pub fn type_and_blur(&self, element: &MemoryElement, text: &str) -> bool {
        let changed = {
            let mut value = element.state.value.borrow_mut();
            if *value == text {
                false
            } else {
                *value = text.to_string();
                true
            }
        };
        if !changed {
            return false;
        }
        match element.binding() {
            Some((id, dispatch)) => {
                dispatch(NoteEvent::Commit {
                    id,
                    text: text.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Performs the delete gesture on a field. Returns whether it was bound.
    pub fn double_activate(&self, element: &MemoryElement) -> bool {
        match element.binding() {
            Some((id, dispatch)) => {
                dispatch(NoteEvent::Delete {
                    id,
                    element: element.clone(),
                });
                true
            }
            None => false,
        }
    }
}

impl NoteSurface for MemorySurface {
    type Element = MemoryElement;

    fn create_field(&self, content: &str) -> SurfaceResult<MemoryElement> {
        let key = self.state.next_key.get();
        self.state.next_key.set(key + 1);
        Ok(MemoryElement {
            state: Rc::new(ElementState {
                key,
                value: RefCell::new(content.to_string()),
                binding: RefCell::new(None),
            }),
        })
    }

    fn insert_before_add(&self, element: &MemoryElement) -> SurfaceResult<()> {
        let mut children = self.state.children.borrow_mut();
        children.retain(|child| child != element);
        children.push(element.clone());
        Ok(())
    }

    fn remove(&self, element: &MemoryElement) -> SurfaceResult<()> {
        self.state
            .children
            .borrow_mut()
            .retain(|child| child != element);
        Ok(())
    }

    fn bind_note(
        &self,
        element: &MemoryElement,
        id: NoteId,
        dispatch: Dispatch<MemoryElement>,
    ) -> SurfaceResult<()> {
        *element.state.binding.borrow_mut() = Some((id, dispatch));
        Ok(())
    }

    fn bind_add(&self, dispatch: Dispatch<MemoryElement>) -> SurfaceResult<()> {
        *self.state.add_dispatch.borrow_mut() = Some(dispatch);
        Ok(())
    }
}
