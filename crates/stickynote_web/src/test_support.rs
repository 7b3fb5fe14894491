//! Page fixtures shared by the browser tests.

use crate::storage::LocalStorageSlot;
use stickynote_core::{Note, NoteStore, NotesConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlTextAreaElement, Node};

pub(crate) fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Appends `<div id="app-{name}"><button class="add-note-{name}"></div>` to
/// the body and returns a config pointing at it with a cleared storage key.
pub(crate) fn fixture(name: &str) -> NotesConfig {
    let document = document();
    let container = document.create_element("div").unwrap();
    container.set_id(&format!("app-{name}"));
    let add_control = document.create_element("button").unwrap();
    add_control.set_class_name(&format!("add-note-{name}"));
    container.append_child(&add_control).unwrap();
    document.body().unwrap().append_child(&container).unwrap();

    let config = NotesConfig {
        storage_key: format!("notes-{name}"),
        container_selector: format!("#app-{name}"),
        add_control_selector: format!(".add-note-{name}"),
        ..NotesConfig::default()
    };
    store(&config).clear().unwrap();
    config
}

pub(crate) fn store(config: &NotesConfig) -> NoteStore<LocalStorageSlot> {
    NoteStore::new(
        LocalStorageSlot::from_window().unwrap(),
        config.storage_key.clone(),
    )
}

pub(crate) fn stored(config: &NotesConfig) -> Vec<Note> {
    store(config).load_all().unwrap()
}

pub(crate) fn select(selector: &str) -> Element {
    document().query_selector(selector).unwrap().unwrap()
}

/// Note fields currently inside the fixture container, in order.
pub(crate) fn fields(config: &NotesConfig) -> Vec<HtmlTextAreaElement> {
    let children = select(&config.container_selector).children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .filter_map(|child| child.dyn_into::<HtmlTextAreaElement>().ok())
        .collect()
}

pub(crate) fn fire(target: &EventTarget, name: &str) {
    let event = Event::new(name).unwrap();
    target.dispatch_event(&event).unwrap();
}

pub(crate) fn same_node(left: &Node, right: &Node) -> bool {
    left.is_same_node(Some(right))
}
