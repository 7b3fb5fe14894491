use std::cell::Cell;
use std::rc::Rc;
use stickynote_core::{
    ControllerError, Dispatch, MemoryElement, MemorySlot, MemorySurface, Note, NoteController,
    NoteId, NoteServiceError, NoteStore, NoteSurface, NotesConfig, SlotError, SlotResult,
    StorageSlot, StoreError, SurfaceError, SurfaceResult,
};

type Widget<S> = Rc<NoteController<S, MemorySurface>>;

fn widget(slot: MemorySlot) -> (Widget<MemorySlot>, MemorySurface) {
    let surface = MemorySurface::new();
    let controller = NoteController::from_config(slot, surface.clone(), &NotesConfig::default());
    (controller, surface)
}

fn seed(slot: &MemorySlot, notes: &[Note]) {
    NoteStore::new(slot.clone(), "notes").save_all(notes).unwrap();
}

fn persisted(slot: &MemorySlot) -> Vec<Note> {
    NoteStore::new(slot.clone(), "notes").load_all().unwrap()
}

/// Slot whose writes can be switched off to simulate quota/backend failures.
struct FlakySlot {
    inner: MemorySlot,
    fail_writes: Rc<Cell<bool>>,
}

impl StorageSlot for FlakySlot {
    fn get_item(&self, key: &str) -> SlotResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> SlotResult<()> {
        if self.fail_writes.get() {
            return Err(SlotError::backend("set_item", key, "quota exceeded"));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> SlotResult<()> {
        self.inner.remove_item(key)
    }
}

/// Surface whose container rejects new fields.
struct FullSurface {
    inner: MemorySurface,
}

impl NoteSurface for FullSurface {
    type Element = MemoryElement;

    fn create_field(&self, content: &str) -> SurfaceResult<MemoryElement> {
        self.inner.create_field(content)
    }

    fn insert_before_add(&self, _element: &MemoryElement) -> SurfaceResult<()> {
        Err(SurfaceError::host("insert_before", "container is read-only"))
    }

    fn remove(&self, element: &MemoryElement) -> SurfaceResult<()> {
        self.inner.remove(element)
    }

    fn bind_note(
        &self,
        element: &MemoryElement,
        id: NoteId,
        dispatch: Dispatch<MemoryElement>,
    ) -> SurfaceResult<()> {
        self.inner.bind_note(element, id, dispatch)
    }

    fn bind_add(&self, dispatch: Dispatch<MemoryElement>) -> SurfaceResult<()> {
        self.inner.bind_add(dispatch)
    }
}

#[test]
fn empty_storage_mount_renders_nothing() {
    let (controller, surface) = widget(MemorySlot::new());

    assert_eq!(controller.mount().unwrap(), 0);
    assert!(surface.is_empty());
}

#[test]
fn mount_renders_persisted_notes_in_order() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(5, "first"), Note::new(2, "second")]);
    let (controller, surface) = widget(slot);

    assert_eq!(controller.mount().unwrap(), 2);
    assert_eq!(surface.contents(), vec!["first", "second"]);
    let ids: Vec<_> = surface.children().iter().map(|el| el.note_id()).collect();
    assert_eq!(ids, vec![Some(5), Some(2)]);
}

#[test]
fn add_then_load_yields_one_empty_note_in_range() {
    let slot = MemorySlot::new();
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();

    assert!(surface.click_add());

    let notes = persisted(&slot);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "");
    assert!(notes[0].id < 100_000);
    assert_eq!(surface.len(), 1);
    assert_eq!(surface.children()[0].note_id(), Some(notes[0].id));
}

#[test]
fn added_notes_append_at_end_of_storage_and_container() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "existing")]);
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();

    let (first, first_el) = controller.add_note().unwrap();
    let (second, second_el) = controller.add_note().unwrap();

    assert_ne!(first.id, second.id);
    let ids: Vec<_> = persisted(&slot).iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![1, first.id, second.id]);
    assert_eq!(surface.children()[1], first_el);
    assert_eq!(surface.children()[2], second_el);
}

#[test]
fn update_targets_correct_note() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "a"), Note::new(2, "b")]);
    let (controller, _surface) = widget(slot.clone());

    controller.update_note(2, "c").unwrap();

    assert_eq!(persisted(&slot), vec![Note::new(1, "a"), Note::new(2, "c")]);
}

#[test]
fn commit_gesture_persists_field_text() {
    let slot = MemorySlot::new();
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();
    surface.click_add();
    let element = surface.children()[0].clone();

    assert!(surface.type_and_blur(&element, "buy milk\nand eggs"));

    assert_eq!(persisted(&slot)[0].content, "buy milk\nand eggs");
}

#[test]
fn update_of_stale_id_reports_not_found() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "a")]);
    let (controller, _surface) = widget(slot.clone());

    let err = controller.update_note(9, "x").unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Service(NoteServiceError::NoteNotFound(9))
    ));
    assert_eq!(err.code(), "not_found");
    assert_eq!(persisted(&slot), vec![Note::new(1, "a")]);
}

#[test]
fn delete_removes_exactly_one_note_and_element() {
    let slot = MemorySlot::new();
    seed(
        &slot,
        &[Note::new(1, "a"), Note::new(2, "b"), Note::new(3, "c")],
    );
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();
    let target = surface.children()[1].clone();

    assert!(surface.double_activate(&target));

    assert_eq!(persisted(&slot), vec![Note::new(1, "a"), Note::new(3, "c")]);
    assert!(!surface.contains(&target));
    assert_eq!(surface.contents(), vec!["a", "c"]);
}

#[test]
fn delete_twice_is_idempotent() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "a"), Note::new(2, "b")]);
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();
    let stale = surface.children()[0].clone();

    assert_eq!(controller.delete_note(1, &stale).unwrap(), 1);
    let after_once = persisted(&slot);
    assert_eq!(controller.delete_note(1, &stale).unwrap(), 0);

    assert_eq!(persisted(&slot), after_once);
    assert_eq!(surface.len(), 1);
}

#[test]
fn failed_delete_write_keeps_element_attached() {
    let inner = MemorySlot::new();
    seed(&inner, &[Note::new(1, "a")]);
    let fail_writes = Rc::new(Cell::new(false));
    let slot = FlakySlot {
        inner: inner.clone(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let surface = MemorySurface::new();
    let controller = NoteController::from_config(slot, surface.clone(), &NotesConfig::default());
    controller.mount().unwrap();
    let element = surface.children()[0].clone();

    fail_writes.set(true);
    let err = controller.delete_note(1, &element).unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Service(NoteServiceError::Store(StoreError::Slot(_)))
    ));
    assert!(surface.contains(&element));
    assert_eq!(persisted(&inner), vec![Note::new(1, "a")]);
}

#[test]
fn failed_add_write_renders_nothing() {
    let fail_writes = Rc::new(Cell::new(true));
    let slot = FlakySlot {
        inner: MemorySlot::new(),
        fail_writes: Rc::clone(&fail_writes),
    };
    let surface = MemorySurface::new();
    let controller = NoteController::from_config(slot, surface.clone(), &NotesConfig::default());
    controller.mount().unwrap();

    assert!(surface.click_add());

    assert!(surface.is_empty());
}

#[test]
fn failed_render_rolls_back_added_note() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "kept")]);
    let surface = FullSurface {
        inner: MemorySurface::new(),
    };
    let controller = NoteController::from_config(slot.clone(), surface, &NotesConfig::default());

    let err = controller.add_note().unwrap_err();

    assert!(matches!(err, ControllerError::Surface(_)));
    assert_eq!(err.code(), "surface_failed");
    assert_eq!(persisted(&slot), vec![Note::new(1, "kept")]);
    let (retry, _) = NoteController::from_config(
        slot.clone(),
        MemorySurface::new(),
        &NotesConfig::default(),
    )
    .add_note()
    .unwrap();
    assert_eq!(retry.id, 3);
}

#[test]
fn malformed_storage_aborts_mount_and_operations() {
    let slot = MemorySlot::new();
    slot.set_item("notes", "[{\"id\": 1, \"content\": ").unwrap();
    let (controller, surface) = widget(slot);

    let err = controller.mount().unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Service(NoteServiceError::Store(StoreError::Malformed { .. }))
    ));
    assert!(controller.add_note().is_err());
    assert!(surface.is_empty());
}

#[test]
fn failing_handler_does_not_affect_other_notes() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "a"), Note::new(2, "b")]);
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();
    let children = surface.children();

    // Another context deletes note 1 behind this widget's back.
    NoteStore::new(slot.clone(), "notes")
        .save_all(&[Note::new(2, "b")])
        .unwrap();
    surface.type_and_blur(&children[0], "lost edit");
    surface.type_and_blur(&children[1], "kept edit");

    assert_eq!(persisted(&slot), vec![Note::new(2, "kept edit")]);
    assert_eq!(surface.len(), 2);
}

#[test]
fn two_contexts_sharing_a_slot_are_last_write_wins() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(1, "base")]);
    let (tab_a, _) = widget(slot.clone());
    let (tab_b, _) = widget(slot.clone());

    tab_a.update_note(1, "from a").unwrap();
    tab_b.update_note(1, "from b").unwrap();

    assert_eq!(persisted(&slot), vec![Note::new(1, "from b")]);
}

#[test]
fn ids_are_never_reused_after_delete() {
    let slot = MemorySlot::new();
    let (controller, _surface) = widget(slot.clone());
    controller.mount().unwrap();

    let (first, first_el) = controller.add_note().unwrap();
    controller.delete_note(first.id, &first_el).unwrap();
    let (second, _) = controller.add_note().unwrap();

    assert!(second.id > first.id);
}

#[test]
fn legacy_random_ids_do_not_collide_with_new_ids() {
    let slot = MemorySlot::new();
    seed(&slot, &[Note::new(73_518, "old"), Note::new(12, "older")]);
    let (controller, _surface) = widget(slot.clone());

    let (note, _) = controller.add_note().unwrap();

    assert_eq!(note.id, 73_519);
}

#[test]
fn gestures_after_controller_drop_are_ignored() {
    let slot = MemorySlot::new();
    let (controller, surface) = widget(slot.clone());
    controller.mount().unwrap();
    drop(controller);

    assert!(surface.click_add());

    assert!(persisted(&slot).is_empty());
    assert!(surface.is_empty());
}

#[test]
fn custom_storage_key_is_respected() {
    let slot = MemorySlot::new();
    let config = NotesConfig {
        storage_key: "scratch".to_string(),
        ..NotesConfig::default()
    };
    let controller = NoteController::from_config(slot.clone(), MemorySurface::new(), &config);

    controller.add_note().unwrap();

    assert_eq!(slot.get_item("notes").unwrap(), None);
    assert!(slot.get_item("scratch").unwrap().is_some());
    assert_eq!(slot.get_item("scratch.next_id").unwrap().as_deref(), Some("1"));
}
