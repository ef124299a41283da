//! Drag-and-drop: source/target traits and the keyboard drag gesture.

use super::ComponentBase;
use crate::ui::document::{dispatch, DataTransfer, DocumentHandle, DomEvent, EventKind};
use std::rc::Rc;

/// Element that can be picked up
pub trait Draggable {
    /// Populate the payload when the drag begins
    fn drag_start_handler(&self, event: &mut DomEvent);
    fn drag_end_handler(&self, event: &mut DomEvent);
}

/// Element that can accept a drop
pub trait DragTarget {
    /// Prevent default to signal the payload is acceptable
    fn drag_over_handler(&self, event: &mut DomEvent);
    fn drop_handler(&self, event: &mut DomEvent);
    fn drag_leave_handler(&self, event: &mut DomEvent);
}

/// Route drag source events on the component's element to `source`
pub fn bind_draggable(base: &ComponentBase, source: Rc<dyn Draggable>) {
    let s = Rc::clone(&source);
    base.on(EventKind::DragStart, Rc::new(move |e: &mut DomEvent| s.drag_start_handler(e)));
    let s = source;
    base.on(EventKind::DragEnd, Rc::new(move |e: &mut DomEvent| s.drag_end_handler(e)));
}

/// Route drop target events on the component's element to `target`
pub fn bind_drag_target(base: &ComponentBase, target: Rc<dyn DragTarget>) {
    let t = Rc::clone(&target);
    base.on(EventKind::DragOver, Rc::new(move |e: &mut DomEvent| t.drag_over_handler(e)));
    let t = Rc::clone(&target);
    base.on(EventKind::DragLeave, Rc::new(move |e: &mut DomEvent| t.drag_leave_handler(e)));
    let t = target;
    base.on(EventKind::Drop, Rc::new(move |e: &mut DomEvent| t.drop_handler(e)));
}

/// An in-progress drag.
///
/// Emits the same event sequence a pointer drag would: dragstart on the
/// source, dragleave/dragover as the hovered target changes, then drop and
/// dragend on release.
#[derive(Debug)]
pub struct DragSession {
    source_id: String,
    data: DataTransfer,
    target_id: Option<String>,
    accepted: bool,
}

impl DragSession {
    /// Start dragging `source_id`
    pub fn begin(document: &DocumentHandle, source_id: &str) -> Self {
        let mut event = DomEvent::drag(EventKind::DragStart, DataTransfer::new());
        dispatch(document, source_id, &mut event);
        let data = event.data_transfer.take().unwrap_or_default();
        tracing::debug!(source_id, types = ?data.types(), "Drag started");

        Self {
            source_id: source_id.to_string(),
            data,
            target_id: None,
            accepted: false,
        }
    }

    /// Move the drag over `target_id`
    pub fn hover(&mut self, document: &DocumentHandle, target_id: &str) {
        if let Some(previous) = self.target_id.take() {
            if previous != target_id {
                self.leave(document, &previous);
            }
        }

        let mut event = DomEvent::drag(EventKind::DragOver, self.data.clone());
        self.accepted = dispatch(document, target_id, &mut event);
        self.target_id = Some(target_id.to_string());
    }

    /// Drop on the hovered target. Returns whether a drop happened.
    pub fn release(self, document: &DocumentHandle) -> bool {
        let dropped = match (&self.target_id, self.accepted) {
            (Some(target), true) => {
                let mut event = DomEvent::drag(EventKind::Drop, self.data.clone());
                dispatch(document, target, &mut event);
                self.leave(document, target);
                true
            }
            (Some(target), false) => {
                tracing::warn!(source_id = %self.source_id, target_id = %target, "Drop rejected by target");
                self.leave(document, target);
                false
            }
            (None, _) => false,
        };
        self.end(document);
        dropped
    }

    /// Abandon the drag without dropping
    pub fn cancel(self, document: &DocumentHandle) {
        if let Some(target) = &self.target_id {
            self.leave(document, target);
        }
        self.end(document);
    }

    /// Element id of the dragged card
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Whether the hovered target accepts the payload
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Payload captured at drag start
    pub fn data(&self) -> &DataTransfer {
        &self.data
    }

    fn leave(&self, document: &DocumentHandle, target: &str) {
        let mut event = DomEvent::drag(EventKind::DragLeave, self.data.clone());
        dispatch(document, target, &mut event);
    }

    fn end(&self, document: &DocumentHandle) {
        let mut event = DomEvent::drag(EventKind::DragEnd, self.data.clone());
        dispatch(document, &self.source_id, &mut event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::document::{Document, Element, InsertPosition, Tag, TEXT_PLAIN};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log(RefCell<Vec<String>>);

    impl Log {
        fn push(&self, entry: &str) {
            self.0.borrow_mut().push(entry.to_string());
        }
    }

    impl Draggable for Log {
        fn drag_start_handler(&self, event: &mut DomEvent) {
            if let Some(data) = event.data_transfer.as_mut() {
                data.set_data(TEXT_PLAIN, "p1");
            }
            self.push("start");
        }

        fn drag_end_handler(&self, _event: &mut DomEvent) {
            self.push("end");
        }
    }

    impl DragTarget for Log {
        fn drag_over_handler(&self, event: &mut DomEvent) {
            event.prevent_default();
            self.push("over");
        }

        fn drop_handler(&self, event: &mut DomEvent) {
            let id = event
                .data_transfer
                .as_ref()
                .map(|d| d.get_data(TEXT_PLAIN))
                .unwrap_or_default();
            self.push(&format!("drop:{id}"));
        }

        fn drag_leave_handler(&self, _event: &mut DomEvent) {
            self.push("leave");
        }
    }

    fn setup() -> (DocumentHandle, Rc<Log>) {
        let mut doc = Document::new();
        doc.append_to_body(Element::new(Tag::Div).with_id("app"));
        doc.register_template("zone", vec![Element::new(Tag::Section)]);
        doc.register_template("card", vec![Element::new(Tag::Li)]);
        let doc = doc.into_handle();

        let log = Rc::new(Log::default());
        let card = ComponentBase::mount(&doc, "card", "app", InsertPosition::End, Some("card"))
            .unwrap();
        bind_draggable(&card, log.clone());
        let zone = ComponentBase::mount(&doc, "zone", "app", InsertPosition::End, Some("zone"))
            .unwrap();
        bind_drag_target(&zone, log.clone());
        (doc, log)
    }

    #[test]
    fn test_full_drag_sequence() {
        let (doc, log) = setup();

        let mut drag = DragSession::begin(&doc, "card");
        assert_eq!(drag.data().get_data(TEXT_PLAIN), "p1");
        drag.hover(&doc, "zone");
        assert!(drag.is_accepted());
        assert!(drag.release(&doc));

        assert_eq!(
            *log.0.borrow(),
            vec!["start", "over", "drop:p1", "leave", "end"]
        );
    }

    #[test]
    fn test_drop_without_acceptance() {
        let (doc, log) = setup();

        let mut drag = DragSession::begin(&doc, "card");
        // The card itself has no drop handlers
        drag.hover(&doc, "card");
        assert!(!drag.is_accepted());
        assert!(!drag.release(&doc));

        assert_eq!(*log.0.borrow(), vec!["start", "end"]);
    }

    #[test]
    fn test_cancel_leaves_target() {
        let (doc, log) = setup();

        let mut drag = DragSession::begin(&doc, "card");
        drag.hover(&doc, "zone");
        drag.cancel(&doc);

        assert_eq!(*log.0.borrow(), vec!["start", "over", "leave", "end"]);
    }
}
