//! Retained element tree that components mount into.
//!
//! The document owns named templates, the element tree rooted at `body`,
//! per-element event listeners, and the blocking alert slot. Rendering
//! walks the tree; components only ever touch it through element ids.

use crate::error::{ComponentError, ComponentResult};
use crate::ui::widgets::text_input::TextInputState;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Shared handle to the document
pub type DocumentHandle = Rc<RefCell<Document>>;

/// Event callback registered on an element
pub type EventHandler = Rc<dyn Fn(&mut DomEvent)>;

/// Payload format used for dragged project ids
pub const TEXT_PLAIN: &str = "text/plain";

/// Element tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Form,
    Section,
    Header,
    Label,
    Input,
    Button,
    H2,
    H3,
    P,
    Ul,
    Li,
}

/// Where to insert a mounted element among the host's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the first child
    Start,
    /// After the last child
    End,
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    pub text: String,
    pub classes: BTreeSet<String>,
    /// Editable value, present on `Input` elements
    pub input: Option<TextInputState>,
    pub draggable: bool,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element; inputs get a value slot
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            text: String::new(),
            classes: BTreeSet::new(),
            input: (tag == Tag::Input).then(TextInputState::new),
            draggable: false,
            children: Vec::new(),
        }
    }

    /// Set the element id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Mark whether the element can be dragged
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Whether the element carries this id
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Whether the element carries this class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class in place
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    /// Remove a class in place
    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Depth-first search for an element with the given id, including self
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.has_id(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Mutable variant of [`Element::find`]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.has_id(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// First descendant (excluding self) with the given tag
    pub fn query_tag(&self, tag: Tag) -> Option<&Element> {
        self.children
            .iter()
            .find_map(|c| if c.tag == tag { Some(c) } else { c.query_tag(tag) })
    }

    /// Mutable variant of [`Element::query_tag`]
    pub fn query_tag_mut(&mut self, tag: Tag) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.query_tag_mut(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Current value of an input element, empty for anything else
    pub fn value(&self) -> &str {
        self.input.as_ref().map(|i| i.value()).unwrap_or("")
    }

    /// Ids of this element and all descendants
    fn collect_ids(&self, out: &mut Vec<String>) {
        if let Some(id) = &self.id {
            out.push(id.clone());
        }
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

/// Kind of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

/// Drag payload: ordered (format, data) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    items: Vec<(String, String)>,
    pub effect_allowed: Option<String>,
}

impl DataTransfer {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Set data for a format, replacing any previous value
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.items.iter_mut().find(|(f, _)| f == format) {
            Some(item) => item.1 = data,
            None => self.items.push((format.to_string(), data)),
        }
    }

    /// Data for a format, empty string when absent
    pub fn get_data(&self, format: &str) -> String {
        self.items
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.clone())
            .unwrap_or_default()
    }

    /// Formats in the order they were set
    pub fn types(&self) -> Vec<&str> {
        self.items.iter().map(|(f, _)| f.as_str()).collect()
    }

    /// True when no format has been set
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Event passed to handlers
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub kind: EventKind,
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl DomEvent {
    /// Create an event without a payload
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            data_transfer: None,
            default_prevented: false,
        }
    }

    /// Event carrying a drag payload
    pub fn drag(kind: EventKind, data: DataTransfer) -> Self {
        Self {
            kind,
            data_transfer: Some(data),
            default_prevented: false,
        }
    }

    /// Mark the event as handled
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler called [`DomEvent::prevent_default`]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The element tree plus templates, listeners and alert state
pub struct Document {
    body: Element,
    templates: HashMap<String, Vec<Element>>,
    listeners: Vec<(String, EventKind, EventHandler)>,
    alert: Option<String>,
    anonymous_ids: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("body", &self.body)
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners.len())
            .field("alert", &self.alert)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with only a body
    pub fn new() -> Self {
        Self {
            body: Element::new(Tag::Body),
            templates: HashMap::new(),
            listeners: Vec::new(),
            alert: None,
            anonymous_ids: 0,
        }
    }

    /// Wrap in a shared handle
    pub fn into_handle(self) -> DocumentHandle {
        Rc::new(RefCell::new(self))
    }

    /// Root of the element tree
    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Append a top-level element to the body
    pub fn append_to_body(&mut self, element: Element) {
        self.body.children.push(element);
    }

    /// Register template content under an id
    pub fn register_template(&mut self, id: impl Into<String>, content: Vec<Element>) {
        self.templates.insert(id.into(), content);
    }

    /// Deep copy of a template's first element
    pub fn import_template(&self, template_id: &str) -> ComponentResult<Element> {
        let content = self
            .templates
            .get(template_id)
            .ok_or_else(|| ComponentError::TemplateNotFound(template_id.to_string()))?;
        content
            .first()
            .cloned()
            .ok_or_else(|| ComponentError::EmptyTemplate(template_id.to_string()))
    }

    /// Find an element anywhere under the body
    pub fn get_element(&self, id: &str) -> Option<&Element> {
        self.body.find(id)
    }

    /// Mutable variant of [`Document::get_element`]
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_mut(id)
    }

    /// Fresh id for elements mounted without one
    pub fn next_anonymous_id(&mut self, prefix: &str) -> String {
        self.anonymous_ids += 1;
        format!("{}-{}", prefix, self.anonymous_ids)
    }

    /// Insert an element into a host
    pub fn insert(
        &mut self,
        host_id: &str,
        element: Element,
        position: InsertPosition,
    ) -> ComponentResult<()> {
        let host = self
            .get_element_mut(host_id)
            .ok_or_else(|| ComponentError::HostNotFound(host_id.to_string()))?;
        match position {
            InsertPosition::Start => host.children.insert(0, element),
            InsertPosition::End => host.children.push(element),
        }
        Ok(())
    }

    /// Remove every child of an element, along with their listeners
    pub fn clear_children(&mut self, id: &str) -> ComponentResult<()> {
        let element = self
            .get_element_mut(id)
            .ok_or_else(|| ComponentError::ElementNotFound(id.to_string()))?;
        let removed = std::mem::take(&mut element.children);

        let mut ids = Vec::new();
        for child in &removed {
            child.collect_ids(&mut ids);
        }
        if !ids.is_empty() {
            self.listeners.retain(|(target, _, _)| !ids.contains(target));
        }
        Ok(())
    }

    /// Register a handler for events of `kind` on element `id`
    pub fn add_event_listener(&mut self, id: &str, kind: EventKind, handler: EventHandler) {
        self.listeners.push((id.to_string(), kind, handler));
    }

    /// Handlers for an element and kind, in registration order
    pub fn listeners_for(&self, id: &str, kind: EventKind) -> Vec<EventHandler> {
        self.listeners
            .iter()
            .filter(|(target, k, _)| target == id && *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect()
    }

    /// Number of registered handlers across all elements
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Raise a blocking alert; a newer alert replaces an unacknowledged one
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("Alert: {}", message);
        self.alert = Some(message);
    }

    /// Message of the alert awaiting acknowledgement
    pub fn pending_alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Acknowledge the pending alert
    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alert.take()
    }
}

/// Dispatch an event to the handlers registered on `target`.
///
/// The document borrow is released before any handler runs, so handlers may
/// freely borrow the document and mutate the store. Returns whether a
/// handler prevented the default action.
pub fn dispatch(document: &DocumentHandle, target: &str, event: &mut DomEvent) -> bool {
    let handlers = document.borrow().listeners_for(target, event.kind);
    tracing::trace!(target_id = target, kind = ?event.kind, handlers = handlers.len(), "Dispatching event");
    for handler in handlers {
        handler(event);
    }
    event.default_prevented()
}
