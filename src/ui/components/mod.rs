//! Document components for the project board.
//!
//! A component is mounted from a named template into a named host, then
//! configured (event handlers, store subscriptions) and rendered (text
//! content). [`ComponentBase`] does the mounting; [`construct`] runs the two
//! lifecycle steps a concrete component provides through [`Component`].

pub mod drag;
pub mod project_input;
pub mod project_item;
pub mod project_list;

pub use drag::{DragSession, DragTarget, Draggable};
pub use project_input::{FormField, ProjectInput, INVALID_INPUT_MESSAGE};
pub use project_item::ProjectItem;
pub use project_list::ProjectList;

use crate::error::{ComponentError, ComponentResult};
use crate::ui::document::{DocumentHandle, Element, EventHandler, EventKind, InsertPosition};

/// Id of the host every top-level component mounts into
pub const APP_HOST_ID: &str = "app";

/// Lifecycle hooks implemented by every component
pub trait Component {
    /// Mounted element this component manages
    fn base(&self) -> &ComponentBase;

    /// Wire event handlers and subscriptions
    fn configure(&mut self) -> ComponentResult<()>;

    /// Populate the element's content
    fn render_content(&mut self) -> ComponentResult<()>;
}

/// Run the lifecycle on a freshly mounted component
pub fn construct<C: Component>(mut component: C) -> ComponentResult<C> {
    component.configure()?;
    component.render_content()?;
    Ok(component)
}

/// A template instance attached to the document
#[derive(Debug, Clone)]
pub struct ComponentBase {
    document: DocumentHandle,
    element_id: String,
}

impl ComponentBase {
    /// Clone `template_id`, optionally rename it, and insert it into `host_id`.
    ///
    /// When no id is given the template's own id is kept; if it has none a
    /// unique one is generated so the element stays addressable.
    pub fn mount(
        document: &DocumentHandle,
        template_id: &str,
        host_id: &str,
        position: InsertPosition,
        new_element_id: Option<&str>,
    ) -> ComponentResult<Self> {
        let mut doc = document.borrow_mut();
        let mut element = doc.import_template(template_id)?;

        let element_id = match (new_element_id, element.id.clone()) {
            (Some(id), _) => id.to_string(),
            (None, Some(id)) => id,
            (None, None) => doc.next_anonymous_id(template_id),
        };
        element.id = Some(element_id.clone());

        doc.insert(host_id, element, position)?;
        tracing::debug!(template_id, host_id, element_id = %element_id, "Mounted component");

        Ok(Self {
            document: document.clone(),
            element_id,
        })
    }

    /// Document the component is mounted in
    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    /// Id of the mounted root element
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Read the mounted element
    pub fn with_element<R>(&self, f: impl FnOnce(&Element) -> R) -> ComponentResult<R> {
        let doc = self.document.borrow();
        let element = doc
            .get_element(&self.element_id)
            .ok_or_else(|| ComponentError::ElementNotFound(self.element_id.clone()))?;
        Ok(f(element))
    }

    /// Modify the mounted element
    pub fn with_element_mut<R>(&self, f: impl FnOnce(&mut Element) -> R) -> ComponentResult<R> {
        let mut doc = self.document.borrow_mut();
        let element = doc
            .get_element_mut(&self.element_id)
            .ok_or_else(|| ComponentError::ElementNotFound(self.element_id.clone()))?;
        Ok(f(element))
    }

    /// Register an event handler on the mounted element
    pub fn on(&self, kind: EventKind, handler: EventHandler) {
        self.document
            .borrow_mut()
            .add_event_listener(&self.element_id, kind, handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::document::{Document, Tag};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        base: ComponentBase,
        steps: Rc<Cell<u8>>,
    }

    impl Component for Counter {
        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn configure(&mut self) -> ComponentResult<()> {
            assert_eq!(self.steps.get(), 0);
            self.steps.set(1);
            Ok(())
        }

        fn render_content(&mut self) -> ComponentResult<()> {
            assert_eq!(self.steps.get(), 1);
            self.steps.set(2);
            self.base.with_element_mut(|el| el.text = "rendered".to_string())
        }
    }

    fn document() -> DocumentHandle {
        let mut doc = Document::new();
        doc.append_to_body(Element::new(Tag::Div).with_id(APP_HOST_ID));
        doc.register_template("box", vec![Element::new(Tag::Div)]);
        doc.register_template("named", vec![Element::new(Tag::Div).with_id("named-box")]);
        doc.into_handle()
    }

    #[test]
    fn test_construct_runs_configure_then_render() {
        let doc = document();
        let base = ComponentBase::mount(&doc, "box", APP_HOST_ID, InsertPosition::End, Some("b1"))
            .unwrap();
        let steps = Rc::new(Cell::new(0));
        let counter = construct(Counter {
            base,
            steps: Rc::clone(&steps),
        })
        .unwrap();

        assert_eq!(steps.get(), 2);
        assert_eq!(counter.base().element_id(), "b1");
        assert_eq!(doc.borrow().get_element("b1").unwrap().text, "rendered");
    }

    #[test]
    fn test_mount_ids() {
        let doc = document();
        let named =
            ComponentBase::mount(&doc, "named", APP_HOST_ID, InsertPosition::End, None).unwrap();
        assert_eq!(named.element_id(), "named-box");

        let anon_a =
            ComponentBase::mount(&doc, "box", APP_HOST_ID, InsertPosition::End, None).unwrap();
        let anon_b =
            ComponentBase::mount(&doc, "box", APP_HOST_ID, InsertPosition::End, None).unwrap();
        assert_ne!(anon_a.element_id(), anon_b.element_id());
    }

    #[test]
    fn test_mount_missing_template_or_host() {
        let doc = document();
        let err = ComponentBase::mount(&doc, "nope", APP_HOST_ID, InsertPosition::End, None)
            .unwrap_err();
        assert_eq!(err, ComponentError::TemplateNotFound("nope".to_string()));

        let err =
            ComponentBase::mount(&doc, "box", "missing", InsertPosition::End, None).unwrap_err();
        assert_eq!(err, ComponentError::HostNotFound("missing".to_string()));
    }
}
