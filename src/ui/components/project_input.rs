//! Form that collects a new project and adds it to the store.

use super::{construct, Component, ComponentBase, APP_HOST_ID};
use crate::config::ValidationConfig;
use crate::domain::{validate, Value};
use crate::error::{ComponentError, ComponentResult};
use crate::services::ProjectState;
use crate::ui::document::{
    dispatch, Document, DocumentHandle, DomEvent, EventKind, InsertPosition,
};
use crate::ui::widgets::text_input::TextInputAction;
use crossterm::event::KeyEvent;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Template id for the project form
pub const INPUT_TEMPLATE_ID: &str = "project-input";

/// Element id of the mounted form
pub const FORM_ELEMENT_ID: &str = "user-input";

/// Alert raised when any field fails validation
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again!";

/// Fields of the project form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    People,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Title, FormField::Description, FormField::People];

    /// Element id of the field's input
    pub fn element_id(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::People => "people",
        }
    }

    /// Next field in tab order, wrapping
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::People,
            FormField::People => FormField::Title,
        }
    }

    /// Previous field in tab order, wrapping
    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::People,
            FormField::Description => FormField::Title,
            FormField::People => FormField::Description,
        }
    }
}

/// The project form component
#[derive(Debug)]
pub struct ProjectInput {
    base: ComponentBase,
    store: ProjectState,
    rules: ValidationConfig,
}

impl ProjectInput {
    /// Mount the form at the start of the app host
    pub fn new(
        document: &DocumentHandle,
        store: ProjectState,
        rules: ValidationConfig,
    ) -> ComponentResult<Self> {
        let base = ComponentBase::mount(
            document,
            INPUT_TEMPLATE_ID,
            APP_HOST_ID,
            InsertPosition::Start,
            Some(FORM_ELEMENT_ID),
        )?;

        // Every field must be present before handlers are wired
        for field in FormField::ALL {
            let found = base.with_element(|form| form.find(field.element_id()).is_some())?;
            if !found {
                return Err(ComponentError::ElementNotFound(field.element_id().to_string()));
            }
        }

        construct(Self { base, store, rules })
    }

    /// Submit the form as if the user pressed its button
    pub fn submit(&self) -> bool {
        let mut event = DomEvent::new(EventKind::Submit);
        dispatch(self.base.document(), self.base.element_id(), &mut event)
    }

    /// Forward a key press to one of the fields
    pub fn edit_field(&self, field: FormField, key: KeyEvent) -> TextInputAction {
        let mut doc = self.base.document().borrow_mut();
        doc.get_element_mut(field.element_id())
            .and_then(|el| el.input.as_mut())
            .map(|input| input.handle_key(key))
            .unwrap_or(TextInputAction::None)
    }

    /// Overwrite a field's value
    pub fn set_field(&self, field: FormField, value: &str) {
        let mut doc = self.base.document().borrow_mut();
        if let Some(input) = doc
            .get_element_mut(field.element_id())
            .and_then(|el| el.input.as_mut())
        {
            input.set_value(value);
        }
    }

    /// Current value of a field
    pub fn field_value(&self, field: FormField) -> String {
        let doc = self.base.document().borrow();
        doc.get_element(field.element_id())
            .map(|el| el.value().to_string())
            .unwrap_or_default()
    }
}

impl Component for ProjectInput {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self) -> ComponentResult<()> {
        let handler = SubmitHandler {
            document: Rc::downgrade(self.base.document()),
            store: self.store.clone(),
            rules: self.rules.clone(),
        };
        self.base
            .on(EventKind::Submit, Rc::new(move |event: &mut DomEvent| handler.handle(event)));
        Ok(())
    }

    fn render_content(&mut self) -> ComponentResult<()> {
        Ok(())
    }
}

/// State captured by the form's submit handler
struct SubmitHandler {
    document: Weak<RefCell<Document>>,
    store: ProjectState,
    rules: ValidationConfig,
}

impl SubmitHandler {
    fn handle(&self, event: &mut DomEvent) {
        event.prevent_default();
        let Some(document) = self.document.upgrade() else {
            return;
        };

        let input = gather_user_input(&document.borrow(), &self.rules);
        match input {
            Some((title, description, people)) => {
                self.store.add_project(title, description, people);
                clear_inputs(&mut document.borrow_mut());
            }
            None => document.borrow_mut().alert(INVALID_INPUT_MESSAGE),
        }
    }
}

/// Read and validate all fields; `None` if any rule fails
fn gather_user_input(
    document: &Document,
    rules: &ValidationConfig,
) -> Option<(String, String, u32)> {
    let read = |field: FormField| {
        document
            .get_element(field.element_id())
            .map(|el| el.value().to_string())
            .unwrap_or_default()
    };
    let title = read(FormField::Title);
    let description = read(FormField::Description);
    let people_raw = read(FormField::People);
    let people = people_raw.trim().parse::<f64>().unwrap_or(f64::NAN);

    let valid = validate(&rules.title.apply(Value::Text(&title)))
        && validate(&rules.description.apply(Value::Text(&description)))
        && validate(&rules.people.apply(Value::Number(people)));

    // Team size is a positive head count whatever the configured bounds
    if !valid || people.fract() != 0.0 || people < 1.0 || people > u32::MAX as f64 {
        tracing::debug!(title = %title, people = %people_raw, "Rejected project input");
        return None;
    }

    Some((title, description, people as u32))
}

fn clear_inputs(document: &mut Document) {
    for field in FormField::ALL {
        if let Some(input) = document
            .get_element_mut(field.element_id())
            .and_then(|el| el.input.as_mut())
        {
            input.clear();
        }
    }
}
