//! The board's host document: the `app` host and the component templates.

use crate::ui::components::project_input::INPUT_TEMPLATE_ID;
use crate::ui::components::project_item::ITEM_TEMPLATE_ID;
use crate::ui::components::project_list::LIST_TEMPLATE_ID;
use crate::ui::components::APP_HOST_ID;
use crate::ui::document::{Document, Element, Tag};

fn form_control(id: &str, label: &str) -> Element {
    Element::new(Tag::Div)
        .with_class("form-control")
        .with_child(Element::new(Tag::Label).with_text(label))
        .with_child(Element::new(Tag::Input).with_id(id))
}

/// Form with title, description and people fields
pub fn project_input_template() -> Element {
    Element::new(Tag::Form)
        .with_child(form_control("title", "Title"))
        .with_child(form_control("description", "Description"))
        .with_child(form_control("people", "People"))
        .with_child(Element::new(Tag::Button).with_text("ADD PROJECT"))
}

/// Draggable card: title, head count, description
pub fn single_project_template() -> Element {
    Element::new(Tag::Li)
        .draggable(true)
        .with_child(Element::new(Tag::H2))
        .with_child(Element::new(Tag::H3))
        .with_child(Element::new(Tag::P))
}

/// Panel with a heading and an empty list
pub fn project_list_template() -> Element {
    Element::new(Tag::Section)
        .with_class("projects")
        .with_child(Element::new(Tag::Header).with_child(Element::new(Tag::H2)))
        .with_child(Element::new(Tag::Ul))
}

/// Document with an empty `app` host and all board templates registered
pub fn board_document() -> Document {
    let mut doc = Document::new();
    doc.register_template(INPUT_TEMPLATE_ID, vec![project_input_template()]);
    doc.register_template(ITEM_TEMPLATE_ID, vec![single_project_template()]);
    doc.register_template(LIST_TEMPLATE_ID, vec![project_list_template()]);
    doc.append_to_body(Element::new(Tag::Div).with_id(APP_HOST_ID));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_document_has_templates_and_host() {
        let doc = board_document();
        assert!(doc.get_element(APP_HOST_ID).is_some());
        for id in [INPUT_TEMPLATE_ID, ITEM_TEMPLATE_ID, LIST_TEMPLATE_ID] {
            assert!(doc.import_template(id).is_ok(), "missing template {id}");
        }
    }

    #[test]
    fn test_form_fields_are_inputs() {
        let form = project_input_template();
        for id in ["title", "description", "people"] {
            let field = form.find(id).unwrap();
            assert_eq!(field.tag, Tag::Input);
            assert!(field.input.is_some());
        }
    }
}
