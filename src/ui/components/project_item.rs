//! A single project card inside a list.

use super::drag::{bind_draggable, Draggable};
use super::{construct, Component, ComponentBase};
use crate::domain::{Project, ProjectId};
use crate::error::ComponentResult;
use crate::ui::document::{DocumentHandle, DomEvent, InsertPosition, Tag, TEXT_PLAIN};
use std::rc::Rc;

/// Template id for project cards
pub const ITEM_TEMPLATE_ID: &str = "single-project";

/// Card for one project, draggable between lists
#[derive(Debug)]
pub struct ProjectItem {
    base: ComponentBase,
    project: Project,
}

impl ProjectItem {
    /// Mount a card for `project` at the end of `host_id`
    pub fn new(document: &DocumentHandle, host_id: &str, project: Project) -> ComponentResult<Self> {
        let base = ComponentBase::mount(
            document,
            ITEM_TEMPLATE_ID,
            host_id,
            InsertPosition::End,
            Some(project.id.as_str()),
        )?;
        construct(Self { base, project })
    }
}

impl Component for ProjectItem {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self) -> ComponentResult<()> {
        bind_draggable(&self.base, Rc::new(ItemDragSource(self.project.id.clone())));
        Ok(())
    }

    fn render_content(&mut self) -> ComponentResult<()> {
        let project = &self.project;
        self.base.with_element_mut(|el| {
            if let Some(h2) = el.query_tag_mut(Tag::H2) {
                h2.text = project.title.clone();
            }
            if let Some(h3) = el.query_tag_mut(Tag::H3) {
                h3.text = format!("{} assigned", project.persons());
            }
            if let Some(p) = el.query_tag_mut(Tag::P) {
                p.text = project.description.clone();
            }
        })
    }
}

/// Drag source bound to a card's project id
struct ItemDragSource(ProjectId);

impl Draggable for ItemDragSource {
    fn drag_start_handler(&self, event: &mut DomEvent) {
        if let Some(data) = event.data_transfer.as_mut() {
            data.set_data(TEXT_PLAIN, self.0.as_str());
            data.effect_allowed = Some("move".to_string());
        }
    }

    fn drag_end_handler(&self, _event: &mut DomEvent) {
        tracing::debug!(id = %self.0, "Drag ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::DragSession;
    use crate::ui::templates::board_document;

    #[test]
    fn test_item_renders_project() {
        let doc = board_document().into_handle();
        let project = Project::new("Build API", "Implement REST endpoints", 3);
        let id = project.id.clone();
        let item = ProjectItem::new(&doc, "app", project).unwrap();

        assert_eq!(item.base().element_id(), id.as_str());
        let doc_ref = doc.borrow();
        let li = doc_ref.get_element(id.as_str()).unwrap();
        assert!(li.draggable);
        assert_eq!(li.query_tag(Tag::H2).unwrap().text, "Build API");
        assert_eq!(li.query_tag(Tag::H3).unwrap().text, "3 persons assigned");
        assert_eq!(li.query_tag(Tag::P).unwrap().text, "Implement REST endpoints");
    }

    #[test]
    fn test_single_person_label() {
        let doc = board_document().into_handle();
        let project = Project::new("Solo", "One person job", 1);
        let id = project.id.clone();
        ProjectItem::new(&doc, "app", project).unwrap();

        let doc_ref = doc.borrow();
        let li = doc_ref.get_element(id.as_str()).unwrap();
        assert_eq!(li.query_tag(Tag::H3).unwrap().text, "1 person assigned");
    }

    #[test]
    fn test_drag_start_sets_payload() {
        let doc = board_document().into_handle();
        let project = Project::new("Build API", "Implement REST endpoints", 3);
        let id = project.id.clone();
        ProjectItem::new(&doc, "app", project).unwrap();

        let drag = DragSession::begin(&doc, id.as_str());
        assert_eq!(drag.data().types(), vec![TEXT_PLAIN]);
        assert_eq!(drag.data().get_data(TEXT_PLAIN), id.as_str());
        assert_eq!(drag.data().effect_allowed.as_deref(), Some("move"));
        drag.cancel(&doc);
    }
}
