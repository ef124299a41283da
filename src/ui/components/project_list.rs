//! Panel listing the projects of one status; a drop target for cards.

use super::drag::{bind_drag_target, DragTarget};
use super::{construct, Component, ComponentBase, ProjectItem, APP_HOST_ID};
use crate::domain::{Project, ProjectId, ProjectStatus};
use crate::error::{ComponentError, ComponentResult};
use crate::services::{ProjectState, Subscription};
use crate::ui::document::{
    Document, DocumentHandle, DomEvent, Element, InsertPosition, Tag, TEXT_PLAIN,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Template id for list panels
pub const LIST_TEMPLATE_ID: &str = "project-list";

/// Class set on the list while an acceptable drag hovers over it
pub const DROPPABLE_CLASS: &str = "droppable";

/// Element id of the panel for a status (`active-projects`)
pub fn panel_element_id(status: ProjectStatus) -> String {
    format!("{}-projects", status.as_str())
}

/// Element id of the panel's list (`active-projects-list`)
pub fn list_element_id(status: ProjectStatus) -> String {
    format!("{}-projects-list", status.as_str())
}

/// Projects of one status, re-rendered on every store change
#[derive(Debug)]
pub struct ProjectList {
    base: ComponentBase,
    status: ProjectStatus,
    store: ProjectState,
    assigned: Rc<RefCell<Vec<Project>>>,
    subscription: Option<Subscription>,
}

impl ProjectList {
    /// Mount a panel for `status` at the end of the app host
    pub fn new(
        document: &DocumentHandle,
        store: ProjectState,
        status: ProjectStatus,
    ) -> ComponentResult<Self> {
        let base = ComponentBase::mount(
            document,
            LIST_TEMPLATE_ID,
            APP_HOST_ID,
            InsertPosition::End,
            Some(&panel_element_id(status)),
        )?;
        construct(Self {
            base,
            status,
            store,
            assigned: Rc::new(RefCell::new(Vec::new())),
            subscription: None,
        })
    }

    /// Status of projects shown in this panel
    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Projects currently rendered in this panel
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    /// Id of the project at `index` in this panel
    pub fn project_id_at(&self, index: usize) -> Option<ProjectId> {
        self.assigned.borrow().get(index).map(|p| p.id.clone())
    }

    /// Position of a project in this panel
    pub fn index_of(&self, id: &ProjectId) -> Option<usize> {
        self.assigned.borrow().iter().position(|p| &p.id == id)
    }

    /// Number of cards rendered
    pub fn len(&self) -> usize {
        self.assigned.borrow().len()
    }

    /// True when the panel shows no cards
    pub fn is_empty(&self) -> bool {
        self.assigned.borrow().is_empty()
    }

    /// Stop following the store
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Component for ProjectList {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn configure(&mut self) -> ComponentResult<()> {
        let list_id = list_element_id(self.status);
        let document = Rc::downgrade(self.base.document());

        bind_drag_target(
            &self.base,
            Rc::new(ListDropZone {
                document: document.clone(),
                list_id: list_id.clone(),
                status: self.status,
                store: self.store.clone(),
            }),
        );

        let status = self.status;
        let assigned = Rc::clone(&self.assigned);
        self.subscription = Some(self.store.add_listener(move |projects| {
            let relevant: Vec<Project> =
                projects.into_iter().filter(|p| p.status == status).collect();
            *assigned.borrow_mut() = relevant.clone();
            if let Err(e) = render_projects(&document, &list_id, relevant) {
                tracing::error!("Failed to render {} projects: {}", status, e);
            }
        }));
        Ok(())
    }

    fn render_content(&mut self) -> ComponentResult<()> {
        let status = self.status;
        self.base.with_element_mut(|el| -> ComponentResult<()> {
            el.query_tag_mut(Tag::Ul)
                .ok_or_else(|| ComponentError::ElementNotFound("ul".to_string()))?
                .id = Some(list_element_id(status));
            el.query_tag_mut(Tag::H2)
                .ok_or_else(|| ComponentError::ElementNotFound("h2".to_string()))?
                .text = format!("{} PROJECTS", status.as_str().to_uppercase());
            Ok(())
        })??;

        // Pick up projects added before this panel existed
        let existing = self.store.projects_with_status(status);
        if !existing.is_empty() {
            *self.assigned.borrow_mut() = existing.clone();
            render_projects(
                &Rc::downgrade(self.base.document()),
                &list_element_id(status),
                existing,
            )?;
        }
        Ok(())
    }
}

/// Rebuild the list's children from scratch
fn render_projects(
    document: &Weak<RefCell<Document>>,
    list_id: &str,
    projects: Vec<Project>,
) -> ComponentResult<()> {
    let Some(document) = document.upgrade() else {
        return Ok(());
    };
    document.borrow_mut().clear_children(list_id)?;
    for project in projects {
        ProjectItem::new(&document, list_id, project)?;
    }
    Ok(())
}

/// Drop handling bound to one panel
struct ListDropZone {
    document: Weak<RefCell<Document>>,
    list_id: String,
    status: ProjectStatus,
    store: ProjectState,
}

impl ListDropZone {
    fn with_list(&self, f: impl FnOnce(&mut Element)) {
        let Some(document) = self.document.upgrade() else {
            return;
        };
        let mut doc = document.borrow_mut();
        if let Some(list) = doc.get_element_mut(&self.list_id) {
            f(list);
        }
    }
}

impl DragTarget for ListDropZone {
    fn drag_over_handler(&self, event: &mut DomEvent) {
        let is_text = event
            .data_transfer
            .as_ref()
            .and_then(|d| d.types().first().map(|t| *t == TEXT_PLAIN))
            .unwrap_or(false);
        if is_text {
            event.prevent_default();
            self.with_list(|list| list.add_class(DROPPABLE_CLASS));
        }
    }

    fn drop_handler(&self, event: &mut DomEvent) {
        let Some(data) = event.data_transfer.as_ref() else {
            return;
        };
        let id = ProjectId::from(data.get_data(TEXT_PLAIN));
        self.store.move_project(&id, self.status);
    }

    fn drag_leave_handler(&self, _event: &mut DomEvent) {
        self.with_list(|list| list.remove_class(DROPPABLE_CLASS));
    }
}
