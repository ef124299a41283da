//! End-to-end board scenarios through the public API.

use project_board::domain::ProjectStatus;
use project_board::services::ProjectState;
use project_board::ui::components::project_list::panel_element_id;
use project_board::ui::components::{
    DragSession, FormField, ProjectInput, ProjectList, INVALID_INPUT_MESSAGE,
};
use project_board::ui::document::DocumentHandle;
use project_board::ui::templates::board_document;
use project_board::BoardConfig;
use std::cell::RefCell;
use std::rc::Rc;

struct Board {
    document: DocumentHandle,
    store: ProjectState,
    input: ProjectInput,
    active: ProjectList,
    finished: ProjectList,
}

fn board() -> Board {
    let document = board_document().into_handle();
    let store = ProjectState::new();
    let config = BoardConfig::default();
    let input = ProjectInput::new(&document, store.clone(), config.validation).unwrap();
    let active = ProjectList::new(&document, store.clone(), ProjectStatus::Active).unwrap();
    let finished = ProjectList::new(&document, store.clone(), ProjectStatus::Finished).unwrap();
    Board {
        document,
        store,
        input,
        active,
        finished,
    }
}

fn fill(input: &ProjectInput, title: &str, description: &str, people: &str) {
    input.set_field(FormField::Title, title);
    input.set_field(FormField::Description, description);
    input.set_field(FormField::People, people);
}

#[test]
fn test_add_then_drag_to_finished() {
    let board = board();
    fill(&board.input, "Build API", "Implement REST endpoints", "3");
    board.input.submit();

    let id = board.active.project_id_at(0).expect("project in active panel");
    assert!(board.finished.is_empty());

    let mut drag = DragSession::begin(&board.document, id.as_str());
    drag.hover(&board.document, &panel_element_id(ProjectStatus::Finished));
    assert!(drag.release(&board.document));

    assert!(board.active.is_empty());
    assert_eq!(board.finished.project_id_at(0), Some(id.clone()));

    let finished = board.store.projects_with_status(ProjectStatus::Finished);
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].title, "Build API");
    assert_eq!(finished[0].people, 3);
}

#[test]
fn test_short_description_is_rejected_without_notifying() {
    let board = board();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let _subscription = board.store.add_listener(move |_| *counter.borrow_mut() += 1);

    fill(&board.input, "Build API", "four", "3");
    board.input.submit();

    assert_eq!(*calls.borrow(), 0);
    assert!(board.store.is_empty());
    assert_eq!(
        board.document.borrow().pending_alert(),
        Some(INVALID_INPUT_MESSAGE)
    );
}

#[test]
fn test_every_listener_sees_new_project_in_order() {
    let board = board();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let subscriptions: Vec<_> = (0..3)
        .map(|n| {
            let seen = Rc::clone(&seen);
            board.store.add_listener(move |projects| {
                assert_eq!(projects.len(), 1);
                seen.borrow_mut().push(n);
            })
        })
        .collect();

    fill(&board.input, "Write docs", "Document the public API", "2");
    board.input.submit();

    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    drop(subscriptions);
}

#[test]
fn test_dropping_back_on_same_panel_changes_nothing() {
    let board = board();
    fill(&board.input, "Build API", "Implement REST endpoints", "3");
    board.input.submit();
    let id = board.active.project_id_at(0).unwrap();

    let mut drag = DragSession::begin(&board.document, id.as_str());
    drag.hover(&board.document, &panel_element_id(ProjectStatus::Active));
    drag.release(&board.document);

    assert_eq!(board.active.len(), 1);
    assert!(board.finished.is_empty());
    assert_eq!(board.store.get(&id).unwrap().status, ProjectStatus::Active);
}
