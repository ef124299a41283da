//! Observable in-memory project store.
//!
//! The store is a cheap-to-clone handle; every clone shares the same project
//! list and listener set. It is single-threaded (`Rc`/`RefCell`) because all
//! mutation happens on the UI event loop.

use crate::domain::{Project, ProjectId, ProjectStatus};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(Vec<Project>)>>;

#[derive(Default)]
struct StoreInner {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
    /// Set while listeners are being called
    notifying: Cell<bool>,
    /// A mutation happened during the current round
    pending: Cell<bool>,
}

/// Shared handle to the project store
#[derive(Clone, Default)]
pub struct ProjectState {
    inner: Rc<StoreInner>,
}

impl std::fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectState")
            .field("projects", &self.inner.projects.borrow().len())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl ProjectState {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new active project and notify listeners.
    ///
    /// Input is trusted; callers validate before adding.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> ProjectId {
        let project = Project::new(title, description, people);
        let id = project.id.clone();
        tracing::debug!(id = %id, title = %project.title, people, "Adding project");
        self.inner.projects.borrow_mut().push(project);
        self.notify();
        id
    }

    /// Reassign a project's status.
    ///
    /// Unknown ids and moves to the current status are ignored and do not
    /// notify. Returns whether the status changed.
    pub fn move_project(&self, id: &ProjectId, new_status: ProjectStatus) -> bool {
        let changed = {
            let mut projects = self.inner.projects.borrow_mut();
            match projects.iter_mut().find(|p| &p.id == id) {
                Some(project) if project.status != new_status => {
                    project.status = new_status;
                    true
                }
                Some(_) => false,
                None => {
                    tracing::debug!(id = %id, "Move ignored: unknown project");
                    false
                }
            }
        };

        if changed {
            tracing::debug!(id = %id, status = %new_status, "Moved project");
            self.notify();
        }
        changed
    }

    /// Register a listener, called with a copy of the project list on every change.
    ///
    /// The listener stays registered until the returned handle is
    /// unsubscribed or dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn add_listener<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(Vec<Project>) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);

        let listener: Listener = Rc::new(RefCell::new(listener));
        self.inner.listeners.borrow_mut().push((id, listener));

        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Snapshot of all projects in insertion order
    pub fn projects(&self) -> Vec<Project> {
        self.inner.projects.borrow().clone()
    }

    /// Snapshot of the projects with the given status
    pub fn projects_with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.inner
            .projects
            .borrow()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    /// Look up a single project
    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.inner.projects.borrow().iter().find(|p| &p.id == id).cloned()
    }

    /// Number of projects in any status
    pub fn len(&self) -> usize {
        self.inner.projects.borrow().len()
    }

    /// True when no project has been added
    pub fn is_empty(&self) -> bool {
        self.inner.projects.borrow().is_empty()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Call every listener in registration order.
    ///
    /// Mutations made from inside a listener do not recurse; they schedule
    /// another round that runs once the current one completes.
    fn notify(&self) {
        let inner = &self.inner;
        if inner.notifying.get() {
            inner.pending.set(true);
            return;
        }

        inner.notifying.set(true);
        let _round = NotifyingGuard(&inner.notifying);
        loop {
            inner.pending.set(false);

            let snapshot = inner.projects.borrow().clone();
            let listeners: Vec<(u64, Listener)> = inner
                .listeners
                .borrow()
                .iter()
                .map(|(id, l)| (*id, Rc::clone(l)))
                .collect();

            for (id, listener) in listeners {
                // Skip listeners unsubscribed earlier in this round
                let registered = inner.listeners.borrow().iter().any(|(l, _)| *l == id);
                if registered {
                    (&mut *listener.borrow_mut())(snapshot.clone());
                }
            }

            if !inner.pending.get() {
                break;
            }
            tracing::trace!("Store changed during notification, running another round");
        }
    }
}

/// Clears the notifying flag when a round ends, even by unwinding
struct NotifyingGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Handle for a registered listener; unregisters on `unsubscribe` or drop
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Unregister the listener
    pub fn unsubscribe(self) {
        // Drop does the work
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .map_or(false, |s| s.listeners.borrow().iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Vec<Project>>>>, impl FnMut(Vec<Project>)) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |projects| sink.borrow_mut().push(projects))
    }

    #[test]
    fn test_add_project_notifies_with_snapshot() {
        let store = ProjectState::new();
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        let id = store.add_project("Build API", "Implement REST endpoints", 3);

        assert_eq!(store.len(), 1);
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].id, id);
        assert_eq!(calls[0][0].status, ProjectStatus::Active);
        assert_eq!(calls[0][0].people, 3);
    }

    #[test]
    fn test_move_project_changes_filters() {
        let store = ProjectState::new();
        let id = store.add_project("Build API", "Implement REST endpoints", 3);

        assert!(store.move_project(&id, ProjectStatus::Finished));
        assert!(store.projects_with_status(ProjectStatus::Active).is_empty());
        let finished = store.projects_with_status(ProjectStatus::Finished);
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id, id);
    }

    #[test]
    fn test_move_unknown_id_is_silent() {
        let store = ProjectState::new();
        store.add_project("a", "descr", 1);
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        assert!(!store.move_project(&ProjectId::from("missing"), ProjectStatus::Finished));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_move_to_same_status_does_not_notify() {
        let store = ProjectState::new();
        let id = store.add_project("a", "descr", 1);
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        assert!(!store.move_project(&id, ProjectStatus::Active));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let store = ProjectState::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|n| {
                let order = Rc::clone(&order);
                store.add_listener(move |_| order.borrow_mut().push(n))
            })
            .collect();

        store.add_project("a", "descr", 1);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_listener_copy_is_independent() {
        let store = ProjectState::new();
        let _vandal = store.add_listener(|mut projects| {
            projects.clear();
        });
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        store.add_project("a", "descr", 1);
        store.add_project("b", "descr", 2);

        assert_eq!(store.len(), 2);
        assert_eq!(calls.borrow()[1].len(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = ProjectState::new();
        let (calls, listener) = recorder();
        let sub = store.add_listener(listener);
        assert!(sub.is_active());

        store.add_project("a", "descr", 1);
        sub.unsubscribe();
        store.add_project("b", "descr", 1);

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = ProjectState::new();
        {
            let _sub = store.add_listener(|_| {});
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_mutation_inside_listener_does_not_recurse() {
        let store = ProjectState::new();
        let handle = store.clone();
        let mut fired = false;
        let _auto = store.add_listener(move |projects| {
            // Auto-finish the first project once
            if !fired {
                fired = true;
                handle.move_project(&projects[0].id, ProjectStatus::Finished);
            }
        });
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        store.add_project("a", "descr", 1);

        let calls = calls.borrow();
        // One round for the add, one follow-up round for the nested move
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][0].status, ProjectStatus::Active);
        assert_eq!(calls[1][0].status, ProjectStatus::Finished);
    }

    #[test]
    fn test_store_recovers_after_listener_panic() {
        let store = ProjectState::new();
        let mut first = true;
        let _flaky = store.add_listener(move |_| {
            if first {
                first = false;
                panic!("listener failed");
            }
        });
        let (calls, listener) = recorder();
        let _sub = store.add_listener(listener);

        let handle = store.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            handle.add_project("a", "descr", 1);
        }));
        assert!(result.is_err());
        assert!(calls.borrow().is_empty());

        store.add_project("b", "descr", 2);
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0].len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProjectState::new();
        let other = store.clone();
        other.add_project("a", "descr", 1);
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
