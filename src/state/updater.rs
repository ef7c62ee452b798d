//! Scoped update transactions over state components

use super::changeset::{ChangeSet, ChangeTracker, StateChanges};
use crate::model::ElementId;
use std::ops::{Deref, DerefMut};

/// A named slice of editor state that observers watch for changes
pub trait StateComponent {
    /// Name used in logs
    fn component_name(&self) -> &'static str;

    fn tracker(&self) -> &ChangeTracker;

    fn tracker_mut(&mut self) -> &mut ChangeTracker;

    /// Opens an update transaction. Marks made through it are committed
    /// when it goes out of scope.
    fn updater(&mut self) -> StateUpdater<'_, Self>
    where
        Self: Sized,
    {
        StateUpdater::new(self)
    }

    fn version(&self) -> u32 {
        self.tracker().version()
    }

    fn changes_since(&self, version: u32) -> StateChanges {
        self.tracker().changes_since(version)
    }

    /// Changes committed by the current version, if it was committed with marks
    fn last_changes(&self) -> Option<&ChangeSet> {
        self.tracker().last_changes()
    }
}

/// Update transaction guard.
///
/// Dereferences to the component so handlers mutate through it, and commits
/// the accumulated change-set exactly once in `Drop`, whichever way the
/// handler leaves the scope.
pub struct StateUpdater<'a, S: StateComponent> {
    component: &'a mut S,
}

impl<'a, S: StateComponent> StateUpdater<'a, S> {
    fn new(component: &'a mut S) -> Self {
        Self { component }
    }

    pub fn mark_new(&mut self, id: ElementId) {
        self.component.tracker_mut().pending_mut().mark_new(id);
    }

    pub fn mark_changed(&mut self, id: ElementId) {
        self.component.tracker_mut().pending_mut().mark_changed(id);
    }

    pub fn mark_deleted(&mut self, id: ElementId) {
        self.component.tracker_mut().pending_mut().mark_deleted(id);
    }

    pub fn mark_new_all(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.mark_new(id);
        }
    }

    pub fn mark_changed_all(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.mark_changed(id);
        }
    }

    pub fn mark_deleted_all(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.mark_deleted(id);
        }
    }

    /// Observers will rebuild the whole component instead of patching it
    pub fn force_complete_update(&mut self) {
        self.component.tracker_mut().request_complete_update();
    }
}

impl<S: StateComponent> Deref for StateUpdater<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.component
    }
}

impl<S: StateComponent> DerefMut for StateUpdater<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.component
    }
}

impl<S: StateComponent> Drop for StateUpdater<'_, S> {
    fn drop(&mut self) {
        self.component.tracker_mut().commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::changeset::UpdateType;

    struct Counter {
        value: i32,
        tracker: ChangeTracker,
    }

    impl StateComponent for Counter {
        fn component_name(&self) -> &'static str {
            "counter"
        }

        fn tracker(&self) -> &ChangeTracker {
            &self.tracker
        }

        fn tracker_mut(&mut self) -> &mut ChangeTracker {
            &mut self.tracker
        }
    }

    fn failing_edit(counter: &mut Counter, id: ElementId) -> Result<(), &'static str> {
        let mut updater = counter.updater();
        updater.value += 1;
        updater.mark_changed(id);
        let step: Result<i32, &'static str> = Err("bail out");
        updater.value += step?;
        Ok(())
    }

    #[test]
    fn test_commit_on_scope_exit() {
        let mut counter = Counter {
            value: 0,
            tracker: ChangeTracker::new(4),
        };
        let id = ElementId::new();
        {
            let mut updater = counter.updater();
            updater.value = 5;
            updater.mark_new(id);
            assert_eq!(updater.version(), 0);
        }
        assert_eq!(counter.value, 5);
        assert_eq!(counter.version(), 1);
        assert!(counter.changes_since(0).changeset.new_models().contains(&id));
    }

    #[test]
    fn test_last_changes_follow_latest_commit() {
        let mut counter = Counter {
            value: 0,
            tracker: ChangeTracker::new(4),
        };
        assert!(counter.last_changes().is_none());

        let first = ElementId::new();
        let second = ElementId::new();
        counter.updater().mark_new(first);
        counter.updater().mark_changed(second);

        let last = counter.last_changes().unwrap();
        assert!(last.changed_models().contains(&second));
        assert!(!last.new_models().contains(&first));
    }

    #[test]
    fn test_commit_on_early_return() {
        let mut counter = Counter {
            value: 0,
            tracker: ChangeTracker::new(4),
        };
        let id = ElementId::new();
        assert!(failing_edit(&mut counter, id).is_err());
        assert_eq!(counter.value, 1);
        let changes = counter.changes_since(0);
        assert_eq!(changes.update_type, UpdateType::Partial);
        assert!(changes.changeset.changed_models().contains(&id));
    }
}
