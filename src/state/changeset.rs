//! Change-sets and per-component version tracking
//!
//! Every state component owns a [`ChangeTracker`]. Updaters accumulate marks
//! into the pending [`ChangeSet`]; committing bumps the version and files the
//! set in a bounded history that observers read incrementally.

use crate::model::ElementId;
use std::collections::{HashSet, VecDeque};

/// Three disjoint sets of element ids touched by one or more commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    new: HashSet<ElementId>,
    changed: HashSet<ElementId>,
    deleted: HashSet<ElementId>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a created element. Supersedes an earlier "changed" mark.
    pub fn mark_new(&mut self, id: ElementId) {
        self.changed.remove(&id);
        self.deleted.remove(&id);
        self.new.insert(id);
    }

    /// Records an element changed in place. Ignored for new or deleted elements.
    pub fn mark_changed(&mut self, id: ElementId) {
        if !self.new.contains(&id) && !self.deleted.contains(&id) {
            self.changed.insert(id);
        }
    }

    /// Records a deleted element. Supersedes "new" and "changed" marks.
    pub fn mark_deleted(&mut self, id: ElementId) {
        self.new.remove(&id);
        self.changed.remove(&id);
        self.deleted.insert(id);
    }

    pub fn new_models(&self) -> &HashSet<ElementId> {
        &self.new
    }

    pub fn changed_models(&self) -> &HashSet<ElementId> {
        &self.changed
    }

    pub fn deleted_models(&self) -> &HashSet<ElementId> {
        &self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.changed.is_empty() && self.deleted.is_empty()
    }

    /// Total number of marked elements
    pub fn len(&self) -> usize {
        self.new.len() + self.changed.len() + self.deleted.len()
    }

    /// Folds a later change-set into this one
    pub fn merge(&mut self, later: &ChangeSet) {
        for id in &later.new {
            self.mark_new(*id);
        }
        for id in &later.changed {
            self.mark_changed(*id);
        }
        for id in &later.deleted {
            self.mark_deleted(*id);
        }
    }

    pub fn clear(&mut self) {
        self.new.clear();
        self.changed.clear();
        self.deleted.clear();
    }
}

/// How much of a component an observer must refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// Nothing happened since the observer's version
    None,
    /// Only the elements in the change-set need a refresh
    Partial,
    /// History does not reach back far enough; rebuild everything
    Complete,
}

/// What an observer gets when asking a component for changes
#[derive(Debug, Clone, PartialEq)]
pub struct StateChanges {
    pub update_type: UpdateType,
    /// Version the observer is now up to date with
    pub version: u32,
    /// Aggregated changes; empty unless `update_type` is `Partial`
    pub changeset: ChangeSet,
}

/// Version counter, pending marks and committed history of one component
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    version: u32,
    pending: ChangeSet,
    pending_complete: bool,
    /// `(version, changes)`: the changes that produced `version`
    history: VecDeque<(u32, ChangeSet)>,
    /// Observers older than this version need a complete update
    complete_since: u32,
    max_history: usize,
}

impl ChangeTracker {
    pub fn new(max_history: usize) -> Self {
        Self {
            version: 0,
            pending: ChangeSet::new(),
            pending_complete: false,
            history: VecDeque::new(),
            complete_since: 0,
            max_history: max_history.max(1),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub(crate) fn pending_mut(&mut self) -> &mut ChangeSet {
        &mut self.pending
    }

    pub(crate) fn request_complete_update(&mut self) {
        self.pending_complete = true;
    }

    /// Files the pending marks as a new version. A commit with nothing marked
    /// leaves the version untouched.
    pub(crate) fn commit(&mut self) {
        if self.pending_complete {
            self.version += 1;
            self.complete_since = self.version;
            self.history.clear();
            self.pending.clear();
            self.pending_complete = false;
            return;
        }
        if self.pending.is_empty() {
            return;
        }

        self.version += 1;
        let changes = std::mem::take(&mut self.pending);
        self.history.push_back((self.version, changes));
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
    }

    /// Everything that changed after `since`
    pub fn changes_since(&self, since: u32) -> StateChanges {
        if since >= self.version {
            return self.changes(UpdateType::None, ChangeSet::new());
        }
        if since < self.complete_since {
            return self.changes(UpdateType::Complete, ChangeSet::new());
        }
        match self.history.front() {
            Some((oldest, _)) if *oldest <= since + 1 => {
                let mut aggregated = ChangeSet::new();
                for (_, changes) in self.history.iter().filter(|(v, _)| *v > since) {
                    aggregated.merge(changes);
                }
                self.changes(UpdateType::Partial, aggregated)
            }
            _ => self.changes(UpdateType::Complete, ChangeSet::new()),
        }
    }

    /// Changes committed by the latest version only
    pub fn last_changes(&self) -> Option<&ChangeSet> {
        match self.history.back() {
            Some((version, changes)) if *version == self.version => Some(changes),
            _ => None,
        }
    }

    /// Drops history up to and including `version` once every observer has read it
    pub fn purge_through(&mut self, version: u32) {
        self.history.retain(|(v, _)| *v > version);
    }

    fn changes(&self, update_type: UpdateType, changeset: ChangeSet) -> StateChanges {
        StateChanges {
            update_type,
            version: self.version,
            changeset,
        }
    }
}
