//! Snapshot-based undo history
//!
//! Handlers push a record before mutating. The host editor decides when to
//! step back and forth through it.

use crate::model::{ElementId, GraphModel};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// State captured before a command mutates anything
#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    pub graph: GraphModel,
    pub selection: Vec<ElementId>,
}

/// One entry of the undo history
#[derive(Debug, Clone)]
pub struct UndoRecord {
    /// Command label shown in the Edit menu
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: UndoSnapshot,
}

impl UndoRecord {
    pub fn new(label: impl Into<String>, snapshot: UndoSnapshot) -> Self {
        Self {
            label: label.into(),
            timestamp: Utc::now(),
            snapshot,
        }
    }
}

/// Bounded undo/redo stacks
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo_stack: VecDeque<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
    max_depth: usize,
}

impl UndoHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Records a new undoable step; clears the redo stack
    pub fn push(&mut self, record: UndoRecord) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push_back(record);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Steps back: returns the snapshot to restore and keeps `current` for redo
    pub fn undo(&mut self, current: UndoSnapshot) -> Option<UndoRecord> {
        let record = self.undo_stack.pop_back()?;
        self.redo_stack.push(UndoRecord::new(record.label.clone(), current));
        Some(record)
    }

    /// Steps forward: returns the snapshot to restore and keeps `current` for undo
    pub fn redo(&mut self, current: UndoSnapshot) -> Option<UndoRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push_back(UndoRecord::new(record.label.clone(), current));
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Label of the step `undo` would revert
    pub fn last_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|r| r.label.as_str())
    }

    /// Labels from oldest to newest
    pub fn labels(&self) -> Vec<&str> {
        self.undo_stack.iter().map(|r| r.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> UndoSnapshot {
        UndoSnapshot {
            graph: GraphModel::new(name),
            selection: vec![],
        }
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = UndoHistory::new(2);
        for label in ["a", "b", "c"] {
            history.push(UndoRecord::new(label, snapshot(label)));
        }
        assert_eq!(history.labels(), ["b", "c"]);
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = UndoHistory::new(10);
        history.push(UndoRecord::new("Move", snapshot("before")));

        let undone = history.undo(snapshot("after")).unwrap();
        assert_eq!(undone.snapshot.graph.name, "before");
        assert!(history.can_redo());

        let redone = history.redo(snapshot("before")).unwrap();
        assert_eq!(redone.snapshot.graph.name, "after");
        assert_eq!(history.last_label(), Some("Move"));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = UndoHistory::new(10);
        history.push(UndoRecord::new("a", snapshot("a")));
        history.undo(snapshot("b"));
        history.push(UndoRecord::new("c", snapshot("c")));
        assert!(!history.can_redo());
    }
}
