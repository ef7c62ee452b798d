//! Editor state - the explicit context every command handler receives

pub mod changeset;
pub mod components;
pub mod undo;
pub mod updater;

pub use changeset::{ChangeSet, ChangeTracker, StateChanges, UpdateType};
pub use components::{BlackboardViewState, GraphViewState, SelectionState, TracingState};
pub use undo::{UndoHistory, UndoRecord, UndoSnapshot};
pub use updater::{StateComponent, StateUpdater};

use crate::commands::Command;
use crate::config::Preferences;
use crate::model::GraphModel;
use log::debug;

/// Everything a command may read or write
#[derive(Debug, Clone)]
pub struct EditorState {
    pub graph_view: GraphViewState,
    pub selection: SelectionState,
    pub blackboard: BlackboardViewState,
    pub tracing: TracingState,
    pub preferences: Preferences,
    undo_history: UndoHistory,
}

impl EditorState {
    /// Creates editor state around a graph with default preferences
    pub fn new(graph: GraphModel) -> Self {
        Self::with_preferences(graph, Preferences::default())
    }

    pub fn with_preferences(graph: GraphModel, preferences: Preferences) -> Self {
        let depth = preferences.changeset_history_depth;
        Self {
            graph_view: GraphViewState::new(graph, depth),
            selection: SelectionState::new(depth),
            blackboard: BlackboardViewState::new(depth),
            tracing: TracingState::new(depth),
            undo_history: UndoHistory::new(preferences.max_undo_depth),
            preferences,
        }
    }

    /// Shortcut for `graph_view.graph_model()`
    pub fn graph_model(&self) -> &GraphModel {
        self.graph_view.graph_model()
    }

    /// Records an undo step labelled after the command. Call before mutating.
    pub fn push_undo(&mut self, command: &dyn Command) {
        let label = command.label();
        debug!("Pushing undo record '{}'", label);
        let snapshot = self.snapshot();
        self.undo_history.push(UndoRecord::new(label, snapshot));
    }

    pub fn undo_history(&self) -> &UndoHistory {
        &self.undo_history
    }

    /// Restores the state before the last undoable command. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.undo_history.undo(current) {
            Some(record) => {
                debug!("Undo '{}'", record.label);
                self.restore(record.snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone command
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.undo_history.redo(current) {
            Some(record) => {
                debug!("Redo '{}'", record.label);
                self.restore(record.snapshot);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> UndoSnapshot {
        UndoSnapshot {
            graph: self.graph_view.graph_model().clone(),
            selection: self.selection.selected().collect(),
        }
    }

    fn restore(&mut self, snapshot: UndoSnapshot) {
        {
            let mut graph_updater = self.graph_view.updater();
            graph_updater.replace_graph_model(snapshot.graph);
            graph_updater.force_complete_update();
        }
        let mut selection_updater = self.selection.updater();
        selection_updater.clear();
        for id in snapshot.selection {
            selection_updater.select(id);
        }
        selection_updater.force_complete_update();
    }
}
