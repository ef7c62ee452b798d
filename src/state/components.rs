//! The state slices observers watch: graph view, selection, blackboard, tracing

use super::changeset::ChangeTracker;
use super::updater::StateComponent;
use crate::model::{ElementId, GraphModel};
use std::collections::HashSet;

/// Owns the graph model. Topology and geometry changes are marked here.
#[derive(Debug, Clone)]
pub struct GraphViewState {
    model: GraphModel,
    tracker: ChangeTracker,
}

impl GraphViewState {
    pub fn new(model: GraphModel, history_depth: usize) -> Self {
        Self {
            model,
            tracker: ChangeTracker::new(history_depth),
        }
    }

    pub fn graph_model(&self) -> &GraphModel {
        &self.model
    }

    /// Mutable access; go through an updater so the change is observed
    pub fn graph_model_mut(&mut self) -> &mut GraphModel {
        &mut self.model
    }

    /// Swaps the whole model, returning the old one. Pair with a complete update.
    pub fn replace_graph_model(&mut self, model: GraphModel) -> GraphModel {
        std::mem::replace(&mut self.model, model)
    }
}

impl StateComponent for GraphViewState {
    fn component_name(&self) -> &'static str {
        "graph view"
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }
}

/// Manages which elements are selected
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: HashSet<ElementId>,
    tracker: ChangeTracker,
}

impl SelectionState {
    pub fn new(history_depth: usize) -> Self {
        Self {
            selected: HashSet::new(),
            tracker: ChangeTracker::new(history_depth),
        }
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.selected.iter().copied()
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if the element was not already selected
    pub fn select(&mut self, id: ElementId) -> bool {
        self.selected.insert(id)
    }

    /// Returns true if the element was selected
    pub fn unselect(&mut self, id: ElementId) -> bool {
        self.selected.remove(&id)
    }

    /// Clears the selection, returning what was selected
    pub fn clear(&mut self) -> Vec<ElementId> {
        self.selected.drain().collect()
    }
}

impl StateComponent for SelectionState {
    fn component_name(&self) -> &'static str {
        "selection"
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }
}

/// Panel-local state of the blackboard (variable list)
#[derive(Debug, Clone)]
pub struct BlackboardViewState {
    expanded_rows: HashSet<ElementId>,
    collapsed_sections: HashSet<String>,
    tracker: ChangeTracker,
}

impl BlackboardViewState {
    pub fn new(history_depth: usize) -> Self {
        Self {
            expanded_rows: HashSet::new(),
            collapsed_sections: HashSet::new(),
            tracker: ChangeTracker::new(history_depth),
        }
    }

    pub fn is_row_expanded(&self, declaration: ElementId) -> bool {
        self.expanded_rows.contains(&declaration)
    }

    /// Returns true if the row state changed
    pub fn set_row_expanded(&mut self, declaration: ElementId, expanded: bool) -> bool {
        if expanded {
            self.expanded_rows.insert(declaration)
        } else {
            self.expanded_rows.remove(&declaration)
        }
    }

    pub fn is_section_collapsed(&self, section: &str) -> bool {
        self.collapsed_sections.contains(section)
    }

    /// Returns true if the section state changed
    pub fn set_section_collapsed(&mut self, section: &str, collapsed: bool) -> bool {
        if collapsed {
            self.collapsed_sections.insert(section.to_string())
        } else {
            self.collapsed_sections.remove(section)
        }
    }
}

impl StateComponent for BlackboardViewState {
    fn component_name(&self) -> &'static str {
        "blackboard"
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }
}

/// Debugger tracing controls
#[derive(Debug, Clone)]
pub struct TracingState {
    pub enabled: bool,
    pub current_frame: u32,
    /// Step within the frame; `None` before stepping starts
    pub current_step: Option<u32>,
    /// Index of the traced instance among the host's running instances
    pub target: Option<usize>,
    tracker: ChangeTracker,
}

impl TracingState {
    pub fn new(history_depth: usize) -> Self {
        Self {
            enabled: false,
            current_frame: 0,
            current_step: None,
            target: None,
            tracker: ChangeTracker::new(history_depth),
        }
    }
}

impl StateComponent for TracingState {
    fn component_name(&self) -> &'static str {
        "tracing"
    }

    fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    fn tracker_mut(&mut self) -> &mut ChangeTracker {
        &mut self.tracker
    }
}
