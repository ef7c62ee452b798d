//! Selection commands

use super::{existing, Command};
use crate::error::GraphResult;
use crate::model::ElementId;
use crate::state::{EditorState, StateComponent};
use std::collections::HashSet;

/// How a selection command combines its elements with the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Replace,
    Add,
    Remove,
    Toggle,
}

#[derive(Debug, Clone)]
pub struct SelectElementsCommand {
    pub mode: SelectionMode,
    pub elements: Vec<ElementId>,
}

impl SelectElementsCommand {
    pub fn new(mode: SelectionMode, elements: Vec<ElementId>) -> Self {
        Self { mode, elements }
    }

    /// Selection after applying the command to `current`
    fn resolve(&self, current: &HashSet<ElementId>, elements: &[ElementId]) -> HashSet<ElementId> {
        match self.mode {
            SelectionMode::Replace => elements.iter().copied().collect(),
            SelectionMode::Add => current.iter().chain(elements).copied().collect(),
            SelectionMode::Remove => current.iter().filter(|id| !elements.contains(id)).copied().collect(),
            SelectionMode::Toggle => current
                .symmetric_difference(&elements.iter().copied().collect())
                .copied()
                .collect(),
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let elements = existing(&command.elements, |id| state.graph_model().contains(id));
        let current: HashSet<ElementId> = state.selection.selected().collect();
        let target = command.resolve(&current, &elements);
        if target == current {
            return Ok(());
        }

        state.push_undo(command);

        let mut selection_updater = state.selection.updater();
        for id in current.difference(&target) {
            selection_updater.unselect(*id);
            selection_updater.mark_changed(*id);
        }
        for id in target.difference(&current) {
            selection_updater.select(*id);
            selection_updater.mark_changed(*id);
        }
        Ok(())
    }
}

impl Command for SelectElementsCommand {
    fn label(&self) -> String {
        "Select Elements".to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClearSelectionCommand;

impl ClearSelectionCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if state.selection.selection_count() == 0 {
            return Ok(());
        }

        state.push_undo(command);

        let mut selection_updater = state.selection.updater();
        let previous = selection_updater.clear();
        selection_updater.mark_changed_all(previous);
        Ok(())
    }
}

impl Command for ClearSelectionCommand {
    fn label(&self) -> String {
        "Clear Selection".to_string()
    }
}
