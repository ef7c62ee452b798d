//! Blackboard panel commands. These only touch view state and are not undoable.

use super::{existing, Command};
use crate::error::GraphResult;
use crate::model::ElementId;
use crate::state::{EditorState, StateComponent};

/// Expands or collapses the detail rows of variable declarations
#[derive(Debug, Clone)]
pub struct ExpandOrCollapseBlackboardRowCommand {
    pub rows: Vec<ElementId>,
    pub expand: bool,
}

impl ExpandOrCollapseBlackboardRowCommand {
    pub fn new(rows: Vec<ElementId>, expand: bool) -> Self {
        Self { rows, expand }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_view.graph_model();
        let rows = existing(&command.rows, |id| model.variable(id).is_some());

        let mut blackboard_updater = state.blackboard.updater();
        for id in rows {
            if blackboard_updater.set_row_expanded(id, command.expand) {
                blackboard_updater.mark_changed(id);
            }
        }
        Ok(())
    }
}

impl Command for ExpandOrCollapseBlackboardRowCommand {
    fn label(&self) -> String {
        if self.expand {
            "Expand Rows".to_string()
        } else {
            "Collapse Rows".to_string()
        }
    }
}

/// Folds a named blackboard section
#[derive(Debug, Clone)]
pub struct CollapseBlackboardSectionCommand {
    pub section: String,
    pub collapse: bool,
}

impl CollapseBlackboardSectionCommand {
    pub fn new(section: impl Into<String>, collapse: bool) -> Self {
        Self {
            section: section.into(),
            collapse,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let mut blackboard_updater = state.blackboard.updater();
        if blackboard_updater.set_section_collapsed(&command.section, command.collapse) {
            // Sections have no element id; observers rebuild the panel
            blackboard_updater.force_complete_update();
        }
        Ok(())
    }
}

impl Command for CollapseBlackboardSectionCommand {
    fn label(&self) -> String {
        "Collapse Section".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataType, GraphModel, VariableModifiers};
    use crate::state::UpdateType;

    #[test]
    fn test_expand_rows_is_not_undoable() {
        let mut graph = GraphModel::new("test");
        let decl = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let mut state = EditorState::new(graph);

        let command = ExpandOrCollapseBlackboardRowCommand::new(vec![decl, ElementId::new()], true);
        ExpandOrCollapseBlackboardRowCommand::default_handler(&mut state, &command).unwrap();

        assert!(state.blackboard.is_row_expanded(decl));
        assert!(state.undo_history().is_empty());
        assert_eq!(state.graph_view.version(), 0);
        assert_eq!(state.blackboard.version(), 1);

        // Already expanded
        ExpandOrCollapseBlackboardRowCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.blackboard.version(), 1);
    }

    #[test]
    fn test_collapse_section_forces_complete_update() {
        let mut state = EditorState::new(GraphModel::new("test"));
        let command = CollapseBlackboardSectionCommand::new("Exposed", true);
        CollapseBlackboardSectionCommand::default_handler(&mut state, &command).unwrap();

        assert!(state.blackboard.is_section_collapsed("Exposed"));
        assert_eq!(state.blackboard.changes_since(0).update_type, UpdateType::Complete);
    }
}
