//! Graph variable commands: declarations and the nodes reading or writing them

use super::node::connect_to_port;
use super::{delete_edges, existing, Command, GraphUpdater};
use crate::error::GraphResult;
use crate::model::{
    ConstantValue, DataType, ElementId, NodeKind, NodeModel, PortRef, VariableModifiers,
};
use crate::state::{EditorState, StateComponent};
use egui::Pos2;
use log::debug;

/// Deletes the edges of `node` that no longer fit its ports
fn delete_invalid_edges(updater: &mut GraphUpdater<'_>, node: ElementId) {
    let model = updater.graph_model();
    let invalid: Vec<ElementId> = model
        .edge_ids_of_node(node)
        .into_iter()
        .filter(|id| {
            model
                .edge(*id)
                .is_some_and(|e| model.check_connection(&e.to, &e.from).is_err())
        })
        .collect();
    if !invalid.is_empty() {
        debug!("Dropping {} edge(s) invalidated on node {}", invalid.len(), node);
        delete_edges(updater, &invalid);
    }
}

/// Declares a new graph variable and selects it
#[derive(Debug, Clone)]
pub struct CreateGraphVariableDeclarationCommand {
    pub name: String,
    pub data_type: DataType,
    pub exposed: bool,
    pub modifiers: VariableModifiers,
}

impl CreateGraphVariableDeclarationCommand {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            exposed: false,
            modifiers: VariableModifiers::Read,
        }
    }

    pub fn with_exposed(mut self, exposed: bool) -> Self {
        self.exposed = exposed;
        self
    }

    pub fn with_modifiers(mut self, modifiers: VariableModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        state.push_undo(command);

        let declaration = {
            let mut graph_updater = state.graph_view.updater();
            let declaration = graph_updater.graph_model_mut().create_variable_declaration(
                &command.name,
                command.data_type,
                command.exposed,
                command.modifiers,
            );
            graph_updater.mark_new(declaration);
            declaration
        };

        let mut selection_updater = state.selection.updater();
        let previous = selection_updater.clear();
        selection_updater.mark_changed_all(previous);
        selection_updater.select(declaration);
        selection_updater.mark_changed(declaration);
        Ok(())
    }
}

impl Command for CreateGraphVariableDeclarationCommand {
    fn label(&self) -> String {
        "Create Variable".to_string()
    }
}

/// Where one variable node goes, and optionally which port it gets wired to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableNodePlacement {
    pub declaration: ElementId,
    pub position: Pos2,
    pub port: Option<PortRef>,
}

impl VariableNodePlacement {
    pub fn new(declaration: ElementId, position: Pos2) -> Self {
        Self {
            declaration,
            position,
            port: None,
        }
    }

    pub fn connected_to(mut self, port: PortRef) -> Self {
        self.port = Some(port);
        self
    }
}

/// Drops variable nodes on the graph, typically from a blackboard drag
#[derive(Debug, Clone)]
pub struct CreateVariableNodesCommand {
    pub placements: Vec<VariableNodePlacement>,
}

impl CreateVariableNodesCommand {
    pub fn new(placements: Vec<VariableNodePlacement>) -> Self {
        Self { placements }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let placements: Vec<VariableNodePlacement> = command
            .placements
            .iter()
            .filter(|p| model.variable(p.declaration).is_some())
            .copied()
            .collect();
        if placements.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let itemize = state.preferences.itemize_options();
        let mut graph_updater = state.graph_view.updater();
        for placement in placements {
            let model = graph_updater.graph_model_mut();
            let Some(declaration) = model.variable(placement.declaration).cloned() else {
                continue;
            };
            let node = model.add_node(NodeModel::variable(&declaration, placement.position));
            graph_updater.mark_new(node);

            if let Some(port) = placement.port {
                connect_to_port(&mut graph_updater, node, port, itemize)?;
            }
        }
        Ok(())
    }
}

impl Command for CreateVariableNodesCommand {
    fn label(&self) -> String {
        if self.placements.len() == 1 {
            "Create Variable Node".to_string()
        } else {
            "Create Variable Nodes".to_string()
        }
    }
}

/// Points variable nodes at another declaration
#[derive(Debug, Clone)]
pub struct ChangeVariableDeclarationCommand {
    pub nodes: Vec<ElementId>,
    pub declaration: ElementId,
}

impl ChangeVariableDeclarationCommand {
    pub fn new(nodes: Vec<ElementId>, declaration: ElementId) -> Self {
        Self { nodes, declaration }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let Some(declaration) = model.variable(command.declaration).cloned() else {
            debug!("Variable {} does not exist", command.declaration);
            return Ok(());
        };
        let nodes = existing(&command.nodes, |id| {
            model.node(id).is_some_and(|n| match n.kind {
                NodeKind::Variable { declaration: d } => d != declaration.id,
                _ => false,
            })
        });
        if nodes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in nodes {
            if let Some(node) = graph_updater.graph_model_mut().node_mut(id) {
                node.kind = NodeKind::Variable {
                    declaration: declaration.id,
                };
                node.title = declaration.name.clone();
                node.rebuild_variable_ports(&declaration);
            }
            graph_updater.mark_changed(id);
            delete_invalid_edges(&mut graph_updater, id);
        }
        Ok(())
    }
}

impl Command for ChangeVariableDeclarationCommand {
    fn label(&self) -> String {
        "Change Variable".to_string()
    }
}

/// Changes the type of a declaration, resetting its default value and
/// disconnecting edges its nodes can no longer carry
#[derive(Debug, Clone)]
pub struct ChangeVariableTypeCommand {
    pub variable: ElementId,
    pub data_type: DataType,
}

impl ChangeVariableTypeCommand {
    pub fn new(variable: ElementId, data_type: DataType) -> Self {
        Self { variable, data_type }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let unchanged = state
            .graph_model()
            .variable(command.variable)
            .map_or(true, |v| v.data_type == command.data_type);
        if unchanged {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        let model = graph_updater.graph_model_mut();
        let Some(variable) = model.variable_mut(command.variable) else {
            return Ok(());
        };
        variable.data_type = command.data_type;
        variable.default_value = ConstantValue::default_for(command.data_type);
        let declaration = variable.clone();

        let nodes = model.variable_nodes(declaration.id);
        for id in &nodes {
            if let Some(node) = model.node_mut(*id) {
                node.rebuild_variable_ports(&declaration);
            }
        }
        graph_updater.mark_changed(declaration.id);
        for id in nodes {
            graph_updater.mark_changed(id);
            delete_invalid_edges(&mut graph_updater, id);
        }
        Ok(())
    }
}

impl Command for ChangeVariableTypeCommand {
    fn label(&self) -> String {
        "Change Variable Type".to_string()
    }
}

/// Exposes a variable outside the graph, or hides it
#[derive(Debug, Clone)]
pub struct UpdateExposedCommand {
    pub variable: ElementId,
    pub exposed: bool,
}

impl UpdateExposedCommand {
    pub fn new(variable: ElementId, exposed: bool) -> Self {
        Self { variable, exposed }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let unchanged = state
            .graph_model()
            .variable(command.variable)
            .map_or(true, |v| v.exposed == command.exposed);
        if unchanged {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(variable) = graph_updater.graph_model_mut().variable_mut(command.variable) {
            variable.exposed = command.exposed;
        }
        graph_updater.mark_changed(command.variable);
        Ok(())
    }
}

impl Command for UpdateExposedCommand {
    fn label(&self) -> String {
        if self.exposed {
            "Expose Variable".to_string()
        } else {
            "Hide Variable".to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTooltipCommand {
    pub variable: ElementId,
    pub tooltip: String,
}

impl UpdateTooltipCommand {
    pub fn new(variable: ElementId, tooltip: impl Into<String>) -> Self {
        Self {
            variable,
            tooltip: tooltip.into(),
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let unchanged = state
            .graph_model()
            .variable(command.variable)
            .map_or(true, |v| v.tooltip == command.tooltip);
        if unchanged {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(variable) = graph_updater.graph_model_mut().variable_mut(command.variable) {
            variable.tooltip = command.tooltip.clone();
        }
        graph_updater.mark_changed(command.variable);
        Ok(())
    }
}

impl Command for UpdateTooltipCommand {
    fn label(&self) -> String {
        "Edit Tooltip".to_string()
    }
}

/// Moves declarations right after `insert_after`, or to the top of the list
#[derive(Debug, Clone)]
pub struct ReorderGraphVariableDeclarationCommand {
    pub variables: Vec<ElementId>,
    pub insert_after: Option<ElementId>,
}

impl ReorderGraphVariableDeclarationCommand {
    pub fn new(variables: Vec<ElementId>, insert_after: Option<ElementId>) -> Self {
        Self {
            variables,
            insert_after,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let variables = existing(&command.variables, |id| model.variable(id).is_some());
        let order = model.reordered_variables(&variables, command.insert_after);
        let unchanged = model.variables().iter().map(|v| v.id).eq(order.iter().copied());
        if variables.is_empty() || unchanged {
            debug!("Variable order unchanged");
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        graph_updater
            .graph_model_mut()
            .move_variables_after(&variables, command.insert_after);
        graph_updater.mark_changed_all(variables);
        Ok(())
    }
}

impl Command for ReorderGraphVariableDeclarationCommand {
    fn label(&self) -> String {
        "Reorder Variables".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModel;

    fn float_sink(graph: &mut GraphModel) -> ElementId {
        let mut node = NodeModel::operation("Math/Negate", "Negate", Pos2::new(200.0, 0.0));
        node.add_input("Value", DataType::Float);
        graph.add_node(node)
    }

    #[test]
    fn test_create_declaration_selects_it() {
        let mut state = EditorState::new(GraphModel::new("test"));
        let command = CreateGraphVariableDeclarationCommand::new("speed", DataType::Float).with_exposed(true);
        CreateGraphVariableDeclarationCommand::default_handler(&mut state, &command).unwrap();
        CreateGraphVariableDeclarationCommand::default_handler(&mut state, &command).unwrap();

        let variables = state.graph_model().variables();
        assert_eq!(variables.len(), 2);
        assert_eq!(variables[1].name, "speed1");
        assert!(variables[0].exposed);
        assert!(state.selection.is_selected(variables[1].id));
        assert_eq!(state.selection.selection_count(), 1);
    }

    #[test]
    fn test_create_variable_node_connected_to_port() {
        let mut graph = GraphModel::new("test");
        let decl = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let sink = float_sink(&mut graph);
        let mut state = EditorState::new(graph);

        let placement = VariableNodePlacement::new(decl, Pos2::ZERO).connected_to(PortRef::input(sink, 0));
        let command = CreateVariableNodesCommand::new(vec![placement]);
        CreateVariableNodesCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        let nodes = model.variable_nodes(decl);
        assert_eq!(nodes.len(), 1);
        assert!(model.find_edge(&PortRef::output(nodes[0], 0), &PortRef::input(sink, 0)).is_some());
    }

    #[test]
    fn test_change_type_drops_incompatible_edges() {
        let mut graph = GraphModel::new("test");
        let decl = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let declaration = graph.variable(decl).unwrap().clone();
        let node = graph.add_node(NodeModel::variable(&declaration, Pos2::ZERO));
        let sink = float_sink(&mut graph);
        let edge = graph.create_edge(PortRef::input(sink, 0), PortRef::output(node, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = ChangeVariableTypeCommand::new(decl, DataType::Boolean);
        ChangeVariableTypeCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        assert_eq!(model.variable(decl).unwrap().default_value, Some(ConstantValue::Boolean(false)));
        assert_eq!(model.node(node).unwrap().outputs[0].data_type, DataType::Boolean);
        assert!(model.edge(edge).is_none());

        // Same type again
        ChangeVariableTypeCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.undo_history().len(), 1);
    }

    #[test]
    fn test_change_declaration_retitles_nodes() {
        let mut graph = GraphModel::new("test");
        let speed = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let alive = graph.create_variable_declaration("alive", DataType::Boolean, false, VariableModifiers::Read);
        let declaration = graph.variable(speed).unwrap().clone();
        let node = graph.add_node(NodeModel::variable(&declaration, Pos2::ZERO));
        let sink = float_sink(&mut graph);
        graph.create_edge(PortRef::input(sink, 0), PortRef::output(node, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = ChangeVariableDeclarationCommand::new(vec![node], alive);
        ChangeVariableDeclarationCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        assert_eq!(model.node(node).unwrap().title, "alive");
        assert_eq!(model.variable_nodes(alive), vec![node]);
        assert!(model.edge_ids_of_node(node).is_empty());
    }

    #[test]
    fn test_exposed_and_tooltip_skip_unchanged_values() {
        let mut graph = GraphModel::new("test");
        let decl = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let mut state = EditorState::new(graph);

        UpdateExposedCommand::default_handler(&mut state, &UpdateExposedCommand::new(decl, false)).unwrap();
        UpdateTooltipCommand::default_handler(&mut state, &UpdateTooltipCommand::new(decl, "")).unwrap();
        assert!(state.undo_history().is_empty());

        UpdateTooltipCommand::default_handler(&mut state, &UpdateTooltipCommand::new(decl, "Units per second"))
            .unwrap();
        assert_eq!(state.graph_model().variable(decl).unwrap().tooltip, "Units per second");
        assert_eq!(state.undo_history().len(), 1);
    }

    #[test]
    fn test_reorder_declarations() {
        let mut graph = GraphModel::new("test");
        let a = graph.create_variable_declaration("a", DataType::Float, false, VariableModifiers::Read);
        let b = graph.create_variable_declaration("b", DataType::Float, false, VariableModifiers::Read);
        let c = graph.create_variable_declaration("c", DataType::Float, false, VariableModifiers::Read);
        let mut state = EditorState::new(graph);

        let command = ReorderGraphVariableDeclarationCommand::new(vec![c], None);
        ReorderGraphVariableDeclarationCommand::default_handler(&mut state, &command).unwrap();
        let order: Vec<_> = state.graph_model().variables().iter().map(|v| v.id).collect();
        assert_eq!(order, vec![c, a, b]);

        // Already first
        ReorderGraphVariableDeclarationCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.undo_history().len(), 1);
    }
}
