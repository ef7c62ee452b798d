//! Node commands
//!
//! Creation from the searcher, state flags, constant editing, and the
//! rewiring operations (bypass, disconnect, itemize, convert).

use super::edge::splice_edge;
use super::{connect_ports, delete_edges, delete_nodes, existing, unselect_removed, Command, GraphUpdater};
use crate::constants;
use crate::error::{GraphError, GraphResult};
use crate::model::{
    ConstantValue, DataType, Direction, ElementId, GraphModel, ItemizeOptions, NodeKind, NodeModel,
    NodeState, PortRef, VariableModifiers,
};
use crate::searcher::{CreationTarget, NodeCreationContext, SearcherItem};
use crate::state::{EditorState, StateComponent};
use log::debug;

/// Materializes a searcher item, connecting it to the port or edge the
/// searcher was opened from
#[derive(Debug, Clone)]
pub struct CreateNodeFromSearcherCommand {
    pub item: SearcherItem,
    pub context: NodeCreationContext,
}

impl CreateNodeFromSearcherCommand {
    pub fn new(item: SearcherItem, context: NodeCreationContext) -> Self {
        Self { item, context }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if !command.item.is_creatable() {
            return Err(GraphError::NotCreatable(command.item.path.clone()));
        }

        state.push_undo(command);

        let itemize = state.preferences.itemize_options();
        let created = {
            let mut graph_updater = state.graph_view.updater();
            let created = command
                .item
                .create(graph_updater.graph_model_mut(), &command.context)?;
            graph_updater.mark_new_all(created.iter().copied());
            if let Some(&main) = created.first() {
                match command.context.target {
                    CreationTarget::Graph => {}
                    CreationTarget::Port(port) => connect_to_port(&mut graph_updater, main, port, itemize)?,
                    CreationTarget::Edge(edge) => insert_on_edge(&mut graph_updater, main, edge)?,
                }
            }
            created
        };
        debug!("Created {} element(s) from {}", created.len(), command.item.path);

        let mut selection_updater = state.selection.updater();
        let previous = selection_updater.clear();
        selection_updater.mark_changed_all(previous);
        for id in created {
            selection_updater.select(id);
            selection_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for CreateNodeFromSearcherCommand {
    fn label(&self) -> String {
        format!("Create {}", self.item.name)
    }
}

/// First port of `node` facing `direction` that can be wired to `other`
pub(crate) fn compatible_port(model: &GraphModel, node: ElementId, direction: Direction, other: &PortRef) -> Option<PortRef> {
    model.node(node)?.port_refs().find(|port| {
        port.direction == direction
            && match direction {
                Direction::Input => model.check_connection(port, other).is_ok(),
                Direction::Output => model.check_connection(other, port).is_ok(),
            }
    })
}

pub(crate) fn connect_to_port(
    updater: &mut GraphUpdater<'_>,
    node: ElementId,
    port: PortRef,
    itemize: ItemizeOptions,
) -> GraphResult<()> {
    let model = updater.graph_model();
    let Some(own) = compatible_port(model, node, port.direction.opposite(), &port) else {
        debug!("No port of {} fits {}", node, port);
        return Ok(());
    };
    let (to, from) = match port.direction {
        Direction::Input => (port, own),
        Direction::Output => (own, port),
    };
    connect_ports(updater, to, from, itemize)?;
    Ok(())
}

fn insert_on_edge(updater: &mut GraphUpdater<'_>, node: ElementId, edge: ElementId) -> GraphResult<()> {
    let model = updater.graph_model();
    let Some(edge) = model.edge(edge).cloned() else {
        return Ok(());
    };
    let input = compatible_port(model, node, Direction::Input, &edge.from);
    let output = compatible_port(model, node, Direction::Output, &edge.to);
    match (input, output) {
        (Some(input), Some(output)) => splice_edge(updater, &edge, input, output),
        _ => {
            debug!("Node {} cannot be inserted on edge {}", node, edge.id);
            Ok(())
        }
    }
}

/// Enables or disables nodes
#[derive(Debug, Clone)]
pub struct SetNodeEnabledStateCommand {
    pub nodes: Vec<ElementId>,
    pub state: NodeState,
}

impl SetNodeEnabledStateCommand {
    pub fn new(nodes: Vec<ElementId>, state: NodeState) -> Self {
        Self { nodes, state }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let nodes = existing(&command.nodes, |id| {
            model.node(id).is_some_and(|n| n.state != command.state)
        });
        if nodes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in nodes {
            if let Some(node) = graph_updater.graph_model_mut().node_mut(id) {
                node.state = command.state;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for SetNodeEnabledStateCommand {
    fn label(&self) -> String {
        match self.state {
            NodeState::Enabled => "Enable Nodes".to_string(),
            NodeState::Disabled => "Disable Nodes".to_string(),
        }
    }
}

/// Collapses or expands nodes
#[derive(Debug, Clone)]
pub struct CollapseNodesCommand {
    pub nodes: Vec<ElementId>,
    pub collapse: bool,
}

impl CollapseNodesCommand {
    pub fn new(nodes: Vec<ElementId>, collapse: bool) -> Self {
        Self { nodes, collapse }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let nodes = existing(&command.nodes, |id| {
            model.node(id).is_some_and(|n| n.collapsed != command.collapse)
        });
        if nodes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in nodes {
            if let Some(node) = graph_updater.graph_model_mut().node_mut(id) {
                node.collapsed = command.collapse;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for CollapseNodesCommand {
    fn label(&self) -> String {
        if self.collapse {
            "Collapse Nodes".to_string()
        } else {
            "Expand Nodes".to_string()
        }
    }
}

/// Sets the value of a constant node; the value keeps the node's type
#[derive(Debug, Clone)]
pub struct UpdateConstantValueCommand {
    pub node: ElementId,
    pub value: ConstantValue,
}

impl UpdateConstantValueCommand {
    pub fn new(node: ElementId, value: ConstantValue) -> Self {
        Self { node, value }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let node = state
            .graph_model()
            .node(command.node)
            .ok_or(GraphError::ElementNotFound(command.node))?;
        let NodeKind::Constant { value: current } = &node.kind else {
            return Err(GraphError::unexpected_kind(command.node, "constant", node.kind.name()));
        };
        if current.data_type() != command.value.data_type() {
            return Err(GraphError::ValueTypeMismatch {
                expected: current.data_type(),
                found: command.value.data_type(),
            });
        }
        if *current == command.value {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(node) = graph_updater.graph_model_mut().node_mut(command.node) {
            node.kind = NodeKind::Constant {
                value: command.value.clone(),
            };
        }
        graph_updater.mark_changed(command.node);
        Ok(())
    }
}

impl Command for UpdateConstantValueCommand {
    fn label(&self) -> String {
        "Update Constant".to_string()
    }
}

/// Sets the value an unconnected input port falls back to
#[derive(Debug, Clone)]
pub struct UpdatePortConstantCommand {
    pub port: PortRef,
    pub value: ConstantValue,
}

impl UpdatePortConstantCommand {
    pub fn new(port: PortRef, value: ConstantValue) -> Self {
        Self { port, value }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let port = state
            .graph_model()
            .port(&command.port)
            .ok_or(GraphError::PortNotFound(command.port))?;
        if !port.is_input() {
            return Err(GraphError::InvalidPortDirection {
                from: port.direction,
                to: Direction::Input,
            });
        }
        let found = command.value.data_type();
        if port.data_type != found && port.data_type != DataType::Any {
            return Err(GraphError::ValueTypeMismatch {
                expected: port.data_type,
                found,
            });
        }
        if port.constant.as_ref() == Some(&command.value) {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(port) = graph_updater.graph_model_mut().port_mut(&command.port) {
            port.constant = Some(command.value.clone());
        }
        graph_updater.mark_changed(command.port.node);
        Ok(())
    }
}

impl Command for UpdatePortConstantCommand {
    fn label(&self) -> String {
        "Update Port Value".to_string()
    }
}

/// Removes nodes while keeping the data flowing through them.
///
/// A node is bypassed only when both its first input and its first output
/// carry edges; its edges are replaced by one edge from the first upstream
/// port to the first downstream port.
#[derive(Debug, Clone)]
pub struct BypassNodesCommand {
    pub nodes: Vec<ElementId>,
}

/// Far ends to reconnect when bypassing a node
fn bypass_plan(model: &GraphModel, node: ElementId) -> Option<(PortRef, PortRef)> {
    let node = model.node(node)?;
    let input = node.first_input()?;
    let output = node.first_output()?;
    let upstream = model.edges_on_port(&input).first()?.from;
    let downstream = model.edges_on_port(&output).first()?.to;
    if upstream.node == downstream.node || model.check_connection(&downstream, &upstream).is_err() {
        return None;
    }
    Some((upstream, downstream))
}

impl BypassNodesCommand {
    pub fn new(nodes: Vec<ElementId>) -> Self {
        Self { nodes }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let nodes = existing(&command.nodes, |id| model.node(id).is_some());
        if !nodes.iter().any(|id| bypass_plan(model, *id).is_some()) {
            debug!("None of the nodes can be bypassed");
            return Ok(());
        }

        state.push_undo(command);

        let mut removed = Vec::new();
        {
            let mut graph_updater = state.graph_view.updater();
            for id in nodes {
                // Planned one node at a time: bypassing a neighbour rewires this one
                let Some((upstream, downstream)) = bypass_plan(graph_updater.graph_model(), id) else {
                    continue;
                };
                let model = graph_updater.graph_model();
                let mut edges = Vec::new();
                if let Some(node) = model.node(id) {
                    for port in [node.first_input(), node.first_output()].into_iter().flatten() {
                        edges.extend(model.edge_ids_on_port(&port));
                    }
                }
                removed.extend(delete_edges(&mut graph_updater, &edges).iter().map(|e| e.id));
                let edge = graph_updater.graph_model_mut().create_edge(downstream, upstream)?;
                graph_updater.mark_new(edge);
                removed.extend(delete_nodes(&mut graph_updater, &[id]));
            }
        }
        unselect_removed(state, &removed);
        Ok(())
    }
}

impl Command for BypassNodesCommand {
    fn label(&self) -> String {
        "Bypass Nodes".to_string()
    }
}

/// Deletes every edge of the given nodes
#[derive(Debug, Clone)]
pub struct DisconnectNodesCommand {
    pub nodes: Vec<ElementId>,
}

impl DisconnectNodesCommand {
    pub fn new(nodes: Vec<ElementId>) -> Self {
        Self { nodes }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let mut edges = Vec::new();
        for id in &command.nodes {
            for edge in model.edge_ids_of_node(*id) {
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        if edges.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        delete_edges(&mut graph_updater, &edges);
        Ok(())
    }
}

impl Command for DisconnectNodesCommand {
    fn label(&self) -> String {
        "Disconnect Nodes".to_string()
    }
}

/// Gives every edge leaving a constant or variable node its own copy of the node
#[derive(Debug, Clone)]
pub struct ItemizeNodeCommand {
    pub node: ElementId,
}

impl ItemizeNodeCommand {
    pub fn new(node: ElementId) -> Self {
        Self { node }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let node = model
            .node(command.node)
            .ok_or(GraphError::ElementNotFound(command.node))?;
        let all = ItemizeOptions {
            constants: true,
            variables: true,
        };
        if !node.is_itemizable(all) {
            return Err(GraphError::unexpected_kind(
                command.node,
                "constant or variable",
                node.kind.name(),
            ));
        }
        let Some(output) = node.first_output() else {
            return Ok(());
        };
        let edges: Vec<_> = model.edges_on_port(&output).into_iter().cloned().collect();
        if edges.len() < 2 {
            debug!("Node {} has nothing to itemize", command.node);
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for (n, edge) in edges.iter().enumerate().skip(1) {
            let offset = constants::itemize::OFFSET * n as f32;
            let Some(copy) = graph_updater.graph_model_mut().duplicate_node(command.node, offset) else {
                continue;
            };
            graph_updater.mark_new(copy);
            delete_edges(&mut graph_updater, &[edge.id]);
            let from = PortRef { node: copy, ..edge.from };
            let id = graph_updater.graph_model_mut().create_edge(edge.to, from)?;
            graph_updater.mark_new(id);
        }
        graph_updater.mark_changed(command.node);
        Ok(())
    }
}

impl Command for ItemizeNodeCommand {
    fn label(&self) -> String {
        "Itemize Node".to_string()
    }
}

/// Turns constant nodes into variable nodes (declaring a variable for each)
/// and variable nodes into constant nodes holding the variable's default
#[derive(Debug, Clone)]
pub struct ConvertConstantNodesAndVariableNodesCommand {
    pub constants: Vec<ElementId>,
    pub variables: Vec<ElementId>,
}

impl ConvertConstantNodesAndVariableNodesCommand {
    pub fn new(constants: Vec<ElementId>, variables: Vec<ElementId>) -> Self {
        Self { constants, variables }
    }

    fn constant_value(model: &GraphModel, id: ElementId) -> Option<ConstantValue> {
        match &model.node(id)?.kind {
            NodeKind::Constant { value } => Some(value.clone()),
            _ => None,
        }
    }

    /// Value a variable node converts to; `None` when it cannot
    fn variable_value(model: &GraphModel, id: ElementId) -> Option<ConstantValue> {
        let NodeKind::Variable { declaration } = model.node(id)?.kind else {
            return None;
        };
        let declaration = model.variable(declaration)?;
        if declaration.modifiers == VariableModifiers::Write {
            return None;
        }
        declaration
            .default_value
            .clone()
            .or_else(|| ConstantValue::default_for(declaration.data_type))
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let constant_nodes = existing(&command.constants, |id| Self::constant_value(model, id).is_some());
        let variable_nodes = existing(&command.variables, |id| Self::variable_value(model, id).is_some());
        if constant_nodes.is_empty() && variable_nodes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut removed = Vec::new();
        {
            let mut graph_updater = state.graph_view.updater();
            for id in constant_nodes {
                let model = graph_updater.graph_model_mut();
                let (Some(value), Some(node)) = (Self::constant_value(model, id), model.node(id)) else {
                    continue;
                };
                let (title, position) = (node.title.clone(), node.position);
                let data_type = value.data_type();
                let declaration = model.create_variable_declaration(&title, data_type, false, VariableModifiers::Read);
                if let Some(declaration) = model.variable_mut(declaration) {
                    declaration.default_value = Some(value);
                }
                let Some(declaration_model) = model.variable(declaration).cloned() else {
                    continue;
                };
                let replacement = model.add_node(NodeModel::variable(
                    &declaration_model,
                    position + constants::itemize::CONVERT_OFFSET,
                ));
                graph_updater.mark_new(declaration);
                graph_updater.mark_new(replacement);
                removed.extend(replace_output_node(&mut graph_updater, id, replacement)?);
            }
            for id in variable_nodes {
                let model = graph_updater.graph_model_mut();
                let (Some(value), Some(node)) = (Self::variable_value(model, id), model.node(id)) else {
                    continue;
                };
                let position = node.position + constants::itemize::CONVERT_OFFSET;
                let replacement = model.add_node(NodeModel::constant(value, position));
                graph_updater.mark_new(replacement);
                removed.extend(replace_output_node(&mut graph_updater, id, replacement)?);
            }
        }
        unselect_removed(state, &removed);
        Ok(())
    }
}

/// Moves the edges leaving `old`'s first output to `new`'s first output, then
/// deletes `old`. Returns the ids removed with it.
fn replace_output_node(
    updater: &mut GraphUpdater<'_>,
    old: ElementId,
    new: ElementId,
) -> GraphResult<Vec<ElementId>> {
    let model = updater.graph_model();
    let targets: Vec<PortRef> = match model.node(old).and_then(|n| n.first_output()) {
        Some(output) => model.edges_on_port(&output).iter().map(|e| e.to).collect(),
        None => vec![],
    };
    let removed = delete_nodes(updater, &[old]);
    for to in targets {
        let edge = updater.graph_model_mut().create_edge(to, PortRef::output(new, 0))?;
        updater.mark_new(edge);
        updater.mark_changed(to.node);
    }
    Ok(removed)
}

impl Command for ConvertConstantNodesAndVariableNodesCommand {
    fn label(&self) -> String {
        "Convert Constants and Variables".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GraphModel, PortCapacity};
    use crate::searcher::{SearcherDatabase, SearcherFilter};
    use egui::Pos2;

    fn negate(graph: &mut GraphModel, x: f32) -> ElementId {
        let mut node = NodeModel::operation("Negate", "Negate", Pos2::new(x, 0.0));
        node.add_input("Value", DataType::Float).add_output("Result", DataType::Float);
        graph.add_node(node)
    }

    #[test]
    fn test_create_from_searcher_selects_new_node() {
        let mut state = EditorState::new(GraphModel::new("test"));
        let database = SearcherDatabase::builtin();
        let item = database.find("Math/Add").unwrap().clone();
        let command = CreateNodeFromSearcherCommand::new(item, NodeCreationContext::at(Pos2::new(10.0, 10.0)));

        CreateNodeFromSearcherCommand::default_handler(&mut state, &command).unwrap();

        let node = state.graph_model().nodes().next().unwrap();
        assert_eq!(node.title, "Add");
        assert!(state.selection.is_selected(node.id));
        assert_eq!(state.undo_history().last_label(), Some("Create Add"));
    }

    #[test]
    fn test_create_from_searcher_connects_to_port() {
        let mut graph = GraphModel::new("test");
        let target = negate(&mut graph, 200.0);
        let mut state = EditorState::new(graph);

        let port = PortRef::input(target, 0);
        let database = SearcherDatabase::builtin();
        let results = database.search("float", &SearcherFilter::for_input_port(DataType::Float));
        let item = results
            .iter()
            .find(|r| r.item.path == "Constants/Float")
            .unwrap()
            .item
            .clone();
        let context = NodeCreationContext::at(Pos2::ZERO).with_target(CreationTarget::Port(port));
        CreateNodeFromSearcherCommand::default_handler(&mut state, &CreateNodeFromSearcherCommand::new(item, context))
            .unwrap();

        assert_eq!(state.graph_model().connected_edge_count(&port), 1);
    }

    #[test]
    fn test_create_from_searcher_with_used_guid_keeps_existing_node() {
        let mut graph = GraphModel::new("test");
        let a = negate(&mut graph, 0.0);
        let b = negate(&mut graph, 100.0);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let database = SearcherDatabase::builtin();
        let item = database.find("Constants/Boolean").unwrap().clone();
        let context = NodeCreationContext::at(Pos2::ZERO).with_guid(a);
        CreateNodeFromSearcherCommand::default_handler(&mut state, &CreateNodeFromSearcherCommand::new(item, context))
            .unwrap();

        let model = state.graph_model();
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.node(a).unwrap().title, "Negate");
        assert!(model.edge(edge).is_some());

        let created: Vec<_> = state.selection.selected().collect();
        assert_eq!(created.len(), 1);
        assert_ne!(created[0], a);
        assert!(matches!(model.node(created[0]).unwrap().kind, NodeKind::Constant { .. }));
        let changes = state.graph_view.changes_since(0).changeset;
        assert!(!changes.new_models().contains(&a));
    }

    #[test]
    fn test_create_from_category_fails() {
        let mut state = EditorState::new(GraphModel::new("test"));
        let category = SearcherDatabase::builtin().find("Math").unwrap().clone();
        let command = CreateNodeFromSearcherCommand::new(category, NodeCreationContext::at(Pos2::ZERO));
        assert!(matches!(
            CreateNodeFromSearcherCommand::default_handler(&mut state, &command),
            Err(GraphError::NotCreatable(_))
        ));
        assert!(state.undo_history().is_empty());
    }

    #[test]
    fn test_update_constant_value() {
        let mut graph = GraphModel::new("test");
        let node = graph.add_node(NodeModel::constant(ConstantValue::Float(1.0), Pos2::ZERO));
        let mut state = EditorState::new(graph);

        let wrong = UpdateConstantValueCommand::new(node, ConstantValue::Boolean(true));
        assert!(matches!(
            UpdateConstantValueCommand::default_handler(&mut state, &wrong),
            Err(GraphError::ValueTypeMismatch { .. })
        ));

        let command = UpdateConstantValueCommand::new(node, ConstantValue::Float(2.5));
        UpdateConstantValueCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(
            state.graph_model().node(node).unwrap().kind,
            NodeKind::Constant {
                value: ConstantValue::Float(2.5)
            }
        );
    }

    #[test]
    fn test_update_port_constant() {
        let mut graph = GraphModel::new("test");
        let node = negate(&mut graph, 0.0);
        let mut state = EditorState::new(graph);
        let port = PortRef::input(node, 0);

        let command = UpdatePortConstantCommand::new(port, ConstantValue::Float(4.0));
        UpdatePortConstantCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(
            state.graph_model().port(&port).unwrap().constant,
            Some(ConstantValue::Float(4.0))
        );

        let output = UpdatePortConstantCommand::new(PortRef::output(node, 0), ConstantValue::Float(1.0));
        assert!(UpdatePortConstantCommand::default_handler(&mut state, &output).is_err());
    }

    #[test]
    fn test_enable_and_collapse_skip_unchanged_nodes() {
        let mut graph = GraphModel::new("test");
        let node = negate(&mut graph, 0.0);
        let mut state = EditorState::new(graph);

        let enable = SetNodeEnabledStateCommand::new(vec![node], NodeState::Enabled);
        SetNodeEnabledStateCommand::default_handler(&mut state, &enable).unwrap();
        assert!(state.undo_history().is_empty());

        let collapse = CollapseNodesCommand::new(vec![node], true);
        CollapseNodesCommand::default_handler(&mut state, &collapse).unwrap();
        assert!(state.graph_model().node(node).unwrap().collapsed);
        assert_eq!(state.undo_history().labels(), ["Collapse Nodes"]);
    }

    #[test]
    fn test_bypass_needs_edges_on_both_sides() {
        let mut graph = GraphModel::new("test");
        let a = negate(&mut graph, 0.0);
        let b = negate(&mut graph, 100.0);
        graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        BypassNodesCommand::default_handler(&mut state, &BypassNodesCommand::new(vec![b])).unwrap();
        assert!(state.graph_model().node(b).is_some());
        assert!(state.undo_history().is_empty());
    }

    #[test]
    fn test_bypass_chain() {
        let mut graph = GraphModel::new("test");
        let a = negate(&mut graph, 0.0);
        let x = negate(&mut graph, 100.0);
        let y = negate(&mut graph, 200.0);
        let b = negate(&mut graph, 300.0);
        graph.create_edge(PortRef::input(x, 0), PortRef::output(a, 0)).unwrap();
        graph.create_edge(PortRef::input(y, 0), PortRef::output(x, 0)).unwrap();
        graph.create_edge(PortRef::input(b, 0), PortRef::output(y, 0)).unwrap();
        let mut state = EditorState::new(graph);

        BypassNodesCommand::default_handler(&mut state, &BypassNodesCommand::new(vec![x, y])).unwrap();

        let model = state.graph_model();
        assert_eq!(model.node_count(), 2);
        assert_eq!(model.edges().len(), 1);
        assert!(model.find_edge(&PortRef::output(a, 0), &PortRef::input(b, 0)).is_some());
    }

    #[test]
    fn test_disconnect_nodes() {
        let mut graph = GraphModel::new("test");
        let a = negate(&mut graph, 0.0);
        let b = negate(&mut graph, 100.0);
        graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        DisconnectNodesCommand::default_handler(&mut state, &DisconnectNodesCommand::new(vec![a])).unwrap();
        assert!(state.graph_model().edges().is_empty());

        DisconnectNodesCommand::default_handler(&mut state, &DisconnectNodesCommand::new(vec![a])).unwrap();
        assert_eq!(state.undo_history().len(), 1);
    }

    #[test]
    fn test_itemize_gives_each_edge_a_copy() {
        let mut graph = GraphModel::new("test");
        let constant = graph.add_node(NodeModel::constant(ConstantValue::Float(1.0), Pos2::ZERO));
        let targets: Vec<_> = (0..3).map(|i| negate(&mut graph, 100.0 * i as f32)).collect();
        for target in &targets {
            graph
                .create_edge(PortRef::input(*target, 0), PortRef::output(constant, 0))
                .unwrap();
        }
        let mut state = EditorState::new(graph);

        ItemizeNodeCommand::default_handler(&mut state, &ItemizeNodeCommand::new(constant)).unwrap();

        let model = state.graph_model();
        assert_eq!(model.node_count(), 6);
        assert_eq!(model.connected_edge_count(&PortRef::output(constant, 0)), 1);
        for target in &targets {
            assert_eq!(model.connected_edge_count(&PortRef::input(*target, 0)), 1);
        }
    }

    #[test]
    fn test_itemize_rejects_operations() {
        let mut graph = GraphModel::new("test");
        let node = negate(&mut graph, 0.0);
        let mut state = EditorState::new(graph);
        assert!(matches!(
            ItemizeNodeCommand::default_handler(&mut state, &ItemizeNodeCommand::new(node)),
            Err(GraphError::UnexpectedNodeKind { .. })
        ));
    }

    #[test]
    fn test_convert_constant_to_variable_and_back() {
        let mut graph = GraphModel::new("test");
        let mut constant = NodeModel::constant(ConstantValue::Float(3.0), Pos2::ZERO);
        constant.title = "gain".to_string();
        let constant = graph.add_node(constant);
        let target = negate(&mut graph, 100.0);
        graph
            .create_edge(PortRef::input(target, 0), PortRef::output(constant, 0))
            .unwrap();
        let mut state = EditorState::new(graph);

        let command = ConvertConstantNodesAndVariableNodesCommand::new(vec![constant], vec![]);
        ConvertConstantNodesAndVariableNodesCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        assert!(model.node(constant).is_none());
        let declaration = &model.variables()[0];
        assert_eq!(declaration.name, "gain");
        assert_eq!(declaration.default_value, Some(ConstantValue::Float(3.0)));
        let variable_node = model.variable_nodes(declaration.id)[0];
        assert_eq!(model.connected_edge_count(&PortRef::output(variable_node, 0)), 1);

        let back = ConvertConstantNodesAndVariableNodesCommand::new(vec![], vec![variable_node]);
        ConvertConstantNodesAndVariableNodesCommand::default_handler(&mut state, &back).unwrap();
        let model = state.graph_model();
        let input = PortRef::input(target, 0);
        let source = model.edges_on_port(&input)[0].from.node;
        assert_eq!(
            model.node(source).unwrap().kind,
            NodeKind::Constant {
                value: ConstantValue::Float(3.0)
            }
        );
        assert_eq!(model.port(&input).unwrap().capacity, PortCapacity::Single);
    }

    #[test]
    fn test_converted_node_is_offset_and_unselected() {
        let mut graph = GraphModel::new("test");
        let position = Pos2::new(20.0, 30.0);
        let constant = graph.add_node(NodeModel::constant(ConstantValue::Float(1.0), position));
        let target = negate(&mut graph, 100.0);
        let edge = graph
            .create_edge(PortRef::input(target, 0), PortRef::output(constant, 0))
            .unwrap();
        let mut state = EditorState::new(graph);
        state.selection.select(constant);
        state.selection.select(edge);

        let command = ConvertConstantNodesAndVariableNodesCommand::new(vec![constant], vec![]);
        ConvertConstantNodesAndVariableNodesCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        let input = PortRef::input(target, 0);
        let replacement = model.edges_on_port(&input)[0].from.node;
        assert_eq!(
            model.node(replacement).unwrap().position,
            position + constants::itemize::CONVERT_OFFSET
        );
        assert!(!state.selection.is_selected(constant));
        assert!(!state.selection.is_selected(edge));
    }

    #[test]
    fn test_bypassed_node_and_edges_leave_the_selection() {
        let mut graph = GraphModel::new("test");
        let a = negate(&mut graph, 0.0);
        let x = negate(&mut graph, 100.0);
        let b = negate(&mut graph, 200.0);
        let upstream = graph.create_edge(PortRef::input(x, 0), PortRef::output(a, 0)).unwrap();
        graph.create_edge(PortRef::input(b, 0), PortRef::output(x, 0)).unwrap();
        let mut state = EditorState::new(graph);
        state.selection.select(x);
        state.selection.select(upstream);
        state.selection.select(a);

        BypassNodesCommand::default_handler(&mut state, &BypassNodesCommand::new(vec![x])).unwrap();

        assert!(!state.selection.is_selected(x));
        assert!(!state.selection.is_selected(upstream));
        assert!(state.selection.is_selected(a));
    }
}
