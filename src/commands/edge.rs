//! Edge commands: creation, deletion, ordering and control points

use super::{connect_ports, delete_edges, existing, Command, GraphUpdater};
use crate::constants;
use crate::error::{GraphError, GraphResult};
use crate::model::{ControlPoint, EdgeModel, ElementId, GraphModel, ItemizeOptions, PortRef};
use crate::state::{EditorState, StateComponent};
use egui::Pos2;
use log::debug;

/// Connects an output port to an input port
#[derive(Debug, Clone)]
pub struct CreateEdgeCommand {
    pub to: PortRef,
    pub from: PortRef,
    /// Edges the gesture replaces (e.g. the edge being dragged off a port)
    pub edges_to_delete: Vec<ElementId>,
}

impl CreateEdgeCommand {
    pub fn new(to: PortRef, from: PortRef) -> Self {
        Self {
            to,
            from,
            edges_to_delete: vec![],
        }
    }

    pub fn with_edges_to_delete(mut self, edges: Vec<ElementId>) -> Self {
        self.edges_to_delete = edges;
        self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        model.check_connection(&command.to, &command.from)?;
        if model.find_edge(&command.from, &command.to).is_some() {
            debug!("Edge {} -> {} already exists", command.from, command.to);
            return Ok(());
        }

        state.push_undo(command);

        let itemize = state.preferences.itemize_options();
        let mut graph_updater = state.graph_view.updater();
        delete_edges(&mut graph_updater, &command.edges_to_delete);
        connect_ports(&mut graph_updater, command.to, command.from, itemize)?;
        Ok(())
    }
}

impl Command for CreateEdgeCommand {
    fn label(&self) -> String {
        "Create Edge".to_string()
    }
}

/// Deletes edges
#[derive(Debug, Clone)]
pub struct DeleteEdgeCommand {
    pub edges: Vec<ElementId>,
}

impl DeleteEdgeCommand {
    pub fn new(edges: Vec<ElementId>) -> Self {
        Self { edges }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let edges = existing(&command.edges, |id| state.graph_model().edge(id).is_some());
        if edges.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        delete_edges(&mut graph_updater, &edges);
        Ok(())
    }
}

impl Command for DeleteEdgeCommand {
    fn label(&self) -> String {
        if self.edges.len() == 1 {
            "Delete Edge".to_string()
        } else {
            "Delete Edges".to_string()
        }
    }
}

/// Where an edge moves among the edges sharing its output port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderType {
    MoveFirst,
    MoveUp,
    MoveDown,
    MoveLast,
}

impl ReorderType {
    /// Whether the move changes anything for an edge at `index` of `count`
    pub fn applies(self, index: usize, count: usize) -> bool {
        match self {
            ReorderType::MoveFirst | ReorderType::MoveUp => index > 0,
            ReorderType::MoveDown | ReorderType::MoveLast => index + 1 < count,
        }
    }
}

/// Changes the execution order of an edge among its siblings
#[derive(Debug, Clone)]
pub struct ReorderEdgeCommand {
    pub edge: ElementId,
    pub reorder: ReorderType,
}

impl ReorderEdgeCommand {
    pub fn new(edge: ElementId, reorder: ReorderType) -> Self {
        Self { edge, reorder }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let Some((index, count)) = model.sibling_index(command.edge) else {
            return Ok(());
        };
        if !command.reorder.applies(index, count) {
            debug!("Edge {} is already at the boundary", command.edge);
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        let model = graph_updater.graph_model_mut();
        let moved = match command.reorder {
            ReorderType::MoveFirst => model.move_edge_first(command.edge),
            ReorderType::MoveUp => model.move_edge_up(command.edge),
            ReorderType::MoveDown => model.move_edge_down(command.edge),
            ReorderType::MoveLast => model.move_edge_last(command.edge),
        };
        if moved {
            if let Some(from) = model.edge(command.edge).map(|e| e.from) {
                let siblings = model.edge_ids_on_port(&from);
                graph_updater.mark_changed_all(siblings);
                graph_updater.mark_changed(from.node);
            }
        }
        Ok(())
    }
}

impl Command for ReorderEdgeCommand {
    fn label(&self) -> String {
        "Reorder Edge".to_string()
    }
}

/// Shows or hides the control point handles of edges
#[derive(Debug, Clone)]
pub struct SetEdgeEditModeCommand {
    pub edges: Vec<ElementId>,
    pub edit_mode: bool,
}

impl SetEdgeEditModeCommand {
    pub fn new(edges: Vec<ElementId>, edit_mode: bool) -> Self {
        Self { edges, edit_mode }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let edges = existing(&command.edges, |id| {
            model.edge(id).is_some_and(|e| e.edit_mode != command.edit_mode)
        });
        if edges.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in edges {
            if let Some(edge) = graph_updater.graph_model_mut().edge_mut(id) {
                edge.edit_mode = command.edit_mode;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for SetEdgeEditModeCommand {
    fn label(&self) -> String {
        "Set Edge Edit Mode".to_string()
    }
}

fn edge_or_err(model: &GraphModel, id: ElementId) -> GraphResult<&EdgeModel> {
    model.edge(id).ok_or(GraphError::ElementNotFound(id))
}

/// Inserts a control point at `index` (equal to the count appends)
#[derive(Debug, Clone)]
pub struct AddControlPointOnEdgeCommand {
    pub edge: ElementId,
    pub index: usize,
    pub position: Pos2,
}

impl AddControlPointOnEdgeCommand {
    pub fn new(edge: ElementId, index: usize, position: Pos2) -> Self {
        Self { edge, index, position }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let edge = edge_or_err(state.graph_model(), command.edge)?;
        if command.index > edge.control_points.len() {
            return Err(GraphError::ControlPointOutOfRange {
                edge: command.edge,
                index: command.index,
            });
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(edge) = graph_updater.graph_model_mut().edge_mut(command.edge) {
            edge.control_points
                .insert(command.index, ControlPoint::new(command.position));
        }
        graph_updater.mark_changed(command.edge);
        Ok(())
    }
}

impl Command for AddControlPointOnEdgeCommand {
    fn label(&self) -> String {
        "Add Control Point".to_string()
    }
}

/// Moves a control point and sets its tightness (clamped to 0..=100)
#[derive(Debug, Clone)]
pub struct MoveEdgeControlPointCommand {
    pub edge: ElementId,
    pub index: usize,
    pub position: Pos2,
    pub tightness: f32,
}

impl MoveEdgeControlPointCommand {
    pub fn new(edge: ElementId, index: usize, position: Pos2, tightness: f32) -> Self {
        Self {
            edge,
            index,
            position,
            tightness,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let edge = edge_or_err(state.graph_model(), command.edge)?;
        let Some(current) = edge.control_points.get(command.index) else {
            return Err(GraphError::ControlPointOutOfRange {
                edge: command.edge,
                index: command.index,
            });
        };
        let range = constants::edge::TIGHTNESS_RANGE;
        let target = ControlPoint {
            position: command.position,
            tightness: command.tightness.clamp(*range.start(), *range.end()),
        };
        if *current == target {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(edge) = graph_updater.graph_model_mut().edge_mut(command.edge) {
            edge.control_points[command.index] = target;
        }
        graph_updater.mark_changed(command.edge);
        Ok(())
    }
}

impl Command for MoveEdgeControlPointCommand {
    fn label(&self) -> String {
        "Move Control Point".to_string()
    }
}

/// Removes one control point
#[derive(Debug, Clone)]
pub struct RemoveEdgeControlPointCommand {
    pub edge: ElementId,
    pub index: usize,
}

impl RemoveEdgeControlPointCommand {
    pub fn new(edge: ElementId, index: usize) -> Self {
        Self { edge, index }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let edge = edge_or_err(state.graph_model(), command.edge)?;
        if command.index >= edge.control_points.len() {
            return Err(GraphError::ControlPointOutOfRange {
                edge: command.edge,
                index: command.index,
            });
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(edge) = graph_updater.graph_model_mut().edge_mut(command.edge) {
            edge.control_points.remove(command.index);
        }
        graph_updater.mark_changed(command.edge);
        Ok(())
    }
}

impl Command for RemoveEdgeControlPointCommand {
    fn label(&self) -> String {
        "Remove Control Point".to_string()
    }
}

/// Replaces `edge` by edge.from -> `input` and `output` -> edge.to
pub(crate) fn splice_edge(
    updater: &mut GraphUpdater<'_>,
    edge: &EdgeModel,
    input: PortRef,
    output: PortRef,
) -> GraphResult<()> {
    delete_edges(updater, &[edge.id]);
    connect_ports(updater, input, edge.from, ItemizeOptions::default())?;
    connect_ports(updater, edge.to, output, ItemizeOptions::default())?;
    Ok(())
}

/// Drops an existing node onto an edge, routing the edge through it
#[derive(Debug, Clone)]
pub struct SplitEdgeAndInsertExistingNodeCommand {
    pub edge: ElementId,
    pub node: ElementId,
}

impl SplitEdgeAndInsertExistingNodeCommand {
    pub fn new(edge: ElementId, node: ElementId) -> Self {
        Self { edge, node }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let edge = edge_or_err(model, command.edge)?.clone();
        let node = model
            .node(command.node)
            .ok_or(GraphError::ElementNotFound(command.node))?;
        let (Some(input), Some(output)) = (node.first_input(), node.first_output()) else {
            return Err(GraphError::MissingPorts(command.node));
        };
        model.check_connection(&input, &edge.from)?;
        model.check_connection(&edge.to, &output)?;

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        splice_edge(&mut graph_updater, &edge, input, output)
    }
}

impl Command for SplitEdgeAndInsertExistingNodeCommand {
    fn label(&self) -> String {
        "Insert Node on Edge".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataType, NodeModel};
    use crate::state::UpdateType;

    fn float_node(graph: &mut GraphModel, title: &str, x: f32) -> ElementId {
        let mut node = NodeModel::operation(title, title, Pos2::new(x, 0.0));
        node.add_input("In", DataType::Float).add_output("Out", DataType::Float);
        graph.add_node(node)
    }

    #[test]
    fn test_reorder_type_boundaries() {
        assert!(!ReorderType::MoveFirst.applies(0, 3));
        assert!(!ReorderType::MoveUp.applies(0, 3));
        assert!(ReorderType::MoveUp.applies(1, 3));
        assert!(ReorderType::MoveDown.applies(1, 3));
        assert!(!ReorderType::MoveDown.applies(2, 3));
        assert!(!ReorderType::MoveLast.applies(2, 3));
        assert!(!ReorderType::MoveLast.applies(0, 1));
    }

    #[test]
    fn test_create_edge_rejects_wrong_direction_before_undo() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 100.0);
        let mut state = EditorState::new(graph);

        let command = CreateEdgeCommand::new(PortRef::output(b, 0), PortRef::input(a, 0));
        assert!(matches!(
            CreateEdgeCommand::default_handler(&mut state, &command),
            Err(GraphError::InvalidPortDirection { .. })
        ));
        assert!(state.undo_history().is_empty());
        assert_eq!(state.graph_view.version(), 0);
    }

    #[test]
    fn test_create_existing_edge_is_a_no_op() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 100.0);
        graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = CreateEdgeCommand::new(PortRef::input(b, 0), PortRef::output(a, 0));
        CreateEdgeCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.graph_model().edges().len(), 1);
        assert!(state.undo_history().is_empty());
    }

    #[test]
    fn test_reorder_moves_edge_first() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 100.0);
        let c = float_node(&mut graph, "C", 100.0);
        let first = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let second = graph.create_edge(PortRef::input(c, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = ReorderEdgeCommand::new(second, ReorderType::MoveFirst);
        ReorderEdgeCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.graph_model().sibling_index(second), Some((0, 2)));
        assert_eq!(state.graph_model().sibling_index(first), Some((1, 2)));

        let changes = state.graph_view.changes_since(0);
        assert_eq!(changes.update_type, UpdateType::Partial);
        assert!(changes.changeset.changed_models().contains(&first));
    }

    #[test]
    fn test_control_points() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 100.0);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let add = AddControlPointOnEdgeCommand::new(edge, 0, Pos2::new(50.0, 10.0));
        AddControlPointOnEdgeCommand::default_handler(&mut state, &add).unwrap();

        let out_of_range = AddControlPointOnEdgeCommand::new(edge, 5, Pos2::ZERO);
        assert!(matches!(
            AddControlPointOnEdgeCommand::default_handler(&mut state, &out_of_range),
            Err(GraphError::ControlPointOutOfRange { index: 5, .. })
        ));

        let moved = MoveEdgeControlPointCommand::new(edge, 0, Pos2::new(60.0, 20.0), 250.0);
        MoveEdgeControlPointCommand::default_handler(&mut state, &moved).unwrap();
        let point = state.graph_model().edge(edge).unwrap().control_points[0];
        assert_eq!(point.position, Pos2::new(60.0, 20.0));
        assert_eq!(point.tightness, 100.0);

        let remove = RemoveEdgeControlPointCommand::new(edge, 0);
        RemoveEdgeControlPointCommand::default_handler(&mut state, &remove).unwrap();
        assert!(state.graph_model().edge(edge).unwrap().control_points.is_empty());
        assert_eq!(state.undo_history().len(), 3);
    }

    #[test]
    fn test_edit_mode_toggle() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 100.0);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let on = SetEdgeEditModeCommand::new(vec![edge], true);
        SetEdgeEditModeCommand::default_handler(&mut state, &on).unwrap();
        SetEdgeEditModeCommand::default_handler(&mut state, &on).unwrap();
        assert!(state.graph_model().edge(edge).unwrap().edit_mode);
        assert_eq!(state.undo_history().len(), 1);
    }

    #[test]
    fn test_split_edge_routes_through_node() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 200.0);
        let middle = float_node(&mut graph, "Middle", 100.0);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = SplitEdgeAndInsertExistingNodeCommand::new(edge, middle);
        SplitEdgeAndInsertExistingNodeCommand::default_handler(&mut state, &command).unwrap();

        let model = state.graph_model();
        assert!(model.edge(edge).is_none());
        assert!(model.find_edge(&PortRef::output(a, 0), &PortRef::input(middle, 0)).is_some());
        assert!(model.find_edge(&PortRef::output(middle, 0), &PortRef::input(b, 0)).is_some());
    }

    #[test]
    fn test_split_edge_needs_ports() {
        let mut graph = GraphModel::new("test");
        let a = float_node(&mut graph, "A", 0.0);
        let b = float_node(&mut graph, "B", 200.0);
        let bare = graph.add_node(NodeModel::operation("Bare", "Bare", Pos2::ZERO));
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();
        let mut state = EditorState::new(graph);

        let command = SplitEdgeAndInsertExistingNodeCommand::new(edge, bare);
        assert!(matches!(
            SplitEdgeAndInsertExistingNodeCommand::default_handler(&mut state, &command),
            Err(GraphError::MissingPorts(id)) if id == bare
        ));
    }
}
