//! Portal commands: replacing long edges with entry/exit portal pairs

use super::{delete_edges, Command};
use crate::constants;
use crate::error::GraphResult;
use crate::model::{DataType, EdgeModel, ElementId, GraphModel, NodeKind, NodeModel, PortRef};
use crate::state::{EditorState, StateComponent};
use egui::{Pos2, Vec2};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Where the portals replacing one edge go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePortalPlacement {
    pub edge: ElementId,
    pub entry_position: Pos2,
    pub exit_position: Pos2,
}

impl EdgePortalPlacement {
    pub fn new(edge: ElementId, entry_position: Pos2, exit_position: Pos2) -> Self {
        Self {
            edge,
            entry_position,
            exit_position,
        }
    }
}

/// Vertical offsets of `count` portals stacked on one port, centered on it.
///
/// Odd counts put the first portal on the center line; even counts start half
/// a row away. The rest alternate below and above.
pub fn portal_stack_offsets(count: usize, row_height: f32) -> Vec<f32> {
    (0..count)
        .map(|i| {
            let offset = if count % 2 == 1 {
                let step = ((i + 1) / 2) as f32;
                if i % 2 == 1 {
                    step
                } else {
                    -step
                }
            } else {
                let step = (i / 2) as f32 + 0.5;
                if i % 2 == 0 {
                    step
                } else {
                    -step
                }
            };
            offset * row_height
        })
        .collect()
}

fn touches_portal(model: &GraphModel, edge: &EdgeModel) -> bool {
    [edge.from.node, edge.to.node]
        .iter()
        .any(|id| model.node(*id).is_some_and(|n| n.kind.is_portal()))
}

fn portal_name(model: &GraphModel, port: &PortRef) -> String {
    match (model.node(port.node), model.port(port)) {
        (Some(node), Some(port)) => format!("{}.{}", node.title, port.name),
        _ => "Portal".to_string(),
    }
}

/// Replaces edges by portals: one entry per distinct output port, one exit per edge
#[derive(Debug, Clone)]
pub struct ConvertEdgesToPortalsCommand {
    pub edges: Vec<EdgePortalPlacement>,
}

impl ConvertEdgesToPortalsCommand {
    pub fn new(edges: Vec<EdgePortalPlacement>) -> Self {
        Self { edges }
    }

    /// Places entries to the right of the source node and exits to the left
    /// of the destination node, `preferences.portal_offset` away
    pub fn beside_ports(state: &EditorState, edges: &[ElementId]) -> Self {
        let model = state.graph_model();
        let offset = state.preferences.portal_offset;
        let placements = edges
            .iter()
            .filter_map(|id| {
                let edge = model.edge(*id)?;
                let from = model.node(edge.from.node)?.position;
                let to = model.node(edge.to.node)?.position;
                Some(EdgePortalPlacement::new(
                    *id,
                    from + Vec2::new(offset, 0.0),
                    to - Vec2::new(offset, 0.0),
                ))
            })
            .collect();
        Self::new(placements)
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let mut seen = HashSet::new();
        let placements: Vec<EdgePortalPlacement> = command
            .edges
            .iter()
            .filter(|p| model.edge(p.edge).is_some_and(|e| !touches_portal(model, e)))
            .filter(|p| seen.insert(p.edge))
            .copied()
            .collect();
        if placements.is_empty() {
            debug!("No edge to convert to portals");
            return Ok(());
        }

        state.push_undo(command);

        let row_height = state.preferences.portal_row_height;
        let mut graph_updater = state.graph_view.updater();
        let mut entries: HashMap<PortRef, ElementId> = HashMap::new();
        let mut exits_by_input: HashMap<PortRef, Vec<ElementId>> = HashMap::new();

        for placement in placements {
            let model = graph_updater.graph_model();
            let Some(edge) = model.edge(placement.edge).cloned() else {
                continue;
            };
            let Some(data_type) = model.port(&edge.from).map(|p| p.data_type) else {
                continue;
            };
            let name = portal_name(model, &edge.from);
            delete_edges(&mut graph_updater, &[edge.id]);

            let declaration = match entries.get(&edge.from).copied() {
                Some(declaration) => declaration,
                None => {
                    let model = graph_updater.graph_model_mut();
                    let declaration = model.create_portal_declaration(name.clone());
                    let entry = model.add_node(NodeModel::entry_portal(
                        declaration,
                        name.clone(),
                        data_type,
                        placement.entry_position,
                    ));
                    let entry_edge = model.create_edge(PortRef::input(entry, 0), edge.from)?;
                    graph_updater.mark_new_all([declaration, entry, entry_edge]);
                    entries.insert(edge.from, declaration);
                    declaration
                }
            };

            let model = graph_updater.graph_model_mut();
            let exit = model.add_node(NodeModel::exit_portal(
                declaration,
                name,
                data_type,
                placement.exit_position,
            ));
            let exit_edge = model.create_edge(edge.to, PortRef::output(exit, 0))?;
            graph_updater.mark_new_all([exit, exit_edge]);
            exits_by_input.entry(edge.to).or_default().push(exit);
        }

        for exits in exits_by_input.values().filter(|exits| exits.len() > 1) {
            let model = graph_updater.graph_model_mut();
            let Some(center) = model.node(exits[0]).map(|n| n.position.y) else {
                continue;
            };
            for (exit, offset) in exits.iter().zip(portal_stack_offsets(exits.len(), row_height)) {
                if let Some(node) = model.node_mut(*exit) {
                    node.position.y = center + offset;
                }
            }
        }
        Ok(())
    }
}

impl Command for ConvertEdgesToPortalsCommand {
    fn label(&self) -> String {
        "Convert Edges to Portals".to_string()
    }
}

/// Counterpart a portal lacks: `(declaration, data type, position, title, create entry)`
fn missing_opposite(model: &GraphModel, id: ElementId) -> Option<(ElementId, DataType, Pos2, String, bool)> {
    let node = model.node(id)?;
    let offset = Vec2::new(constants::portal::OPPOSITE_OFFSET, 0.0);
    match node.kind {
        NodeKind::EntryPortal { declaration } => {
            let has_exit = model.portal_nodes(declaration).iter().any(|n| {
                model
                    .node(*n)
                    .is_some_and(|n| matches!(n.kind, NodeKind::ExitPortal { .. }))
            });
            let data_type = node.inputs.first()?.data_type;
            (!has_exit).then(|| (declaration, data_type, node.position + offset, node.title.clone(), false))
        }
        NodeKind::ExitPortal { declaration } => {
            let has_entry = model.portal_nodes(declaration).iter().any(|n| {
                model
                    .node(*n)
                    .is_some_and(|n| matches!(n.kind, NodeKind::EntryPortal { .. }))
            });
            let data_type = node.outputs.first()?.data_type;
            (!has_entry).then(|| (declaration, data_type, node.position - offset, node.title.clone(), true))
        }
        _ => None,
    }
}

/// Creates the missing exit of lone entry portals and the missing entry of lone exit portals
#[derive(Debug, Clone)]
pub struct CreatePortalsOppositeCommand {
    pub portals: Vec<ElementId>,
}

impl CreatePortalsOppositeCommand {
    pub fn new(portals: Vec<ElementId>) -> Self {
        Self { portals }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let mut declarations = HashSet::new();
        let plans: Vec<_> = command
            .portals
            .iter()
            .filter_map(|id| missing_opposite(model, *id))
            .filter(|(declaration, ..)| declarations.insert(*declaration))
            .collect();
        if plans.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for (declaration, data_type, position, title, create_entry) in plans {
            let node = if create_entry {
                NodeModel::entry_portal(declaration, title, data_type, position)
            } else {
                NodeModel::exit_portal(declaration, title, data_type, position)
            };
            let id = graph_updater.graph_model_mut().add_node(node);
            graph_updater.mark_new(id);
        }
        Ok(())
    }
}

impl Command for CreatePortalsOppositeCommand {
    fn label(&self) -> String {
        "Create Opposite Portals".to_string()
    }
}
