//! Graph model: the document every command edits

use super::edge::EdgeModel;
use super::id::ElementId;
use super::node::{NodeKind, NodeModel};
use super::placemat::{Placemat, StickyNote};
use super::port::{DataType, Direction, PortCapacity, PortModel, PortRef};
use super::variable::{PortalDeclaration, VariableDeclaration, VariableModifiers};
use crate::constants;
use crate::error::{GraphError, GraphResult};
use egui::{Rect, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of element an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
    Variable,
    PortalDeclaration,
    Placemat,
    StickyNote,
}

/// A graph containing nodes, edges, declarations and annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub name: String,
    nodes: HashMap<ElementId, NodeModel>,
    /// Order matters: sibling edges on an output port keep this order
    edges: Vec<EdgeModel>,
    /// Order matters: this is the blackboard order
    variables: Vec<VariableDeclaration>,
    portals: Vec<PortalDeclaration>,
    placemats: Vec<Placemat>,
    sticky_notes: Vec<StickyNote>,
}

impl GraphModel {
    /// Creates a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Which kind of element `id` is, if it exists in this graph
    pub fn element_kind(&self, id: ElementId) -> Option<ElementKind> {
        if self.nodes.contains_key(&id) {
            Some(ElementKind::Node)
        } else if self.edges.iter().any(|e| e.id == id) {
            Some(ElementKind::Edge)
        } else if self.variables.iter().any(|v| v.id == id) {
            Some(ElementKind::Variable)
        } else if self.portals.iter().any(|p| p.id == id) {
            Some(ElementKind::PortalDeclaration)
        } else if self.placemats.iter().any(|p| p.id == id) {
            Some(ElementKind::Placemat)
        } else if self.sticky_notes.iter().any(|s| s.id == id) {
            Some(ElementKind::StickyNote)
        } else {
            None
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element_kind(id).is_some()
    }

    // ---- nodes -------------------------------------------------------------

    /// Adds a node to the graph and returns its ID.
    ///
    /// A node whose id already names an element of the graph gets a fresh id,
    /// so the returned id may differ from `node.id`.
    pub fn add_node(&mut self, mut node: NodeModel) -> ElementId {
        if self.contains(node.id) {
            let fresh = ElementId::new();
            warn!("Node id {} is already used, adding node as {}", node.id, fresh);
            node.id = fresh;
        }
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    pub fn node(&self, id: ElementId) -> Option<&NodeModel> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: ElementId) -> Option<&mut NodeModel> {
        self.nodes.get_mut(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeModel> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes a node and all its edges, returning both
    pub fn delete_node(&mut self, id: ElementId) -> Option<(NodeModel, Vec<EdgeModel>)> {
        let node = self.nodes.remove(&id)?;
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.edges.drain(..).partition(|edge| edge.touches_node(id));
        self.edges = kept;
        Some((node, removed))
    }

    /// Adds a copy of a node shifted by `offset`, returning the copy's id
    pub fn duplicate_node(&mut self, id: ElementId, offset: Vec2) -> Option<ElementId> {
        let copy = self.nodes.get(&id)?.duplicate(offset);
        Some(self.add_node(copy))
    }

    pub fn port(&self, port: &PortRef) -> Option<&PortModel> {
        self.nodes.get(&port.node)?.port(port.direction, port.index)
    }

    pub fn port_mut(&mut self, port: &PortRef) -> Option<&mut PortModel> {
        self.nodes.get_mut(&port.node)?.port_mut(port.direction, port.index)
    }

    // ---- edges -------------------------------------------------------------

    /// Checks everything about a prospective edge except port capacity
    pub fn check_connection(&self, to: &PortRef, from: &PortRef) -> GraphResult<()> {
        let to_port = self.port(to).ok_or(GraphError::PortNotFound(*to))?;
        let from_port = self.port(from).ok_or(GraphError::PortNotFound(*from))?;

        if from_port.direction != Direction::Output || to_port.direction != Direction::Input {
            return Err(GraphError::InvalidPortDirection {
                from: from_port.direction,
                to: to_port.direction,
            });
        }
        if from.node == to.node {
            return Err(GraphError::SelfConnection(from.node));
        }
        if !from_port.data_type.can_connect_to(&to_port.data_type) {
            return Err(GraphError::IncompatibleTypes {
                from: from_port.data_type,
                to: to_port.data_type,
            });
        }
        Ok(())
    }

    /// Creates an edge from an output port to an input port.
    ///
    /// Fails instead of replacing when a single-capacity end is already
    /// connected; callers decide which edges to delete first.
    pub fn create_edge(&mut self, to: PortRef, from: PortRef) -> GraphResult<ElementId> {
        self.check_connection(&to, &from)?;
        for port in [&to, &from] {
            let capacity = self.port(port).map(|p| p.capacity);
            if capacity == Some(PortCapacity::Single) && self.connected_edge_count(port) > 0 {
                return Err(GraphError::PortCapacityExceeded(*port));
            }
        }

        let edge = EdgeModel::new(from, to);
        let id = edge.id;
        self.edges.push(edge);
        Ok(id)
    }

    /// Removes an edge by id
    pub fn delete_edge(&mut self, id: ElementId) -> Option<EdgeModel> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    pub fn edge(&self, id: ElementId) -> Option<&EdgeModel> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_mut(&mut self, id: ElementId) -> Option<&mut EdgeModel> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub fn edges(&self) -> &[EdgeModel] {
        &self.edges
    }

    /// Edges attached to a port, in sibling order
    pub fn edges_on_port(&self, port: &PortRef) -> Vec<&EdgeModel> {
        self.edges.iter().filter(|e| e.touches_port(port)).collect()
    }

    pub fn edge_ids_on_port(&self, port: &PortRef) -> Vec<ElementId> {
        self.edges
            .iter()
            .filter(|e| e.touches_port(port))
            .map(|e| e.id)
            .collect()
    }

    pub fn connected_edge_count(&self, port: &PortRef) -> usize {
        self.edges.iter().filter(|e| e.touches_port(port)).count()
    }

    /// Every edge touching a node
    pub fn edge_ids_of_node(&self, node: ElementId) -> Vec<ElementId> {
        self.edges
            .iter()
            .filter(|e| e.touches_node(node))
            .map(|e| e.id)
            .collect()
    }

    /// An edge already linking exactly these two ports
    pub fn find_edge(&self, from: &PortRef, to: &PortRef) -> Option<ElementId> {
        self.edges
            .iter()
            .find(|e| e.from == *from && e.to == *to)
            .map(|e| e.id)
    }

    /// Position of an edge among the edges sharing its output port, and the sibling count
    pub fn sibling_index(&self, id: ElementId) -> Option<(usize, usize)> {
        let from = self.edge(id)?.from;
        let siblings = self.sibling_positions(&from);
        let index = siblings.iter().position(|&p| self.edges[p].id == id)?;
        Some((index, siblings.len()))
    }

    fn sibling_positions(&self, from: &PortRef) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.from == *from)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the sibling slots of an edge and its index among them
    fn sibling_slots(&self, id: ElementId) -> Option<(Vec<usize>, usize)> {
        let from = self.edge(id)?.from;
        let slots = self.sibling_positions(&from);
        let index = slots.iter().position(|&p| self.edges[p].id == id)?;
        Some((slots, index))
    }

    /// Moves an edge before all its siblings; false when already first
    pub fn move_edge_first(&mut self, id: ElementId) -> bool {
        match self.sibling_slots(id) {
            Some((slots, index)) if index > 0 => {
                let edge = self.edges.remove(slots[index]);
                self.edges.insert(slots[0], edge);
                true
            }
            _ => false,
        }
    }

    /// Swaps an edge with its previous sibling; false when already first
    pub fn move_edge_up(&mut self, id: ElementId) -> bool {
        match self.sibling_slots(id) {
            Some((slots, index)) if index > 0 => {
                self.edges.swap(slots[index], slots[index - 1]);
                true
            }
            _ => false,
        }
    }

    /// Swaps an edge with its next sibling; false when already last
    pub fn move_edge_down(&mut self, id: ElementId) -> bool {
        match self.sibling_slots(id) {
            Some((slots, index)) if index + 1 < slots.len() => {
                self.edges.swap(slots[index], slots[index + 1]);
                true
            }
            _ => false,
        }
    }

    /// Moves an edge after all its siblings; false when already last
    pub fn move_edge_last(&mut self, id: ElementId) -> bool {
        match self.sibling_slots(id) {
            Some((slots, index)) if index + 1 < slots.len() => {
                let last = slots[slots.len() - 1];
                let edge = self.edges.remove(slots[index]);
                // Removal shifted the last sibling down by one; insert right after it
                self.edges.insert(last, edge);
                true
            }
            _ => false,
        }
    }

    // ---- variables ---------------------------------------------------------

    /// Returns `base` or the first free `base<n>` among variable names
    pub fn unique_variable_name(&self, base: &str, ignore: Option<ElementId>) -> String {
        let base = base.trim();
        let base = if base.is_empty() {
            constants::variable::DEFAULT_NAME
        } else {
            base
        };
        let taken = |name: &str| {
            self.variables
                .iter()
                .any(|v| Some(v.id) != ignore && v.name == name)
        };
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Adds a declaration, renaming it if its name is already taken
    pub fn add_variable_declaration(&mut self, mut declaration: VariableDeclaration) -> ElementId {
        declaration.name = self.unique_variable_name(&declaration.name, None);
        let id = declaration.id;
        self.variables.push(declaration);
        id
    }

    pub fn create_variable_declaration(
        &mut self,
        name: &str,
        data_type: DataType,
        exposed: bool,
        modifiers: VariableModifiers,
    ) -> ElementId {
        let declaration = VariableDeclaration::new(name, data_type)
            .with_exposed(exposed)
            .with_modifiers(modifiers);
        self.add_variable_declaration(declaration)
    }

    pub fn variable(&self, id: ElementId) -> Option<&VariableDeclaration> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn variable_mut(&mut self, id: ElementId) -> Option<&mut VariableDeclaration> {
        self.variables.iter_mut().find(|v| v.id == id)
    }

    pub fn variables(&self) -> &[VariableDeclaration] {
        &self.variables
    }

    /// Variable nodes referencing a declaration
    pub fn variable_nodes(&self, declaration: ElementId) -> Vec<ElementId> {
        self.nodes
            .values()
            .filter(|n| matches!(n.kind, NodeKind::Variable { declaration: d } if d == declaration))
            .map(|n| n.id)
            .collect()
    }

    /// Renames a declaration (made unique) and the titles of its nodes.
    /// Returns the ids of the variable nodes that were retitled.
    pub fn rename_variable(&mut self, id: ElementId, name: &str) -> Option<Vec<ElementId>> {
        let unique = self.unique_variable_name(name, Some(id));
        self.variable_mut(id)?.name = unique.clone();
        let nodes = self.variable_nodes(id);
        for node_id in &nodes {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.title = unique.clone();
            }
        }
        Some(nodes)
    }

    /// Removes a declaration with its variable nodes and their edges.
    /// Returns every removed id; empty when the declaration does not exist.
    pub fn delete_variable_declaration(&mut self, id: ElementId) -> Vec<ElementId> {
        let Some(index) = self.variables.iter().position(|v| v.id == id) else {
            return vec![];
        };
        self.variables.remove(index);

        let mut removed = vec![id];
        for node_id in self.variable_nodes(id) {
            if let Some((_, edges)) = self.delete_node(node_id) {
                removed.extend(edges.iter().map(|e| e.id));
                removed.push(node_id);
            }
        }
        removed
    }

    /// Declaration order after moving `ids` (keeping their relative order)
    /// right after `after`, or to the front when `after` is `None`
    pub fn reordered_variables(&self, ids: &[ElementId], after: Option<ElementId>) -> Vec<ElementId> {
        let current = self.variables.iter().map(|v| v.id).collect::<Vec<_>>();
        if after.is_some_and(|a| ids.contains(&a)) {
            return current;
        }
        let (moving, mut rest): (Vec<_>, Vec<_>) =
            current.into_iter().partition(|id| ids.contains(id));
        let insert_at = match after {
            Some(a) => rest.iter().position(|id| *id == a).map(|p| p + 1).unwrap_or(rest.len()),
            None => 0,
        };
        for (offset, id) in moving.into_iter().enumerate() {
            rest.insert(insert_at + offset, id);
        }
        rest
    }

    /// Applies [`GraphModel::reordered_variables`]. Returns false when nothing moved.
    pub fn move_variables_after(&mut self, ids: &[ElementId], after: Option<ElementId>) -> bool {
        let order = self.reordered_variables(ids, after);
        if self.variables.iter().map(|v| v.id).eq(order.iter().copied()) {
            return false;
        }
        self.variables
            .sort_by_key(|v| order.iter().position(|id| *id == v.id).unwrap_or(usize::MAX));
        true
    }

    // ---- portals -----------------------------------------------------------

    pub fn create_portal_declaration(&mut self, name: impl Into<String>) -> ElementId {
        let declaration = PortalDeclaration::new(name);
        let id = declaration.id;
        self.portals.push(declaration);
        id
    }

    pub fn portal_declaration(&self, id: ElementId) -> Option<&PortalDeclaration> {
        self.portals.iter().find(|p| p.id == id)
    }

    pub fn portal_declaration_mut(&mut self, id: ElementId) -> Option<&mut PortalDeclaration> {
        self.portals.iter_mut().find(|p| p.id == id)
    }

    pub fn portal_declarations(&self) -> &[PortalDeclaration] {
        &self.portals
    }

    /// Removes a portal declaration with its portal nodes and their edges.
    /// Returns every removed id; empty when the declaration does not exist.
    pub fn delete_portal_declaration(&mut self, id: ElementId) -> Vec<ElementId> {
        let Some(index) = self.portals.iter().position(|p| p.id == id) else {
            return vec![];
        };
        self.portals.remove(index);

        let mut removed = vec![id];
        for node_id in self.portal_nodes(id) {
            if let Some((_, edges)) = self.delete_node(node_id) {
                removed.extend(edges.iter().map(|e| e.id));
                removed.push(node_id);
            }
        }
        removed
    }

    /// Portal nodes (entries and exits) sharing a declaration
    pub fn portal_nodes(&self, declaration: ElementId) -> Vec<ElementId> {
        self.nodes
            .values()
            .filter(|n| n.kind.portal_declaration() == Some(declaration))
            .map(|n| n.id)
            .collect()
    }

    // ---- placemats and sticky notes ----------------------------------------

    /// Creates a placemat on top of all existing ones
    pub fn create_placemat(&mut self, title: impl Into<String>, rect: Rect) -> ElementId {
        let mut placemat = Placemat::new(title, rect);
        placemat.z_order = self.placemats.iter().map(|p| p.z_order + 1).max().unwrap_or(0);
        let id = placemat.id;
        self.placemats.push(placemat);
        id
    }

    pub fn placemat(&self, id: ElementId) -> Option<&Placemat> {
        self.placemats.iter().find(|p| p.id == id)
    }

    pub fn placemat_mut(&mut self, id: ElementId) -> Option<&mut Placemat> {
        self.placemats.iter_mut().find(|p| p.id == id)
    }

    pub fn placemats(&self) -> &[Placemat] {
        &self.placemats
    }

    pub fn delete_placemat(&mut self, id: ElementId) -> Option<Placemat> {
        let index = self.placemats.iter().position(|p| p.id == id)?;
        Some(self.placemats.remove(index))
    }

    pub fn create_sticky_note(&mut self, rect: Rect) -> ElementId {
        let note = StickyNote::new(rect);
        let id = note.id;
        self.sticky_notes.push(note);
        id
    }

    pub fn sticky_note(&self, id: ElementId) -> Option<&StickyNote> {
        self.sticky_notes.iter().find(|s| s.id == id)
    }

    pub fn sticky_note_mut(&mut self, id: ElementId) -> Option<&mut StickyNote> {
        self.sticky_notes.iter_mut().find(|s| s.id == id)
    }

    pub fn sticky_notes(&self) -> &[StickyNote] {
        &self.sticky_notes
    }

    pub fn delete_sticky_note(&mut self, id: ElementId) -> Option<StickyNote> {
        let index = self.sticky_notes.iter().position(|s| s.id == id)?;
        Some(self.sticky_notes.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::port::ConstantValue;
    use egui::Pos2;

    fn add_node(graph: &mut GraphModel) -> ElementId {
        let mut node = NodeModel::operation("Math/Add", "Add", Pos2::ZERO);
        node.add_input("a", DataType::Float)
            .add_input("b", DataType::Float)
            .add_output("result", DataType::Float);
        graph.add_node(node)
    }

    #[test]
    fn test_add_node_keeps_existing_node_on_id_clash() {
        let mut graph = GraphModel::new("test");
        let a = add_node(&mut graph);
        let b = add_node(&mut graph);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();

        let mut clash = NodeModel::constant(ConstantValue::Boolean(true), Pos2::ZERO);
        clash.id = a;
        let added = graph.add_node(clash);

        assert_ne!(added, a);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node(a).unwrap().inputs.len(), 2);
        assert!(matches!(graph.node(added).unwrap().kind, NodeKind::Constant { .. }));
        assert!(graph.edge(edge).is_some());

        // An edge id is taken too
        let mut clash = NodeModel::constant(ConstantValue::Boolean(false), Pos2::ZERO);
        clash.id = edge;
        assert_ne!(graph.add_node(clash), edge);
    }

    #[test]
    fn test_create_edge_checks_direction() {
        let mut graph = GraphModel::new("test");
        let a = add_node(&mut graph);
        let b = add_node(&mut graph);

        let result = graph.create_edge(PortRef::output(b, 0), PortRef::input(a, 0));
        assert!(matches!(result, Err(GraphError::InvalidPortDirection { .. })));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_create_edge_rejects_self_connection() {
        let mut graph = GraphModel::new("test");
        let a = add_node(&mut graph);
        let result = graph.create_edge(PortRef::input(a, 0), PortRef::output(a, 0));
        assert!(matches!(result, Err(GraphError::SelfConnection(_))));
    }

    #[test]
    fn test_single_capacity_is_enforced() {
        let mut graph = GraphModel::new("test");
        let a = add_node(&mut graph);
        let b = add_node(&mut graph);
        let c = add_node(&mut graph);

        graph.create_edge(PortRef::input(c, 0), PortRef::output(a, 0)).unwrap();
        let second = graph.create_edge(PortRef::input(c, 0), PortRef::output(b, 0));
        assert!(matches!(second, Err(GraphError::PortCapacityExceeded(_))));
        assert_eq!(graph.connected_edge_count(&PortRef::input(c, 0)), 1);
    }

    #[test]
    fn test_delete_node_removes_its_edges() {
        let mut graph = GraphModel::new("test");
        let a = add_node(&mut graph);
        let b = add_node(&mut graph);
        let edge = graph.create_edge(PortRef::input(b, 0), PortRef::output(a, 0)).unwrap();

        let (_, removed) = graph.delete_node(a).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, edge);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_sibling_reordering() {
        let mut graph = GraphModel::new("test");
        let source = add_node(&mut graph);
        let targets: Vec<_> = (0..3).map(|_| add_node(&mut graph)).collect();
        let edges: Vec<_> = targets
            .iter()
            .map(|&t| graph.create_edge(PortRef::input(t, 0), PortRef::output(source, 0)).unwrap())
            .collect();

        assert_eq!(graph.sibling_index(edges[0]), Some((0, 3)));
        assert!(!graph.move_edge_first(edges[0]));
        assert!(!graph.move_edge_up(edges[0]));
        assert!(!graph.move_edge_last(edges[2]));
        assert!(!graph.move_edge_down(edges[2]));

        assert!(graph.move_edge_last(edges[0]));
        assert_eq!(graph.sibling_index(edges[0]), Some((2, 3)));
        assert_eq!(graph.sibling_index(edges[1]), Some((0, 3)));

        assert!(graph.move_edge_first(edges[0]));
        assert_eq!(graph.sibling_index(edges[0]), Some((0, 3)));

        assert!(graph.move_edge_down(edges[0]));
        assert_eq!(graph.sibling_index(edges[0]), Some((1, 3)));
        assert!(graph.move_edge_up(edges[0]));
        assert_eq!(graph.sibling_index(edges[0]), Some((0, 3)));
    }

    #[test]
    fn test_unique_variable_names() {
        let mut graph = GraphModel::new("test");
        let a = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let b = graph.create_variable_declaration("speed", DataType::Float, false, VariableModifiers::Read);
        let c = graph.create_variable_declaration("", DataType::Float, false, VariableModifiers::Read);
        assert_eq!(graph.variable(a).unwrap().name, "speed");
        assert_eq!(graph.variable(b).unwrap().name, "speed1");
        assert_eq!(graph.variable(c).unwrap().name, "variable");
    }

    #[test]
    fn test_delete_variable_removes_nodes() {
        let mut graph = GraphModel::new("test");
        let decl = graph.create_variable_declaration("x", DataType::Float, false, VariableModifiers::Read);
        let node = NodeModel::variable(graph.variable(decl).unwrap(), Pos2::ZERO);
        let node_id = graph.add_node(node);
        let target = add_node(&mut graph);
        let edge = graph
            .create_edge(PortRef::input(target, 0), PortRef::output(node_id, 0))
            .unwrap();

        let removed = graph.delete_variable_declaration(decl);
        assert!(removed.contains(&decl));
        assert!(removed.contains(&node_id));
        assert!(removed.contains(&edge));
        assert!(graph.node(node_id).is_none());
    }

    #[test]
    fn test_move_variables_after() {
        let mut graph = GraphModel::new("test");
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|n| graph.create_variable_declaration(n, DataType::Float, false, VariableModifiers::Read))
            .collect();

        assert!(graph.move_variables_after(&[ids[0]], Some(ids[2])));
        let order: Vec<_> = graph.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);

        assert!(graph.move_variables_after(&[ids[0]], None));
        assert!(!graph.move_variables_after(&[ids[0]], None));
    }

    #[test]
    fn test_placemats_stack_on_top() {
        let mut graph = GraphModel::new("test");
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.0));
        let a = graph.create_placemat("a", rect);
        let b = graph.create_placemat("b", rect);
        assert!(graph.placemat(b).unwrap().z_order > graph.placemat(a).unwrap().z_order);
    }

    #[test]
    fn test_element_kind_lookup() {
        let mut graph = GraphModel::new("test");
        let node = graph.add_node(NodeModel::constant(ConstantValue::Float(1.0), Pos2::ZERO));
        let note = graph.create_sticky_note(Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0)));
        assert_eq!(graph.element_kind(node), Some(ElementKind::Node));
        assert_eq!(graph.element_kind(note), Some(ElementKind::StickyNote));
        assert_eq!(graph.element_kind(ElementId::new()), None);
    }
}
