//! Graph integrity checks and the "Clean" repair used after a failed load

use super::graph::GraphModel;
use super::id::ElementId;
use super::node::NodeKind;
use super::port::{Direction, PortCapacity, PortRef};
use crate::error::{GraphError, GraphResult};
use std::collections::HashMap;
use std::fmt;

/// One broken invariant found in a graph
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    /// An edge points at a node or port that does not exist
    DanglingEdge { edge: ElementId },
    /// An edge does not go from an output to an input
    EdgeDirectionMismatch { edge: ElementId },
    /// A single-capacity port has more than one edge; reported for the extra edges
    CapacityExceeded { edge: ElementId, port: PortRef },
    /// A variable node references a missing declaration
    MissingVariableDeclaration { node: ElementId },
    /// A portal node references a missing portal declaration
    MissingPortalDeclaration { node: ElementId },
    /// A collapsed placemat hides an element that no longer exists
    MissingHiddenElement { placemat: ElementId, element: ElementId },
}

impl IntegrityIssue {
    /// Element that carries the problem
    pub fn element(&self) -> ElementId {
        match self {
            IntegrityIssue::DanglingEdge { edge }
            | IntegrityIssue::EdgeDirectionMismatch { edge }
            | IntegrityIssue::CapacityExceeded { edge, .. } => *edge,
            IntegrityIssue::MissingVariableDeclaration { node }
            | IntegrityIssue::MissingPortalDeclaration { node } => *node,
            IntegrityIssue::MissingHiddenElement { placemat, .. } => *placemat,
        }
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingEdge { edge } => write!(f, "edge {} has a missing endpoint", edge),
            IntegrityIssue::EdgeDirectionMismatch { edge } => {
                write!(f, "edge {} does not go from an output to an input", edge)
            }
            IntegrityIssue::CapacityExceeded { edge, port } => {
                write!(f, "edge {} exceeds the capacity of port {}", edge, port)
            }
            IntegrityIssue::MissingVariableDeclaration { node } => {
                write!(f, "variable node {} has no declaration", node)
            }
            IntegrityIssue::MissingPortalDeclaration { node } => {
                write!(f, "portal node {} has no declaration", node)
            }
            IntegrityIssue::MissingHiddenElement { placemat, element } => {
                write!(f, "placemat {} hides missing element {}", placemat, element)
            }
        }
    }
}

/// What a repair removed and what it modified in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairReport {
    pub removed: Vec<ElementId>,
    pub changed: Vec<ElementId>,
}

impl RepairReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.changed.is_empty()
    }
}

impl GraphModel {
    /// Lists every broken invariant, nodes first then edges then placemats
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for node in self.nodes() {
            match node.kind {
                NodeKind::Variable { declaration } if self.variable(declaration).is_none() => {
                    issues.push(IntegrityIssue::MissingVariableDeclaration { node: node.id });
                }
                NodeKind::EntryPortal { declaration } | NodeKind::ExitPortal { declaration }
                    if self.portal_declaration(declaration).is_none() =>
                {
                    issues.push(IntegrityIssue::MissingPortalDeclaration { node: node.id });
                }
                _ => {}
            }
        }

        let mut single_port_usage: HashMap<PortRef, usize> = HashMap::new();
        for edge in self.edges() {
            let (Some(from), Some(to)) = (self.port(&edge.from), self.port(&edge.to)) else {
                issues.push(IntegrityIssue::DanglingEdge { edge: edge.id });
                continue;
            };
            if from.direction != Direction::Output || to.direction != Direction::Input {
                issues.push(IntegrityIssue::EdgeDirectionMismatch { edge: edge.id });
                continue;
            }
            for (port_ref, port) in [(edge.to, to), (edge.from, from)] {
                if port.capacity == PortCapacity::Single {
                    let used = single_port_usage.entry(port_ref).or_insert(0);
                    *used += 1;
                    if *used > 1 {
                        issues.push(IntegrityIssue::CapacityExceeded {
                            edge: edge.id,
                            port: port_ref,
                        });
                    }
                }
            }
        }

        for placemat in self.placemats() {
            for element in &placemat.hidden_elements {
                if !self.contains(*element) {
                    issues.push(IntegrityIssue::MissingHiddenElement {
                        placemat: placemat.id,
                        element: *element,
                    });
                }
            }
        }

        issues
    }

    /// Fails with every issue found, if any
    pub fn check_integrity(&self) -> GraphResult<()> {
        let issues = self.integrity_issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(GraphError::Corrupted(issues))
        }
    }

    /// Strips invalid elements until the graph is consistent
    pub fn repair(&mut self) -> RepairReport {
        let mut report = RepairReport::default();

        // Removing a node can only remove edges, so one pass per kind is enough
        for issue in self.integrity_issues() {
            match issue {
                IntegrityIssue::MissingVariableDeclaration { node }
                | IntegrityIssue::MissingPortalDeclaration { node } => {
                    if let Some((_, edges)) = self.delete_node(node) {
                        report.removed.extend(edges.iter().map(|e| e.id));
                        report.removed.push(node);
                    }
                }
                _ => {}
            }
        }

        for issue in self.integrity_issues() {
            match issue {
                IntegrityIssue::DanglingEdge { edge }
                | IntegrityIssue::EdgeDirectionMismatch { edge }
                | IntegrityIssue::CapacityExceeded { edge, .. } => {
                    if self.delete_edge(edge).is_some() {
                        report.removed.push(edge);
                    }
                }
                IntegrityIssue::MissingHiddenElement { placemat, element } => {
                    if let Some(p) = self.placemat_mut(placemat) {
                        p.hidden_elements.retain(|e| *e != element);
                        if !report.changed.contains(&placemat) {
                            report.changed.push(placemat);
                        }
                    }
                }
                _ => {}
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::NodeModel;
    use crate::model::port::DataType;
    use crate::model::variable::VariableModifiers;
    use egui::Pos2;

    #[test]
    fn test_clean_graph_has_no_issues() {
        let graph = GraphModel::new("empty");
        assert!(graph.check_integrity().is_ok());
    }

    #[test]
    fn test_repair_removes_orphan_variable_nodes() {
        let mut graph = GraphModel::new("broken");
        let decl = graph.create_variable_declaration("x", DataType::Float, false, VariableModifiers::Read);
        let node = NodeModel::variable(graph.variable(decl).unwrap(), Pos2::ZERO);
        let node_id = graph.add_node(node);
        let mut sink = NodeModel::operation("Output/Print", "Print", Pos2::ZERO);
        sink.add_input("value", DataType::Any);
        let sink_id = graph.add_node(sink);
        let edge = graph
            .create_edge(PortRef::input(sink_id, 0), PortRef::output(node_id, 0))
            .unwrap();

        // Drop the declaration behind the model's back
        let mut json = serde_json::to_value(&graph).unwrap();
        json["variables"] = serde_json::json!([]);
        let mut copy: GraphModel = serde_json::from_value(json).unwrap();

        let issues = copy.integrity_issues();
        assert_eq!(issues, vec![IntegrityIssue::MissingVariableDeclaration { node: node_id }]);
        assert!(matches!(copy.check_integrity(), Err(GraphError::Corrupted(_))));

        let report = copy.repair();
        assert!(report.removed.contains(&node_id));
        assert!(report.removed.contains(&edge));
        assert!(copy.check_integrity().is_ok());
    }
}
