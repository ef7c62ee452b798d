//! Edges between an output port and an input port

use super::id::ElementId;
use super::port::PortRef;
use super::serde_helpers::pos2_serde;
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// A user-placed bend point on an editable edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    /// How tightly the curve hugs this point, 0..=100
    pub tightness: f32,
}

impl ControlPoint {
    pub fn new(position: Pos2) -> Self {
        Self {
            position,
            tightness: crate::constants::edge::DEFAULT_TIGHTNESS,
        }
    }
}

/// Represents a connection between an output port and an input port.
///
/// The graph owns edges; ports never store them, connected edges are looked
/// up through the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeModel {
    pub id: ElementId,
    pub from: PortRef,
    pub to: PortRef,
    pub control_points: Vec<ControlPoint>,
    pub edit_mode: bool,
}

impl EdgeModel {
    /// Creates a new edge; direction checks are done by the graph
    pub fn new(from: PortRef, to: PortRef) -> Self {
        Self {
            id: ElementId::new(),
            from,
            to,
            control_points: vec![],
            edit_mode: false,
        }
    }

    /// Whether either end sits on the given node
    pub fn touches_node(&self, node: ElementId) -> bool {
        self.from.node == node || self.to.node == node
    }

    /// Whether either end is the given port
    pub fn touches_port(&self, port: &PortRef) -> bool {
        self.from == *port || self.to == *port
    }

    /// The endpoint opposite to `port`
    pub fn other_end(&self, port: &PortRef) -> Option<PortRef> {
        if self.from == *port {
            Some(self.to)
        } else if self.to == *port {
            Some(self.from)
        } else {
            None
        }
    }
}
