//! Error types for the editing layer.

use crate::model::{DataType, Direction, ElementId, IntegrityIssue, PortRef};
use thiserror::Error;

/// Result type for graph edits.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while editing a graph.
///
/// Invalid-but-harmless input (empty selections, zero moves) is not an error:
/// handlers return early without touching anything. These variants cover
/// programming errors and broken documents.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A command was dispatched with no handler registered for its type.
    #[error("No handler registered for command type {command}")]
    UnregisteredCommand { command: &'static str },

    /// A handler received a command of another type.
    #[error("Handler for {expected} received a different command type")]
    CommandTypeMismatch { expected: &'static str },

    #[error("Element {0} does not exist")]
    ElementNotFound(ElementId),

    #[error("Port {0} does not exist")]
    PortNotFound(PortRef),

    /// Edges go from an output port to an input port.
    #[error("Edge must connect an output to an input, got {from:?} -> {to:?}")]
    InvalidPortDirection { from: Direction, to: Direction },

    #[error("Cannot connect node {0} to itself")]
    SelfConnection(ElementId),

    #[error("Cannot connect {from} to {to}")]
    IncompatibleTypes { from: DataType, to: DataType },

    /// A single-capacity port already has an edge.
    #[error("Port {0} only accepts a single edge")]
    PortCapacityExceeded(PortRef),

    #[error("Expected a {expected} node, {node} is a {found} node")]
    UnexpectedNodeKind {
        node: ElementId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value of type {found} cannot be stored where {expected} is expected")]
    ValueTypeMismatch { expected: DataType, found: DataType },

    /// Split operations need somewhere to plug both halves of the edge.
    #[error("Node {0} needs at least one input and one output port")]
    MissingPorts(ElementId),

    #[error("Control point {index} is out of range for edge {edge}")]
    ControlPointOutOfRange { edge: ElementId, index: usize },

    #[error("Got {z_orders} z-orders for {placemats} placemats")]
    ZOrderCountMismatch { z_orders: usize, placemats: usize },

    #[error("Placemat z-order {0} is used more than once")]
    DuplicateZOrder(i32),

    #[error("Searcher item '{0}' cannot create elements")]
    NotCreatable(String),

    /// The graph breaks structural invariants; `RepairGraphCommand` can clean it.
    #[error("Graph is corrupted ({} issue(s))", .0.len())]
    Corrupted(Vec<IntegrityIssue>),

    /// IO error while reading or writing preferences.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Create an unexpected-node-kind error.
    pub fn unexpected_kind(node: ElementId, expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedNodeKind {
            node,
            expected,
            found,
        }
    }
}
