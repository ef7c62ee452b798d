//! Graph model - nodes, ports, edges, declarations and annotations

pub mod edge;
pub mod graph;
pub mod id;
pub mod integrity;
pub mod node;
pub mod placemat;
pub mod port;
mod serde_helpers;
pub mod variable;

// Re-export core types
pub use edge::{ControlPoint, EdgeModel};
pub use graph::{ElementKind, GraphModel};
pub use id::ElementId;
pub use integrity::{IntegrityIssue, RepairReport};
pub use node::{ItemizeOptions, NodeKind, NodeModel, NodeState};
pub use placemat::{Placemat, StickyNote, StickyNoteTextSize, StickyNoteTheme};
pub use port::{ConstantValue, DataType, Direction, PortCapacity, PortModel, PortRef};
pub use variable::{PortalDeclaration, VariableDeclaration, VariableModifiers};
