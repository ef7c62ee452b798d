//! Node types and core node functionality

use super::id::ElementId;
use super::port::{ConstantValue, DataType, Direction, PortModel, PortRef};
use super::serde_helpers::{option_color32_serde, pos2_serde};
use super::variable::{VariableDeclaration, VariableModifiers};
use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// What a node is. Handlers branch on this instead of probing node types at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A node created from the operation catalog ("Math/Add", ...)
    Operation { node_type: String },
    /// Emits a literal value
    Constant { value: ConstantValue },
    /// Reads and/or writes a graph variable
    Variable { declaration: ElementId },
    /// Receives a value that reappears at matching exit portals
    EntryPortal { declaration: ElementId },
    /// Re-emits the value fed into the matching entry portal
    ExitPortal { declaration: ElementId },
}

impl NodeKind {
    /// Short name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Operation { .. } => "operation",
            NodeKind::Constant { .. } => "constant",
            NodeKind::Variable { .. } => "variable",
            NodeKind::EntryPortal { .. } => "entry portal",
            NodeKind::ExitPortal { .. } => "exit portal",
        }
    }

    pub fn is_portal(&self) -> bool {
        matches!(self, NodeKind::EntryPortal { .. } | NodeKind::ExitPortal { .. })
    }

    /// Portal declaration for portal nodes
    pub fn portal_declaration(&self) -> Option<ElementId> {
        match self {
            NodeKind::EntryPortal { declaration } | NodeKind::ExitPortal { declaration } => {
                Some(*declaration)
            }
            _ => None,
        }
    }
}

/// Which source nodes get duplicated instead of fanned out when connected again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemizeOptions {
    pub constants: bool,
    pub variables: bool,
}

/// Whether a node takes part in execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeState {
    #[default]
    Enabled,
    Disabled,
}

/// Core node structure representing a visual node in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    pub id: ElementId,
    pub title: String,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    pub kind: NodeKind,
    pub inputs: Vec<PortModel>,
    pub outputs: Vec<PortModel>,
    pub state: NodeState,
    pub collapsed: bool,
    /// Custom color; `None` means the default for the node kind
    #[serde(with = "option_color32_serde")]
    pub color: Option<Color32>,
}

impl NodeModel {
    /// Creates a new node with no ports
    pub fn new(title: impl Into<String>, position: Pos2, kind: NodeKind) -> Self {
        Self {
            id: ElementId::new(),
            title: title.into(),
            position,
            kind,
            inputs: vec![],
            outputs: vec![],
            state: NodeState::Enabled,
            collapsed: false,
            color: None,
        }
    }

    /// Creates a catalog operation node
    pub fn operation(node_type: impl Into<String>, title: impl Into<String>, position: Pos2) -> Self {
        Self::new(
            title,
            position,
            NodeKind::Operation {
                node_type: node_type.into(),
            },
        )
    }

    /// Creates a constant node with a single output of the value's type
    pub fn constant(value: ConstantValue, position: Pos2) -> Self {
        let data_type = value.data_type();
        let mut node = Self::new(data_type.name(), position, NodeKind::Constant { value });
        node.add_output("", data_type);
        node
    }

    /// Creates a variable node; readable declarations get an output, writable ones an input
    pub fn variable(declaration: &VariableDeclaration, position: Pos2) -> Self {
        let mut node = Self::new(
            declaration.name.clone(),
            position,
            NodeKind::Variable {
                declaration: declaration.id,
            },
        );
        node.rebuild_variable_ports(declaration);
        node
    }

    /// Creates an entry portal with one input
    pub fn entry_portal(declaration: ElementId, name: impl Into<String>, data_type: DataType, position: Pos2) -> Self {
        let mut node = Self::new(name, position, NodeKind::EntryPortal { declaration });
        node.add_input("", data_type);
        node
    }

    /// Creates an exit portal with one output
    pub fn exit_portal(declaration: ElementId, name: impl Into<String>, data_type: DataType, position: Pos2) -> Self {
        let mut node = Self::new(name, position, NodeKind::ExitPortal { declaration });
        node.add_output("", data_type);
        node
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        self.inputs.push(PortModel::input(name, data_type));
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        self.outputs.push(PortModel::output(name, data_type));
        self
    }

    /// Replaces the ports of a variable node after its declaration changed
    pub fn rebuild_variable_ports(&mut self, declaration: &VariableDeclaration) {
        self.inputs.clear();
        self.outputs.clear();
        if matches!(declaration.modifiers, VariableModifiers::Write | VariableModifiers::ReadWrite) {
            self.add_input("", declaration.data_type);
        }
        if matches!(declaration.modifiers, VariableModifiers::Read | VariableModifiers::ReadWrite) {
            self.add_output("", declaration.data_type);
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    /// Port on the given side at the given index
    pub fn port(&self, direction: Direction, index: usize) -> Option<&PortModel> {
        match direction {
            Direction::Input => self.inputs.get(index),
            Direction::Output => self.outputs.get(index),
        }
    }

    pub fn port_mut(&mut self, direction: Direction, index: usize) -> Option<&mut PortModel> {
        match direction {
            Direction::Input => self.inputs.get_mut(index),
            Direction::Output => self.outputs.get_mut(index),
        }
    }

    /// Reference to the first input port, if any
    pub fn first_input(&self) -> Option<PortRef> {
        (!self.inputs.is_empty()).then(|| PortRef::input(self.id, 0))
    }

    /// Reference to the first output port, if any
    pub fn first_output(&self) -> Option<PortRef> {
        (!self.outputs.is_empty()).then(|| PortRef::output(self.id, 0))
    }

    /// Every port of this node, inputs first
    pub fn port_refs(&self) -> impl Iterator<Item = PortRef> + '_ {
        let inputs = (0..self.inputs.len()).map(|i| PortRef::input(self.id, i));
        let outputs = (0..self.outputs.len()).map(|i| PortRef::output(self.id, i));
        inputs.chain(outputs)
    }

    /// Whether connecting this node again duplicates it instead of fanning out
    pub fn is_itemizable(&self, options: ItemizeOptions) -> bool {
        match self.kind {
            NodeKind::Constant { .. } => options.constants,
            NodeKind::Variable { .. } => options.variables,
            _ => false,
        }
    }

    /// Copy of this node with a fresh id, shifted by `offset`
    pub fn duplicate(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.id = ElementId::new();
        copy.position = self.position + offset;
        copy
    }
}
