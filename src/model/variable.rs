//! Graph variable and portal declarations

use super::id::ElementId;
use super::port::{ConstantValue, DataType};
use serde::{Deserialize, Serialize};

/// Whether variable nodes read, write, or do both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VariableModifiers {
    #[default]
    Read,
    Write,
    ReadWrite,
}

/// A variable declared on the graph, shown in the blackboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub id: ElementId,
    pub name: String,
    pub data_type: DataType,
    /// Exposed variables are editable from outside the graph
    pub exposed: bool,
    pub tooltip: String,
    pub modifiers: VariableModifiers,
    pub default_value: Option<ConstantValue>,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            data_type,
            exposed: false,
            tooltip: String::new(),
            modifiers: VariableModifiers::Read,
            default_value: ConstantValue::default_for(data_type),
        }
    }

    pub fn with_modifiers(mut self, modifiers: VariableModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_exposed(mut self, exposed: bool) -> Self {
        self.exposed = exposed;
        self
    }
}

/// Shared identity of an entry portal and its exit portals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalDeclaration {
    pub id: ElementId,
    pub name: String,
}

impl PortalDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
        }
    }
}
