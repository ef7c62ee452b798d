//! Port types and functionality for node connections

use super::id::ElementId;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Returns the direction an edge endpoint on the other side must have
    pub fn opposite(self) -> Self {
        match self {
            Direction::Input => Direction::Output,
            Direction::Output => Direction::Input,
        }
    }
}

/// How many edges a port accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortCapacity {
    /// At most one edge; connecting another replaces the existing one
    Single,
    /// Any number of edges
    Multi,
}

/// Data types that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Floating point number
    Float,
    /// Whole number
    Integer,
    /// Boolean value
    Boolean,
    /// Text string
    String,
    /// 3D vector (x, y, z)
    Vector3,
    /// RGBA color value
    Color,
    /// Control flow, not data
    Execution,
    /// Any type (for generic ports)
    Any,
}

impl DataType {
    /// Check if this data type can connect to another
    pub fn can_connect_to(&self, other: &DataType) -> bool {
        if *self == DataType::Execution || *other == DataType::Execution {
            return self == other;
        }
        self == other || *self == DataType::Any || *other == DataType::Any
    }

    /// Get a human-readable name for this data type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Float => "Float",
            DataType::Integer => "Integer",
            DataType::Boolean => "Boolean",
            DataType::String => "String",
            DataType::Vector3 => "Vector3",
            DataType::Color => "Color",
            DataType::Execution => "Execution",
            DataType::Any => "Any",
        }
    }

    /// Get a color representing this data type
    pub fn color(&self) -> Color32 {
        match self {
            DataType::Float => Color32::from_rgb(100, 150, 255),
            DataType::Integer => Color32::from_rgb(80, 200, 220),
            DataType::Boolean => Color32::from_rgb(255, 100, 255),
            DataType::String => Color32::from_rgb(100, 255, 100),
            DataType::Vector3 => Color32::from_rgb(255, 100, 100),
            DataType::Color => Color32::from_rgb(255, 200, 100),
            DataType::Execution => Color32::from_rgb(230, 230, 230),
            DataType::Any => Color32::from_rgb(150, 150, 150),
        }
    }

    /// Every concrete type a constant can hold
    pub fn constant_types() -> [DataType; 6] {
        [
            DataType::Float,
            DataType::Integer,
            DataType::Boolean,
            DataType::String,
            DataType::Vector3,
            DataType::Color,
        ]
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A literal value held by constant nodes, variable defaults and unconnected inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantValue {
    Float(f32),
    Integer(i64),
    Boolean(bool),
    String(String),
    Vector3([f32; 3]),
    Color([u8; 4]),
}

impl ConstantValue {
    pub fn data_type(&self) -> DataType {
        match self {
            ConstantValue::Float(_) => DataType::Float,
            ConstantValue::Integer(_) => DataType::Integer,
            ConstantValue::Boolean(_) => DataType::Boolean,
            ConstantValue::String(_) => DataType::String,
            ConstantValue::Vector3(_) => DataType::Vector3,
            ConstantValue::Color(_) => DataType::Color,
        }
    }

    /// Zero value for a type; `None` for types that cannot hold a literal
    pub fn default_for(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Float => Some(ConstantValue::Float(0.0)),
            DataType::Integer => Some(ConstantValue::Integer(0)),
            DataType::Boolean => Some(ConstantValue::Boolean(false)),
            DataType::String => Some(ConstantValue::String(String::new())),
            DataType::Vector3 => Some(ConstantValue::Vector3([0.0; 3])),
            DataType::Color => Some(ConstantValue::Color([255, 255, 255, 255])),
            DataType::Execution | DataType::Any => None,
        }
    }
}

/// Represents a connection point on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortModel {
    pub name: String,
    pub direction: Direction,
    pub capacity: PortCapacity,
    pub data_type: DataType,
    /// Value used when an input is left unconnected
    pub constant: Option<ConstantValue>,
}

impl PortModel {
    /// Creates an input port; data inputs accept one edge, execution inputs many
    pub fn input(name: impl Into<String>, data_type: DataType) -> Self {
        let capacity = if data_type == DataType::Execution {
            PortCapacity::Multi
        } else {
            PortCapacity::Single
        };
        Self {
            name: name.into(),
            direction: Direction::Input,
            capacity,
            data_type,
            constant: ConstantValue::default_for(data_type),
        }
    }

    /// Creates an output port; data outputs fan out, execution outputs do not
    pub fn output(name: impl Into<String>, data_type: DataType) -> Self {
        let capacity = if data_type == DataType::Execution {
            PortCapacity::Single
        } else {
            PortCapacity::Multi
        };
        Self {
            name: name.into(),
            direction: Direction::Output,
            capacity,
            data_type,
            constant: None,
        }
    }

    pub fn with_capacity(mut self, capacity: PortCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Checks if this port is an input
    pub fn is_input(&self) -> bool {
        matches!(self.direction, Direction::Input)
    }

    /// Checks if this port is an output
    pub fn is_output(&self) -> bool {
        matches!(self.direction, Direction::Output)
    }
}

/// Addresses one port of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub node: ElementId,
    pub direction: Direction,
    pub index: usize,
}

impl PortRef {
    pub fn input(node: ElementId, index: usize) -> Self {
        Self {
            node,
            direction: Direction::Input,
            index,
        }
    }

    pub fn output(node: ElementId, index: usize) -> Self {
        Self {
            node,
            direction: Direction::Output,
            index,
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Direction::Input => "in",
            Direction::Output => "out",
        };
        write!(f, "{}:{}{}", self.node, side, self.index)
    }
}
