//! Catalog definitions for operation nodes

use crate::model::{DataType, ElementId, NodeKind, NodeModel};
use egui::{Color32, Pos2};

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the full path as a slice
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get the parent category
    pub fn parent(&self) -> Option<NodeCategory> {
        if self.path.len() > 1 {
            Some(NodeCategory {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Searcher path of the category, segments joined with '/'
    pub fn display_string(&self) -> String {
        self.path.join("/")
    }

    /// Get standard math category
    pub fn math() -> Self {
        Self::new(&["Math"])
    }

    /// Get standard logic category
    pub fn logic() -> Self {
        Self::new(&["Logic"])
    }

    /// Get standard data category
    pub fn data() -> Self {
        Self::new(&["Data"])
    }

    /// Get standard output category
    pub fn output() -> Self {
        Self::new(&["Output"])
    }
}

/// Port definition for node creation
#[derive(Debug, Clone, PartialEq)]
pub struct PortDefinition {
    pub name: String,
    pub data_type: DataType,
    pub description: Option<String>,
}

impl PortDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            description: None,
        }
    }

    /// Add description to port
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Everything the searcher needs to list and create one operation node
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub node_type: String,
    pub display_name: String,
    pub category: NodeCategory,
    pub description: String,
    pub color: Option<Color32>,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
    pub tags: Vec<String>,
}

impl OperationDefinition {
    pub fn new(node_type: &str, display_name: &str, category: NodeCategory, description: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            display_name: display_name.to_string(),
            category,
            description: description.to_string(),
            color: None,
            inputs: vec![],
            outputs: vec![],
            tags: vec![],
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Searcher path, e.g. "Math/Add"
    pub fn path(&self) -> String {
        let category = self.category.display_string();
        if category.is_empty() {
            self.display_name.clone()
        } else {
            format!("{}/{}", category, self.display_name)
        }
    }

    /// Builds the node, using `id` when the caller pre-generated one
    pub fn instantiate(&self, position: Pos2, id: Option<ElementId>) -> NodeModel {
        let mut node = NodeModel::new(
            self.display_name.clone(),
            position,
            NodeKind::Operation {
                node_type: self.node_type.clone(),
            },
        );
        if let Some(id) = id {
            node.id = id;
        }
        node.color = self.color;
        for input in &self.inputs {
            node.add_input(input.name.clone(), input.data_type);
        }
        for output in &self.outputs {
            node.add_output(output.name.clone(), output.data_type);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_paths() {
        let category = NodeCategory::new(&["Math", "Trigonometry"]);
        assert_eq!(category.name(), "Trigonometry");
        assert_eq!(category.display_string(), "Math/Trigonometry");
        assert_eq!(category.parent(), Some(NodeCategory::math()));
        assert_eq!(NodeCategory::math().parent(), None);
    }

    #[test]
    fn test_instantiate_uses_ports_and_guid() {
        let definition = OperationDefinition::new("Add", "Add", NodeCategory::math(), "Adds")
            .with_inputs(vec![
                PortDefinition::new("A", DataType::Float),
                PortDefinition::new("B", DataType::Float),
            ])
            .with_outputs(vec![PortDefinition::new("Result", DataType::Float)]);
        let id = ElementId::new();
        let node = definition.instantiate(Pos2::new(5.0, 5.0), Some(id));

        assert_eq!(definition.path(), "Math/Add");
        assert_eq!(node.id, id);
        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs[0].name, "Result");
    }
}
