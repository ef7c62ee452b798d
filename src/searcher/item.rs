//! Searcher items: categories and creatable leaves

use crate::error::{GraphError, GraphResult};
use crate::model::{DataType, ElementId, GraphModel, PortRef};
use egui::Pos2;
use std::fmt;
use std::sync::Arc;

/// Where the searcher was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationTarget {
    /// Empty canvas
    #[default]
    Graph,
    /// Dragged out of a port; the new node is connected to it
    Port(PortRef),
    /// Dropped on an edge; the new node is spliced into it
    Edge(ElementId),
}

/// Parameters handed to an item factory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeCreationContext {
    pub position: Pos2,
    /// Pre-generated id for the main created element
    pub guid: Option<ElementId>,
    pub target: CreationTarget,
}

impl NodeCreationContext {
    pub fn at(position: Pos2) -> Self {
        Self {
            position,
            guid: None,
            target: CreationTarget::Graph,
        }
    }

    pub fn with_guid(mut self, guid: ElementId) -> Self {
        self.guid = Some(guid);
        self
    }

    pub fn with_target(mut self, target: CreationTarget) -> Self {
        self.target = target;
        self
    }
}

/// Creates the elements of a leaf item, returning their ids (main node first)
pub type ItemFactory = Arc<dyn Fn(&mut GraphModel, &NodeCreationContext) -> Vec<ElementId> + Send + Sync>;

/// What filters look at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemMetadata {
    pub description: String,
    pub input_types: Vec<DataType>,
    pub output_types: Vec<DataType>,
    pub tags: Vec<String>,
}

/// A node of the searcher tree
#[derive(Clone)]
pub struct SearcherItem {
    /// Last path segment
    pub name: String,
    /// Full path, segments joined with '/'
    pub path: String,
    pub metadata: ItemMetadata,
    pub children: Vec<SearcherItem>,
    factory: Option<ItemFactory>,
}

impl SearcherItem {
    pub fn category(path: &str) -> Self {
        Self {
            name: last_segment(path).to_string(),
            path: path.to_string(),
            metadata: ItemMetadata::default(),
            children: vec![],
            factory: None,
        }
    }

    pub fn leaf(path: &str, metadata: ItemMetadata, factory: ItemFactory) -> Self {
        Self {
            name: last_segment(path).to_string(),
            path: path.to_string(),
            metadata,
            children: vec![],
            factory: Some(factory),
        }
    }

    pub fn is_category(&self) -> bool {
        self.factory.is_none()
    }

    pub fn is_creatable(&self) -> bool {
        self.factory.is_some()
    }

    /// Runs the factory against `graph`
    pub fn create(&self, graph: &mut GraphModel, context: &NodeCreationContext) -> GraphResult<Vec<ElementId>> {
        match &self.factory {
            Some(factory) => Ok(factory(graph, context)),
            None => Err(GraphError::NotCreatable(self.path.clone())),
        }
    }

    /// This item and all its descendants, depth first
    pub fn walk(&self) -> Vec<&SearcherItem> {
        let mut items = vec![self];
        for child in &self.children {
            items.extend(child.walk());
        }
        items
    }

    pub fn find(&self, path: &str) -> Option<&SearcherItem> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

impl fmt::Debug for SearcherItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearcherItem")
            .field("path", &self.path)
            .field("creatable", &self.is_creatable())
            .field("children", &self.children.len())
            .finish()
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
