//! Statically registered catalog of searcher items and the search over it

use super::definition::OperationDefinition;
use super::filter::SearcherFilter;
use super::item::{ItemFactory, ItemMetadata, NodeCreationContext, SearcherItem};
use crate::model::{
    ConstantValue, DataType, GraphModel, NodeModel, VariableDeclaration, VariableModifiers,
};
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Collects leaves by path, then groups them into a category tree
#[derive(Default)]
pub struct SearcherDatabaseBuilder {
    leaves: BTreeMap<String, SearcherItem>,
}

impl SearcherDatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a leaf; a later item with the same path replaces the earlier one
    pub fn add_item(mut self, path: &str, metadata: ItemMetadata, factory: ItemFactory) -> Self {
        if self
            .leaves
            .insert(path.to_string(), SearcherItem::leaf(path, metadata, factory))
            .is_some()
        {
            debug!("Searcher item {} registered twice", path);
        }
        self
    }

    pub fn add_operation(self, definition: OperationDefinition) -> Self {
        let metadata = ItemMetadata {
            description: definition.description.clone(),
            input_types: definition.inputs.iter().map(|p| p.data_type).collect(),
            output_types: definition.outputs.iter().map(|p| p.data_type).collect(),
            tags: definition.tags.clone(),
        };
        let path = definition.path();
        let factory: ItemFactory = Arc::new(move |graph: &mut GraphModel, context: &NodeCreationContext| {
            vec![graph.add_node(definition.instantiate(context.position, context.guid))]
        });
        self.add_item(&path, metadata, factory)
    }

    /// One "Constants/<Type>" item per literal type
    pub fn add_constants(mut self) -> Self {
        for data_type in DataType::constant_types() {
            let Some(value) = ConstantValue::default_for(data_type) else {
                continue;
            };
            let metadata = ItemMetadata {
                description: format!("{} constant", data_type),
                input_types: vec![],
                output_types: vec![data_type],
                tags: vec!["constant".to_string()],
            };
            let factory: ItemFactory = Arc::new(move |graph: &mut GraphModel, context: &NodeCreationContext| {
                let mut node = NodeModel::constant(value.clone(), context.position);
                if let Some(id) = context.guid {
                    node.id = id;
                }
                vec![graph.add_node(node)]
            });
            self = self.add_item(&format!("Constants/{}", data_type), metadata, factory);
        }
        self
    }

    /// One "Variables/<name>" item per declaration of `graph`
    pub fn add_graph_variables(mut self, graph: &GraphModel) -> Self {
        for declaration in graph.variables() {
            self = self.add_variable(declaration);
        }
        self
    }

    fn add_variable(self, declaration: &VariableDeclaration) -> Self {
        let readable = declaration.modifiers != VariableModifiers::Write;
        let writable = declaration.modifiers != VariableModifiers::Read;
        let metadata = ItemMetadata {
            description: declaration.tooltip.clone(),
            input_types: if writable { vec![declaration.data_type] } else { vec![] },
            output_types: if readable { vec![declaration.data_type] } else { vec![] },
            tags: vec!["variable".to_string()],
        };
        let declaration_id = declaration.id;
        let factory: ItemFactory = Arc::new(move |graph: &mut GraphModel, context: &NodeCreationContext| {
            // The declaration may have been deleted since the database was built
            let Some(declaration) = graph.variable(declaration_id) else {
                return vec![];
            };
            let mut node = NodeModel::variable(declaration, context.position);
            if let Some(id) = context.guid {
                node.id = id;
            }
            vec![graph.add_node(node)]
        });
        self.add_item(&format!("Variables/{}", declaration.name), metadata, factory)
    }

    pub fn build(self) -> SearcherDatabase {
        let mut roots: Vec<SearcherItem> = Vec::new();
        for (path, leaf) in self.leaves {
            let segments: Vec<&str> = path.split('/').collect();
            insert_leaf(&mut roots, &segments, 0, leaf);
        }
        debug!("Built searcher database with {} root item(s)", roots.len());
        SearcherDatabase { roots }
    }
}

fn insert_leaf(items: &mut Vec<SearcherItem>, segments: &[&str], depth: usize, leaf: SearcherItem) {
    if depth + 1 >= segments.len() {
        items.push(leaf);
        return;
    }
    let category_path = segments[..=depth].join("/");
    let index = match items
        .iter()
        .position(|item| item.is_category() && item.path == category_path)
    {
        Some(index) => index,
        None => {
            items.push(SearcherItem::category(&category_path));
            items.len() - 1
        }
    };
    insert_leaf(&mut items[index].children, segments, depth + 1, leaf);
}

/// A scored search hit
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub item: &'a SearcherItem,
    pub score: u32,
}

/// Category tree of everything the searcher can create
#[derive(Debug, Clone, Default)]
pub struct SearcherDatabase {
    roots: Vec<SearcherItem>,
}

impl SearcherDatabase {
    pub fn builder() -> SearcherDatabaseBuilder {
        SearcherDatabaseBuilder::new()
    }

    /// Built-in operations and constants
    pub fn builtin() -> Self {
        Self::builtin_builder().build()
    }

    /// Built-in items plus the variables of `graph`
    pub fn for_graph(graph: &GraphModel) -> Self {
        Self::builtin_builder().add_graph_variables(graph).build()
    }

    fn builtin_builder() -> SearcherDatabaseBuilder {
        super::builtin::operations()
            .into_iter()
            .fold(Self::builder(), SearcherDatabaseBuilder::add_operation)
            .add_constants()
    }

    pub fn roots(&self) -> &[SearcherItem] {
        &self.roots
    }

    pub fn find(&self, path: &str) -> Option<&SearcherItem> {
        self.roots.iter().find_map(|root| root.find(path))
    }

    /// Every creatable item, in path order
    pub fn leaves(&self) -> Vec<&SearcherItem> {
        let mut leaves: Vec<&SearcherItem> = self
            .roots
            .iter()
            .flat_map(|root| root.walk())
            .filter(|item| item.is_creatable())
            .collect();
        leaves.sort_by(|a, b| a.path.cmp(&b.path));
        leaves
    }

    /// Leaves accepted by `filter` and matching `query`, best first.
    ///
    /// An empty query lists everything the filter accepts.
    pub fn search(&self, query: &str, filter: &SearcherFilter) -> Vec<SearchResult<'_>> {
        let query = query.trim().to_lowercase();
        let mut results: Vec<SearchResult<'_>> = self
            .leaves()
            .into_iter()
            .filter(|item| filter.matches(item))
            .filter_map(|item| score(item, &query).map(|score| SearchResult { item, score }))
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.item.path.cmp(&b.item.path)));
        results
    }
}

fn score(item: &SearcherItem, query: &str) -> Option<u32> {
    if query.is_empty() {
        return Some(0);
    }
    let name = item.name.to_lowercase();
    if name == query {
        Some(100)
    } else if name.starts_with(query) {
        Some(75)
    } else if name.contains(query) {
        Some(50)
    } else if item.path.to_lowercase().contains(query) {
        Some(25)
    } else if item.metadata.tags.iter().any(|t| t.to_lowercase() == query) {
        Some(10)
    } else {
        None
    }
}
