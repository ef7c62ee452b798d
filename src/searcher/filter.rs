//! Composable predicates deciding which items a search context offers

use super::item::SearcherItem;
use crate::model::DataType;
use std::fmt;
use std::ops::Not;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&SearcherItem) -> bool + Send + Sync>;

/// Predicate over searcher items
#[derive(Clone)]
pub struct SearcherFilter {
    predicate: Predicate,
}

impl SearcherFilter {
    pub fn new(predicate: impl Fn(&SearcherItem) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Accepts every item
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &SearcherItem) -> bool {
        (self.predicate)(item)
    }

    pub fn and(self, other: SearcherFilter) -> Self {
        Self::new(move |item| self.matches(item) && other.matches(item))
    }

    pub fn or(self, other: SearcherFilter) -> Self {
        Self::new(move |item| self.matches(item) || other.matches(item))
    }

    /// Canvas context: anything that creates something
    pub fn for_graph() -> Self {
        Self::new(SearcherItem::is_creatable)
    }

    /// Dragged out of an input port: items with an output feeding it
    pub fn for_input_port(port_type: DataType) -> Self {
        Self::for_graph().and(Self::new(move |item| {
            item.metadata
                .output_types
                .iter()
                .any(|output| output.can_connect_to(&port_type))
        }))
    }

    /// Dragged out of an output port: items with an input accepting it
    pub fn for_output_port(port_type: DataType) -> Self {
        Self::for_graph().and(Self::new(move |item| {
            item.metadata
                .input_types
                .iter()
                .any(|input| port_type.can_connect_to(input))
        }))
    }

    /// Dropped on an edge: items that can sit in the middle of it
    pub fn for_edge(edge_type: DataType) -> Self {
        Self::for_input_port(edge_type).and(Self::for_output_port(edge_type))
    }

    pub fn with_tag(tag: &str) -> Self {
        let tag = tag.to_lowercase();
        Self::new(move |item| item.metadata.tags.iter().any(|t| t.to_lowercase() == tag))
    }
}

impl Not for SearcherFilter {
    type Output = SearcherFilter;

    fn not(self) -> Self::Output {
        Self::new(move |item| !self.matches(item))
    }
}

impl Default for SearcherFilter {
    fn default() -> Self {
        Self::for_graph()
    }
}

impl fmt::Debug for SearcherFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SearcherFilter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::searcher::item::{ItemFactory, ItemMetadata};

    fn leaf(inputs: Vec<DataType>, outputs: Vec<DataType>, tags: &[&str]) -> SearcherItem {
        let factory: ItemFactory = Arc::new(|_, _| vec![]);
        let metadata = ItemMetadata {
            description: String::new(),
            input_types: inputs,
            output_types: outputs,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        SearcherItem::leaf("Test/Leaf", metadata, factory)
    }

    #[test]
    fn test_port_filters() {
        let to_string = leaf(vec![DataType::Float], vec![DataType::String], &[]);
        assert!(SearcherFilter::for_output_port(DataType::Float).matches(&to_string));
        assert!(!SearcherFilter::for_output_port(DataType::String).matches(&to_string));
        assert!(SearcherFilter::for_input_port(DataType::String).matches(&to_string));
        assert!(!SearcherFilter::for_edge(DataType::Float).matches(&to_string));
    }

    #[test]
    fn test_categories_are_not_offered() {
        let category = SearcherItem::category("Math");
        assert!(!SearcherFilter::for_graph().matches(&category));
        assert!(SearcherFilter::all().matches(&category));
    }

    #[test]
    fn test_combinators() {
        let item = leaf(vec![], vec![DataType::Boolean], &["Logic"]);
        let logic = SearcherFilter::with_tag("logic");
        let float_source = SearcherFilter::for_input_port(DataType::Float);

        assert!(logic.clone().or(float_source.clone()).matches(&item));
        assert!(!logic.clone().and(float_source.clone()).matches(&item));
        assert!((!float_source).matches(&item));
        assert!(!(!logic).matches(&item));
    }
}
