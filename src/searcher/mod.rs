//! Searcher - hierarchical item picker creating nodes on selection

pub mod builtin;
pub mod database;
pub mod definition;
pub mod filter;
pub mod item;

pub use database::{SearchResult, SearcherDatabase, SearcherDatabaseBuilder};
pub use definition::{NodeCategory, OperationDefinition, PortDefinition};
pub use filter::SearcherFilter;
pub use item::{CreationTarget, ItemFactory, ItemMetadata, NodeCreationContext, SearcherItem};
