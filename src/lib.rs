//! Nodle command library
//!
//! Editing kernel for node-graph editors: commands dispatched against an
//! explicit editor state, change tracking for incremental view refresh,
//! snapshot undo, and the searcher used to insert nodes.

// Public modules
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod searcher;
pub mod state;

// Re-export commonly used types
pub use commands::{Command, CommandDispatcher, StateObserver};
pub use config::Preferences;
pub use error::{GraphError, GraphResult};
pub use model::{DataType, ElementId, GraphModel, NodeModel, PortRef};
pub use searcher::{SearcherDatabase, SearcherFilter, SearcherItem};
pub use state::{EditorState, StateComponent};
