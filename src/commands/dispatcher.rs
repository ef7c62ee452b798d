//! Single entry point applying commands to editor state

use super::Command;
use crate::error::{GraphError, GraphResult};
use crate::state::EditorState;
use log::{debug, info, warn};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Signature of a command handler
pub type CommandHandler<C> = fn(&mut EditorState, &C) -> GraphResult<()>;

type ErasedHandler = Box<dyn Fn(&mut EditorState, &dyn Any) -> GraphResult<()>>;

struct RegisteredHandler {
    command_name: &'static str,
    handler: ErasedHandler,
}

/// Reads component change-sets after each dispatch (typically a view)
pub trait StateObserver {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called after every dispatch, including failed ones; the scopes a failed
    /// handler opened were still committed.
    fn observe(&mut self, state: &EditorState);
}

/// Routes each command to the handler registered for its concrete type
#[derive(Default)]
pub struct CommandDispatcher {
    handlers: HashMap<TypeId, RegisteredHandler>,
    observers: Vec<Box<dyn StateObserver>>,
    pre_dispatch_hooks: Vec<Box<dyn FnMut(&dyn Command)>>,
}

impl CommandDispatcher {
    /// Creates a dispatcher with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher with the default handler of every built-in command
    pub fn with_default_handlers() -> Self {
        let mut dispatcher = Self::new();
        super::register_default_handlers(&mut dispatcher);
        dispatcher
    }

    /// Registers (or replaces) the handler for command type `C`
    pub fn register_handler<C: Command>(&mut self, handler: CommandHandler<C>) {
        let command_name = short_type_name(std::any::type_name::<C>());
        let erased: ErasedHandler = Box::new(move |state, command| match command.downcast_ref::<C>() {
            Some(command) => handler(state, command),
            None => Err(GraphError::CommandTypeMismatch {
                expected: command_name,
            }),
        });
        let previous = self.handlers.insert(
            TypeId::of::<C>(),
            RegisteredHandler {
                command_name,
                handler: erased,
            },
        );
        if previous.is_some() {
            debug!("Replaced handler for {}", command_name);
        }
    }

    /// Whether a handler is registered for command type `C`
    pub fn has_handler<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Runs `hook` with every command before its handler
    pub fn add_pre_dispatch_hook(&mut self, hook: impl FnMut(&dyn Command) + 'static) {
        self.pre_dispatch_hooks.push(Box::new(hook));
    }

    pub fn register_observer(&mut self, observer: Box<dyn StateObserver>) {
        debug!("Registered observer {}", observer.name());
        self.observers.push(observer);
    }

    /// Applies one command synchronously.
    ///
    /// Unregistered command types are a programming error. Handler failures
    /// propagate as-is; nothing is rolled back.
    pub fn dispatch(&mut self, state: &mut EditorState, command: &dyn Command) -> GraphResult<()> {
        let type_id = command.as_any().type_id();
        let Some(entry) = self.handlers.get(&type_id) else {
            let command_name = short_type_name(command.type_name());
            warn!("No handler registered for {}", command_name);
            return Err(GraphError::UnregisteredCommand {
                command: command_name,
            });
        };

        if state.preferences.log_all_dispatched_commands {
            info!("Dispatching {} '{}'", entry.command_name, command.label());
        } else {
            debug!("Dispatching {} '{}'", entry.command_name, command.label());
        }

        for hook in &mut self.pre_dispatch_hooks {
            hook(command);
        }

        let result = (entry.handler)(state, command.as_any());
        if let Err(error) = &result {
            warn!("{} failed: {}", entry.command_name, error);
        }

        for observer in &mut self.observers {
            observer.observe(state);
        }

        result
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModel;
    use crate::state::StateComponent;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct RenameGraph(String);

    impl Command for RenameGraph {
        fn label(&self) -> String {
            "Rename Graph".to_string()
        }
    }

    #[derive(Debug)]
    struct Unregistered;

    impl Command for Unregistered {
        fn label(&self) -> String {
            "Nothing".to_string()
        }
    }

    fn rename_graph(state: &mut EditorState, command: &RenameGraph) -> GraphResult<()> {
        state.push_undo(command);
        let mut updater = state.graph_view.updater();
        updater.graph_model_mut().name = command.0.clone();
        updater.force_complete_update();
        Ok(())
    }

    struct VersionRecorder {
        seen: Rc<RefCell<Vec<u32>>>,
    }

    impl StateObserver for VersionRecorder {
        fn name(&self) -> &str {
            "version recorder"
        }

        fn observe(&mut self, state: &EditorState) {
            self.seen.borrow_mut().push(state.graph_view.version());
        }
    }

    #[test]
    fn test_dispatch_runs_registered_handler() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register_handler(rename_graph);
        assert!(dispatcher.has_handler::<RenameGraph>());

        let mut state = EditorState::new(GraphModel::new("before"));
        dispatcher
            .dispatch(&mut state, &RenameGraph("after".to_string()))
            .unwrap();
        assert_eq!(state.graph_model().name, "after");
        assert_eq!(state.undo_history().last_label(), Some("Rename Graph"));
    }

    #[test]
    fn test_unregistered_command_is_an_error() {
        let mut dispatcher = CommandDispatcher::new();
        let mut state = EditorState::new(GraphModel::new("graph"));
        let result = dispatcher.dispatch(&mut state, &Unregistered);
        assert!(matches!(
            result,
            Err(GraphError::UnregisteredCommand { command: "Unregistered" })
        ));
    }

    #[test]
    fn test_hooks_and_observers_run() {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register_handler(rename_graph);

        let labels = Rc::new(RefCell::new(Vec::new()));
        let hook_labels = labels.clone();
        dispatcher.add_pre_dispatch_hook(move |command| hook_labels.borrow_mut().push(command.label()));

        let seen = Rc::new(RefCell::new(Vec::new()));
        dispatcher.register_observer(Box::new(VersionRecorder { seen: seen.clone() }));

        let mut state = EditorState::new(GraphModel::new("graph"));
        dispatcher.dispatch(&mut state, &RenameGraph("a".into())).unwrap();
        dispatcher.dispatch(&mut state, &RenameGraph("b".into())).unwrap();

        assert_eq!(*labels.borrow(), ["Rename Graph", "Rename Graph"]);
        assert_eq!(*seen.borrow(), [1, 2]);
    }
}
