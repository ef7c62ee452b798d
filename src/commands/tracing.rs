//! Debugger tracing commands. View state only; nothing here is undoable.

use super::Command;
use crate::error::GraphResult;
use crate::state::{EditorState, StateComponent};
use log::debug;

#[derive(Debug, Clone)]
pub struct ActivateTracingCommand {
    pub enabled: bool,
}

impl ActivateTracingCommand {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if state.tracing.enabled == command.enabled {
            return Ok(());
        }
        let mut tracing_updater = state.tracing.updater();
        tracing_updater.enabled = command.enabled;
        if !command.enabled {
            tracing_updater.current_step = None;
        }
        tracing_updater.force_complete_update();
        Ok(())
    }
}

impl Command for ActivateTracingCommand {
    fn label(&self) -> String {
        if self.enabled {
            "Enable Tracing".to_string()
        } else {
            "Disable Tracing".to_string()
        }
    }
}

/// Moves the trace cursor to a frame, and a step within it
#[derive(Debug, Clone)]
pub struct SetTracingStepCommand {
    pub frame: u32,
    pub step: Option<u32>,
}

impl SetTracingStepCommand {
    pub fn new(frame: u32, step: Option<u32>) -> Self {
        Self { frame, step }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let tracing = &state.tracing;
        if tracing.current_frame == command.frame && tracing.current_step == command.step {
            return Ok(());
        }
        debug!("Tracing frame {} step {:?}", command.frame, command.step);
        let mut tracing_updater = state.tracing.updater();
        tracing_updater.current_frame = command.frame;
        tracing_updater.current_step = command.step;
        tracing_updater.force_complete_update();
        Ok(())
    }
}

impl Command for SetTracingStepCommand {
    fn label(&self) -> String {
        "Set Tracing Step".to_string()
    }
}

/// Picks which running instance the trace follows
#[derive(Debug, Clone)]
pub struct SelectTracingTargetCommand {
    pub target: Option<usize>,
}

impl SelectTracingTargetCommand {
    pub fn new(target: Option<usize>) -> Self {
        Self { target }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if state.tracing.target == command.target {
            return Ok(());
        }
        let mut tracing_updater = state.tracing.updater();
        tracing_updater.target = command.target;
        tracing_updater.current_step = None;
        tracing_updater.force_complete_update();
        Ok(())
    }
}

impl Command for SelectTracingTargetCommand {
    fn label(&self) -> String {
        "Select Tracing Target".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModel;
    use crate::state::UpdateType;

    #[test]
    fn test_activate_and_step() {
        let mut state = EditorState::new(GraphModel::new("test"));
        ActivateTracingCommand::default_handler(&mut state, &ActivateTracingCommand::new(true)).unwrap();
        SetTracingStepCommand::default_handler(&mut state, &SetTracingStepCommand::new(12, Some(3))).unwrap();

        assert!(state.tracing.enabled);
        assert_eq!(state.tracing.current_frame, 12);
        assert_eq!(state.tracing.current_step, Some(3));
        assert_eq!(state.tracing.version(), 2);
        assert_eq!(state.tracing.changes_since(1).update_type, UpdateType::Complete);
        assert!(state.undo_history().is_empty());
    }

    #[test]
    fn test_disable_resets_step() {
        let mut state = EditorState::new(GraphModel::new("test"));
        ActivateTracingCommand::default_handler(&mut state, &ActivateTracingCommand::new(true)).unwrap();
        SetTracingStepCommand::default_handler(&mut state, &SetTracingStepCommand::new(1, Some(1))).unwrap();
        ActivateTracingCommand::default_handler(&mut state, &ActivateTracingCommand::new(false)).unwrap();
        assert_eq!(state.tracing.current_step, None);
    }

    #[test]
    fn test_same_target_is_a_no_op() {
        let mut state = EditorState::new(GraphModel::new("test"));
        let command = SelectTracingTargetCommand::new(None);
        SelectTracingTargetCommand::default_handler(&mut state, &command).unwrap();
        assert_eq!(state.tracing.version(), 0);
    }
}
