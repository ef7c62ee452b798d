//! Sticky note commands

use super::{existing, Command};
use crate::constants;
use crate::error::GraphResult;
use crate::model::{ElementId, StickyNoteTextSize, StickyNoteTheme};
use crate::state::{EditorState, StateComponent};
use egui::{Pos2, Rect};

/// Creates an empty sticky note of the default size at `position`
#[derive(Debug, Clone)]
pub struct CreateStickyNoteCommand {
    pub position: Pos2,
}

impl CreateStickyNoteCommand {
    pub fn new(position: Pos2) -> Self {
        Self { position }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        state.push_undo(command);

        let rect = Rect::from_min_size(command.position, constants::sticky_note::DEFAULT_SIZE);
        let mut graph_updater = state.graph_view.updater();
        let id = graph_updater.graph_model_mut().create_sticky_note(rect);
        graph_updater.mark_new(id);
        Ok(())
    }
}

impl Command for CreateStickyNoteCommand {
    fn label(&self) -> String {
        "Create Sticky Note".to_string()
    }
}

/// Edits the title and/or contents of a note. `None` leaves a field as is.
#[derive(Debug, Clone)]
pub struct UpdateStickyNoteCommand {
    pub note: ElementId,
    pub title: Option<String>,
    pub contents: Option<String>,
}

impl UpdateStickyNoteCommand {
    pub fn new(note: ElementId) -> Self {
        Self {
            note,
            title: None,
            contents: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let Some(note) = state.graph_model().sticky_note(command.note) else {
            return Ok(());
        };
        let title_changed = command.title.as_ref().is_some_and(|t| *t != note.title);
        let contents_changed = command.contents.as_ref().is_some_and(|c| *c != note.contents);
        if !title_changed && !contents_changed {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(note) = graph_updater.graph_model_mut().sticky_note_mut(command.note) {
            if let Some(title) = &command.title {
                note.title = title.clone();
            }
            if let Some(contents) = &command.contents {
                note.contents = contents.clone();
            }
        }
        graph_updater.mark_changed(command.note);
        Ok(())
    }
}

impl Command for UpdateStickyNoteCommand {
    fn label(&self) -> String {
        "Edit Sticky Note".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStickyNoteThemeCommand {
    pub notes: Vec<ElementId>,
    pub theme: StickyNoteTheme,
}

impl UpdateStickyNoteThemeCommand {
    pub fn new(notes: Vec<ElementId>, theme: StickyNoteTheme) -> Self {
        Self { notes, theme }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let notes = existing(&command.notes, |id| {
            model.sticky_note(id).is_some_and(|n| n.theme != command.theme)
        });
        if notes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in notes {
            if let Some(note) = graph_updater.graph_model_mut().sticky_note_mut(id) {
                note.theme = command.theme;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for UpdateStickyNoteThemeCommand {
    fn label(&self) -> String {
        "Change Sticky Note Theme".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStickyNoteTextSizeCommand {
    pub notes: Vec<ElementId>,
    pub text_size: StickyNoteTextSize,
}

impl UpdateStickyNoteTextSizeCommand {
    pub fn new(notes: Vec<ElementId>, text_size: StickyNoteTextSize) -> Self {
        Self { notes, text_size }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let notes = existing(&command.notes, |id| {
            model.sticky_note(id).is_some_and(|n| n.text_size != command.text_size)
        });
        if notes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in notes {
            if let Some(note) = graph_updater.graph_model_mut().sticky_note_mut(id) {
                note.text_size = command.text_size;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for UpdateStickyNoteTextSizeCommand {
    fn label(&self) -> String {
        "Change Sticky Note Text Size".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModel;

    fn state_with_note() -> (EditorState, ElementId) {
        let mut state = EditorState::new(GraphModel::new("test"));
        let command = CreateStickyNoteCommand::new(Pos2::new(10.0, 20.0));
        CreateStickyNoteCommand::default_handler(&mut state, &command).unwrap();
        let id = state.graph_model().sticky_notes()[0].id;
        (state, id)
    }

    #[test]
    fn test_create_uses_default_size() {
        let (state, id) = state_with_note();
        let note = state.graph_model().sticky_note(id).unwrap();
        assert_eq!(note.rect.min, Pos2::new(10.0, 20.0));
        assert_eq!(note.rect.size(), constants::sticky_note::DEFAULT_SIZE);
        assert!(state.graph_view.changes_since(0).changeset.new_models().contains(&id));
    }

    #[test]
    fn test_update_only_given_fields() {
        let (mut state, id) = state_with_note();
        let command = UpdateStickyNoteCommand::new(id).with_title("Todo");
        UpdateStickyNoteCommand::default_handler(&mut state, &command).unwrap();
        UpdateStickyNoteCommand::default_handler(&mut state, &command).unwrap();

        let note = state.graph_model().sticky_note(id).unwrap();
        assert_eq!(note.title, "Todo");
        assert!(note.contents.is_empty());
        assert_eq!(state.undo_history().len(), 2);
    }

    #[test]
    fn test_theme_and_text_size() {
        let (mut state, id) = state_with_note();
        let theme = UpdateStickyNoteThemeCommand::new(vec![id, id], StickyNoteTheme::Teal);
        UpdateStickyNoteThemeCommand::default_handler(&mut state, &theme).unwrap();
        let size = UpdateStickyNoteTextSizeCommand::new(vec![id], StickyNoteTextSize::default());
        UpdateStickyNoteTextSizeCommand::default_handler(&mut state, &size).unwrap();

        let note = state.graph_model().sticky_note(id).unwrap();
        assert_eq!(note.theme, StickyNoteTheme::Teal);
        // Creation plus the theme change; the text size was already the default
        assert_eq!(state.undo_history().len(), 2);
    }
}
