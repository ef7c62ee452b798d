//! Placemat commands

use super::{existing, Command};
use crate::constants;
use crate::error::{GraphError, GraphResult};
use crate::model::ElementId;
use crate::state::{EditorState, StateComponent};
use egui::Rect;
use log::debug;
use std::collections::HashSet;

/// Creates a placemat on top of the existing ones
#[derive(Debug, Clone)]
pub struct CreatePlacematCommand {
    pub title: Option<String>,
    pub rect: Rect,
}

impl CreatePlacematCommand {
    pub fn new(rect: Rect) -> Self {
        Self { title: None, rect }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        state.push_undo(command);

        let title = command
            .title
            .as_deref()
            .unwrap_or(constants::placemat::DEFAULT_TITLE);
        let mut graph_updater = state.graph_view.updater();
        let id = graph_updater.graph_model_mut().create_placemat(title, command.rect);
        graph_updater.mark_new(id);
        Ok(())
    }
}

impl Command for CreatePlacematCommand {
    fn label(&self) -> String {
        "Create Placemat".to_string()
    }
}

/// Assigns new stacking orders to placemats.
///
/// The pairing is checked when the command is built: there must be one
/// z-order per placemat and no z-order may repeat.
#[derive(Debug, Clone)]
pub struct ChangePlacematZOrdersCommand {
    placemats: Vec<ElementId>,
    z_orders: Vec<i32>,
}

impl ChangePlacematZOrdersCommand {
    pub fn new(placemats: Vec<ElementId>, z_orders: Vec<i32>) -> GraphResult<Self> {
        if placemats.len() != z_orders.len() {
            return Err(GraphError::ZOrderCountMismatch {
                z_orders: z_orders.len(),
                placemats: placemats.len(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = z_orders.iter().find(|z| !seen.insert(**z)) {
            return Err(GraphError::DuplicateZOrder(*duplicate));
        }
        Ok(Self { placemats, z_orders })
    }

    pub fn placemats(&self) -> &[ElementId] {
        &self.placemats
    }

    pub fn z_orders(&self) -> &[i32] {
        &self.z_orders
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let changes: Vec<(ElementId, i32)> = command
            .placemats
            .iter()
            .copied()
            .zip(command.z_orders.iter().copied())
            .filter(|(id, z)| model.placemat(*id).is_some_and(|p| p.z_order != *z))
            .collect();
        if changes.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for (id, z_order) in changes {
            if let Some(placemat) = graph_updater.graph_model_mut().placemat_mut(id) {
                placemat.z_order = z_order;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for ChangePlacematZOrdersCommand {
    fn label(&self) -> String {
        "Change Placemat Order".to_string()
    }
}

/// Collapses a placemat, hiding the elements it covers, or expands it again
#[derive(Debug, Clone)]
pub struct CollapsePlacematCommand {
    pub placemat: ElementId,
    pub collapse: bool,
    /// Elements to hide; ignored when expanding
    pub hidden_elements: Vec<ElementId>,
}

impl CollapsePlacematCommand {
    pub fn new(placemat: ElementId, collapse: bool, hidden_elements: Vec<ElementId>) -> Self {
        Self {
            placemat,
            collapse,
            hidden_elements,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let model = state.graph_model();
        let Some(placemat) = model.placemat(command.placemat) else {
            debug!("Placemat {} does not exist", command.placemat);
            return Ok(());
        };
        let hidden = if command.collapse {
            existing(&command.hidden_elements, |id| {
                id != command.placemat && model.contains(id)
            })
        } else {
            vec![]
        };
        if placemat.collapsed == command.collapse && placemat.hidden_elements == hidden {
            return Ok(());
        }
        let previously_hidden = placemat.hidden_elements.clone();

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        if let Some(placemat) = graph_updater.graph_model_mut().placemat_mut(command.placemat) {
            placemat.collapsed = command.collapse;
            placemat.hidden_elements = hidden.clone();
        }
        graph_updater.mark_changed(command.placemat);
        graph_updater.mark_changed_all(previously_hidden);
        graph_updater.mark_changed_all(hidden);
        Ok(())
    }
}

impl Command for CollapsePlacematCommand {
    fn label(&self) -> String {
        if self.collapse {
            "Collapse Placemat".to_string()
        } else {
            "Expand Placemat".to_string()
        }
    }
}
