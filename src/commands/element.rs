//! Commands acting on any kind of graph element

use super::{delete_edges, delete_nodes, existing, unselect_removed, Command};
use crate::constants;
use crate::error::GraphResult;
use crate::model::{ElementId, ElementKind};
use crate::state::{EditorState, StateComponent};
use egui::{Color32, Rect, Vec2};
use log::debug;

/// Deletes nodes, edges, declarations, placemats and sticky notes
#[derive(Debug, Clone)]
pub struct DeleteElementsCommand {
    pub elements: Vec<ElementId>,
}

impl DeleteElementsCommand {
    pub fn new(elements: Vec<ElementId>) -> Self {
        Self { elements }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let elements = existing(&command.elements, |id| state.graph_model().contains(id));
        if elements.is_empty() {
            debug!("Nothing to delete");
            return Ok(());
        }

        state.push_undo(command);

        let mut removed = Vec::new();
        let mut removed_variables = Vec::new();
        {
            let mut graph_updater = state.graph_view.updater();
            for id in elements {
                let Some(kind) = graph_updater.graph_model().element_kind(id) else {
                    // Already gone with an earlier element (edges of a deleted node)
                    continue;
                };
                match kind {
                    ElementKind::Node => removed.extend(delete_nodes(&mut graph_updater, &[id])),
                    ElementKind::Edge => {
                        removed.extend(delete_edges(&mut graph_updater, &[id]).iter().map(|e| e.id))
                    }
                    ElementKind::Variable => {
                        let ids = graph_updater.graph_model_mut().delete_variable_declaration(id);
                        graph_updater.mark_deleted_all(ids.iter().copied());
                        removed.extend(ids);
                        removed_variables.push(id);
                    }
                    ElementKind::PortalDeclaration => {
                        let ids = graph_updater.graph_model_mut().delete_portal_declaration(id);
                        graph_updater.mark_deleted_all(ids.iter().copied());
                        removed.extend(ids);
                    }
                    ElementKind::Placemat => {
                        if graph_updater.graph_model_mut().delete_placemat(id).is_some() {
                            graph_updater.mark_deleted(id);
                            removed.push(id);
                        }
                    }
                    ElementKind::StickyNote => {
                        if graph_updater.graph_model_mut().delete_sticky_note(id).is_some() {
                            graph_updater.mark_deleted(id);
                            removed.push(id);
                        }
                    }
                }
            }
        }

        unselect_removed(state, &removed);

        let mut blackboard_updater = state.blackboard.updater();
        for id in removed_variables {
            if blackboard_updater.set_row_expanded(id, false) {
                blackboard_updater.mark_deleted(id);
            }
        }
        Ok(())
    }
}

impl Command for DeleteElementsCommand {
    fn label(&self) -> String {
        if self.elements.len() == 1 {
            "Delete Element".to_string()
        } else {
            "Delete Elements".to_string()
        }
    }
}

/// Moves nodes, placemats, sticky notes and edge control points by a delta
#[derive(Debug, Clone)]
pub struct MoveElementsCommand {
    pub elements: Vec<ElementId>,
    pub delta: Vec2,
}

impl MoveElementsCommand {
    pub fn new(elements: Vec<ElementId>, delta: Vec2) -> Self {
        Self { elements, delta }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if command.delta == Vec2::ZERO {
            debug!("Zero-length move ignored");
            return Ok(());
        }
        let elements = existing(&command.elements, |id| state.graph_model().contains(id));
        if elements.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        let delta = command.delta;
        for id in elements {
            let model = graph_updater.graph_model_mut();
            let moved = match model.element_kind(id) {
                Some(ElementKind::Node) => model.node_mut(id).map(|n| n.position += delta).is_some(),
                Some(ElementKind::Edge) => model
                    .edge_mut(id)
                    .map(|e| e.control_points.iter_mut().for_each(|p| p.position += delta))
                    .is_some(),
                Some(ElementKind::Placemat) => {
                    model.placemat_mut(id).map(|p| p.rect = p.rect.translate(delta)).is_some()
                }
                Some(ElementKind::StickyNote) => {
                    model.sticky_note_mut(id).map(|s| s.rect = s.rect.translate(delta)).is_some()
                }
                _ => false,
            };
            if moved {
                graph_updater.mark_changed(id);
            }
        }
        Ok(())
    }
}

impl Command for MoveElementsCommand {
    fn label(&self) -> String {
        "Move Elements".to_string()
    }
}

/// Renames a node, variable, portal, placemat or sticky note
#[derive(Debug, Clone)]
pub struct RenameElementCommand {
    pub element: ElementId,
    pub name: String,
}

impl RenameElementCommand {
    pub fn new(element: ElementId, name: impl Into<String>) -> Self {
        Self {
            element,
            name: name.into(),
        }
    }

    fn current_name(state: &EditorState, id: ElementId) -> Option<&str> {
        let model = state.graph_model();
        match model.element_kind(id)? {
            ElementKind::Node => model.node(id).map(|n| n.title.as_str()),
            ElementKind::Variable => model.variable(id).map(|v| v.name.as_str()),
            ElementKind::PortalDeclaration => model.portal_declaration(id).map(|p| p.name.as_str()),
            ElementKind::Placemat => model.placemat(id).map(|p| p.title.as_str()),
            ElementKind::StickyNote => model.sticky_note(id).map(|s| s.title.as_str()),
            ElementKind::Edge => None,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let name = command.name.trim();
        match Self::current_name(state, command.element) {
            Some(current) if current != name => {}
            _ => {
                debug!("Rename of {} ignored", command.element);
                return Ok(());
            }
        }

        state.push_undo(command);

        let id = command.element;
        let mut graph_updater = state.graph_view.updater();
        let model = graph_updater.graph_model_mut();
        match model.element_kind(id) {
            Some(ElementKind::Node) => {
                if let Some(node) = model.node_mut(id) {
                    node.title = name.to_string();
                }
            }
            Some(ElementKind::Variable) => {
                let nodes = model.rename_variable(id, name).unwrap_or_default();
                graph_updater.mark_changed_all(nodes);
            }
            Some(ElementKind::PortalDeclaration) => {
                if let Some(portal) = model.portal_declaration_mut(id) {
                    portal.name = name.to_string();
                }
                let nodes = model.portal_nodes(id);
                for node_id in &nodes {
                    if let Some(node) = model.node_mut(*node_id) {
                        node.title = name.to_string();
                    }
                }
                graph_updater.mark_changed_all(nodes);
            }
            Some(ElementKind::Placemat) => {
                if let Some(placemat) = model.placemat_mut(id) {
                    placemat.title = name.to_string();
                }
            }
            Some(ElementKind::StickyNote) => {
                if let Some(note) = model.sticky_note_mut(id) {
                    note.title = name.to_string();
                }
            }
            Some(ElementKind::Edge) | None => {}
        }
        graph_updater.mark_changed(id);
        Ok(())
    }
}

impl Command for RenameElementCommand {
    fn label(&self) -> String {
        "Rename Element".to_string()
    }
}

/// Sets a custom color on nodes and placemats
#[derive(Debug, Clone)]
pub struct ChangeElementColorCommand {
    pub elements: Vec<ElementId>,
    pub color: Color32,
}

impl ChangeElementColorCommand {
    pub fn new(elements: Vec<ElementId>, color: Color32) -> Self {
        Self { elements, color }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let color = command.color;
        let model = state.graph_model();
        let elements = existing(&command.elements, |id| {
            model.node(id).is_some_and(|n| n.color != Some(color))
                || model.placemat(id).is_some_and(|p| p.color != color)
        });
        if elements.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in elements {
            let model = graph_updater.graph_model_mut();
            if let Some(node) = model.node_mut(id) {
                node.color = Some(color);
            } else if let Some(placemat) = model.placemat_mut(id) {
                placemat.color = color;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for ChangeElementColorCommand {
    fn label(&self) -> String {
        "Change Color".to_string()
    }
}

/// Restores the default color of nodes and placemats
#[derive(Debug, Clone)]
pub struct ResetElementColorCommand {
    pub elements: Vec<ElementId>,
}

impl ResetElementColorCommand {
    pub fn new(elements: Vec<ElementId>) -> Self {
        Self { elements }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let default_color = constants::placemat::DEFAULT_COLOR;
        let model = state.graph_model();
        let elements = existing(&command.elements, |id| {
            model.node(id).is_some_and(|n| n.color.is_some())
                || model.placemat(id).is_some_and(|p| p.color != default_color)
        });
        if elements.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for id in elements {
            let model = graph_updater.graph_model_mut();
            if let Some(node) = model.node_mut(id) {
                node.color = None;
            } else if let Some(placemat) = model.placemat_mut(id) {
                placemat.color = default_color;
            }
            graph_updater.mark_changed(id);
        }
        Ok(())
    }
}

impl Command for ResetElementColorCommand {
    fn label(&self) -> String {
        "Reset Color".to_string()
    }
}

/// New bounds of one element. Nodes only take the position of `rect.min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLayout {
    pub element: ElementId,
    pub rect: Rect,
}

/// Applies a computed layout (auto-arrange, align, resize) in one undo step
#[derive(Debug, Clone)]
pub struct ChangeElementLayoutCommand {
    pub layouts: Vec<ElementLayout>,
}

impl ChangeElementLayoutCommand {
    pub fn new(layouts: Vec<ElementLayout>) -> Self {
        Self { layouts }
    }

    fn differs(state: &EditorState, layout: &ElementLayout) -> bool {
        let model = state.graph_model();
        let id = layout.element;
        match model.element_kind(id) {
            Some(ElementKind::Node) => model.node(id).is_some_and(|n| n.position != layout.rect.min),
            Some(ElementKind::Placemat) => model.placemat(id).is_some_and(|p| p.rect != layout.rect),
            Some(ElementKind::StickyNote) => model.sticky_note(id).is_some_and(|s| s.rect != layout.rect),
            _ => false,
        }
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        let layouts: Vec<ElementLayout> = command
            .layouts
            .iter()
            .filter(|layout| Self::differs(state, layout))
            .copied()
            .collect();
        if layouts.is_empty() {
            return Ok(());
        }

        state.push_undo(command);

        let mut graph_updater = state.graph_view.updater();
        for layout in layouts {
            let model = graph_updater.graph_model_mut();
            if let Some(node) = model.node_mut(layout.element) {
                node.position = layout.rect.min;
            } else if let Some(placemat) = model.placemat_mut(layout.element) {
                placemat.rect = layout.rect;
            } else if let Some(note) = model.sticky_note_mut(layout.element) {
                note.rect = layout.rect;
            }
            graph_updater.mark_changed(layout.element);
        }
        Ok(())
    }
}

impl Command for ChangeElementLayoutCommand {
    fn label(&self) -> String {
        "Change Layout".to_string()
    }
}

/// Strips elements that break graph invariants ("Clean" on a corrupted graph)
#[derive(Debug, Clone, Default)]
pub struct RepairGraphCommand;

impl RepairGraphCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn default_handler(state: &mut EditorState, command: &Self) -> GraphResult<()> {
        if state.graph_model().integrity_issues().is_empty() {
            debug!("Graph is healthy, nothing to repair");
            return Ok(());
        }

        state.push_undo(command);

        let report = {
            let mut graph_updater = state.graph_view.updater();
            let report = graph_updater.graph_model_mut().repair();
            graph_updater.mark_deleted_all(report.removed.iter().copied());
            graph_updater.mark_changed_all(report.changed.iter().copied());
            report
        };

        unselect_removed(state, &report.removed);
        Ok(())
    }
}

impl Command for RepairGraphCommand {
    fn label(&self) -> String {
        "Repair Graph".to_string()
    }
}
