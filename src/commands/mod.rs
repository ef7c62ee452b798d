//! Commands - one immutable value per user intent, applied through the dispatcher
//!
//! Every handler follows the same shape: validate (returning early without
//! touching anything), push an undo record, open updaters on the state slices
//! it touches, mutate, and mark what changed. Updaters commit when they drop.

pub mod blackboard;
pub mod dispatcher;
pub mod edge;
pub mod element;
pub mod node;
pub mod placemat;
pub mod portal;
pub mod selection;
pub mod sticky_note;
pub mod tracing;
pub mod variable;

pub use blackboard::{CollapseBlackboardSectionCommand, ExpandOrCollapseBlackboardRowCommand};
pub use dispatcher::{CommandDispatcher, CommandHandler, StateObserver};
pub use edge::{
    AddControlPointOnEdgeCommand, CreateEdgeCommand, DeleteEdgeCommand, MoveEdgeControlPointCommand,
    RemoveEdgeControlPointCommand, ReorderEdgeCommand, ReorderType, SetEdgeEditModeCommand,
    SplitEdgeAndInsertExistingNodeCommand,
};
pub use element::{
    ChangeElementColorCommand, ChangeElementLayoutCommand, DeleteElementsCommand, ElementLayout,
    MoveElementsCommand, RenameElementCommand, RepairGraphCommand, ResetElementColorCommand,
};
pub use node::{
    BypassNodesCommand, CollapseNodesCommand, ConvertConstantNodesAndVariableNodesCommand,
    CreateNodeFromSearcherCommand, DisconnectNodesCommand, ItemizeNodeCommand,
    SetNodeEnabledStateCommand, UpdateConstantValueCommand, UpdatePortConstantCommand,
};
pub use placemat::{ChangePlacematZOrdersCommand, CollapsePlacematCommand, CreatePlacematCommand};
pub use portal::{ConvertEdgesToPortalsCommand, CreatePortalsOppositeCommand, EdgePortalPlacement};
pub use selection::{ClearSelectionCommand, SelectElementsCommand, SelectionMode};
pub use sticky_note::{
    CreateStickyNoteCommand, UpdateStickyNoteCommand, UpdateStickyNoteTextSizeCommand,
    UpdateStickyNoteThemeCommand,
};
pub use tracing::{ActivateTracingCommand, SelectTracingTargetCommand, SetTracingStepCommand};
pub use variable::{
    ChangeVariableDeclarationCommand, ChangeVariableTypeCommand, CreateGraphVariableDeclarationCommand,
    CreateVariableNodesCommand, ReorderGraphVariableDeclarationCommand, UpdateExposedCommand,
    UpdateTooltipCommand, VariableNodePlacement,
};

use crate::constants;
use crate::error::GraphResult;
use crate::model::{EdgeModel, ElementId, ItemizeOptions, PortCapacity, PortRef};
use crate::state::{EditorState, GraphViewState, StateComponent, StateUpdater};
use log::debug;
use std::any::Any;
use std::fmt;

/// Upcast to `Any` so the dispatcher can recover the concrete command type
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;

    /// Full type name of the concrete command
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A single user intent
pub trait Command: AsAny + fmt::Debug + 'static {
    /// Label of the undo record this command pushes
    fn label(&self) -> String;
}

/// Registers the default handler of every built-in command
pub fn register_default_handlers(dispatcher: &mut CommandDispatcher) {
    // elements
    dispatcher.register_handler(DeleteElementsCommand::default_handler);
    dispatcher.register_handler(MoveElementsCommand::default_handler);
    dispatcher.register_handler(RenameElementCommand::default_handler);
    dispatcher.register_handler(ChangeElementColorCommand::default_handler);
    dispatcher.register_handler(ResetElementColorCommand::default_handler);
    dispatcher.register_handler(ChangeElementLayoutCommand::default_handler);
    dispatcher.register_handler(RepairGraphCommand::default_handler);

    // nodes
    dispatcher.register_handler(CreateNodeFromSearcherCommand::default_handler);
    dispatcher.register_handler(SetNodeEnabledStateCommand::default_handler);
    dispatcher.register_handler(CollapseNodesCommand::default_handler);
    dispatcher.register_handler(UpdateConstantValueCommand::default_handler);
    dispatcher.register_handler(UpdatePortConstantCommand::default_handler);
    dispatcher.register_handler(BypassNodesCommand::default_handler);
    dispatcher.register_handler(DisconnectNodesCommand::default_handler);
    dispatcher.register_handler(ItemizeNodeCommand::default_handler);
    dispatcher.register_handler(ConvertConstantNodesAndVariableNodesCommand::default_handler);

    // edges
    dispatcher.register_handler(CreateEdgeCommand::default_handler);
    dispatcher.register_handler(DeleteEdgeCommand::default_handler);
    dispatcher.register_handler(ReorderEdgeCommand::default_handler);
    dispatcher.register_handler(SetEdgeEditModeCommand::default_handler);
    dispatcher.register_handler(AddControlPointOnEdgeCommand::default_handler);
    dispatcher.register_handler(MoveEdgeControlPointCommand::default_handler);
    dispatcher.register_handler(RemoveEdgeControlPointCommand::default_handler);
    dispatcher.register_handler(SplitEdgeAndInsertExistingNodeCommand::default_handler);

    // portals
    dispatcher.register_handler(ConvertEdgesToPortalsCommand::default_handler);
    dispatcher.register_handler(CreatePortalsOppositeCommand::default_handler);

    // variables
    dispatcher.register_handler(CreateGraphVariableDeclarationCommand::default_handler);
    dispatcher.register_handler(CreateVariableNodesCommand::default_handler);
    dispatcher.register_handler(ChangeVariableDeclarationCommand::default_handler);
    dispatcher.register_handler(ChangeVariableTypeCommand::default_handler);
    dispatcher.register_handler(UpdateExposedCommand::default_handler);
    dispatcher.register_handler(UpdateTooltipCommand::default_handler);
    dispatcher.register_handler(ReorderGraphVariableDeclarationCommand::default_handler);

    // placemats and sticky notes
    dispatcher.register_handler(CreatePlacematCommand::default_handler);
    dispatcher.register_handler(ChangePlacematZOrdersCommand::default_handler);
    dispatcher.register_handler(CollapsePlacematCommand::default_handler);
    dispatcher.register_handler(CreateStickyNoteCommand::default_handler);
    dispatcher.register_handler(UpdateStickyNoteCommand::default_handler);
    dispatcher.register_handler(UpdateStickyNoteThemeCommand::default_handler);
    dispatcher.register_handler(UpdateStickyNoteTextSizeCommand::default_handler);

    // selection, blackboard and tracing
    dispatcher.register_handler(SelectElementsCommand::default_handler);
    dispatcher.register_handler(ClearSelectionCommand::default_handler);
    dispatcher.register_handler(ExpandOrCollapseBlackboardRowCommand::default_handler);
    dispatcher.register_handler(CollapseBlackboardSectionCommand::default_handler);
    dispatcher.register_handler(ActivateTracingCommand::default_handler);
    dispatcher.register_handler(SetTracingStepCommand::default_handler);
    dispatcher.register_handler(SelectTracingTargetCommand::default_handler);
}

/// Updater over the graph view, the scope most handlers open
pub(crate) type GraphUpdater<'a> = StateUpdater<'a, GraphViewState>;

/// Deletes edges, marking them deleted and their end nodes changed
pub(crate) fn delete_edges(updater: &mut GraphUpdater<'_>, ids: &[ElementId]) -> Vec<EdgeModel> {
    let mut removed = Vec::new();
    for id in ids {
        if let Some(edge) = updater.graph_model_mut().delete_edge(*id) {
            updater.mark_deleted(edge.id);
            updater.mark_changed(edge.from.node);
            updater.mark_changed(edge.to.node);
            removed.push(edge);
        }
    }
    removed
}

/// Deletes nodes with their edges. Returns the ids of everything removed,
/// edges included.
pub(crate) fn delete_nodes(updater: &mut GraphUpdater<'_>, ids: &[ElementId]) -> Vec<ElementId> {
    let mut deleted = Vec::new();
    for id in ids {
        let Some((node, edges)) = updater.graph_model_mut().delete_node(*id) else {
            continue;
        };
        for edge in edges {
            updater.mark_deleted(edge.id);
            updater.mark_changed(edge.from.node);
            updater.mark_changed(edge.to.node);
            deleted.push(edge.id);
        }
        updater.mark_deleted(node.id);
        deleted.push(node.id);
    }
    deleted
}

/// Drops removed elements from the selection
pub(crate) fn unselect_removed(state: &mut EditorState, removed: &[ElementId]) {
    if !removed.iter().any(|id| state.selection.is_selected(*id)) {
        return;
    }
    let mut selection_updater = state.selection.updater();
    for id in removed {
        if selection_updater.unselect(*id) {
            selection_updater.mark_deleted(*id);
        }
    }
}

/// Connects `from` to `to`, the way a user drag does.
///
/// Edges on single-capacity ends are deleted first. Then, if the source is an
/// itemizable node whose output is already in use, a duplicate of it is created
/// and the edge starts from the duplicate instead.
pub(crate) fn connect_ports(
    updater: &mut GraphUpdater<'_>,
    to: PortRef,
    from: PortRef,
    itemize: ItemizeOptions,
) -> GraphResult<ElementId> {
    let model = updater.graph_model();
    model.check_connection(&to, &from)?;

    let mut stale = Vec::new();
    for port in [&to, &from] {
        if model.port(port).map(|p| p.capacity) == Some(PortCapacity::Single) {
            for id in model.edge_ids_on_port(port) {
                if !stale.contains(&id) {
                    stale.push(id);
                }
            }
        }
    }
    if !stale.is_empty() {
        debug!("Replacing {} edge(s) on single-capacity ports", stale.len());
        delete_edges(updater, &stale);
    }

    let mut from = from;
    let model = updater.graph_model();
    let itemizable = model
        .node(from.node)
        .is_some_and(|node| node.is_itemizable(itemize));
    if itemizable && model.connected_edge_count(&from) > 0 {
        if let Some(copy) = updater
            .graph_model_mut()
            .duplicate_node(from.node, constants::itemize::OFFSET)
        {
            debug!("Itemized node {} into {}", from.node, copy);
            updater.mark_new(copy);
            from = PortRef { node: copy, ..from };
        }
    }

    let id = updater.graph_model_mut().create_edge(to, from)?;
    updater.mark_new(id);
    updater.mark_changed(from.node);
    updater.mark_changed(to.node);
    Ok(id)
}

/// Keeps the ids `exists` accepts, dropping duplicates
pub(crate) fn existing(ids: &[ElementId], exists: impl Fn(ElementId) -> bool) -> Vec<ElementId> {
    let mut kept: Vec<ElementId> = Vec::with_capacity(ids.len());
    for id in ids {
        if exists(*id) && !kept.contains(id) {
            kept.push(*id);
        }
    }
    kept
}
