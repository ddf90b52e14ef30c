//! # WorkflowCanvas
//!
//! `workflow_canvas` is a headless flowchart editor for media-processing
//! workflows. It owns the graph state, the mathematics and the interaction
//! logic, and delegates rendering to the host application.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: Nodes and connections, keyed by string ids.
//! - **Document (`src/document.rs`)**: The single owner of the graph and its undo history.
//! - **View (`src/view.rs`)**: Handles coordinate transformation (Logical <-> Screen).
//! - **Interaction (`src/interaction.rs`)**: Pointer/keyboard state machine.
//! - **Render (`src/render.rs`)**: Outputs a list of `DrawCommand`s for the host to render.

pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod interaction;
pub mod math;
pub mod model;
pub mod painter;
pub mod palette;
pub mod persistence;
pub mod render;
pub mod shapes;
pub mod svg;
pub mod view;

use glam::Vec2;
use tracing::{debug, warn};

use document::GraphDocument;
use input::{InputEvent, PointerTarget};
use model::{ConnectionId, Node, NodeId};
use palette::NodeTemplate;
use render::RenderList;
use view::View;

// Re-exports for convenience
pub use config::CanvasConfig;
pub use error::{CanvasError, Result};
pub use interaction::{InteractionMode, LogicEvent, Selection, Tool};

/// The main entry point for the library.
///
/// The `Canvas` holds the transient state of the editor: viewport, active
/// tool, pointer interaction, selection and the pending connection. The
/// graph itself lives in a [`GraphDocument`] that is passed into every
/// operation that reads or changes it.
pub struct Canvas {
    /// Configuration settings.
    pub config: CanvasConfig,
    /// The Viewport system handling coordinate transforms.
    pub view: View,
    pub tool: Tool,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
    selection: Selection,
    connecting_from: Option<NodeId>,
    events: Vec<LogicEvent>,
}

impl Canvas {
    /// Creates a new Canvas instance with the given configuration.
    pub fn new(config: CanvasConfig) -> Self {
        // Default 800x600, the host should call `update_viewport`.
        let view = View::new(Vec2::new(800.0, 600.0), config.min_zoom, config.max_zoom);
        Self {
            config,
            view,
            tool: Tool::default(),
            interaction_mode: InteractionMode::Idle,
            selection: Selection::None,
            connecting_from: None,
            events: Vec::new(),
        }
    }

    /// Updates the canvas placement (e.g., on window resize or layout change).
    pub fn update_viewport(&mut self, origin: Vec2, size: Vec2) {
        self.view.origin = origin;
        self.view.viewport_size = size;
        self.events.push(LogicEvent::RepaintNeeded);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selected node, looked up in `doc`. `None` if nothing is selected
    /// or the node no longer exists.
    pub fn selected_node<'a>(&self, doc: &'a GraphDocument) -> Option<&'a Node> {
        self.selection.node().and_then(|id| doc.node(id))
    }

    pub fn connecting_from(&self) -> Option<&NodeId> {
        self.connecting_from.as_ref()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            debug!(?tool, "Tool changed");
            self.tool = tool;
        }
    }

    /// Flips grid snapping (and grid drawing). Returns the new setting.
    pub fn toggle_grid(&mut self) -> bool {
        self.config.snap_to_grid = !self.config.snap_to_grid;
        self.events.push(LogicEvent::RepaintNeeded);
        self.config.snap_to_grid
    }

    // --- Pan & zoom ---

    /// Starts panning with the pointer at `pointer` (screen space).
    pub fn begin_pan(&mut self, pointer: Vec2) {
        self.interaction_mode = InteractionMode::Panning {
            anchor: pointer - self.view.transform.pan,
        };
    }

    /// Moves the pan so the canvas follows the pointer. No-op unless panning.
    pub fn pan_to(&mut self, pointer: Vec2) {
        if let InteractionMode::Panning { anchor } = self.interaction_mode {
            self.view.transform.pan = pointer - anchor;
            self.view_changed();
        }
    }

    pub fn end_pan(&mut self) {
        if matches!(self.interaction_mode, InteractionMode::Panning { .. }) {
            self.interaction_mode = InteractionMode::Idle;
        }
    }

    /// Multiplies the zoom by `factor`, clamped. Returns true if it changed.
    pub fn zoom(&mut self, factor: f32) -> bool {
        let changed = self.view.zoom_by(factor);
        if changed {
            self.view_changed();
        }
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(1.0 / self.config.zoom_step)
    }

    /// Zooms keeping the logical point under `focal` (screen space) in place.
    pub fn zoom_at(&mut self, factor: f32, focal: Vec2) -> bool {
        let changed = self.view.zoom_at(factor, focal);
        if changed {
            self.view_changed();
        }
        changed
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.view_changed();
    }

    fn view_changed(&mut self) {
        self.events.push(LogicEvent::ViewChanged);
        self.events.push(LogicEvent::RepaintNeeded);
    }

    // --- Nodes ---

    /// Maps a screen position to logical space, snapping to the grid when enabled.
    pub fn to_logical(&self, screen: Vec2) -> Vec2 {
        let logical = self.view.screen_to_world(screen);
        if self.config.snap_to_grid {
            math::snap_point(logical, self.config.grid_size)
        } else {
            logical
        }
    }

    /// Creates a node from a palette template dropped at `drop_screen`.
    pub fn create_node_from_template(
        &mut self,
        doc: &mut GraphDocument,
        template: &NodeTemplate,
        drop_screen: Vec2,
    ) -> Result<NodeId> {
        let position = self.to_logical(drop_screen);
        let id = doc.add_node_from_template(template, position)?;
        self.events.push(LogicEvent::RepaintNeeded);
        Ok(id)
    }

    /// Starts dragging node `id` with the pointer at `pointer` (screen space).
    pub fn begin_node_drag(&mut self, doc: &GraphDocument, id: &NodeId, pointer: Vec2) -> Result<()> {
        let node = doc
            .node(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        let start = node.position();
        self.interaction_mode = InteractionMode::DraggingNode {
            node: id.clone(),
            offset: self.view.screen_to_world(pointer) - start,
            start,
        };
        Ok(())
    }

    /// Moves the dragged node under the pointer. No snapshot is recorded.
    pub fn drag_to(&mut self, doc: &mut GraphDocument, pointer: Vec2) {
        let InteractionMode::DraggingNode { node, offset, .. } = &self.interaction_mode else {
            return;
        };
        let mut position = self.view.screen_to_world(pointer) - *offset;
        if self.config.snap_to_grid {
            position = math::snap_point(position, self.config.grid_size);
        }
        let node = node.clone();
        match doc.set_node_position(&node, position) {
            Ok(()) => self.events.push(LogicEvent::RepaintNeeded),
            Err(err) => {
                warn!(error = %err, node_id = %node, "Drag target lost");
                self.interaction_mode = InteractionMode::Idle;
            }
        }
    }

    /// Ends a node drag, recording one snapshot if the node actually moved.
    /// Returns whether a snapshot was recorded.
    pub fn end_node_drag(&mut self, doc: &mut GraphDocument) -> bool {
        let (node, start) = match std::mem::take(&mut self.interaction_mode) {
            InteractionMode::DraggingNode { node, start, .. } => (node, start),
            other => {
                self.interaction_mode = other;
                return false;
            }
        };
        let moved = doc.node(&node).is_some_and(|n| n.position() != start);
        if moved {
            debug!(node_id = %node, "Node drag committed");
            doc.commit();
        }
        moved
    }

    // --- Selection ---

    pub fn select_node(&mut self, id: NodeId) {
        self.set_selection(Selection::Node(id));
    }

    pub fn select_connection(&mut self, id: ConnectionId) {
        self.set_selection(Selection::Connection(id));
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    fn set_selection(&mut self, selection: Selection) {
        if self.selection != selection {
            self.selection = selection;
            self.events
                .push(LogicEvent::SelectionChanged(self.selection.clone()));
            self.events.push(LogicEvent::RepaintNeeded);
        }
    }

    // --- Connections ---

    /// Arms click-click connect mode from `id`. The selection is cleared.
    pub fn start_connection(&mut self, id: NodeId) {
        self.clear_selection();
        self.set_connecting(Some(id));
    }

    pub fn cancel_connection(&mut self) {
        self.set_connecting(None);
    }

    fn set_connecting(&mut self, from: Option<NodeId>) {
        if self.connecting_from != from {
            self.connecting_from = from;
            self.events
                .push(LogicEvent::ConnectingChanged(self.connecting_from.clone()));
            self.events.push(LogicEvent::RepaintNeeded);
        }
    }

    /// A click on node `id`.
    ///
    /// In connect mode this completes the connection from the armed node
    /// (clicking the armed node itself just leaves connect mode). Otherwise
    /// the node is selected. Returns the new connection, if one was made.
    pub fn click_node(
        &mut self,
        doc: &mut GraphDocument,
        id: &NodeId,
    ) -> Result<Option<ConnectionId>> {
        let Some(from) = self.connecting_from.take() else {
            self.select_node(id.clone());
            return Ok(None);
        };
        self.events.push(LogicEvent::ConnectingChanged(None));
        self.events.push(LogicEvent::RepaintNeeded);
        if &from == id {
            return Ok(None);
        }
        doc.connect(&from, id).map(Some)
    }

    // --- Deletion & duplication ---

    /// Deletes a node with its connections and deselects it.
    pub fn delete_node(&mut self, doc: &mut GraphDocument, id: &NodeId) -> Result<Node> {
        let node = doc.delete_node(id)?;
        self.prune(doc);
        Ok(node)
    }

    pub fn delete_connection(&mut self, doc: &mut GraphDocument, id: &ConnectionId) -> Result<()> {
        doc.delete_connection(id)?;
        self.prune(doc);
        Ok(())
    }

    /// Deletes whatever is selected. Returns false if nothing was selected.
    pub fn delete_selection(&mut self, doc: &mut GraphDocument) -> Result<bool> {
        match self.selection.clone() {
            Selection::None => Ok(false),
            Selection::Node(id) => self.delete_node(doc, &id).map(|_| true),
            Selection::Connection(id) => self.delete_connection(doc, &id).map(|_| true),
        }
    }

    /// Duplicates the selected node and selects the copy.
    pub fn duplicate_selected(&mut self, doc: &mut GraphDocument) -> Result<Option<NodeId>> {
        let Some(id) = self.selection.node().cloned() else {
            return Ok(None);
        };
        let copy = doc.duplicate_node(&id)?;
        self.select_node(copy.clone());
        Ok(Some(copy))
    }

    // --- History ---

    pub fn undo(&mut self, doc: &mut GraphDocument) -> bool {
        let restored = doc.undo();
        if restored {
            self.after_restore(doc);
        }
        restored
    }

    pub fn redo(&mut self, doc: &mut GraphDocument) -> bool {
        let restored = doc.redo();
        if restored {
            self.after_restore(doc);
        }
        restored
    }

    fn after_restore(&mut self, doc: &GraphDocument) {
        // A drag in flight refers to a position that no longer exists.
        if matches!(self.interaction_mode, InteractionMode::DraggingNode { .. }) {
            self.interaction_mode = InteractionMode::Idle;
        }
        self.prune(doc);
        self.events.push(LogicEvent::RepaintNeeded);
    }

    /// Drops selection and connect state that refer to items missing from `doc`.
    fn prune(&mut self, doc: &GraphDocument) {
        let stale = match &self.selection {
            Selection::None => false,
            Selection::Node(id) => doc.node(id).is_none(),
            Selection::Connection(id) => doc.connection(id).is_none(),
        };
        if stale {
            self.clear_selection();
        }
        if self
            .connecting_from
            .as_ref()
            .is_some_and(|id| doc.node(id).is_none())
        {
            self.cancel_connection();
        }
    }

    // --- Output ---

    /// Finds what lies under `screen`: the topmost node, else a connection
    /// within `connection_hit_tolerance` pixels, else the background.
    pub fn hit_test(&self, doc: &GraphDocument, screen: Vec2) -> PointerTarget {
        let logical = self.view.screen_to_world(screen);
        if let Some(node) = doc.nodes().iter().rev().find(|n| n.rect().contains(logical)) {
            return PointerTarget::Node(node.id.clone());
        }

        let graph = doc.graph();
        for connection in graph.connections.iter().rev() {
            let (Some(from), Some(to)) = (graph.node(&connection.from), graph.node(&connection.to))
            else {
                continue;
            };
            let start = from.anchor(connection.from_side);
            let end = to.anchor(connection.to_side);
            let (cp1, cp2) =
                math::connection_control_points(start, connection.from_side, end, connection.to_side);
            let distance = math::distance_to_cubic_bezier(
                screen,
                self.view.world_to_screen(start),
                self.view.world_to_screen(cp1),
                self.view.world_to_screen(cp2),
                self.view.world_to_screen(end),
            );
            if distance <= self.config.connection_hit_tolerance {
                return PointerTarget::Connection(connection.id.clone());
            }
        }
        PointerTarget::Background
    }

    /// Produces the display list for the current frame.
    pub fn render(&self, doc: &GraphDocument) -> RenderList {
        painter::Painter::draw_graph(
            &self.view,
            &self.config,
            doc.graph(),
            &self.selection,
            self.connecting_from.as_ref(),
        )
    }

    /// Feeds one input event through the interaction state machine and
    /// returns the canvas events it produced.
    pub fn handle_event(&mut self, doc: &mut GraphDocument, event: &InputEvent) -> Vec<LogicEvent> {
        interaction::handle_event(self, doc, event);
        self.take_events()
    }

    /// Takes the canvas events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<LogicEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}
