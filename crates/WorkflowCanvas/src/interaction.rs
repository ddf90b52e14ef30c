use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Canvas;
use crate::document::GraphDocument;
use crate::input::{InputEvent, Key, ModifiersState, PointerButton, PointerTarget};
use crate::model::{ConnectionId, NodeId};

/// Events emitted by the Canvas logic to the host application.
///
/// Document changes are reported separately by `GraphDocument::drain_events`;
/// these cover the state the Canvas owns itself.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// The selected node or connection changed.
    SelectionChanged(Selection),
    /// Click-click connect mode was entered (`Some`) or left (`None`).
    ConnectingChanged(Option<NodeId>),
    /// Pan or zoom changed.
    ViewChanged,
    /// The visual state has changed, requiring a repaint.
    RepaintNeeded,
}

/// What a primary press on the empty canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Clicking the background clears the selection.
    #[default]
    Select,
    /// Dragging the background pans the canvas.
    Pan,
}

/// The single selected item, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Connection(ConnectionId),
}

impl Selection {
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// The current state of pointer interaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionMode {
    /// No active interaction.
    #[default]
    Idle,
    /// User is panning the canvas.
    Panning {
        /// `pointer - pan` at the start of the pan (screen space).
        anchor: Vec2,
    },
    /// User is moving a node.
    DraggingNode {
        node: NodeId,
        /// Pointer minus node position, in logical space.
        offset: Vec2,
        /// Node position when the drag started.
        start: Vec2,
    },
}

/// Handles one input event and updates the canvas and document.
///
/// This is the central state machine of the Canvas: pointer events move it
/// between `Idle`, `Panning` and `DraggingNode`; keyboard shortcuts and drops
/// are handled in any mode. Failed operations are logged and otherwise ignored,
/// the way a UI swallows an invalid click.
pub(crate) fn handle_event(canvas: &mut Canvas, doc: &mut GraphDocument, event: &InputEvent) {
    match event {
        InputEvent::PointerDown {
            pos,
            button,
            target,
        } => handle_pointer_down(canvas, doc, *pos, *button, target),
        InputEvent::PointerMove { pos } => handle_pointer_move(canvas, doc, *pos),
        InputEvent::PointerUp { .. } => handle_pointer_up(canvas, doc),
        InputEvent::PointerLeave => {
            // Leaving ends a pan; a node drag keeps tracking until release.
            if matches!(canvas.interaction_mode, InteractionMode::Panning { .. }) {
                canvas.end_pan();
            }
        }
        InputEvent::Wheel { pos, delta } => {
            let factor = 1.0 + delta * canvas.config.wheel_zoom_speed;
            if factor > 0.0 {
                canvas.zoom_at(factor, *pos);
            }
        }
        InputEvent::KeyDown { key, modifiers } => handle_key(canvas, doc, *key, *modifiers),
        InputEvent::Drop { template, pos } => {
            if let Err(err) = canvas.create_node_from_template(doc, template, *pos) {
                warn!(error = %err, template = %template.id, "Drop rejected");
            }
        }
    }
}

/// Handles a button press in any mode.
///
/// A press while already panning or dragging (a second button) is ignored.
fn handle_pointer_down(
    canvas: &mut Canvas,
    doc: &mut GraphDocument,
    pos: Vec2,
    button: PointerButton,
    target: &PointerTarget,
) {
    if canvas.interaction_mode != InteractionMode::Idle {
        return;
    }

    let pans = button != PointerButton::Primary || canvas.tool == Tool::Pan;
    match target {
        PointerTarget::Node(id) if button == PointerButton::Primary => {
            if canvas.connecting_from().is_some() {
                if let Err(err) = canvas.click_node(doc, id) {
                    warn!(error = %err, node_id = %id, "Connection rejected");
                }
                return;
            }
            canvas.select_node(id.clone());
            if let Err(err) = canvas.begin_node_drag(doc, id, pos) {
                warn!(error = %err, node_id = %id, "Drag rejected");
            }
        }
        PointerTarget::Connection(id) if !pans => {
            canvas.select_connection(id.clone());
        }
        // Only the background pans; presses on items never do.
        PointerTarget::Node(_) | PointerTarget::Connection(_) => {}
        PointerTarget::Background if pans => canvas.begin_pan(pos),
        PointerTarget::Background => canvas.clear_selection(),
    }
}

fn handle_pointer_move(canvas: &mut Canvas, doc: &mut GraphDocument, pos: Vec2) {
    match canvas.interaction_mode {
        InteractionMode::Idle => {}
        InteractionMode::Panning { .. } => canvas.pan_to(pos),
        InteractionMode::DraggingNode { .. } => canvas.drag_to(doc, pos),
    }
}

fn handle_pointer_up(canvas: &mut Canvas, doc: &mut GraphDocument) {
    match canvas.interaction_mode {
        InteractionMode::Idle => {}
        InteractionMode::Panning { .. } => canvas.end_pan(),
        InteractionMode::DraggingNode { .. } => {
            canvas.end_node_drag(doc);
        }
    }
}

/// Keyboard shortcuts: Delete/Backspace, Escape, and Command+Z/Y/D.
fn handle_key(canvas: &mut Canvas, doc: &mut GraphDocument, key: Key, modifiers: ModifiersState) {
    match key {
        Key::Delete | Key::Backspace => {
            if let Err(err) = canvas.delete_selection(doc) {
                warn!(error = %err, "Delete rejected");
            }
        }
        Key::Escape => canvas.cancel_connection(),
        Key::Z if modifiers.command() && modifiers.shift => {
            canvas.redo(doc);
        }
        Key::Z if modifiers.command() => {
            canvas.undo(doc);
        }
        Key::Y if modifiers.command() => {
            canvas.redo(doc);
        }
        Key::D if modifiers.command() => {
            if let Err(err) = canvas.duplicate_selected(doc) {
                warn!(error = %err, "Duplicate rejected");
            }
        }
        _ => debug!(?key, "Unbound key"),
    }
}
