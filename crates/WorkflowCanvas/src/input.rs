//! # Input Protocol
//!
//! Events the host forwards to the Canvas. Input is event-driven: the host
//! reports each pointer/keyboard event as it happens, together with what the
//! pointer is over (the host usually knows this from its own hit testing; if
//! not, `Canvas::hit_test` computes it).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::model::{ConnectionId, NodeId};
use crate::palette::NodeTemplate;

/// State of keyboard modifiers (Shift, Ctrl, Alt, Meta).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiersState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command / Windows key is pressed.
    pub meta: bool,
}

impl ModifiersState {
    pub const COMMAND: ModifiersState = ModifiersState {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Command on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// What the pointer was over when a button went down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// The empty canvas itself.
    Background,
    Node(NodeId),
    Connection(ConnectionId),
}

/// Standard keyboard keys that the Canvas cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    D,
    Y,
    Z,
}

/// A single input event. Positions are in Screen Space (pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        pos: Vec2,
        button: PointerButton,
        target: PointerTarget,
    },
    /// Pointer moved anywhere, including outside the canvas while a drag is active.
    PointerMove { pos: Vec2 },
    /// Button released anywhere.
    PointerUp { pos: Vec2 },
    /// Pointer left the canvas element.
    PointerLeave,
    /// Wheel scroll; positive `delta` zooms in.
    Wheel { pos: Vec2, delta: f32 },
    KeyDown {
        key: Key,
        modifiers: ModifiersState,
    },
    /// A palette template was dropped onto the canvas.
    Drop { template: NodeTemplate, pos: Vec2 },
}
