//! # Rendering System
//!
//! Instead of drawing directly, the Canvas outputs a display list of `DrawCommand`s.
//! The host application is responsible for interpreting these commands and drawing pixels.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::shapes::ShapePrimitive;

/// A single drawing primitive.
///
/// Coordinates are in **Screen Space** (Pixels).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled rounded rectangle with an optional stroke.
    Rect {
        /// Top-left position in screen pixels.
        pos: Vec2,
        /// Size in screen pixels.
        size: Vec2,
        /// Fill color (RGBA, 0.0 - 1.0). Alpha 0 means no fill.
        color: Vec4,
        /// Radius of the corners in pixels.
        corner_radius: f32,
        /// Width of the border stroke in pixels.
        stroke_width: f32,
        /// Color of the border stroke.
        stroke_color: Option<Vec4>,
    },
    /// A straight line segment.
    Line {
        start: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// Text to be rendered.
    Text {
        /// Top-left position in screen pixels.
        pos: Vec2,
        /// The styling and layout of text is handled by the consumer.
        text: String,
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
    },
    /// A cubic Bezier curve, primarily for connection wires.
    Bezier {
        start: Vec2,
        cp1: Vec2,
        cp2: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// A flowchart shape primitive, already mapped to screen space.
    Shape {
        primitive: ShapePrimitive,
        fill: Option<Vec4>,
        stroke: Option<Vec4>,
        stroke_width: f32,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;
