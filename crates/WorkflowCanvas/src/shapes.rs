//! # Shape Library
//!
//! Standard flowchart symbols as pure geometry. Every outline is expressed in
//! node-local logical space: `(0, 0)` is the node's top-left corner and
//! `(width, height)` its bottom-right. The painter maps the primitives into
//! screen space; nothing here holds state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Key into the shape library, as stored in the `shapeType` field of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeType {
    /// Terminator (start/end).
    Oval,
    /// Rounded rectangle.
    Process,
    /// Diamond.
    Decision,
    /// Parallelogram.
    InputOutput,
    /// Rectangle with a wavy bottom edge.
    Document,
    /// Cylinder.
    Database,
    /// Rectangle with inner side bars.
    PredefinedProcess,
    /// Trapezoid, wide side down.
    ManualOperation,
    /// Circle.
    Connector,
    /// D-shape.
    Delay,
    /// Triangle pointing down.
    Merge,
    /// Screen outline with curved sides.
    Display,
    /// Pentagon pointing down.
    OffPageConnector,
}

impl ShapeType {
    pub const ALL: [ShapeType; 13] = [
        ShapeType::Oval,
        ShapeType::Process,
        ShapeType::Decision,
        ShapeType::InputOutput,
        ShapeType::Document,
        ShapeType::Database,
        ShapeType::PredefinedProcess,
        ShapeType::ManualOperation,
        ShapeType::Connector,
        ShapeType::Delay,
        ShapeType::Merge,
        ShapeType::Display,
        ShapeType::OffPageConnector,
    ];

    /// The key used in workflow files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Oval => "oval",
            ShapeType::Process => "process",
            ShapeType::Decision => "decision",
            ShapeType::InputOutput => "inputOutput",
            ShapeType::Document => "document",
            ShapeType::Database => "database",
            ShapeType::PredefinedProcess => "predefinedProcess",
            ShapeType::ManualOperation => "manualOperation",
            ShapeType::Connector => "connector",
            ShapeType::Delay => "delay",
            ShapeType::Merge => "merge",
            ShapeType::Display => "display",
            ShapeType::OffPageConnector => "offPageConnector",
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a closed outline path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Quadratic Bezier from the current point.
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

impl PathSegment {
    fn transformed(&self, offset: Vec2, scale: f32) -> Self {
        let map = |p: Vec2| p * scale + offset;
        match *self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(map(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(map(p)),
            PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                ctrl: map(ctrl),
                to: map(to),
            },
            PathSegment::Close => PathSegment::Close,
        }
    }
}

/// A geometric primitive of a shape outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapePrimitive {
    Ellipse { center: Vec2, radii: Vec2 },
    Rect {
        pos: Vec2,
        size: Vec2,
        corner_radius: f32,
    },
    Polygon { points: Vec<Vec2> },
    Path { segments: Vec<PathSegment> },
    Line { start: Vec2, end: Vec2 },
}

impl ShapePrimitive {
    /// Maps the primitive with `p * scale + offset`.
    pub fn transformed(&self, offset: Vec2, scale: f32) -> Self {
        let map = |p: Vec2| p * scale + offset;
        match self {
            ShapePrimitive::Ellipse { center, radii } => ShapePrimitive::Ellipse {
                center: map(*center),
                radii: *radii * scale,
            },
            ShapePrimitive::Rect {
                pos,
                size,
                corner_radius,
            } => ShapePrimitive::Rect {
                pos: map(*pos),
                size: *size * scale,
                corner_radius: corner_radius * scale,
            },
            ShapePrimitive::Polygon { points } => ShapePrimitive::Polygon {
                points: points.iter().map(|&p| map(p)).collect(),
            },
            ShapePrimitive::Path { segments } => ShapePrimitive::Path {
                segments: segments
                    .iter()
                    .map(|s| s.transformed(offset, scale))
                    .collect(),
            },
            ShapePrimitive::Line { start, end } => ShapePrimitive::Line {
                start: map(*start),
                end: map(*end),
            },
        }
    }
}

/// How a primitive is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    Fill,
    Stroke,
    FillAndStroke,
}

impl Paint {
    pub fn fills(self) -> bool {
        matches!(self, Paint::Fill | Paint::FillAndStroke)
    }

    pub fn strokes(self) -> bool {
        matches!(self, Paint::Stroke | Paint::FillAndStroke)
    }
}

/// A primitive together with its paint mode. Elements are painted in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeElement {
    pub primitive: ShapePrimitive,
    pub paint: Paint,
}

impl ShapeElement {
    fn filled(primitive: ShapePrimitive) -> Self {
        Self {
            primitive,
            paint: Paint::FillAndStroke,
        }
    }
}

const SLANT_OFFSET: f32 = 15.0;
const CYLINDER_CAP: f32 = 12.0;
const SIDE_BAR_OFFSET: f32 = 12.0;
const DOCUMENT_WAVE: f32 = 10.0;
const DELAY_CURVE: f32 = 30.0;
const PROCESS_CORNER: f32 = 4.0;

/// Builds the outline of `shape` for a node of `size`, insetting strokes of
/// `stroke_width` so they stay inside the node bounds.
pub fn outline(shape: ShapeType, size: Vec2, stroke_width: f32) -> Vec<ShapeElement> {
    let (w, h) = (size.x, size.y);
    let s = stroke_width;
    let half = s / 2.0;
    let p = Vec2::new;

    match shape {
        ShapeType::Oval => vec![ShapeElement::filled(ShapePrimitive::Ellipse {
            center: p(w / 2.0, h / 2.0),
            radii: p((w / 2.0 - s).max(0.0), (h / 2.0 - s).max(0.0)),
        })],
        ShapeType::Process => vec![ShapeElement::filled(framed_rect(size, s))],
        ShapeType::Decision => vec![ShapeElement::filled(ShapePrimitive::Polygon {
            points: vec![
                p(w / 2.0, s),
                p(w - s, h / 2.0),
                p(w / 2.0, h - s),
                p(s, h / 2.0),
            ],
        })],
        ShapeType::InputOutput => vec![ShapeElement::filled(ShapePrimitive::Polygon {
            points: vec![
                p(SLANT_OFFSET, half),
                p(w - half, half),
                p(w - SLANT_OFFSET, h - half),
                p(half, h - half),
            ],
        })],
        ShapeType::Document => vec![ShapeElement::filled(ShapePrimitive::Path {
            segments: vec![
                PathSegment::MoveTo(p(half, half)),
                PathSegment::LineTo(p(w - half, half)),
                PathSegment::LineTo(p(w - half, h - DOCUMENT_WAVE)),
                PathSegment::QuadTo {
                    ctrl: p(w * 0.75, h - DOCUMENT_WAVE / 2.0),
                    to: p(w / 2.0, h - DOCUMENT_WAVE),
                },
                PathSegment::QuadTo {
                    ctrl: p(w * 0.25, h - DOCUMENT_WAVE * 1.5),
                    to: p(half, h - DOCUMENT_WAVE),
                },
                PathSegment::Close,
            ],
        })],
        ShapeType::Database => {
            let rx = (w / 2.0 - s).max(0.0);
            vec![
                ShapeElement::filled(ShapePrimitive::Ellipse {
                    center: p(w / 2.0, CYLINDER_CAP),
                    radii: p(rx, CYLINDER_CAP),
                }),
                ShapeElement {
                    primitive: ShapePrimitive::Rect {
                        pos: p(half, CYLINDER_CAP),
                        size: p(w - s, (h - CYLINDER_CAP * 2.0).max(0.0)),
                        corner_radius: 0.0,
                    },
                    paint: Paint::Fill,
                },
                ShapeElement {
                    primitive: ShapePrimitive::Line {
                        start: p(half, CYLINDER_CAP),
                        end: p(half, h - CYLINDER_CAP),
                    },
                    paint: Paint::Stroke,
                },
                ShapeElement {
                    primitive: ShapePrimitive::Line {
                        start: p(w - half, CYLINDER_CAP),
                        end: p(w - half, h - CYLINDER_CAP),
                    },
                    paint: Paint::Stroke,
                },
                ShapeElement::filled(ShapePrimitive::Ellipse {
                    center: p(w / 2.0, h - CYLINDER_CAP),
                    radii: p(rx, CYLINDER_CAP),
                }),
            ]
        }
        ShapeType::PredefinedProcess => vec![
            ShapeElement::filled(framed_rect(size, s)),
            ShapeElement {
                primitive: ShapePrimitive::Line {
                    start: p(SIDE_BAR_OFFSET, half),
                    end: p(SIDE_BAR_OFFSET, h - half),
                },
                paint: Paint::Stroke,
            },
            ShapeElement {
                primitive: ShapePrimitive::Line {
                    start: p(w - SIDE_BAR_OFFSET, half),
                    end: p(w - SIDE_BAR_OFFSET, h - half),
                },
                paint: Paint::Stroke,
            },
        ],
        ShapeType::ManualOperation => vec![ShapeElement::filled(ShapePrimitive::Polygon {
            points: vec![
                p(SLANT_OFFSET, half),
                p(w - SLANT_OFFSET, half),
                p(w - half, h - half),
                p(half, h - half),
            ],
        })],
        ShapeType::Connector => {
            let r = (w.min(h) / 2.0 - s).max(0.0);
            vec![ShapeElement::filled(ShapePrimitive::Ellipse {
                center: p(w / 2.0, h / 2.0),
                radii: Vec2::splat(r),
            })]
        }
        ShapeType::Delay => {
            let curve_x = w - DELAY_CURVE;
            vec![ShapeElement::filled(ShapePrimitive::Path {
                segments: vec![
                    PathSegment::MoveTo(p(half, half)),
                    PathSegment::LineTo(p(curve_x, half)),
                    PathSegment::QuadTo {
                        ctrl: p(w - half, h / 2.0),
                        to: p(curve_x, h - half),
                    },
                    PathSegment::LineTo(p(half, h - half)),
                    PathSegment::Close,
                ],
            })]
        }
        ShapeType::Merge => vec![ShapeElement::filled(ShapePrimitive::Polygon {
            points: vec![p(w / 2.0, h - s), p(w - s, s), p(s, s)],
        })],
        ShapeType::Display => vec![ShapeElement::filled(ShapePrimitive::Path {
            segments: vec![
                PathSegment::MoveTo(p(SLANT_OFFSET, half)),
                PathSegment::LineTo(p(w - SLANT_OFFSET, half)),
                PathSegment::QuadTo {
                    ctrl: p(w - half, h / 2.0),
                    to: p(w - SLANT_OFFSET, h - half),
                },
                PathSegment::LineTo(p(SLANT_OFFSET, h - half)),
                PathSegment::QuadTo {
                    ctrl: p(half, h / 2.0),
                    to: p(SLANT_OFFSET, half),
                },
                PathSegment::Close,
            ],
        })],
        ShapeType::OffPageConnector => {
            let mid_y = h * 0.6;
            vec![ShapeElement::filled(ShapePrimitive::Polygon {
                points: vec![
                    p(s, s),
                    p(w - s, s),
                    p(w - s, mid_y),
                    p(w / 2.0, h - s),
                    p(s, mid_y),
                ],
            })]
        }
    }
}

fn framed_rect(size: Vec2, stroke_width: f32) -> ShapePrimitive {
    ShapePrimitive::Rect {
        pos: Vec2::splat(stroke_width / 2.0),
        size: (size - Vec2::splat(stroke_width)).max(Vec2::ZERO),
        corner_radius: PROCESS_CORNER,
    }
}
