use glam::{Vec2, Vec4};

use crate::config::{CanvasConfig, CanvasStyle, parse_hex_color};
use crate::interaction::Selection;
use crate::math;
use crate::model::{Connection, GraphState, Node, NodeId};
use crate::render::{DrawCommand, RenderList};
use crate::shapes::{self, ShapePrimitive};
use crate::view::View;

/// Extra space between a node and its highlight ring, in logical units.
const RING_GAP: f32 = 4.0;
/// Horizontal text padding inside a node, in logical units.
const LABEL_PADDING: f32 = 8.0;
/// Grid lines closer than this on screen are not drawn.
const MIN_GRID_SPACING_PX: f32 = 4.0;

/// High-level renderer for the workflow graph.
///
/// The `Painter` converts the graph (read-only) plus the canvas overlay state
/// into concrete drawing commands. Paint order, back to front:
/// background, grid, connections, nodes in graph order.
pub struct Painter;

impl Painter {
    /// Generates a list of draw commands to render the entire graph.
    ///
    /// # Arguments
    /// * `view` - The current viewport transform (pan/zoom).
    /// * `config` - Canvas configuration (grid and style).
    /// * `graph` - The graph state to render.
    /// * `selection` - Highlighted node or connection.
    /// * `connecting_from` - Node a connection is being drawn from, if any.
    pub fn draw_graph(
        view: &View,
        config: &CanvasConfig,
        graph: &GraphState,
        selection: &Selection,
        connecting_from: Option<&NodeId>,
    ) -> RenderList {
        let mut draw_list = Vec::new();
        let style = &config.style;

        // 1. Background
        draw_list.push(DrawCommand::Rect {
            pos: view.origin,
            size: view.viewport_size,
            color: style.background_color,
            corner_radius: 0.0,
            stroke_width: 0.0,
            stroke_color: None,
        });

        // 2. Grid
        if config.snap_to_grid {
            Self::draw_grid(view, style, config.grid_size, &mut draw_list);
        }

        // 3. Connections (behind nodes)
        for connection in &graph.connections {
            let selected = matches!(selection, Selection::Connection(id) if *id == connection.id);
            Self::draw_connection(view, style, graph, connection, selected, &mut draw_list);
        }

        // 4. Nodes
        for node in &graph.nodes {
            let ring = if connecting_from == Some(&node.id) {
                Some(style.connecting_color)
            } else if matches!(selection, Selection::Node(id) if *id == node.id) {
                Some(style.selection_color)
            } else {
                None
            };
            Self::draw_node(view, style, node, ring, &mut draw_list);
        }

        draw_list
    }

    fn draw_connection(
        view: &View,
        style: &CanvasStyle,
        graph: &GraphState,
        connection: &Connection,
        selected: bool,
        draw_list: &mut RenderList,
    ) {
        let (Some(from), Some(to)) = (graph.node(&connection.from), graph.node(&connection.to))
        else {
            return;
        };

        let start = from.anchor(connection.from_side);
        let end = to.anchor(connection.to_side);
        let (cp1, cp2) =
            math::connection_control_points(start, connection.from_side, end, connection.to_side);

        let color = if selected {
            style.selected_edge_color
        } else {
            style.edge_color
        };
        let width = if selected {
            style.edge_width * 1.5
        } else {
            style.edge_width
        };

        let screen_end = view.world_to_screen(end);
        draw_list.push(DrawCommand::Bezier {
            start: view.world_to_screen(start),
            cp1: view.world_to_screen(cp1),
            cp2: view.world_to_screen(cp2),
            end: screen_end,
            color,
            width,
        });

        // Arrowhead enters the target through its side.
        let arrow = math::arrowhead(screen_end, -connection.to_side.normal(), style.arrow_size);
        draw_list.push(DrawCommand::Shape {
            primitive: ShapePrimitive::Polygon {
                points: arrow.to_vec(),
            },
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
        });

        if let Some(label) = &connection.label {
            let mid = (start + end) * 0.5;
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(mid),
                text: label.clone(),
                color,
                size: style.text_size * view.transform.zoom,
            });
        }
    }

    fn draw_node(
        view: &View,
        style: &CanvasStyle,
        node: &Node,
        ring: Option<Vec4>,
        draw_list: &mut RenderList,
    ) {
        let zoom = view.transform.zoom;
        let screen_pos = view.world_to_screen(node.position());
        let fill = parse_hex_color(&node.color).unwrap_or(style.fallback_node_color);
        let stroke = parse_hex_color(&node.stroke_color).unwrap_or(fill);

        for element in shapes::outline(node.shape_type, node.size(), style.node_stroke_width) {
            draw_list.push(DrawCommand::Shape {
                primitive: element.primitive.transformed(screen_pos, zoom),
                fill: element.paint.fills().then_some(fill),
                stroke: element.paint.strokes().then_some(stroke),
                stroke_width: style.node_stroke_width * zoom,
            });
        }

        if let Some(ring_color) = ring {
            let rect = node.rect().expand(RING_GAP);
            draw_list.push(DrawCommand::Rect {
                pos: view.world_to_screen(rect.min),
                size: rect.size() * zoom,
                color: Vec4::ZERO,
                corner_radius: 4.0 * zoom,
                stroke_width: 2.0,
                stroke_color: Some(ring_color),
            });
        }

        let text_size = style.text_size * zoom;
        let has_description = node.description.as_deref().is_some_and(|d| !d.is_empty());
        let label_y = if has_description {
            node.y + node.height / 2.0 - style.text_size
        } else {
            node.y + (node.height - style.text_size) / 2.0
        };
        draw_list.push(DrawCommand::Text {
            pos: view.world_to_screen(Vec2::new(node.x + LABEL_PADDING, label_y)),
            text: node.label.clone(),
            color: style.text_color,
            size: text_size,
        });

        if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(Vec2::new(
                    node.x + LABEL_PADDING,
                    node.y + node.height / 2.0 + 2.0,
                )),
                text: description.to_string(),
                color: style.description_color,
                size: text_size * 0.8,
            });
        }
    }

    /// Renders the background grid over the visible area.
    fn draw_grid(view: &View, style: &CanvasStyle, grid_size: f32, draw_list: &mut RenderList) {
        if grid_size <= 0.0 || grid_size * view.transform.zoom < MIN_GRID_SPACING_PX {
            return;
        }

        let top_left_world = view.screen_to_world(view.origin);
        let bottom_right_world = view.screen_to_world(view.origin + view.viewport_size);

        let min_x = top_left_world.x.min(bottom_right_world.x);
        let max_x = top_left_world.x.max(bottom_right_world.x);
        let min_y = top_left_world.y.min(bottom_right_world.y);
        let max_y = top_left_world.y.max(bottom_right_world.y);

        // Snap start to grid multiple
        let start_x = (min_x / grid_size).floor() * grid_size;
        let start_y = (min_y / grid_size).floor() * grid_size;

        let mut x = start_x;
        while x <= max_x {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(x, min_y)),
                end: view.world_to_screen(Vec2::new(x, max_y)),
                color: style.grid_color,
                width: 1.0,
            });
            x += grid_size;
        }

        let mut y = start_y;
        while y <= max_y {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(min_x, y)),
                end: view.world_to_screen(Vec2::new(max_x, y)),
                color: style.grid_color,
                width: 1.0,
            });
            y += grid_size;
        }
    }
}
