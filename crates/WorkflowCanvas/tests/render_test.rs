use glam::Vec2;
use workflow_canvas::document::GraphDocument;
use workflow_canvas::palette::find_template;
use workflow_canvas::render::DrawCommand;
use workflow_canvas::shapes::ShapePrimitive;
use workflow_canvas::svg::to_svg;
use workflow_canvas::{Canvas, CanvasConfig};

#[test]
fn test_basic_rendering() {
    // 1. Setup Graph
    let mut doc = GraphDocument::default();
    doc.add_node_from_template(&find_template("process").unwrap(), Vec2::new(100.0, 100.0))
        .unwrap();

    // 2. Setup Canvas
    let canvas = Canvas::new(CanvasConfig::default());

    // 3. Render
    let draw_list = canvas.render(&doc);

    // 4. Verify
    assert!(!draw_list.is_empty(), "Draw list should not be empty");

    // Background first
    assert!(matches!(
        draw_list[0],
        DrawCommand::Rect { pos, .. } if pos == Vec2::ZERO
    ));

    // The process outline is a rounded rect inset by half the stroke width.
    let outline = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Shape {
            primitive: ShapePrimitive::Rect { pos, size, .. },
            ..
        } => Some((*pos, *size)),
        _ => None,
    });
    assert_eq!(
        outline,
        Some((Vec2::new(101.0, 101.0), Vec2::new(138.0, 68.0)))
    );

    let label = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Text { text, pos, .. } if text == "Xử lý" => Some(*pos),
        _ => None,
    });
    // Label sits above the description: y + h/2 - text size
    assert_eq!(label, Some(Vec2::new(108.0, 123.0)));
}

#[test]
fn test_rendering_follows_zoom_and_pan() {
    let mut doc = GraphDocument::default();
    doc.add_node_from_template(&find_template("process").unwrap(), Vec2::new(100.0, 100.0))
        .unwrap();
    let mut canvas = Canvas::default();
    canvas.view.transform.pan = Vec2::new(50.0, 0.0);
    canvas.view.transform.zoom = 2.0;

    let draw_list = canvas.render(&doc);

    let outline = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Shape {
            primitive: ShapePrimitive::Rect { pos, .. },
            stroke_width,
            ..
        } => Some((*pos, *stroke_width)),
        _ => None,
    });
    // 50 + 101 * 2 = 252, 101 * 2 = 202
    assert_eq!(outline, Some((Vec2::new(252.0, 202.0), 4.0)));
}

#[test]
fn test_grid_follows_snap_setting() {
    let doc = GraphDocument::default();
    let mut canvas = Canvas::default();
    let has_grid = |canvas: &Canvas| {
        canvas
            .render(&doc)
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    };

    assert!(has_grid(&canvas));
    canvas.toggle_grid();
    assert!(!has_grid(&canvas));
}

#[test]
fn test_connection_drawn_behind_nodes_with_arrow() {
    let mut doc = GraphDocument::default();
    let template = find_template("process").unwrap();
    let a = doc
        .add_node_from_template(&template, Vec2::new(100.0, 100.0))
        .unwrap();
    let b = doc
        .add_node_from_template(&template, Vec2::new(300.0, 300.0))
        .unwrap();
    doc.connect(&a, &b).unwrap();
    let mut canvas = Canvas::default();
    canvas.toggle_grid();

    let draw_list = canvas.render(&doc);

    let bezier_index = draw_list
        .iter()
        .position(|cmd| matches!(cmd, DrawCommand::Bezier { .. }))
        .expect("connection curve");
    let first_node_index = draw_list
        .iter()
        .position(|cmd| {
            matches!(
                cmd,
                DrawCommand::Shape {
                    primitive: ShapePrimitive::Rect { .. },
                    ..
                }
            )
        })
        .unwrap();
    assert!(bezier_index < first_node_index);

    // From the bottom of a (170, 170) to the top of b (370, 300);
    // control offset = min(200, 130) * 0.3 = 39.
    match &draw_list[bezier_index] {
        DrawCommand::Bezier {
            start,
            cp1,
            cp2,
            end,
            ..
        } => {
            assert_eq!(*start, Vec2::new(170.0, 170.0));
            assert_eq!(*end, Vec2::new(370.0, 300.0));
            assert!((cp1.y - 209.0).abs() < 1e-4);
            assert!((cp2.y - 261.0).abs() < 1e-4);
        }
        _ => unreachable!(),
    }

    // The arrowhead tip sits on the target anchor.
    assert!(matches!(
        &draw_list[bezier_index + 1],
        DrawCommand::Shape { primitive: ShapePrimitive::Polygon { points }, .. }
            if points[0] == Vec2::new(370.0, 300.0)
    ));
}

#[test]
fn test_selection_and_connecting_rings() {
    let mut doc = GraphDocument::default();
    let template = find_template("start").unwrap();
    let a = doc
        .add_node_from_template(&template, Vec2::new(0.0, 0.0))
        .unwrap();
    let mut canvas = Canvas::default();
    canvas.toggle_grid();
    let ring_color = |canvas: &Canvas| {
        canvas.render(&doc).iter().find_map(|cmd| match cmd {
            DrawCommand::Rect {
                stroke_color: Some(color),
                ..
            } => Some(*color),
            _ => None,
        })
    };

    assert_eq!(ring_color(&canvas), None);

    canvas.select_node(a.clone());
    assert_eq!(ring_color(&canvas), Some(canvas.config.style.selection_color));

    canvas.start_connection(a);
    assert_eq!(
        ring_color(&canvas),
        Some(canvas.config.style.connecting_color)
    );
}

#[test]
fn test_svg_export_of_frame() {
    let mut doc = GraphDocument::default();
    doc.add_node_from_template(&find_template("decision").unwrap(), Vec2::new(40.0, 40.0))
        .unwrap();
    let canvas = Canvas::default();

    let svg = to_svg(&canvas.render(&doc), canvas.view.viewport_size).unwrap();

    assert!(svg.contains("<polygon"));
    assert!(svg.contains("Quyết định"));
    assert!(svg.contains("width=\"800\""));
}
