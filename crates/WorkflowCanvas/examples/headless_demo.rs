use glam::Vec2;
use workflow_canvas::document::GraphDocument;
use workflow_canvas::input::{InputEvent, PointerButton};
use workflow_canvas::palette::{find_template, templates_by_category};
use workflow_canvas::{Canvas, CanvasConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    println!("=== WorkflowCanvas Headless Demo ===");

    // 1. Initialize Canvas
    let mut canvas = Canvas::new(CanvasConfig::default());
    // Explicitly set a viewport (simulating a window)
    canvas.update_viewport(Vec2::ZERO, Vec2::new(1280.0, 720.0));

    let mut doc = GraphDocument::new("Transcode pipeline");

    println!("Palette:");
    for (category, templates) in templates_by_category() {
        let labels: Vec<_> = templates.iter().map(|t| t.label.as_str()).collect();
        println!("  {category}: {}", labels.join(", "));
    }

    // 2. Drop three templates onto the canvas
    for (id, pos) in [
        ("start", Vec2::new(203.0, 58.0)),
        ("process", Vec2::new(193.0, 201.0)),
        ("end", Vec2::new(207.0, 362.0)),
    ] {
        let template = find_template(id).ok_or("missing template")?;
        canvas.handle_event(&mut doc, &InputEvent::Drop { template, pos });
    }
    let ids: Vec<_> = doc.nodes().iter().map(|n| n.id.clone()).collect();

    // 3. Click-click connect start -> process -> end
    for pair in ids.windows(2) {
        canvas.start_connection(pair[0].clone());
        canvas.click_node(&mut doc, &pair[1])?;
    }

    // 4. Drag the process node 60px to the right
    let process = doc.node(&ids[1]).ok_or("missing node")?;
    let grab = canvas.view.world_to_screen(process.rect().center());
    let target = canvas.hit_test(&doc, grab);
    canvas.handle_event(
        &mut doc,
        &InputEvent::PointerDown {
            pos: grab,
            button: PointerButton::Primary,
            target,
        },
    );
    canvas.handle_event(&mut doc, &InputEvent::PointerMove { pos: grab + Vec2::new(60.0, 0.0) });
    canvas.handle_event(&mut doc, &InputEvent::PointerUp { pos: grab + Vec2::new(60.0, 0.0) });

    for node in doc.nodes() {
        println!("Node {} '{}' at ({}, {})", node.id, node.label, node.x, node.y);
    }
    println!("Connections: {}", doc.connections().len());
    println!("History entries: {}", doc.history().len());

    // 5. Render a frame
    let draw_list = canvas.render(&doc);
    println!("Generated {} draw commands", draw_list.len());

    let svg = workflow_canvas::svg::to_svg(&draw_list, canvas.view.viewport_size)?;
    println!("SVG frame: {} bytes", svg.len());

    // 6. Export
    println!("Saving as {}", doc.export_file_name());
    println!("{}", doc.export_json()?);

    println!("=== Demo Complete ===");
    Ok(())
}
