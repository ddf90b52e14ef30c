//! Serializes a display list into a standalone SVG document.
//!
//! Useful for headless export and for eyeballing what the painter produced.

use glam::{Vec2, Vec4};
use std::fmt::{self, Write};

use crate::render::{DrawCommand, RenderList};
use crate::shapes::{PathSegment, ShapePrimitive};

/// Renders `list` into an SVG document of `size` pixels.
pub fn to_svg(list: &RenderList, size: Vec2) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="Inter, system-ui, sans-serif">"#,
        size.x, size.y, size.x, size.y
    )?;

    for command in list {
        write_command(&mut svg, command)?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn write_command(svg: &mut String, command: &DrawCommand) -> fmt::Result {
    match command {
        DrawCommand::Rect {
            pos,
            size,
            color,
            corner_radius,
            stroke_width,
            stroke_color,
        } => {
            write!(
                svg,
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{:.1}\" fill=\"{}\"",
                pos.x,
                pos.y,
                size.x,
                size.y,
                corner_radius,
                rgba(*color)
            )?;
            write_stroke(svg, *stroke_color, *stroke_width)?;
            svg.push_str(" />\n");
        }
        DrawCommand::Line {
            start,
            end,
            color,
            width,
        } => {
            writeln!(
                svg,
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{:.1}\" />",
                start.x,
                start.y,
                end.x,
                end.y,
                rgba(*color),
                width
            )?;
        }
        DrawCommand::Text {
            pos,
            text,
            color,
            size,
        } => {
            writeln!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"{:.1}\" dominant-baseline=\"hanging\">{}</text>",
                pos.x,
                pos.y,
                rgba(*color),
                size,
                escape_xml(text)
            )?;
        }
        DrawCommand::Bezier {
            start,
            cp1,
            cp2,
            end,
            color,
            width,
        } => {
            writeln!(
                svg,
                "  <path d=\"M{:.1},{:.1} C{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.1}\" />",
                start.x,
                start.y,
                cp1.x,
                cp1.y,
                cp2.x,
                cp2.y,
                end.x,
                end.y,
                rgba(*color),
                width
            )?;
        }
        DrawCommand::Shape {
            primitive,
            fill,
            stroke,
            stroke_width,
        } => {
            write_primitive(svg, primitive)?;
            write!(svg, " fill=\"{}\"", fill.map_or_else(|| "none".to_string(), rgba))?;
            write_stroke(svg, *stroke, *stroke_width)?;
            svg.push_str(" />\n");
        }
    }
    Ok(())
}

/// Writes the opening of the element, up to (not including) the paint attributes.
fn write_primitive(svg: &mut String, primitive: &ShapePrimitive) -> fmt::Result {
    match primitive {
        ShapePrimitive::Ellipse { center, radii } => write!(
            svg,
            "  <ellipse cx=\"{:.1}\" cy=\"{:.1}\" rx=\"{:.1}\" ry=\"{:.1}\"",
            center.x, center.y, radii.x, radii.y
        ),
        ShapePrimitive::Rect {
            pos,
            size,
            corner_radius,
        } => write!(
            svg,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{:.1}\"",
            pos.x, pos.y, size.x, size.y, corner_radius
        ),
        ShapePrimitive::Polygon { points } => {
            svg.push_str("  <polygon points=\"");
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    svg.push(' ');
                }
                write!(svg, "{:.1},{:.1}", p.x, p.y)?;
            }
            svg.push('"');
            Ok(())
        }
        ShapePrimitive::Path { segments } => {
            svg.push_str("  <path d=\"");
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    svg.push(' ');
                }
                match segment {
                    PathSegment::MoveTo(p) => write!(svg, "M{:.1},{:.1}", p.x, p.y)?,
                    PathSegment::LineTo(p) => write!(svg, "L{:.1},{:.1}", p.x, p.y)?,
                    PathSegment::QuadTo { ctrl, to } => {
                        write!(svg, "Q{:.1},{:.1} {:.1},{:.1}", ctrl.x, ctrl.y, to.x, to.y)?
                    }
                    PathSegment::Close => svg.push('Z'),
                }
            }
            svg.push('"');
            Ok(())
        }
        ShapePrimitive::Line { start, end } => write!(
            svg,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\"",
            start.x, start.y, end.x, end.y
        ),
    }
}

fn write_stroke(svg: &mut String, stroke: Option<Vec4>, width: f32) -> fmt::Result {
    match stroke {
        Some(color) if width > 0.0 => write!(
            svg,
            " stroke=\"{}\" stroke-width=\"{:.1}\"",
            rgba(color),
            width
        ),
        _ => Ok(()),
    }
}

fn rgba(color: Vec4) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.2})",
        channel(color.x),
        channel(color.y),
        channel(color.z),
        color.w.clamp(0.0, 1.0)
    )
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_content() {
        let list = vec![DrawCommand::Text {
            pos: Vec2::new(1.0, 2.0),
            text: "A & <B>".into(),
            color: Vec4::ONE,
            size: 12.0,
        }];
        let svg = to_svg(&list, Vec2::new(100.0, 50.0)).unwrap();
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn unfilled_shape_uses_none() {
        let list = vec![DrawCommand::Shape {
            primitive: ShapePrimitive::Line {
                start: Vec2::ZERO,
                end: Vec2::new(10.0, 0.0),
            },
            fill: None,
            stroke: Some(Vec4::new(1.0, 0.0, 0.0, 1.0)),
            stroke_width: 2.0,
        }];
        let svg = to_svg(&list, Vec2::splat(20.0)).unwrap();
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke=\"rgba(255,0,0,1.00)\""));
    }
}
