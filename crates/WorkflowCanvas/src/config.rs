//! # Configuration
//!
//! This module defines the configuration struct for the Canvas.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Configuration parameters for the Canvas.
///
/// Missing keys fall back to their defaults when deserializing, so a host can
/// ship a partial config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Grid spacing in logical units. Default: 20.0.
    pub grid_size: f32,
    /// Snap node positions to the grid and draw it. Default: true.
    pub snap_to_grid: bool,
    /// Factor applied by one zoom-in / zoom-out step. Default: 1.2.
    pub zoom_step: f32,
    /// Lower zoom bound. Default: 0.3.
    pub min_zoom: f32,
    /// Upper zoom bound. Default: 3.0.
    pub max_zoom: f32,
    /// Zoom change per wheel notch. Default: 0.1.
    pub wheel_zoom_speed: f32,
    /// Offset of a duplicated node from its source, in logical units. Default: 20.0.
    pub duplicate_offset: f32,
    /// Maximum number of history snapshots. Default: 100.
    pub max_history: usize,
    /// Distance in pixels within which a click selects a connection. Default: 6.0.
    pub connection_hit_tolerance: f32,
    pub style: CanvasStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            snap_to_grid: true,
            zoom_step: 1.2,
            min_zoom: 0.3,
            max_zoom: 3.0,
            wheel_zoom_speed: 0.1,
            duplicate_offset: 20.0,
            max_history: 100,
            connection_hit_tolerance: 6.0,
            style: CanvasStyle::default(),
        }
    }
}

/// Visual styling configuration for the Canvas.
///
/// Node colors come from the nodes themselves; this covers everything else.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    pub background_color: Vec4,
    pub grid_color: Vec4,
    /// Used when a node color cannot be parsed.
    pub fallback_node_color: Vec4,
    pub node_stroke_width: f32,
    pub text_color: Vec4,
    pub description_color: Vec4,
    /// Font size in logical units; scaled with zoom.
    pub text_size: f32,
    /// Ring around the selected node.
    pub selection_color: Vec4,
    /// Ring around the node a connection is being drawn from.
    pub connecting_color: Vec4,
    pub edge_color: Vec4,
    pub selected_edge_color: Vec4,
    /// Width of a wire in screen pixels.
    pub edge_width: f32,
    pub arrow_size: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: Vec4::new(0.04, 0.055, 0.1, 1.0),
            grid_color: Vec4::new(0.1, 0.1, 0.18, 1.0),
            fallback_node_color: Vec4::new(0.58, 0.64, 0.72, 1.0),
            node_stroke_width: 2.0,
            text_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            description_color: Vec4::new(1.0, 1.0, 1.0, 0.7),
            text_size: 12.0,
            selection_color: Vec4::new(0.13, 0.83, 0.93, 1.0),
            connecting_color: Vec4::new(0.98, 0.8, 0.08, 1.0),
            edge_color: Vec4::new(0.02, 0.71, 0.83, 1.0),
            selected_edge_color: Vec4::new(0.98, 0.8, 0.08, 1.0),
            edge_width: 2.0,
            arrow_size: 10.0,
        }
    }
}

/// Parses a `#rrggbb` (or `#rgb`) color into RGBA in `0.0..=1.0`.
pub fn parse_hex_color(hex: &str) -> Option<Vec4> {
    let digits = hex.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match digits.len() {
        6 => Some(Vec4::new(
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
            1.0,
        )),
        3 => {
            let expand = |i: usize| -> Option<f32> {
                let c = digits.get(i..i + 1)?;
                channel(&format!("{c}{c}"))
            };
            Some(Vec4::new(expand(0)?, expand(1)?, expand(2)?, 1.0))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_hex_color("#fff"), Some(Vec4::ONE));
        assert_eq!(parse_hex_color("ff0000"), None);
        assert_eq!(parse_hex_color("#zz0000"), None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{ "grid_size": 10.0 }"#).unwrap();
        assert_eq!(config.grid_size, 10.0);
        assert!(config.snap_to_grid);
        assert_eq!(config.max_zoom, 3.0);
    }
}
