//! # Viewport System
//!
//! Converts between **logical space** (node coordinates, unscaled and
//! unpanned) and **screen space** (pointer coordinates reported by the host).
//!
//! The canvas applies a single affine transform:
//! `screen = origin + pan + zoom * logical`, where `origin` is the screen
//! position of the canvas element's top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Represents the current camera state: where we are looking (Pan) and how close (Zoom).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation of the canvas content, in screen pixels.
    pub pan: Vec2,
    /// Scale factor. 1.0 = 100%.
    pub zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// The View struct combines the Transform with the canvas placement on screen.
/// It serves as the single source of truth for coordinate conversions.
#[derive(Clone, Debug)]
pub struct View {
    pub transform: Transform,
    /// Screen position of the canvas element's top-left corner.
    pub origin: Vec2,
    /// Size of the visible area in pixels.
    pub viewport_size: Vec2,
    /// Allowed zoom range, inclusive.
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl View {
    pub fn new(viewport_size: Vec2, min_zoom: f32, max_zoom: f32) -> Self {
        Self {
            transform: Transform::default(),
            origin: Vec2::ZERO,
            viewport_size,
            min_zoom,
            max_zoom,
        }
    }

    /// Formula: `Screen = Origin + Pan + Logical * Zoom`
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        self.origin + self.transform.pan + world_pos * self.transform.zoom
    }

    /// Formula: `Logical = (Screen - Origin - Pan) / Zoom`
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.origin - self.transform.pan) / self.transform.zoom
    }

    /// Multiplies the zoom by `factor`, clamped to the allowed range.
    ///
    /// The pan is left alone, so the canvas scales around its top-left corner.
    /// Returns true if the zoom changed.
    pub fn zoom_by(&mut self, factor: f32) -> bool {
        let old_zoom = self.transform.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        self.transform.zoom = new_zoom;
        (new_zoom - old_zoom).abs() > f32::EPSILON
    }

    /// Zooms by `factor` while keeping the logical point under `focal` (screen space) fixed.
    pub fn zoom_at(&mut self, factor: f32, focal: Vec2) -> bool {
        let world_focal = self.screen_to_world(focal);
        if !self.zoom_by(factor) {
            return false;
        }
        // focal = origin + pan + world_focal * zoom  =>  pan = focal - origin - world_focal * zoom
        self.transform.pan = focal - self.origin - world_focal * self.transform.zoom;
        true
    }

    /// Zoom 1, pan (0, 0).
    pub fn reset(&mut self) {
        self.transform = Transform::default();
    }
}
