use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::model::Side;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Rounds `value` to the nearest multiple of `grid`, halves rounding up.
///
/// Idempotent: snapping an already snapped value returns it unchanged.
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid + 0.5).floor() * grid
}

pub fn snap_point(p: Vec2, grid: f32) -> Vec2 {
    Vec2::new(snap_to_grid(p.x, grid), snap_to_grid(p.y, grid))
}

/// Calculates the two control points for a cubic Bezier joining two node anchors.
///
/// Each control point is pushed out of its node along the side normal by
/// `min(|dx|, |dy|) * 0.3`. For the default bottom-to-top connection this is
/// `(start.x, start.y + k)` and `(end.x, end.y - k)`.
pub fn connection_control_points(
    start: Vec2,
    start_side: Side,
    end: Vec2,
    end_side: Side,
) -> (Vec2, Vec2) {
    let d = end - start;
    let offset = d.x.abs().min(d.y.abs()) * 0.3;
    let cp1 = start + start_side.normal() * offset;
    let cp2 = end + end_side.normal() * offset;
    (cp1, cp2)
}

/// Evaluates a cubic Bezier at `t` in `[0, 1]`.
pub fn cubic_bezier_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Approximate distance from `p` to a cubic Bezier, sampled as a polyline.
pub fn distance_to_cubic_bezier(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    const SAMPLES: usize = 24;
    let mut best = f32::INFINITY;
    let mut prev = p0;
    for i in 1..=SAMPLES {
        let t = i as f32 / SAMPLES as f32;
        let next = cubic_bezier_point(p0, p1, p2, p3, t);
        best = best.min(distance_to_segment(p, prev, next));
        prev = next;
    }
    best
}

pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Triangle for an arrowhead whose tip sits at `tip`, pointing along `direction`.
pub fn arrowhead(tip: Vec2, direction: Vec2, size: f32) -> [Vec2; 3] {
    let dir = direction.normalize_or_zero();
    let dir = if dir == Vec2::ZERO { Vec2::Y } else { dir };
    let back = tip - dir * size;
    let side = dir.perp() * (size * 0.3);
    [tip, back + side, back - side]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest_grid_line() {
        assert_eq!(snap_to_grid(203.0, 20.0), 200.0);
        assert_eq!(snap_to_grid(198.0, 20.0), 200.0);
        assert_eq!(snap_to_grid(210.0, 20.0), 220.0);
        assert_eq!(snap_to_grid(-30.0, 20.0), -20.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for v in [-47.3_f32, -10.0, 0.0, 9.99, 10.0, 133.7, 1999.0] {
            let once = snap_to_grid(v, 20.0);
            assert_eq!(snap_to_grid(once, 20.0), once);
        }
    }

    #[test]
    fn test_bottom_to_top_control_points() {
        let (cp1, cp2) = connection_control_points(
            Vec2::new(0.0, 0.0),
            Side::Bottom,
            Vec2::new(100.0, 200.0),
            Side::Top,
        );
        assert_eq!(cp1, Vec2::new(0.0, 30.0));
        assert_eq!(cp2, Vec2::new(100.0, 170.0));
    }

    #[test]
    fn test_distance_to_curve_endpoints_is_zero() {
        let (p0, p3) = (Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let (p1, p2) = connection_control_points(p0, Side::Bottom, p3, Side::Top);
        assert!(distance_to_cubic_bezier(p0, p0, p1, p2, p3) < 1e-3);
        assert!(distance_to_cubic_bezier(p3, p0, p1, p2, p3) < 1e-3);
        assert!(distance_to_cubic_bezier(Vec2::new(100.0, 0.0), p0, p1, p2, p3) > 20.0);
    }
}
