//! Circle and rectangle geometry with the collision tests the sim needs
//!
//! Drag pick-up is a point-in-circle test, ball separation is
//! circle-vs-circle, and the collision probes test circle-vs-rect against
//! obstacle rectangles.

use glam::Vec2;

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point lies inside or on the circle
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }

    /// Strict overlap with another circle; just touching does not count
    pub fn overlaps_circle(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }

    /// Overlap with an axis-aligned rectangle (closest-point test)
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = self.center.clamp(rect.min(), rect.max());
        closest.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// An axis-aligned rectangle, y-down like the rest of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `margin` on every side
    pub fn inset(&self, margin: f32) -> Rect {
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - margin * 2.0,
            self.height - margin * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_circle() {
        let circle = Circle::new(Vec2::new(10.0, 10.0), 5.0);
        assert!(circle.contains_point(Vec2::new(10.0, 10.0)));
        assert!(circle.contains_point(Vec2::new(15.0, 10.0))); // on the edge
        assert!(!circle.contains_point(Vec2::new(15.1, 10.0)));
    }

    #[test]
    fn test_circle_overlap_is_strict() {
        let a = Circle::new(Vec2::ZERO, 10.0);
        // Exactly touching: centers r1 + r2 apart
        let touching = Circle::new(Vec2::new(15.0, 0.0), 5.0);
        assert!(!a.overlaps_circle(&touching));
        // Slightly closer
        let overlapping = Circle::new(Vec2::new(14.99, 0.0), 5.0);
        assert!(a.overlaps_circle(&overlapping));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        // Center inside
        assert!(Circle::new(Vec2::new(50.0, 25.0), 5.0).overlaps_rect(&rect));
        // Just left of the rect, within radius
        assert!(Circle::new(Vec2::new(-4.0, 25.0), 5.0).overlaps_rect(&rect));
        // Just left of the rect, outside radius
        assert!(!Circle::new(Vec2::new(-6.0, 25.0), 5.0).overlaps_rect(&rect));
        // Near a corner: diagonal distance matters, not per-axis
        assert!(!Circle::new(Vec2::new(-4.0, -4.0), 5.0).overlaps_rect(&rect));
        assert!(Circle::new(Vec2::new(-3.0, -3.0), 5.0).overlaps_rect(&rect));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 80.0);
        let inner = rect.inset(10.0);
        assert_eq!(inner, Rect::new(10.0, 10.0, 80.0, 60.0));
        assert_eq!(inner.center(), rect.center());
    }
}
