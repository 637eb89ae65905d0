//! Shape generation for 2D primitives
//!
//! Everything is CPU-tessellated into a triangle list: filled circles as
//! fans, outlines as thin rings/bars, the floor as a checkerboard of quads.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a circle outline as a thin ring ending at `radius`
pub fn circle_outline(
    center: Vec2,
    radius: f32,
    thickness: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner_radius = (radius - thickness).max(0.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + radius * Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a filled rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x1, y1) = (rect.x, rect.y);
    let (x2, y2) = (rect.x + rect.width, rect.y + rect.height);

    vec![
        Vertex::new(x1, y1, color),
        Vertex::new(x2, y1, color),
        Vertex::new(x1, y2, color),
        Vertex::new(x1, y2, color),
        Vertex::new(x2, y1, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a rectangle outline as four thin bars just inside
/// the rectangle edge
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.width / 2.0).min(r.height / 2.0);
    let mut vertices = Vec::with_capacity(24);

    // Top, bottom, left, right
    vertices.extend(rect(&Rect::new(r.x, r.y, r.width, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + r.height - t, r.width, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + t, t, r.height - t * 2.0), color));
    vertices.extend(rect(
        &Rect::new(r.x + r.width - t, r.y + t, t, r.height - t * 2.0),
        color,
    ));

    vertices
}

/// Generate the checkerboard floor covering `area` with `cell`-sized squares
pub fn checkerboard(
    area: &Rect,
    cell: f32,
    color_a: [f32; 4],
    color_b: [f32; 4],
) -> Vec<Vertex> {
    let cols = (area.width / cell) as u32;
    let rows = (area.height / cell) as u32;
    let mut vertices = Vec::with_capacity((cols * rows * 6) as usize);

    for row in 0..rows {
        for col in 0..cols {
            let color = if (row + col) % 2 == 0 { color_a } else { color_b };
            vertices.extend(rect(
                &Rect::new(
                    area.x + col as f32 * cell,
                    area.y + row as f32 * cell,
                    cell,
                    cell,
                ),
                color,
            ));
        }
    }

    vertices
}
