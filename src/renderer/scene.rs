//! Frame scene assembly
//!
//! Builds the world-space vertex list for one frame: boundary band,
//! checkerboard floor, obstacles, then balls, each as fill plus outline.
//! The camera transform is applied later, on upload.

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::CHECKER_SIZE;
use crate::sim::WorldState;

/// Triangle fan resolution for balls
const BALL_SEGMENTS: u32 = 32;
/// Outline thickness in world units
const OUTLINE_THICKNESS: f32 = 2.0;

/// Build the full scene for the current world state
pub fn build_scene(state: &WorldState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    // Boundary band behind the floor
    vertices.extend(shapes::rect(&state.world_limits, colors::WORLD_FLOOR));
    vertices.extend(shapes::checkerboard(
        &state.box_limits,
        CHECKER_SIZE,
        colors::CHECKER_A,
        colors::CHECKER_B,
    ));

    for obstacle in &state.obstacles {
        vertices.extend(shapes::rect(&obstacle.rect, obstacle.color));
        vertices.extend(shapes::rect_outline(
            &obstacle.rect,
            OUTLINE_THICKNESS,
            colors::OUTLINE,
        ));
    }

    for ball in &state.balls {
        vertices.extend(shapes::circle(
            ball.pos,
            ball.radius,
            ball.color,
            BALL_SEGMENTS,
        ));
        vertices.extend(shapes::circle_outline(
            ball.pos,
            ball.radius,
            OUTLINE_THICKNESS,
            colors::OUTLINE,
            BALL_SEGMENTS,
        ));
    }

    vertices
}
