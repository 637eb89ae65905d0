//! Per-frame simulation step
//!
//! Advances the world by one timestep: drag input, ball physics, collision
//! resolution, camera control, spawning, then the rotated-frame gravity
//! pass over every ball.

use glam::Vec2;

use super::ball::resolve_ball_collisions;
use super::state::WorldState;
use crate::consts::{CAMERA_MIN_ZOOM, CAMERA_ROTATE_SPEED, CAMERA_ZOOM_SPEED};

/// Input sampled by the host loop for a single tick
///
/// Edge flags (`*_pressed`, `*_released`, `reset_camera`) are one-shot; the
/// host clears them after each substep. Held flags stay up while the key or
/// button is down.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in screen/canvas pixels
    pub pointer: Vec2,
    /// Left button went down this tick
    pub left_pressed: bool,
    /// Left button currently held
    pub left_held: bool,
    /// Left button went up this tick
    pub left_released: bool,
    /// Right button went down this tick
    pub right_pressed: bool,
    /// Camera rotation keys
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    /// Camera zoom keys
    pub zoom_in: bool,
    pub zoom_out: bool,
    /// Reset camera rotation and zoom
    pub reset_camera: bool,
}

/// Advance the world by one timestep
pub fn tick(state: &mut WorldState, input: &TickInput, dt: f32) {
    let pointer = state.camera.screen_to_world(input.pointer);

    // Physics sweep over the balls alive at the start of the frame. Spawns
    // land in the pending buffer and join at the end of the tick, so the
    // sweep never collides a ball against its own just-created self.
    let count = state.balls.len();
    let box_limits = state.box_limits;
    let impulse = state.tuning.separation_impulse;
    for i in 0..count {
        let ball = &mut state.balls[i];
        ball.process_input(pointer, input.left_pressed, input.left_released);
        ball.update(dt, &box_limits, pointer);
        resolve_ball_collisions(&mut state.balls, i, impulse);
        state.balls[i].resolve_obstacle_collisions(&state.obstacles);
    }

    // Camera control; rotating also rotates gravity below
    if input.rotate_cw {
        state.camera.rotation += CAMERA_ROTATE_SPEED * dt;
    } else if input.rotate_ccw {
        state.camera.rotation -= CAMERA_ROTATE_SPEED * dt;
    }
    if input.zoom_in {
        state.camera.zoom += CAMERA_ZOOM_SPEED * dt;
    } else if input.zoom_out {
        state.camera.zoom = (state.camera.zoom - CAMERA_ZOOM_SPEED * dt).max(CAMERA_MIN_ZOOM);
    }
    if input.reset_camera {
        state.camera.rotation = 0.0;
        state.camera.zoom = 1.0;
    }

    // Continuous ball spawn while the left button is held; one obstacle
    // per right press
    if input.left_held {
        state.spawn_ball(pointer);
    }
    if input.right_pressed {
        state.spawn_obstacle(pointer);
    }

    state.merge_pending();

    // Gravity pass, after resolution, over every ball - including this
    // frame's spawns
    let gravity = state.tuning.gravity;
    let rotation = state.camera.rotation;
    for ball in &mut state.balls {
        ball.apply_gravity(rotation, gravity);
    }

    state.time_ticks += 1;
}
