//! World state and the static entities
//!
//! Everything the tick mutates lives here: the ball and obstacle
//! collections, the pending-spawn buffer, the world/box limits, the camera,
//! and the seeded RNG used for spawn velocities and colors.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::geom::Rect;
use crate::consts::{BOUNDARY_MARGIN, WORLD_SIZE};
use crate::tuning::Tuning;

/// Initial obstacle grid layout
const GRID_START: f32 = 400.0;
const GRID_CELL: f32 = 50.0;
const GRID_SPACING: f32 = 100.0;
const GRID_COUNT: usize = 10;

/// Obstacle colors (initial grid vs. click-spawned)
const OBSTACLE_GRAY: [f32; 4] = [0.51, 0.51, 0.51, 1.0];
const OBSTACLE_GREEN: [f32; 4] = [0.0, 0.89, 0.19, 1.0];

/// A static rectangular obstacle. Immutable shape, no behavior of its own;
/// all intersection tests originate from the balls.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
    /// Display-only
    pub color: [f32; 4],
}

impl Obstacle {
    pub fn new(rect: Rect, color: [f32; 4]) -> Self {
        Self { rect, color }
    }
}

/// 2D camera: rotation and zoom about a world-space target
///
/// `rotation` is in degrees and doubles as the gravity direction - the
/// sim reads it to decide which way "down" points.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space point the camera looks at
    pub target: Vec2,
    /// Screen-space point the target maps to (canvas center)
    pub offset: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera {
    pub fn new(target: Vec2, offset: Vec2) -> Self {
        Self {
            target,
            offset,
            rotation: 0.0,
            zoom: 1.0,
        }
    }

    /// World position to screen (canvas pixel) position
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let rotated = Vec2::from_angle(self.rotation.to_radians()).rotate(world - self.target);
        rotated * self.zoom + self.offset
    }

    /// Screen (canvas pixel) position to world position
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let unscaled = (screen - self.offset) / self.zoom;
        Vec2::from_angle(-self.rotation.to_radians()).rotate(unscaled) + self.target
    }
}

/// Complete toy world state
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed, kept for logging/reproduction
    pub seed: u64,
    /// Live balls
    pub balls: Vec<Ball>,
    /// Balls spawned this frame; merged at the frame boundary so the
    /// physics sweep never observes a collection growing under it
    pub pending_balls: Vec<Ball>,
    /// Static obstacles (initial grid plus click-spawned)
    pub obstacles: Vec<Obstacle>,
    /// Outer world rectangle (visual)
    pub world_limits: Rect,
    /// Inset rectangle the balls actually bounce off
    pub box_limits: Rect,
    pub camera: Camera,
    pub tuning: Tuning,
    pub time_ticks: u64,
    rng: Pcg32,
}

impl WorldState {
    /// Create the world: limits, obstacle grid, centered camera, no balls
    pub fn new(seed: u64, screen_size: Vec2, tuning: Tuning) -> Self {
        let world_limits = Rect::new(0.0, 0.0, WORLD_SIZE, WORLD_SIZE);
        let box_limits = world_limits.inset(BOUNDARY_MARGIN);
        let camera = Camera::new(world_limits.center(), screen_size / 2.0);

        Self {
            seed,
            balls: Vec::new(),
            pending_balls: Vec::new(),
            obstacles: obstacle_grid(),
            world_limits,
            box_limits,
            camera,
            tuning,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Queue a ball at `pos` with a randomized sideways kick and a random
    /// blue-range color. It joins the live collection at the frame boundary.
    pub fn spawn_ball(&mut self, pos: Vec2) {
        let t = &self.tuning;
        let vel = Vec2::new(
            self.rng.random_range(-t.spawn_speed..=t.spawn_speed),
            t.spawn_speed,
        );
        let hue = self.rng.random_range(180.0..=230.0);
        let value = self.rng.random_range(0.8..=1.0);
        let ball = Ball::new(
            pos,
            t.ball_radius,
            vel,
            t.friction,
            t.elasticity,
            t.max_speed,
            color_from_hsv(hue, 1.0, value),
        );
        self.pending_balls.push(ball);
    }

    /// Drop a square obstacle centered on `pos`
    pub fn spawn_obstacle(&mut self, pos: Vec2) {
        let size = self.tuning.obstacle_size;
        self.obstacles.push(Obstacle::new(
            Rect::new(pos.x - size / 2.0, pos.y - size / 2.0, size, size),
            OBSTACLE_GREEN,
        ));
    }

    /// Fold this frame's spawned balls into the live collection
    pub fn merge_pending(&mut self) {
        self.balls.append(&mut self.pending_balls);
    }
}

/// The initial 10x10 staggered obstacle grid
fn obstacle_grid() -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(GRID_COUNT * GRID_COUNT);
    for row in 0..GRID_COUNT {
        // Odd rows shift half a gap to stagger the columns
        let row_offset = if row % 2 == 0 {
            0.0
        } else {
            GRID_CELL + GRID_SPACING / 2.0 - GRID_CELL / 2.0
        };
        for col in 0..GRID_COUNT {
            let x = GRID_START + col as f32 * (GRID_CELL + GRID_SPACING) + row_offset;
            let y = GRID_START + row as f32 * (GRID_CELL + GRID_SPACING);
            obstacles.push(Obstacle::new(
                Rect::new(x, y, GRID_CELL, GRID_CELL),
                OBSTACLE_GRAY,
            ));
        }
    }
    obstacles
}

/// HSV to RGBA, hue in degrees
pub fn color_from_hsv(hue: f32, saturation: f32, value: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    [r + m, g + m, b + m, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_limits_inset() {
        let state = WorldState::new(1, Vec2::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.world_limits, Rect::new(0.0, 0.0, 2700.0, 2700.0));
        assert_eq!(state.box_limits, Rect::new(30.0, 30.0, 2640.0, 2640.0));
        assert_eq!(state.camera.target, Vec2::new(1350.0, 1350.0));
        assert_eq!(state.camera.offset, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_obstacle_grid_layout() {
        let grid = obstacle_grid();
        assert_eq!(grid.len(), 100);
        // First obstacle of the first (even) row
        assert_eq!(grid[0].rect, Rect::new(400.0, 400.0, 50.0, 50.0));
        // First obstacle of the second (odd, staggered) row
        assert_eq!(grid[10].rect, Rect::new(475.0, 550.0, 50.0, 50.0));
    }

    #[test]
    fn test_spawn_ball_goes_to_pending() {
        let mut state = WorldState::new(7, Vec2::new(800.0, 600.0), Tuning::default());
        state.spawn_ball(Vec2::new(500.0, 500.0));
        assert!(state.balls.is_empty());
        assert_eq!(state.pending_balls.len(), 1);

        let t = Tuning::default();
        let ball = &state.pending_balls[0];
        assert_eq!(ball.vel.y, t.spawn_speed);
        assert!(ball.vel.x.abs() <= t.spawn_speed);

        state.merge_pending();
        assert_eq!(state.balls.len(), 1);
        assert!(state.pending_balls.is_empty());
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let mut a = WorldState::new(42, Vec2::new(800.0, 600.0), Tuning::default());
        let mut b = WorldState::new(42, Vec2::new(800.0, 600.0), Tuning::default());
        for _ in 0..5 {
            a.spawn_ball(Vec2::ZERO);
            b.spawn_ball(Vec2::ZERO);
        }
        for (x, y) in a.pending_balls.iter().zip(&b.pending_balls) {
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_spawn_obstacle_is_centered() {
        let mut state = WorldState::new(1, Vec2::new(800.0, 600.0), Tuning::default());
        let before = state.obstacles.len();
        state.spawn_obstacle(Vec2::new(1000.0, 1000.0));
        let rect = state.obstacles.last().unwrap().rect;
        assert_eq!(state.obstacles.len(), before + 1);
        assert_eq!(rect, Rect::new(970.0, 970.0, 60.0, 60.0));
        assert_eq!(rect.center(), Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn test_camera_round_trip() {
        let mut camera = Camera::new(Vec2::new(1350.0, 1350.0), Vec2::new(400.0, 300.0));
        camera.rotation = 37.0;
        camera.zoom = 0.8;

        let screen = Vec2::new(123.0, 456.0);
        let world = camera.screen_to_world(screen);
        assert!(camera.world_to_screen(world).abs_diff_eq(screen, 1e-3));

        // Target always maps to the offset
        assert!(
            camera
                .world_to_screen(camera.target)
                .abs_diff_eq(camera.offset, 1e-3)
        );
    }

    #[test]
    fn test_color_from_hsv() {
        assert_eq!(color_from_hsv(0.0, 1.0, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(color_from_hsv(120.0, 1.0, 1.0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(color_from_hsv(240.0, 1.0, 1.0), [0.0, 0.0, 1.0, 1.0]);
        // Desaturated gray
        assert_eq!(color_from_hsv(200.0, 0.0, 0.5), [0.5, 0.5, 0.5, 1.0]);
    }
}
