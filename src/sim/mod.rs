//! Deterministic simulation module
//!
//! All toy logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod geom;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallState, HitSide, resolve_ball_collisions};
pub use geom::{Circle, Rect};
pub use state::{Camera, Obstacle, WorldState, color_from_hsv};
pub use tick::{TickInput, tick};
