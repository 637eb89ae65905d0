//! Roto Box - a rotating-gravity physics toy
//!
//! Balls bounce inside a big checkerboard box, pile up on obstacles, and can
//! be grabbed and thrown with the pointer. Rotating the camera rotates what
//! "down" means, so the whole box spills sideways.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, world state)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven simulation tuning

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Simulation and world constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (square, y-down)
    pub const WORLD_SIZE: f32 = 2700.0;
    /// Inset from the world edge to the walls balls actually bounce off
    pub const BOUNDARY_MARGIN: f32 = 30.0;
    /// Checkerboard cell size for the box floor
    pub const CHECKER_SIZE: f32 = 30.0;

    /// Radius of the four collision probes on each ball
    pub const PROBE_RADIUS: f32 = 5.0;

    /// Camera rotation rate while a rotate key is held (degrees/sec)
    pub const CAMERA_ROTATE_SPEED: f32 = 120.0;
    /// Camera zoom rate while a zoom key is held (zoom units/sec)
    pub const CAMERA_ZOOM_SPEED: f32 = 0.6;
    /// Zooming out stops here
    pub const CAMERA_MIN_ZOOM: f32 = 0.1;
}
