//! Data-driven simulation tuning
//!
//! Persisted separately from runtime state in LocalStorage so tweaks
//! survive reloads. Runtime world state itself is never saved.

use serde::{Deserialize, Serialize};

/// Simulation tuning values
///
/// Gravity, friction, and the separation impulse are per-tick quantities,
/// not per-second: the sim always runs at the fixed timestep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Velocity impulse added toward rotated "down" each tick
    pub gravity: f32,
    /// Per-tick velocity decay multiplier for balls, in (0, 1]
    pub friction: f32,
    /// Restitution applied on box-wall bounces, in [0, 1]
    pub elasticity: f32,
    /// Per-axis ball speed clamp
    pub max_speed: f32,
    /// Radius of spawned balls
    pub ball_radius: f32,
    /// Downward spawn speed; the sideways kick is random in +-this
    pub spawn_speed: f32,
    /// Fixed ball-ball separation impulse magnitude
    pub separation_impulse: f32,
    /// Side length of click-spawned obstacles
    pub obstacle_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 50.0,
            friction: 0.99,
            elasticity: 0.9,
            max_speed: 1000.0,
            ball_radius: 30.0,
            spawn_speed: 200.0,
            separation_impulse: 30.0,
            obstacle_size: 60.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "roto_box_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(tuning) = serde_json::from_str(&json) {
                    log::info!("Loaded tuning from LocalStorage");
                    return tuning;
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Tuning saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
