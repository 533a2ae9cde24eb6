//! Rickshaw Run - A lane-dodging endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, collisions, session lifecycle)
//! - `config`: Construction-time tuning surface
//! - `assets`: Collision extents measured by the asset loader, with fallbacks
//! - `platform`: Frame pacing and browser bindings

pub mod assets;
pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use assets::VehicleExtents;
pub use config::GameConfig;
pub use error::{CapacityError, ConfigError, SpawnError};

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-frame tuning values were authored against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest delta the frame clock hands to the simulation (tab-resume guard)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Road layout
    pub const LANE_COUNT: usize = 3;
    pub const LANE_WIDTH: f32 = 10.0;
    /// Longitudinal distance from the obstacle spawn point to the player
    pub const PLAYER_DISTANCE: f32 = 103.0;
    /// Obstacles past this distance are behind the camera
    pub const OBSTACLE_DESPAWN_DISTANCE: f32 = 132.0;

    /// Vehicle scale shared by the player and the trucks
    pub const VEHICLE_SCALE: f32 = 1.5;
    /// Player collision width when the model bounds are unusable
    pub const FALLBACK_PLAYER_WIDTH: f32 = 1.8;
    /// Player collision length when the model bounds are unusable
    pub const FALLBACK_PLAYER_DEPTH: f32 = 2.0 * VEHICLE_SCALE;
    /// Truck body footprint
    pub const FALLBACK_OBSTACLE_WIDTH: f32 = 2.2 * VEHICLE_SCALE;
    pub const FALLBACK_OBSTACLE_DEPTH: f32 = 4.5 * VEHICLE_SCALE;
    /// Measured sizes at or below this are treated as missing
    pub const MIN_MEASURED_SIZE: f32 = 0.0001;
}

/// Convert a frame count at the reference rate to seconds
#[inline]
pub const fn frames_to_seconds(frames: f32) -> f32 {
    frames / consts::REFERENCE_FPS
}

/// Convert a per-frame rate at the reference rate to a per-second rate
#[inline]
pub const fn per_frame_to_per_second(per_frame: f32) -> f32 {
    per_frame * consts::REFERENCE_FPS
}
