//! Game configuration
//!
//! Fixed at session construction. Every section deserializes with defaults,
//! so a JSON document only needs the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, require_non_negative, require_ordered, require_positive};
use crate::{frames_to_seconds, per_frame_to_per_second};

/// Road and lane layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub lane_count: usize,
    pub lane_width: f32,
    /// Extra slack past the road edge when clamping the player
    pub clamp_margin: f32,
    /// Longitudinal distance from the spawn point to the player
    pub player_distance: f32,
    /// Obstacles beyond this distance are removed
    pub despawn_distance: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            lane_width: LANE_WIDTH,
            clamp_margin: 0.0,
            player_distance: PLAYER_DISTANCE,
            despawn_distance: OBSTACLE_DESPAWN_DISTANCE,
        }
    }
}

impl RoadConfig {
    pub fn road_half_width(&self) -> f32 {
        self.lane_count as f32 * self.lane_width / 2.0
    }
}

/// Difficulty ramp, all values in seconds or units per second
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    // === Obstacle speed ===
    pub speed_base: f32,
    pub speed_max: f32,
    /// Score between speed (and scroll) steps
    pub speed_step_distance: f32,
    pub speed_step_amount: f32,

    // === Spawn interval ===
    pub interval_base: f32,
    pub interval_min: f32,
    pub interval_step_distance: f32,
    pub interval_step_amount: f32,

    // === Road scroll ===
    pub scroll_base: f32,
    pub scroll_max: f32,
    pub scroll_step_amount: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            speed_base: per_frame_to_per_second(0.3),
            speed_max: per_frame_to_per_second(1.0),
            speed_step_distance: 1000.0,
            speed_step_amount: per_frame_to_per_second(0.2),

            interval_base: frames_to_seconds(120.0),
            interval_min: frames_to_seconds(45.0),
            interval_step_distance: 1000.0,
            interval_step_amount: frames_to_seconds(5.0),

            scroll_base: per_frame_to_per_second(0.02),
            scroll_max: 3.0,
            scroll_step_amount: 0.2,
        }
    }
}

impl DifficultyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("speed_base", self.speed_base)?;
        require_positive("speed_max", self.speed_max)?;
        require_ordered("speed", self.speed_base, self.speed_max)?;
        require_positive("speed_step_distance", self.speed_step_distance)?;
        require_non_negative("speed_step_amount", self.speed_step_amount)?;

        require_positive("interval_base", self.interval_base)?;
        require_positive("interval_min", self.interval_min)?;
        require_ordered("interval", self.interval_min, self.interval_base)?;
        require_positive("interval_step_distance", self.interval_step_distance)?;
        require_non_negative("interval_step_amount", self.interval_step_amount)?;

        require_non_negative("scroll_base", self.scroll_base)?;
        require_non_negative("scroll_max", self.scroll_max)?;
        require_ordered("scroll", self.scroll_base, self.scroll_max)?;
        require_non_negative("scroll_step_amount", self.scroll_step_amount)?;
        Ok(())
    }
}

/// Spawn scheduling and fairness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub max_active_obstacles: usize,
    /// Seconds in one lane before targeted pressure kicks in
    pub time_to_trigger: f32,
    pub targeted_cooldown: f32,
    /// Minimum gap after any successful spawn
    pub global_cooldown: f32,
    /// Longitudinal offset between obstacles of one wave
    pub wave_stagger: f32,
    /// Half-length of the danger zone around the spawn point
    pub safety_window: f32,
    /// Reset the interval timer even when a wave could not spawn
    pub reset_interval_on_skip: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_active_obstacles: 8,
            time_to_trigger: 3.0,
            targeted_cooldown: 6.0,
            global_cooldown: frames_to_seconds(30.0),
            wave_stagger: 12.0,
            safety_window: 25.0,
            reset_interval_on_skip: true,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_active_obstacles == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        require_positive("time_to_trigger", self.time_to_trigger)?;
        require_non_negative("targeted_cooldown", self.targeted_cooldown)?;
        require_non_negative("global_cooldown", self.global_cooldown)?;
        require_non_negative("wave_stagger", self.wave_stagger)?;
        require_non_negative("safety_window", self.safety_window)?;
        Ok(())
    }
}

/// Player handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Lateral speed while a direction is held
    pub move_speed: f32,
    /// Shrinks the player hitbox on both axes (forgiveness)
    pub hitbox_inset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: per_frame_to_per_second(0.15),
            hitbox_inset: 0.0,
        }
    }
}

/// Score accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub score_rate_per_second: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_rate_per_second: per_frame_to_per_second(1.0),
        }
    }
}

/// Roadside props
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    pub enabled: bool,
    pub spawn_interval: f32,
    /// Props move at this fraction of obstacle speed (parallax)
    pub speed_factor: f32,
    /// Spawn position relative to the obstacle spawn point (negative is further away)
    pub spawn_position: f32,
    pub despawn_distance: f32,
    /// Minimum gap between the road edge and a prop
    pub edge_offset: f32,
    /// Random extra gap on top of `edge_offset`
    pub edge_spread: f32,
    pub max_props: usize,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval: frames_to_seconds(90.0),
            speed_factor: 0.95,
            spawn_position: -50.0,
            despawn_distance: 142.0,
            edge_offset: 5.0,
            edge_spread: 10.0,
            max_props: 24,
        }
    }
}

/// Camera smoothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining gap closed per reference frame
    pub follow_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { follow_rate: 0.05 }
    }
}

/// Complete construction-time configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub road: RoadConfig,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    pub player: PlayerConfig,
    pub scoring: ScoringConfig,
    pub scenery: SceneryConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section; lane geometry is validated by `LaneModel::new`
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("player_distance", self.road.player_distance)?;
        if self.road.despawn_distance <= self.road.player_distance {
            return Err(ConfigError::DespawnBeforePlayer {
                despawn: self.road.despawn_distance,
                player: self.road.player_distance,
            });
        }
        self.difficulty.validate()?;
        self.spawn.validate()?;
        require_positive("move_speed", self.player.move_speed)?;
        require_non_negative("hitbox_inset", self.player.hitbox_inset)?;
        require_positive("score_rate_per_second", self.scoring.score_rate_per_second)?;
        if self.scenery.enabled {
            require_positive("scenery.spawn_interval", self.scenery.spawn_interval)?;
            require_non_negative("scenery.speed_factor", self.scenery.speed_factor)?;
            require_non_negative("scenery.edge_offset", self.scenery.edge_offset)?;
            require_non_negative("scenery.edge_spread", self.scenery.edge_spread)?;
        }
        let rate = self.camera.follow_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera.follow_rate",
                min: 0.0,
                max: 1.0,
                value: rate,
            });
        }
        Ok(())
    }
}
