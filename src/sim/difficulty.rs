//! Difficulty ramp
//!
//! A pure step function of accumulated score. Nothing is cached: the same
//! score always yields the same level.

use serde::{Deserialize, Serialize};

use crate::config::DifficultyConfig;
use crate::error::ConfigError;

/// Tuning values in effect for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    /// Obstacle approach speed (units/s)
    pub obstacle_speed: f32,
    /// Seconds between regular waves
    pub spawn_interval: f32,
    /// Road texture scroll speed (offset/s)
    pub scroll_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyCurve {
    config: DifficultyConfig,
}

impl DifficultyCurve {
    pub fn new(config: DifficultyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// Level at the start of a run
    pub fn initial(&self) -> DifficultyLevel {
        self.evaluate(0.0)
    }

    pub fn evaluate(&self, elapsed: f32) -> DifficultyLevel {
        let c = &self.config;
        let speed_steps = steps(elapsed, c.speed_step_distance);
        let interval_steps = steps(elapsed, c.interval_step_distance);

        DifficultyLevel {
            obstacle_speed: (c.speed_base + speed_steps * c.speed_step_amount).min(c.speed_max),
            spawn_interval: (c.interval_base - interval_steps * c.interval_step_amount)
                .max(c.interval_min),
            scroll_speed: (c.scroll_base + speed_steps * c.scroll_step_amount).min(c.scroll_max),
        }
    }
}

/// Whole steps completed after `elapsed`
#[inline]
fn steps(elapsed: f32, step_distance: f32) -> f32 {
    if elapsed.is_finite() && elapsed > 0.0 {
        (elapsed / step_distance).floor()
    } else {
        0.0
    }
}
