//! Collision extents derived from loaded vehicle models
//!
//! The asset loader measures model bounds once; anything it could not measure
//! falls back to the documented vehicle footprint.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Half-extents used for collision (lateral width, longitudinal depth)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleExtents {
    pub player_half_width: f32,
    pub player_half_depth: f32,
    pub obstacle_half_width: f32,
    pub obstacle_half_depth: f32,
}

impl Default for VehicleExtents {
    fn default() -> Self {
        Self {
            player_half_width: FALLBACK_PLAYER_WIDTH / 2.0,
            player_half_depth: FALLBACK_PLAYER_DEPTH / 2.0,
            obstacle_half_width: FALLBACK_OBSTACLE_WIDTH / 2.0,
            obstacle_half_depth: FALLBACK_OBSTACLE_DEPTH / 2.0,
        }
    }
}

impl VehicleExtents {
    /// Build extents from full measured sizes, substituting fallbacks for
    /// missing or degenerate measurements
    pub fn from_measured(
        player_width: Option<f32>,
        player_depth: Option<f32>,
        obstacle_width: Option<f32>,
        obstacle_depth: Option<f32>,
    ) -> Self {
        Self {
            player_half_width: measured_or("player width", player_width, FALLBACK_PLAYER_WIDTH)
                / 2.0,
            player_half_depth: measured_or("player depth", player_depth, FALLBACK_PLAYER_DEPTH)
                / 2.0,
            obstacle_half_width: measured_or(
                "obstacle width",
                obstacle_width,
                FALLBACK_OBSTACLE_WIDTH,
            ) / 2.0,
            obstacle_half_depth: measured_or(
                "obstacle depth",
                obstacle_depth,
                FALLBACK_OBSTACLE_DEPTH,
            ) / 2.0,
        }
    }
}

fn measured_or(label: &str, measured: Option<f32>, fallback: f32) -> f32 {
    match measured {
        Some(size) if size.is_finite() && size > MIN_MEASURED_SIZE => size,
        Some(size) => {
            log::warn!("Measured {label} ({size}) is invalid, using fallback {fallback}");
            fallback
        }
        None => {
            log::warn!("No measured {label}, using fallback {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_sizes_are_halved() {
        let extents = VehicleExtents::from_measured(Some(2.4), Some(3.6), Some(3.0), Some(7.0));
        assert!((extents.player_half_width - 1.2).abs() < 1e-6);
        assert!((extents.player_half_depth - 1.8).abs() < 1e-6);
        assert!((extents.obstacle_half_width - 1.5).abs() < 1e-6);
        assert!((extents.obstacle_half_depth - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_measurements_fall_back() {
        let extents = VehicleExtents::from_measured(Some(0.0), Some(f32::NAN), None, Some(-1.0));
        assert_eq!(extents, VehicleExtents::default());
        assert!((extents.player_half_width - 0.9).abs() < 1e-6);
    }
}
