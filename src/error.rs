//! Error types
//!
//! Configuration problems are fatal and surface at construction time.
//! Capacity rejections are local: callers skip the spawn and move on.

use thiserror::Error;

/// Invalid construction-time configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lane count must be at least 2, got {lane_count}")]
    TooFewLanes { lane_count: usize },
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("max_active_obstacles must be at least 1")]
    ZeroCapacity,
    #[error("player half-width {half_width} does not fit a road of half-width {road_half_width}")]
    PlayerWiderThanRoad {
        half_width: f32,
        road_half_width: f32,
    },
    #[error("despawn distance {despawn} must lie beyond the player at {player}")]
    DespawnBeforePlayer { despawn: f32, player: f32 },
    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The obstacle pool is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("obstacle pool is full ({capacity} live obstacles)")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Reject zero, negative, NaN and infinite values
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// An obstacle could not be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error(transparent)]
    Full(#[from] CapacityError),
    #[error("lane {lane} does not exist on a {lane_count}-lane road")]
    NoSuchLane { lane: usize, lane_count: usize },
}

/// Reject negative, NaN and infinite values
pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Reject `min > max`
pub(crate) fn require_ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("speed", 1.0).is_ok());
        assert!(matches!(
            require_positive("speed", 0.0),
            Err(ConfigError::NonPositive { field: "speed", .. })
        ));
        assert!(require_positive("speed", f32::NAN).is_err());
        assert!(require_positive("speed", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::TooFewLanes { lane_count: 1 };
        assert_eq!(err.to_string(), "lane count must be at least 2, got 1");
        let err = CapacityError { capacity: 8 };
        assert_eq!(err.to_string(), "obstacle pool is full (8 live obstacles)");
        let err = SpawnError::from(err);
        assert_eq!(err.to_string(), "obstacle pool is full (8 live obstacles)");
        let err = ConfigError::OutOfRange {
            field: "camera.follow_rate",
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        assert_eq!(err.to_string(), "camera.follow_rate must lie in [0, 1], got 1.5");
    }
}
