//! Lane geometry
//!
//! The road is `lane_count` equal-width lanes centered on x = 0. Lateral
//! positions map to lanes through half-open buckets, so every position has
//! exactly one lane.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, require_non_negative, require_positive};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneModel {
    lane_count: usize,
    lane_width: f32,
    clamp_margin: f32,
}

impl LaneModel {
    pub fn new(lane_count: usize, lane_width: f32, clamp_margin: f32) -> Result<Self, ConfigError> {
        if lane_count < 2 {
            return Err(ConfigError::TooFewLanes { lane_count });
        }
        require_positive("lane_width", lane_width)?;
        require_non_negative("clamp_margin", clamp_margin)?;
        Ok(Self {
            lane_count,
            lane_width,
            clamp_margin,
        })
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    #[inline]
    pub fn road_half_width(&self) -> f32 {
        self.lane_count as f32 * self.lane_width / 2.0
    }

    /// Lane the player starts in
    #[inline]
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Lateral center of lane `index`
    pub fn lane_center(&self, index: usize) -> f32 {
        let offset = (self.lane_count as f32 - 1.0) / 2.0;
        (index as f32 - offset) * self.lane_width
    }

    /// Lane containing lateral position `x`
    ///
    /// Lane `i` covers `[-hw + i*w, -hw + (i+1)*w)`; positions off the road
    /// belong to the outermost lane on their side.
    pub fn lane_index_of(&self, x: f32) -> usize {
        let bucket = ((x + self.road_half_width()) / self.lane_width).floor();
        if bucket.is_nan() || bucket < 0.0 {
            0
        } else {
            (bucket as usize).min(self.lane_count - 1)
        }
    }

    /// Clamp a body of half-width `half_width` centered at `x` onto the road
    pub fn clamp_to_road(&self, x: f32, half_width: f32) -> f32 {
        let bound = (self.road_half_width() - half_width + self.clamp_margin).max(0.0);
        x.clamp(-bound, bound)
    }
}
