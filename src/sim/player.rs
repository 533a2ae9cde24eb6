//! The player's vehicle
//!
//! Movement is continuous; lanes are derived from position. The lane dwell
//! timer feeds targeted-pressure spawning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::lane::LaneModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub lateral_position: f32,
    pub half_width: f32,
    pub half_depth: f32,
    pub current_lane: usize,
    /// Seconds since the lane index last changed
    pub time_in_current_lane: f32,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    move_speed: f32,
}

impl PlayerController {
    /// Player centered on the road
    pub fn new(lanes: &LaneModel, half_width: f32, half_depth: f32, move_speed: f32) -> Self {
        let mut controller = Self {
            state: PlayerState {
                lateral_position: 0.0,
                half_width,
                half_depth,
                current_lane: 0,
                time_in_current_lane: 0.0,
            },
            move_speed,
        };
        controller.reset(lanes);
        controller
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn lateral_position(&self) -> f32 {
        self.state.lateral_position
    }

    #[inline]
    pub fn current_lane(&self) -> usize {
        self.state.current_lane
    }

    #[inline]
    pub fn time_in_current_lane(&self) -> f32 {
        self.state.time_in_current_lane
    }

    /// Back to the middle of the road with a fresh dwell timer
    pub fn reset(&mut self, lanes: &LaneModel) {
        let x = lanes.clamp_to_road(0.0, self.state.half_width);
        self.state.lateral_position = x;
        self.state.current_lane = lanes.lane_index_of(x);
        self.state.time_in_current_lane = 0.0;
    }

    /// Apply held directions for `dt` seconds
    pub fn apply_input(&mut self, move_left: bool, move_right: bool, dt: f32, lanes: &LaneModel) {
        let mut x = self.state.lateral_position;
        if move_left {
            x -= self.move_speed * dt;
        }
        if move_right {
            x += self.move_speed * dt;
        }
        x = lanes.clamp_to_road(x, self.state.half_width);
        self.state.lateral_position = x;

        let lane = lanes.lane_index_of(x);
        if lane != self.state.current_lane {
            self.state.current_lane = lane;
            self.state.time_in_current_lane = 0.0;
        } else {
            self.state.time_in_current_lane += dt;
        }
    }

    pub fn reset_lane_timer(&mut self) {
        self.state.time_in_current_lane = 0.0;
    }

    /// Collision box with the player sitting `distance` from the spawn point
    pub fn bounds(&self, distance: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.state.lateral_position, distance),
            Vec2::new(self.state.half_width, self.state.half_depth),
        )
    }
}
