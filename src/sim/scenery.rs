//! Roadside props
//!
//! Lamp posts, trees and buildings scroll past beside the road slightly
//! slower than the traffic, giving the renderer a parallax layer. They never
//! collide with anything.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SceneryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropKind {
    LampPost,
    Tree,
    Building,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneryProp {
    pub id: u32,
    pub kind: PropKind,
    pub lateral_position: f32,
    pub longitudinal_position: f32,
}

#[derive(Debug, Clone)]
pub struct SceneryField {
    config: SceneryConfig,
    props: Vec<SceneryProp>,
    /// Seconds since the last prop
    spawn_timer: f32,
    next_id: u32,
}

impl SceneryField {
    pub fn new(config: SceneryConfig) -> Self {
        Self {
            props: Vec::with_capacity(config.max_props),
            config,
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    pub fn props(&self) -> &[SceneryProp] {
        &self.props
    }

    pub fn clear(&mut self) {
        self.props.clear();
        self.spawn_timer = 0.0;
        self.next_id = 1;
    }

    /// Spawn on schedule, then move and despawn props
    pub fn update<R: Rng>(&mut self, dt: f32, obstacle_speed: f32, road_half_width: f32, rng: &mut R) {
        if !self.config.enabled {
            return;
        }

        self.spawn_timer += dt;
        if self.spawn_timer > self.config.spawn_interval {
            self.spawn_timer = 0.0;
            if self.props.len() < self.config.max_props {
                self.spawn(road_half_width, rng);
            }
        }

        let step = obstacle_speed * self.config.speed_factor * dt;
        for prop in &mut self.props {
            prop.longitudinal_position += step;
        }
        let limit = self.config.despawn_distance;
        self.props.retain(|p| p.longitudinal_position <= limit);
    }

    fn spawn<R: Rng>(&mut self, road_half_width: f32, rng: &mut R) {
        let kind = match rng.random_range(0..3) {
            0 => PropKind::LampPost,
            1 => PropKind::Tree,
            _ => PropKind::Building,
        };
        let side = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let offset = road_half_width
            + self.config.edge_offset
            + rng.random::<f32>() * self.config.edge_spread;

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.props.push(SceneryProp {
            id,
            kind,
            lateral_position: side * offset,
            longitudinal_position: self.config.spawn_position,
        });
    }
}
