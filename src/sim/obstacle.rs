//! Obstacle vehicles and the pool that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::error::CapacityError;

/// An oncoming truck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane_index: usize,
    /// Lane center the truck drives down
    pub lateral_position: f32,
    /// Distance travelled from the spawn point toward the player
    pub longitudinal_position: f32,
    /// Speed applied on the most recent advance
    pub speed: f32,
    pub half_width: f32,
    pub half_depth: f32,
    /// Session time (seconds) at spawn
    pub spawn_time: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.lateral_position, self.longitudinal_position),
            Vec2::new(self.half_width, self.half_depth),
        )
    }
}

/// Live obstacles, kept in spawn (id) order
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    capacity: usize,
}

impl ObstaclePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            obstacles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, obstacle: Obstacle) -> Result<(), CapacityError> {
        if self.obstacles.len() >= self.capacity {
            return Err(CapacityError {
                capacity: self.capacity,
            });
        }
        self.obstacles.push(obstacle);
        Ok(())
    }

    /// Move every obstacle toward the player at `speed`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.speed = speed;
            obstacle.longitudinal_position += speed * dt;
        }
    }

    /// Remove obstacles past `threshold`, returning how many left
    pub fn despawn_past(&mut self, threshold: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles
            .retain(|o| o.longitudinal_position <= threshold);
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Set every obstacle's recorded speed to zero (run is frozen)
    pub fn halt(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.speed = 0.0;
        }
    }

    /// Lanes holding an obstacle within `window` of the spawn point
    pub fn occupied_lanes(&self, lane_count: usize, window: f32) -> Vec<bool> {
        let mut occupied = vec![false; lane_count];
        for obstacle in &self.obstacles {
            if obstacle.longitudinal_position.abs() <= window {
                if let Some(slot) = occupied.get_mut(obstacle.lane_index) {
                    *slot = true;
                }
            }
        }
        occupied
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.obstacles.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truck(id: u32, lane_index: usize, longitudinal: f32) -> Obstacle {
        Obstacle {
            id,
            lane_index,
            lateral_position: (lane_index as f32 - 1.0) * 10.0,
            longitudinal_position: longitudinal,
            speed: 0.0,
            half_width: 1.65,
            half_depth: 3.375,
            spawn_time: 0.0,
        }
    }

    #[test]
    fn test_add_rejects_past_capacity() {
        let mut pool = ObstaclePool::new(2);
        assert!(pool.add(truck(1, 0, 0.0)).is_ok());
        assert!(pool.add(truck(2, 1, 0.0)).is_ok());
        assert_eq!(pool.add(truck(3, 2, 0.0)), Err(CapacityError { capacity: 2 }));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.remaining_capacity(), 0);
    }

    #[test]
    fn test_advance_moves_all() {
        let mut pool = ObstaclePool::new(4);
        pool.add(truck(1, 0, 0.0)).unwrap();
        pool.add(truck(2, 2, -12.0)).unwrap();
        pool.advance(0.5, 18.0);
        let positions: Vec<f32> = pool.iter().map(|o| o.longitudinal_position).collect();
        assert_eq!(positions, vec![9.0, -3.0]);
        assert!(pool.iter().all(|o| o.speed == 18.0));
    }

    #[test]
    fn test_despawn_past_threshold() {
        let mut pool = ObstaclePool::new(4);
        pool.add(truck(1, 0, 140.0)).unwrap();
        pool.add(truck(2, 1, 60.0)).unwrap();
        pool.add(truck(3, 2, 132.0)).unwrap();
        assert_eq!(pool.despawn_past(132.0), 1);
        let ids: Vec<u32> = pool.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_occupied_lanes_window() {
        let mut pool = ObstaclePool::new(4);
        pool.add(truck(1, 0, 10.0)).unwrap();
        pool.add(truck(2, 2, 80.0)).unwrap();
        pool.add(truck(3, 1, -20.0)).unwrap();
        assert_eq!(pool.occupied_lanes(3, 25.0), vec![true, true, false]);
        assert_eq!(pool.occupied_lanes(3, 5.0), vec![false, false, false]);
    }

    #[test]
    fn test_halt_and_clear() {
        let mut pool = ObstaclePool::new(4);
        pool.add(truck(1, 0, 10.0)).unwrap();
        pool.advance(1.0, 20.0);
        pool.halt();
        assert!(pool.iter().all(|o| o.speed == 0.0));
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.remaining_capacity(), 4);
    }
}
