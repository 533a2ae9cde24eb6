//! Collision detection
//!
//! Everything on the road is an axis-aligned box in road space:
//! x is lateral, y is longitudinal (distance from the spawn point).

use glam::Vec2;

use super::obstacle::Obstacle;

/// Axis-aligned bounding box in road space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Overlap test, inclusive: boxes that touch count as a hit
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let gap = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        gap.x <= reach.x && gap.y <= reach.y
    }

    /// Shrink both axes by `amount`, never below zero
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            center: self.center,
            half_extents: (self.half_extents - Vec2::splat(amount)).max(Vec2::ZERO),
        }
    }
}

/// First obstacle overlapping `player`, in iteration order
pub fn first_hit<'a, I>(player: &Aabb, obstacles: I) -> Option<&'a Obstacle>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    obstacles
        .into_iter()
        .find(|obstacle| player.overlaps(&obstacle.bounds()))
}

/// Whether any obstacle overlaps `player`
pub fn check_collision<'a, I>(player: &Aabb, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    first_hit(player, obstacles).is_some()
}
