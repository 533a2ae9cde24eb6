//! Chase camera lateral follow
//!
//! The camera eases toward the player's lateral position. The smoothing rate
//! is tuned per reference frame and rescaled for the actual delta.

use crate::consts::REFERENCE_FPS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    lateral: f32,
    follow_rate: f32,
}

impl CameraRig {
    pub fn new(follow_rate: f32) -> Self {
        Self {
            lateral: 0.0,
            follow_rate,
        }
    }

    #[inline]
    pub fn lateral(&self) -> f32 {
        self.lateral
    }

    pub fn reset(&mut self) {
        self.lateral = 0.0;
    }

    /// Close part of the gap to `target`, independent of frame rate
    pub fn follow(&mut self, target: f32, dt: f32) {
        let blend = 1.0 - (1.0 - self.follow_rate).powf(dt * REFERENCE_FPS);
        self.lateral += (target - self.lateral) * blend;
    }
}
