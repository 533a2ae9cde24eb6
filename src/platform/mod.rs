//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing (wall-clock timestamps to simulation deltas)
//! - Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_FRAME_DT, REFERENCE_FPS};

/// Turns animation-frame timestamps into clamped simulation deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta for the frame at `now_ms`
    ///
    /// The first frame gets one reference frame. Gaps (tab suspended, debugger)
    /// are clamped to `MAX_FRAME_DT`. Returns `None` when the clock did not
    /// move forward.
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return Some(1.0 / REFERENCE_FPS);
        };
        let dt = ((now_ms - last) / 1000.0) as f32;
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        Some(dt.min(MAX_FRAME_DT))
    }

    /// Forget the last timestamp (after a pause or visibility change)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one_reference_frame() {
        let mut clock = FrameClock::new();
        let dt = clock.advance(1234.0).unwrap();
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let dt = clock.advance(16.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), Some(MAX_FRAME_DT));
    }

    #[test]
    fn test_stalled_or_backwards_clock() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(100.0), None);
        assert_eq!(clock.advance(50.0), None);
        // Resumes from the latest timestamp
        let dt = clock.advance(66.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restarts_pacing() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        let dt = clock.advance(90_000.0).unwrap();
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
    }
}
