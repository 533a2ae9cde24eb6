//! Browser binding
//!
//! The page owns rendering, asset loading and input capture. It feeds input
//! intent and animation-frame timestamps in, and reads JSON snapshots out.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::assets::VehicleExtents;
use crate::config::GameConfig;
use crate::sim::{GameSession, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Rickshaw Run core loaded");
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

fn wall_clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    clock: FrameClock,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a session from an optional JSON config and the model sizes the
    /// asset loader measured (missing ones fall back)
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        player_width: Option<f32>,
        player_depth: Option<f32>,
        obstacle_width: Option<f32>,
        obstacle_depth: Option<f32>,
    ) -> Result<WebGame, JsError> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(js_error)?,
            None => GameConfig::default(),
        };
        let extents =
            VehicleExtents::from_measured(player_width, player_depth, obstacle_width, obstacle_depth);
        let session = GameSession::new(config, extents, wall_clock_seed()).map_err(js_error)?;
        Ok(Self {
            session,
            clock: FrameClock::new(),
            input: TickInput::default(),
        })
    }

    /// Held directions (level-triggered)
    pub fn set_input(&mut self, move_left: bool, move_right: bool) {
        self.input.move_left = move_left;
        self.input.move_right = move_right;
    }

    /// Start or restart on the next frame
    pub fn request_restart(&mut self) {
        self.input.restart_requested = true;
    }

    /// Toggle pause on the next frame
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Advance to the animation-frame timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let Some(dt) = self.clock.advance(now_ms) else {
            return;
        };
        self.session.tick(&self.input, dt);
        self.input.restart_requested = false;
        self.input.pause = false;
    }

    /// Drop the frame clock's history, e.g. when the tab becomes visible again
    pub fn resync_clock(&mut self) {
        self.clock.reset();
    }

    /// Start a new run with a fresh seed
    pub fn restart(&mut self) {
        self.session.restart_with_seed(wall_clock_seed());
        self.clock.reset();
    }

    pub fn score(&self) -> u32 {
        self.session.score() as u32
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score() as u32
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_error)
    }

    /// Events since the last call, for audio and UI cues
    pub fn take_events_json(&mut self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.take_events()).map_err(js_error)
    }
}
