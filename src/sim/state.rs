//! Session state and lifecycle
//!
//! `GameSession` owns every piece of mutable simulation state. Rendering,
//! audio and UI read it through `snapshot()` and `take_events()`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::difficulty::{DifficultyCurve, DifficultyLevel};
use super::lane::LaneModel;
use super::obstacle::{Obstacle, ObstaclePool};
use super::player::PlayerController;
use super::scenery::{SceneryField, SceneryProp};
use super::spawn::{SpawnKind, SpawnScheduler};
use crate::assets::VehicleExtents;
use crate::config::GameConfig;
use crate::error::{ConfigError, SpawnError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Run ended by a crash; waits for restart
    GameOver,
}

/// Notable things that happened during a tick (for audio/UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ObstaclesSpawned { kind: SpawnKind, count: usize },
    Crashed { obstacle_id: u32, score: u64 },
    Paused,
    Resumed,
    Restarted { seed: u64 },
}

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub lane_index: usize,
    pub lateral_position: f32,
    pub longitudinal_position: f32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(o: &Obstacle) -> Self {
        Self {
            id: o.id,
            lane_index: o.lane_index,
            lateral_position: o.lateral_position,
            longitudinal_position: o.longitudinal_position,
        }
    }
}

/// Read-only view of a session, produced after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player_lateral_position: f32,
    pub player_lane: usize,
    pub obstacles: Vec<ObstacleView>,
    /// Whole distance units survived
    pub score: u64,
    pub best_score: u64,
    pub is_game_over: bool,
    pub phase: GamePhase,
    pub difficulty: DifficultyLevel,
    /// Road texture offset in [0, 1)
    pub road_offset: f32,
    pub camera_lateral: f32,
    pub scenery: Vec<SceneryProp>,
}

/// A single run of the game plus everything needed to restart it
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) config: GameConfig,
    pub(super) lanes: LaneModel,
    pub(super) curve: DifficultyCurve,
    pub(super) extents: VehicleExtents,

    pub(super) phase: GamePhase,
    pub(super) score: f32,
    pub(super) best_score: f32,
    /// Seconds of running time this run
    pub(super) elapsed: f32,
    pub(super) difficulty: DifficultyLevel,
    pub(super) road_offset: f32,

    pub(super) player: PlayerController,
    pub(super) obstacles: ObstaclePool,
    pub(super) scheduler: SpawnScheduler,
    pub(super) scenery: SceneryField,
    pub(super) camera: CameraRig,

    /// Run seed for reproducibility
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) next_id: u32,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Validate the configuration and build a session in `Ready`
    pub fn new(config: GameConfig, extents: VehicleExtents, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let lanes = LaneModel::new(
            config.road.lane_count,
            config.road.lane_width,
            config.road.clamp_margin,
        )?;
        for (field, value) in [
            ("player_half_width", extents.player_half_width),
            ("player_half_depth", extents.player_half_depth),
            ("obstacle_half_width", extents.obstacle_half_width),
            ("obstacle_half_depth", extents.obstacle_half_depth),
        ] {
            crate::error::require_positive(field, value)?;
        }
        if extents.player_half_width >= lanes.road_half_width() {
            return Err(ConfigError::PlayerWiderThanRoad {
                half_width: extents.player_half_width,
                road_half_width: lanes.road_half_width(),
            });
        }

        let curve = DifficultyCurve::new(config.difficulty.clone())?;
        let difficulty = curve.initial();
        let scheduler = SpawnScheduler::new(config.spawn.clone(), difficulty.spawn_interval)?;
        let player = PlayerController::new(
            &lanes,
            extents.player_half_width,
            extents.player_half_depth,
            config.player.move_speed,
        );

        Ok(Self {
            obstacles: ObstaclePool::new(config.spawn.max_active_obstacles),
            scenery: SceneryField::new(config.scenery.clone()),
            camera: CameraRig::new(config.camera.follow_rate),
            lanes,
            curve,
            extents,
            phase: GamePhase::Ready,
            score: 0.0,
            best_score: 0.0,
            elapsed: 0.0,
            difficulty,
            road_offset: 0.0,
            player,
            scheduler,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
            config,
        })
    }

    /// Session with default tuning and fallback vehicle extents
    pub fn with_defaults(seed: u64) -> Result<Self, ConfigError> {
        Self::new(GameConfig::default(), VehicleExtents::default(), seed)
    }

    /// Leave `Ready` and begin the first run
    pub fn start(&mut self) {
        if self.phase != GamePhase::Ready {
            log::debug!("start() ignored in {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!("Run started with seed {}", self.seed);
    }

    /// Reset the run with the same seed and start running
    pub fn restart(&mut self) {
        self.restart_with_seed(self.seed);
    }

    /// Reset the run with a seed drawn from the current one and start running
    ///
    /// Used for player-requested restarts so each run gets new traffic while
    /// the whole sequence of runs stays reproducible from the first seed.
    pub fn restart_next(&mut self) {
        let seed = self.rng.random();
        self.restart_with_seed(seed);
    }

    /// Reset the run with a given seed and start running
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0.0;
        self.elapsed = 0.0;
        self.difficulty = self.curve.initial();
        self.road_offset = 0.0;
        self.next_id = 1;
        self.player.reset(&self.lanes);
        self.obstacles.clear();
        self.scheduler.reset(self.difficulty.spawn_interval);
        self.scenery.clear();
        self.camera.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted { seed });
        log::info!("Run restarted with seed {seed}");
    }

    /// Place an obstacle directly, bypassing the scheduler
    pub fn spawn_obstacle_at(&mut self, lane: usize, longitudinal_position: f32) -> Result<u32, SpawnError> {
        let lane_count = self.lanes.lane_count();
        if lane >= lane_count {
            return Err(SpawnError::NoSuchLane { lane, lane_count });
        }
        let id = self.next_id;
        self.obstacles.add(Obstacle {
            id,
            lane_index: lane,
            lateral_position: self.lanes.lane_center(lane),
            longitudinal_position,
            speed: self.difficulty.obstacle_speed,
            half_width: self.extents.obstacle_half_width,
            half_depth: self.extents.obstacle_half_depth,
            spawn_time: self.elapsed,
        })?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    /// Everything a renderer needs for this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            player_lateral_position: self.player.lateral_position(),
            player_lane: self.player.current_lane(),
            obstacles: self.obstacles.iter().map(ObstacleView::from).collect(),
            score: self.score() as u64,
            best_score: self.best_score as u64,
            is_game_over: self.is_game_over(),
            phase: self.phase,
            difficulty: self.difficulty,
            road_offset: self.road_offset,
            camera_lateral: self.camera.lateral(),
            scenery: self.scenery.props().to_vec(),
        }
    }

    /// Drain events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Best score across all runs of this session
    pub fn best_score(&self) -> f32 {
        self.best_score
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn lanes(&self) -> &LaneModel {
        &self.lanes
    }

    pub fn extents(&self) -> &VehicleExtents {
        &self.extents
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstaclePool {
        &self.obstacles
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn scenery(&self) -> &SceneryField {
        &self.scenery
    }
}
