//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time only, no frame counting
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod difficulty;
pub mod lane;
pub mod obstacle;
pub mod player;
pub mod scenery;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::CameraRig;
pub use collision::{Aabb, check_collision, first_hit};
pub use difficulty::{DifficultyCurve, DifficultyLevel};
pub use lane::LaneModel;
pub use obstacle::{Obstacle, ObstaclePool};
pub use player::{PlayerController, PlayerState};
pub use scenery::{PropKind, SceneryField, SceneryProp};
pub use spawn::{Placement, SpawnContext, SpawnKind, SpawnPlan, SpawnScheduler};
pub use state::{FrameSnapshot, GameEvent, GamePhase, GameSession, ObstacleView};
pub use tick::{TickInput, tick};
