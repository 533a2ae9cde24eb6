//! Obstacle spawn scheduling
//!
//! Once per tick the scheduler decides whether obstacles appear and in which
//! lanes. Two modes, tried in priority order:
//!
//! 1. Targeted pressure: the player has camped in one lane too long, so the
//!    other lanes fill up and the player's lane is left open.
//! 2. Regular wave: when the interval timer runs out, shuffle the lanes, keep
//!    one open and fill (up to) two others with staggered trucks.
//!
//! Every plan keeps at least one lane free of obstacles inside the danger zone
//! around the spawn point. The scheduler only plans; the session owns the pool
//! and materializes the placements.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePool;
use crate::config::SpawnConfig;
use crate::error::ConfigError;

/// Lanes filled by one regular wave (capped at `lane_count - 1`)
pub const WAVE_WIDTH: usize = 2;
/// Lanes filled by one targeted-pressure spawn
pub const TARGETED_WIDTH: usize = 2;

/// Which rule produced a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// Reaction to lane camping
    Targeted,
    /// Regular wave with its intended open lane clear
    Wave,
    /// Regular wave reduced to one truck because the open lane was occupied
    WaveSingle,
}

/// One obstacle to create
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub lane: usize,
    /// Longitudinal position relative to the spawn point
    pub offset: f32,
}

/// Result of a spawn decision
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlan {
    pub kind: SpawnKind,
    pub placements: Vec<Placement>,
    /// The player's dwell timer restarts once this plan lands
    pub resets_lane_timer: bool,
}

impl SpawnPlan {
    pub fn lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.placements.iter().map(|p| p.lane)
    }
}

/// What the scheduler sees of the world this tick
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub dt: f32,
    pub lane_count: usize,
    pub player_lane: usize,
    pub time_in_lane: f32,
    /// Current wave interval from the difficulty curve
    pub spawn_interval: f32,
    pub pool: &'a ObstaclePool,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    global_cooldown: f32,
    targeted_cooldown: f32,
    /// Seconds until the next regular wave is due
    interval_timer: f32,
}

impl SpawnScheduler {
    pub fn new(config: SpawnConfig, initial_interval: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            global_cooldown: 0.0,
            targeted_cooldown: 0.0,
            interval_timer: initial_interval,
        })
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn global_cooldown(&self) -> f32 {
        self.global_cooldown
    }

    pub fn targeted_cooldown(&self) -> f32 {
        self.targeted_cooldown
    }

    pub fn interval_timer(&self) -> f32 {
        self.interval_timer
    }

    /// Clear cooldowns and restart the wave timer
    pub fn reset(&mut self, initial_interval: f32) {
        self.global_cooldown = 0.0;
        self.targeted_cooldown = 0.0;
        self.interval_timer = initial_interval;
    }

    /// Advance timers by `ctx.dt` and decide this tick's spawn, if any
    pub fn update<R: Rng>(&mut self, ctx: &SpawnContext, rng: &mut R) -> Option<SpawnPlan> {
        self.global_cooldown = (self.global_cooldown - ctx.dt).max(0.0);
        self.targeted_cooldown = (self.targeted_cooldown - ctx.dt).max(0.0);
        self.interval_timer -= ctx.dt;

        let occupied = ctx.pool.occupied_lanes(ctx.lane_count, self.config.safety_window);
        let remaining = ctx.pool.remaining_capacity();

        if let Some(plan) = self.try_targeted(ctx, &occupied, remaining, rng) {
            self.targeted_cooldown = self.config.targeted_cooldown;
            self.global_cooldown = self.config.global_cooldown;
            return Some(plan);
        }

        if self.interval_timer > 0.0 {
            return None;
        }

        let plan = if self.global_cooldown <= 0.0 && remaining > 0 {
            self.plan_wave(ctx.lane_count, &occupied, remaining, rng)
        } else {
            None
        };

        match &plan {
            Some(_) => {
                self.global_cooldown = self.config.global_cooldown;
                self.interval_timer = ctx.spawn_interval;
            }
            None if self.config.reset_interval_on_skip => {
                log::debug!("Wave skipped (cooldown or capacity), interval timer reset");
                self.interval_timer = ctx.spawn_interval;
            }
            None => {}
        }
        plan
    }

    fn try_targeted<R: Rng>(
        &self,
        ctx: &SpawnContext,
        occupied: &[bool],
        remaining: usize,
        rng: &mut R,
    ) -> Option<SpawnPlan> {
        if ctx.time_in_lane <= self.config.time_to_trigger
            || self.targeted_cooldown > 0.0
            || remaining == 0
        {
            return None;
        }

        // Nearest lanes to the player first, ties broken at random
        let mut others: Vec<(usize, usize, bool)> = (0..ctx.lane_count)
            .filter(|&lane| lane != ctx.player_lane)
            .map(|lane| (lane.abs_diff(ctx.player_lane), lane, rng.random_bool(0.5)))
            .collect();
        others.sort_by_key(|&(distance, _, coin)| (distance, coin));

        let mut lanes: Vec<usize> = others.into_iter().map(|(_, lane, _)| lane).collect();
        lanes.truncate(TARGETED_WIDTH.min(remaining));

        let lanes = keep_escape_lane(lanes, occupied)?;
        log::debug!(
            "Targeted spawn in lanes {:?} (player camped in lane {} for {:.1}s)",
            lanes,
            ctx.player_lane,
            ctx.time_in_lane
        );
        Some(SpawnPlan {
            kind: SpawnKind::Targeted,
            placements: lanes
                .into_iter()
                .map(|lane| Placement { lane, offset: 0.0 })
                .collect(),
            resets_lane_timer: true,
        })
    }

    fn plan_wave<R: Rng>(
        &self,
        lane_count: usize,
        occupied: &[bool],
        remaining: usize,
        rng: &mut R,
    ) -> Option<SpawnPlan> {
        let mut order: Vec<usize> = (0..lane_count).collect();
        order.shuffle(rng);
        let open_lane = order[0];
        let width = WAVE_WIDTH.min(lane_count - 1);
        let candidates = &order[1..=width];

        if occupied[open_lane] {
            // One truck only, in whichever candidate still leaves an escape
            let first = rng.random_range(0..candidates.len());
            let lane = (0..candidates.len())
                .map(|i| candidates[(first + i) % candidates.len()])
                .find(|&lane| leaves_escape_lane(&[lane], occupied))?;
            log::debug!("Open lane {open_lane} occupied, single truck in lane {lane}");
            return Some(SpawnPlan {
                kind: SpawnKind::WaveSingle,
                placements: vec![Placement { lane, offset: 0.0 }],
                resets_lane_timer: false,
            });
        }

        let lanes: Vec<usize> = candidates.iter().copied().take(remaining).collect();
        let lanes = keep_escape_lane(lanes, occupied)?;
        log::debug!("Wave in lanes {lanes:?}, open lane {open_lane}");
        Some(SpawnPlan {
            kind: SpawnKind::Wave,
            placements: lanes
                .into_iter()
                .enumerate()
                .map(|(k, lane)| Placement {
                    lane,
                    offset: -(k as f32) * self.config.wave_stagger,
                })
                .collect(),
            resets_lane_timer: false,
        })
    }
}

/// Whether some lane is neither `planned` nor `occupied`
pub fn leaves_escape_lane(planned: &[usize], occupied: &[bool]) -> bool {
    occupied
        .iter()
        .enumerate()
        .any(|(lane, &busy)| !busy && !planned.contains(&lane))
}

/// Drop lanes from the back of `lanes` until an escape lane remains
fn keep_escape_lane(mut lanes: Vec<usize>, occupied: &[bool]) -> Option<Vec<usize>> {
    while !lanes.is_empty() && !leaves_escape_lane(&lanes, occupied) {
        lanes.pop();
    }
    if lanes.is_empty() { None } else { Some(lanes) }
}
