//! Rickshaw Run entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs the simulation headless with the demo autopilot, which
//! is handy for soak-testing tuning changes:
//!
//! ```text
//! RUST_LOG=info rickshaw-run --seconds 300 --seed 7 --config tuning.json
//! ```

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use rickshaw_run::consts::REFERENCE_FPS;
    use rickshaw_run::sim::{GameEvent, GameSession, autopilot};
    use rickshaw_run::{GameConfig, VehicleExtents};

    /// Run the simulation headless with the demo autopilot at the wheel.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Options {
        /// Simulated seconds to run (at the 60 Hz reference rate).
        #[arg(long, value_name = "SECONDS", default_value_t = 120.0)]
        pub seconds: f32,
        /// Seed of the first run; later runs derive their seeds from it.
        #[arg(long, default_value_t = 12345)]
        pub seed: u64,
        /// JSON configuration overriding the default tuning.
        #[arg(long, value_name = "PATH")]
        pub config: Option<PathBuf>,
    }

    #[derive(Debug, Default)]
    struct RunStats {
        runs: u32,
        crashes: u32,
        spawns: usize,
    }

    pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
        let config = match &options.config {
            Some(path) => GameConfig::from_json(&fs::read_to_string(path)?)?,
            None => GameConfig::default(),
        };
        let mut session = GameSession::new(config, VehicleExtents::default(), options.seed)?;

        let dt = 1.0 / REFERENCE_FPS;
        let frames = (options.seconds * REFERENCE_FPS).max(0.0) as u64;
        let mut stats = RunStats::default();

        for _ in 0..frames {
            let input = autopilot::steer(&session);
            session.tick(&input, dt);
            for event in session.take_events() {
                match event {
                    GameEvent::Started | GameEvent::Restarted { .. } => stats.runs += 1,
                    GameEvent::Crashed { .. } => stats.crashes += 1,
                    GameEvent::ObstaclesSpawned { count, .. } => stats.spawns += count,
                    GameEvent::Paused | GameEvent::Resumed => {}
                }
            }
        }

        let snapshot = session.snapshot();
        log::info!(
            "Simulated {:.0}s: {} run(s), {} crash(es), {} obstacle(s) spawned",
            options.seconds,
            stats.runs,
            stats.crashes,
            stats.spawns
        );
        log::info!(
            "Final score {}, best {}, phase {:?}, obstacle speed {:.1}",
            snapshot.score,
            snapshot.best_score,
            snapshot.phase,
            snapshot.difficulty.obstacle_speed
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rickshaw Run (native, headless) starting...");

    let options = headless::Options::parse();
    if let Err(err) = headless::run(options) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
