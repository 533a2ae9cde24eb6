//! Demo mode: the game plays itself
//!
//! Looks at the current lane and its neighbours and steers toward whichever
//! has the most room before the next truck. Restarts after a crash.

use super::state::{GamePhase, GameSession};
use super::tick::TickInput;

/// How close to a lane center counts as "in the lane"
const CENTER_DEADZONE: f32 = 0.5;

/// Input the autopilot would give this tick
pub fn steer(session: &GameSession) -> TickInput {
    match session.phase() {
        GamePhase::Ready | GamePhase::GameOver => {
            return TickInput {
                restart_requested: true,
                ..Default::default()
            };
        }
        GamePhase::Paused => return TickInput::default(),
        GamePhase::Running => {}
    }

    let lanes = session.lanes();
    let current = session.player().current_lane();
    let first = current.saturating_sub(1);
    let last = (current + 1).min(lanes.lane_count() - 1);

    // Current lane wins ties, then the lower index
    let mut target = current;
    let mut best = clearance(session, current);
    for lane in first..=last {
        let room = clearance(session, lane);
        if room > best {
            best = room;
            target = lane;
        }
    }

    let x = session.player().lateral_position();
    let center = lanes.lane_center(target);
    TickInput {
        move_left: x > center + CENTER_DEADZONE,
        move_right: x < center - CENTER_DEADZONE,
        ..Default::default()
    }
}

/// Distance from the player to the nearest truck in `lane` that has not
/// passed yet (infinite when the lane is clear)
fn clearance(session: &GameSession, lane: usize) -> f32 {
    let player_distance = session.config().road.player_distance;
    let player_half_depth = session.player().state().half_depth;
    session
        .obstacles()
        .iter()
        .filter(|o| o.lane_index == lane)
        .filter(|o| o.longitudinal_position - o.half_depth <= player_distance + player_half_depth)
        .map(|o| player_distance - o.longitudinal_position)
        .fold(f32::INFINITY, f32::min)
}
