//! Demo mode: synthesizes key state so the game plays itself
//!
//! Only writes `InputState`; the simulation can't tell it apart from a player.

use super::input::InputState;
use super::lane::LaneId;
use super::state::{BallState, SessionPhase, SessionState};
use crate::settings::Settings;

/// Set every bound key for the upcoming tick
///
/// A branch's catch key is held for as long as a ball is moving on it, so a
/// frame of any length still ends with the key down.
pub fn drive(state: &SessionState, settings: &Settings, input: &mut InputState) {
    let bindings = &settings.bindings;
    let phase = state.phase();

    let on_branch = |lane: LaneId| {
        state
            .balls
            .iter()
            .any(|b| b.state == BallState::Moving && b.lane == lane)
    };

    // Several actions can share one key, so a key is held if any action wants it
    let wanted = [
        (&bindings.start, phase == SessionPhase::Idle),
        (&bindings.catch_a, on_branch(LaneId::BranchA)),
        (&bindings.catch_b, on_branch(LaneId::BranchB)),
        (&bindings.drop, phase == SessionPhase::Running && state.any_caught()),
        (
            &bindings.add_ball,
            phase == SessionPhase::Running && state.spawn.can_spawn(),
        ),
    ];

    for (key, _) in &wanted {
        let held = wanted.iter().any(|(k, on)| k == key && *on);
        input.set_held(key, held);
    }
}
