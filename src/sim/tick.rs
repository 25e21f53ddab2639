//! Per-frame session update
//!
//! Advances the add-ball timer, every ball's lane progress, and the session
//! state machine by a variable delta in milliseconds.

use super::input::InputState;
use super::lane::{LaneCompletion, LaneId, LaneTable};
use super::state::{Ball, BallState, LossCause, SessionEvent, SessionPhase, SessionState};
use crate::settings::{KeyBindings, Settings};

/// Advance the session by `dt` milliseconds
///
/// While idle, only the start key is looked at. Once lost, this is a no-op.
pub fn tick(
    state: &mut SessionState,
    input: &mut InputState,
    lanes: &LaneTable,
    settings: &Settings,
    dt: f32,
) {
    state.events.clear();
    let bindings = &settings.bindings;

    if !state.running {
        if state.phase() == SessionPhase::Idle && input.is_held(&bindings.start) {
            input.consume(&bindings.start);
            state.start(lanes, settings);
        }
        return;
    }

    let dt = dt.max(0.0);
    state.elapsed_ms += f64::from(dt);

    // Add-ball window: open on deadline, otherwise run the countdown down
    if settings.spawn_enabled {
        if state.spawn.open_if_due(state.elapsed_ms, settings.countdown_ms) {
            state.events.push(SessionEvent::SpawnWindowOpened);
        } else {
            state.spawn.count_down(dt);
        }
    }

    if let Some(cause) = update_balls(state, input, lanes, bindings, dt) {
        state.lose(cause);
        return;
    }

    if settings.spawn_enabled {
        state.spawn.rearm(settings.spawn_interval_ms);

        if state.spawn.can_spawn() && input.is_held(&bindings.add_ball) {
            input.consume(&bindings.add_ball);
            let id = state.spawn_ball(lanes, settings);
            state.spawn.consume();
            state.events.push(SessionEvent::BallAdded { ball: id });
        }

        // A press on the frame the countdown crosses zero still counts
        if state.spawn.expired() {
            state.lose(LossCause::CountdownExpired);
        }
    }
}

/// Advance or drop every ball. Stops at the first missed catch.
fn update_balls(
    state: &mut SessionState,
    input: &mut InputState,
    lanes: &LaneTable,
    bindings: &KeyBindings,
    dt: f32,
) -> Option<LossCause> {
    // One drop press releases every caught ball this pass
    let drop_held = input.is_held(&bindings.drop);
    let mut dropped = false;

    let SessionState {
        balls,
        next_branch,
        events,
        ..
    } = state;

    for ball in balls.iter_mut() {
        match ball.state {
            BallState::Moving => {
                if let Some(cause) =
                    advance_ball(ball, input, lanes, bindings, next_branch, events, dt)
                {
                    return Some(cause);
                }
            }
            BallState::Caught => {
                if drop_held {
                    ball.drop_to_entry(lanes);
                    events.push(SessionEvent::Dropped { ball: ball.id });
                    dropped = true;
                }
            }
        }
    }

    if dropped {
        input.consume(&bindings.drop);
    }
    None
}

/// Move one ball along its lane and apply the lane's completion policy
fn advance_ball(
    ball: &mut Ball,
    input: &InputState,
    lanes: &LaneTable,
    bindings: &KeyBindings,
    next_branch: &mut LaneId,
    events: &mut Vec<SessionEvent>,
    dt: f32,
) -> Option<LossCause> {
    let lane = lanes.get(ball.lane)?;

    ball.time_in_lane = (ball.time_in_lane + dt).min(lane.duration_ms);
    let t = lane.progress(ball.time_in_lane);
    ball.pos = lane.curve.point(t);

    if t < 1.0 {
        return None;
    }

    match lanes.completion(ball.lane, bindings) {
        LaneCompletion::Route => {
            let target = *next_branch;
            ball.enter_lane(target, lanes);
            *next_branch = target.other_branch();
            events.push(SessionEvent::Routed {
                ball: ball.id,
                lane: target,
            });
        }
        LaneCompletion::Catch { required_key } => {
            let lane = ball.lane;
            if !input.is_held(required_key) {
                return Some(LossCause::MissedCatch { lane });
            }
            ball.catch();
            events.push(SessionEvent::Caught { ball: ball.id, lane });
        }
        LaneCompletion::Terminal => {}
    }
    None
}
