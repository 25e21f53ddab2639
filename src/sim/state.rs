//! Session state and ball entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lane::{LaneId, LaneTable};
use super::spawn::SpawnTimer;
use crate::settings::Settings;

/// Ball movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Travelling along its current lane
    Moving,
    /// Held at the end of a branch until dropped
    Caught,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// CSS color string
    pub color: String,
    pub lane: LaneId,
    /// Milliseconds since entering the current lane
    pub time_in_lane: f32,
    pub state: BallState,
}

impl Ball {
    /// A fresh ball at the start of the entry lane
    pub fn new(id: u32, lanes: &LaneTable, settings: &Settings) -> Self {
        Self {
            id,
            pos: lanes.spawn_point(),
            radius: settings.ball_radius,
            color: settings.ball_color.clone(),
            lane: LaneId::Entry,
            time_in_lane: 0.0,
            state: BallState::Moving,
        }
    }

    /// Move onto the start of `lane`
    pub fn enter_lane(&mut self, lane: LaneId, lanes: &LaneTable) {
        self.lane = lane;
        self.time_in_lane = 0.0;
        if let Some(def) = lanes.get(lane) {
            self.pos = def.curve.start();
        }
    }

    /// Freeze at the current position (end of a branch)
    pub fn catch(&mut self) {
        self.state = BallState::Caught;
        self.lane = LaneId::Finished;
    }

    /// Send a caught ball back to the top
    pub fn drop_to_entry(&mut self, lanes: &LaneTable) {
        self.state = BallState::Moving;
        self.enter_lane(LaneId::Entry, lanes);
    }

    pub fn is_caught(&self) -> bool {
        self.state == BallState::Caught
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    None,
    Lost,
}

/// Coarse session phase derived from `running` and `outcome`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Lost,
}

/// Why a session was lost (reported through events only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// The catch key was not held when a ball finished this branch
    MissedCatch { lane: LaneId },
    /// The add-ball countdown ran out
    CountdownExpired,
}

/// Transitions that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Routed { ball: u32, lane: LaneId },
    Caught { ball: u32, lane: LaneId },
    Dropped { ball: u32 },
    SpawnWindowOpened,
    BallAdded { ball: u32 },
    Lost { cause: LossCause },
}

/// Complete state of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub running: bool,
    /// Milliseconds since the session started
    pub elapsed_ms: f64,
    pub outcome: Outcome,
    /// Balls in creation order; never removed during a session
    pub balls: Vec<Ball>,
    /// Branch the next ball leaving the entry lane is routed to
    pub next_branch: LaneId,
    pub spawn: SpawnTimer,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<SessionEvent>,
    next_id: u32,
}

impl SessionState {
    /// Idle session waiting for the start key
    pub fn new(lanes: &LaneTable, settings: &Settings) -> Self {
        let mut state = Self {
            running: false,
            elapsed_ms: 0.0,
            outcome: Outcome::None,
            balls: Vec::new(),
            next_branch: LaneId::BranchA,
            spawn: SpawnTimer::new(settings.spawn_interval_ms),
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_ball(lanes, settings);
        state
    }

    /// Reset everything and begin running
    pub fn start(&mut self, lanes: &LaneTable, settings: &Settings) {
        *self = Self::new(lanes, settings);
        self.running = true;
        self.events.push(SessionEvent::Started);
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.running, self.outcome) {
            (true, _) => SessionPhase::Running,
            (false, Outcome::Lost) => SessionPhase::Lost,
            (false, Outcome::None) => SessionPhase::Idle,
        }
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a fresh ball at the entry lane start. Returns its ID.
    pub fn spawn_ball(&mut self, lanes: &LaneTable, settings: &Settings) -> u32 {
        let id = self.next_ball_id();
        self.balls.push(Ball::new(id, lanes, settings));
        id
    }

    /// End the session. Only the first loss is recorded.
    pub fn lose(&mut self, cause: LossCause) {
        if self.outcome == Outcome::Lost {
            return;
        }
        self.running = false;
        self.outcome = Outcome::Lost;
        self.events.push(SessionEvent::Lost { cause });
    }

    pub fn any_caught(&self) -> bool {
        self.balls.iter().any(Ball::is_caught)
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let lanes = LaneTable::default();
        let settings = Settings::default();
        let state = SessionState::new(&lanes, &settings);

        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].lane, LaneId::Entry);
        assert_eq!(state.balls[0].pos, lanes.entry.curve.p0);
        assert_eq!(state.next_branch, LaneId::BranchA);
    }

    #[test]
    fn test_lose_only_once() {
        let lanes = LaneTable::default();
        let settings = Settings::default();
        let mut state = SessionState::new(&lanes, &settings);
        state.start(&lanes, &settings);

        state.lose(LossCause::CountdownExpired);
        state.lose(LossCause::MissedCatch {
            lane: LaneId::BranchA,
        });

        assert_eq!(state.phase(), SessionPhase::Lost);
        let losses = state
            .events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Lost { .. }))
            .count();
        assert_eq!(losses, 1);
    }

    #[test]
    fn test_ball_ids_increase() {
        let lanes = LaneTable::default();
        let settings = Settings::default();
        let mut state = SessionState::new(&lanes, &settings);
        let second = state.spawn_ball(&lanes, &settings);
        assert_eq!(state.balls[0].id, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_catch_and_drop() {
        let lanes = LaneTable::default();
        let settings = Settings::default();
        let mut ball = Ball::new(1, &lanes, &settings);
        ball.enter_lane(LaneId::BranchA, &lanes);
        ball.pos = lanes.branch_a.curve.p3;
        ball.catch();
        assert!(ball.is_caught());
        assert_eq!(ball.lane, LaneId::Finished);
        assert_eq!(ball.pos, lanes.branch_a.curve.p3);

        ball.drop_to_entry(&lanes);
        assert_eq!(ball.state, BallState::Moving);
        assert_eq!(ball.lane, LaneId::Entry);
        assert_eq!(ball.time_in_lane, 0.0);
        assert_eq!(ball.pos, lanes.entry.curve.p0);
    }
}
