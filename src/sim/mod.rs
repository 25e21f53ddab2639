//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through the `dt` passed to `tick`
//! - Input only arrives through `InputState`
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bezier;
pub mod input;
pub mod lane;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bezier::{CubicBezier, bezier_point};
pub use input::InputState;
pub use lane::{LaneCompletion, LaneDefinition, LaneId, LaneTable};
pub use spawn::SpawnTimer;
pub use state::{
    Ball, BallState, LossCause, Outcome, SessionEvent, SessionPhase, SessionState,
};
pub use tick::tick;
