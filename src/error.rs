//! Configuration errors
//!
//! The simulation itself never fails; these are raised once, when settings
//! and lane geometry are loaded.

use thiserror::Error;

use crate::sim::LaneId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lane {0:?} has non-finite control points")]
    NonFiniteCurve(LaneId),

    #[error("lane {lane:?} duration must be positive, got {duration_ms} ms")]
    NonPositiveDuration { lane: LaneId, duration_ms: f32 },

    #[error("branch lane {0:?} does not start where the entry lane ends")]
    DetachedBranch(LaneId),

    #[error("key binding for {0} is empty")]
    EmptyBinding(&'static str),

    #[error("{name} must be positive, got {value} ms")]
    NonPositiveTimer { name: &'static str, value: f32 },

    #[error("ball radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}
