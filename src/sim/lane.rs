//! Lane table: the fixed set of curved paths a ball can travel
//!
//! Entry feeds into one of two symmetric branches. `Finished` is a sentinel
//! lane for caught balls and has no geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bezier::CubicBezier;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::KeyBindings;

/// Identifies the lane a ball is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneId {
    Entry,
    BranchA,
    BranchB,
    Finished,
}

impl LaneId {
    /// The other branch (BranchA <-> BranchB); non-branch lanes map to themselves
    pub fn other_branch(self) -> Self {
        match self {
            LaneId::BranchA => LaneId::BranchB,
            LaneId::BranchB => LaneId::BranchA,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LaneId::Entry => "entry",
            LaneId::BranchA => "branch A",
            LaneId::BranchB => "branch B",
            LaneId::Finished => "finished",
        }
    }
}

/// What happens when a ball reaches the end of a lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneCompletion<'a> {
    /// Route onto the branch selected by the alternation pointer
    Route,
    /// Terminal branch: the given key must be held to catch the ball
    Catch { required_key: &'a str },
    /// No geometry, nothing to complete
    Terminal,
}

/// Geometry and timing of a single lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneDefinition {
    pub curve: CubicBezier,
    /// Time to traverse the full curve, in milliseconds
    pub duration_ms: f32,
}

impl LaneDefinition {
    pub const fn new(curve: CubicBezier, duration_ms: f32) -> Self {
        Self { curve, duration_ms }
    }

    /// Progress fraction for a given time in lane, clamped to [0, 1]
    #[inline]
    pub fn progress(&self, time_in_lane: f32) -> f32 {
        (time_in_lane / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Position after `time_in_lane` milliseconds on this lane
    #[inline]
    pub fn position_at(&self, time_in_lane: f32) -> Vec2 {
        self.curve.point(self.progress(time_in_lane))
    }
}

/// One definition per non-sentinel lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTable {
    pub entry: LaneDefinition,
    pub branch_a: LaneDefinition,
    pub branch_b: LaneDefinition,
}

impl Default for LaneTable {
    fn default() -> Self {
        Self::for_canvas(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl LaneTable {
    /// Standard layout: entry snakes down from the top centre to the middle,
    /// then splits into a left branch and a longer, wavier right branch
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let cx = width / 2.0;
        let split = Vec2::new(cx, height / 2.0);

        Self {
            entry: LaneDefinition::new(
                CubicBezier::new(
                    Vec2::new(cx, 0.0),
                    Vec2::new(cx + 150.0, height * 0.1),
                    Vec2::new(cx - 150.0, height * 0.4),
                    split,
                ),
                ENTRY_DURATION_MS,
            ),
            branch_a: LaneDefinition::new(
                CubicBezier::new(
                    split,
                    Vec2::new(cx - 100.0, height * 0.6),
                    Vec2::new(cx - 250.0, height * 0.8),
                    Vec2::new(cx - 300.0, height),
                ),
                BRANCH_A_DURATION_MS,
            ),
            branch_b: LaneDefinition::new(
                CubicBezier::new(
                    split,
                    Vec2::new(cx + 300.0, height * 0.55),
                    Vec2::new(cx - 200.0, height * 0.75),
                    Vec2::new(cx + 250.0, height),
                ),
                BRANCH_B_DURATION_MS,
            ),
        }
    }

    /// Definition for a lane, `None` for the `Finished` sentinel
    pub fn get(&self, lane: LaneId) -> Option<&LaneDefinition> {
        match lane {
            LaneId::Entry => Some(&self.entry),
            LaneId::BranchA => Some(&self.branch_a),
            LaneId::BranchB => Some(&self.branch_b),
            LaneId::Finished => None,
        }
    }

    /// All lanes with geometry, in drawing order
    pub fn iter(&self) -> impl Iterator<Item = (LaneId, &LaneDefinition)> {
        [
            (LaneId::Entry, &self.entry),
            (LaneId::BranchA, &self.branch_a),
            (LaneId::BranchB, &self.branch_b),
        ]
        .into_iter()
    }

    /// Completion policy of a lane under the given key bindings
    pub fn completion<'a>(&self, lane: LaneId, bindings: &'a KeyBindings) -> LaneCompletion<'a> {
        match lane {
            LaneId::Entry => LaneCompletion::Route,
            LaneId::BranchA => LaneCompletion::Catch {
                required_key: &bindings.catch_a,
            },
            LaneId::BranchB => LaneCompletion::Catch {
                required_key: &bindings.catch_b,
            },
            LaneId::Finished => LaneCompletion::Terminal,
        }
    }

    /// Where every ball starts
    pub fn spawn_point(&self) -> Vec2 {
        self.entry.curve.start()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, lane) in self.iter() {
            if !lane.curve.is_finite() {
                return Err(ConfigError::NonFiniteCurve(id));
            }
            if lane.duration_ms <= 0.0 || !lane.duration_ms.is_finite() {
                return Err(ConfigError::NonPositiveDuration {
                    lane: id,
                    duration_ms: lane.duration_ms,
                });
            }
        }

        let split = self.entry.curve.end();
        for (id, lane) in [
            (LaneId::BranchA, &self.branch_a),
            (LaneId::BranchB, &self.branch_b),
        ] {
            if lane.curve.start() != split {
                return Err(ConfigError::DetachedBranch(id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let lanes = LaneTable::default();
        assert_eq!(lanes.validate(), Ok(()));
        assert_eq!(lanes.branch_a.curve.p0, lanes.entry.curve.p3);
        assert_eq!(lanes.branch_b.curve.p0, lanes.entry.curve.p3);
    }

    #[test]
    fn test_finished_has_no_geometry() {
        let lanes = LaneTable::default();
        assert!(lanes.get(LaneId::Finished).is_none());
        assert_eq!(lanes.iter().count(), 3);
    }

    #[test]
    fn test_detached_branch_rejected() {
        let mut lanes = LaneTable::default();
        lanes.branch_b.curve.p0 += Vec2::new(1.0, 0.0);
        assert_eq!(
            lanes.validate(),
            Err(ConfigError::DetachedBranch(LaneId::BranchB))
        );
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut lanes = LaneTable::default();
        lanes.entry.duration_ms = 0.0;
        assert!(matches!(
            lanes.validate(),
            Err(ConfigError::NonPositiveDuration {
                lane: LaneId::Entry,
                ..
            })
        ));
    }

    #[test]
    fn test_nan_control_point_rejected() {
        let mut lanes = LaneTable::default();
        lanes.branch_a.curve.p2.x = f32::NAN;
        assert_eq!(
            lanes.validate(),
            Err(ConfigError::NonFiniteCurve(LaneId::BranchA))
        );
    }

    #[test]
    fn test_progress_clamped() {
        let lanes = LaneTable::default();
        assert_eq!(lanes.entry.progress(-5.0), 0.0);
        assert_eq!(lanes.entry.progress(ENTRY_DURATION_MS * 2.0), 1.0);
        assert_eq!(lanes.entry.position_at(1e9), lanes.entry.curve.p3);
    }

    #[test]
    fn test_completion_policy() {
        let lanes = LaneTable::default();
        let bindings = KeyBindings::split();
        assert_eq!(
            lanes.completion(LaneId::Entry, &bindings),
            LaneCompletion::Route
        );
        assert_eq!(
            lanes.completion(LaneId::BranchB, &bindings),
            LaneCompletion::Catch { required_key: "d" }
        );
        assert_eq!(
            lanes.completion(LaneId::Finished, &bindings),
            LaneCompletion::Terminal
        );
    }

    #[test]
    fn test_other_branch() {
        assert_eq!(LaneId::BranchA.other_branch(), LaneId::BranchB);
        assert_eq!(LaneId::BranchB.other_branch(), LaneId::BranchA);
        assert_eq!(LaneId::Entry.other_branch(), LaneId::Entry);
    }
}
