//! Cubic Bézier curves used as lane paths
//!
//! Evaluation is pure. Callers clamp `t` to [0, 1] before evaluating.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Point on the cubic Bézier curve defined by `p0..p3` at progress `t`
///
/// B(t) = (1-t)³p0 + 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³·p3, per axis.
#[inline]
pub fn bezier_point(t: f32, p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec2 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;

    p0 * (mt2 * mt) + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * (t2 * t)
}

/// Four control points of a cubic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at `t` (expected in [0, 1])
    #[inline]
    pub fn point(&self, t: f32) -> Vec2 {
        bezier_point(t, self.p0, self.p1, self.p2, self.p3)
    }

    pub fn start(&self) -> Vec2 {
        self.p0
    }

    pub fn end(&self) -> Vec2 {
        self.p3
    }

    /// True if every control point is finite
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}
