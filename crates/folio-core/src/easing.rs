//! Easing curves and per-frame approach helpers.
//!
//! Curves map normalized time `t` in \[0, 1\] to normalized progress. Every
//! curve returns exactly 0 at `t = 0` and exactly 1 at `t = 1` so tweens land
//! on their target.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Fast start, long exponential tail. Used for anchor scrolling.
    #[default]
    ExpoOut,
    CubicOut,
    CubicInOut,
    Power3Out,
    Power2In,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::ExpoOut => 1.0 - 2f64.powf(-10.0 * t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            // gsap naming: power3 is a quartic curve
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power2In => t * t * t,
        }
    }
}

/// Move `current` toward `target` by `factor` of the remaining distance.
#[inline]
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
