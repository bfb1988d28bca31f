//! Eased page scrolling.
//!
//! Wheel input moves a target offset and the applied offset chases it by a
//! fixed fraction per frame. Programmatic jumps (anchor links) run a timed
//! tween with a configurable easing curve instead. The host applies whatever
//! [`SmoothScroller::tick`] returns to the real scroll position.

use crate::constants::{
    ANCHOR_OFFSET_PX, SCROLL_DURATION_MS, SCROLL_LERP, SCROLL_SETTLE_PX, WHEEL_LINE_PX,
    WHEEL_MULTIPLIER,
};
use crate::easing::{approach, lerp, Easing};
use crate::ticker::AnimationClock;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub duration_ms: f64,
    pub easing: Easing,
    /// Fraction of the remaining distance covered per frame for wheel input.
    pub lerp: f64,
    pub wheel_multiplier: f64,
    pub anchor_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: SCROLL_DURATION_MS,
            easing: Easing::ExpoOut,
            lerp: SCROLL_LERP,
            wheel_multiplier: WHEEL_MULTIPLIER,
            anchor_offset_px: ANCHOR_OFFSET_PX,
        }
    }
}

/// Target/current pair that converges by exponential decay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub target: f64,
    pub current: f64,
    pub easing_factor: f64,
}

impl ScrollState {
    pub fn new(offset: f64, easing_factor: f64) -> Self {
        Self {
            target: offset,
            current: offset,
            easing_factor: easing_factor.clamp(0.01, 1.0),
        }
    }

    /// One frame of convergence; snaps once within the settle distance.
    pub fn step(&mut self) -> f64 {
        self.current = approach(self.current, self.target, self.easing_factor);
        if (self.target - self.current).abs() < SCROLL_SETTLE_PX {
            self.current = self.target;
        }
        self.current
    }

    pub fn settled(&self) -> bool {
        self.current == self.target
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(ScrollDirection::Down)
        } else if delta < 0.0 {
            Some(ScrollDirection::Up)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Motion {
    Idle,
    Chase,
    Tween {
        from: f64,
        to: f64,
        clock: AnimationClock,
    },
}

pub struct SmoothScroller {
    config: ScrollConfig,
    state: ScrollState,
    motion: Motion,
    limit: f64,
    direction: Option<ScrollDirection>,
    destroyed: bool,
}

impl SmoothScroller {
    pub fn attach(config: ScrollConfig) -> Self {
        let state = ScrollState::new(0.0, config.lerp);
        Self {
            config,
            state,
            motion: Motion::Idle,
            limit: f64::INFINITY,
            direction: None,
            destroyed: false,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Largest reachable offset (document height minus viewport height).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.state.target = self.clamp(self.state.target);
    }

    /// The real scroll position moved without us (keyboard, scrollbar,
    /// initial load). Adopted only while no motion is running.
    pub fn sync_native(&mut self, offset: f64) {
        if matches!(self.motion, Motion::Idle) {
            self.state.current = offset;
            self.state.target = offset;
        }
    }

    /// Feed a wheel delta in pixels. Returns whether the input was consumed
    /// (the host then suppresses native scrolling).
    pub fn wheel(&mut self, delta_px: f64) -> bool {
        if self.destroyed || delta_px == 0.0 {
            return false;
        }
        if let Some(dir) = ScrollDirection::from_delta(delta_px) {
            self.direction = Some(dir);
        }
        // wheel input interrupts a running tween from where it is now
        self.state.target = self.clamp(self.state.target + delta_px * self.config.wheel_multiplier);
        self.motion = Motion::Chase;
        true
    }

    /// Tween to `top + offset_px` over the configured duration. No-op after
    /// [`destroy`](Self::destroy).
    pub fn scroll_to(&mut self, top: f64, offset_px: f64) {
        if self.destroyed {
            return;
        }
        let to = self.clamp(top + offset_px);
        self.state.target = to;
        self.motion = Motion::Tween {
            from: self.state.current,
            to,
            clock: AnimationClock::new(),
        };
    }

    /// Tween to an anchor target using the configured anchor offset.
    pub fn scroll_to_anchor(&mut self, top: f64) {
        let offset = self.config.anchor_offset_px;
        self.scroll_to(top, offset);
    }

    /// Advance one frame. Returns the offset to apply, or `None` when there is
    /// nothing to do.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        if self.destroyed {
            return None;
        }
        match &mut self.motion {
            Motion::Idle => None,
            Motion::Chase => {
                let y = self.state.step();
                if self.state.settled() {
                    self.motion = Motion::Idle;
                }
                Some(y)
            }
            Motion::Tween { from, to, clock } => {
                let elapsed = clock.tick(timestamp_ms);
                let t = if self.config.duration_ms > 0.0 {
                    (elapsed / self.config.duration_ms).min(1.0)
                } else {
                    1.0
                };
                let (from, to) = (*from, *to);
                if t >= 1.0 {
                    self.state.current = to;
                    self.state.target = to;
                    self.motion = Motion::Idle;
                } else {
                    self.state.current = lerp(from, to, self.config.easing.apply(t));
                }
                Some(self.state.current)
            }
        }
    }

    /// Stop all motion for good. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.motion = Motion::Idle;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    pub fn position(&self) -> f64 {
        self.state.current
    }

    pub fn target(&self) -> f64 {
        self.state.target
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    fn clamp(&self, y: f64) -> f64 {
        y.clamp(0.0, self.limit)
    }
}

/// Fragment id of an in-page link, or `None` when the click should fall
/// through to the browser (`"#"`, external links, empty hrefs).
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Normalize a wheel delta to pixels. `delta_mode` follows the DOM:
/// 0 = pixels, 1 = lines, 2 = pages.
pub fn wheel_delta_px(delta: f64, delta_mode: u32, page_height: f64) -> f64 {
    match delta_mode {
        1 => delta * WHEEL_LINE_PX,
        2 => delta * page_height,
        _ => delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_never_overshoots() {
        let mut s = ScrollState::new(0.0, 0.1);
        s.target = 500.0;
        let mut prev = 0.0;
        for _ in 0..200 {
            let y = s.step();
            assert!(y >= prev && y <= 500.0);
            prev = y;
        }
        assert!(s.settled());
    }

    #[test]
    fn bare_hash_is_not_an_anchor() {
        assert_eq!(anchor_fragment("#"), None);
        assert_eq!(anchor_fragment(""), None);
        assert_eq!(anchor_fragment("https://x.dev/#a"), None);
        assert_eq!(anchor_fragment("#about"), Some("about"));
    }

    #[test]
    fn wheel_targets_are_clamped_to_limit() {
        let mut s = SmoothScroller::attach(ScrollConfig::default());
        s.set_limit(300.0);
        s.wheel(-50.0);
        assert_eq!(s.target(), 0.0);
        s.wheel(1000.0);
        assert_eq!(s.target(), 300.0);
        assert_eq!(s.direction(), Some(ScrollDirection::Down));
    }

    #[test]
    fn native_sync_is_ignored_mid_motion() {
        let mut s = SmoothScroller::attach(ScrollConfig::default());
        s.sync_native(120.0);
        assert_eq!(s.position(), 120.0);
        s.wheel(100.0);
        s.sync_native(0.0);
        assert_eq!(s.target(), 220.0);
    }

    #[test]
    fn wheel_modes_scale_to_pixels() {
        assert_eq!(wheel_delta_px(3.0, 0, 800.0), 3.0);
        assert_eq!(wheel_delta_px(3.0, 1, 800.0), 48.0);
        assert_eq!(wheel_delta_px(1.0, 2, 800.0), 800.0);
    }
}
