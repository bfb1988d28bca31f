//! Navigation bar state: the "scrolled" style switch and the mobile menu.

use crate::constants::{MENU_CLOSE_MS, MENU_OPEN_MS, MENU_SLIDE_PX, NAV_SCROLLED_PX};
use crate::easing::{lerp, Easing};
use crate::ticker::{AnimationClock, TickControl};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    /// Returns true when the scrolled flag flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > NAV_SCROLLED_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Returns true when the menu was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::replace(&mut self.menu_open, false)
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }
}

/// Sampled style of the menu panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelStyle {
    pub translate_y: f64,
    pub opacity: f64,
}

impl PanelStyle {
    pub const HIDDEN: PanelStyle = PanelStyle {
        translate_y: MENU_SLIDE_PX,
        opacity: 0.0,
    };
    pub const SHOWN: PanelStyle = PanelStyle {
        translate_y: 0.0,
        opacity: 1.0,
    };

    pub fn css(&self) -> String {
        format!(
            "transform: translateY({:.2}px); opacity: {:.3}",
            self.translate_y, self.opacity
        )
    }
}

/// Slide/fade tween for the menu panel. Opening always starts from the
/// hidden pose; closing starts from wherever the panel currently is.
#[derive(Clone, Debug)]
pub struct PanelTween {
    from: PanelStyle,
    to: PanelStyle,
    duration_ms: f64,
    easing: Easing,
    clock: AnimationClock,
    current: PanelStyle,
}

impl PanelTween {
    pub fn open() -> Self {
        Self::between(PanelStyle::HIDDEN, PanelStyle::SHOWN, MENU_OPEN_MS, Easing::Power3Out)
    }

    pub fn close(from: PanelStyle) -> Self {
        Self::between(from, PanelStyle::HIDDEN, MENU_CLOSE_MS, Easing::Power2In)
    }

    fn between(from: PanelStyle, to: PanelStyle, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            clock: AnimationClock::new(),
            current: from,
        }
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> TickControl {
        let elapsed = self.clock.tick(timestamp_ms);
        let t = if self.duration_ms > 0.0 {
            (elapsed / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let k = self.easing.apply(t);
        self.current = PanelStyle {
            translate_y: lerp(self.from.translate_y, self.to.translate_y, k),
            opacity: lerp(self.from.opacity, self.to.opacity, k),
        };
        if t >= 1.0 {
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    }

    pub fn current(&self) -> PanelStyle {
        self.current
    }
}
