use crate::constants::{CURSOR_EASE, CURSOR_SNAP_PX};
use glam::Vec2;

/// Elements that switch the cursor into its active style.
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, [role=button], input, textarea, select, .card-accent";

/// Custom cursor state: a dot that follows the pointer exactly and a ring
/// that trails it.
///
/// - `raw` is updated on every pointer event
/// - `eased` only moves inside [`PointerTracker::tick`], once per frame
/// - `interactive` tracks whether the pointer is over an interactive region
#[derive(Clone, Debug)]
pub struct PointerTracker {
    raw: Vec2,
    eased: Vec2,
    interactive: bool,
    ease: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(CURSOR_EASE)
    }
}

impl PointerTracker {
    pub fn new(ease: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            eased: Vec2::ZERO,
            interactive: false,
            ease: ease.clamp(0.01, 1.0),
        }
    }

    #[inline]
    pub fn pointer_moved(&mut self, raw: Vec2) {
        self.raw = raw;
    }

    /// Advance the ring one frame toward the pointer and return its position.
    pub fn tick(&mut self) -> Vec2 {
        let delta = self.raw - self.eased;
        if delta.length() <= CURSOR_SNAP_PX {
            self.eased = self.raw;
        } else {
            self.eased += delta * self.ease;
        }
        self.eased
    }

    /// Pointer entered an element; `inside_interactive` is whether it lies in
    /// the interactive selector set. Returns true when the flag changed.
    pub fn pointer_over(&mut self, inside_interactive: bool) -> bool {
        if inside_interactive && !self.interactive {
            self.interactive = true;
            return true;
        }
        false
    }

    /// Pointer left an element. `entering_interactive` describes the element
    /// it moved to (`false` when it left the window). Moving between children
    /// of one interactive region keeps the flag set.
    pub fn pointer_out(&mut self, entering_interactive: bool) -> bool {
        if !entering_interactive && self.interactive {
            self.interactive = false;
            return true;
        }
        false
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    pub fn eased(&self) -> Vec2 {
        self.eased
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_settled(&self) -> bool {
        self.raw == self.eased
    }
}

/// CSS transform placing an element's origin at `pos`.
pub fn translate3d(pos: Vec2) -> String {
    format!("translate3d({:.2}px, {:.2}px, 0)", pos.x, pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_follows_immediately_ring_trails() {
        let mut p = PointerTracker::default();
        p.pointer_moved(Vec2::new(100.0, 50.0));
        assert_eq!(p.raw(), Vec2::new(100.0, 50.0));
        assert_eq!(p.eased(), Vec2::ZERO);
        let first = p.tick();
        assert!((first.x - 18.0).abs() < 1e-4);
        assert!((first.y - 9.0).abs() < 1e-4);
    }

    #[test]
    fn hover_flag_survives_moves_between_children() {
        let mut p = PointerTracker::default();
        assert!(p.pointer_over(true));
        // child -> sibling child, both inside the same link
        assert!(!p.pointer_out(true));
        assert!(!p.pointer_over(true));
        assert!(p.is_interactive());
        // plain area outside
        assert!(p.pointer_out(false));
        assert!(!p.is_interactive());
    }

    #[test]
    fn non_interactive_over_does_not_clear() {
        let mut p = PointerTracker::default();
        p.pointer_over(true);
        assert!(!p.pointer_over(false));
        assert!(p.is_interactive());
    }

    #[test]
    fn transform_formats_pixels() {
        assert_eq!(
            translate3d(Vec2::new(1.0, 2.5)),
            "translate3d(1.00px, 2.50px, 0)"
        );
    }
}
