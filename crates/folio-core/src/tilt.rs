use crate::constants::TILT_DEGREES;
use glam::Vec2;

/// Card rotation in degrees, produced from the pointer's offset to the card
/// center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

/// Axis-aligned client rect, as `getBoundingClientRect` reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Tilt {
    pub const RESET: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Horizontal offset turns the card around Y, vertical offset around X
    /// (inverted so the near edge dips toward the pointer).
    pub fn at(pointer: Vec2, rect: Rect) -> Tilt {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Tilt::RESET;
        }
        let px = ((pointer.x - rect.left) / rect.width - 0.5).clamp(-0.5, 0.5);
        let py = ((pointer.y - rect.top) / rect.height - 0.5).clamp(-0.5, 0.5);
        Tilt {
            rotate_x: py * -TILT_DEGREES,
            rotate_y: px * TILT_DEGREES,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "rotateY({:.2}deg) rotateX({:.2}deg)",
            self.rotate_y, self.rotate_x
        )
    }
}
