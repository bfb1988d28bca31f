/// Motion tuning constants.
///
/// These constants express intended behavior (easing factors, durations,
/// thresholds) and keep magic numbers out of the state machines.
// Cursor ring easing toward the raw pointer, per frame
pub const CURSOR_EASE: f32 = 0.18;
// Below this distance (px) the ring snaps onto the pointer
pub const CURSOR_SNAP_PX: f32 = 0.01;

// Wheel-driven scroll chases its target by this fraction per frame
pub const SCROLL_LERP: f64 = 0.1;
// Below this distance (px) wheel scrolling settles
pub const SCROLL_SETTLE_PX: f64 = 0.5;
// Anchor jumps land this far from the section top
pub const ANCHOR_OFFSET_PX: f64 = -10.0;
// Duration of an anchor scroll tween
pub const SCROLL_DURATION_MS: f64 = 1200.0;
// Wheel delta multiplier
pub const WHEEL_MULTIPLIER: f64 = 1.0;
// Line-mode wheel deltas are scaled to pixels by this
pub const WHEEL_LINE_PX: f64 = 16.0;

// Intersection ratios
pub const REVEAL_THRESHOLD: f64 = 0.25;
pub const SECTION_LINE_THRESHOLD: f64 = 0.2;

// Typewriter defaults
pub const TYPEWRITER_DURATION_MS: f64 = 1200.0;
pub const TYPEWRITER_DELAY_MS: f64 = 120.0;

// Tilt: degrees of rotation per unit of normalized pointer offset
pub const TILT_DEGREES: f32 = 10.0;

// Parallax factor used when an element gives none
pub const PARALLAX_FACTOR: f64 = 0.15;

// Nav bar counts as scrolled past this offset (px)
pub const NAV_SCROLLED_PX: f64 = 8.0;
// Menu panel tween
pub const MENU_OPEN_MS: f64 = 320.0;
pub const MENU_CLOSE_MS: f64 = 260.0;
pub const MENU_SLIDE_PX: f64 = -16.0;

// Contact payload limits
pub const CONTACT_NAME_MAX: usize = 120;
pub const CONTACT_MESSAGE_MAX: usize = 4000;
pub const CONTACT_ENDPOINT: &str = "/api/contacts";

// Toast visibility (ms)
pub const TOAST_MS: i32 = 4000;
