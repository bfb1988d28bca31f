pub mod config;
pub mod constants;
pub mod contact;
pub mod easing;
pub mod error;
pub mod nav;
pub mod parallax;
pub mod pointer;
pub mod scroll;
pub mod ticker;
pub mod tilt;
pub mod typewriter;
pub mod viewport;

pub use config::*;
pub use contact::{ContactDraft, ContactError, Notice, NoticeKind};
pub use easing::Easing;
pub use error::{FolioError, Result};
pub use nav::{NavState, PanelStyle, PanelTween};
pub use pointer::{PointerTracker, INTERACTIVE_SELECTOR};
pub use scroll::{ScrollConfig, ScrollDirection, ScrollState, SmoothScroller};
pub use ticker::{
    AnimationClock, FrameRequester, OnDemandTick, TickControl, TickHandle, Ticker, WeakTicker,
};
pub use tilt::{Rect, Tilt};
pub use typewriter::{Trigger, Typewriter, TypewriterPhase};
pub use viewport::{ObserveMode, TargetKey, Visibility, VisibilityEvent, ViewportObserver};
