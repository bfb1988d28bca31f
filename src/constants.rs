// DOM hooks shared by the web frontend.
//
// Ids are bare (no leading '#'); selectors are ready for querySelector.

// Markup hooks
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const SECTION_LINE_SELECTOR: &str = ".section-line";
pub const BOB_SELECTOR: &str = "[data-bob]";
pub const TYPEWRITER_SELECTOR: &str = "[data-typewriter]";
pub const TILT_SELECTOR: &str = "[data-tilt]";
pub const PARALLAX_SELECTOR: &str = "[data-parallax]";
pub const ANCHOR_SELECTOR: &str = "a[href^='#']";
// Wheel input inside these keeps native scrolling (code blocks, modals)
pub const NATIVE_SCROLL_SELECTOR: &str = "[data-native-scroll]";

// Element ids
pub const CONFIG_ID: &str = "folio-config";
pub const NAV_ID: &str = "site-nav";
pub const MENU_TOGGLE_ID: &str = "menu-toggle";
pub const MENU_PANEL_ID: &str = "menu-panel";
// Backdrop behind the open menu; clicking it closes the menu
pub const MENU_OVERLAY_ID: &str = "menu-overlay";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const TOAST_ID: &str = "toast";
pub const TOAST_CLOSE_ID: &str = "toast-close";
pub const TOAST_TITLE_ID: &str = "toast-title";
pub const TOAST_DESCRIPTION_ID: &str = "toast-description";
pub const CURSOR_DOT_ID: &str = "cursor-dot";
pub const CURSOR_RING_ID: &str = "cursor-ring";

// Classes
pub const IN_VIEW_CLASS: &str = "in-view";
pub const BOB_UP_CLASS: &str = "bob-up";
pub const BOB_DOWN_CLASS: &str = "bob-down";
pub const CURSOR_BODY_CLASS: &str = "custom-cursor";
pub const CURSOR_ACTIVE_CLASS: &str = "cursor-active";
pub const CURSOR_DOT_CLASS: &str = "cursor-dot";
pub const CURSOR_RING_CLASS: &str = "cursor-ring";
pub const NAV_SCROLLED_CLASS: &str = "scrolled";
pub const MENU_OPEN_CLASS: &str = "menu-open";
pub const HIDDEN_CLASS: &str = "hidden";

// Data attributes
pub const ATTR_DURATION: &str = "data-duration";
pub const ATTR_DELAY: &str = "data-delay";
pub const ATTR_TRIGGER: &str = "data-trigger";
pub const ATTR_TEXT: &str = "data-text";
pub const ATTR_PARALLAX: &str = "data-parallax";
pub const ATTR_KIND: &str = "data-kind";

// Contact endpoints may be served from another origin
pub const CONTACT_REQUEST_MODE: web_sys::RequestMode = web_sys::RequestMode::Cors;

// Media queries
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
