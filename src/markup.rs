// Attribute parsing for markup hooks. Pure so it can be tested off-browser.

use folio_core::{NoticeKind, Trigger, TypewriterConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypewriterOptions {
    pub duration_ms: f64,
    pub start_delay_ms: f64,
    pub trigger: Trigger,
}

/// Text a typewriter reveals, and whether it still has to be stored in
/// `data-text`. The element is blanked while typing, so its content is only
/// trusted the first time; later mounts read the stored copy.
pub fn typewriter_source(data_text: Option<&str>, content: Option<&str>) -> (String, bool) {
    match data_text {
        Some(text) => (text.to_string(), false),
        None => (content.unwrap_or_default().to_string(), true),
    }
}

/// Milliseconds from an attribute; rejects negatives and non-numbers.
pub fn parse_ms(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().trim_end_matches("ms").trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

pub fn parse_trigger(raw: Option<&str>) -> Trigger {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("view") | Some("visible") => Trigger::OnVisible,
        _ => Trigger::Immediate,
    }
}

pub fn typewriter_options(
    duration: Option<&str>,
    delay: Option<&str>,
    trigger: Option<&str>,
    defaults: &TypewriterConfig,
) -> TypewriterOptions {
    TypewriterOptions {
        duration_ms: parse_ms(duration).unwrap_or(defaults.duration_ms),
        start_delay_ms: parse_ms(delay).unwrap_or(defaults.start_delay_ms),
        trigger: parse_trigger(trigger),
    }
}

/// Toast `data-kind` value.
pub fn notice_kind_attr(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "success",
        NoticeKind::Error => "error",
    }
}
