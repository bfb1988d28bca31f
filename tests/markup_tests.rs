// Host-side tests for markup attribute parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod markup {
    include!("../src/markup.rs");
}

use folio_core::{NoticeKind, Trigger, Typewriter, TypewriterConfig};
use markup::*;

#[test]
fn missing_attributes_use_config_defaults() {
    let defaults = TypewriterConfig::default();
    let opts = typewriter_options(None, None, None, &defaults);
    assert_eq!(opts.duration_ms, defaults.duration_ms);
    assert_eq!(opts.start_delay_ms, defaults.start_delay_ms);
    assert_eq!(opts.trigger, Trigger::Immediate);
}

#[test]
fn attribute_values_override_defaults() {
    let defaults = TypewriterConfig::default();
    let opts = typewriter_options(Some("2400"), Some(" 300ms "), Some("view"), &defaults);
    assert_eq!(opts.duration_ms, 2400.0);
    assert_eq!(opts.start_delay_ms, 300.0);
    assert_eq!(opts.trigger, Trigger::OnVisible);
}

#[test]
fn bad_durations_fall_back() {
    assert_eq!(parse_ms(Some("-5")), None);
    assert_eq!(parse_ms(Some("fast")), None);
    assert_eq!(parse_ms(Some("NaN")), None);
    assert_eq!(parse_ms(Some("0")), Some(0.0));
    assert_eq!(parse_ms(None), None);
}

#[test]
fn trigger_values() {
    assert_eq!(parse_trigger(Some("VIEW")), Trigger::OnVisible);
    assert_eq!(parse_trigger(Some("visible")), Trigger::OnVisible);
    assert_eq!(parse_trigger(Some("load")), Trigger::Immediate);
    assert_eq!(parse_trigger(Some("")), Trigger::Immediate);
}

#[test]
fn notice_kinds_map_to_attribute_values() {
    assert_eq!(notice_kind_attr(NoticeKind::Success), "success");
    assert_eq!(notice_kind_attr(NoticeKind::Error), "error");
}

#[test]
fn first_mount_stores_the_element_text() {
    let (text, store) = typewriter_source(None, Some("Portfolio"));
    assert_eq!(text, "Portfolio");
    assert!(store);
}

#[test]
fn remount_reads_stored_text_not_the_blanked_element() {
    // first mount stored the text, then blanked the element; it was never reached
    let (text, store) = typewriter_source(Some("Portfolio"), Some(""));
    assert_eq!(text, "Portfolio");
    assert!(!store);

    // unmounted half way through: the element holds a prefix only
    let (text, _) = typewriter_source(Some("Portfolio"), Some("Port"));
    assert_eq!(text, "Portfolio");

    let mut tw = Typewriter::new(text, 100.0, 0.0, Trigger::Immediate);
    tw.tick(0.0);
    tw.tick(100.0);
    assert_eq!(tw.visible_text(), "Portfolio");
}

#[test]
fn missing_content_gives_empty_text() {
    assert_eq!(typewriter_source(None, None), (String::new(), true));
}
