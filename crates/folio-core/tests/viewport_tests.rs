// Host-side tests for reveal-on-scroll visibility tracking.

use folio_core::{ObserveMode, Visibility, ViewportObserver};

#[test]
fn one_shot_emits_exactly_once() {
    let mut vo = ViewportObserver::new();
    vo.observe(7, 0.25, ObserveMode::Once);

    let mut visible_events = 0;
    // element scrolls in and out of view several times
    for ratio in [0.0, 0.3, 0.0, 0.8, 0.1, 1.0, 0.0, 0.5] {
        if let Some(ev) = vo.report(7, ratio) {
            assert_eq!(ev.visibility, Visibility::Visible);
            assert!(ev.unobserve);
            visible_events += 1;
        }
    }
    assert_eq!(visible_events, 1);
    assert!(!vo.is_observing(7));
}

#[test]
fn one_shot_is_per_element() {
    let mut vo = ViewportObserver::new();
    for key in 0..5 {
        vo.observe(key, 0.2, ObserveMode::Once);
    }
    let first = vo.report_all((0..5).map(|k| (k, 0.9)));
    let second = vo.report_all((0..5).map(|k| (k, 0.9)));
    assert_eq!(first.len(), 5);
    assert!(second.is_empty());
    assert!(vo.is_empty());
}

#[test]
fn repeat_mode_follows_every_crossing() {
    let mut vo = ViewportObserver::new();
    vo.observe(1, 0.3, ObserveMode::Repeat);
    let seq: Vec<Visibility> = [0.5, 0.1, 0.6, 0.6, 0.0]
        .iter()
        .filter_map(|r| vo.report(1, *r))
        .map(|e| e.visibility)
        .collect();
    assert_eq!(
        seq,
        vec![
            Visibility::Visible,
            Visibility::Hidden,
            Visibility::Visible,
            Visibility::Hidden
        ]
    );
}

#[test]
fn removed_element_is_forgotten_silently() {
    let mut vo = ViewportObserver::new();
    vo.observe(4, 0.25, ObserveMode::Once);
    vo.forget(4);
    vo.forget(4);
    assert_eq!(vo.report(4, 1.0), None);
    assert!(vo.is_empty());
}

#[test]
fn batch_drops_fired_one_shots_and_keeps_the_rest() {
    let mut vo = ViewportObserver::new();
    for key in 0..4 {
        vo.observe(key, 0.2, ObserveMode::Once);
    }
    vo.observe(9, 0.2, ObserveMode::Repeat);

    // one callback delivering several entries at once
    let events = vo.report_all([(0, 0.5), (1, 0.0), (2, 0.9), (9, 0.4), (42, 1.0)]);
    let fired: Vec<_> = events.iter().map(|e| (e.target, e.unobserve)).collect();
    assert_eq!(fired, vec![(0, true), (2, true), (9, false)]);

    // fired one-shots are gone, so the map only holds pending targets
    assert!(!vo.is_observing(0));
    assert!(!vo.is_observing(2));
    assert!(vo.is_observing(1));
    assert!(vo.is_observing(9));
    assert_eq!(vo.len(), 3);

    // a later batch cannot fire them again
    assert!(vo.report_all([(0, 1.0), (2, 1.0)]).is_empty());
}

#[test]
fn element_removed_before_it_was_seen_frees_its_slot() {
    let mut vo = ViewportObserver::new();
    vo.observe(3, 0.1, ObserveMode::Once);
    vo.observe(4, 0.1, ObserveMode::Once);

    vo.forget(3);
    assert_eq!(vo.len(), 1);
    let events = vo.report_all([(3, 1.0), (4, 1.0)]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, 4);
    assert_eq!(events[0].visibility, Visibility::Visible);
    assert!(vo.is_empty());
}
