// Host-side tests for the trailing cursor ring.

use folio_core::PointerTracker;
use glam::Vec2;

#[test]
fn ring_distance_shrinks_every_tick() {
    let path = [
        Vec2::new(640.0, 360.0),
        Vec2::new(12.0, 700.0),
        Vec2::new(1900.0, 3.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(333.3, 444.4),
    ];
    let mut p = PointerTracker::default();
    for target in path {
        p.pointer_moved(target);
        let initial = (target - p.eased()).length();
        let mut prev = initial;
        for _ in 0..120 {
            let eased = p.tick();
            let d = (target - eased).length();
            assert!(d <= initial);
            if prev > 0.0 {
                assert!(d < prev, "distance did not shrink: {prev} -> {d}");
            } else {
                assert_eq!(d, 0.0);
            }
            prev = d;
        }
        assert!(p.is_settled(), "ring never caught up with {target:?}");
    }
}

#[test]
fn axes_ease_independently() {
    let mut p = PointerTracker::new(0.5);
    p.pointer_moved(Vec2::new(100.0, 0.0));
    let e = p.tick();
    assert_eq!(e, Vec2::new(50.0, 0.0));
    p.pointer_moved(Vec2::new(100.0, 80.0));
    let e = p.tick();
    assert_eq!(e, Vec2::new(75.0, 40.0));
}

#[test]
fn raw_position_never_lags() {
    let mut p = PointerTracker::default();
    for i in 0..10 {
        let pos = Vec2::new(i as f32 * 10.0, 5.0);
        p.pointer_moved(pos);
        assert_eq!(p.raw(), pos);
    }
    // eased untouched until a frame runs
    assert_eq!(p.eased(), Vec2::ZERO);
}
