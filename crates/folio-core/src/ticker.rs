//! Per-frame clock shared by every time-based effect.
//!
//! A [`Ticker`] keeps a set of frame callbacks and runs all of them with the
//! same timestamp each time the host delivers a frame. The host side is
//! reached through [`FrameRequester`]: the ticker asks for a frame while it
//! has subscribers and cancels the pending one when the last subscriber goes
//! away, so an idle page schedules nothing.

use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Host scheduling primitive (requestAnimationFrame on the web).
pub trait FrameRequester {
    /// Schedule one call to [`Ticker::advance`] on the next display frame.
    fn request_frame(&self);
    /// Drop a frame requested earlier and not yet delivered.
    fn cancel_frame(&self);
}

/// Returned by a frame callback to keep or drop its subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

type FrameFn = Rc<RefCell<dyn FnMut(f64) -> TickControl>>;

#[derive(Default)]
struct TickerInner {
    next_id: Cell<u64>,
    subscribers: RefCell<FnvHashMap<u64, FrameFn>>,
    requester: RefCell<Option<Rc<dyn FrameRequester>>>,
    frame_pending: Cell<bool>,
    last_timestamp: Cell<Option<f64>>,
}

/// Cheap to clone; clones share the same subscriber set.
#[derive(Clone, Default)]
pub struct Ticker {
    inner: Rc<TickerInner>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requester(requester: Rc<dyn FrameRequester>) -> Self {
        let ticker = Self::new();
        ticker.set_requester(Some(requester));
        ticker
    }

    /// Install or remove the host scheduler. Removing it cancels any frame
    /// already requested through it.
    pub fn set_requester(&self, requester: Option<Rc<dyn FrameRequester>>) {
        if requester.is_none() {
            self.cancel_pending();
        }
        *self.inner.requester.borrow_mut() = requester;
        self.wake();
    }

    /// Register `callback` to run once per frame until stopped.
    pub fn start(&self, callback: impl FnMut(f64) -> TickControl + 'static) -> TickHandle {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let callback: FrameFn = Rc::new(RefCell::new(callback));
        self.inner.subscribers.borrow_mut().insert(id, callback);
        self.wake();
        TickHandle(id)
    }

    /// Unregister a callback. Stopping an unknown or already stopped handle
    /// is a no-op; returns whether anything was removed.
    pub fn stop(&self, handle: TickHandle) -> bool {
        let removed = self
            .inner
            .subscribers
            .borrow_mut()
            .remove(&handle.0)
            .is_some();
        if removed && self.active_count() == 0 {
            self.cancel_pending();
        }
        removed
    }

    /// Drop every subscription.
    pub fn stop_all(&self) {
        self.inner.subscribers.borrow_mut().clear();
        self.cancel_pending();
    }

    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.inner.subscribers.borrow().contains_key(&handle.0)
    }

    pub fn active_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn frame_pending(&self) -> bool {
        self.inner.frame_pending.get()
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.inner.last_timestamp.get()
    }

    /// Handle that does not keep the ticker alive. Host frame callbacks hold
    /// one of these so the ticker and its requester never form a cycle.
    pub fn downgrade(&self) -> WeakTicker {
        WeakTicker(Rc::downgrade(&self.inner))
    }

    /// Deliver one frame. Every callback registered before this call sees the
    /// same `timestamp_ms`; callbacks registered during it first run on the
    /// next frame.
    pub fn advance(&self, timestamp_ms: f64) {
        self.inner.frame_pending.set(false);
        self.inner.last_timestamp.set(Some(timestamp_ms));

        let snapshot: Vec<(u64, FrameFn)> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(id, f)| (*id, f.clone()))
            .collect();

        for (id, callback) in snapshot {
            // an earlier callback in this frame may have stopped this one
            if !self.inner.subscribers.borrow().contains_key(&id) {
                continue;
            }
            let control = {
                let mut f = callback.borrow_mut();
                (*f)(timestamp_ms)
            };
            if control == TickControl::Stop {
                self.inner.subscribers.borrow_mut().remove(&id);
            }
        }

        self.wake();
    }

    fn wake(&self) {
        if self.inner.frame_pending.get() || self.active_count() == 0 {
            return;
        }
        let requester = self.inner.requester.borrow().clone();
        if let Some(r) = requester {
            self.inner.frame_pending.set(true);
            r.request_frame();
        }
    }

    fn cancel_pending(&self) {
        if !self.inner.frame_pending.replace(false) {
            return;
        }
        let requester = self.inner.requester.borrow().clone();
        if let Some(r) = requester {
            r.cancel_frame();
        }
    }
}

#[derive(Clone, Default)]
pub struct WeakTicker(Weak<TickerInner>);

impl WeakTicker {
    pub fn upgrade(&self) -> Option<Ticker> {
        self.0.upgrade().map(|inner| Ticker { inner })
    }
}

/// A subscription started on demand that clears itself once its callback
/// returns [`TickControl::Stop`]. Components keep one per animation so input
/// can restart the animation without stacking callbacks.
#[derive(Default)]
pub struct OnDemandTick {
    handle: Rc<Cell<Option<TickHandle>>>,
}

impl OnDemandTick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `callback` unless a previous one is still running.
    pub fn ensure(&self, ticker: &Ticker, mut callback: impl FnMut(f64) -> TickControl + 'static) {
        if let Some(h) = self.handle.get() {
            if ticker.is_active(h) {
                return;
            }
        }
        let slot = self.handle.clone();
        let handle = ticker.start(move |ts| {
            let control = callback(ts);
            if control == TickControl::Stop {
                slot.set(None);
            }
            control
        });
        self.handle.set(Some(handle));
    }

    /// Stop the running callback, if any. Safe to call repeatedly.
    pub fn cancel(&self, ticker: &Ticker) {
        if let Some(h) = self.handle.take() {
            ticker.stop(h);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }
}

/// Start/current/elapsed bookkeeping for one animation.
///
/// The start is latched from the first timestamp seen, and elapsed time is
/// always derived from timestamps, so throttled or skipped frames do not
/// distort it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    start: Option<f64>,
    current: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the elapsed milliseconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let start = *self.start.get_or_insert(timestamp_ms);
        self.current = timestamp_ms;
        (timestamp_ms - start).max(0.0)
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn elapsed(&self) -> f64 {
        self.start.map_or(0.0, |s| (self.current - s).max(0.0))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingFrames {
        requested: Cell<u32>,
        cancelled: Cell<u32>,
    }

    impl FrameRequester for CountingFrames {
        fn request_frame(&self) {
            self.requested.set(self.requested.get() + 1);
        }
        fn cancel_frame(&self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    #[test]
    fn subscribers_share_the_frame_timestamp() {
        let ticker = Ticker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..3 {
            let seen = seen.clone();
            ticker.start(move |ts| {
                seen.borrow_mut().push(ts);
                TickControl::Continue
            });
        }
        ticker.advance(16.5);
        assert_eq!(*seen.borrow(), vec![16.5, 16.5, 16.5]);
    }

    #[test]
    fn stop_control_removes_subscription() {
        let ticker = Ticker::new();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let handle = ticker.start(move |_| {
            c.set(c.get() + 1);
            TickControl::Stop
        });
        ticker.advance(0.0);
        ticker.advance(16.0);
        assert_eq!(calls.get(), 1);
        assert!(!ticker.is_active(handle));
    }

    #[test]
    fn requests_frames_only_while_busy() {
        let frames = Rc::new(CountingFrames::default());
        let ticker = Ticker::with_requester(frames.clone());
        assert_eq!(frames.requested.get(), 0);

        let h = ticker.start(|_| TickControl::Continue);
        assert_eq!(frames.requested.get(), 1);
        ticker.start(|_| TickControl::Continue);
        // one pending frame covers both
        assert_eq!(frames.requested.get(), 1);

        ticker.advance(0.0);
        assert_eq!(frames.requested.get(), 2);

        ticker.stop(h);
        ticker.stop_all();
        assert_eq!(frames.cancelled.get(), 1);
        assert!(!ticker.frame_pending());
    }

    #[test]
    fn callback_may_stop_another_mid_frame() {
        let ticker = Ticker::new();
        let victim_ran = Rc::new(Cell::new(false));
        let victim_slot: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));

        let t = ticker.clone();
        let slot = victim_slot.clone();
        ticker.start(move |_| {
            if let Some(h) = slot.get() {
                t.stop(h);
            }
            TickControl::Continue
        });
        let ran = victim_ran.clone();
        let victim = ticker.start(move |_| {
            ran.set(true);
            TickControl::Continue
        });
        victim_slot.set(Some(victim));

        // whichever order the map yields, the victim is gone afterwards
        ticker.advance(0.0);
        assert!(!ticker.is_active(victim));
        victim_ran.set(false);
        ticker.advance(16.0);
        assert!(!victim_ran.get());
    }

    #[test]
    fn on_demand_tick_does_not_stack() {
        let ticker = Ticker::new();
        let tick = OnDemandTick::new();
        let calls = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let c = calls.clone();
            tick.ensure(&ticker, move |_| {
                c.set(c.get() + 1);
                TickControl::Continue
            });
        }
        assert_eq!(ticker.active_count(), 1);
        ticker.advance(0.0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn on_demand_tick_clears_itself_on_stop() {
        let ticker = Ticker::new();
        let tick = OnDemandTick::new();
        tick.ensure(&ticker, |_| TickControl::Stop);
        assert!(tick.is_running());
        ticker.advance(0.0);
        assert!(!tick.is_running());
        assert_eq!(ticker.active_count(), 0);

        // and can be started again
        tick.ensure(&ticker, |_| TickControl::Continue);
        assert_eq!(ticker.active_count(), 1);
        tick.cancel(&ticker);
        tick.cancel(&ticker);
        assert_eq!(ticker.active_count(), 0);
    }

    #[test]
    fn clock_uses_timestamps_not_call_counts() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.tick(1000.0), 0.0);
        // a throttled tab delivers one late frame
        assert_eq!(clock.tick(3000.0), 2000.0);
        assert_eq!(clock.elapsed(), 2000.0);
        clock.reset();
        assert_eq!(clock.start(), None);
    }
}
