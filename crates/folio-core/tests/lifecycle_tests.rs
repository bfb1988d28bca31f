// Host-side tests for mount/unmount bookkeeping. Each piece below is wired the
// way the browser components are: shared state behind an Rc, one OnDemandTick
// per animation, callbacks that only hold a weak reference.

use folio_core::nav::PanelTween;
use folio_core::{
    FrameRequester, OnDemandTick, PointerTracker, ScrollConfig, SmoothScroller, TickControl,
    Ticker, Trigger, Typewriter,
};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CountingFrames {
    requested: Cell<u32>,
    cancelled: Cell<u32>,
    delivered: Cell<u32>,
}

impl CountingFrames {
    fn outstanding(&self) -> u32 {
        self.requested.get() - self.cancelled.get() - self.delivered.get()
    }

    fn deliver(&self, ticker: &Ticker, ts: f64) {
        if self.outstanding() > 0 {
            self.delivered.set(self.delivered.get() + 1);
            ticker.advance(ts);
        }
    }
}

impl FrameRequester for CountingFrames {
    fn request_frame(&self) {
        self.requested.set(self.requested.get() + 1);
    }
    fn cancel_frame(&self) {
        self.cancelled.set(self.cancelled.get() + 1);
    }
}

struct Scroll {
    ticker: Ticker,
    scroller: RefCell<SmoothScroller>,
    tick: OnDemandTick,
}

impl Scroll {
    fn mount(ticker: &Ticker) -> Rc<Self> {
        let mut scroller = SmoothScroller::attach(ScrollConfig::default());
        scroller.set_limit(5000.0);
        scroller.sync_native(0.0);
        Rc::new(Self {
            ticker: ticker.clone(),
            scroller: RefCell::new(scroller),
            tick: OnDemandTick::new(),
        })
    }

    fn wheel(self: &Rc<Self>, delta: f64) {
        if !self.scroller.borrow_mut().wheel(delta) {
            return;
        }
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |ts| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let mut s = me.scroller.borrow_mut();
            s.tick(ts);
            if s.is_animating() {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        });
    }

    fn teardown(&self) {
        self.scroller.borrow_mut().destroy();
        self.tick.cancel(&self.ticker);
    }
}

struct Cursor {
    ticker: Ticker,
    pointer: RefCell<PointerTracker>,
    tick: OnDemandTick,
}

impl Cursor {
    fn mount(ticker: &Ticker) -> Rc<Self> {
        Rc::new(Self {
            ticker: ticker.clone(),
            pointer: RefCell::new(PointerTracker::default()),
            tick: OnDemandTick::new(),
        })
    }

    fn moved(self: &Rc<Self>, to: Vec2) {
        self.pointer.borrow_mut().pointer_moved(to);
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |_| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let mut p = me.pointer.borrow_mut();
            p.tick();
            if p.is_settled() {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });
    }

    fn teardown(&self) {
        self.tick.cancel(&self.ticker);
    }
}

struct Animated {
    ticker: Ticker,
    typewriter: Rc<RefCell<Typewriter>>,
    panel: Rc<RefCell<PanelTween>>,
    typing: OnDemandTick,
    menu: OnDemandTick,
}

impl Animated {
    fn mount(ticker: &Ticker) -> Self {
        let this = Self {
            ticker: ticker.clone(),
            typewriter: Rc::new(RefCell::new(Typewriter::new("Portfolio", 300.0, 0.0, Trigger::Immediate))),
            panel: Rc::new(RefCell::new(PanelTween::open())),
            typing: OnDemandTick::new(),
            menu: OnDemandTick::new(),
        };
        let tw = Rc::downgrade(&this.typewriter);
        this.typing.ensure(ticker, move |ts| match tw.upgrade() {
            Some(tw) => tw.borrow_mut().tick(ts),
            None => TickControl::Stop,
        });
        let panel = Rc::downgrade(&this.panel);
        this.menu.ensure(ticker, move |ts| match panel.upgrade() {
            Some(p) => p.borrow_mut().tick(ts),
            None => TickControl::Stop,
        });
        this
    }

    fn teardown(&self) {
        self.typing.cancel(&self.ticker);
        self.menu.cancel(&self.ticker);
    }
}

/// Everything a page mounts.
struct Page {
    scroll: Rc<Scroll>,
    cursor: Rc<Cursor>,
    animated: Animated,
}

impl Page {
    fn mount(ticker: &Ticker) -> Self {
        let page = Self {
            scroll: Scroll::mount(ticker),
            cursor: Cursor::mount(ticker),
            animated: Animated::mount(ticker),
        };
        page.scroll.wheel(240.0);
        page.cursor.moved(Vec2::new(300.0, 200.0));
        page
    }

    fn unmount(&self) {
        self.scroll.teardown();
        self.cursor.teardown();
        self.animated.teardown();
    }
}

#[test]
fn mount_then_unmount_in_one_frame_leaves_nothing() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());

    let page = Page::mount(&ticker);
    assert_eq!(ticker.active_count(), 4);
    assert_eq!(frames.requested.get(), 1);

    page.unmount();
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(frames.cancelled.get(), 1);
    assert_eq!(frames.outstanding(), 0);
    assert!(!ticker.frame_pending());
}

#[test]
fn repeated_input_keeps_one_subscription_per_animation() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());
    let page = Page::mount(&ticker);

    for i in 0..10 {
        page.scroll.wheel(100.0);
        page.cursor.moved(Vec2::new(i as f32 * 40.0, 10.0));
        frames.deliver(&ticker, i as f64 * 16.0);
    }
    assert!(ticker.active_count() <= 4);
    assert!(frames.outstanding() <= 1);
    page.unmount();
    assert_eq!(frames.outstanding(), 0);
}

#[test]
fn idle_page_stops_requesting_frames() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());
    let page = Page::mount(&ticker);

    let mut ts = 0.0;
    while frames.outstanding() > 0 && ts < 60_000.0 {
        frames.deliver(&ticker, ts);
        ts += 16.0;
    }
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(frames.outstanding(), 0);
    assert!(!page.scroll.tick.is_running());
    assert!(!page.cursor.tick.is_running());

    // new input wakes the loop again
    page.scroll.wheel(-120.0);
    assert_eq!(frames.outstanding(), 1);
    page.unmount();
    assert_eq!(frames.outstanding(), 0);
}

#[test]
fn double_unmount_does_not_resume() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());
    let page = Page::mount(&ticker);
    frames.deliver(&ticker, 0.0);
    page.unmount();
    page.unmount();

    // input arriving after teardown is ignored by the destroyed scroller
    page.scroll.wheel(100.0);
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(frames.outstanding(), 0);
}

#[test]
fn dropped_components_stop_on_the_next_frame() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());
    let scroll = Scroll::mount(&ticker);
    scroll.wheel(500.0);
    assert_eq!(ticker.active_count(), 1);

    drop(scroll);
    frames.deliver(&ticker, 0.0);
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(frames.outstanding(), 0);
}

#[test]
fn remount_after_unmount_starts_fresh() {
    let frames = Rc::new(CountingFrames::default());
    let ticker = Ticker::with_requester(frames.clone());
    let first = Page::mount(&ticker);
    first.unmount();

    let second = Page::mount(&ticker);
    assert_eq!(ticker.active_count(), 4);
    assert_eq!(frames.outstanding(), 1);
    second.unmount();
    assert_eq!(ticker.active_count(), 0);
    assert_eq!(frames.requested.get(), frames.cancelled.get());
}
