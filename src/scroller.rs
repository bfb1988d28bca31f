use folio_core::scroll::{anchor_fragment, wheel_delta_px};
use folio_core::{OnDemandTick, ScrollConfig, SmoothScroller, TickControl, Ticker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{ANCHOR_SELECTOR, NATIVE_SCROLL_SELECTOR};
use crate::dom::{self, Listener};

struct Shared {
    ticker: Ticker,
    scroller: RefCell<SmoothScroller>,
    tick: OnDemandTick,
}

impl Shared {
    fn ensure_ticking(self: &Rc<Self>) {
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |ts| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let (next, animating) = {
                let mut s = me.scroller.borrow_mut();
                (s.tick(ts), s.is_animating())
            };
            if let (Some(y), Some(w)) = (next, web::window()) {
                w.scroll_to_with_x_and_y(0.0, y);
            }
            if animating {
                TickControl::Continue
            } else {
                TickControl::Stop
            }
        });
    }
}

/// Eased page scrolling for wheel input and in-page anchor links.
pub struct SmoothScroll {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl SmoothScroll {
    pub fn mount(ticker: &Ticker, document: &web::Document, config: ScrollConfig) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut scroller = SmoothScroller::attach(config);
        scroller.set_limit(dom::scroll_limit(document));
        scroller.sync_native(dom::scroll_y());
        let shared = Rc::new(Shared {
            ticker: ticker.clone(),
            scroller: RefCell::new(scroller),
            tick: OnDemandTick::new(),
        });

        let mut listeners = Vec::with_capacity(3);

        let s = shared.clone();
        let doc = document.clone();
        listeners.push(Listener::new(window.as_ref(), "wheel", move |e| {
            let Some(we) = e.dyn_ref::<web::WheelEvent>() else { return };
            // pinch zoom and nested scrollers keep native behavior
            if we.ctrl_key() || dom::inside(e.target(), NATIVE_SCROLL_SELECTOR) {
                return;
            }
            let delta = wheel_delta_px(we.delta_y(), we.delta_mode(), dom::viewport_height());
            let consumed = {
                let mut sc = s.scroller.borrow_mut();
                sc.set_limit(dom::scroll_limit(&doc));
                sc.wheel(delta)
            };
            if consumed {
                e.prevent_default();
                s.ensure_ticking();
            }
        })?);

        let s = shared.clone();
        let doc = document.clone();
        listeners.push(Listener::new(document.as_ref(), "click", move |e| {
            let Some(link) = e
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .and_then(|el| el.closest(ANCHOR_SELECTOR).ok().flatten())
            else {
                return;
            };
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_fragment(&href) else { return };
            e.prevent_default();
            let Some(target) = doc.get_element_by_id(id) else {
                log::debug!("[scroll] no element for #{}", id);
                return;
            };
            let top = dom::document_top(&target);
            {
                let mut sc = s.scroller.borrow_mut();
                sc.set_limit(dom::scroll_limit(&doc));
                sc.scroll_to_anchor(top);
            }
            s.ensure_ticking();
        })?);

        let s = shared.clone();
        listeners.push(Listener::passive(window.as_ref(), "scroll", move |_| {
            s.scroller.borrow_mut().sync_native(dom::scroll_y());
        })?);

        log::info!("[scroll] mounted");
        Ok(Self { shared, listeners })
    }

    /// Stop scrolling and remove listeners. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.shared.scroller.borrow().is_destroyed() {
            return;
        }
        self.shared.scroller.borrow_mut().destroy();
        self.shared.tick.cancel(&self.shared.ticker);
        self.listeners.clear();
        log::debug!("[scroll] destroyed");
    }
}

impl Drop for SmoothScroll {
    fn drop(&mut self) {
        self.destroy();
    }
}
