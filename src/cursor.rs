use folio_core::pointer::translate3d;
use folio_core::{
    CursorConfig, OnDemandTick, PointerTracker, TickControl, Ticker, INTERACTIVE_SELECTOR,
};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    CURSOR_ACTIVE_CLASS, CURSOR_BODY_CLASS, CURSOR_DOT_CLASS, CURSOR_DOT_ID, CURSOR_RING_CLASS,
    CURSOR_RING_ID, FINE_POINTER_QUERY,
};
use crate::dom::{self, Listener};

struct Shared {
    ticker: Ticker,
    tracker: RefCell<PointerTracker>,
    dot: web::Element,
    ring: web::Element,
    tick: OnDemandTick,
}

impl Shared {
    fn ensure_ticking(self: &Rc<Self>) {
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |_| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let (pos, settled) = {
                let mut t = me.tracker.borrow_mut();
                (t.tick(), t.is_settled())
            };
            dom::set_style(&me.ring, "transform", &translate3d(pos));
            if settled {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });
    }

    fn set_active(&self, active: bool) {
        dom::set_class(&self.dot, CURSOR_ACTIVE_CLASS, active);
        dom::set_class(&self.ring, CURSOR_ACTIVE_CLASS, active);
    }
}

/// Dot that follows the pointer exactly and a ring that trails it.
pub struct Cursor {
    shared: Rc<Shared>,
    body: Option<web::HtmlElement>,
    created: Vec<web::Element>,
    listeners: Vec<Listener>,
}

fn is_interactive(target: Option<web::EventTarget>) -> bool {
    dom::inside(target, INTERACTIVE_SELECTOR)
}

fn find_or_create(
    document: &web::Document,
    id: &str,
    class: &str,
    created: &mut Vec<web::Element>,
) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_id(id);
    el.set_class_name(class);
    _ = el.set_attribute("aria-hidden", "true");
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&el).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    created.push(el.clone());
    Ok(el)
}

impl Cursor {
    /// `None` on coarse pointers or when disabled.
    pub fn mount(ticker: &Ticker, document: &web::Document, config: &CursorConfig) -> anyhow::Result<Option<Self>> {
        if !config.enabled || !dom::media_matches(FINE_POINTER_QUERY) {
            log::debug!("[cursor] skipped (coarse pointer or disabled)");
            return Ok(None);
        }
        let mut created = Vec::new();
        let dot = find_or_create(document, CURSOR_DOT_ID, CURSOR_DOT_CLASS, &mut created)?;
        let ring = find_or_create(document, CURSOR_RING_ID, CURSOR_RING_CLASS, &mut created)?;
        let body = document.body();
        if let Some(b) = &body {
            dom::set_class(b, CURSOR_BODY_CLASS, true);
        }

        let shared = Rc::new(Shared {
            ticker: ticker.clone(),
            tracker: RefCell::new(PointerTracker::new(config.ease)),
            dot,
            ring,
            tick: OnDemandTick::new(),
        });

        let mut listeners = Vec::with_capacity(3);

        let s = shared.clone();
        listeners.push(Listener::passive(document.as_ref(), "pointermove", move |e| {
            let Some(me) = e.dyn_ref::<web::MouseEvent>() else { return };
            let raw = Vec2::new(me.client_x() as f32, me.client_y() as f32);
            s.tracker.borrow_mut().pointer_moved(raw);
            dom::set_style(&s.dot, "transform", &translate3d(raw));
            s.ensure_ticking();
        })?);

        let s = shared.clone();
        listeners.push(Listener::passive(document.as_ref(), "mouseover", move |e| {
            let inside = is_interactive(e.target());
            let changed = s.tracker.borrow_mut().pointer_over(inside);
            if changed {
                s.set_active(inside);
            }
        })?);

        let s = shared.clone();
        listeners.push(Listener::passive(document.as_ref(), "mouseout", move |e| {
            let entering = e
                .dyn_ref::<web::MouseEvent>()
                .map(|me| is_interactive(me.related_target()))
                .unwrap_or(false);
            if s.tracker.borrow_mut().pointer_out(entering) {
                s.set_active(false);
            }
        })?);

        log::info!("[cursor] mounted");
        Ok(Some(Self {
            shared,
            body,
            created,
            listeners,
        }))
    }

    pub fn teardown(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        self.listeners.clear();
        self.shared.tick.cancel(&self.shared.ticker);
        self.shared.set_active(false);
        for el in self.created.drain(..) {
            el.remove();
        }
        if let Some(b) = self.body.take() {
            dom::set_class(&b, CURSOR_BODY_CLASS, false);
        }
        log::debug!("[cursor] torn down");
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        self.teardown();
    }
}

