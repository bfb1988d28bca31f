use folio_core::parallax::{self, parse_factor};
use folio_core::{OnDemandTick, TickControl, Ticker, Tilt};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{ATTR_PARALLAX, PARALLAX_SELECTOR, TILT_SELECTOR};
use crate::dom::{self, Listener};

/// Cards that lean toward the pointer.
pub struct TiltCards {
    listeners: Vec<Listener>,
}

impl TiltCards {
    pub fn mount(document: &web::Document) -> anyhow::Result<Self> {
        let mut listeners = Vec::new();
        for card in dom::query_all(document, TILT_SELECTOR) {
            let el = card.clone();
            listeners.push(Listener::passive(card.as_ref(), "mousemove", move |e| {
                let Some(me) = e.dyn_ref::<web::MouseEvent>() else { return };
                let pointer = Vec2::new(me.client_x() as f32, me.client_y() as f32);
                let tilt = Tilt::at(pointer, dom::client_rect(&el));
                dom::set_style(&el, "transform", &tilt.css());
            })?);
            let el = card.clone();
            listeners.push(Listener::passive(card.as_ref(), "mouseleave", move |_| {
                dom::set_style(&el, "transform", &Tilt::RESET.css());
            })?);
        }
        if !listeners.is_empty() {
            log::info!("[tilt] {} cards", listeners.len() / 2);
        }
        Ok(Self { listeners })
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
    }
}

struct Layer {
    el: web::Element,
    // document-space center with no translation applied
    center: f64,
    factor: f64,
}

struct ParallaxShared {
    ticker: Ticker,
    layers: RefCell<Vec<Layer>>,
    tick: OnDemandTick,
}

impl ParallaxShared {
    fn apply(&self) {
        let y = dom::scroll_y();
        let vh = dom::viewport_height();
        for layer in self.layers.borrow().iter() {
            let dy = parallax::offset(y, layer.center, vh, layer.factor);
            dom::set_style(&layer.el, "transform", &format!("translate3d(0, {:.2}px, 0)", dy));
        }
    }

    /// Coalesce scroll events into one style write per frame.
    fn schedule(self: &Rc<Self>) {
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |_| {
            if let Some(me) = me.upgrade() {
                me.apply();
            }
            TickControl::Stop
        });
    }
}

/// `[data-parallax="<factor>"]` layers.
pub struct Parallax {
    shared: Rc<ParallaxShared>,
    listeners: Vec<Listener>,
}

impl Parallax {
    pub fn mount(ticker: &Ticker, document: &web::Document) -> anyhow::Result<Option<Self>> {
        let layers: Vec<Layer> = dom::query_all(document, PARALLAX_SELECTOR)
            .into_iter()
            .map(|el| {
                let r = el.get_bounding_client_rect();
                let center = r.top() + dom::scroll_y() + r.height() * 0.5;
                let factor = parse_factor(el.get_attribute(ATTR_PARALLAX).as_deref());
                Layer { el, center, factor }
            })
            .collect();
        if layers.is_empty() {
            return Ok(None);
        }
        let count = layers.len();
        let shared = Rc::new(ParallaxShared {
            ticker: ticker.clone(),
            layers: RefCell::new(layers),
            tick: OnDemandTick::new(),
        });
        shared.apply();

        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let s = shared.clone();
        let listeners = vec![Listener::passive(window.as_ref(), "scroll", move |_| {
            s.schedule();
        })?];
        log::info!("[parallax] {} layers", count);
        Ok(Some(Self { shared, listeners }))
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.shared.tick.cancel(&self.shared.ticker);
        for layer in self.shared.layers.borrow_mut().drain(..) {
            dom::set_style(&layer.el, "transform", "");
        }
    }
}

impl Drop for Parallax {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Drop for TiltCards {
    fn drop(&mut self) {
        self.teardown();
    }
}
