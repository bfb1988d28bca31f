use folio_core::scroll::ScrollDirection;
use fnv::FnvHashMap;
use folio_core::{ObserveMode, RevealConfig, TargetKey, ViewportObserver, Visibility};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::constants::{
    BOB_DOWN_CLASS, BOB_SELECTOR, BOB_UP_CLASS, IN_VIEW_CLASS, REVEAL_SELECTOR,
    SECTION_LINE_SELECTOR,
};
use crate::dom::{self, Listener, Resource};

type VisibilityFn = Box<dyn Fn(&web::Element, Visibility)>;
type EntriesFn = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

struct Targets {
    model: RefCell<ViewportObserver>,
    elements: RefCell<FnvHashMap<TargetKey, web::Element>>,
    next_key: Cell<TargetKey>,
}

impl Targets {
    fn key_of(&self, el: &web::Element) -> Option<TargetKey> {
        self.elements
            .borrow()
            .iter()
            .find(|(_, e)| *e == el)
            .map(|(k, _)| *k)
    }

    /// Drop a target from the model and the element map.
    fn release(&self, key: TargetKey, io: &web::IntersectionObserver) {
        self.model.borrow_mut().forget(key);
        if let Some(el) = self.elements.borrow_mut().remove(&key) {
            io.unobserve(&el);
        }
    }
}

/// IntersectionObserver bound to a [`ViewportObserver`] model.
///
/// The browser reports raw ratios; the model decides which of them are
/// crossings worth an event. One-shot targets are unobserved and dropped as
/// soon as they fire; targets removed from the document are dropped on
/// their next report.
pub struct Observer {
    targets: Rc<Targets>,
    io: Option<web::IntersectionObserver>,
    callback: Option<EntriesFn>,
    threshold: f64,
    mode: ObserveMode,
}

impl Observer {
    pub fn new(
        threshold: f64,
        mode: ObserveMode,
        on_event: impl Fn(&web::Element, Visibility) + 'static,
    ) -> anyhow::Result<Self> {
        let targets = Rc::new(Targets {
            model: RefCell::new(ViewportObserver::new()),
            elements: RefCell::new(FnvHashMap::default()),
            next_key: Cell::new(0),
        });
        let on_event: VisibilityFn = Box::new(on_event);

        let t = targets.clone();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, io: web::IntersectionObserver| {
                let mut batch = Vec::with_capacity(entries.length() as usize);
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let el = entry.target();
                    let Some(key) = t.key_of(&el) else { continue };
                    if !el.is_connected() {
                        t.release(key, &io);
                        continue;
                    }
                    let ratio = if entry.is_intersecting() {
                        entry.intersection_ratio()
                    } else {
                        0.0
                    };
                    batch.push((key, ratio));
                }
                let events = t.model.borrow_mut().report_all(batch);
                let mut fired = Vec::with_capacity(events.len());
                for ev in events {
                    let el = if ev.unobserve {
                        let el = t.elements.borrow_mut().remove(&ev.target);
                        if let Some(el) = &el {
                            io.unobserve(el);
                        }
                        el
                    } else {
                        t.elements.borrow().get(&ev.target).cloned()
                    };
                    if let Some(el) = el {
                        fired.push((el, ev.visibility));
                    }
                }
                // handlers may touch the DOM or other components; no borrow held
                for (el, visibility) in fired {
                    on_event(&el, visibility);
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let thresholds = js_sys::Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(threshold));
        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&thresholds);
        let io = web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
        dom::retain(Resource::Observer);

        Ok(Self {
            targets,
            io: Some(io),
            callback: Some(callback),
            threshold,
            mode,
        })
    }

    pub fn observe(&self, el: &web::Element) {
        let Some(io) = &self.io else { return };
        if !el.is_connected() || self.targets.key_of(el).is_some() {
            return;
        }
        let key = self.targets.next_key.get();
        self.targets.next_key.set(key.wrapping_add(1));
        self.targets.elements.borrow_mut().insert(key, el.clone());
        self.targets
            .model
            .borrow_mut()
            .observe(key, self.threshold, self.mode);
        io.observe(el);
    }

    /// Targets still waiting for (or, in repeat mode, tracking) visibility.
    pub fn pending(&self) -> usize {
        self.targets.model.borrow().len()
    }

    pub fn disconnect(&mut self) {
        if let Some(io) = self.io.take() {
            io.disconnect();
            dom::release(Resource::Observer);
        }
        self.targets.model.borrow_mut().clear();
        self.targets.elements.borrow_mut().clear();
        self.callback.take();
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Scroll-triggered classes: `[data-reveal]` and `.section-line` get
/// `in-view` once, `[data-bob]` elements toggle it and follow wheel
/// direction while visible.
pub struct Reveal {
    observers: Vec<Observer>,
    listeners: Vec<Listener>,
}

impl Reveal {
    pub fn mount(document: &web::Document, config: &RevealConfig) -> anyhow::Result<Self> {
        let mut observers = Vec::with_capacity(3);

        let reveal = Observer::new(config.threshold, ObserveMode::Once, |el, _| {
            dom::set_class(el, IN_VIEW_CLASS, true);
        })?;
        for el in dom::query_all(document, REVEAL_SELECTOR) {
            reveal.observe(&el);
        }
        observers.push(reveal);

        let lines = Observer::new(config.line_threshold, ObserveMode::Once, |el, _| {
            dom::set_class(el, IN_VIEW_CLASS, true);
        })?;
        for el in dom::query_all(document, SECTION_LINE_SELECTOR) {
            lines.observe(&el);
        }
        observers.push(lines);

        let mut listeners = Vec::new();
        let bobbing = dom::query_all(document, BOB_SELECTOR);
        if !bobbing.is_empty() {
            let visible: Rc<RefCell<Vec<web::Element>>> = Rc::default();
            let v = visible.clone();
            let bob = Observer::new(config.threshold, ObserveMode::Repeat, move |el, vis| {
                let shown = vis == Visibility::Visible;
                dom::set_class(el, IN_VIEW_CLASS, shown);
                let mut list = v.borrow_mut();
                if shown {
                    list.push(el.clone());
                } else {
                    list.retain(|e| e != el);
                    dom::set_class(el, BOB_UP_CLASS, false);
                    dom::set_class(el, BOB_DOWN_CLASS, false);
                }
            })?;
            for el in &bobbing {
                bob.observe(el);
            }
            observers.push(bob);

            let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
            listeners.push(Listener::passive(window.as_ref(), "wheel", move |e| {
                let Some(we) = e.dyn_ref::<web::WheelEvent>() else { return };
                let Some(dir) = ScrollDirection::from_delta(we.delta_y()) else { return };
                let down = dir == ScrollDirection::Down;
                for el in visible.borrow().iter() {
                    dom::set_class(el, BOB_DOWN_CLASS, down);
                    dom::set_class(el, BOB_UP_CLASS, !down);
                }
            })?);
        }

        log::info!(
            "[reveal] observing {} targets",
            observers.iter().map(Observer::pending).sum::<usize>()
        );
        Ok(Self {
            observers,
            listeners,
        })
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        for mut o in self.observers.drain(..) {
            o.disconnect();
        }
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.teardown();
    }
}
