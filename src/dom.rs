use folio_core::Rect;
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static LIVE_LISTENERS: Cell<usize> = const { Cell::new(0) };
    static LIVE_OBSERVERS: Cell<usize> = const { Cell::new(0) };
    static LIVE_TIMERS: Cell<usize> = const { Cell::new(0) };
}

#[derive(Clone, Copy, Debug)]
pub enum Resource {
    Listener,
    Observer,
    Timer,
}

fn counter(kind: Resource) -> &'static std::thread::LocalKey<Cell<usize>> {
    match kind {
        Resource::Listener => &LIVE_LISTENERS,
        Resource::Observer => &LIVE_OBSERVERS,
        Resource::Timer => &LIVE_TIMERS,
    }
}

#[inline]
pub fn retain(kind: Resource) {
    counter(kind).with(|c| c.set(c.get() + 1));
}

#[inline]
pub fn release(kind: Resource) {
    counter(kind).with(|c| c.set(c.get().saturating_sub(1)));
}

/// Listeners, observers and timers currently registered with the browser.
pub fn live_resources() -> usize {
    [Resource::Listener, Resource::Observer, Resource::Timer]
        .into_iter()
        .map(|k| counter(k).with(Cell::get))
        .sum()
}

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        Self::with_passive(target, event, false, handler)
    }

    /// Passive listeners cannot cancel the event but never block scrolling.
    pub fn passive(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        Self::with_passive(target, event, true, handler)
    }

    fn with_passive(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| anyhow::anyhow!("addEventListener({}) failed: {:?}", event, e))?;
        retain(Resource::Listener);
        Ok(Self {
            target: target.clone(),
            event,
            closure: Some(closure),
        })
    }

    /// Unregister now. Safe to call repeatedly.
    pub fn remove(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
            release(Resource::Listener);
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.remove();
    }
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] bad selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Whether the event target sits inside an element matching `selector`.
pub fn inside(target: Option<web::EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

#[inline]
pub fn set_style(el: &web::Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property(property, value);
    }
}

pub fn media_matches(query: &str) -> bool {
    web::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn scroll_y() -> f64 {
    web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport_height() -> f64 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Largest scroll offset the document allows.
pub fn scroll_limit(document: &web::Document) -> f64 {
    let height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    (height - viewport_height()).max(0.0)
}

/// Element top in document coordinates.
pub fn document_top(el: &web::Element) -> f64 {
    el.get_bounding_client_rect().top() + scroll_y()
}

pub fn client_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

pub fn local_storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}
