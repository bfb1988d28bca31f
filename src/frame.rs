use folio_core::{FrameRequester, Ticker, WeakTicker};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, Resource};

/// requestAnimationFrame backend for the shared [`Ticker`].
///
/// At most one frame is outstanding. The callback holds only a weak handle
/// to the ticker, so dropping the site drops the ticker even if a frame is
/// still queued.
pub struct RafDriver {
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl RafDriver {
    pub fn install(ticker: &Ticker) -> Rc<Self> {
        let driver = Rc::new(Self {
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak: WeakTicker = ticker.downgrade();
        let me = Rc::downgrade(&driver);
        let closure = Closure::wrap(Box::new(move |ts: f64| {
            if let Some(d) = me.upgrade() {
                if d.pending.take().is_some() {
                    dom::release(Resource::Timer);
                }
            }
            if let Some(t) = weak.upgrade() {
                t.advance(ts);
            }
        }) as Box<dyn FnMut(f64)>);
        *driver.callback.borrow_mut() = Some(closure);
        ticker.set_requester(Some(driver.clone()));
        driver
    }

    /// Detach from the ticker and drop the frame callback.
    pub fn shutdown(&self, ticker: &Ticker) {
        ticker.set_requester(None);
        self.cancel_frame();
        self.callback.borrow_mut().take();
    }
}

impl FrameRequester for RafDriver {
    fn request_frame(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(w) = web::window() else { return };
        let cb = self.callback.borrow();
        let Some(closure) = cb.as_ref() else { return };
        match w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => {
                self.pending.set(Some(id));
                dom::retain(Resource::Timer);
            }
            Err(e) => log::warn!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
            dom::release(Resource::Timer);
        }
    }
}
