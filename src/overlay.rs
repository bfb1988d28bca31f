use folio_core::Notice;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{ATTR_KIND, HIDDEN_CLASS, TOAST_CLOSE_ID, TOAST_DESCRIPTION_ID, TOAST_ID, TOAST_TITLE_ID};
use crate::dom::{self, Listener, Resource};
use crate::markup;

#[inline]
pub fn show(el: &web::Element) {
    dom::set_class(el, HIDDEN_CLASS, false);
    _ = el.set_attribute("aria-hidden", "false");
}

#[inline]
pub fn hide(el: &web::Element) {
    dom::set_class(el, HIDDEN_CLASS, true);
    _ = el.set_attribute("aria-hidden", "true");
}

/// Transient notification in `#toast`. Hides itself after a timeout and
/// on `#toast-close`.
pub struct Toast {
    el: web::Element,
    title: Option<web::Element>,
    description: Option<web::Element>,
    timer: Cell<Option<i32>>,
    expire: RefCell<Option<Closure<dyn FnMut()>>>,
    close: RefCell<Option<Listener>>,
    visible_ms: i32,
}

impl Toast {
    pub fn mount(document: &web::Document, visible_ms: i32) -> anyhow::Result<Option<Rc<Self>>> {
        let Some(el) = document.get_element_by_id(TOAST_ID) else {
            return Ok(None);
        };
        hide(&el);
        _ = el.set_attribute("role", "status");
        let toast = Rc::new(Self {
            el,
            title: document.get_element_by_id(TOAST_TITLE_ID),
            description: document.get_element_by_id(TOAST_DESCRIPTION_ID),
            timer: Cell::new(None),
            expire: RefCell::new(None),
            close: RefCell::new(None),
            visible_ms,
        });

        let weak: Weak<Self> = Rc::downgrade(&toast);
        *toast.expire.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(t) = weak.upgrade() {
                if t.timer.take().is_some() {
                    dom::release(Resource::Timer);
                }
                hide(&t.el);
            }
        }) as Box<dyn FnMut()>));

        if let Some(btn) = document.get_element_by_id(TOAST_CLOSE_ID) {
            let weak = Rc::downgrade(&toast);
            *toast.close.borrow_mut() = Some(Listener::new(btn.as_ref(), "click", move |e| {
                e.prevent_default();
                if let Some(t) = weak.upgrade() {
                    t.dismiss();
                }
            })?);
        }
        Ok(Some(toast))
    }

    pub fn notify(&self, notice: &Notice) {
        _ = self.el.set_attribute(ATTR_KIND, markup::notice_kind_attr(notice.kind));
        match (&self.title, &self.description) {
            (Some(t), Some(d)) => {
                t.set_text_content(Some(&notice.title));
                d.set_text_content(Some(&notice.description));
            }
            _ => {
                let text = format!("{}: {}", notice.title, notice.description);
                self.el.set_text_content(Some(&text));
            }
        }
        show(&self.el);
        self.restart_timer();
    }

    pub fn dismiss(&self) {
        self.clear_timer();
        hide(&self.el);
    }

    fn restart_timer(&self) {
        self.clear_timer();
        let Some(w) = web::window() else { return };
        let expire = self.expire.borrow();
        let Some(cb) = expire.as_ref() else { return };
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            self.visible_ms,
        ) {
            Ok(id) => {
                self.timer.set(Some(id));
                dom::retain(Resource::Timer);
            }
            Err(e) => log::warn!("[toast] setTimeout failed: {:?}", e),
        }
    }

    fn clear_timer(&self) {
        if let Some(id) = self.timer.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
            dom::release(Resource::Timer);
        }
    }

    pub fn teardown(&self) {
        self.clear_timer();
        self.close.borrow_mut().take();
        self.expire.borrow_mut().take();
        hide(&self.el);
    }
}
