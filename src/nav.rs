use folio_core::{NavState, OnDemandTick, PanelStyle, PanelTween, TickControl, Ticker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    HIDDEN_CLASS, MENU_OPEN_CLASS, MENU_OVERLAY_ID, MENU_PANEL_ID, MENU_TOGGLE_ID, NAV_ID,
    NAV_SCROLLED_CLASS,
};
use crate::dom::{self, Listener};

struct Shared {
    ticker: Ticker,
    state: RefCell<NavState>,
    tween: RefCell<Option<PanelTween>>,
    style: RefCell<PanelStyle>,
    nav: Option<web::Element>,
    toggle: Option<web::Element>,
    panel: Option<web::Element>,
    overlay: Option<web::Element>,
    tick: OnDemandTick,
}

impl Shared {
    fn sync_scrolled(&self) {
        let changed = self.state.borrow_mut().on_scroll(dom::scroll_y());
        if let (true, Some(nav)) = (changed, &self.nav) {
            dom::set_class(nav, NAV_SCROLLED_CLASS, self.state.borrow().scrolled());
        }
    }

    fn toggle_menu(self: &Rc<Self>) {
        let open = self.state.borrow_mut().toggle_menu();
        if open {
            self.animate(PanelTween::open(), true);
        } else {
            let from = *self.style.borrow();
            self.animate(PanelTween::close(from), false);
        }
    }

    fn close_menu(self: &Rc<Self>) {
        if self.state.borrow_mut().close_menu() {
            let from = *self.style.borrow();
            self.animate(PanelTween::close(from), false);
        }
    }

    fn animate(self: &Rc<Self>, tween: PanelTween, open: bool) {
        let Some(panel) = &self.panel else { return };
        if let Some(t) = &self.toggle {
            _ = t.set_attribute("aria-expanded", if open { "true" } else { "false" });
        }
        if open {
            dom::set_class(panel, HIDDEN_CLASS, false);
            if let Some(o) = &self.overlay {
                dom::set_class(o, HIDDEN_CLASS, false);
            }
        }
        dom::set_class(panel, MENU_OPEN_CLASS, open);
        *self.tween.borrow_mut() = Some(tween);

        // restart so the new tween's clock latches on the next frame
        self.tick.cancel(&self.ticker);
        let me = Rc::downgrade(self);
        self.tick.ensure(&self.ticker, move |ts| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let Some(panel) = &me.panel else {
                return TickControl::Stop;
            };
            let (control, style) = match me.tween.borrow_mut().as_mut() {
                Some(t) => (t.tick(ts), t.current()),
                None => return TickControl::Stop,
            };
            *me.style.borrow_mut() = style;
            _ = panel.set_attribute("style", &style.css());
            if control == TickControl::Stop {
                me.tween.borrow_mut().take();
                if !me.state.borrow().menu_open() {
                    dom::set_class(panel, HIDDEN_CLASS, true);
                    if let Some(o) = &me.overlay {
                        dom::set_class(o, HIDDEN_CLASS, true);
                    }
                }
            }
            control
        });
    }
}

/// Header state and the mobile menu panel.
pub struct Nav {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

impl Nav {
    pub fn mount(ticker: &Ticker, document: &web::Document) -> anyhow::Result<Option<Self>> {
        let nav = document.get_element_by_id(NAV_ID);
        let toggle = document.get_element_by_id(MENU_TOGGLE_ID);
        let panel = document.get_element_by_id(MENU_PANEL_ID);
        let overlay = document.get_element_by_id(MENU_OVERLAY_ID);
        if nav.is_none() && toggle.is_none() {
            return Ok(None);
        }
        if let Some(p) = &panel {
            dom::set_class(p, HIDDEN_CLASS, true);
            _ = p.set_attribute("style", &PanelStyle::HIDDEN.css());
        }
        if let Some(t) = &toggle {
            _ = t.set_attribute("aria-expanded", "false");
        }
        if let Some(o) = &overlay {
            dom::set_class(o, HIDDEN_CLASS, true);
        }

        let shared = Rc::new(Shared {
            ticker: ticker.clone(),
            state: RefCell::new(NavState::default()),
            tween: RefCell::new(None),
            style: RefCell::new(PanelStyle::HIDDEN),
            nav,
            toggle: toggle.clone(),
            panel: panel.clone(),
            overlay: overlay.clone(),
            tick: OnDemandTick::new(),
        });
        shared.sync_scrolled();

        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut listeners = Vec::with_capacity(5);

        let s = shared.clone();
        listeners.push(Listener::passive(window.as_ref(), "scroll", move |_| {
            s.sync_scrolled();
        })?);

        if let Some(t) = &toggle {
            let s = shared.clone();
            listeners.push(Listener::new(t.as_ref(), "click", move |e| {
                e.prevent_default();
                s.toggle_menu();
            })?);
        }

        if let Some(p) = &panel {
            let s = shared.clone();
            listeners.push(Listener::passive(p.as_ref(), "click", move |e| {
                if dom::inside(e.target(), "a") {
                    s.close_menu();
                }
            })?);
        }

        if let Some(o) = &overlay {
            let s = shared.clone();
            let panel_selector = format!("#{}", MENU_PANEL_ID);
            listeners.push(Listener::passive(o.as_ref(), "click", move |e| {
                // clicks inside the panel bubble up here too
                if !dom::inside(e.target(), &panel_selector) {
                    s.close_menu();
                }
            })?);
        }

        let s = shared.clone();
        listeners.push(Listener::passive(document.as_ref(), "keydown", move |e| {
            let escape = e
                .dyn_ref::<web::KeyboardEvent>()
                .is_some_and(|k| k.key() == "Escape");
            if escape {
                s.close_menu();
            }
        })?);

        log::info!("[nav] mounted");
        Ok(Some(Self { shared, listeners }))
    }

    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.shared.tick.cancel(&self.shared.ticker);
    }
}

impl Drop for Nav {
    fn drop(&mut self) {
        self.teardown();
    }
}
