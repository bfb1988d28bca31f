use folio_core::{
    ObserveMode, OnDemandTick, TickControl, Ticker, Trigger, Typewriter, TypewriterConfig,
    TypewriterPhase,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

use crate::constants::{ATTR_DELAY, ATTR_DURATION, ATTR_TEXT, ATTR_TRIGGER, TYPEWRITER_SELECTOR};
use crate::dom;
use crate::markup;
use crate::reveal::Observer;

struct Instance {
    el: web::Element,
    model: RefCell<Typewriter>,
    shown: Cell<usize>,
    tick: OnDemandTick,
}

impl Instance {
    fn run(self: &Rc<Self>, ticker: &Ticker) {
        let me = Rc::downgrade(self);
        self.tick.ensure(ticker, move |ts| {
            let Some(me) = me.upgrade() else {
                return TickControl::Stop;
            };
            let (control, count) = {
                let mut m = me.model.borrow_mut();
                (m.tick(ts), m.visible_count())
            };
            if count != me.shown.replace(count) {
                me.el.set_text_content(Some(me.model.borrow().visible_text()));
            }
            control
        });
    }
}

/// `[data-typewriter]` elements. The full text is moved to `aria-label`
/// so assistive tech never reads a partial string.
pub struct Typewriters {
    ticker: Ticker,
    instances: Vec<Rc<Instance>>,
    observer: Option<Observer>,
}

impl Typewriters {
    pub fn mount(ticker: &Ticker, document: &web::Document, config: &TypewriterConfig, reduced_motion: bool) -> anyhow::Result<Self> {
        let mut instances = Vec::new();
        let mut deferred = Vec::new();

        for el in dom::query_all(document, TYPEWRITER_SELECTOR) {
            let (text, store) = markup::typewriter_source(
                el.get_attribute(ATTR_TEXT).as_deref(),
                el.text_content().as_deref(),
            );
            if store {
                _ = el.set_attribute(ATTR_TEXT, &text);
            }
            let opts = markup::typewriter_options(
                el.get_attribute(ATTR_DURATION).as_deref(),
                el.get_attribute(ATTR_DELAY).as_deref(),
                el.get_attribute(ATTR_TRIGGER).as_deref(),
                config,
            );
            _ = el.set_attribute("aria-label", &text);
            if reduced_motion {
                el.set_text_content(Some(&text));
                continue;
            }
            el.set_text_content(Some(""));
            let inst = Rc::new(Instance {
                el,
                model: RefCell::new(Typewriter::new(text, opts.duration_ms, opts.start_delay_ms, opts.trigger)),
                shown: Cell::new(0),
                tick: OnDemandTick::new(),
            });
            match opts.trigger {
                Trigger::Immediate => inst.run(ticker),
                Trigger::OnVisible => deferred.push(inst.clone()),
            }
            instances.push(inst);
        }

        let observer = if deferred.is_empty() {
            None
        } else {
            let waiting = deferred.clone();
            let t = ticker.clone();
            let obs = Observer::new(0.0, ObserveMode::Once, move |el, _| {
                if let Some(inst) = waiting.iter().find(|i| &i.el == el) {
                    inst.model.borrow_mut().trigger();
                    inst.run(&t);
                }
            })?;
            for inst in &deferred {
                obs.observe(&inst.el);
            }
            Some(obs)
        };

        log::info!(
            "[typewriter] {} elements ({} on view)",
            instances.len(),
            deferred.len()
        );
        Ok(Self {
            ticker: ticker.clone(),
            instances,
            observer,
        })
    }

    fn finished(&self) -> usize {
        self.instances
            .iter()
            .filter(|i| i.model.borrow().phase() == TypewriterPhase::Done)
            .count()
    }

    /// Stop all ticking and put the full text back.
    pub fn teardown(&mut self) {
        if let Some(mut o) = self.observer.take() {
            o.disconnect();
        }
        if !self.instances.is_empty() {
            log::debug!(
                "[typewriter] teardown, {}/{} finished",
                self.finished(),
                self.instances.len()
            );
        }
        for inst in self.instances.drain(..) {
            inst.tick.cancel(&self.ticker);
            inst.el.set_text_content(Some(inst.model.borrow().text()));
        }
    }
}

impl Drop for Typewriters {
    fn drop(&mut self) {
        self.teardown();
    }
}
