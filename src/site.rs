use folio_core::{SiteConfig, Ticker};
use std::rc::Rc;
use web_sys as web;

use crate::constants::REDUCED_MOTION_QUERY;
use crate::contact::ContactForm;
use crate::cursor::Cursor;
use crate::dom;
use crate::effects::{Parallax, TiltCards};
use crate::frame::RafDriver;
use crate::nav::Nav;
use crate::overlay::Toast;
use crate::reveal::Reveal;
use crate::scroller::SmoothScroll;
use crate::typewriter::Typewriters;

// A component that fails to mount is skipped; the rest of the page still works.
fn optional<T>(name: &str, result: anyhow::Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log::warn!("[site] {} not mounted: {:?}", name, e);
        None
    })
}

/// Every mounted component plus the shared frame clock.
pub struct Site {
    ticker: Ticker,
    driver: Option<Rc<RafDriver>>,
    scroll: Option<SmoothScroll>,
    cursor: Option<Cursor>,
    reveal: Option<Reveal>,
    typewriters: Option<Typewriters>,
    tilt: Option<TiltCards>,
    parallax: Option<Parallax>,
    nav: Option<Nav>,
    toast: Option<Rc<Toast>>,
    contact: Option<ContactForm>,
}

impl Site {
    pub fn mount(document: &web::Document, config: &SiteConfig) -> Self {
        let ticker = Ticker::new();
        let driver = RafDriver::install(&ticker);
        let reduced = config.respect_reduced_motion && dom::media_matches(REDUCED_MOTION_QUERY);
        if reduced {
            log::info!("[site] reduced motion: smooth scroll, cursor and parallax off");
        }

        let scroll = if reduced {
            None
        } else {
            optional("scroll", SmoothScroll::mount(&ticker, document, config.scroll.clone()).map(Some))
        };
        let cursor = if reduced {
            None
        } else {
            optional("cursor", Cursor::mount(&ticker, document, &config.cursor))
        };
        let parallax = if reduced {
            None
        } else {
            optional("parallax", Parallax::mount(&ticker, document))
        };
        let reveal = optional("reveal", Reveal::mount(document, &config.reveal).map(Some));
        let typewriters = optional(
            "typewriter",
            Typewriters::mount(&ticker, document, &config.typewriter, reduced).map(Some),
        );
        let tilt = optional("tilt", TiltCards::mount(document).map(Some));
        let nav = optional("nav", Nav::mount(&ticker, document));
        let toast = optional("toast", Toast::mount(document, config.contact.toast_ms));
        let contact = optional(
            "contact",
            ContactForm::mount(document, &config.contact, toast.clone()),
        );

        Self {
            ticker,
            driver: Some(driver),
            scroll,
            cursor,
            reveal,
            typewriters,
            tilt,
            parallax,
            nav,
            toast,
            contact,
        }
    }

    /// Remove every listener, observer, timer and frame callback. Safe to
    /// call more than once.
    pub fn teardown(&mut self) {
        let Some(driver) = self.driver.take() else {
            return;
        };
        if let Some(mut c) = self.contact.take() {
            c.teardown();
        }
        if let Some(t) = self.toast.take() {
            t.teardown();
        }
        if let Some(mut n) = self.nav.take() {
            n.teardown();
        }
        if let Some(mut p) = self.parallax.take() {
            p.teardown();
        }
        if let Some(mut t) = self.tilt.take() {
            t.teardown();
        }
        if let Some(mut t) = self.typewriters.take() {
            t.teardown();
        }
        if let Some(mut r) = self.reveal.take() {
            r.teardown();
        }
        if let Some(mut c) = self.cursor.take() {
            c.teardown();
        }
        if let Some(mut s) = self.scroll.take() {
            s.destroy();
        }
        self.ticker.stop_all();
        driver.shutdown(&self.ticker);
        log::info!("[site] unmounted, {} resources left", self.active_resources());
    }

    pub fn active_resources(&self) -> usize {
        dom::live_resources() + self.ticker.active_count()
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.teardown();
    }
}
