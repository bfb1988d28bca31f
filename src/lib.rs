#![cfg(target_arch = "wasm32")]
use folio_core::SiteConfig;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod contact;
mod cursor;
mod dom;
mod effects;
mod frame;
mod markup;
mod nav;
mod overlay;
mod reveal;
mod scroller;
mod site;
mod typewriter;

use site::Site;

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn read_config(document: &web::Document) -> SiteConfig {
    let raw = document
        .get_element_by_id(constants::CONFIG_ID)
        .and_then(|el| el.text_content());
    SiteConfig::load_or_default(raw.as_deref())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mounted = SITE.with(|s| s.borrow().is_some());
    if mounted {
        log::debug!("already mounted");
        return Ok(());
    }
    let config = read_config(&document);
    let site = Site::mount(&document, &config);
    SITE.with(|s| *s.borrow_mut() = Some(site));
    Ok(())
}

/// Mount again after [`unmount`]. No-op while mounted.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    init().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tear everything down. Safe to call repeatedly.
#[wasm_bindgen]
pub fn unmount() {
    let site = SITE.with(|s| s.borrow_mut().take());
    if let Some(mut site) = site {
        site.teardown();
    }
}

/// Live listeners, observers, timers and ticker subscriptions.
#[wasm_bindgen]
pub fn active_resources() -> u32 {
    SITE.with(|s| match s.borrow().as_ref() {
        Some(site) => site.active_resources(),
        None => dom::live_resources(),
    }) as u32
}
