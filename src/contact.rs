use folio_core::contact::{
    append_to_outbox, decode_draft, encode_draft, failure_message, ContactRecord,
};
use folio_core::{ContactConfig, ContactDraft, ContactError, ContactTransport, Notice};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::constants::{CONTACT_FORM_ID, CONTACT_REQUEST_MODE};
use crate::dom::{self, Listener};
use crate::overlay::Toast;

const FIELDS: [&str; 3] = ["name", "email", "message"];

fn js_err(e: JsValue) -> ContactError {
    ContactError::Network(format!("{:?}", e))
}

fn read_draft(form: &web::HtmlFormElement) -> ContactDraft {
    let Ok(data) = web::FormData::new_with_form(form) else {
        return ContactDraft::default();
    };
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();
    ContactDraft::new(field("name"), field("email"), field("message"))
}

fn write_field(form: &web::HtmlFormElement, name: &str, value: &str) {
    let Ok(Some(el)) = form.query_selector(&format!("[name='{}']", name)) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

fn set_busy(form: &web::HtmlFormElement, busy: bool) {
    _ = form.set_attribute("aria-busy", if busy { "true" } else { "false" });
    if let Ok(Some(btn)) = form.query_selector("[type='submit']") {
        _ = if busy {
            btn.set_attribute("disabled", "")
        } else {
            btn.remove_attribute("disabled")
        };
    }
}

async fn post(endpoint: &str, draft: &ContactDraft) -> Result<Option<ContactRecord>, ContactError> {
    let body = draft.to_request_body()?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(CONTACT_REQUEST_MODE);
    init.set_body(&JsValue::from_str(&body));
    let request = web::Request::new_with_str_and_init(endpoint, &init).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window = web::window().ok_or_else(|| ContactError::Network("no window".into()))?;
    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        log::error!("[contact] {} {}: {}", endpoint, response.status(), text);
        return Err(ContactError::Server(failure_message(&text)));
    }
    match serde_json::from_str::<ContactRecord>(&text) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            log::warn!("[contact] unexpected success body: {}", e);
            Ok(None)
        }
    }
}

fn save_local(storage_key: &str, draft: &ContactDraft) -> Result<(), ContactError> {
    let storage = dom::local_storage().ok_or(ContactError::StorageUnavailable)?;
    let stored = storage.get_item(storage_key).ok().flatten();
    let updated = append_to_outbox(stored.as_deref(), draft, js_sys::Date::now() as u64)?;
    storage
        .set_item(storage_key, &updated)
        .map_err(|_| ContactError::StorageUnavailable)
}

/// `#contact-form`: validation, submission and a saved draft.
pub struct ContactForm {
    alive: Rc<Cell<bool>>,
    listeners: Vec<Listener>,
}

impl ContactForm {
    pub fn mount(
        document: &web::Document,
        config: &ContactConfig,
        toast: Option<Rc<Toast>>,
    ) -> anyhow::Result<Option<Self>> {
        let Some(form) = document
            .get_element_by_id(CONTACT_FORM_ID)
            .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
        else {
            return Ok(None);
        };
        restore_draft(&form, &config.draft_key);

        let alive = Rc::new(Cell::new(true));
        let busy = Rc::new(Cell::new(false));
        let mut listeners = Vec::with_capacity(2);

        let draft_key = config.draft_key.clone();
        let f = form.clone();
        listeners.push(Listener::passive(form.as_ref(), "input", move |_| {
            let Some(storage) = dom::local_storage() else { return };
            let draft = read_draft(&f);
            _ = if draft.is_empty() {
                storage.remove_item(&draft_key)
            } else {
                storage.set_item(&draft_key, &encode_draft(&draft))
            };
        })?);

        let transport = config.transport.clone();
        let draft_key = config.draft_key.clone();
        let f = form.clone();
        let a = alive.clone();
        listeners.push(Listener::new(form.as_ref(), "submit", move |e| {
            e.prevent_default();
            let notify = {
                let toast = toast.clone();
                let alive = a.clone();
                move |notice: Notice| {
                    if !alive.get() {
                        return;
                    }
                    match &toast {
                        Some(t) => t.notify(&notice),
                        None => log::info!("[contact] {}: {}", notice.title, notice.description),
                    }
                }
            };
            if busy.get() {
                return;
            }
            let draft = read_draft(&f);
            if let Err(err) = draft.validate() {
                notify(Notice::from_error(&err));
                return;
            }

            busy.set(true);
            set_busy(&f, true);
            let transport = transport.clone();
            let draft_key = draft_key.clone();
            let form = f.clone();
            let busy = busy.clone();
            let alive = a.clone();
            spawn_local(async move {
                let result = match &transport {
                    ContactTransport::Http { endpoint } => post(endpoint, &draft).await.map(|record| {
                        if let Some(r) = record {
                            log::info!("[contact] stored as {}", r.id);
                        }
                    }),
                    ContactTransport::Local { storage_key } => save_local(storage_key, &draft),
                };
                busy.set(false);
                if !alive.get() {
                    return;
                }
                set_busy(&form, false);
                match result {
                    Ok(()) => {
                        form.reset();
                        if let Some(storage) = dom::local_storage() {
                            _ = storage.remove_item(&draft_key);
                        }
                        notify(Notice::sent());
                    }
                    Err(err) => {
                        log::error!("[contact] submission failed: {}", err);
                        notify(Notice::from_error(&err));
                    }
                }
            });
        })?);

        log::info!("[contact] mounted");
        Ok(Some(Self { alive, listeners }))
    }

    pub fn teardown(&mut self) {
        self.alive.set(false);
        self.listeners.clear();
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn restore_draft(form: &web::HtmlFormElement, key: &str) {
    let Some(storage) = dom::local_storage() else { return };
    let Some(raw) = storage.get_item(key).ok().flatten() else {
        return;
    };
    match decode_draft(&raw) {
        Ok(draft) => {
            let values = [&draft.name, &draft.email, &draft.message];
            for (name, value) in FIELDS.iter().zip(values) {
                write_field(form, name, value);
            }
            log::debug!("[contact] restored draft");
        }
        Err(e) => {
            log::warn!("[contact] discarding draft: {}", e);
            _ = storage.remove_item(key);
        }
    }
}
