use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use serde_json::json;
use url::Url;
use wasm_bindgen::JsValue;
use web_sys::{Element, Event};

use crate::{
    config::POPUP_FALLBACK_DELAY_MS,
    logging::LogLevel,
    notifier::ToastKind,
    whatsapp::{handle_click, raw_target, NavigationAttempt, CTA_SELECTOR},
};

use super::{
    dom::{query_all, Listener},
    AppContext, Module,
};

pub struct WhatsAppCta {
    fallbacks: Rc<RefCell<Vec<Timeout>>>,
    _listeners: Vec<Listener>,
}

impl WhatsAppCta {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let controls = query_all(&ctx.document, CTA_SELECTOR);
        if controls.is_empty() {
            return Ok(None);
        }

        let fallbacks = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Vec::with_capacity(controls.len());
        for control in controls {
            let click_ctx = Rc::clone(ctx);
            let pending = Rc::downgrade(&fallbacks);
            let source = control.clone();
            listeners.push(Listener::with_passive(&control, "click", false, move |event: Event| {
                let Some(raw) = control_target(&source) else {
                    return;
                };
                let page = click_ctx
                    .window
                    .location()
                    .href()
                    .ok()
                    .and_then(|href| Url::parse(&href).ok());

                let click = match handle_click(page.as_ref(), &raw, |target| open(&click_ctx, target)) {
                    Ok(click) => click,
                    Err(reason) => {
                        click_ctx.log(
                            LogLevel::Warn,
                            "whatsapp_target_rejected",
                            json!({ "target": raw, "reason": reason }),
                        );
                        return;
                    }
                };
                event.prevent_default();
                click_ctx
                    .notifier
                    .show(click.toast, ToastKind::Success, click_ctx.config.toast_duration_ms);

                if click.attempt == NavigationAttempt::SameContextFallback {
                    click_ctx.log(LogLevel::Warn, "popup_blocked", json!({ "target": click.target.as_str() }));
                    if let Some(pending) = pending.upgrade() {
                        let location = click_ctx.window.location();
                        let href = click.target.to_string();
                        pending.borrow_mut().push(Timeout::new(POPUP_FALLBACK_DELAY_MS, move || {
                            let _ = location.set_href(&href);
                        }));
                    }
                }
            })?);
        }

        Ok(Some(Self {
            fallbacks,
            _listeners: listeners,
        }))
    }
}

impl Module for WhatsAppCta {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    fn teardown(&mut self) {
        self.fallbacks.borrow_mut().clear();
    }
}

fn control_target(control: &Element) -> Option<String> {
    let href = control.get_attribute("href");
    let data_whatsapp = control.get_attribute("data-whatsapp");
    let data_href = control.get_attribute("data-href");
    raw_target(href.as_deref(), data_whatsapp.as_deref(), data_href.as_deref()).map(str::to_string)
}

fn open(ctx: &AppContext, target: &Url) -> bool {
    let opened = ctx
        .window
        .open_with_url_and_target(target.as_str(), "_blank")
        .ok()
        .flatten();

    if let Some(opened) = &opened {
        let _ = opened.set_opener(&JsValue::NULL);
    }

    opened.is_some()
}
