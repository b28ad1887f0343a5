use std::{cell::RefCell, rc::Rc};

use serde_json::json;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::{
    config::SECTION_REFERENCE_LINE,
    logging::LogLevel,
    sections::{header_is_scrolled, SectionBounds, SectionTracker},
};

use super::{
    dom::{describe_js_error, dispatch_section_changed, query_all, set_class, Listener},
    AppContext, Module,
};

pub struct SectionWatch {
    _listeners: Vec<Listener>,
}

impl SectionWatch {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let tracker = Rc::new(RefCell::new(SectionTracker::new(SECTION_REFERENCE_LINE)));

        let scroll_ctx = Rc::clone(ctx);
        let on_scroll = Listener::with_passive(&ctx.window, "scroll", true, move |_| {
            sync_scroll(&scroll_ctx, &tracker);
        })?;

        let resize_ctx = Rc::clone(ctx);
        let on_resize = Listener::with_passive(&ctx.window, "resize", true, move |_| {
            sync_device(&resize_ctx);
        })?;

        sync_device(ctx);

        Ok(Some(Self {
            _listeners: vec![on_scroll, on_resize],
        }))
    }
}

impl Module for SectionWatch {
    fn name(&self) -> &'static str {
        "scroll"
    }
}

fn sync_scroll(ctx: &AppContext, tracker: &RefCell<SectionTracker>) {
    let scroll_y = ctx.window.scroll_y().unwrap_or(0.0);
    if let Some(header) = ctx.document.get_element_by_id("header") {
        set_class(
            &header,
            "scrolled",
            header_is_scrolled(scroll_y, ctx.config.header_scroll_threshold),
        );
    }

    let sections = measure_sections(&ctx.document);
    let changed = tracker.borrow_mut().observe(&sections);
    let Some(section) = changed else {
        return;
    };

    ctx.log(LogLevel::Debug, "section_changed", json!({ "section": section }));
    if let Err(error) = dispatch_section_changed(&ctx.document, &section) {
        ctx.log(
            LogLevel::Warn,
            "signal_dispatch_failed",
            json!({ "signal": "sectionChange", "error": describe_js_error(&error) }),
        );
    }
}

fn sync_device(ctx: &AppContext) {
    if let Some(body) = ctx.document.body() {
        set_class(&body, "mobile-optimized", ctx.device().is_mobile());
    }
}

fn measure_sections(document: &Document) -> Vec<SectionBounds> {
    query_all(document, "section")
        .into_iter()
        .map(|section| {
            let rect = section.get_bounding_client_rect();
            SectionBounds::new(section.id(), rect.top(), rect.bottom())
        })
        .collect()
}
