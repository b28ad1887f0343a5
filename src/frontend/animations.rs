use std::rc::Rc;

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use crate::animations::{AosOptions, RevealKind, DECORATIONS};

use super::{
    dom::{query_all, query_all_html, set_style, Observer},
    AppContext, Module,
};

const REVEAL_THRESHOLD: f64 = 0.1;

pub struct Animations {
    _reveal: Option<Observer>,
}

impl Animations {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        init_reveal_library(&ctx.window, ctx.device().is_mobile())?;

        for (selector, class) in DECORATIONS {
            for element in query_all(&ctx.document, selector) {
                element.class_list().add_1(class)?;
            }
        }

        let targets = query_all_html(&ctx.document, "[data-animate]");
        if targets.is_empty() {
            return Ok(Some(Self { _reveal: None }));
        }

        let reveal = Observer::new(Some(REVEAL_THRESHOLD), |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }
            let target = entry.target();
            if let Some(element) = target.dyn_ref::<HtmlElement>() {
                let kind = RevealKind::from_attr(element.get_attribute("data-animate").as_deref());
                set_style(element, "opacity", "1");
                set_style(element, "transform", kind.revealed_transform());
            }
            observer.unobserve(&target);
        })?;
        for target in &targets {
            reveal.observe(target);
        }

        Ok(Some(Self {
            _reveal: Some(reveal),
        }))
    }
}

impl Module for Animations {
    fn name(&self) -> &'static str {
        "animations"
    }
}

fn init_reveal_library(window: &Window, narrow_viewport: bool) -> Result<(), JsValue> {
    let aos = Reflect::get(window, &JsValue::from_str("AOS"))?;
    if aos.is_undefined() || aos.is_null() {
        return Ok(());
    }

    let init = Reflect::get(&aos, &JsValue::from_str("init"))?;
    let Some(init) = init.dyn_ref::<Function>() else {
        return Ok(());
    };

    let options = AosOptions::new(narrow_viewport)
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    init.call1(&aos, &options)?;
    Ok(())
}
