use std::{cell::RefCell, rc::Rc};

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::{HtmlScriptElement, Window};

use crate::{
    logging::LogLevel,
    particles::{
        density_for, ParticlesParams, PARTICLES_CONTAINER_ID, PARTICLES_SCRIPT_URL,
        REDUCED_PARTICLE_SPEED,
    },
};

use super::{
    dom::{describe_js_error, Listener},
    AppContext, Module,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = particlesJS)]
    fn particles_js(tag_id: &str, params: &JsValue) -> Result<(), JsValue>;
}

pub struct ParticlesHandle {
    pjs: JsValue,
}

impl ParticlesHandle {
    fn capture(window: &Window) -> Option<Self> {
        let dom = Reflect::get(window, &JsValue::from_str("pJSDom")).ok()?;
        let instances = dom.dyn_into::<Array>().ok()?;
        let last = instances.length().checked_sub(1)?;
        let pjs = Reflect::get(&instances.get(last), &JsValue::from_str("pJS")).ok()?;
        (!pjs.is_undefined() && !pjs.is_null()).then_some(Self { pjs })
    }

    fn set_density(&self, count: u32) -> Result<(), JsValue> {
        set_path(&self.pjs, &["particles", "number", "value"], &JsValue::from(count))?;
        self.refresh()
    }

    fn reduce_motion(&self) -> Result<(), JsValue> {
        set_path(
            &self.pjs,
            &["particles", "move", "speed"],
            &JsValue::from_f64(REDUCED_PARTICLE_SPEED),
        )?;
        set_path(
            &self.pjs,
            &["particles", "line_linked", "enable"],
            &JsValue::FALSE,
        )?;
        self.refresh()
    }

    fn refresh(&self) -> Result<(), JsValue> {
        let functions = Reflect::get(&self.pjs, &JsValue::from_str("fn"))?;
        let refresh = Reflect::get(&functions, &JsValue::from_str("particlesRefresh"))?;
        if let Some(refresh) = refresh.dyn_ref::<Function>() {
            refresh.call0(&functions)?;
        }
        Ok(())
    }
}

fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> Result<(), JsValue> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut target = root.clone();
    for key in parents {
        target = Reflect::get(&target, &JsValue::from_str(key))?;
    }
    Reflect::set(&target, &JsValue::from_str(last), value)?;
    Ok(())
}

#[derive(Clone, Default)]
pub struct ParticleSlot {
    handle: Rc<RefCell<Option<ParticlesHandle>>>,
}

impl ParticleSlot {
    fn set(&self, handle: Option<ParticlesHandle>) {
        *self.handle.borrow_mut() = handle;
    }

    pub fn clear(&self) {
        self.handle.borrow_mut().take();
    }

    pub fn reduce_motion(&self) -> Result<(), JsValue> {
        match self.handle.borrow().as_ref() {
            Some(handle) => handle.reduce_motion(),
            None => Ok(()),
        }
    }

    fn set_density(&self, count: u32) -> Result<(), JsValue> {
        match self.handle.borrow().as_ref() {
            Some(handle) => handle.set_density(count),
            None => Ok(()),
        }
    }
}

pub struct ParticleLayer {
    listeners: Vec<Listener>,
}

impl ParticleLayer {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        if ctx.document.get_element_by_id(PARTICLES_CONTAINER_ID).is_none() {
            return Ok(None);
        }

        let mut listeners = Vec::new();
        if library_loaded(&ctx.window) {
            start(ctx)?;
        } else {
            listeners.push(load_library(ctx)?);
        }

        let resize_ctx = Rc::clone(ctx);
        listeners.push(Listener::with_passive(&ctx.window, "resize", true, move |_| {
            let count = density_for(&resize_ctx.config, resize_ctx.device());
            if let Err(error) = resize_ctx.particles.set_density(count) {
                resize_ctx.log(
                    LogLevel::Warn,
                    "particles_update_failed",
                    json!({ "error": describe_js_error(&error) }),
                );
            }
        })?);

        Ok(Some(Self { listeners }))
    }
}

impl Module for ParticleLayer {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn teardown(&mut self) {
        self.listeners.clear();
    }
}

fn library_loaded(window: &Window) -> bool {
    Reflect::get(window, &JsValue::from_str("particlesJS"))
        .map(|value| value.is_instance_of::<Function>())
        .unwrap_or(false)
}

fn load_library(ctx: &Rc<AppContext>) -> Result<Listener, JsValue> {
    ctx.log(
        LogLevel::Info,
        "particles_library_loading",
        json!({ "src": PARTICLES_SCRIPT_URL }),
    );

    let script = ctx
        .document
        .create_element("script")?
        .dyn_into::<HtmlScriptElement>()?;
    script.set_src(PARTICLES_SCRIPT_URL);
    script.set_async(true);

    let loaded_ctx = Rc::clone(ctx);
    let listener = Listener::new(&script, "load", move |_| {
        if let Err(error) = start(&loaded_ctx) {
            loaded_ctx.log(
                LogLevel::Error,
                "module_install_failed",
                json!({ "module": "particles", "error": describe_js_error(&error) }),
            );
        }
    })?;

    let head = ctx
        .document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    head.append_child(&script)?;
    Ok(listener)
}

fn start(ctx: &AppContext) -> Result<(), JsValue> {
    let mut params = ParticlesParams::for_device(&ctx.config, ctx.device());
    if ctx.motion.borrow().is_reduced() {
        params.particles.motion.speed = REDUCED_PARTICLE_SPEED;
        params.particles.line_linked.enable = false;
    }

    let params = params.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    particles_js(PARTICLES_CONTAINER_ID, &params)?;
    ctx.particles.set(ParticlesHandle::capture(&ctx.window));
    Ok(())
}
