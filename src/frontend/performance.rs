use std::{cell::RefCell, rc::Rc};

use serde_json::json;
use wasm_bindgen::JsValue;

use crate::{
    logging::LogLevel,
    performance::{FpsSampler, REDUCED_MOTION_STYLES},
};

use super::{
    dom::{describe_js_error, query_all, FrameLoop},
    prefers_reduced_motion, AppContext, Module,
};

pub struct PerformanceMonitor {
    frames: Option<FrameLoop>,
}

impl PerformanceMonitor {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        inject_styles(ctx)?;
        hint_images(ctx);

        if prefers_reduced_motion(&ctx.window) {
            reduce_motion(ctx, "user_preference");
        }

        let started = ctx
            .window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or(0.0);
        let sampler = RefCell::new(FpsSampler::new(started));
        let watched = Rc::downgrade(ctx);
        let frames = FrameLoop::start_while(move |now| {
            let Some(ctx) = watched.upgrade() else {
                return false;
            };
            if !ctx.motion.borrow().keeps_sampling() {
                return false;
            }

            let Some(fps) = sampler.borrow_mut().record_frame(now) else {
                return true;
            };
            let degraded = ctx.motion.borrow_mut().observe_fps(fps);
            if degraded {
                apply_reduced_motion(&ctx, "low_fps", Some(fps));
            }
            let keeps_sampling = ctx.motion.borrow().keeps_sampling();
            keeps_sampling
        })?;

        Ok(Some(Self {
            frames: Some(frames),
        }))
    }
}

impl Module for PerformanceMonitor {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn teardown(&mut self) {
        self.frames.take();
    }
}

pub fn reduce_motion(ctx: &AppContext, reason: &str) {
    let changed = ctx.motion.borrow_mut().reduce();
    if changed {
        apply_reduced_motion(ctx, reason, None);
    }
}

fn apply_reduced_motion(ctx: &AppContext, reason: &str, fps: Option<u32>) {
    if let Some(body) = ctx.document.body() {
        let _ = body.class_list().add_1("reduced-motion");
    }

    if let Err(error) = ctx.particles.reduce_motion() {
        ctx.log(
            LogLevel::Warn,
            "particles_update_failed",
            json!({ "error": describe_js_error(&error) }),
        );
    }

    ctx.log(
        LogLevel::Info,
        "reduced_motion_applied",
        json!({ "reason": reason, "fps": fps }),
    );
}

fn inject_styles(ctx: &AppContext) -> Result<(), JsValue> {
    let Some(head) = ctx.document.head() else {
        return Ok(());
    };

    let style = ctx.document.create_element("style")?;
    style.set_text_content(Some(REDUCED_MOTION_STYLES));
    head.append_child(&style)?;
    Ok(())
}

fn hint_images(ctx: &AppContext) {
    for image in query_all(&ctx.document, "img") {
        if !image.has_attribute("loading") {
            let _ = image.set_attribute("loading", "lazy");
        }
        if !image.has_attribute("decoding") {
            let _ = image.set_attribute("decoding", "async");
        }
    }
}
