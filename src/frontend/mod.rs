mod animations;
mod cursor;
mod dom;
mod navigation;
mod particles;
mod performance;
mod portfolio;
mod scroll;
mod slider;
mod toast;
mod typing;
mod video;
mod whatsapp;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, IdleRequestOptions, Window};

use crate::{
    config::{DeviceClass, ModuleKind, RuntimeConfig, CONFIG_ELEMENT_ID, IDLE_INIT_TIMEOUT_MS},
    logging::{log_event, LogLevel},
    performance::MotionPolicy,
};

use self::{
    dom::{describe_js_error, dispatch_signal, Listener, APP_READY_EVENT},
    particles::ParticleSlot,
    toast::Notifier,
};

pub trait Module {
    fn name(&self) -> &'static str;

    // Cancels timers and frames that point back into the module. Listeners
    // and observers are released on drop.
    fn teardown(&mut self) {}
}

pub struct AppContext {
    pub config: RuntimeConfig,
    pub window: Window,
    pub document: Document,
    pub notifier: Notifier,
    pub particles: ParticleSlot,
    pub motion: RefCell<MotionPolicy>,
}

impl AppContext {
    pub fn device(&self) -> DeviceClass {
        let (width, _) = viewport_size(&self.window);
        self.config.device_class(width)
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        log_event(&self.config, level, event, fields);
    }
}

enum IdleTask {
    Idle {
        id: u32,
        _callback: Closure<dyn FnMut(JsValue)>,
    },
    Timer {
        _timeout: Timeout,
    },
}

struct App {
    config: RuntimeConfig,
    window: Window,
    document: Document,
    context: RefCell<Option<Rc<AppContext>>>,
    modules: RefCell<Vec<Box<dyn Module>>>,
    idle: RefCell<Option<IdleTask>>,
    lifecycle: RefCell<Vec<Listener>>,
    started: Cell<bool>,
}

impl App {
    fn new(config: RuntimeConfig, window: Window, document: Document) -> Self {
        Self {
            config,
            window,
            document,
            context: RefCell::new(None),
            modules: RefCell::new(Vec::new()),
            idle: RefCell::new(None),
            lifecycle: RefCell::new(Vec::new()),
            started: Cell::new(false),
        }
    }

    fn start(self: &Rc<Self>) {
        if self.started.replace(true) {
            return;
        }

        if let Err(error) = self.setup() {
            log_event(
                &self.config,
                LogLevel::Error,
                "app_setup_failed",
                json!({ "error": describe_js_error(&error) }),
            );
        }
    }

    fn setup(self: &Rc<Self>) -> Result<(), JsValue> {
        let notifier = Notifier::mount(&self.document)?;
        let context = Rc::new(AppContext {
            config: self.config.clone(),
            window: self.window.clone(),
            document: self.document.clone(),
            notifier,
            particles: ParticleSlot::default(),
            motion: RefCell::new(MotionPolicy::default()),
        });
        *self.context.borrow_mut() = Some(Rc::clone(&context));

        let device = context.device();
        log_event(
            &self.config,
            LogLevel::Info,
            "app_bootstrap",
            json!({ "device": if device.is_mobile() { "mobile" } else { "desktop" } }),
        );

        let plan = device.install_plan();
        for kind in plan.immediate {
            self.install_kind(*kind, &context);
        }
        if plan.reduce_motion {
            performance::reduce_motion(&context, "mobile");
        }

        if plan.deferred.is_empty() {
            return self.ready(&context);
        }

        let app = Rc::clone(self);
        let deferred = Rc::clone(&context);
        let task = move || {
            for kind in plan.deferred {
                app.install_kind(*kind, &deferred);
            }

            if let Err(error) = app.ready(&deferred) {
                deferred.log(
                    LogLevel::Error,
                    "app_setup_failed",
                    json!({ "error": describe_js_error(&error) }),
                );
            }
        };

        let idle = defer_until_idle(&self.window, task)?;
        *self.idle.borrow_mut() = Some(idle);
        Ok(())
    }

    fn install_kind(&self, kind: ModuleKind, ctx: &Rc<AppContext>) {
        let name = kind.name();
        match kind {
            ModuleKind::Scroll => self.install(name, scroll::SectionWatch::install(ctx)),
            ModuleKind::Performance => self.install(name, performance::PerformanceMonitor::install(ctx)),
            ModuleKind::Navigation => self.install(name, navigation::Navigation::install(ctx)),
            ModuleKind::WhatsApp => self.install(name, whatsapp::WhatsAppCta::install(ctx)),
            ModuleKind::Portfolio => self.install(name, portfolio::Portfolio::install(ctx)),
            ModuleKind::Video => self.install(name, video::VideoManager::install(ctx)),
            ModuleKind::Particles => self.install(name, particles::ParticleLayer::install(ctx)),
            ModuleKind::Cursor => self.install(name, cursor::Cursor::install(ctx)),
            ModuleKind::Animations => self.install(name, animations::Animations::install(ctx)),
            ModuleKind::Typing => self.install(name, typing::TypingEffect::install(ctx)),
            ModuleKind::Slider => self.install(name, slider::AutoSlider::install(ctx)),
        }
    }

    fn install<M: Module + 'static>(&self, name: &'static str, result: Result<Option<M>, JsValue>) {
        match result {
            Ok(Some(module)) => {
                log_event(
                    &self.config,
                    LogLevel::Debug,
                    "module_installed",
                    json!({ "module": module.name() }),
                );
                self.modules.borrow_mut().push(Box::new(module));
            }
            Ok(None) => {
                log_event(
                    &self.config,
                    LogLevel::Debug,
                    "module_skipped",
                    json!({ "module": name }),
                );
            }
            Err(error) => {
                log_event(
                    &self.config,
                    LogLevel::Error,
                    "module_install_failed",
                    json!({ "module": name, "error": describe_js_error(&error) }),
                );
            }
        }
    }

    fn ready(&self, context: &AppContext) -> Result<(), JsValue> {
        self.idle.borrow_mut().take();
        let modules: Vec<&'static str> = self.modules.borrow().iter().map(|module| module.name()).collect();
        context.log(LogLevel::Info, "app_ready", json!({ "modules": modules }));
        dispatch_signal(&self.document, APP_READY_EVENT, None)
    }

    fn teardown(&self) {
        if let Some(IdleTask::Idle { id, .. }) = self.idle.borrow_mut().take() {
            self.window.cancel_idle_callback(id);
        }

        let mut modules = std::mem::take(&mut *self.modules.borrow_mut());
        for module in modules.iter_mut().rev() {
            module.teardown();
        }
        let count = modules.len();
        drop(modules);

        if let Some(context) = self.context.borrow_mut().take() {
            context.notifier.teardown();
            context.particles.clear();
        }

        log_event(&self.config, LogLevel::Debug, "app_teardown", json!({ "modules": count }));
    }
}

fn defer_until_idle(window: &Window, task: impl FnOnce() + 'static) -> Result<IdleTask, JsValue> {
    let supports_idle = Reflect::get(window, &JsValue::from_str("requestIdleCallback"))
        .map(|value| value.is_instance_of::<Function>())
        .unwrap_or(false);

    if !supports_idle {
        return Ok(IdleTask::Timer {
            _timeout: Timeout::new(0, task),
        });
    }

    let callback: Closure<dyn FnMut(JsValue)> = Closure::once(move |_deadline: JsValue| task());
    let options = IdleRequestOptions::new();
    options.set_timeout(IDLE_INIT_TIMEOUT_MS);
    let id = window.request_idle_callback_with_options(callback.as_ref().unchecked_ref(), &options)?;

    Ok(IdleTask::Idle {
        id,
        _callback: callback,
    })
}

fn read_config(document: &Document) -> RuntimeConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    RuntimeConfig::from_json(raw.as_deref())
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn run() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = read_config(&document);
    let app = Rc::new(App::new(config, window.clone(), document.clone()));

    let unload_app = Rc::clone(&app);
    match Listener::new(&window, "beforeunload", move |_| unload_app.teardown()) {
        Ok(listener) => app.lifecycle.borrow_mut().push(listener),
        Err(error) => log_event(
            &app.config,
            LogLevel::Warn,
            "lifecycle_listener_failed",
            json!({ "event": "beforeunload", "error": describe_js_error(&error) }),
        ),
    }

    if document.ready_state() != "loading" {
        app.start();
        return;
    }

    let ready_app = Rc::clone(&app);
    match Listener::new(&document, "DOMContentLoaded", move |_| ready_app.start()) {
        Ok(listener) => app.lifecycle.borrow_mut().push(listener),
        Err(error) => log_event(
            &app.config,
            LogLevel::Error,
            "app_setup_failed",
            json!({ "error": describe_js_error(&error) }),
        ),
    }
}
