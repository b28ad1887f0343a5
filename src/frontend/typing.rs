use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::{
    config::{TYPING_PAUSED_POLL_MS, TYPING_START_DELAY_MS},
    typing::{TypingAnimator, TypingTimings},
};

use super::{
    dom::{query_html, set_style, Observer},
    AppContext, Module,
};

const CURSOR_VISIBLE: &str = "3px solid var(--accent)";
const CURSOR_HIDDEN: &str = "3px solid transparent";

struct TypingDriver {
    element: HtmlElement,
    animator: RefCell<TypingAnimator>,
    timer: RefCell<Option<Timeout>>,
}

impl TypingDriver {
    fn schedule(self: &Rc<Self>, delay_ms: u32) {
        let driver = Rc::downgrade(self);
        let timer = Timeout::new(delay_ms, move || tick(&driver));
        *self.timer.borrow_mut() = Some(timer);
    }

    fn paint_cursor(&self, visible: bool) {
        set_style(
            &self.element,
            "border-right",
            if visible { CURSOR_VISIBLE } else { CURSOR_HIDDEN },
        );
    }
}

fn tick(driver: &Weak<TypingDriver>) {
    let Some(driver) = driver.upgrade() else {
        return;
    };

    let frame = driver.animator.borrow_mut().tick();
    let Some(frame) = frame else {
        driver.schedule(TYPING_PAUSED_POLL_MS);
        return;
    };

    driver.element.set_text_content(Some(&frame.text));
    driver.paint_cursor(frame.cursor_visible);
    driver.schedule(frame.next_delay_ms);
}

pub struct TypingEffect {
    driver: Rc<TypingDriver>,
    _visibility: Observer,
}

impl TypingEffect {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let Some(element) = query_html(&ctx.document, ".typing-text") else {
            return Ok(None);
        };

        let animator = TypingAnimator::new(
            ctx.config.typing_texts.clone(),
            TypingTimings::from_config(&ctx.config),
        );
        if animator.is_empty() {
            return Ok(None);
        }

        let driver = Rc::new(TypingDriver {
            element: element.clone(),
            animator: RefCell::new(animator),
            timer: RefCell::new(None),
        });

        let watched = Rc::downgrade(&driver);
        let visibility = Observer::new(None, move |entry, _| {
            let Some(driver) = watched.upgrade() else {
                return;
            };
            let visible = entry.is_intersecting();
            let mut animator = driver.animator.borrow_mut();
            animator.set_paused(!visible);
            if visible && animator.cursor() == 0 {
                driver.paint_cursor(animator.cursor_visible());
            }
        })?;
        visibility.observe(&element);

        driver.schedule(TYPING_START_DELAY_MS);

        Ok(Some(Self {
            driver,
            _visibility: visibility,
        }))
    }
}

impl Module for TypingEffect {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn teardown(&mut self) {
        self.driver.timer.borrow_mut().take();
    }
}
