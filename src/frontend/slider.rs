use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, TouchEvent};

use crate::{
    config::SLIDER_START_DELAY_MS,
    slider::{SliderState, SliderStep},
};

use super::{
    dom::{query_html, FrameLoop, Listener},
    AppContext, Module,
};

struct Slider {
    element: HtmlElement,
    state: RefCell<SliderState>,
    frames: RefCell<Option<FrameLoop>>,
}

impl Slider {
    fn frame(&self) {
        let max_scroll = f64::from(self.element.scroll_width() - self.element.client_width());
        let step = self.state.borrow_mut().step(max_scroll);

        match step {
            SliderStep::Hold => {}
            SliderStep::Advance(amount) => self.element.set_scroll_left(amount as i32),
            SliderStep::WrapToStart => {
                let options = ScrollToOptions::new();
                options.set_left(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                self.element.scroll_to_with_scroll_to_options(&options);
            }
        }
    }

    fn pointer_x(&self, page_x: i32) -> f64 {
        f64::from(page_x - self.element.offset_left())
    }

    fn begin_drag(&self, page_x: i32) {
        let x = self.pointer_x(page_x);
        let scroll_left = f64::from(self.element.scroll_left());
        self.state.borrow_mut().begin_drag(x, scroll_left);
    }

    fn drag(&self, page_x: i32) -> bool {
        let target = self.state.borrow().drag_to(self.pointer_x(page_x));
        match target {
            Some(scroll_left) => {
                self.element.set_scroll_left(scroll_left as i32);
                true
            }
            None => false,
        }
    }
}

pub struct AutoSlider {
    slider: Rc<Slider>,
    start: Option<Timeout>,
    _listeners: Vec<Listener>,
}

impl AutoSlider {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let Some(element) = query_html(&ctx.document, ".projects-slider") else {
            return Ok(None);
        };
        if ctx.device().is_mobile() {
            return Ok(None);
        }

        let slider = Rc::new(Slider {
            element,
            state: RefCell::new(SliderState::default()),
            frames: RefCell::new(None),
        });
        let target = &slider.element;
        let mut listeners = Vec::new();

        for (event, paused) in [("mouseenter", true), ("mouseleave", false)] {
            let hovered = Rc::downgrade(&slider);
            listeners.push(Listener::new(target, event, move |_| {
                let Some(slider) = hovered.upgrade() else {
                    return;
                };
                let mut state = slider.state.borrow_mut();
                state.set_paused(paused);
                if !paused {
                    state.end_drag();
                }
            })?);
        }

        let pressed = Rc::downgrade(&slider);
        listeners.push(Listener::new(target, "mousedown", move |event: Event| {
            if let (Some(slider), Some(event)) = (pressed.upgrade(), event.dyn_ref::<MouseEvent>()) {
                slider.begin_drag(event.page_x());
            }
        })?);

        let moved = Rc::downgrade(&slider);
        listeners.push(Listener::new(target, "mousemove", move |event: Event| {
            let Some(slider) = moved.upgrade() else {
                return;
            };
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                if slider.drag(mouse.page_x()) {
                    event.prevent_default();
                }
            }
        })?);

        let touched = Rc::downgrade(&slider);
        listeners.push(Listener::with_passive(target, "touchstart", true, move |event: Event| {
            let Some(slider) = touched.upgrade() else {
                return;
            };
            if let Some(touch) = first_touch_x(&event) {
                slider.begin_drag(touch);
            }
        })?);

        let swiped = Rc::downgrade(&slider);
        listeners.push(Listener::with_passive(target, "touchmove", true, move |event: Event| {
            let Some(slider) = swiped.upgrade() else {
                return;
            };
            if let Some(touch) = first_touch_x(&event) {
                slider.drag(touch);
            }
        })?);

        for event in ["mouseup", "touchend"] {
            let released = Rc::downgrade(&slider);
            listeners.push(Listener::new(target, event, move |_| {
                if let Some(slider) = released.upgrade() {
                    slider.state.borrow_mut().end_drag();
                }
            })?);
        }

        let started = Rc::downgrade(&slider);
        let start = Timeout::new(SLIDER_START_DELAY_MS, move || {
            let Some(slider) = started.upgrade() else {
                return;
            };
            let stepped = Rc::downgrade(&slider);
            let frames = FrameLoop::start(move |_now| {
                if let Some(slider) = stepped.upgrade() {
                    slider.frame();
                }
            });
            *slider.frames.borrow_mut() = frames.ok();
        });

        Ok(Some(Self {
            slider,
            start: Some(start),
            _listeners: listeners,
        }))
    }
}

impl Module for AutoSlider {
    fn name(&self) -> &'static str {
        "slider"
    }

    fn teardown(&mut self) {
        self.start.take();
        self.slider.frames.borrow_mut().take();
    }
}

fn first_touch_x(event: &Event) -> Option<i32> {
    let touches = event.dyn_ref::<TouchEvent>()?.touches();
    touches.get(0).map(|touch| touch.page_x())
}
