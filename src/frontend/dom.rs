use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use js_sys::Array;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, CustomEvent, CustomEventInit, Document, Element, Event,
    EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

pub const SECTION_CHANGED_EVENT: &str = "sectionChange";
pub const APP_READY_EVENT: &str = "appReady";

#[derive(Serialize, Deserialize)]
pub struct SectionSignal {
    pub section: String,
}

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    pub fn with_passive(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;

        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

// Self-rescheduling `requestAnimationFrame` loop. Dropping it cancels the
// pending frame and releases the callback.
pub struct FrameLoop {
    frame: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameLoop {
    pub fn start(mut step: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        Self::start_while(move |now| {
            step(now);
            true
        })
    }

    // Stops requesting frames once `step` returns false.
    pub fn start_while(mut step: impl FnMut(f64) -> bool + 'static) -> Result<Self, JsValue> {
        let frame = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let next_frame = Rc::clone(&frame);
        let next_callback = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::new(move |now: f64| {
            next_frame.set(None);
            if !step(now) {
                return;
            }

            let Some(callback) = next_callback.upgrade() else {
                return;
            };
            let callback = callback.borrow();
            if let Some(callback) = callback.as_ref() {
                next_frame.set(request_frame(callback).ok());
            }
        }));

        let first = {
            let callback = callback.borrow();
            match callback.as_ref() {
                Some(callback) => request_frame(callback)?,
                None => return Err(JsValue::from_str("frame callback missing")),
            }
        };
        frame.set(Some(first));

        Ok(Self { frame, callback })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame.take() {
            cancel_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

pub fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

pub fn cancel_frame(id: i32) {
    if let Some(win) = window() {
        let _ = win.cancel_animation_frame(id);
    }
}

pub fn next_frame(task: impl FnOnce() + 'static) {
    let Some(win) = window() else {
        return;
    };
    let callback = Closure::once_into_js(move |_now: f64| task());
    let _ = win.request_animation_frame(callback.unchecked_ref());
}

pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new(
        threshold: Option<f64>,
        mut on_entry: impl FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_entry(entry, &observer);
                    }
                }
            },
        );

        let observer = match threshold {
            Some(threshold) => {
                let options = IntersectionObserverInit::new();
                options.set_threshold(&JsValue::from_f64(threshold));
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
        };

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

pub fn dispatch_signal(document: &Document, name: &str, detail: Option<JsValue>) -> Result<(), JsValue> {
    let init = CustomEventInit::new();
    if let Some(detail) = detail {
        init.set_detail(&detail);
    }

    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    document.dispatch_event(&event)?;
    Ok(())
}

pub fn dispatch_section_changed(document: &Document, section: &str) -> Result<(), JsValue> {
    let detail = serde_wasm_bindgen::to_value(&SectionSignal {
        section: section.to_string(),
    })?;
    dispatch_signal(document, SECTION_CHANGED_EVENT, Some(detail))
}

pub fn read_section_signal(event: &Event) -> Option<String> {
    let event = event.dyn_ref::<CustomEvent>()?;
    serde_wasm_bindgen::from_value::<SectionSignal>(event.detail())
        .ok()
        .map(|signal| signal.section)
}

pub fn describe_js_error(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }

    error
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .unwrap_or_else(|| format!("{error:?}"))
}
