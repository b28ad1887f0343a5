use std::{cell::Cell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::cursor::{
    scale_transform, CursorVariant, PointerState, CURSOR_HOVER_SCALE, FOLLOWER_HOVER_BORDER,
    FOLLOWER_REST_BORDER, INTERACTIVE_SELECTOR, VISIBILITY_EVENTS,
};

use super::{
    dom::{cancel_frame, query_all, query_html, request_frame, set_style, Listener},
    AppContext, Module,
};

struct Follower {
    element: HtmlElement,
    position: Rc<Cell<(f64, f64)>>,
    frame: Rc<Cell<Option<i32>>>,
    callback: Closure<dyn FnMut(f64)>,
}

impl Follower {
    fn new(element: HtmlElement) -> Self {
        let position = Rc::new(Cell::new((0.0, 0.0)));
        let frame = Rc::new(Cell::new(None));

        let painted = element.clone();
        let target = Rc::clone(&position);
        let pending = Rc::clone(&frame);
        let callback = Closure::<dyn FnMut(f64)>::new(move |_now: f64| {
            pending.set(None);
            let (x, y) = target.get();
            place(&painted, x, y);
        });

        Self {
            element,
            position,
            frame,
            callback,
        }
    }

    fn follow(&self, x: f64, y: f64) {
        self.position.set((x, y));
        if let Some(id) = self.frame.take() {
            cancel_frame(id);
        }
        self.frame.set(request_frame(&self.callback).ok());
    }

    fn cancel(&self) {
        if let Some(id) = self.frame.take() {
            cancel_frame(id);
        }
    }
}

pub struct Cursor {
    follower: Option<Rc<Follower>>,
    _listeners: Vec<Listener>,
}

impl Cursor {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let cursor = query_html(&ctx.document, ".custom-cursor");
        let follower_element = query_html(&ctx.document, ".cursor-follower");
        if cursor.is_none() && follower_element.is_none() {
            return Ok(None);
        }

        let parts: Rc<Vec<HtmlElement>> =
            Rc::new(cursor.iter().chain(follower_element.iter()).cloned().collect());
        if ctx.device().is_mobile() {
            for part in parts.iter() {
                set_style(part, "display", "none");
            }
            return Ok(None);
        }

        let follower = follower_element.map(|element| Rc::new(Follower::new(element)));
        let pointer = Rc::new(Cell::new(PointerState::default()));
        let mut listeners = Vec::new();

        let moved_pointer = Rc::clone(&pointer);
        let moved_cursor = cursor.clone();
        let moved_follower = follower.clone();
        listeners.push(Listener::with_passive(&ctx.document, "mousemove", true, move |event: Event| {
            if moved_pointer.get().is_hidden() {
                return;
            }
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
            if let Some(cursor) = &moved_cursor {
                place(cursor, x, y);
            }
            if let Some(follower) = &moved_follower {
                follower.follow(x, y);
            }
        })?);

        for event in VISIBILITY_EVENTS {
            let parts = Rc::clone(&parts);
            let pointer = Rc::clone(&pointer);
            listeners.push(Listener::with_passive(&ctx.document, event, true, move |_| {
                let mut state = pointer.get();
                let Some(opacity) = state.on_event(event) else {
                    return;
                };
                pointer.set(state);
                for part in parts.iter() {
                    set_style(part, "opacity", opacity);
                }
            })?);
        }

        for element in query_all(&ctx.document, INTERACTIVE_SELECTOR) {
            element.set_attribute("data-cursor-interactive", "true")?;
            let variant = CursorVariant::from_attr(element.get_attribute("data-cursor").as_deref());
            let style = variant.follower_style();
            let follower_part = follower.as_ref().map(|follower| follower.element.clone());

            let enter_pointer = Rc::clone(&pointer);
            let enter_cursor = cursor.clone();
            let enter_follower = follower_part.clone();
            listeners.push(Listener::new(&element, "mouseenter", move |_| {
                if enter_pointer.get().is_hidden() {
                    return;
                }
                if let Some(cursor) = &enter_cursor {
                    set_style(cursor, "transform", &scale_transform(CURSOR_HOVER_SCALE));
                }
                if let Some(follower) = &enter_follower {
                    set_style(follower, "transform", &scale_transform(style.scale));
                    set_style(follower, "border-color", FOLLOWER_HOVER_BORDER);
                    set_style(follower, "opacity", &style.opacity.to_string());
                }
            })?);

            let leave_pointer = Rc::clone(&pointer);
            let leave_cursor = cursor.clone();
            let leave_follower = follower_part;
            listeners.push(Listener::new(&element, "mouseleave", move |_| {
                if leave_pointer.get().is_hidden() {
                    return;
                }
                if let Some(cursor) = &leave_cursor {
                    set_style(cursor, "transform", &scale_transform(1.0));
                }
                if let Some(follower) = &leave_follower {
                    set_style(follower, "transform", &scale_transform(1.0));
                    set_style(follower, "border-color", FOLLOWER_REST_BORDER);
                    set_style(follower, "opacity", "1");
                }
            })?);
        }

        Ok(Some(Self {
            follower,
            _listeners: listeners,
        }))
    }
}

impl Module for Cursor {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn teardown(&mut self) {
        if let Some(follower) = &self.follower {
            follower.cancel();
        }
    }
}

fn place(element: &HtmlElement, x: f64, y: f64) {
    set_style(element, "left", &format!("{x}px"));
    set_style(element, "top", &format!("{y}px"));
}
