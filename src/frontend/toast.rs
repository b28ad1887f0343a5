use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};
use yew::prelude::*;
use yew::AppHandle;

use crate::notifier::{ToastKind, ToastState};

const TOAST_ROOT_ID: &str = "toast-root";

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
    pub kind: ToastKind,
    pub visible: bool,
}

impl From<&ToastState> for ToastProps {
    fn from(state: &ToastState) -> Self {
        Self {
            message: AttrValue::from(state.message.clone()),
            kind: state.kind,
            visible: state.visible,
        }
    }
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    html! {
        <div
            id="toast-notification"
            class={classes!("toast", props.kind.class(), props.visible.then_some("toast--show"))}
            role="status"
            aria-live="polite"
        >
            {props.message.clone()}
        </div>
    }
}

struct NotifierInner {
    state: RefCell<ToastState>,
    handle: RefCell<Option<AppHandle<Toast>>>,
    hide_timer: RefCell<Option<Timeout>>,
}

impl NotifierInner {
    fn render(&self) {
        let props = ToastProps::from(&*self.state.borrow());
        if let Some(handle) = self.handle.borrow_mut().as_mut() {
            handle.update(props);
        }
    }
}

#[derive(Clone)]
pub struct Notifier {
    inner: Rc<NotifierInner>,
}

impl Notifier {
    pub fn mount(document: &Document) -> Result<Self, JsValue> {
        let root = toast_root(document)?;
        let state = ToastState::default();
        let handle = yew::Renderer::<Toast>::with_root_and_props(root, ToastProps::from(&state)).render();

        Ok(Self {
            inner: Rc::new(NotifierInner {
                state: RefCell::new(state),
                handle: RefCell::new(Some(handle)),
                hide_timer: RefCell::new(None),
            }),
        })
    }

    pub fn show(&self, message: &str, kind: ToastKind, duration_ms: u32) {
        let generation = self.inner.state.borrow_mut().show(message, kind);
        self.inner.render();

        let inner = Rc::downgrade(&self.inner);
        let timer = Timeout::new(duration_ms, move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let hidden = inner.state.borrow_mut().hide(generation);
            if hidden {
                inner.render();
            }
        });

        // Replacing the slot drops, and so cancels, the previous hide.
        *self.inner.hide_timer.borrow_mut() = Some(timer);
    }

    pub fn teardown(&self) {
        self.inner.hide_timer.borrow_mut().take();
        if let Some(handle) = self.inner.handle.borrow_mut().take() {
            handle.destroy();
        }
    }
}

fn toast_root(document: &Document) -> Result<Element, JsValue> {
    if let Some(root) = document.get_element_by_id(TOAST_ROOT_ID) {
        return Ok(root);
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let root = document.create_element("div")?;
    root.set_id(TOAST_ROOT_ID);
    body.append_child(&root)?;
    Ok(root)
}
