use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};
use yew::prelude::*;
use yew::AppHandle;

use crate::{
    config::MODAL_TRANSITION_MS,
    portfolio::{plan_filter, ItemTransition, ProjectDetails, FILTER_ALL},
};

use super::{
    dom::{clear_style, next_frame, query_all_html, query_html, set_class, set_style, Listener},
    AppContext, Module,
};

const PRESS_MS: u32 = 150;
const MODAL_OPEN_DELAY_MS: u32 = 10;

#[derive(Properties, PartialEq)]
pub struct ProjectInfoProps {
    pub title: AttrValue,
    pub description: AttrValue,
}

#[function_component(ProjectInfo)]
fn project_info(props: &ProjectInfoProps) -> Html {
    html! {
        <>
            <h3>{props.title.clone()}</h3>
            <p>{props.description.clone()}</p>
        </>
    }
}

#[derive(Default)]
struct FilterRun {
    generation: Cell<u64>,
    timers: RefCell<Vec<Timeout>>,
}

impl FilterRun {
    fn restart(&self) -> u64 {
        self.timers.borrow_mut().clear();
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        generation
    }

    fn push(&self, timer: Timeout) {
        self.timers.borrow_mut().push(timer);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}

fn apply_filter(run: &Rc<FilterRun>, items: &[HtmlElement], filter: &str) {
    let generation = run.restart();
    let categories: Vec<Option<String>> = items
        .iter()
        .map(|item| item.get_attribute("data-category"))
        .collect();
    let categories: Vec<Option<&str>> = categories.iter().map(Option::as_deref).collect();

    for (item, transition) in items.iter().zip(plan_filter(&categories, filter)) {
        match transition {
            ItemTransition::Show { delay_ms } => {
                let item = item.clone();
                let run_ref = Rc::downgrade(run);
                run.push(Timeout::new(delay_ms, move || {
                    set_style(&item, "display", "block");
                    set_style(&item, "opacity", "0");
                    set_style(&item, "transform", "translateY(20px)");
                    next_frame(move || {
                        let current = run_ref.upgrade().is_some_and(|run| run.is_current(generation));
                        if !current {
                            return;
                        }
                        set_style(&item, "transition", "all 0.5s ease");
                        set_style(&item, "opacity", "1");
                        set_style(&item, "transform", "translateY(0)");
                    });
                }));
            }
            ItemTransition::Hide { remove_after_ms } => {
                set_style(item, "opacity", "0");
                set_style(item, "transform", "translateY(20px)");
                let item = item.clone();
                run.push(Timeout::new(remove_after_ms, move || {
                    set_style(&item, "display", "none");
                }));
            }
        }
    }
}

struct ProjectModal {
    modal: HtmlElement,
    content: Option<HtmlElement>,
    image: Option<Element>,
    info: RefCell<Option<AppHandle<ProjectInfo>>>,
    open: Cell<bool>,
    timer: RefCell<Option<Timeout>>,
}

impl ProjectModal {
    fn bind(ctx: &AppContext) -> Result<Option<Self>, JsValue> {
        let Some(modal) = query_html(&ctx.document, "#projectModal") else {
            return Ok(None);
        };
        let content = modal
            .query_selector(".modal-content")?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        let image = ctx.document.get_element_by_id("modalImage");

        let info_root = match modal.query_selector(".modal-info")? {
            Some(root) => {
                root.set_inner_html("");
                Some(root)
            }
            None => match &content {
                Some(content) => {
                    let root = ctx.document.create_element("div")?;
                    root.set_class_name("modal-info");
                    content.append_child(&root)?;
                    Some(root)
                }
                None => None,
            },
        };
        let info = info_root.map(|root| {
            let props = ProjectInfoProps {
                title: AttrValue::from(""),
                description: AttrValue::from(""),
            };
            yew::Renderer::<ProjectInfo>::with_root_and_props(root, props).render()
        });

        Ok(Some(Self {
            modal,
            content,
            image,
            info: RefCell::new(info),
            open: Cell::new(false),
            timer: RefCell::new(None),
        }))
    }

    fn open(&self, ctx: &AppContext, details: ProjectDetails) {
        if let Some(image) = &self.image {
            let _ = image.set_attribute("src", &details.image_src);
            let _ = image.set_attribute("alt", &details.title);
        }
        if let Some(info) = self.info.borrow_mut().as_mut() {
            info.update(ProjectInfoProps {
                title: AttrValue::from(details.title),
                description: AttrValue::from(details.description),
            });
        }

        set_style(&self.modal, "display", "flex");
        if let Some(body) = ctx.document.body() {
            set_style(&body, "overflow", "hidden");
        }
        self.open.set(true);

        let content = self.content.clone();
        let timer = Timeout::new(MODAL_OPEN_DELAY_MS, move || {
            if let Some(content) = &content {
                set_style(content, "transform", "scale(1)");
                set_style(content, "opacity", "1");
            }
        });
        *self.timer.borrow_mut() = Some(timer);
    }

    fn close(&self, ctx: &AppContext) {
        if !self.open.replace(false) {
            return;
        }

        if let Some(content) = &self.content {
            set_style(content, "transform", "scale(0.8)");
            set_style(content, "opacity", "0");
        }

        let modal = self.modal.clone();
        let body = ctx.document.body();
        let timer = Timeout::new(MODAL_TRANSITION_MS, move || {
            set_style(&modal, "display", "none");
            if let Some(body) = &body {
                clear_style(body, "overflow");
            }
        });
        *self.timer.borrow_mut() = Some(timer);
    }

    fn teardown(&self) {
        self.timer.borrow_mut().take();
        if let Some(info) = self.info.borrow_mut().take() {
            info.destroy();
        }
    }
}

fn read_details(item: &HtmlElement) -> ProjectDetails {
    let child = |selector: &str| item.query_selector(selector).ok().flatten();

    ProjectDetails::new(
        child(".portfolio-image").and_then(|image| image.get_attribute("src")),
        child("h3").and_then(|title| title.text_content()),
        child("p").and_then(|description| description.text_content()),
    )
}

pub struct Portfolio {
    filters: Rc<FilterRun>,
    press_timers: Rc<RefCell<Vec<Option<Timeout>>>>,
    modal: Option<Rc<ProjectModal>>,
    _listeners: Vec<Listener>,
}

impl Portfolio {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let buttons = query_all_html(&ctx.document, ".portfolio-filter");
        let items = Rc::new(query_all_html(&ctx.document, ".portfolio-item"));
        if buttons.is_empty() && items.is_empty() {
            return Ok(None);
        }

        let filters = Rc::new(FilterRun::default());
        let press_timers = Rc::new(RefCell::new(Vec::with_capacity(buttons.len())));
        let buttons = Rc::new(buttons);
        let mut listeners = Vec::new();

        for (index, button) in buttons.iter().enumerate() {
            press_timers.borrow_mut().push(None);
            let all_buttons = Rc::clone(&buttons);
            let clicked = button.clone();
            let items = Rc::clone(&items);
            let run = Rc::clone(&filters);
            let presses = Rc::downgrade(&press_timers);
            listeners.push(Listener::new(button, "click", move |_| {
                set_style(&clicked, "transform", "scale(0.95)");
                if let Some(presses) = presses.upgrade() {
                    let released = clicked.clone();
                    let timer = Timeout::new(PRESS_MS, move || {
                        set_style(&released, "transform", "scale(1)");
                    });
                    if let Some(slot) = presses.borrow_mut().get_mut(index) {
                        *slot = Some(timer);
                    }
                }

                for other in all_buttons.iter() {
                    set_class(other, "active", false);
                }
                set_class(&clicked, "active", true);

                let filter = clicked
                    .get_attribute("data-filter")
                    .unwrap_or_else(|| FILTER_ALL.to_string());
                apply_filter(&run, &items, &filter);
            })?);
        }

        for item in items.iter() {
            let lifted = item.clone();
            listeners.push(Listener::new(item, "mouseenter", move |_| {
                set_style(&lifted, "transform", "translateY(-10px) scale(1.02)");
            })?);
            let lowered = item.clone();
            listeners.push(Listener::new(item, "mouseleave", move |_| {
                set_style(&lowered, "transform", "translateY(0) scale(1)");
            })?);
        }

        let modal = ProjectModal::bind(ctx)?.map(Rc::new);
        if let Some(modal) = &modal {
            listeners.extend(bind_modal(ctx, modal, &items)?);
        }

        Ok(Some(Self {
            filters,
            press_timers,
            modal,
            _listeners: listeners,
        }))
    }
}

fn bind_modal(
    ctx: &Rc<AppContext>,
    modal: &Rc<ProjectModal>,
    items: &[HtmlElement],
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    for item in items {
        let open_ctx = Rc::clone(ctx);
        let opened = Rc::downgrade(modal);
        let source = item.clone();
        listeners.push(Listener::new(item, "click", move |_| {
            if let Some(modal) = opened.upgrade() {
                modal.open(&open_ctx, read_details(&source));
            }
        })?);
    }

    if let Some(close_button) = ctx.document.get_element_by_id("modalClose") {
        let close_ctx = Rc::clone(ctx);
        let closed = Rc::downgrade(modal);
        listeners.push(Listener::new(&close_button, "click", move |_| {
            if let Some(modal) = closed.upgrade() {
                modal.close(&close_ctx);
            }
        })?);
    }

    let backdrop_ctx = Rc::clone(ctx);
    let backdrop = Rc::downgrade(modal);
    listeners.push(Listener::new(&modal.modal, "click", move |event: Event| {
        let Some(modal) = backdrop.upgrade() else {
            return;
        };
        let on_backdrop = event
            .target()
            .is_some_and(|target| target.dyn_ref::<HtmlElement>() == Some(&modal.modal));
        if on_backdrop {
            modal.close(&backdrop_ctx);
        }
    })?);

    let escape_ctx = Rc::clone(ctx);
    let escaped = Rc::downgrade(modal);
    listeners.push(Listener::new(&ctx.document, "keydown", move |event: Event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|event| event.key() == "Escape");
        if !is_escape {
            return;
        }
        if let Some(modal) = escaped.upgrade() {
            modal.close(&escape_ctx);
        }
    })?);

    Ok(listeners)
}

impl Module for Portfolio {
    fn name(&self) -> &'static str {
        "portfolio"
    }

    fn teardown(&mut self) {
        self.filters.restart();
        self.press_timers.borrow_mut().clear();
        if let Some(modal) = &self.modal {
            modal.teardown();
        }
    }
}
