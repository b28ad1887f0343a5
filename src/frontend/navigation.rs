use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, Node, ScrollBehavior, ScrollToOptions};

use crate::{
    config::ANCHOR_LOADING_MS,
    navigation::{is_active_entry, same_page_target, scroll_target_offset, MenuChange, MenuState},
};

use super::{
    dom::{
        clear_style, query_all, query_all_html, query_html, read_section_signal, set_class,
        set_style, Listener, SECTION_CHANGED_EVENT,
    },
    AppContext, Module,
};

const NAV_ENTRY_SELECTOR: &str = ".nav-links a, .mobile-nav-item";

struct MobileMenu {
    state: Cell<MenuState>,
    button: Option<Element>,
    links: Option<Element>,
}

impl MobileMenu {
    fn toggle(&self, ctx: &AppContext) {
        let mut state = self.state.get();
        let change = state.toggle();
        self.state.set(state);
        self.apply(ctx, change);
    }

    fn close(&self, ctx: &AppContext) {
        let mut state = self.state.get();
        if let Some(change) = state.close() {
            self.state.set(state);
            self.apply(ctx, change);
        }
    }

    fn apply(&self, ctx: &AppContext, change: MenuChange) {
        if let Some(links) = &self.links {
            set_class(links, "active", change.open);
        }

        if let Some(icon) = self
            .button
            .as_ref()
            .and_then(|button| button.query_selector("i").ok().flatten())
        {
            icon.set_class_name(change.icon);
        }

        if let Some(body) = ctx.document.body() {
            if change.freeze_body_scroll {
                set_style(&body, "overflow", "hidden");
            } else {
                clear_style(&body, "overflow");
            }
        }
    }

    fn contains(&self, node: &Node) -> bool {
        [&self.button, &self.links]
            .into_iter()
            .flatten()
            .any(|element| element.contains(Some(node)))
    }
}

pub struct Navigation {
    _listeners: Vec<Listener>,
    anchor_timers: Rc<RefCell<Vec<Option<Timeout>>>>,
}

impl Navigation {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let document = &ctx.document;
        let menu = Rc::new(MobileMenu {
            state: Cell::new(MenuState::default()),
            button: document.query_selector(".mobile-menu")?,
            links: document.query_selector(".nav-links")?,
        });
        let mut listeners = Vec::new();

        if let Some(button) = &menu.button {
            let toggle_ctx = Rc::clone(ctx);
            let toggle_menu = Rc::clone(&menu);
            listeners.push(Listener::new(button, "click", move |event: Event| {
                event.stop_propagation();
                toggle_menu.toggle(&toggle_ctx);
            })?);
        }

        for entry in query_all(document, NAV_ENTRY_SELECTOR) {
            let entry_ctx = Rc::clone(ctx);
            let entry_menu = Rc::clone(&menu);
            listeners.push(Listener::new(&entry, "click", move |_| {
                if entry_ctx.device().is_mobile() {
                    entry_menu.close(&entry_ctx);
                }
            })?);
        }

        if menu.button.is_some() && menu.links.is_some() {
            let outside_ctx = Rc::clone(ctx);
            let outside_menu = Rc::clone(&menu);
            listeners.push(Listener::new(document, "click", move |event: Event| {
                if !outside_menu.state.get().is_open() {
                    return;
                }
                let inside = event
                    .target()
                    .and_then(|target| target.dyn_into::<Node>().ok())
                    .is_some_and(|node| outside_menu.contains(&node));
                if !inside {
                    outside_menu.close(&outside_ctx);
                }
            })?);
        }

        let highlight_ctx = Rc::clone(ctx);
        listeners.push(Listener::new(document, SECTION_CHANGED_EVENT, move |event: Event| {
            if let Some(section) = read_section_signal(&event) {
                highlight(&highlight_ctx, &section);
            }
        })?);

        let anchors = query_all_html(document, "a[href^=\"#\"]");
        let anchor_timers = Rc::new(RefCell::new(Vec::with_capacity(anchors.len())));
        for (index, anchor) in anchors.into_iter().enumerate() {
            anchor_timers.borrow_mut().push(None);
            let scroll_ctx = Rc::clone(ctx);
            let timers = Rc::downgrade(&anchor_timers);
            let target_anchor = anchor.clone();
            listeners.push(Listener::with_passive(&anchor, "click", false, move |event: Event| {
                event.prevent_default();
                let Some(href) = target_anchor.get_attribute("href") else {
                    return;
                };
                let Some(id) = same_page_target(&href) else {
                    return;
                };
                if !scroll_to_section(&scroll_ctx, id) {
                    return;
                }

                set_class(&target_anchor, "loading", true);
                let Some(timers) = timers.upgrade() else {
                    return;
                };
                let loaded_anchor = target_anchor.clone();
                let timer = Timeout::new(ANCHOR_LOADING_MS, move || {
                    set_class(&loaded_anchor, "loading", false);
                });
                if let Some(slot) = timers.borrow_mut().get_mut(index) {
                    *slot = Some(timer);
                };
            })?);
        }

        Ok(Some(Self {
            _listeners: listeners,
            anchor_timers,
        }))
    }
}

impl Module for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn teardown(&mut self) {
        self.anchor_timers.borrow_mut().clear();
    }
}

fn highlight(ctx: &AppContext, section: &str) {
    for entry in query_all(&ctx.document, NAV_ENTRY_SELECTOR) {
        let active = is_active_entry(entry.get_attribute("href").as_deref(), section);
        set_class(&entry, "active", active);
    }
}

fn scroll_to_section(ctx: &AppContext, id: &str) -> bool {
    let Some(target) = ctx.document.get_element_by_id(id) else {
        return false;
    };

    let header_height = query_html(&ctx.document, "#header")
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0);
    let top = scroll_target_offset(
        target.get_bounding_client_rect().top(),
        ctx.window.scroll_y().unwrap_or(0.0),
        header_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    ctx.window.scroll_to_with_scroll_to_options(&options);
    true
}
