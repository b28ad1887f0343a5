use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, HtmlVideoElement, IntersectionObserver};

use crate::{
    logging::LogLevel,
    video::{fully_in_viewport, pending_source, poster_background, Rect, AUTOPLAY_SELECTOR},
};

use super::{
    dom::{describe_js_error, query_all, set_style, Listener, Observer},
    viewport_size, AppContext, Module,
};

const LAZY_LOAD_THRESHOLD: f64 = 0.1;

pub struct VideoManager {
    _lazy: Option<Observer>,
    _listeners: Vec<Listener>,
}

impl VideoManager {
    pub fn install(ctx: &Rc<AppContext>) -> Result<Option<Self>, JsValue> {
        let videos = videos(ctx, "video");
        if videos.is_empty() {
            return Ok(None);
        }

        let mut listeners = Vec::with_capacity(videos.len() * 2);
        for video in &videos {
            video.set_preload("metadata");
            video.set_attribute("playsinline", "true")?;
            if !video.has_attribute("autoplay") {
                video.set_attribute("controls", "true")?;
            }

            let toggled = video.clone();
            listeners.push(Listener::new(video, "click", move |_| {
                if toggled.paused() {
                    let _ = toggled.play();
                } else {
                    let _ = toggled.pause();
                }
            })?);

            let loaded = video.clone();
            listeners.push(Listener::new(video, "loadeddata", move |_| {
                let _ = loaded.class_list().add_1("video-loaded");
                let poster = loaded.poster();
                if !poster.is_empty() {
                    set_style(&loaded, "background-image", &poster_background(&poster));
                    set_style(&loaded, "background-size", "cover");
                    set_style(&loaded, "background-position", "center");
                }
            })?);
        }

        for video in self::videos(ctx, AUTOPLAY_SELECTOR) {
            start_autoplay(ctx, video)?;
        }

        let lazy = load_sources(ctx, &videos)?;

        Ok(Some(Self {
            _lazy: lazy,
            _listeners: listeners,
        }))
    }
}

impl Module for VideoManager {
    fn name(&self) -> &'static str {
        "video"
    }
}

fn videos(ctx: &AppContext, selector: &str) -> Vec<HtmlVideoElement> {
    query_all(&ctx.document, selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlVideoElement>().ok())
        .collect()
}

fn start_autoplay(ctx: &Rc<AppContext>, video: HtmlVideoElement) -> Result<(), JsValue> {
    for attribute in ["autoplay", "muted", "loop", "playsinline"] {
        video.set_attribute(attribute, "true")?;
    }
    video.set_muted(true);
    video.set_loop(true);
    video.remove_attribute("controls")?;

    let ctx = Rc::clone(ctx);
    spawn_local(async move {
        let attempt = match video.play() {
            Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
            Err(error) => Err(error),
        };

        if let Err(error) = attempt {
            ctx.log(
                LogLevel::Warn,
                "autoplay_prevented",
                json!({ "src": video.current_src(), "error": describe_js_error(&error) }),
            );
            let _ = video.set_attribute("controls", "true");
        }
    });

    Ok(())
}

fn load_sources(ctx: &AppContext, videos: &[HtmlVideoElement]) -> Result<Option<Observer>, JsValue> {
    let (width, height) = viewport_size(&ctx.window);
    let (visible, offscreen): (Vec<&HtmlVideoElement>, Vec<&HtmlVideoElement>) =
        videos.iter().partition(|video| {
            let rect = video.get_bounding_client_rect();
            let rect = Rect {
                top: rect.top(),
                left: rect.left(),
                bottom: rect.bottom(),
                right: rect.right(),
            };
            fully_in_viewport(rect, width, height)
        });

    for video in visible {
        load_deferred_sources(video);
    }
    if offscreen.is_empty() {
        return Ok(None);
    }

    let observer = Observer::new(
        Some(LAZY_LOAD_THRESHOLD),
        |entry, observer: &IntersectionObserver| {
            if !entry.is_intersecting() {
                return;
            }
            let target = entry.target();
            if let Some(video) = target.dyn_ref::<HtmlVideoElement>() {
                load_deferred_sources(video);
            }
            observer.unobserve(&target);
        },
    )?;
    for video in offscreen {
        observer.observe(video);
    }

    Ok(Some(observer))
}

fn load_deferred_sources(video: &HtmlVideoElement) {
    let Ok(sources) = video.query_selector_all("source") else {
        return;
    };

    let mut loaded = false;
    for index in 0..sources.length() {
        let Some(source) = sources.get(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let data_src = source.get_attribute("data-src");
        let src = source.get_attribute("src");
        if let Some(pending) = pending_source(data_src.as_deref(), src.as_deref()) {
            loaded |= source.set_attribute("src", pending).is_ok();
        }
    }
    if loaded {
        video.load();
    }
}
