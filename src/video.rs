pub const AUTOPLAY_SELECTOR: &str = ".manychat-media video, .videos-grid video";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

pub fn fully_in_viewport(rect: Rect, viewport_width: f64, viewport_height: f64) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= viewport_height && rect.right <= viewport_width
}

// A `source` with `data-src` and no usable `src` still has to be loaded.
pub fn pending_source<'a>(data_src: Option<&'a str>, src: Option<&str>) -> Option<&'a str> {
    let data_src = data_src.map(str::trim).filter(|value| !value.is_empty())?;
    match src.map(str::trim) {
        Some(current) if !current.is_empty() => None,
        _ => Some(data_src),
    }
}

pub fn poster_background(poster: &str) -> String {
    format!("url({poster})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, left: f64, bottom: f64, right: f64) -> Rect {
        Rect {
            top,
            left,
            bottom,
            right,
        }
    }

    #[test]
    fn element_inside_viewport_is_visible() {
        assert!(fully_in_viewport(rect(0.0, 0.0, 720.0, 1280.0), 1280.0, 720.0));
    }

    #[test]
    fn partially_clipped_elements_are_deferred() {
        assert!(!fully_in_viewport(rect(-1.0, 0.0, 200.0, 300.0), 1280.0, 720.0));
        assert!(!fully_in_viewport(rect(600.0, 0.0, 900.0, 300.0), 1280.0, 720.0));
        assert!(!fully_in_viewport(rect(10.0, 1000.0, 200.0, 1400.0), 1280.0, 720.0));
    }

    #[test]
    fn data_src_without_src_is_pending() {
        assert_eq!(pending_source(Some("video/demo.mp4"), None), Some("video/demo.mp4"));
        assert_eq!(pending_source(Some(" video/demo.mp4 "), Some("")), Some("video/demo.mp4"));
    }

    #[test]
    fn loaded_or_plain_sources_are_left_alone() {
        assert_eq!(pending_source(Some("video/demo.mp4"), Some("video/demo.mp4")), None);
        assert_eq!(pending_source(None, None), None);
        assert_eq!(pending_source(Some("  "), None), None);
        assert_eq!(pending_source(None, Some("video/live.mp4")), None);
    }

    #[test]
    fn poster_is_wrapped_as_css_url() {
        assert_eq!(poster_background("/media/poster.jpg"), "url(/media/poster.jpg)");
    }
}
