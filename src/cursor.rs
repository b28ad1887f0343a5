pub const INTERACTIVE_SELECTOR: &str = "a, button, .service-card, .dashboard-card, .portfolio-item, .manychat-card, .manychat-feature, .btn, [data-cursor]";
pub const FOLLOWER_REST_BORDER: &str = "rgba(108, 99, 255, 0.3)";
pub const FOLLOWER_HOVER_BORDER: &str = "var(--primary)";
pub const CURSOR_HOVER_SCALE: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorVariant {
    Default,
    Link,
    Button,
    Image,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowerStyle {
    pub scale: f64,
    pub opacity: f64,
}

impl CursorVariant {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("link") => Self::Link,
            Some("button") => Self::Button,
            Some("image") => Self::Image,
            _ => Self::Default,
        }
    }

    pub fn follower_style(self) -> FollowerStyle {
        match self {
            Self::Default => FollowerStyle {
                scale: 1.2,
                opacity: 1.0,
            },
            Self::Link => FollowerStyle {
                scale: 1.3,
                opacity: 1.0,
            },
            Self::Button => FollowerStyle {
                scale: 1.4,
                opacity: 1.0,
            },
            Self::Image => FollowerStyle {
                scale: 2.0,
                opacity: 0.5,
            },
        }
    }
}

pub const VISIBILITY_EVENTS: [&str; 4] = ["touchstart", "touchend", "mouseleave", "mouseenter"];

// While hidden, pointer moves and hover effects leave the cursor untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    hidden: bool,
}

impl PointerState {
    pub fn is_hidden(self) -> bool {
        self.hidden
    }

    pub fn on_event(&mut self, event: &str) -> Option<&'static str> {
        match event {
            "touchstart" | "mouseleave" => {
                self.hidden = true;
                Some("0")
            }
            "touchend" | "mouseenter" => {
                self.hidden = false;
                Some("1")
            }
            _ => None,
        }
    }
}

pub fn scale_transform(scale: f64) -> String {
    format!("scale({scale})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_attribute_is_default() {
        assert_eq!(CursorVariant::from_attr(None), CursorVariant::Default);
        assert_eq!(CursorVariant::from_attr(Some("zoom")), CursorVariant::Default);
        assert_eq!(CursorVariant::from_attr(Some(" image ")), CursorVariant::Image);
    }

    #[test]
    fn image_variant_enlarges_and_fades_follower() {
        let style = CursorVariant::Image.follower_style();
        assert_eq!(style.scale, 2.0);
        assert_eq!(style.opacity, 0.5);
        assert_eq!(CursorVariant::Button.follower_style().scale, 1.4);
    }

    #[test]
    fn touch_and_leave_hide_until_pointer_returns() {
        let mut state = PointerState::default();
        assert!(!state.is_hidden());

        assert_eq!(state.on_event("touchstart"), Some("0"));
        assert!(state.is_hidden());
        assert_eq!(state.on_event("mousemove"), None);
        assert!(state.is_hidden());
        assert_eq!(state.on_event("touchend"), Some("1"));
        assert!(!state.is_hidden());

        assert_eq!(state.on_event("mouseleave"), Some("0"));
        assert!(state.is_hidden());
        assert_eq!(state.on_event("mouseenter"), Some("1"));
        assert!(!state.is_hidden());
    }

    #[test]
    fn every_visibility_event_changes_state() {
        for event in VISIBILITY_EVENTS {
            assert!(PointerState::default().on_event(event).is_some(), "{event}");
        }
    }

    #[test]
    fn transform_formats_whole_and_fractional_scales() {
        assert_eq!(scale_transform(1.0), "scale(1)");
        assert_eq!(scale_transform(1.5), "scale(1.5)");
    }
}
