use serde::Serialize;

pub const PULSE_GLOW_SELECTOR: &str = ".btn-primary, .service-tag.experience-tag, .whatsapp-float";
pub const TEXT_GLOW_SELECTOR: &str = "h1, h2, .typing-text";
pub const MOTION_SELECTOR: &str = ".service-icon, .dashboard-icon, .manychat-feature i";
pub const GLOW_CARD_SELECTOR: &str = ".service-card, .dashboard-card, .portfolio-item, .manychat-card, .manychat-feature";

pub const DECORATIONS: [(&str, &str); 4] = [
    (PULSE_GLOW_SELECTOR, "pulse-glow"),
    (TEXT_GLOW_SELECTOR, "text-glow"),
    (MOTION_SELECTOR, "motion-element"),
    (GLOW_CARD_SELECTOR, "glow-effect"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    Scale,
    Plain,
}

impl RevealKind {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("fade-up") => Self::FadeUp,
            Some("fade-down") => Self::FadeDown,
            Some("fade-left") => Self::FadeLeft,
            Some("fade-right") => Self::FadeRight,
            Some("scale") => Self::Scale,
            _ => Self::Plain,
        }
    }

    pub fn revealed_transform(self) -> &'static str {
        match self {
            Self::FadeUp | Self::FadeDown | Self::Plain => "translateY(0)",
            Self::FadeLeft | Self::FadeRight => "translateX(0)",
            Self::Scale => "scale(1)",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AosOptions {
    pub duration: u32,
    pub once: bool,
    pub offset: u32,
    pub easing: &'static str,
    pub mirror: bool,
    pub disable: bool,
}

impl AosOptions {
    pub fn new(narrow_viewport: bool) -> Self {
        Self {
            duration: 1_000,
            once: true,
            offset: 100,
            easing: "ease-out-cubic",
            mirror: false,
            disable: narrow_viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn horizontal_fades_reset_x_axis() {
        assert_eq!(RevealKind::from_attr(Some("fade-left")).revealed_transform(), "translateX(0)");
        assert_eq!(RevealKind::from_attr(Some("fade-right")).revealed_transform(), "translateX(0)");
    }

    #[test]
    fn unknown_kind_falls_back_to_vertical_reset() {
        assert_eq!(RevealKind::from_attr(Some("spin")), RevealKind::Plain);
        assert_eq!(RevealKind::from_attr(None).revealed_transform(), "translateY(0)");
        assert_eq!(RevealKind::Scale.revealed_transform(), "scale(1)");
    }

    #[test]
    fn reveal_library_is_disabled_on_narrow_viewports() {
        let options = serde_json::to_value(AosOptions::new(true)).expect("serializable");
        assert_eq!(
            options,
            json!({
                "duration": 1000,
                "once": true,
                "offset": 100,
                "easing": "ease-out-cubic",
                "mirror": false,
                "disable": true,
            })
        );
        assert!(!AosOptions::new(false).disable);
    }
}
