use serde::Deserialize;

use crate::logging::LogLevel;

pub const DEFAULT_PARTICLE_DENSITY: u32 = 80;
pub const DEFAULT_PARTICLE_COLOR: &str = "#6C63FF";
pub const DEFAULT_PARTICLE_OPACITY: f64 = 0.5;
pub const DEFAULT_PARTICLE_SPEED: f64 = 2.0;
pub const DEFAULT_TYPE_SPEED_MS: u32 = 100;
pub const DEFAULT_DELETE_SPEED_MS: u32 = 50;
pub const DEFAULT_PAUSE_MS: u32 = 2_000;
pub const DEFAULT_HEADER_SCROLL_THRESHOLD: f64 = 100.0;
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
pub const DEFAULT_TOAST_DURATION_MS: u32 = 2_500;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const DEFAULT_TYPING_TEXTS: [&str; 6] = [
    "ideias em resultados digitais.",
    "visitas em vendas.",
    "seguidores em clientes.",
    "tráfego em conversão.",
    "conteúdo em engajamento.",
    "projetos em sucesso.",
];

pub const INTER_PHRASE_PAUSE_MS: u32 = 500;
pub const TYPING_START_DELAY_MS: u32 = 1_000;
pub const TYPING_PAUSED_POLL_MS: u32 = 100;
pub const SECTION_REFERENCE_LINE: f64 = 100.0;
pub const ANCHOR_LOADING_MS: u32 = 1_000;
pub const IDLE_INIT_TIMEOUT_MS: u32 = 1_500;
pub const REDUCED_MOTION_FPS: u32 = 30;
pub const FPS_WINDOW_MS: f64 = 1_000.0;
pub const PORTFOLIO_STAGGER_MS: u32 = 100;
pub const PORTFOLIO_HIDE_DELAY_MS: u32 = 300;
pub const MODAL_TRANSITION_MS: u32 = 300;
pub const SLIDER_START_DELAY_MS: u32 = 3_000;
pub const POPUP_FALLBACK_DELAY_MS: u32 = 300;

pub const CONFIG_ELEMENT_ID: &str = "app-config";

const PARTICLE_DENSITY_BOUNDS: (u32, u32) = (1, 400);
const PARTICLE_OPACITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const PARTICLE_SPEED_BOUNDS: (f64, f64) = (0.1, 20.0);
const TYPE_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
const DELETE_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
const PAUSE_MS_BOUNDS: (u32, u32) = (0, 30_000);
const HEADER_SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const MOBILE_BREAKPOINT_BOUNDS: (f64, f64) = (240.0, 2_560.0);
const TOAST_DURATION_MS_BOUNDS: (u32, u32) = (500, 30_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    pub fn install_plan(self) -> InstallPlan {
        match self {
            Self::Mobile => InstallPlan {
                immediate: &MOBILE_IMMEDIATE,
                deferred: &[],
                reduce_motion: true,
            },
            Self::Desktop => InstallPlan {
                immediate: &ESSENTIAL_MODULES,
                deferred: &DESKTOP_DEFERRED,
                reduce_motion: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    Scroll,
    Performance,
    Navigation,
    WhatsApp,
    Portfolio,
    Video,
    Particles,
    Cursor,
    Animations,
    Typing,
    Slider,
}

impl ModuleKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Performance => "performance",
            Self::Navigation => "navigation",
            Self::WhatsApp => "whatsapp",
            Self::Portfolio => "portfolio",
            Self::Video => "video",
            Self::Particles => "particles",
            Self::Cursor => "cursor",
            Self::Animations => "animations",
            Self::Typing => "typing",
            Self::Slider => "slider",
        }
    }
}

const ESSENTIAL_MODULES: [ModuleKind; 4] = [
    ModuleKind::Scroll,
    ModuleKind::Performance,
    ModuleKind::Navigation,
    ModuleKind::WhatsApp,
];

const MOBILE_IMMEDIATE: [ModuleKind; 6] = [
    ModuleKind::Scroll,
    ModuleKind::Performance,
    ModuleKind::Navigation,
    ModuleKind::WhatsApp,
    ModuleKind::Portfolio,
    ModuleKind::Video,
];

const DESKTOP_DEFERRED: [ModuleKind; 7] = [
    ModuleKind::Particles,
    ModuleKind::Cursor,
    ModuleKind::Animations,
    ModuleKind::Typing,
    ModuleKind::Portfolio,
    ModuleKind::Slider,
    ModuleKind::Video,
];

// Immediate modules install synchronously at boot; deferred ones wait for an
// idle slot. An empty `deferred` list means the app is ready right away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstallPlan {
    pub immediate: &'static [ModuleKind],
    pub deferred: &'static [ModuleKind],
    pub reduce_motion: bool,
}

impl InstallPlan {
    pub fn schedules(&self, kind: ModuleKind) -> bool {
        self.immediate.contains(&kind) || self.deferred.contains(&kind)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub particle_density: u32,
    pub particle_color: String,
    pub particle_opacity: f64,
    pub particle_speed: f64,
    pub typing_texts: Vec<String>,
    pub type_speed_ms: u32,
    pub delete_speed_ms: u32,
    pub pause_ms: u32,
    pub header_scroll_threshold: f64,
    pub mobile_breakpoint: f64,
    pub toast_duration_ms: u32,
    pub log_level: LogLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            particle_density: DEFAULT_PARTICLE_DENSITY,
            particle_color: DEFAULT_PARTICLE_COLOR.to_string(),
            particle_opacity: DEFAULT_PARTICLE_OPACITY,
            particle_speed: DEFAULT_PARTICLE_SPEED,
            typing_texts: DEFAULT_TYPING_TEXTS.iter().map(|text| text.to_string()).collect(),
            type_speed_ms: DEFAULT_TYPE_SPEED_MS,
            delete_speed_ms: DEFAULT_DELETE_SPEED_MS,
            pause_ms: DEFAULT_PAUSE_MS,
            header_scroll_threshold: DEFAULT_HEADER_SCROLL_THRESHOLD,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    particle_density: Option<u32>,
    particle_color: Option<String>,
    particle_opacity: Option<f64>,
    particle_speed: Option<f64>,
    typing_texts: Option<Vec<String>>,
    type_speed_ms: Option<u32>,
    delete_speed_ms: Option<u32>,
    pause_ms: Option<u32>,
    header_scroll_threshold: Option<f64>,
    mobile_breakpoint: Option<f64>,
    toast_duration_ms: Option<u32>,
    log_level: Option<String>,
}

impl RuntimeConfig {
    pub fn from_json(raw: Option<&str>) -> Self {
        let overrides = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| serde_json::from_str::<ConfigOverrides>(value).ok())
            .unwrap_or_default();

        Self::from_overrides(overrides)
    }

    pub fn from_overrides(overrides: ConfigOverrides) -> Self {
        let defaults = Self::default();

        let particle_color = overrides
            .particle_color
            .map(|value| value.trim().to_string())
            .filter(|value| is_hex_color(value))
            .unwrap_or(defaults.particle_color);
        let typing_texts = overrides.typing_texts.unwrap_or(defaults.typing_texts);
        let log_level = overrides
            .log_level
            .as_deref()
            .map(|value| parse_log_level(value, DEFAULT_LOG_LEVEL))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            particle_density: u32_with_bounds(
                overrides.particle_density,
                defaults.particle_density,
                PARTICLE_DENSITY_BOUNDS,
            ),
            particle_color,
            particle_opacity: f64_with_bounds(
                overrides.particle_opacity,
                defaults.particle_opacity,
                PARTICLE_OPACITY_BOUNDS,
            ),
            particle_speed: f64_with_bounds(
                overrides.particle_speed,
                defaults.particle_speed,
                PARTICLE_SPEED_BOUNDS,
            ),
            typing_texts,
            type_speed_ms: u32_with_bounds(
                overrides.type_speed_ms,
                defaults.type_speed_ms,
                TYPE_SPEED_MS_BOUNDS,
            ),
            delete_speed_ms: u32_with_bounds(
                overrides.delete_speed_ms,
                defaults.delete_speed_ms,
                DELETE_SPEED_MS_BOUNDS,
            ),
            pause_ms: u32_with_bounds(overrides.pause_ms, defaults.pause_ms, PAUSE_MS_BOUNDS),
            header_scroll_threshold: f64_with_bounds(
                overrides.header_scroll_threshold,
                defaults.header_scroll_threshold,
                HEADER_SCROLL_THRESHOLD_BOUNDS,
            ),
            mobile_breakpoint: f64_with_bounds(
                overrides.mobile_breakpoint,
                defaults.mobile_breakpoint,
                MOBILE_BREAKPOINT_BOUNDS,
            ),
            toast_duration_ms: u32_with_bounds(
                overrides.toast_duration_ms,
                defaults.toast_duration_ms,
                TOAST_DURATION_MS_BOUNDS,
            ),
            log_level,
        }
    }

    pub fn device_class(&self, viewport_width: f64) -> DeviceClass {
        DeviceClass::from_width(viewport_width, self.mobile_breakpoint)
    }
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };

    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn parse_log_level(value: &str, default: LogLevel) -> LogLevel {
    match value.trim().to_ascii_lowercase().as_str() {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_block_keeps_defaults() {
        assert_eq!(RuntimeConfig::from_json(None), RuntimeConfig::default());
        assert_eq!(RuntimeConfig::from_json(Some("   ")), RuntimeConfig::default());
    }

    #[test]
    fn malformed_json_keeps_defaults() {
        let config = RuntimeConfig::from_json(Some("{ particleDensity: "));
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn in_bounds_overrides_are_applied() {
        let config = RuntimeConfig::from_json(Some(
            r##"{"particleDensity": 120, "typeSpeedMs": 60, "typingTexts": ["a", "bb"], "particleColor": "#ff0000", "logLevel": "DEBUG"}"##,
        ));

        assert_eq!(config.particle_density, 120);
        assert_eq!(config.type_speed_ms, 60);
        assert_eq!(config.typing_texts, vec!["a".to_string(), "bb".to_string()]);
        assert_eq!(config.particle_color, "#ff0000");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_bounds_overrides_fall_back_to_defaults() {
        let config = RuntimeConfig::from_json(Some(
            r#"{"particleDensity": 0, "particleOpacity": 3.5, "toastDurationMs": 10, "particleColor": "red", "logLevel": "loud"}"#,
        ));

        assert_eq!(config.particle_density, DEFAULT_PARTICLE_DENSITY);
        assert_eq!(config.particle_opacity, DEFAULT_PARTICLE_OPACITY);
        assert_eq!(config.toast_duration_ms, DEFAULT_TOAST_DURATION_MS);
        assert_eq!(config.particle_color, DEFAULT_PARTICLE_COLOR);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn device_class_uses_inclusive_breakpoint() {
        let config = RuntimeConfig::default();
        assert_eq!(config.device_class(768.0), DeviceClass::Mobile);
        assert_eq!(config.device_class(769.0), DeviceClass::Desktop);
        assert!(config.device_class(320.0).is_mobile());
    }

    #[test]
    fn mobile_plan_skips_decorative_modules() {
        let plan = DeviceClass::Mobile.install_plan();

        for kind in [
            ModuleKind::Particles,
            ModuleKind::Cursor,
            ModuleKind::Typing,
            ModuleKind::Slider,
            ModuleKind::Animations,
        ] {
            assert!(!plan.schedules(kind), "{} scheduled on mobile", kind.name());
        }
        assert_eq!(&plan.immediate[..4], &ESSENTIAL_MODULES[..]);
        assert_eq!(&plan.immediate[4..], &[ModuleKind::Portfolio, ModuleKind::Video][..]);
        assert!(plan.deferred.is_empty());
        assert!(plan.reduce_motion);
    }

    #[test]
    fn desktop_plan_defers_everything_but_essentials() {
        let plan = DeviceClass::Desktop.install_plan();

        assert_eq!(plan.immediate, &ESSENTIAL_MODULES[..]);
        assert_eq!(
            plan.deferred,
            &[
                ModuleKind::Particles,
                ModuleKind::Cursor,
                ModuleKind::Animations,
                ModuleKind::Typing,
                ModuleKind::Portfolio,
                ModuleKind::Slider,
                ModuleKind::Video,
            ][..]
        );
        assert!(plan.deferred.iter().all(|kind| !plan.immediate.contains(kind)));
        assert!(!plan.reduce_motion);
    }
}
