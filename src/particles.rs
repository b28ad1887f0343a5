use serde::Serialize;

use crate::config::{DeviceClass, RuntimeConfig};

pub const PARTICLES_CONTAINER_ID: &str = "particles-js";
pub const PARTICLES_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/particles.js/2.0.0/particles.min.js";
pub const REDUCED_PARTICLE_SPEED: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticlesParams {
    pub particles: ParticleOptions,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleOptions {
    pub number: NumberOptions,
    pub color: ValueOption<String>,
    pub shape: ShapeOptions,
    pub opacity: OpacityOptions,
    pub size: SizeOptions,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub motion: MoveOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueOption<T> {
    pub value: T,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumberOptions {
    pub value: u32,
    pub density: DensityOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DensityOptions {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpacityOptions {
    pub value: f64,
    pub random: bool,
    pub anim: OpacityAnimation,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpacityAnimation {
    pub enable: bool,
    pub speed: f64,
    pub opacity_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeOptions {
    pub value: f64,
    pub random: bool,
    pub anim: SizeAnimation,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeAnimation {
    pub enable: bool,
    pub speed: f64,
    pub size_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: f64,
    pub color: String,
    pub opacity: f64,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoveOptions {
    pub enable: bool,
    pub speed: f64,
    pub direction: &'static str,
    pub random: bool,
    pub straight: bool,
    pub out_mode: &'static str,
    pub bounce: bool,
    pub attract: Attract,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attract {
    pub enable: bool,
    pub rotate_x: f64,
    pub rotate_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interactivity {
    pub detect_on: &'static str,
    pub events: InteractivityEvents,
    pub modes: InteractivityModes,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractivityEvents {
    pub onhover: EventMode,
    pub onclick: EventMode,
    pub resize: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventMode {
    pub enable: bool,
    pub mode: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractivityModes {
    pub repulse: RepulseMode,
    pub push: PushMode,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RepulseMode {
    pub distance: f64,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PushMode {
    pub particles_nb: u32,
}

pub fn density_for(config: &RuntimeConfig, device: DeviceClass) -> u32 {
    if device.is_mobile() {
        (f64::from(config.particle_density) * 0.5).round() as u32
    } else {
        config.particle_density
    }
}

pub fn speed_for(config: &RuntimeConfig, device: DeviceClass) -> f64 {
    if device.is_mobile() {
        (config.particle_speed * 0.6).max(1.0)
    } else {
        config.particle_speed
    }
}

impl ParticlesParams {
    pub fn for_device(config: &RuntimeConfig, device: DeviceClass) -> Self {
        let desktop = !device.is_mobile();

        Self {
            particles: ParticleOptions {
                number: NumberOptions {
                    value: density_for(config, device),
                    density: DensityOptions {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: ValueOption {
                    value: config.particle_color.clone(),
                },
                shape: ShapeOptions { kind: "circle" },
                opacity: OpacityOptions {
                    value: config.particle_opacity,
                    random: true,
                    anim: OpacityAnimation {
                        enable: true,
                        speed: 1.0,
                        opacity_min: 0.1,
                        sync: false,
                    },
                },
                size: SizeOptions {
                    value: 3.0,
                    random: true,
                    anim: SizeAnimation {
                        enable: true,
                        speed: 2.0,
                        size_min: 0.1,
                        sync: false,
                    },
                },
                line_linked: LineLinked {
                    enable: desktop,
                    distance: 150.0,
                    color: config.particle_color.clone(),
                    opacity: 0.4,
                    width: 1.0,
                },
                motion: MoveOptions {
                    enable: true,
                    speed: speed_for(config, device),
                    direction: "none",
                    random: true,
                    straight: false,
                    out_mode: "out",
                    bounce: false,
                    attract: Attract {
                        enable: true,
                        rotate_x: 600.0,
                        rotate_y: 1_200.0,
                    },
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas",
                events: InteractivityEvents {
                    onhover: EventMode {
                        enable: true,
                        mode: "repulse",
                    },
                    onclick: EventMode {
                        enable: true,
                        mode: "push",
                    },
                    resize: true,
                },
                modes: InteractivityModes {
                    repulse: RepulseMode {
                        distance: 100.0,
                        duration: 0.4,
                    },
                    push: PushMode { particles_nb: 4 },
                },
            },
            retina_detect: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn narrow_viewport_halves_density_and_slows_motion() {
        let config = RuntimeConfig::default();

        assert_eq!(density_for(&config, DeviceClass::Desktop), 80);
        assert_eq!(density_for(&config, DeviceClass::Mobile), 40);
        assert_eq!(speed_for(&config, DeviceClass::Desktop), 2.0);
        assert!((speed_for(&config, DeviceClass::Mobile) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn mobile_speed_never_drops_below_one() {
        let config = RuntimeConfig {
            particle_speed: 0.5,
            ..RuntimeConfig::default()
        };
        assert_eq!(speed_for(&config, DeviceClass::Mobile), 1.0);
    }

    #[test]
    fn params_serialise_to_library_schema() {
        let params = ParticlesParams::for_device(&RuntimeConfig::default(), DeviceClass::Desktop);
        let value = serde_json::to_value(&params).expect("params serialise");

        assert_eq!(value["particles"]["number"]["value"], json!(80));
        assert_eq!(value["particles"]["shape"]["type"], json!("circle"));
        assert_eq!(value["particles"]["move"]["attract"]["rotateY"], json!(1200.0));
        assert_eq!(value["particles"]["line_linked"]["enable"], json!(true));
        assert_eq!(value["interactivity"]["modes"]["push"]["particles_nb"], json!(4));
        assert_eq!(value["retina_detect"], json!(true));
    }

    #[test]
    fn connecting_lines_are_desktop_only() {
        let params = ParticlesParams::for_device(&RuntimeConfig::default(), DeviceClass::Mobile);
        assert!(!params.particles.line_linked.enable);
    }
}
