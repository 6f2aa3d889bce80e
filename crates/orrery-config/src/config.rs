//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Scene roster and rendering parameters.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Hide and lock the cursor so pointer motion drives the camera.
    pub capture_cursor: bool,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Target frame rate. Animation is frame-locked, so this also sets the
    /// simulation speed. 0 disables the frame limiter.
    pub target_fps: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Background clear color (linear RGB).
    pub clear_color: [f32; 3],
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial yaw in degrees.
    pub yaw_degrees: f32,
    /// Initial pitch in degrees.
    pub pitch_degrees: f32,
    /// Initial distance from the origin.
    pub distance: f32,
    /// Closest allowed distance.
    pub min_distance: f32,
    /// Farthest allowed distance.
    pub max_distance: f32,
    /// Degrees of rotation per pixel of pointer motion.
    pub sensitivity: f32,
    /// Distance change per scroll notch.
    pub zoom_step: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

/// The light-emitting central body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SunConfig {
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Diffuse texture file name, relative to the texture directory.
    pub texture: Option<String>,
    /// Flat color used when the texture is missing.
    pub fallback_color: [f32; 3],
    /// Visual spin in degrees per frame.
    pub self_rotation_speed: f32,
}

/// Ring attached to a body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    /// Inner edge radius.
    pub inner_radius: f32,
    /// Outer edge radius.
    pub outer_radius: f32,
    /// Optional ring texture file name.
    pub texture: Option<String>,
    /// Tint used when no texture is present.
    pub color: [f32; 3],
    /// Axial tilt of the ring plane in degrees (about X).
    pub tilt_degrees: f32,
}

/// One orbiting body of the roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    /// Unique name; other bodies refer to it through `host`.
    pub name: String,
    /// Distance from the parent frame's origin.
    pub orbit_radius: f32,
    /// Sphere radius.
    pub visual_radius: f32,
    /// Orbital advance in degrees per frame.
    pub orbit_speed: f32,
    /// Spin in degrees per frame.
    pub self_rotation_speed: f32,
    /// Diffuse texture file name.
    pub texture: Option<String>,
    /// Normal map file name. At most one body may set this.
    pub normal_map: Option<String>,
    /// Flat color used when the diffuse texture is missing.
    pub fallback_color: [f32; 3],
    /// Name of the body this one orbits. `None` orbits the sun.
    pub host: Option<String>,
    /// Optional ring.
    pub ring: Option<RingConfig>,
}

/// Scene roster and rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory texture file names are resolved against.
    pub texture_dir: PathBuf,
    /// Panoramic background texture. `None` disables the skybox.
    pub skybox_texture: Option<String>,
    /// Radius of the skybox sphere.
    pub skybox_radius: f32,
    /// The central light emitter.
    pub sun: SunConfig,
    /// Bodies in draw order.
    pub bodies: Vec<BodyConfig>,
    /// Draw the orbit-path overlay.
    pub show_orbits: bool,
    /// Color of the orbit-path overlay.
    pub orbit_color: [f32; 3],
    /// Line segments per orbit loop.
    pub orbit_segments: u32,
    /// Angular segments of ring strips.
    pub ring_segments: u32,
    /// Longitude/latitude subdivisions of body spheres.
    pub sphere_segments: u32,
    /// Ambient factor of the normal-mapped shading model.
    pub ambient: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// When non-zero, run this many frames without a window and exit.
    pub headless_frames: u32,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            title: "Orrery".to_string(),
            capture_cursor: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            vsync: true,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw_degrees: 180.0,
            pitch_degrees: 10.0,
            distance: 80.0,
            min_distance: 5.0,
            max_distance: 100.0,
            sensitivity: 0.2,
            zoom_step: 2.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            texture: Some("sol.jpg".to_string()),
            fallback_color: [1.0, 1.0, 0.0],
            self_rotation_speed: 0.0,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_radius: 1.6,
            outer_radius: 2.8,
            texture: None,
            color: [0.82, 0.74, 0.58],
            tilt_degrees: 26.7,
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            orbit_radius: 0.0,
            visual_radius: 1.0,
            orbit_speed: 0.0,
            self_rotation_speed: 0.0,
            texture: None,
            normal_map: None,
            fallback_color: [0.6, 0.6, 0.6],
            host: None,
            ring: None,
        }
    }
}

impl BodyConfig {
    /// A first-order body orbiting the sun.
    pub fn planet(
        name: &str,
        orbit_radius: f32,
        visual_radius: f32,
        orbit_speed: f32,
        texture: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            orbit_radius,
            visual_radius,
            orbit_speed,
            texture: Some(texture.to_string()),
            ..Self::default()
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let earth = BodyConfig {
            self_rotation_speed: 1.0,
            normal_map: Some("normal_map_earth.tif".to_string()),
            ..BodyConfig::planet("earth", 8.0, 0.8, 0.8, "earth.jpg")
        };
        let saturn = BodyConfig {
            ring: Some(RingConfig::default()),
            ..BodyConfig::planet("saturn", 26.0, 1.2, 0.25, "8k_saturn.jpg")
        };
        let moon = BodyConfig {
            host: Some("earth".to_string()),
            fallback_color: [0.8, 0.8, 0.8],
            ..BodyConfig::planet("moon", 1.5, 0.3, 2.0, "8k_moon.jpg")
        };

        Self {
            texture_dir: PathBuf::from("textures"),
            skybox_texture: Some("8k_stars_milky_way.jpg".to_string()),
            skybox_radius: 200.0,
            sun: SunConfig::default(),
            bodies: vec![
                BodyConfig::planet("mercury", 3.5, 0.25, 1.6, "8k_mercury.jpg"),
                BodyConfig::planet("venus", 5.5, 0.45, 1.2, "8k_venus_surface.jpg"),
                earth,
                moon,
                BodyConfig::planet("mars", 13.0, 0.6, 0.5, "8k_mars.jpg"),
                BodyConfig::planet("jupiter", 20.0, 1.5, 0.3, "8k_jupiter.jpg"),
                saturn,
                BodyConfig::planet("uranus", 31.0, 0.9, 0.2, "2k_uranus.jpg"),
                BodyConfig::planet("neptune", 36.0, 0.85, 0.18, "2k_neptune.jpg"),
            ],
            show_orbits: true,
            orbit_color: [0.6, 0.6, 0.6],
            orbit_segments: 128,
            ring_segments: 128,
            sphere_segments: 64,
            ambient: 0.05,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            headless_frames: 0,
        }
    }
}

/// Platform config directory for the orrery (`<config>/orrery`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("orrery"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

impl SceneConfig {
    /// Resolve a texture file name against the texture directory.
    pub fn texture_path(&self, file_name: &str) -> PathBuf {
        self.texture_dir.join(file_name)
    }
}
