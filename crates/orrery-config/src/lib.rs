//! Configuration system for the orrery.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! including the body roster of the scene. Supports CLI overrides via clap
//! and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, CameraConfig, Config, DebugConfig, RenderConfig, RingConfig, SceneConfig,
    SunConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
