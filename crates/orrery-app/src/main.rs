//! The `orrery` binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags, e.g. `orrery --width 1280 --height 800 --textures ./textures`.
//! `orrery --headless-frames 120` runs the scene without a window.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{AppError, run, run_headless};
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config loaded from {}", config_dir.display());

    match start(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn start(config: &Config) -> Result<(), AppError> {
    let frames = config.debug.headless_frames;
    if frames > 0 {
        let report = run_headless(config, frames)?;
        info!(
            "Headless: {} frames, {} draws per frame",
            report.frames, report.draws_per_frame
        );
        return Ok(());
    }
    run(config.clone())
}
