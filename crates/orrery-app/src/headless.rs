//! Windowless runs against the recording backend.

use glam::Vec3;
use orrery_config::Config;
use orrery_render::{OrbitCamera, RecordingBackend};
use orrery_space::Scene;
use tracing::info;

use crate::error::AppError;

/// What a headless run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub frames: u32,
    /// Draws issued in the last frame.
    pub draws_per_frame: usize,
    pub total_draws: usize,
    /// World position of each body after the last tick, in draw order.
    pub body_positions: Vec<(String, Vec3)>,
}

/// Build the scene without a GPU, then render and tick `frames` times.
/// Textures load if the files exist; missing ones fall back as usual.
pub fn run_headless(config: &Config, frames: u32) -> Result<HeadlessReport, AppError> {
    let mut backend = RecordingBackend::new();
    run_with_backend(config, frames, &mut backend)
}

pub(crate) fn run_with_backend(
    config: &Config,
    frames: u32,
    backend: &mut RecordingBackend,
) -> Result<HeadlessReport, AppError> {
    let mut scene = Scene::build(&config.scene, backend)?;
    let mut camera = OrbitCamera::from_config(&config.camera);
    camera.set_aspect_ratio(config.window.width as f32, config.window.height as f32);

    let mut total_draws = 0;
    let mut draws_per_frame = 0;
    for _ in 0..frames {
        backend.clear_draws();
        scene.render(backend, &camera)?;
        scene.tick();
        draws_per_frame = backend.draws().len();
        total_draws += draws_per_frame;
    }

    let body_positions: Vec<(String, Vec3)> = scene
        .bodies()
        .iter()
        .enumerate()
        .filter_map(|(index, body)| {
            scene
                .world_position(index)
                .map(|p| (body.name().to_string(), p))
        })
        .collect();

    info!(
        frames,
        draws_per_frame,
        total_draws,
        meshes = backend.mesh_count(),
        "Headless run finished"
    );
    for (name, position) in &body_positions {
        info!(
            "{name}: ({:.3}, {:.3}, {:.3})",
            position.x, position.y, position.z
        );
    }

    Ok(HeadlessReport {
        frames,
        draws_per_frame,
        total_draws,
        body_positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_render::TextureAvailability;

    fn config_without_textures() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.texture_dir = dir.path().join("missing");
        (dir, config)
    }

    #[test]
    fn test_headless_without_textures() {
        let (_dir, config) = config_without_textures();
        let report = run_headless(&config, 3).unwrap();
        assert_eq!(report.frames, 3);
        // sun + 9 orbits + 9 bodies + 1 ring, no skybox
        assert_eq!(report.draws_per_frame, 20);
        assert_eq!(report.total_draws, 60);
        assert_eq!(report.body_positions.len(), 9);
    }

    #[test]
    fn test_headless_with_textures_draws_skybox() {
        let mut backend =
            RecordingBackend::new().with_texture_availability(TextureAvailability::All);
        let report = run_with_backend(&Config::default(), 1, &mut backend).unwrap();
        assert_eq!(report.draws_per_frame, 21);
    }

    #[test]
    fn test_positions_reflect_ticks() {
        let (_dir, config) = config_without_textures();
        let report = run_headless(&config, 1).unwrap();
        let (name, mercury) = &report.body_positions[0];
        assert_eq!(name, "mercury");
        let expected = glam::Mat4::from_rotation_y(1.6f32.to_radians())
            .transform_point3(Vec3::new(3.5, 0.0, 0.0));
        assert!((*mercury - expected).length() < 1e-4);
    }

    #[test]
    fn test_zero_frames() {
        let (_dir, config) = config_without_textures();
        let report = run_headless(&config, 0).unwrap();
        assert_eq!(report.total_draws, 0);
        assert_eq!(report.body_positions.len(), 9);
    }

    #[test]
    fn test_bad_roster_is_reported() {
        let (_dir, mut config) = config_without_textures();
        config.scene.bodies[3].host = Some("pluto".to_string());
        assert!(matches!(
            run_headless(&config, 1),
            Err(AppError::Scene(_))
        ));
    }
}
