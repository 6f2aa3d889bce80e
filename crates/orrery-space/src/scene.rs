//! Scene assembly, per-frame animation and draw order.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use orrery_config::{BodyConfig, SceneConfig};
use orrery_lighting::LightingPipeline;
use orrery_render::{
    DrawCommand, MeshHandle, OrbitCamera, RenderBackend, RenderError, ScopedState,
    SphereOrientation, TextureHandle, TextureUsage, uv_sphere,
};

use crate::body::{CelestialBody, LightEmitter, Surface};
use crate::error::SceneError;
use crate::orbit::OrbitOverlay;
use crate::ring::RingRenderer;
use crate::skybox::SkyboxRenderer;

/// The sun, its bodies in draw order, and the background.
///
/// The camera is not part of the scene; it is passed to
/// [`render`](Self::render) each frame.
#[derive(Debug)]
pub struct Scene {
    sun: LightEmitter,
    bodies: Vec<CelestialBody>,
    sphere: MeshHandle,
    skybox: Option<SkyboxRenderer>,
    orbits: Option<OrbitOverlay>,
    lighting: LightingPipeline,
}

impl Scene {
    /// Validate the roster, load textures and upload meshes.
    ///
    /// Missing textures are not errors: the affected body falls back to a
    /// flat color (or to the unlit path when only its normal map is missing).
    pub fn build<B: RenderBackend + ?Sized>(
        config: &SceneConfig,
        backend: &mut B,
    ) -> Result<Self, SceneError> {
        let hosts = resolve_hosts(&config.bodies)?;
        check_single_normal_map(&config.bodies)?;

        let lighting = LightingPipeline::new(backend, config.ambient)?;

        let segments = config.sphere_segments.max(3);
        let sphere_data = uv_sphere(
            segments,
            (segments / 2).max(2),
            SphereOrientation::Outside,
        );
        let sphere = backend.upload_mesh("body-sphere", &sphere_data);

        let sun_texture = config.sun.texture.as_deref();
        let sun_diffuse = load_optional(backend, config, "sun", sun_texture, TextureUsage::Color);
        let sun = LightEmitter {
            position: Vec3::ZERO,
            radius: config.sun.radius,
            surface: Surface::resolve(sun_diffuse, None, config.sun.fallback_color),
            self_rotation_speed: config.sun.self_rotation_speed,
            self_phase: 0.0,
        };

        let mut bodies = Vec::with_capacity(config.bodies.len());
        for (body_config, host) in config.bodies.iter().zip(hosts) {
            bodies.push(build_body(backend, config, body_config, host));
        }

        let skybox = config.skybox_texture.as_deref().and_then(|file| {
            let path = config.texture_path(file);
            SkyboxRenderer::load(backend, &path, config.skybox_radius, segments)
        });
        if config.skybox_texture.is_none() {
            log::info!("No skybox texture configured, skipping skybox");
        }

        let orbits = config
            .show_orbits
            .then(|| OrbitOverlay::new(backend, config.orbit_segments, config.orbit_color));

        log::info!(
            "Scene built: {} bodies, skybox {}, orbits {}",
            bodies.len(),
            if skybox.is_some() { "on" } else { "off" },
            if orbits.is_some() { "on" } else { "off" },
        );

        Ok(Self {
            sun,
            bodies,
            sphere,
            skybox,
            orbits,
            lighting,
        })
    }

    pub fn sun(&self) -> &LightEmitter {
        &self.sun
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body_index(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn has_skybox(&self) -> bool {
        self.skybox.is_some()
    }

    pub fn shows_orbits(&self) -> bool {
        self.orbits.is_some()
    }

    pub fn lighting(&self) -> &LightingPipeline {
        &self.lighting
    }

    /// Advance every phase by one frame's increment.
    pub fn tick(&mut self) {
        self.sun.tick();
        for body in &mut self.bodies {
            body.tick();
        }
    }

    /// `orbital_frame(host) · R_y(orbital_phase) · T(orbit_radius, 0, 0)`,
    /// with the sun's frame as the identity. Independent of any
    /// self-rotation.
    pub fn orbital_frame(&self, index: usize) -> Option<Mat4> {
        let body = self.bodies.get(index)?;
        Some(self.parent_frame(index)? * body.local_orbital_frame())
    }

    /// The frame a body orbits in: its host's orbital frame, or the sun's.
    pub fn parent_frame(&self, index: usize) -> Option<Mat4> {
        match self.bodies.get(index)?.host {
            Some(host) => self.orbital_frame(host),
            None => Some(Mat4::IDENTITY),
        }
    }

    /// `orbital_frame · R_y(self_phase)`, before scaling by the visual radius.
    pub fn world_transform(&self, index: usize) -> Option<Mat4> {
        let body = self.bodies.get(index)?;
        Some(self.orbital_frame(index)? * body.self_rotation())
    }

    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.orbital_frame(index)
            .map(|frame| frame.transform_point3(Vec3::ZERO))
    }

    /// Issue one frame's draws: skybox, light, sun, orbit overlay, then each
    /// body in order followed by its ring.
    pub fn render<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        camera: &OrbitCamera,
    ) -> Result<(), RenderError> {
        let view = camera.view_matrix();
        backend.set_camera(view, camera.projection_matrix());

        if let Some(skybox) = &self.skybox {
            skybox.render(backend)?;
        }

        self.lighting.update(view, self.sun.position);
        self.lighting.bind(backend);

        self.draw_sphere(backend, self.sun.surface, self.sun.model_matrix())?;

        if let Some(orbits) = &self.orbits {
            let placements = (0..self.bodies.len()).filter_map(|index| {
                Some((self.parent_frame(index)?, self.bodies[index].orbit_radius))
            });
            orbits.render(backend, placements)?;
        }

        for index in 0..self.bodies.len() {
            let body = &self.bodies[index];
            let Some(frame) = self.orbital_frame(index) else {
                continue;
            };
            let model = frame
                * body.self_rotation()
                * Mat4::from_scale(Vec3::splat(body.visual_radius));
            self.draw_sphere(backend, body.surface, model)?;
            if let Some(ring) = &body.ring {
                ring.render(backend, frame)?;
            }
        }
        Ok(())
    }

    fn draw_sphere<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        surface: Surface,
        model: Mat4,
    ) -> Result<(), RenderError> {
        let command = DrawCommand::new(self.sphere, model);
        match surface {
            Surface::NormalMapped {
                diffuse,
                normal_map,
            } => self.lighting.draw(
                backend,
                command
                    .with_diffuse(Some(diffuse))
                    .with_normal_map(Some(normal_map)),
            ),
            Surface::Textured(diffuse) => {
                let mut scoped = backend.scoped_state(|state| {
                    state.program = None;
                    state.texturing = true;
                    state.lighting = false;
                });
                scoped.draw(command.with_diffuse(Some(diffuse)))
            }
            Surface::Flat(color) => {
                let mut scoped = backend.scoped_state(|state| {
                    state.program = None;
                    state.texturing = false;
                    state.lighting = false;
                });
                scoped.draw(command.with_color([color[0], color[1], color[2], 1.0]))
            }
        }
    }
}

fn build_body<B: RenderBackend + ?Sized>(
    backend: &mut B,
    scene: &SceneConfig,
    config: &BodyConfig,
    host: Option<usize>,
) -> CelestialBody {
    let name = config.name.as_str();
    let diffuse =
        load_optional(backend, scene, name, config.texture.as_deref(), TextureUsage::Color);
    let normal_map =
        load_optional(backend, scene, name, config.normal_map.as_deref(), TextureUsage::Data);

    if config.texture.is_some() && diffuse.is_none() {
        log::info!("Body '{name}' has no diffuse texture, drawing flat");
    } else if config.normal_map.is_some() && normal_map.is_none() {
        log::info!("Body '{name}' has no normal map, drawing unlit");
    }

    let ring = config.ring.as_ref().map(|ring| {
        let label = format!("{name}-ring");
        let texture =
            load_optional(backend, scene, &label, ring.texture.as_deref(), TextureUsage::Color);
        RingRenderer::new(
            backend,
            &label,
            ring,
            scene.ring_segments,
            texture,
        )
    });

    CelestialBody {
        name: config.name.clone(),
        orbit_radius: config.orbit_radius,
        visual_radius: config.visual_radius,
        orbit_speed: config.orbit_speed,
        self_rotation_speed: config.self_rotation_speed,
        surface: Surface::resolve(diffuse, normal_map, config.fallback_color),
        host,
        ring,
        orbital_phase: 0.0,
        self_phase: 0.0,
    }
}

/// Load `file` from the texture directory, warning once on behalf of `owner`.
fn load_optional<B: RenderBackend + ?Sized>(
    backend: &mut B,
    scene: &SceneConfig,
    owner: &str,
    file: Option<&str>,
    usage: TextureUsage,
) -> Option<TextureHandle> {
    let path = scene.texture_path(file?);
    let handle = backend.load_texture(&path, usage);
    if handle.is_none() {
        log::warn!("'{owner}': texture {} failed to load", path.display());
    }
    handle
}

/// Map host names to indices, rejecting duplicates, unknown hosts and
/// cycles.
fn resolve_hosts(bodies: &[BodyConfig]) -> Result<Vec<Option<usize>>, SceneError> {
    let mut by_name = HashMap::with_capacity(bodies.len());
    for (index, body) in bodies.iter().enumerate() {
        if by_name.insert(body.name.as_str(), index).is_some() {
            return Err(SceneError::DuplicateBody(body.name.clone()));
        }
    }

    let hosts = bodies
        .iter()
        .map(|body| {
            body.host
                .as_deref()
                .map(|host| {
                    by_name
                        .get(host)
                        .copied()
                        .ok_or_else(|| SceneError::UnknownHost {
                            body: body.name.clone(),
                            host: host.to_string(),
                        })
                })
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (index, body) in bodies.iter().enumerate() {
        let mut current = hosts[index];
        let mut steps = 0;
        while let Some(host) = current {
            steps += 1;
            if host == index || steps > bodies.len() {
                return Err(SceneError::HostCycle(body.name.clone()));
            }
            current = hosts[host];
        }
    }
    Ok(hosts)
}

fn check_single_normal_map(bodies: &[BodyConfig]) -> Result<(), SceneError> {
    let mut mapped = bodies.iter().filter(|b| b.normal_map.is_some());
    if let (Some(first), Some(second)) = (mapped.next(), mapped.next()) {
        return Err(SceneError::MultipleNormalMapped {
            first: first.name.clone(),
            second: second.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;
    use std::sync::Once;
    use orrery_config::{CameraConfig, RingConfig};
    use orrery_render::{
        BlendMode, CullMode, RecordingBackend, RenderState, TextureAvailability, Topology,
    };

    fn all_textures() -> RecordingBackend {
        RecordingBackend::new().with_texture_availability(TextureAvailability::All)
    }

    fn no_textures() -> RecordingBackend {
        RecordingBackend::new().with_available_textures(Vec::<&Path>::new())
    }

    fn solo(body: BodyConfig) -> SceneConfig {
        SceneConfig {
            bodies: vec![body],
            ..SceneConfig::default()
        }
    }

    fn earth_and_moon(earth_self_speed: f32) -> SceneConfig {
        let earth = BodyConfig {
            self_rotation_speed: earth_self_speed,
            ..BodyConfig::planet("earth", 8.0, 0.8, 0.8, "earth.jpg")
        };
        let moon = BodyConfig {
            host: Some("earth".to_string()),
            ..BodyConfig::planet("moon", 1.5, 0.3, 2.0, "moon.jpg")
        };
        SceneConfig {
            bodies: vec![earth, moon],
            ..SceneConfig::default()
        }
    }

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default())
    }

    thread_local! {
        static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    struct WarningCapture;

    impl log::Log for WarningCapture {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: WarningCapture = WarningCapture;

    /// Warnings logged on this thread while `f` runs.
    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&CAPTURE);
            log::set_max_level(log::LevelFilter::Warn);
        });
        WARNINGS.with(|w| w.borrow_mut().clear());
        let result = f();
        (result, WARNINGS.with(|w| w.take()))
    }

    #[test]
    fn test_failed_texture_warns_once_naming_body() {
        let earth = BodyConfig {
            normal_map: Some("earth_normal.tif".to_string()),
            ..BodyConfig::planet("earth", 8.0, 0.8, 0.8, "earth.jpg")
        };
        let mut config = solo(earth);
        config.sun.texture = None;
        config.skybox_texture = None;

        let mut backend = no_textures();
        let (scene, warnings) = warnings_during(|| Scene::build(&config, &mut backend));
        assert!(scene.is_ok());
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings.iter().all(|w| w.contains("'earth'")), "{warnings:?}");
        assert!(warnings[0].contains("earth.jpg"));
        assert!(warnings[1].contains("earth_normal.tif"));
    }

    #[test]
    fn test_default_roster_builds() {
        let mut backend = all_textures();
        let scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        assert_eq!(scene.bodies().len(), 9);
        assert!(scene.has_skybox());
        assert!(scene.shows_orbits());
        let earth = scene.body("earth").unwrap();
        assert!(matches!(earth.surface(), Surface::NormalMapped { .. }));
        assert_eq!(scene.body("moon").unwrap().host(), scene.body_index("earth"));
        assert!(scene.body("saturn").unwrap().has_ring());
    }

    #[test]
    fn test_phase_after_n_ticks() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&earth_and_moon(1.0), &mut backend).unwrap();
        for _ in 0..450 {
            scene.tick();
        }
        let moon = scene.body("moon").unwrap();
        assert!((moon.orbital_phase() - (450.0 * 2.0) % 360.0).abs() < 1e-3);
        let earth = scene.body("earth").unwrap();
        assert!((earth.self_phase() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_first_order_body_world_position() {
        let mut backend = all_textures();
        let scene = Scene::build(&earth_and_moon(0.0), &mut backend).unwrap();
        let p = scene.world_position(0).unwrap();
        assert!((p - Vec3::new(8.0, 0.0, 0.0)).length() < 1e-5);
        let moon = scene.world_position(1).unwrap();
        assert!((moon - Vec3::new(9.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_moon_ignores_host_self_rotation() {
        let mut still = Scene::build(&earth_and_moon(0.0), &mut all_textures()).unwrap();
        let mut spinning = Scene::build(&earth_and_moon(7.0), &mut all_textures()).unwrap();
        for _ in 0..37 {
            still.tick();
            spinning.tick();
        }
        let a = still.world_position(1).unwrap();
        let b = spinning.world_position(1).unwrap();
        assert!((a - b).length() < 1e-5);
        assert_ne!(
            still.world_transform(0).unwrap(),
            spinning.world_transform(0).unwrap()
        );
    }

    #[test]
    fn test_moon_follows_host_orbit() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&earth_and_moon(0.0), &mut backend).unwrap();
        for _ in 0..10 {
            scene.tick();
        }
        let earth = scene.world_position(0).unwrap();
        let moon = scene.world_position(1).unwrap();
        assert!(((moon - earth).length() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_missing_texture_draws_flat() {
        let body = BodyConfig {
            fallback_color: [0.3, 0.4, 0.5],
            ..BodyConfig::planet("mars", 13.0, 0.6, 0.5, "mars.jpg")
        };
        let mut backend = no_textures();
        let mut scene = Scene::build(&solo(body), &mut backend).unwrap();
        assert_eq!(scene.bodies()[0].surface(), Surface::Flat([0.3, 0.4, 0.5]));
        assert!(!scene.has_skybox());

        scene.render(&mut backend, &camera()).unwrap();
        let draw = backend.draws().last().unwrap();
        assert_eq!(draw.command.color, [0.3, 0.4, 0.5, 1.0]);
        assert_eq!(draw.command.diffuse, None);
        assert!(!draw.state.texturing);
    }

    #[test]
    fn test_untextured_body_draws_flat() {
        let body = BodyConfig {
            name: "rock".to_string(),
            orbit_radius: 4.0,
            ..BodyConfig::default()
        };
        let mut backend = all_textures();
        let scene = Scene::build(&solo(body), &mut backend).unwrap();
        assert_eq!(scene.bodies()[0].surface(), Surface::Flat([0.6; 3]));
    }

    #[test]
    fn test_missing_normal_map_falls_back_to_unlit() {
        let earth = BodyConfig {
            normal_map: Some("earth_normal.tif".to_string()),
            ..BodyConfig::planet("earth", 8.0, 0.8, 0.8, "earth.jpg")
        };
        let config = solo(earth);
        let available = [config.texture_dir.join("earth.jpg")];
        let mut backend = RecordingBackend::new().with_available_textures(available);
        let scene = Scene::build(&config, &mut backend).unwrap();
        assert!(matches!(scene.bodies()[0].surface(), Surface::Textured(_)));
    }

    #[test]
    fn test_render_order() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        scene.render(&mut backend, &camera()).unwrap();

        let labels: Vec<&str> = backend.draws().iter().map(|d| d.mesh_label.as_str()).collect();
        assert_eq!(labels[0], "skybox");
        assert_eq!(labels[1], "body-sphere");
        assert!(labels[2..11].iter().all(|l| *l == "orbit-loop"));
        assert!(labels[11..20].iter().all(|l| *l != "orbit-loop"));
        let saturn_sphere = labels.len() - 4;
        assert_eq!(labels[saturn_sphere], "body-sphere");
        assert_eq!(labels[saturn_sphere + 1], "saturn-ring");
        assert_eq!(labels.len(), 1 + 1 + 9 + 9 + 1);
    }

    #[test]
    fn test_render_leaves_state_untouched() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        let before = backend.state();
        scene.render(&mut backend, &camera()).unwrap();
        assert_eq!(backend.state(), before);
        assert_eq!(before, RenderState::default());
    }

    #[test]
    fn test_normal_mapped_body_uses_program() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        scene.render(&mut backend, &camera()).unwrap();

        let program = scene.lighting().program();
        let mapped: Vec<_> = backend
            .draws()
            .iter()
            .filter(|d| d.state.program == Some(program))
            .collect();
        assert_eq!(mapped.len(), 1);
        assert!(mapped[0].command.normal_map.is_some());
        assert!(mapped[0].command.diffuse.is_some());
    }

    #[test]
    fn test_light_is_sun_in_view_space() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        let camera = camera();
        scene.render(&mut backend, &camera).unwrap();

        let light = backend.light();
        let expected = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((light.position_view - expected).length() < 1e-4);
        assert_eq!(light.ambient, 0.05);
        assert!((light.position_view.length() - camera.distance()).abs() < 1e-3);
    }

    #[test]
    fn test_ring_draw_uses_tilted_orbital_frame() {
        let saturn = BodyConfig {
            self_rotation_speed: 5.0,
            ring: Some(RingConfig::default()),
            ..BodyConfig::planet("saturn", 26.0, 1.2, 0.25, "saturn.jpg")
        };
        let mut backend = all_textures();
        let mut scene = Scene::build(&solo(saturn), &mut backend).unwrap();
        for _ in 0..3 {
            scene.tick();
        }
        scene.render(&mut backend, &camera()).unwrap();

        let ring = backend.draws().last().unwrap();
        assert_eq!(ring.topology, Topology::TriangleStrip);
        assert_eq!(ring.state.blend, BlendMode::Alpha);
        assert_eq!(ring.state.cull, CullMode::None);
        let expected = scene.orbital_frame(0).unwrap()
            * Mat4::from_rotation_x(26.7f32.to_radians());
        assert!(ring.command.model.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_orbits_can_be_disabled() {
        let config = SceneConfig {
            show_orbits: false,
            ..SceneConfig::default()
        };
        let mut backend = all_textures();
        let mut scene = Scene::build(&config, &mut backend).unwrap();
        scene.render(&mut backend, &camera()).unwrap();
        assert!(backend.draws().iter().all(|d| d.mesh_label != "orbit-loop"));
    }

    #[test]
    fn test_moon_orbit_drawn_in_host_frame() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&earth_and_moon(0.0), &mut backend).unwrap();
        scene.tick();
        scene.render(&mut backend, &camera()).unwrap();

        let orbits: Vec<_> = backend
            .draws()
            .iter()
            .filter(|d| d.mesh_label == "orbit-loop")
            .collect();
        assert_eq!(orbits.len(), 2);
        let center = orbits[1].command.model.transform_point3(Vec3::ZERO);
        let earth = scene.world_position(0).unwrap();
        assert!((center - earth).length() < 1e-4);
    }

    #[test]
    fn test_failed_draw_stops_frame_and_restores_state() {
        let mut backend = all_textures();
        let mut scene = Scene::build(&SceneConfig::default(), &mut backend).unwrap();
        backend.fail_next_draw(RenderError::UnknownMesh(MeshHandle(99)));
        assert!(scene.render(&mut backend, &camera()).is_err());
        assert!(backend.draws().is_empty());
        assert_eq!(backend.state(), RenderState::default());
    }

    #[test]
    fn test_unknown_host_is_rejected() {
        let moon = BodyConfig {
            host: Some("earth".to_string()),
            ..BodyConfig::planet("moon", 1.5, 0.3, 2.0, "moon.jpg")
        };
        let err = Scene::build(&solo(moon), &mut all_textures()).unwrap_err();
        assert!(matches!(err, SceneError::UnknownHost { ref host, .. } if host == "earth"));
    }

    #[test]
    fn test_self_host_is_rejected() {
        let body = BodyConfig {
            host: Some("loop".to_string()),
            ..BodyConfig::planet("loop", 1.0, 0.3, 1.0, "x.jpg")
        };
        let err = Scene::build(&solo(body), &mut all_textures()).unwrap_err();
        assert!(matches!(err, SceneError::HostCycle(_)));
    }

    #[test]
    fn test_host_cycle_is_rejected() {
        let a = BodyConfig {
            host: Some("b".to_string()),
            ..BodyConfig::planet("a", 1.0, 0.3, 1.0, "a.jpg")
        };
        let b = BodyConfig {
            host: Some("a".to_string()),
            ..BodyConfig::planet("b", 1.0, 0.3, 1.0, "b.jpg")
        };
        let config = SceneConfig {
            bodies: vec![a, b],
            ..SceneConfig::default()
        };
        let err = Scene::build(&config, &mut all_textures()).unwrap_err();
        assert!(matches!(err, SceneError::HostCycle(_)));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let config = SceneConfig {
            bodies: vec![
                BodyConfig::planet("twin", 3.0, 0.3, 1.0, "a.jpg"),
                BodyConfig::planet("twin", 5.0, 0.3, 1.0, "b.jpg"),
            ],
            ..SceneConfig::default()
        };
        let err = Scene::build(&config, &mut all_textures()).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateBody(ref name) if name == "twin"));
    }

    #[test]
    fn test_second_normal_map_is_rejected() {
        let mapped = |name: &str| BodyConfig {
            normal_map: Some(format!("{name}_n.tif")),
            ..BodyConfig::planet(name, 3.0, 0.3, 1.0, "a.jpg")
        };
        let config = SceneConfig {
            bodies: vec![mapped("one"), mapped("two")],
            ..SceneConfig::default()
        };
        let err = Scene::build(&config, &mut all_textures()).unwrap_err();
        assert!(matches!(err, SceneError::MultipleNormalMapped { .. }));
    }

    #[test]
    fn test_shader_failure_is_fatal() {
        let mut backend = all_textures();
        backend.fail_program(LightingPipeline::PROGRAM_NAME);
        let err = Scene::build(&SceneConfig::default(), &mut backend).unwrap_err();
        assert!(matches!(err, SceneError::Shader(_)));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut backend = all_textures();
        let scene = Scene::build(&earth_and_moon(0.0), &mut backend).unwrap();
        assert!(scene.orbital_frame(5).is_none());
        assert!(scene.world_transform(5).is_none());
    }
}
