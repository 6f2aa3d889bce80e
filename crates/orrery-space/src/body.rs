//! Celestial bodies and the light-emitting sun.

use glam::{Mat4, Vec3};
use orrery_render::{TextureHandle, wrap_degrees};

use crate::ring::RingRenderer;

/// Advance a phase in degrees by `speed` and wrap it into `[0, 360)`.
pub fn advance_phase(phase: f32, speed: f32) -> f32 {
    wrap_degrees(phase + speed)
}

/// How a sphere is shaded, resolved once from what actually loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Untextured, drawn in the given linear RGB color.
    Flat([f32; 3]),
    /// Unlit diffuse texture.
    Textured(TextureHandle),
    /// Drawn through the lighting pipeline.
    NormalMapped {
        diffuse: TextureHandle,
        normal_map: TextureHandle,
    },
}

impl Surface {
    pub fn resolve(
        diffuse: Option<TextureHandle>,
        normal_map: Option<TextureHandle>,
        fallback_color: [f32; 3],
    ) -> Self {
        match (diffuse, normal_map) {
            (Some(diffuse), Some(normal_map)) => Surface::NormalMapped {
                diffuse,
                normal_map,
            },
            (Some(diffuse), None) => Surface::Textured(diffuse),
            (None, _) => Surface::Flat(fallback_color),
        }
    }
}

/// An orbiting body with its animation phases.
#[derive(Debug)]
pub struct CelestialBody {
    pub(crate) name: String,
    pub(crate) orbit_radius: f32,
    pub(crate) visual_radius: f32,
    /// Degrees per frame.
    pub(crate) orbit_speed: f32,
    /// Degrees per frame.
    pub(crate) self_rotation_speed: f32,
    pub(crate) surface: Surface,
    /// Index of the host body; `None` orbits the sun.
    pub(crate) host: Option<usize>,
    pub(crate) ring: Option<RingRenderer>,
    pub(crate) orbital_phase: f32,
    pub(crate) self_phase: f32,
}

impl CelestialBody {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn visual_radius(&self) -> f32 {
        self.visual_radius
    }

    pub fn orbital_phase(&self) -> f32 {
        self.orbital_phase
    }

    pub fn self_phase(&self) -> f32 {
        self.self_phase
    }

    pub fn host(&self) -> Option<usize> {
        self.host
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }

    pub fn tick(&mut self) {
        self.orbital_phase = advance_phase(self.orbital_phase, self.orbit_speed);
        self.self_phase = advance_phase(self.self_phase, self.self_rotation_speed);
    }

    /// `R_y(orbital_phase) · T(orbit_radius, 0, 0)`, relative to the host's
    /// orbital frame.
    pub fn local_orbital_frame(&self) -> Mat4 {
        Mat4::from_rotation_y(self.orbital_phase.to_radians())
            * Mat4::from_translation(Vec3::new(self.orbit_radius, 0.0, 0.0))
    }

    pub fn self_rotation(&self) -> Mat4 {
        Mat4::from_rotation_y(self.self_phase.to_radians())
    }
}

/// The sun: a fixed point light with an unlit sphere drawn at its position.
#[derive(Debug, Clone)]
pub struct LightEmitter {
    pub position: Vec3,
    pub radius: f32,
    pub surface: Surface,
    pub self_rotation_speed: f32,
    pub self_phase: f32,
}

impl LightEmitter {
    pub fn tick(&mut self) {
        self.self_phase = advance_phase(self.self_phase, self.self_rotation_speed);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.self_phase.to_radians())
            * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(orbit_speed: f32, self_rotation_speed: f32) -> CelestialBody {
        CelestialBody {
            name: "test".to_string(),
            orbit_radius: 10.0,
            visual_radius: 1.0,
            orbit_speed,
            self_rotation_speed,
            surface: Surface::Flat([1.0; 3]),
            host: None,
            ring: None,
            orbital_phase: 0.0,
            self_phase: 0.0,
        }
    }

    #[test]
    fn test_advance_phase_wraps() {
        assert_eq!(advance_phase(359.0, 2.0), 1.0);
        assert_eq!(advance_phase(10.0, 0.0), 10.0);
        assert_eq!(advance_phase(1.0, -2.0), 359.0);
    }

    #[test]
    fn test_phase_stays_in_range() {
        let mut phase = 0.0;
        for _ in 0..10_000 {
            phase = advance_phase(phase, 7.3);
            assert!((0.0..360.0).contains(&phase));
        }
    }

    #[test]
    fn test_tick_advances_both_phases() {
        let mut b = body(0.8, 1.0);
        for _ in 0..500 {
            b.tick();
        }
        assert!((b.orbital_phase() - 40.0).abs() < 0.05);
        assert_eq!(b.self_phase(), 140.0);
    }

    #[test]
    fn test_local_frame_at_zero_phase() {
        let b = body(0.0, 0.0);
        let p = b.local_orbital_frame().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_local_frame_quarter_turn() {
        let mut b = body(90.0, 0.0);
        b.tick();
        let p = b.local_orbital_frame().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_surface_resolution() {
        let d = TextureHandle(0);
        let n = TextureHandle(1);
        assert_eq!(
            Surface::resolve(Some(d), Some(n), [0.5; 3]),
            Surface::NormalMapped {
                diffuse: d,
                normal_map: n
            }
        );
        assert_eq!(Surface::resolve(Some(d), None, [0.5; 3]), Surface::Textured(d));
        assert_eq!(Surface::resolve(None, Some(n), [0.5; 3]), Surface::Flat([0.5; 3]));
        assert_eq!(Surface::resolve(None, None, [0.2; 3]), Surface::Flat([0.2; 3]));
    }

    #[test]
    fn test_sun_model_scales_by_radius() {
        let sun = LightEmitter {
            position: Vec3::ZERO,
            radius: 2.0,
            surface: Surface::Flat([1.0, 1.0, 0.0]),
            self_rotation_speed: 0.0,
            self_phase: 0.0,
        };
        let p = sun.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }
}
