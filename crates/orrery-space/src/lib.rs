//! The solar-system scene: celestial bodies and their hierarchical animation,
//! the sun, the ring, the skybox, and the orbit-path overlay.

pub mod body;
pub mod error;
pub mod orbit;
pub mod ring;
pub mod scene;
pub mod skybox;

pub use body::{CelestialBody, LightEmitter, Surface, advance_phase};
pub use error::SceneError;
pub use orbit::{OrbitOverlay, orbit_loop_mesh};
pub use ring::{RingRenderer, ring_mesh};
pub use scene::Scene;
pub use skybox::SkyboxRenderer;
