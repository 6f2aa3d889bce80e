//! Skybox: a large inward-facing sphere with a panoramic star texture.

use std::path::Path;

use glam::{Mat4, Vec3};
use orrery_render::{
    CullMode, DrawCommand, MeshHandle, RenderBackend, RenderError, ScopedState,
    SphereOrientation, TextureHandle, TextureUsage, uv_sphere,
};

#[derive(Debug, Clone, Copy)]
pub struct SkyboxRenderer {
    mesh: MeshHandle,
    texture: TextureHandle,
    radius: f32,
}

impl SkyboxRenderer {
    /// Load the panorama and upload the inverted sphere. Returns `None`
    /// (and the skybox is skipped) when the texture is unavailable.
    pub fn load<B: RenderBackend + ?Sized>(
        backend: &mut B,
        texture_path: &Path,
        radius: f32,
        segments: u32,
    ) -> Option<Self> {
        let Some(texture) = backend.load_texture(texture_path, TextureUsage::Color) else {
            log::warn!(
                "Skybox texture {} unavailable, skipping skybox",
                texture_path.display()
            );
            return None;
        };
        let sphere = uv_sphere(segments, (segments / 2).max(2), SphereOrientation::Inside);
        let mesh = backend.upload_mesh("skybox", &sphere);
        log::debug!("Skybox loaded from {} at radius {radius}", texture_path.display());
        Some(Self {
            mesh,
            texture,
            radius,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.radius))
    }

    /// Draw first in the frame with depth testing, culling and lighting off
    /// and texturing forced on; all four come back afterwards.
    pub fn render<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<(), RenderError> {
        let mut scoped = backend.scoped_state(|state| {
            state.depth_test = false;
            state.cull = CullMode::None;
            state.lighting = false;
            state.texturing = true;
            state.program = None;
        });
        let command = DrawCommand::new(self.mesh, self.model_matrix());
        scoped.draw(command.with_diffuse(Some(self.texture)))
    }
}
