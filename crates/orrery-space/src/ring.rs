//! Planetary rings: a flat annulus with radial alpha falloff.

use std::f32::consts::TAU;

use glam::Mat4;
use orrery_config::RingConfig;
use orrery_render::{
    BlendMode, CullMode, DrawCommand, MeshData, MeshHandle, RenderBackend, RenderError,
    ScopedState, TextureHandle, Topology, Vertex,
};

pub const INNER_ALPHA: f32 = 0.8;
pub const OUTER_ALPHA: f32 = 0.2;

/// Closed triangle strip in the XZ plane alternating inner and outer
/// vertices: `2·(segments + 1)` vertices, the last pair repeating the first.
///
/// Textured rings get white vertices so the texture carries the color; the
/// alpha falloff applies either way.
pub fn ring_mesh(
    inner_radius: f32,
    outer_radius: f32,
    segments: u32,
    tint: [f32; 3],
    textured: bool,
) -> MeshData {
    let segments = segments.max(3);
    let rgb = if textured { [1.0; 3] } else { tint };
    let mut vertices = Vec::with_capacity(2 * (segments as usize + 1));

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let (sin, cos) = (TAU * t).sin_cos();
        let edges = [
            (inner_radius, INNER_ALPHA, 0.0),
            (outer_radius, OUTER_ALPHA, 1.0),
        ];
        for (radius, alpha, u) in edges {
            vertices.push(Vertex {
                position: [radius * cos, 0.0, radius * sin],
                normal: [0.0, 1.0, 0.0],
                uv: [u, t],
                color: [rgb[0], rgb[1], rgb[2], alpha],
            });
        }
    }

    MeshData::strip(vertices, Topology::TriangleStrip)
}

/// Uploaded ring geometry plus its optional texture and tilt.
#[derive(Debug, Clone, Copy)]
pub struct RingRenderer {
    mesh: MeshHandle,
    texture: Option<TextureHandle>,
    tilt_degrees: f32,
}

impl RingRenderer {
    pub fn new<B: RenderBackend + ?Sized>(
        backend: &mut B,
        label: &str,
        config: &RingConfig,
        segments: u32,
        texture: Option<TextureHandle>,
    ) -> Self {
        let data = ring_mesh(
            config.inner_radius,
            config.outer_radius,
            segments,
            config.color,
            texture.is_some(),
        );
        let mesh = backend.upload_mesh(label, &data);
        Self {
            mesh,
            texture,
            tilt_degrees: config.tilt_degrees,
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// The host's orbital frame tilted about X. The host's self-rotation
    /// never reaches the ring.
    pub fn model_matrix(&self, orbital_frame: Mat4) -> Mat4 {
        orbital_frame * Mat4::from_rotation_x(self.tilt_degrees.to_radians())
    }

    /// Draw alpha-blended with culling off; both are restored on return.
    pub fn render<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        orbital_frame: Mat4,
    ) -> Result<(), RenderError> {
        let textured = self.texture.is_some();
        let mut scoped = backend.scoped_state(|state| {
            state.blend = BlendMode::Alpha;
            state.cull = CullMode::None;
            state.program = None;
            state.lighting = false;
            state.texturing = textured;
        });
        let command = DrawCommand::new(self.mesh, self.model_matrix(orbital_frame));
        scoped.draw(command.with_diffuse(self.texture))
    }
}
