//! Orbit-path overlay: one thin loop per body at its orbit radius.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use orrery_render::{
    BlendMode, DrawCommand, MeshData, MeshHandle, RenderBackend, RenderError, ScopedState,
    Topology, Vertex,
};

/// Unit circle in the XZ plane as a line strip of `segments + 1` vertices;
/// the last vertex repeats the first so the loop closes.
pub fn orbit_loop_mesh(segments: u32, color: [f32; 3]) -> MeshData {
    let segments = segments.max(3);
    let vertices = (0..=segments)
        .map(|i| {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            Vertex {
                position: [cos, 0.0, sin],
                normal: [0.0, 1.0, 0.0],
                uv: [0.0, 0.0],
                color: [color[0], color[1], color[2], 1.0],
            }
        })
        .collect();
    MeshData::strip(vertices, Topology::LineStrip)
}

/// Shared unit loop, scaled per body.
#[derive(Debug, Clone, Copy)]
pub struct OrbitOverlay {
    mesh: MeshHandle,
}

impl OrbitOverlay {
    pub fn new<B: RenderBackend + ?Sized>(backend: &mut B, segments: u32, color: [f32; 3]) -> Self {
        let mesh = backend.upload_mesh("orbit-loop", &orbit_loop_mesh(segments, color));
        Self { mesh }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    /// Draw one loop per `(parent_frame, orbit_radius)` in a single scoped
    /// pass: alpha blending on, custom program and texturing off.
    pub fn render<B, I>(&self, backend: &mut B, placements: I) -> Result<(), RenderError>
    where
        B: RenderBackend + ?Sized,
        I: IntoIterator<Item = (Mat4, f32)>,
    {
        let mut scoped = backend.scoped_state(|state| {
            state.blend = BlendMode::Alpha;
            state.program = None;
            state.texturing = false;
            state.lighting = false;
        });
        for (parent_frame, radius) in placements {
            let model = parent_frame * Mat4::from_scale(Vec3::new(radius, 1.0, radius));
            scoped.draw(DrawCommand::new(self.mesh, model))?;
        }
        Ok(())
    }
}
