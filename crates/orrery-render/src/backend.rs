//! The seam between scene code and the GPU.
//!
//! Scene, lighting and overlay code only ever talk to a [`RenderBackend`]:
//! they upload meshes, load textures, compile programs, toggle
//! [`RenderState`] and issue [`DrawCommand`]s. [`WgpuBackend`](crate::WgpuBackend)
//! turns that into wgpu pipelines and passes; [`RecordingBackend`](crate::RecordingBackend)
//! keeps a log of draws for tests and headless runs.

use std::path::Path;

use glam::Mat4;

use crate::gpu::SurfaceError;
use crate::handle::{MeshHandle, ProgramHandle, TextureHandle};
use crate::mesh::MeshData;
use crate::shader::ShaderError;
use crate::state::RenderState;

/// How a texture's texels are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureUsage {
    /// sRGB color data (diffuse maps, skybox).
    Color,
    /// Linear data such as tangent-space normal maps.
    Data,
}

/// Per-frame light parameters, already in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    pub position_view: glam::Vec3,
    pub ambient: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            position_view: glam::Vec3::ZERO,
            ambient: 0.05,
        }
    }
}

/// One draw of an uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshHandle,
    /// Model-to-world transform.
    pub model: Mat4,
    /// Linear RGBA multiplied into the vertex color.
    pub color: [f32; 4],
    /// Texture unit 0.
    pub diffuse: Option<TextureHandle>,
    /// Texture unit 1.
    pub normal_map: Option<TextureHandle>,
}

impl DrawCommand {
    /// An untextured white draw.
    pub fn new(mesh: MeshHandle, model: Mat4) -> Self {
        Self {
            mesh,
            model,
            color: [1.0; 4],
            diffuse: None,
            normal_map: None,
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_diffuse(mut self, texture: Option<TextureHandle>) -> Self {
        self.diffuse = texture;
        self
    }

    pub fn with_normal_map(mut self, texture: Option<TextureHandle>) -> Self {
        self.normal_map = texture;
        self
    }
}

/// Frame-time rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),

    #[error("unknown texture handle {0:?}")]
    UnknownTexture(TextureHandle),

    #[error("unknown program handle {0:?}")]
    UnknownProgram(ProgramHandle),

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

impl RenderError {
    /// Whether the frame can simply be skipped.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::Surface(SurfaceError::Timeout))
    }
}

/// GPU abstraction used by the scene.
///
/// Draws are issued under the state last passed to [`set_state`](Self::set_state).
/// Temporary changes should go through
/// [`StateGuard`](crate::StateGuard) so they are undone on every exit path.
pub trait RenderBackend {
    /// The currently active state.
    fn state(&self) -> RenderState;

    /// Replace the active state.
    fn set_state(&mut self, state: RenderState);

    /// Upload geometry; the handle stays valid for the backend's lifetime.
    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> MeshHandle;

    /// Decode and upload an image file. Failures are logged and yield `None`.
    fn load_texture(&mut self, path: &Path, usage: TextureUsage) -> Option<TextureHandle>;

    /// Compile a vertex/fragment program pair. Both sources are WGSL; the
    /// vertex source must define `vs_main` and the fragment source `fs_main`.
    fn compile_program(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError>;

    /// Set the view and projection matrices for subsequent draws.
    fn set_camera(&mut self, view: Mat4, projection: Mat4);

    /// Set the light for subsequent draws.
    fn set_light(&mut self, light: LightParams);

    /// Issue a draw under the current state.
    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError>;
}
