//! Opaque handles to backend-owned resources.

/// A mesh uploaded with [`RenderBackend::upload_mesh`](crate::RenderBackend::upload_mesh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// A texture loaded with [`RenderBackend::load_texture`](crate::RenderBackend::load_texture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// A shader program compiled with
/// [`RenderBackend::compile_program`](crate::RenderBackend::compile_program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u32);
