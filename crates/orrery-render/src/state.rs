//! Pipeline state toggles shared by every backend.
//!
//! [`RenderState`] is a small `Copy` value: the backend resolves it, together
//! with the mesh topology, into a concrete GPU pipeline at draw time.

use crate::handle::ProgramHandle;

/// Color blending mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending; the fragment replaces the target.
    #[default]
    Opaque,
    /// `src·α + dst·(1 − α)`.
    Alpha,
}

/// Face culling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// Draw both faces.
    None,
    /// Cull faces wound clockwise on screen.
    #[default]
    Back,
    /// Cull faces wound counter-clockwise on screen.
    Front,
}

/// The toggles a draw is issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub blend: BlendMode,
    pub cull: CullMode,
    /// Depth test and depth write.
    pub depth_test: bool,
    /// Built-in per-vertex lighting (ignored while a program is bound).
    pub lighting: bool,
    /// Sample the draw's diffuse texture.
    pub texturing: bool,
    /// Custom shader program; `None` selects the built-in unlit program.
    pub program: Option<ProgramHandle>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            blend: BlendMode::Opaque,
            cull: CullMode::Back,
            depth_test: true,
            lighting: false,
            texturing: true,
            program: None,
        }
    }
}

impl BlendMode {
    /// The wgpu blend state for this mode.
    pub fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        }
    }
}

impl CullMode {
    /// The wgpu cull face for this mode.
    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullMode::None => None,
            CullMode::Back => Some(wgpu::Face::Back),
            CullMode::Front => Some(wgpu::Face::Front),
        }
    }
}
