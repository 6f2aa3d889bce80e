//! Rendering layer: the [`RenderBackend`] seam, scoped pipeline state, the
//! orbit camera, and the wgpu implementation behind them.

pub mod backend;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod guard;
pub mod handle;
pub mod mesh;
pub mod recording;
pub mod shader;
pub mod state;
pub mod texture;
pub mod wgpu_backend;

pub use backend::{DrawCommand, LightParams, RenderBackend, RenderError, TextureUsage};
pub use camera::{OrbitCamera, wrap_degrees};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use guard::{ScopedState, StateGuard};
pub use handle::{MeshHandle, ProgramHandle, TextureHandle};
pub use mesh::{MeshData, SphereOrientation, Topology, Vertex, uv_sphere};
pub use recording::{RecordedDraw, RecordingBackend, TextureAvailability};
pub use shader::ShaderError;
pub use state::{BlendMode, CullMode, RenderState};
pub use texture::TextureError;
pub use wgpu_backend::{BackendInitError, SHARED_BINDINGS_SOURCE, WgpuBackend};
