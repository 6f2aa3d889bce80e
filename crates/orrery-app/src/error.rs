use orrery_config::ConfigError;
use orrery_render::{BackendInitError, RenderContextError, RenderError};
use orrery_space::SceneError;

/// Anything that ends the application early.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Context(#[from] RenderContextError),

    #[error("renderer initialization failed: {0}")]
    Backend(#[from] BackendInitError),

    #[error("scene setup failed: {0}")]
    Scene(#[from] SceneError),

    #[error("frame failed: {0}")]
    Render(#[from] RenderError),
}
