use orrery_render::ShaderError;

/// Errors raised while building a [`Scene`](crate::Scene).
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("body '{body}' names unknown host '{host}'")]
    UnknownHost { body: String, host: String },

    #[error("body '{0}' is part of a host cycle")]
    HostCycle(String),

    #[error("duplicate body name '{0}'")]
    DuplicateBody(String),

    #[error("only one normal-mapped body is supported, found '{first}' and '{second}'")]
    MultipleNormalMapped { first: String, second: String },
}
