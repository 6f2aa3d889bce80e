//! WGSL shader module compilation with captured validation errors.

use log::{debug, info};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Entry point every vertex source must define.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point every fragment source must define.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Error types for shader compilation.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' failed to compile: {message}")]
    CompilationFailed { name: String, message: String },

    #[error("shader '{name}' has no entry point '{entry_point}'")]
    MissingEntryPoint { name: String, entry_point: String },
}

/// Check that `source` declares `fn <entry_point>`.
pub fn require_entry_point(name: &str, source: &str, entry_point: &str) -> Result<(), ShaderError> {
    let declared = source
        .match_indices("fn ")
        .any(|(idx, _)| {
            let rest = source[idx + 3..].trim_start();
            rest.strip_prefix(entry_point)
                .is_some_and(|tail| tail.trim_start().starts_with('('))
        });
    if declared {
        Ok(())
    } else {
        Err(ShaderError::MissingEntryPoint {
            name: name.to_string(),
            entry_point: entry_point.to_string(),
        })
    }
}

/// Compile a WGSL module, turning validation failures into [`ShaderError`]
/// instead of the device's uncaptured-error panic.
pub fn compile_module(
    device: &wgpu::Device,
    name: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    debug!("Compiling shader '{}'", name);

    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(name),
        source: ShaderSource::Wgsl(source.into()),
    });

    if let Some(error) = pollster::block_on(scope.pop()) {
        return Err(ShaderError::CompilationFailed {
            name: name.to_string(),
            message: error.to_string(),
        });
    }

    info!("Compiled shader '{}'", name);
    Ok(module)
}
