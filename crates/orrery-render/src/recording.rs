//! GPU-free backend that records every draw.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glam::Mat4;

use crate::backend::{DrawCommand, LightParams, RenderBackend, RenderError, TextureUsage};
use crate::handle::{MeshHandle, ProgramHandle, TextureHandle};
use crate::mesh::{MeshData, Topology};
use crate::shader::{self, ShaderError};
use crate::state::RenderState;

/// A draw together with everything that was bound when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub state: RenderState,
    pub command: DrawCommand,
    pub topology: Topology,
    pub mesh_label: String,
    pub view: Mat4,
    pub light: LightParams,
}

/// Which texture loads succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureAvailability {
    /// A load succeeds when the file exists on disk.
    Filesystem,
    /// Every load succeeds.
    All,
    /// Only the listed paths load.
    Only(HashSet<PathBuf>),
}

/// A [`RenderBackend`] that keeps meshes and draws in memory.
pub struct RecordingBackend {
    state: RenderState,
    meshes: Vec<(String, MeshData)>,
    textures: Vec<(PathBuf, TextureUsage)>,
    programs: Vec<String>,
    availability: TextureAvailability,
    failing_programs: HashSet<String>,
    view: Mat4,
    projection: Mat4,
    light: LightParams,
    draws: Vec<RecordedDraw>,
    fail_next_draw: Option<RenderError>,
}

impl RecordingBackend {
    /// Texture loads succeed for files that exist.
    pub fn new() -> Self {
        Self {
            state: RenderState::default(),
            meshes: Vec::new(),
            textures: Vec::new(),
            programs: Vec::new(),
            availability: TextureAvailability::Filesystem,
            failing_programs: HashSet::new(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            light: LightParams::default(),
            draws: Vec::new(),
            fail_next_draw: None,
        }
    }

    pub fn with_texture_availability(mut self, availability: TextureAvailability) -> Self {
        self.availability = availability;
        self
    }

    /// Only these paths will load.
    pub fn with_available_textures<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let set = paths.into_iter().map(Into::into).collect();
        self.with_texture_availability(TextureAvailability::Only(set))
    }

    /// Make `compile_program` fail for the program with this name.
    pub fn fail_program(&mut self, name: &str) {
        self.failing_programs.insert(name.to_string());
    }

    /// Make the next `draw` return `error` without recording anything.
    pub fn fail_next_draw(&mut self, error: RenderError) {
        self.fail_next_draw = Some(error);
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize).map(|(_, mesh)| mesh)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_path(&self, handle: TextureHandle) -> Option<&Path> {
        self.textures
            .get(handle.0 as usize)
            .map(|(path, _)| path.as_path())
    }

    pub fn texture_usage(&self, handle: TextureHandle) -> Option<TextureUsage> {
        self.textures.get(handle.0 as usize).map(|(_, usage)| *usage)
    }

    pub fn program_name(&self, handle: ProgramHandle) -> Option<&str> {
        self.programs.get(handle.0 as usize).map(String::as_str)
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn light(&self) -> LightParams {
        self.light
    }

    fn texture_loads(&self, path: &Path) -> bool {
        match &self.availability {
            TextureAvailability::Filesystem => path.is_file(),
            TextureAvailability::All => true,
            TextureAvailability::Only(set) => set.contains(path),
        }
    }

    fn check_texture(&self, handle: Option<TextureHandle>) -> Result<(), RenderError> {
        match handle {
            Some(h) if h.0 as usize >= self.textures.len() => Err(RenderError::UnknownTexture(h)),
            _ => Ok(()),
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    fn state(&self) -> RenderState {
        self.state
    }

    fn set_state(&mut self, state: RenderState) {
        self.state = state;
    }

    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push((label.to_string(), mesh.clone()));
        handle
    }

    fn load_texture(&mut self, path: &Path, usage: TextureUsage) -> Option<TextureHandle> {
        if !self.texture_loads(path) {
            log::debug!("Texture '{}' unavailable", path.display());
            return None;
        }
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push((path.to_path_buf(), usage));
        Some(handle)
    }

    fn compile_program(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError> {
        if self.failing_programs.contains(name) {
            return Err(ShaderError::CompilationFailed {
                name: name.to_string(),
                message: "compilation rejected".to_string(),
            });
        }
        shader::require_entry_point(name, vertex_source, shader::VERTEX_ENTRY)?;
        shader::require_entry_point(name, fragment_source, shader::FRAGMENT_ENTRY)?;
        let handle = ProgramHandle(self.programs.len() as u32);
        self.programs.push(name.to_string());
        Ok(handle)
    }

    fn set_camera(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.projection = projection;
    }

    fn set_light(&mut self, light: LightParams) {
        self.light = light;
    }

    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        if let Some(error) = self.fail_next_draw.take() {
            return Err(error);
        }
        let (label, mesh) = self
            .meshes
            .get(command.mesh.0 as usize)
            .ok_or(RenderError::UnknownMesh(command.mesh))?;
        if let Some(program) = self.state.program
            && program.0 as usize >= self.programs.len()
        {
            return Err(RenderError::UnknownProgram(program));
        }
        let topology = mesh.topology;
        let mesh_label = label.clone();
        self.check_texture(command.diffuse)?;
        self.check_texture(command.normal_map)?;

        self.draws.push(RecordedDraw {
            state: self.state,
            command,
            topology,
            mesh_label,
            view: self.view,
            light: self.light,
        });
        Ok(())
    }
}
