//! The normal-mapping program and the per-frame light it reads.

use glam::{Mat4, Vec3};
use orrery_render::{
    DrawCommand, LightParams, ProgramHandle, RenderBackend, RenderError, ScopedState,
    ShaderError,
};

use crate::light::light_position_view;
use crate::normal_map;

/// Owns the compiled normal-map program and the camera-space light
/// position for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct LightingPipeline {
    program: ProgramHandle,
    ambient: f32,
    light_view: Vec3,
}

impl LightingPipeline {
    pub const PROGRAM_NAME: &'static str = "normal-map";

    /// Compile the program. Failure is fatal to the caller: there is no
    /// fixed-function path to fall back to.
    pub fn new<B: RenderBackend + ?Sized>(
        backend: &mut B,
        ambient: f32,
    ) -> Result<Self, ShaderError> {
        let program = backend.compile_program(
            Self::PROGRAM_NAME,
            &normal_map::vertex_source(),
            &normal_map::fragment_source(),
        )?;
        log::debug!("Compiled {} program as {:?}", Self::PROGRAM_NAME, program);
        Ok(Self {
            program,
            ambient,
            light_view: Vec3::ZERO,
        })
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn light_view(&self) -> Vec3 {
        self.light_view
    }

    /// Recompute the camera-space light position from this frame's view.
    pub fn update(&mut self, view: Mat4, emitter_world: Vec3) {
        self.light_view = light_position_view(view, emitter_world);
    }

    pub fn light_params(&self) -> LightParams {
        LightParams {
            position_view: self.light_view,
            ambient: self.ambient,
        }
    }

    /// Publish the light to the backend. Call once per frame after
    /// [`update`](Self::update).
    pub fn bind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.set_light(self.light_params());
    }

    /// Draw with the normal-map program bound. The diffuse map goes in
    /// `command.diffuse` and the normal map in `command.normal_map`; the
    /// previous program is back in place when this returns.
    pub fn draw<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        command: DrawCommand,
    ) -> Result<(), RenderError> {
        let mut scoped = backend.scoped_state(|state| {
            state.program = Some(self.program);
            state.texturing = true;
            state.lighting = false;
        });
        scoped.draw(command)
    }
}
